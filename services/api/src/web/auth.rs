//! services/api/src/web/auth.rs
//!
//! Authentication endpoints. Deliberately unimplemented stubs: the service is
//! stateless and keeps no accounts, but the routes stay mounted so the
//! surrounding product has a stable surface to build against.

use axum::response::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/auth/login - placeholder, always succeeds with a notice.
pub async fn login_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Auth not implemented yet".to_string(),
    })
}

/// POST /api/auth/register - placeholder, always succeeds with a notice.
pub async fn register_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Registration not implemented yet".to_string(),
    })
}
