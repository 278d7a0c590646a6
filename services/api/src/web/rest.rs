//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use oracle_core::assessment::FrameworkResult;
use oracle_core::domain::{AssessmentBundle, BirthChart, BirthInput, FrameworkKind};
use oracle_core::ports::AssessmentGenerator as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        birth_chart_handler,
        full_assessment_handler,
        single_assessment_handler,
        list_tests_handler,
        health_handler,
    ),
    components(
        schemas(BirthDataRequest, ChartResponse, TestInfo, HealthResponse)
    ),
    tags(
        (name = "Oracle API", description = "Personality assessments derived from natal chart data.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request/Response Structs
//=========================================================================================

/// The birth data accepted by every assessment endpoint. Field presence is
/// enforced here; the values themselves are passed through unvalidated.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BirthDataRequest {
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub birth_date: String,
    /// Local time, `HH:MM`.
    pub birth_time: String,
    pub birth_place: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier.
    pub timezone: String,
}

impl From<BirthDataRequest> for BirthInput {
    fn from(req: BirthDataRequest) -> Self {
        BirthInput {
            name: req.name,
            birth_date: req.birth_date,
            birth_time: req.birth_time,
            birth_place: req.birth_place,
            latitude: req.latitude,
            longitude: req.longitude,
            timezone: req.timezone,
        }
    }
}

/// A resolved chart plus the provider that produced it.
#[derive(Serialize, ToSchema)]
pub struct ChartResponse {
    #[schema(value_type = Object)]
    pub birth_chart: BirthChart,
    pub source: String,
}

/// One framework's result, projected out of a freshly generated bundle.
#[derive(Serialize)]
pub struct SingleAssessmentResponse {
    pub test_type: FrameworkKind,
    pub result: FrameworkResult,
    pub birth_data: BirthInput,
    pub confidence_score: f64,
}

/// A catalog entry for one of the nine supported frameworks.
#[derive(Serialize, ToSchema)]
pub struct TestInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

//=========================================================================================
// Assessment Dispatch
//=========================================================================================

/// Produces the nine-framework bundle for a resolved chart. The text-model
/// path is preferred when enabled and configured; any failure there falls
/// back to the rule-based engine, never to a partial result.
async fn generate_assessment(state: &AppState, input: &BirthInput, chart: &BirthChart) -> AssessmentBundle {
    if state.config.use_llm {
        if let Some(llm) = &state.llm_adapter {
            match llm.generate_assessment(input, chart).await {
                Ok(bundle) => return bundle,
                Err(e) => {
                    info!(error = %e, "text-model path failed, falling back to the rule-based engine");
                }
            }
        }
    }

    oracle_core::generate_bundle(input, chart, Utc::now())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Resolve the birth chart for the given birth data.
///
/// Runs the provider chain only; no assessment is generated.
#[utoipa::path(
    post,
    path = "/api/astro/birth-chart",
    request_body = BirthDataRequest,
    responses(
        (status = 200, description = "Chart resolved", body = ChartResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn birth_chart_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BirthDataRequest>,
) -> Json<ChartResponse> {
    let input: BirthInput = req.into();
    let resolution = state.chart_chain.resolve(&input).await;
    Json(ChartResponse {
        birth_chart: resolution.chart,
        source: resolution.source.to_string(),
    })
}

/// Generate the complete nine-framework assessment from birth data.
#[utoipa::path(
    post,
    path = "/api/personality/full-assessment",
    request_body = BirthDataRequest,
    responses(
        (status = 200, description = "Full assessment bundle"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn full_assessment_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BirthDataRequest>,
) -> Json<AssessmentBundle> {
    let input: BirthInput = req.into();
    let resolution = state.chart_chain.resolve(&input).await;
    let bundle = generate_assessment(&state, &input, &resolution.chart).await;
    Json(bundle)
}

/// Generate a single framework's result.
///
/// All nine are computed and one is projected; the generators are cheap and
/// pure, so there is no per-framework short-circuit.
#[utoipa::path(
    post,
    path = "/api/personality/assessment/{framework}",
    request_body = BirthDataRequest,
    params(
        ("framework" = String, Path, description = "Framework key, e.g. `enneagram` or `love_language`.")
    ),
    responses(
        (status = 200, description = "Single framework result"),
        (status = 400, description = "Unknown framework key"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn single_assessment_handler(
    State(state): State<Arc<AppState>>,
    Path(framework): Path<FrameworkKind>,
    Json(req): Json<BirthDataRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let input: BirthInput = req.into();
    let resolution = state.chart_chain.resolve(&input).await;
    let bundle = generate_assessment(&state, &input, &resolution.chart).await;

    let result = bundle.framework(framework).ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unable to generate {framework} assessment"),
        )
    })?;

    Ok(Json(SingleAssessmentResponse {
        test_type: framework,
        result,
        birth_data: input,
        confidence_score: bundle.confidence_score,
    }))
}

/// List the nine available assessment frameworks.
#[utoipa::path(
    get,
    path = "/api/personality/tests",
    responses(
        (status = 200, description = "Framework catalog", body = [TestInfo])
    )
)]
pub async fn list_tests_handler() -> Json<Vec<TestInfo>> {
    Json(vec![
        TestInfo {
            id: "type_indicator",
            name: "Type Indicator",
            description: "Four-letter personality type",
        },
        TestInfo {
            id: "five_factor",
            name: "Five-Factor Model",
            description: "Five major personality dimensions",
        },
        TestInfo {
            id: "enneagram",
            name: "Enneagram",
            description: "9 personality types with wings",
        },
        TestInfo {
            id: "behavioral_style",
            name: "Behavioral Style",
            description: "Four-axis behavioral assessment",
        },
        TestInfo {
            id: "strengths",
            name: "Strengths Inventory",
            description: "Top 5 strengths from 34 themes",
        },
        TestInfo {
            id: "love_language",
            name: "Love Languages",
            description: "5 ways people express and receive love",
        },
        TestInfo {
            id: "attachment_style",
            name: "Attachment Styles",
            description: "How you form emotional bonds",
        },
        TestInfo {
            id: "emotional_intelligence",
            name: "Emotional Intelligence",
            description: "EQ assessment",
        },
        TestInfo {
            id: "career_fit",
            name: "Career Fit",
            description: "Holland Code career matching",
        },
    ])
}

/// Service-level health check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "oracle-api",
    })
}

pub async fn astro_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "astro-providers",
    })
}

pub async fn personality_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "personality-engine",
    })
}

pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to The Oracle - Personality Evaluation API"
    }))
}
