//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{AstroApiAdapter, MockChartAdapter, OpenAiAssessmentAdapter, ProkeralaAdapter, ProviderChain},
    config::Config,
    error::ApiError,
    web::{
        astro_health_handler, birth_chart_handler, full_assessment_handler, health_handler,
        list_tests_handler, login_handler, personality_health_handler, register_handler,
        rest::ApiDoc, root_handler, single_assessment_handler, state::AppState,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use oracle_core::ports::{AssessmentGenerator, ChartProvider};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Provider Chain ---
    // One HTTP client with a bounded timeout is shared by both network
    // providers; the mock adapter terminates the chain.
    let http_client = reqwest::Client::builder()
        .timeout(config.provider_timeout)
        .build()
        .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {e}")))?;

    let astro_adapter = AstroApiAdapter::new(
        http_client.clone(),
        config.astro_api_key.clone(),
        config.astro_api_url.clone(),
    );
    let prokerala_adapter = ProkeralaAdapter::new(
        http_client,
        config.prokerala_client_id.clone(),
        config.prokerala_client_secret.clone(),
        config.prokerala_api_url.clone(),
    );

    let chart_chain = Arc::new(ProviderChain::new(vec![
        Arc::new(astro_adapter) as Arc<dyn ChartProvider>,
        Arc::new(prokerala_adapter),
        Arc::new(MockChartAdapter),
    ]));

    // --- 3. Initialize the Optional Text-Model Path ---
    let llm_adapter: Option<Arc<dyn AssessmentGenerator>> = match &config.openai_api_key {
        Some(key) if config.use_llm => {
            info!(model = %config.llm_model, "text-model assessment path enabled");
            let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(key.clone()));
            Some(Arc::new(OpenAiAssessmentAdapter::new(
                openai_client,
                config.llm_model.clone(),
            )))
        }
        _ => {
            info!("text-model assessment path disabled, using the rule-based engine");
            None
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        chart_chain,
        llm_adapter,
    });

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .allowed_origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Internal(format!("Invalid ALLOWED_ORIGIN: {e}")))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let astro_routes = Router::new()
        .route("/birth-chart", post(birth_chart_handler))
        .route("/health", get(astro_health_handler));

    let personality_routes = Router::new()
        .route("/full-assessment", post(full_assessment_handler))
        .route("/assessment/{framework}", post(single_assessment_handler))
        .route("/tests", get(list_tests_handler))
        .route("/health", get(personality_health_handler));

    let auth_routes = Router::new()
        .route("/login", post(login_handler))
        .route("/register", post(register_handler));

    let api_router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/astro", astro_routes)
        .nest("/api/personality", personality_routes)
        .nest("/api/auth", auth_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
