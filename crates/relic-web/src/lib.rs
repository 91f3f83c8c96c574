//! Relic Web Server
//!
//! Axum-based web server for the artifact analysis form and JSON API.

pub mod markdown;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use relic_core::{ArtifactAnalyzer, Config};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/analyze", post(routes::api::analyze))
        .route("/status", get(routes::api::status))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/analyze", post(routes::pages::analyze))
        .route("/report/download", post(routes::report::download))
        .route("/health", get(routes::api::health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let analyzer = ArtifactAnalyzer::from_config(&config);
    let addr = config.bind_addr();
    let state = AppState::new(analyzer, config);

    if state.analyzer.cloud_enabled() {
        let warm = state.clone();
        tokio::spawn(async move {
            if let Some(catalog) = warm.analyzer.warm_up().await {
                tracing::info!(
                    model = %catalog.selected,
                    detected = catalog.detected,
                    available = catalog.available.len(),
                    "Model discovery finished"
                );
            }
        });
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
