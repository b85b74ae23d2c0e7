pub mod routes;

use crate::db::MaintenanceStore;
use crate::scheduling::{PendingSchedules, RecommendationSource};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct AppState {
    pub store: Arc<dyn MaintenanceStore>,
    pub recommender: Arc<dyn RecommendationSource>,
    // Either `recommender` itself or a remote endpoint.
    pub source: Arc<dyn RecommendationSource>,
    pub pending: PendingSchedules,
    pub default_cost_estimate: f64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::function_routes())
        .merge(routes::health_routes())
        .merge(routes::dashboard_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(bind_addr: &str, state: AppState) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
