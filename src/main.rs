mod config;
mod db;
mod error;
mod gateway;
mod models;
mod scheduling;
mod server;

use config::AppConfig;
use db::PgStore;
use gateway::ScheduleRecommender;
use scheduling::{PendingSchedules, RecommendationSource, RemoteRecommendationClient};
use server::AppState;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Fleet Scheduler...");

    if config.ai_gateway_api_key.is_none() {
        warn!("AI_GATEWAY_API_KEY is not set; recommendation requests will fail");
    }

    // Init DB
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    info!("Connected to database");

    let recommender: Arc<dyn RecommendationSource> =
        Arc::new(ScheduleRecommender::from_config(&config)?);
    let source: Arc<dyn RecommendationSource> = match &config.recommendation_endpoint_url {
        Some(url) => {
            info!("Using remote recommendation endpoint {}", url);
            Arc::new(RemoteRecommendationClient::new(url.clone())?)
        }
        None => recommender.clone(),
    };

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        recommender,
        source,
        pending: PendingSchedules::default(),
        default_cost_estimate: config.default_cost_estimate,
    };

    server::run(&config.bind_addr, state).await?;

    Ok(())
}
