use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: String,
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: Option<String>,
    pub ai_model: String,
    pub recommendation_endpoint_url: Option<String>,
    pub default_cost_estimate: f64,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "fleet".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "fleet".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "fleet".to_string());

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let ai_gateway_url =
            env::var("AI_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
        // Absence is reported per request, the service still starts without it.
        let ai_gateway_api_key = non_empty_var("AI_GATEWAY_API_KEY");
        let ai_model = env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let recommendation_endpoint_url = non_empty_var("RECOMMENDATION_ENDPOINT_URL");
        let default_cost_estimate = env::var("DEFAULT_COST_ESTIMATE")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000.0);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            db_max_connections,
            bind_addr,
            ai_gateway_url,
            ai_gateway_api_key,
            ai_model,
            recommendation_endpoint_url,
            default_cost_estimate,
            log_level,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
