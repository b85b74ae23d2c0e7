use thiserror::Error;
use uuid::Uuid;

// None of these are retried automatically; the caller re-triggers the action.
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    QuotaExhausted(String),

    #[error("Invalid AI response format: {0}")]
    UpstreamFormat(String),

    #[error("{0}")]
    RecommendationFailed(String),

    #[error("Database error: {0}")]
    Persistence(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("No pending recommendation for alert {0}")]
    NoPendingRecommendation(Uuid),
}

impl SchedulingError {
    pub fn code(&self) -> &'static str {
        match self {
            SchedulingError::Configuration(_) => "configuration",
            SchedulingError::RateLimited(_) => "rate_limited",
            SchedulingError::QuotaExhausted(_) => "quota_exhausted",
            SchedulingError::UpstreamFormat(_) => "upstream_format",
            SchedulingError::RecommendationFailed(_) => "recommendation_failed",
            SchedulingError::Persistence(_) => "persistence",
            SchedulingError::NotFound(_) => "not_found",
            SchedulingError::InvalidSchedule(_) => "invalid_schedule",
            SchedulingError::NoPendingRecommendation(_) => "no_pending_recommendation",
        }
    }

    // Rebuilds an error received from a remote recommendation endpoint.
    pub fn from_code(code: &str, message: String) -> Option<Self> {
        let err = match code {
            "configuration" => SchedulingError::Configuration(message),
            "rate_limited" => SchedulingError::RateLimited(message),
            "quota_exhausted" => SchedulingError::QuotaExhausted(message),
            "upstream_format" => SchedulingError::UpstreamFormat(message),
            "recommendation_failed" => SchedulingError::RecommendationFailed(message),
            "invalid_schedule" => SchedulingError::InvalidSchedule(message),
            _ => return None,
        };
        Some(err)
    }
}

impl From<sqlx::Error> for SchedulingError {
    fn from(e: sqlx::Error) -> Self {
        SchedulingError::Persistence(e.to_string())
    }
}
