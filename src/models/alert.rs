use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MaintenanceAlert {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub alert_type: String,
    pub component: String,
    pub severity: String, // text in DB, see `severity_level`
    pub predicted_failure_date: Option<NaiveDate>,
    pub confidence_score: Option<f64>,
    pub description: String,
    pub ai_recommendation: Option<String>,
    pub is_resolved: Option<bool>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceAlert {
    pub fn severity_level(&self) -> Option<Severity> {
        self.severity.parse().ok()
    }

    pub fn is_resolved(&self) -> bool {
        self.is_resolved.unwrap_or(false)
    }

    /// The model-generated recommendation when there is one, the description otherwise.
    pub fn recommended_action(&self) -> &str {
        match self.ai_recommendation.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}
