use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingRequest {
    pub alert_id: Uuid,
    pub vehicle_id: Uuid,
    pub component: String,
    pub severity: String,
    pub predicted_failure_date: Option<String>,
    pub estimated_cost: f64,
    pub recommended_action: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Normal, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of the `create_schedule` tool call, exactly as the model must emit them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScheduleArguments {
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub service_center_name: String,
    #[serde(default)]
    pub service_center_location: Option<String>,
    pub estimated_duration: f64,
    pub priority: Priority,
    #[serde(default)]
    pub technician_notes: Option<String>,
    pub customer_message: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecommendation {
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub service_center_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_center_location: Option<String>,
    #[serde(deserialize_with = "rounded_minutes")]
    pub estimated_duration: u32,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_notes: Option<String>,
    pub customer_message: String,
    pub reasoning: String,
    pub alert_id: Uuid,
    pub vehicle_id: Uuid,
    pub component: String,
    pub severity: String,
    pub estimated_cost: f64,
}

// Positive, finite, and rounded to whole minutes.
pub fn duration_minutes(raw: f64) -> Option<u32> {
    let minutes = raw.round();
    if !minutes.is_finite() || minutes < 1.0 || minutes > f64::from(u32::MAX) {
        return None;
    }
    Some(minutes as u32)
}

fn rounded_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    duration_minutes(raw).ok_or_else(|| {
        de::Error::custom(format!("estimatedDuration {} is not a positive number of minutes", raw))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub schedule: Option<ScheduleRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
