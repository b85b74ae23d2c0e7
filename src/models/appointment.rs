use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_SCHEDULED: &str = "scheduled";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub alert_id: Option<Uuid>,
    pub service_center_id: Option<Uuid>,
    pub service_type: String,
    pub scheduled_date: NaiveDateTime,
    pub estimated_duration: Option<i32>, // minutes
    pub priority: Option<String>,
    pub technician_notes: Option<String>,
    pub customer_notes: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub vehicle_id: Option<Uuid>,
    pub alert_id: Uuid,
    pub service_center_id: Option<Uuid>,
    pub service_type: String,
    pub scheduled_date: NaiveDateTime,
    pub estimated_duration: i32,
    pub priority: String,
    pub technician_notes: Option<String>,
    pub customer_notes: String,
    pub status: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ServiceCenter {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub location: String,
}
