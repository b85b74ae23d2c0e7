use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_id: String, // fleet number, not the row id
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub fuel_level: Option<f64>,
    pub engine_temp: Option<f64>,
    pub battery_voltage: Option<f64>,
    pub tire_pressure_fl: Option<f64>,
    pub tire_pressure_fr: Option<f64>,
    pub tire_pressure_rl: Option<f64>,
    pub tire_pressure_rr: Option<f64>,
    pub health_score: Option<i32>, // 0-100
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn location_string(&self) -> String {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => format!("{}, {}", lat, lng),
            _ => "Unknown location".to_string(),
        }
    }
}
