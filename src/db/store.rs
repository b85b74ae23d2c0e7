use crate::db::{queries, DbPool};
use crate::error::SchedulingError;
use crate::models::{Appointment, MaintenanceAlert, NewAppointment, ServiceCenter, Vehicle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn list_alerts(&self) -> Result<Vec<MaintenanceAlert>, SchedulingError>;

    async fn get_alert(&self, id: Uuid) -> Result<Option<MaintenanceAlert>, SchedulingError>;

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, SchedulingError>;

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, SchedulingError>;

    async fn find_service_center_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ServiceCenter>, SchedulingError>;

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, SchedulingError>;

    async fn list_appointments(&self) -> Result<Vec<Appointment>, SchedulingError>;

    /// Sets the resolution flag and timestamp. Returns false when no alert has this id.
    async fn resolve_alert(
        &self,
        id: Uuid,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, SchedulingError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceStore for PgStore {
    async fn list_alerts(&self) -> Result<Vec<MaintenanceAlert>, SchedulingError> {
        let alerts = sqlx::query_as::<_, MaintenanceAlert>(queries::SELECT_ALERTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(alerts)
    }

    async fn get_alert(&self, id: Uuid) -> Result<Option<MaintenanceAlert>, SchedulingError> {
        let alert = sqlx::query_as::<_, MaintenanceAlert>(queries::SELECT_ALERT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(alert)
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, SchedulingError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(queries::SELECT_VEHICLES)
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, SchedulingError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(queries::SELECT_VEHICLE_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    async fn find_service_center_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ServiceCenter>, SchedulingError> {
        let center = sqlx::query_as::<_, ServiceCenter>(queries::SELECT_SERVICE_CENTER_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(center)
    }

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, SchedulingError> {
        let row = sqlx::query_as::<_, Appointment>(queries::INSERT_APPOINTMENT)
            .bind(appointment.vehicle_id)
            .bind(appointment.alert_id)
            .bind(appointment.service_center_id)
            .bind(&appointment.service_type)
            .bind(appointment.scheduled_date)
            .bind(appointment.estimated_duration)
            .bind(&appointment.priority)
            .bind(&appointment.technician_notes)
            .bind(&appointment.customer_notes)
            .bind(&appointment.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = sqlx::query_as::<_, Appointment>(queries::SELECT_APPOINTMENTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(appointments)
    }

    async fn resolve_alert(
        &self,
        id: Uuid,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, SchedulingError> {
        let result = sqlx::query(queries::RESOLVE_ALERT)
            .bind(id)
            .bind(resolved_at)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
