use crate::db::MaintenanceStore;
use crate::error::SchedulingError;
use crate::models::{Appointment, MaintenanceAlert, NewAppointment, ServiceCenter, Vehicle};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    pub alerts: Mutex<Vec<MaintenanceAlert>>,
    pub vehicles: Mutex<Vec<Vehicle>>,
    pub centers: Mutex<Vec<ServiceCenter>>,
    pub appointments: Mutex<Vec<Appointment>>,
    pub fail_insert: AtomicBool,
    pub fail_resolve: AtomicBool,
}

impl MemoryStore {
    pub fn with(alerts: Vec<MaintenanceAlert>, vehicles: Vec<Vehicle>) -> Self {
        Self {
            alerts: Mutex::new(alerts),
            vehicles: Mutex::new(vehicles),
            ..Default::default()
        }
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.lock().unwrap().len()
    }

    pub fn alert(&self, id: Uuid) -> MaintenanceAlert {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .unwrap()
    }
}

#[async_trait]
impl MaintenanceStore for MemoryStore {
    async fn list_alerts(&self) -> Result<Vec<MaintenanceAlert>, SchedulingError> {
        let mut alerts = self.alerts.lock().unwrap().clone();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    async fn get_alert(&self, id: Uuid) -> Result<Option<MaintenanceAlert>, SchedulingError> {
        Ok(self.alerts.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, SchedulingError> {
        Ok(self.vehicles.lock().unwrap().clone())
    }

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, SchedulingError> {
        Ok(self.vehicles.lock().unwrap().iter().find(|v| v.id == id).cloned())
    }

    async fn find_service_center_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ServiceCenter>, SchedulingError> {
        Ok(self
            .centers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, SchedulingError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(SchedulingError::Persistence("insert rejected".to_string()));
        }
        let row = Appointment {
            id: Uuid::new_v4(),
            vehicle_id: appointment.vehicle_id,
            alert_id: Some(appointment.alert_id),
            service_center_id: appointment.service_center_id,
            service_type: appointment.service_type.clone(),
            scheduled_date: appointment.scheduled_date,
            estimated_duration: Some(appointment.estimated_duration),
            priority: Some(appointment.priority.clone()),
            technician_notes: appointment.technician_notes.clone(),
            customer_notes: Some(appointment.customer_notes.clone()),
            status: Some(appointment.status.clone()),
            created_at: Utc::now(),
        };
        self.appointments.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, SchedulingError> {
        let mut appointments = self.appointments.lock().unwrap().clone();
        appointments.sort_by_key(|a| a.scheduled_date);
        Ok(appointments)
    }

    async fn resolve_alert(
        &self,
        id: Uuid,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, SchedulingError> {
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(SchedulingError::Persistence("update rejected".to_string()));
        }
        let mut alerts = self.alerts.lock().unwrap();
        match alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.is_resolved = Some(true);
                alert.resolved_at = Some(resolved_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub fn brake_alert(vehicle_id: Uuid) -> MaintenanceAlert {
    MaintenanceAlert {
        id: Uuid::new_v4(),
        vehicle_id: Some(vehicle_id),
        alert_type: "predictive".to_string(),
        component: "Brake Pads".to_string(),
        severity: "critical".to_string(),
        predicted_failure_date: NaiveDate::from_ymd_opt(2025, 1, 15),
        confidence_score: Some(0.94),
        description: "Brake pad thickness below 3mm".to_string(),
        ai_recommendation: Some("Replace front brake pads".to_string()),
        is_resolved: Some(false),
        resolved_at: None,
        created_at: Utc::now(),
    }
}

pub fn owned_vehicle() -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        vehicle_id: "FLT-0042".to_string(),
        make: "Y".to_string(),
        model: "Z".to_string(),
        year: 2021,
        vin: Some("1HGCM82633A004352".to_string()),
        license_plate: None,
        owner_name: "X".to_string(),
        owner_phone: Some("+91 98200 00000".to_string()),
        owner_email: None,
        location_lat: Some(19.076),
        location_lng: Some(72.8777),
        fuel_level: Some(64.0),
        engine_temp: Some(92.5),
        battery_voltage: Some(12.6),
        tire_pressure_fl: Some(32.0),
        tire_pressure_fr: Some(32.0),
        tire_pressure_rl: Some(30.5),
        tire_pressure_rr: Some(31.0),
        health_score: Some(58),
        created_at: Utc::now(),
    }
}
