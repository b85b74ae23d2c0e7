use crate::db::MaintenanceStore;
use crate::error::SchedulingError;
use crate::models::{
    Appointment, MaintenanceAlert, NewAppointment, ScheduleRecommendation, STATUS_SCHEDULED,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Converts a 12-hour clock string ("10:00 AM", "9 pm") into "HH:MM".
///
/// Without an AM/PM marker the hour is taken as already being 24-hour. Seconds are dropped.
pub fn to_24_hour(time12h: &str) -> Result<String, SchedulingError> {
    let invalid = || SchedulingError::InvalidSchedule(format!("unrecognised time '{}'", time12h));

    let upper = time12h.trim().to_ascii_uppercase();
    let (clock, pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let parts: Vec<&str> = clock.split(':').map(str::trim).collect();
    if parts.len() > 3 {
        return Err(invalid());
    }
    let hours: u32 = parts
        .first()
        .filter(|h| !h.is_empty())
        .and_then(|h| h.parse().ok())
        .ok_or_else(invalid)?;
    let minutes: u32 = match parts.get(1) {
        None | Some(&"") => 0,
        Some(m) => m.parse().map_err(|_| invalid())?,
    };
    if let Some(seconds) = parts.get(2) {
        if seconds.parse::<u32>().map_err(|_| invalid())? > 59 {
            return Err(invalid());
        }
    }
    if minutes > 59 {
        return Err(invalid());
    }

    let hours = match pm {
        Some(_) if hours > 12 => return Err(invalid()),
        Some(false) if hours == 12 => 0,
        Some(true) if hours == 12 || hours == 0 => 12,
        Some(true) => hours + 12,
        Some(false) => hours,
        None if hours > 23 => return Err(invalid()),
        None => hours,
    };

    Ok(format!("{:02}:{:02}", hours, minutes))
}

pub fn scheduled_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, SchedulingError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| SchedulingError::InvalidSchedule(format!("unrecognised date '{}'", date)))?;
    let clock = to_24_hour(time)?;
    NaiveDateTime::parse_from_str(&format!("{}T{}:00", day, clock), "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| SchedulingError::InvalidSchedule(e.to_string()))
}

pub fn appointment_for(
    alert: &MaintenanceAlert,
    recommendation: &ScheduleRecommendation,
    service_center_id: Option<Uuid>,
) -> Result<NewAppointment, SchedulingError> {
    let scheduled_date =
        scheduled_timestamp(&recommendation.scheduled_date, &recommendation.scheduled_time)?;
    let estimated_duration = i32::try_from(recommendation.estimated_duration).map_err(|_| {
        SchedulingError::InvalidSchedule(format!(
            "duration {} is out of range",
            recommendation.estimated_duration
        ))
    })?;

    Ok(NewAppointment {
        vehicle_id: alert.vehicle_id,
        alert_id: alert.id,
        service_center_id,
        service_type: alert.component.clone(),
        scheduled_date,
        estimated_duration,
        priority: recommendation.priority.as_str().to_string(),
        technician_notes: recommendation.technician_notes.clone(),
        customer_notes: recommendation.customer_message.clone(),
        status: STATUS_SCHEDULED.to_string(),
    })
}

/// Writes the appointment, then resolves the alert.
///
/// A failed insert stops before the alert is touched. A failed update after a successful
/// insert leaves the appointment in place and still returns the error.
pub async fn confirm_schedule(
    store: &dyn MaintenanceStore,
    alert: &MaintenanceAlert,
    recommendation: &ScheduleRecommendation,
) -> Result<Appointment, SchedulingError> {
    if recommendation.alert_id != alert.id {
        return Err(SchedulingError::NoPendingRecommendation(alert.id));
    }

    let service_center_id = match store
        .find_service_center_by_name(&recommendation.service_center_name)
        .await
    {
        Ok(center) => center.map(|c| c.id),
        Err(e) => {
            warn!(
                "Service center lookup for '{}' failed: {}",
                recommendation.service_center_name, e
            );
            None
        }
    };

    let new_appointment = appointment_for(alert, recommendation, service_center_id)?;

    let appointment = store
        .insert_appointment(&new_appointment)
        .await
        .map_err(|e| {
            error!("Failed to create appointment for alert {}: {}", alert.id, e);
            e
        })?;

    match store.resolve_alert(alert.id, Utc::now()).await {
        Ok(true) => {}
        Ok(false) => {
            error!(
                "Appointment {} created but alert {} no longer exists",
                appointment.id, alert.id
            );
            return Err(SchedulingError::Persistence(format!(
                "alert {} disappeared before it could be resolved",
                alert.id
            )));
        }
        Err(e) => {
            error!(
                "Appointment {} created but alert {} update failed: {}",
                appointment.id, alert.id, e
            );
            return Err(e);
        }
    }

    info!(
        "Scheduled {} for alert {} at {}",
        appointment.service_type, alert.id, appointment.scheduled_date
    );
    Ok(appointment)
}

pub async fn dismiss_alert(
    store: &dyn MaintenanceStore,
    alert_id: Uuid,
) -> Result<(), SchedulingError> {
    if !store.resolve_alert(alert_id, Utc::now()).await? {
        return Err(SchedulingError::NotFound(format!("Alert {}", alert_id)));
    }
    info!("Dismissed alert {}", alert_id);
    Ok(())
}
