pub const SELECT_ALERTS: &str = r#"
SELECT id, vehicle_id, alert_type, component, severity, predicted_failure_date, confidence_score,
       description, ai_recommendation, is_resolved, resolved_at, created_at
FROM maintenance_alerts
ORDER BY created_at DESC;
"#;

pub const SELECT_ALERT_BY_ID: &str = r#"
SELECT id, vehicle_id, alert_type, component, severity, predicted_failure_date, confidence_score,
       description, ai_recommendation, is_resolved, resolved_at, created_at
FROM maintenance_alerts
WHERE id = $1;
"#;

pub const RESOLVE_ALERT: &str = r#"
UPDATE maintenance_alerts
SET is_resolved = true,
    resolved_at = $2
WHERE id = $1;
"#;

pub const SELECT_VEHICLES: &str = r#"
SELECT id, vehicle_id, make, model, year, vin, license_plate, owner_name, owner_phone, owner_email,
       location_lat, location_lng, fuel_level, engine_temp, battery_voltage,
       tire_pressure_fl, tire_pressure_fr, tire_pressure_rl, tire_pressure_rr,
       health_score, created_at
FROM vehicles
ORDER BY created_at DESC;
"#;

pub const SELECT_VEHICLE_BY_ID: &str = r#"
SELECT id, vehicle_id, make, model, year, vin, license_plate, owner_name, owner_phone, owner_email,
       location_lat, location_lng, fuel_level, engine_temp, battery_voltage,
       tire_pressure_fl, tire_pressure_fr, tire_pressure_rl, tire_pressure_rr,
       health_score, created_at
FROM vehicles
WHERE id = $1;
"#;

pub const SELECT_SERVICE_CENTER_BY_NAME: &str = r#"
SELECT id, name, city, location FROM service_centers WHERE lower(name) = lower($1) LIMIT 1;
"#;

pub const INSERT_APPOINTMENT: &str = r#"
INSERT INTO appointments (
    vehicle_id, alert_id, service_center_id, service_type, scheduled_date,
    estimated_duration, priority, technician_notes, customer_notes, status
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
RETURNING id, vehicle_id, alert_id, service_center_id, service_type, scheduled_date,
          estimated_duration, priority, technician_notes, customer_notes, status, created_at;
"#;

pub const SELECT_APPOINTMENTS: &str = r#"
SELECT id, vehicle_id, alert_id, service_center_id, service_type, scheduled_date,
       estimated_duration, priority, technician_notes, customer_notes, status, created_at
FROM appointments
ORDER BY scheduled_date ASC;
"#;
