use crate::error::SchedulingError;
use crate::gateway::check_schedule;
use crate::models::{
    ErrorBody, MaintenanceAlert, ScheduleRecommendation, ScheduleResponse, SchedulingRequest,
    Vehicle,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{error, info, warn};

#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommend(
        &self,
        request: &SchedulingRequest,
    ) -> Result<ScheduleRecommendation, SchedulingError>;
}

pub fn build_request(
    alert: Option<&MaintenanceAlert>,
    vehicle: Option<&Vehicle>,
    estimated_cost: f64,
) -> Option<SchedulingRequest> {
    let (alert, vehicle) = (alert?, vehicle?);

    Some(SchedulingRequest {
        alert_id: alert.id,
        vehicle_id: alert.vehicle_id.unwrap_or(vehicle.id),
        component: alert.component.clone(),
        severity: alert.severity.clone(),
        predicted_failure_date: alert
            .predicted_failure_date
            .map(|d| d.format("%Y-%m-%d").to_string()),
        estimated_cost,
        recommended_action: alert.recommended_action().to_string(),
        customer_name: vehicle.owner_name.clone(),
        customer_phone: vehicle.owner_phone.clone().unwrap_or_default(),
        customer_email: vehicle.owner_email.clone().unwrap_or_default(),
        vehicle_make: vehicle.make.clone(),
        vehicle_model: vehicle.model.clone(),
        vehicle_year: vehicle.year,
        location: vehicle.location_string(),
    })
}

// No-op returning `Ok(None)` when the alert or the vehicle is absent.
pub async fn request_recommendation(
    source: &dyn RecommendationSource,
    alert: Option<&MaintenanceAlert>,
    vehicle: Option<&Vehicle>,
    estimated_cost: f64,
) -> Result<Option<ScheduleRecommendation>, SchedulingError> {
    let request = match build_request(alert, vehicle, estimated_cost) {
        Some(r) => r,
        None => return Ok(None),
    };

    if let Some(alert) = alert {
        if alert.severity_level().is_none() {
            warn!(
                "Alert {} has unrecognised severity '{}', passing it through",
                alert.id, alert.severity
            );
        }
        if alert.is_resolved() {
            info!("Alert {} is already resolved", alert.id);
        }
    }

    info!(
        "Requesting schedule for alert {} ({} / {})",
        request.alert_id, request.component, request.severity
    );
    let recommendation = source.recommend(&request).await?;

    if recommendation.alert_id != request.alert_id {
        return Err(SchedulingError::UpstreamFormat(format!(
            "recommendation is for alert {}, expected {}",
            recommendation.alert_id, request.alert_id
        )));
    }
    Ok(Some(recommendation))
}

pub struct RemoteRecommendationClient {
    client: reqwest::Client,
    url: String,
}

impl RemoteRecommendationClient {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RecommendationSource for RemoteRecommendationClient {
    async fn recommend(
        &self,
        request: &SchedulingRequest,
    ) -> Result<ScheduleRecommendation, SchedulingError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Recommendation endpoint unreachable: {}", e);
                SchedulingError::RecommendationFailed(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.ok();
            let message = body
                .as_ref()
                .map(|b| b.error.clone())
                .unwrap_or_else(|| format!("HTTP {}", status));

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => SchedulingError::RateLimited(message),
                StatusCode::PAYMENT_REQUIRED => SchedulingError::QuotaExhausted(message),
                _ => body
                    .and_then(|b| b.code)
                    .and_then(|code| SchedulingError::from_code(&code, message.clone()))
                    .unwrap_or(SchedulingError::RecommendationFailed(message)),
            });
        }

        let body: ScheduleResponse = response
            .json()
            .await
            .map_err(|e| SchedulingError::UpstreamFormat(e.to_string()))?;

        let schedule = match body.schedule {
            Some(schedule) if body.success => schedule,
            _ => {
                return Err(SchedulingError::UpstreamFormat(
                    "response carries no schedule".to_string(),
                ))
            }
        };
        check_schedule(
            &schedule.service_center_name,
            &schedule.scheduled_date,
            &schedule.scheduled_time,
        )?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{brake_alert, owned_vehicle};
    use crate::models::Priority;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn schedule_json(request: &SchedulingRequest) -> serde_json::Value {
        json!({
            "scheduledDate": "2025-01-10",
            "scheduledTime": "10:00 AM",
            "serviceCenterName": "Andheri Service Hub",
            "estimatedDuration": 60,
            "priority": "urgent",
            "customerMessage": "Booked",
            "reasoning": "Critical",
            "alertId": request.alert_id,
            "vehicleId": request.vehicle_id,
            "component": request.component,
            "severity": request.severity,
            "estimatedCost": request.estimated_cost
        })
    }

    #[test]
    fn test_build_request_requires_alert_and_vehicle() {
        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        assert!(build_request(None, Some(&vehicle), 5000.0).is_none());
        assert!(build_request(Some(&alert), None, 5000.0).is_none());
        assert!(build_request(Some(&alert), Some(&vehicle), 5000.0).is_some());
    }

    #[test]
    fn test_build_request_copies_alert_and_owner() {
        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);

        let request = build_request(Some(&alert), Some(&vehicle), 5000.0).unwrap();

        assert_eq!(request.alert_id, alert.id);
        assert_eq!(request.vehicle_id, vehicle.id);
        assert_eq!(request.severity, "critical");
        assert_eq!(request.predicted_failure_date.as_deref(), Some("2025-01-15"));
        assert_eq!(request.estimated_cost, 5000.0);
        assert_eq!(request.recommended_action, "Replace front brake pads");
        assert_eq!(request.customer_name, "X");
        assert_eq!(request.customer_email, "");
        assert_eq!(request.vehicle_make, "Y");
        assert_eq!(request.vehicle_model, "Z");
        assert_eq!(request.location, "19.076, 72.8777");
    }

    #[test]
    fn test_location_without_coordinates() {
        let mut vehicle = owned_vehicle();
        vehicle.location_lat = None;
        let alert = brake_alert(vehicle.id);
        let request = build_request(Some(&alert), Some(&vehicle), 0.0).unwrap();
        assert_eq!(request.location, "Unknown location");
    }

    #[tokio::test]
    async fn test_remote_client_parses_schedule() {
        let server = MockServer::start().await;
        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        let request = build_request(Some(&alert), Some(&vehicle), 5000.0).unwrap();

        Mock::given(method("POST"))
            .and(path("/functions/v1/schedule-service"))
            .and(body_partial_json(json!({ "severity": "critical", "component": "Brake Pads" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "schedule": schedule_json(&request) })),
            )
            .mount(&server)
            .await;

        let client =
            RemoteRecommendationClient::new(format!("{}/functions/v1/schedule-service", server.uri()))
                .unwrap();
        let recommendation = request_recommendation(&client, Some(&alert), Some(&vehicle), 5000.0)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(recommendation.priority, Priority::Urgent);
        assert_eq!(recommendation.estimated_duration, 60);
        assert_eq!(recommendation.alert_id, alert.id);
    }

    #[tokio::test]
    async fn test_remote_rate_limit_is_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(
                json!({ "error": "Rate limit exceeded. Please try again later." }),
            ))
            .mount(&server)
            .await;

        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        let client = RemoteRecommendationClient::new(server.uri()).unwrap();
        let err = request_recommendation(&client, Some(&alert), Some(&vehicle), 5000.0)
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::RateLimited(_)));
        assert_eq!(err.to_string(), "Rate limit exceeded. Please try again later.");
    }

    #[tokio::test]
    async fn test_remote_quota_and_generic_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quota"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({ "error": "no credits" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/unconfigured"))
            .respond_with(ResponseTemplate::new(500).set_body_json(
                json!({ "error": "AI_GATEWAY_API_KEY is not configured", "code": "configuration" }),
            ))
            .mount(&server)
            .await;

        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        let request = build_request(Some(&alert), Some(&vehicle), 5000.0).unwrap();

        let quota = RemoteRecommendationClient::new(format!("{}/quota", server.uri())).unwrap();
        assert!(matches!(
            quota.recommend(&request).await.unwrap_err(),
            SchedulingError::QuotaExhausted(_)
        ));

        let broken = RemoteRecommendationClient::new(format!("{}/broken", server.uri())).unwrap();
        assert!(matches!(
            broken.recommend(&request).await.unwrap_err(),
            SchedulingError::RecommendationFailed(_)
        ));

        let unconfigured =
            RemoteRecommendationClient::new(format!("{}/unconfigured", server.uri())).unwrap();
        assert!(matches!(
            unconfigured.recommend(&request).await.unwrap_err(),
            SchedulingError::Configuration(_)
        ));
    }

    #[tokio::test]
    async fn test_remote_fractional_duration_is_rounded() {
        let server = MockServer::start().await;
        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        let request = build_request(Some(&alert), Some(&vehicle), 5000.0).unwrap();
        let mut schedule = schedule_json(&request);
        schedule["estimatedDuration"] = json!(89.6);

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "schedule": schedule })),
            )
            .mount(&server)
            .await;

        let client = RemoteRecommendationClient::new(server.uri()).unwrap();
        let recommendation = client.recommend(&request).await.unwrap();

        assert_eq!(recommendation.estimated_duration, 90);
    }

    #[tokio::test]
    async fn test_remote_unbookable_time_is_rejected() {
        let server = MockServer::start().await;
        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        let request = build_request(Some(&alert), Some(&vehicle), 5000.0).unwrap();
        let mut schedule = schedule_json(&request);
        schedule["scheduledTime"] = json!("half past ten");

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "schedule": schedule })),
            )
            .mount(&server)
            .await;

        let client = RemoteRecommendationClient::new(server.uri()).unwrap();

        assert!(matches!(
            client.recommend(&request).await.unwrap_err(),
            SchedulingError::UpstreamFormat(_)
        ));
    }

    #[tokio::test]
    async fn test_remote_success_without_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let vehicle = owned_vehicle();
        let alert = brake_alert(vehicle.id);
        let request = build_request(Some(&alert), Some(&vehicle), 5000.0).unwrap();
        let client = RemoteRecommendationClient::new(server.uri()).unwrap();

        assert!(matches!(
            client.recommend(&request).await.unwrap_err(),
            SchedulingError::UpstreamFormat(_)
        ));
    }
}
