use crate::error::SchedulingError;
use crate::models::{
    Appointment, ErrorBody, MaintenanceAlert, ScheduleRecommendation, ScheduleResponse,
    SchedulingRequest, Vehicle,
};
use crate::scheduling::dismiss_alert;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

pub struct ApiError(SchedulingError);

impl From<SchedulingError> for ApiError {
    fn from(e: SchedulingError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SchedulingError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            SchedulingError::QuotaExhausted(_) => StatusCode::PAYMENT_REQUIRED,
            SchedulingError::NotFound(_) => StatusCode::NOT_FOUND,
            SchedulingError::NoPendingRecommendation(_) => StatusCode::CONFLICT,
            SchedulingError::InvalidSchedule(_) | SchedulingError::UpstreamFormat(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            SchedulingError::RecommendationFailed(_) => StatusCode::BAD_GATEWAY,
            SchedulingError::Configuration(_) | SchedulingError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!("{} ({})", self.0, self.0.code());
        } else {
            warn!("{} ({})", self.0, self.0.code());
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            code: Some(self.0.code().to_string()),
        };
        (status, Json(body)).into_response()
    }
}

pub fn function_routes() -> Router<AppStateArc> {
    Router::new().route("/functions/v1/schedule-service", post(schedule_service))
}

async fn schedule_service(
    State(state): State<AppStateArc>,
    payload: Result<Json<SchedulingRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return function_failure(SchedulingError::RecommendationFailed(rejection.body_text()))
        }
    };

    match state.recommender.recommend(&req).await {
        Ok(schedule) => Json(ScheduleResponse {
            success: true,
            schedule: Some(schedule),
        })
        .into_response(),
        Err(e) => function_failure(e),
    }
}

// Only 429 and 402 are distinguished; everything else is a 500 with a JSON body.
fn function_failure(e: SchedulingError) -> Response {
    error!("Scheduling error: {}", e);
    let status = match e {
        SchedulingError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        SchedulingError::QuotaExhausted(_) => StatusCode::PAYMENT_REQUIRED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorBody {
        error: e.to_string(),
        code: Some(e.code().to_string()),
    };
    (status, Json(body)).into_response()
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn dashboard_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/alerts", get(list_alerts))
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/appointments", get(list_appointments))
        .route(
            "/api/alerts/:id/recommendation",
            get(pending_recommendation)
                .post(request_recommendation)
                .delete(discard_recommendation),
        )
        .route("/api/alerts/:id/schedule", post(confirm_schedule))
        .route("/api/alerts/:id/dismiss", post(dismiss))
}

async fn list_alerts(
    State(state): State<AppStateArc>,
) -> Result<Json<Vec<MaintenanceAlert>>, ApiError> {
    Ok(Json(state.store.list_alerts().await?))
}

async fn list_vehicles(State(state): State<AppStateArc>) -> Result<Json<Vec<Vehicle>>, ApiError> {
    Ok(Json(state.store.list_vehicles().await?))
}

async fn list_appointments(
    State(state): State<AppStateArc>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(state.store.list_appointments().await?))
}

async fn load_alert(state: &AppState, alert_id: Uuid) -> Result<MaintenanceAlert, ApiError> {
    let alert = state
        .store
        .get_alert(alert_id)
        .await?
        .ok_or_else(|| SchedulingError::NotFound(format!("Alert {}", alert_id)))?;
    Ok(alert)
}

async fn pending_recommendation(
    State(state): State<AppStateArc>,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<ScheduleRecommendation>, ApiError> {
    let pending = state
        .pending
        .pending(alert_id)
        .await
        .ok_or(SchedulingError::NoPendingRecommendation(alert_id))?;
    Ok(Json(pending))
}

async fn request_recommendation(
    State(state): State<AppStateArc>,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<ScheduleRecommendation>, ApiError> {
    let alert = load_alert(&state, alert_id).await?;
    let vehicle = match alert.vehicle_id {
        Some(id) => state.store.get_vehicle(id).await?,
        None => None,
    };

    let session = state.pending.session(alert_id).await;
    let outcome = {
        let mut guard = session.lock().await;
        guard
            .request(
                state.source.as_ref(),
                Some(&alert),
                vehicle.as_ref(),
                state.default_cost_estimate,
            )
            .await
            .map(|r| r.cloned())
    };
    state.pending.release(alert_id, session).await;

    match outcome? {
        Some(recommendation) => Ok(Json(recommendation)),
        None => Err(SchedulingError::NotFound(format!("Vehicle for alert {}", alert_id)).into()),
    }
}

async fn discard_recommendation(
    State(state): State<AppStateArc>,
    Path(alert_id): Path<Uuid>,
) -> StatusCode {
    if state.pending.close(alert_id).await {
        info!("Discarded pending recommendation for alert {}", alert_id);
    }
    StatusCode::NO_CONTENT
}

async fn confirm_schedule(
    State(state): State<AppStateArc>,
    Path(alert_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let alert = load_alert(&state, alert_id).await?;

    let session = state.pending.session(alert_id).await;
    let outcome = {
        let mut guard = session.lock().await;
        guard.confirm(state.store.as_ref(), &alert).await
    };
    state.pending.release(alert_id, session).await;

    Ok((StatusCode::CREATED, Json(outcome?)))
}

async fn dismiss(
    State(state): State<AppStateArc>,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<MaintenanceAlert>, ApiError> {
    dismiss_alert(state.store.as_ref(), alert_id).await?;
    Ok(Json(load_alert(&state, alert_id).await?))
}
