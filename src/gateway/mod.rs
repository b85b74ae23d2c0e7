pub mod prompt;

use crate::config::AppConfig;
use crate::error::SchedulingError;
use crate::models::{
    duration_minutes, ScheduleArguments, ScheduleRecommendation, SchedulingRequest,
};
use crate::scheduling::{scheduled_timestamp, RecommendationSource};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, info};

pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const QUOTA_EXHAUSTED_MESSAGE: &str = "AI credits exhausted. Please add credits.";
pub const FAILED_MESSAGE: &str = "Failed to get AI scheduling recommendations";

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

pub fn parse_schedule_call(completion: &ChatCompletion) -> Result<ScheduleArguments, SchedulingError> {
    let call = completion
        .choices
        .first()
        .and_then(|c| c.message.tool_calls.as_ref())
        .and_then(|calls| calls.first())
        .ok_or_else(|| SchedulingError::UpstreamFormat("no tool call in response".to_string()))?;

    if call.function.name != prompt::SCHEDULE_FUNCTION {
        return Err(SchedulingError::UpstreamFormat(format!(
            "unexpected tool call '{}'",
            call.function.name
        )));
    }

    serde_json::from_str(&call.function.arguments)
        .map_err(|e| SchedulingError::UpstreamFormat(e.to_string()))
}

// Rejects a center, date, or time that could never be booked.
pub fn check_schedule(center: &str, date: &str, time: &str) -> Result<(), SchedulingError> {
    if center.trim().is_empty() {
        return Err(SchedulingError::UpstreamFormat(
            "serviceCenterName is empty".to_string(),
        ));
    }
    scheduled_timestamp(date, time).map_err(|e| SchedulingError::UpstreamFormat(e.to_string()))?;
    Ok(())
}

// The cost always comes from the request; the model is never asked for one.
pub fn into_recommendation(
    args: ScheduleArguments,
    request: &SchedulingRequest,
) -> Result<ScheduleRecommendation, SchedulingError> {
    check_schedule(&args.service_center_name, &args.scheduled_date, &args.scheduled_time)?;
    let estimated_duration = duration_minutes(args.estimated_duration).ok_or_else(|| {
        SchedulingError::UpstreamFormat(format!(
            "estimatedDuration {} is not a positive number of minutes",
            args.estimated_duration
        ))
    })?;

    Ok(ScheduleRecommendation {
        scheduled_date: args.scheduled_date,
        scheduled_time: args.scheduled_time,
        service_center_name: args.service_center_name,
        service_center_location: args.service_center_location,
        estimated_duration,
        priority: args.priority,
        technician_notes: args.technician_notes,
        customer_message: args.customer_message,
        reasoning: args.reasoning,
        alert_id: request.alert_id,
        vehicle_id: request.vehicle_id,
        component: request.component.clone(),
        severity: request.severity.clone(),
        estimated_cost: request.estimated_cost,
    })
}

pub struct ScheduleRecommender {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl ScheduleRecommender {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
            model: model.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            config.ai_gateway_url.clone(),
            config.ai_gateway_api_key.clone(),
            config.ai_model.clone(),
        )
    }
}

#[async_trait]
impl RecommendationSource for ScheduleRecommender {
    async fn recommend(
        &self,
        request: &SchedulingRequest,
    ) -> Result<ScheduleRecommendation, SchedulingError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SchedulingError::Configuration("AI_GATEWAY_API_KEY is not configured".to_string())
        })?;

        let body = prompt::completion_body(&self.model, request);
        debug!("Calling AI gateway for alert {}", request.alert_id);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("AI gateway request failed: {}", e);
                SchedulingError::RecommendationFailed(FAILED_MESSAGE.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    SchedulingError::RateLimited(RATE_LIMITED_MESSAGE.to_string())
                }
                StatusCode::PAYMENT_REQUIRED => {
                    SchedulingError::QuotaExhausted(QUOTA_EXHAUSTED_MESSAGE.to_string())
                }
                _ => {
                    let text = response.text().await.unwrap_or_default();
                    error!("AI gateway error: {} {}", status, text);
                    SchedulingError::RecommendationFailed(FAILED_MESSAGE.to_string())
                }
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| SchedulingError::UpstreamFormat(e.to_string()))?;
        let args = parse_schedule_call(&completion)?;
        let recommendation = into_recommendation(args, request)?;

        info!(
            "AI recommends {} {} at {} for alert {}",
            recommendation.scheduled_date,
            recommendation.scheduled_time,
            recommendation.service_center_name,
            request.alert_id
        );
        Ok(recommendation)
    }
}
