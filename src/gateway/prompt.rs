use crate::models::{Priority, SchedulingRequest};
use serde_json::{json, Value};

pub const SCHEDULE_FUNCTION: &str = "create_schedule";

pub const SYSTEM_PROMPT: &str = "You are an intelligent fleet maintenance scheduling agent. \
Your role is to analyze maintenance alerts and provide optimal scheduling recommendations.

Consider the following factors when scheduling:
1. Severity of the issue (critical issues need immediate attention)
2. Predicted failure date (schedule before this date)
3. Customer location (recommend nearest service center)
4. Estimated repair time based on component
5. Customer availability preferences
6. Service center capacity

Provide a structured response with:
- Recommended scheduling date and time
- Best service center based on location
- Estimated repair duration
- Priority level
- Any special instructions for the technician
- Customer communication message";

pub fn user_prompt(request: &SchedulingRequest) -> String {
    let failure_date = request
        .predicted_failure_date
        .as_deref()
        .unwrap_or("Not predicted");

    format!(
        "Analyze this maintenance alert and provide scheduling recommendations:

Alert Details:
- Component: {component}
- Severity: {severity}
- Predicted Failure Date: {failure_date}
- Recommended Action: {action}
- Estimated Cost: \u{20b9}{cost}

Vehicle Details:
- Make/Model: {make} {model} ({year})
- Location: {location}

Customer Details:
- Name: {name}
- Phone: {phone}
- Email: {email}

Provide optimal scheduling recommendations in JSON format.",
        component = request.component,
        severity = request.severity,
        failure_date = failure_date,
        action = request.recommended_action,
        cost = request.estimated_cost,
        make = request.vehicle_make,
        model = request.vehicle_model,
        year = request.vehicle_year,
        location = request.location,
        name = request.customer_name,
        phone = request.customer_phone,
        email = request.customer_email,
    )
}

pub fn schedule_tool() -> Value {
    let priorities: Vec<&str> = Priority::ALL.iter().map(Priority::as_str).collect();
    json!({
        "type": "function",
        "function": {
            "name": SCHEDULE_FUNCTION,
            "description": "Create an optimal service schedule for the maintenance alert",
            "parameters": {
                "type": "object",
                "properties": {
                    "scheduledDate": { "type": "string", "description": "Recommended date in YYYY-MM-DD format" },
                    "scheduledTime": { "type": "string", "description": "Recommended time slot (e.g., '10:00 AM')" },
                    "serviceCenterName": { "type": "string", "description": "Recommended service center name" },
                    "serviceCenterLocation": { "type": "string", "description": "Service center address" },
                    "estimatedDuration": { "type": "number", "description": "Estimated repair duration in minutes" },
                    "priority": { "type": "string", "enum": priorities, "description": "Priority level for the appointment" },
                    "technicianNotes": { "type": "string", "description": "Special instructions for the technician" },
                    "customerMessage": { "type": "string", "description": "Message to send to the customer about the appointment" },
                    "reasoning": { "type": "string", "description": "Brief explanation of why this schedule was recommended" }
                },
                "required": [
                    "scheduledDate", "scheduledTime", "serviceCenterName", "estimatedDuration",
                    "priority", "customerMessage", "reasoning"
                ],
                "additionalProperties": false
            }
        }
    })
}

pub fn completion_body(model: &str, request: &SchedulingRequest) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": user_prompt(request) },
        ],
        "tools": [schedule_tool()],
        "tool_choice": { "type": "function", "function": { "name": SCHEDULE_FUNCTION } },
    })
}
