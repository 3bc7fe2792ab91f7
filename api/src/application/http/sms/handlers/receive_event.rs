use std::collections::HashMap;

use axum::{Json, extract::State};
use basket_core::domain::{
    common::generate_uuid_v7,
    messaging::entities::InboundEvent,
    shopping_list::ports::ShoppingListService,
};
use serde_json::Value;
use tracing::{Instrument, info_span};

use crate::application::http::{server::app_state::AppState, sms::twiml::TwimlReply};

#[utoipa::path(
    post,
    path = "/events",
    tag = "sms",
    summary = "Receive a raw inbound event",
    description = "Same pipeline as the webhook for events forwarded as a JSON object of fields, values still URL-encoded.",
    request_body(content = HashMap<String, String>, content_type = "application/json"),
    responses(
        (status = 200, description = "Reply envelope", body = String, content_type = "application/xml"),
        (status = 403, description = "Missing or invalid webhook signature"),
    ),
)]
pub async fn receive_event(
    State(state): State<AppState>,
    Json(fields): Json<HashMap<String, Value>>,
) -> TwimlReply {
    let request_id = generate_uuid_v7();
    let event = InboundEvent::new(event_fields(fields));

    let reply = state
        .service
        .reply_to_event(event)
        .instrument(info_span!("sms_event", request_id = %request_id))
        .await;

    TwimlReply(reply)
}

/// Keeps scalar values as text. Nulls and nested values carry no field.
fn event_fields(fields: HashMap<String, Value>) -> HashMap<String, String> {
    fields
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            Value::Number(number) => Some((key, number.to_string())),
            Value::Bool(flag) => Some((key, flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).expect("json object")
    }

    #[test]
    fn test_scalar_values_become_text() {
        let converted = event_fields(fields(json!({
            "From": "+15551234567",
            "NumMedia": 1,
            "Verified": true
        })));

        assert_eq!(converted.get("From").map(String::as_str), Some("+15551234567"));
        assert_eq!(converted.get("NumMedia").map(String::as_str), Some("1"));
        assert_eq!(converted.get("Verified").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_null_and_nested_values_are_dropped() {
        let converted = event_fields(fields(json!({
            "MediaUrl0": null,
            "Media": ["a"],
            "Meta": { "k": "v" }
        })));

        assert!(converted.is_empty());
        assert_eq!(InboundEvent::new(converted).image_location(), None);
    }
}
