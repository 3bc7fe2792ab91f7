use axum::extract::State;
use basket_core::domain::{
    common::generate_uuid_v7,
    messaging::entities::InboundEvent,
    shopping_list::ports::ShoppingListService,
};
use bytes::Bytes;
use tracing::{Instrument, info_span};

use crate::application::http::{server::app_state::AppState, sms::twiml::TwimlReply};

#[utoipa::path(
    post,
    path = "/webhook",
    tag = "sms",
    summary = "Receive an inbound message",
    description = "Messaging gateway webhook. Reads the attached recipe photo and replies with the categorized shopping list. Pipeline failures are answered with an apology, never an HTTP error.",
    request_body(content = String, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Reply envelope", body = String, content_type = "application/xml"),
        (status = 403, description = "Missing or invalid webhook signature"),
    ),
)]
pub async fn receive_message(State(state): State<AppState>, body: Bytes) -> TwimlReply {
    let request_id = generate_uuid_v7();
    let event = InboundEvent::from_form_body(&String::from_utf8_lossy(&body));

    let reply = state
        .service
        .reply_to_event(event)
        .instrument(info_span!("sms_webhook", request_id = %request_id))
        .await;

    TwimlReply(reply)
}
