use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    receive_event::{__path_receive_event, receive_event},
    receive_message::{__path_receive_message, receive_message},
};
use crate::application::{
    http::server::app_state::AppState, signature_middleware::verify_signature,
};

#[derive(OpenApi)]
#[openapi(paths(receive_message, receive_event))]
pub struct SmsApiDoc;

pub fn sms_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/sms/webhook", state.args.server.root_path),
            post(receive_message),
        )
        .route(
            &format!("{}/sms/events", state.args.server.root_path),
            post(receive_event),
        )
        .layer(middleware::from_fn_with_state(state.clone(), verify_signature))
}
