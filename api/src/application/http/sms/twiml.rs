use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use basket_core::domain::messaging::entities::MessagingResponse;

/// Reply envelope returned to the messaging gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwimlReply(pub MessagingResponse);

impl IntoResponse for TwimlReply {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, "application/xml")], self.0.to_xml()).into_response()
    }
}
