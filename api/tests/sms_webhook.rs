mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use basket_core::domain::messaging::entities::{FAILURE_MESSAGE, NO_IMAGE_MESSAGE};
use test_context::{AsyncTestContext, test_context};

use common::test_server;

const ENVELOPE_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>"#;
const ENVELOPE_CLOSE: &str = "</Message></Response>";

fn envelope(body: &str) -> String {
    format!("{}{}{}", ENVELOPE_OPEN, body, ENVELOPE_CLOSE)
}

struct OpenWebhook {
    server: TestServer,
}

impl AsyncTestContext for OpenWebhook {
    async fn setup() -> Self {
        Self {
            server: test_server(&[]).await,
        }
    }
}

struct SignedWebhook {
    server: TestServer,
}

impl AsyncTestContext for SignedWebhook {
    async fn setup() -> Self {
        Self {
            server: test_server(&[
                "--twilio-auth-token",
                "test-auth-token",
                "--public-url",
                "https://basket.example.com",
            ])
            .await,
        }
    }
}

fn signature(value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-twilio-signature"),
        HeaderValue::from_str(value).expect("ascii signature"),
    )
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_message_without_image_gets_apology(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/webhook")
        .form(&[("From", "+15551234567"), ("Body", "hello"), ("NumMedia", "0")])
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/xml");
    assert_eq!(response.text(), envelope(NO_IMAGE_MESSAGE));
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_empty_media_url_gets_apology(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/webhook")
        .form(&[("From", "+15551234567"), ("MediaUrl0", "")])
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(NO_IMAGE_MESSAGE));
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_unreachable_image_gets_failure_apology(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/webhook")
        .form(&[
            ("From", "+15551234567"),
            ("NumMedia", "1"),
            ("MediaUrl0", "http://127.0.0.1:1/recipe.jpg"),
        ])
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(FAILURE_MESSAGE));
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_invalid_media_url_gets_failure_apology(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/webhook")
        .form(&[("MediaUrl0", "not a url")])
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(FAILURE_MESSAGE));
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_json_event_without_image(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/events")
        .json(&serde_json::json!({ "From": "+15551234567", "NumMedia": 0 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(NO_IMAGE_MESSAGE));
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_json_event_with_null_image_gets_no_image_apology(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/events")
        .json(&serde_json::json!({ "NumMedia": "1", "MediaUrl0": null }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(NO_IMAGE_MESSAGE));
}

#[test_context(OpenWebhook)]
#[tokio::test]
async fn test_json_event_with_encoded_unreachable_image(ctx: &mut OpenWebhook) {
    let response = ctx
        .server
        .post("/sms/events")
        .json(&serde_json::json!({
            "NumMedia": "1",
            "MediaUrl0": "http%3A%2F%2F127.0.0.1%3A1%2Frecipe.jpg"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(FAILURE_MESSAGE));
}

#[test_context(SignedWebhook)]
#[tokio::test]
async fn test_valid_signature_is_accepted(ctx: &mut SignedWebhook) {
    let (name, value) = signature("2zQB+VK8R+jzxwI04xw8SkXEb9c=");
    let response = ctx
        .server
        .post("/sms/webhook")
        .add_header(name, value)
        .form(&[
            ("From", "+15551234567"),
            ("Body", "Pasta tonight"),
            ("NumMedia", "0"),
        ])
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(NO_IMAGE_MESSAGE));
}

#[test_context(SignedWebhook)]
#[tokio::test]
async fn test_tampered_parameters_are_rejected(ctx: &mut SignedWebhook) {
    let (name, value) = signature("2zQB+VK8R+jzxwI04xw8SkXEb9c=");
    let response = ctx
        .server
        .post("/sms/webhook")
        .add_header(name, value)
        .form(&[
            ("From", "+15559999999"),
            ("Body", "Pasta tonight"),
            ("NumMedia", "0"),
        ])
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(SignedWebhook)]
#[tokio::test]
async fn test_missing_signature_is_rejected(ctx: &mut SignedWebhook) {
    let response = ctx
        .server
        .post("/sms/webhook")
        .form(&[("From", "+15551234567")])
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(SignedWebhook)]
#[tokio::test]
async fn test_json_event_signs_url_only(ctx: &mut SignedWebhook) {
    let (name, value) = signature("YBZSHRiCmGvwZC6ABmRk51Fcw8c=");
    let response = ctx
        .server
        .post("/sms/events")
        .add_header(name, value)
        .json(&serde_json::json!({ "From": "+15551234567" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), envelope(NO_IMAGE_MESSAGE));
}
