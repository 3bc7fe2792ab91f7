use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::Response,
};
use basket_core::domain::messaging::policies::WebhookSignaturePolicy;
use tracing::warn;
use url::Url;

use crate::{
    application::http::server::{api_entities::api_error::ApiError, app_state::AppState},
    args::MessagingArgs,
};

pub const SIGNATURE_HEADER: &str = "x-twilio-signature";

const MAX_WEBHOOK_BODY_BYTES: usize = 64 * 1024;

/// Checks gateway signatures against the externally visible request URL.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    policy: WebhookSignaturePolicy,
    public_url: String,
}

impl WebhookVerifier {
    pub fn new(policy: WebhookSignaturePolicy, public_url: &str) -> Result<Self, anyhow::Error> {
        let parsed = Url::parse(public_url)
            .map_err(|e| anyhow::anyhow!("invalid public url {:?}: {}", public_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("public url must be http or https, got {:?}", public_url);
        }

        Ok(Self {
            policy,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }

    /// `None` when no auth token is configured.
    pub fn from_args(args: &MessagingArgs) -> Result<Option<Self>, anyhow::Error> {
        let Some(token) = args.twilio_auth_token.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let public_url = args
            .public_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("public url is required when a twilio auth token is set"))?;

        Self::new(WebhookSignaturePolicy::new(token), public_url).map(Some)
    }

    pub fn signed_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.public_url, path_and_query)
    }

    pub fn verify(&self, path_and_query: &str, params: &[(String, String)], signature: &str) -> bool {
        self.policy
            .verify(&self.signed_url(path_and_query), params, signature)
    }
}

/// Rejects webhook calls whose `X-Twilio-Signature` does not match. A no-op
/// when validation is disabled.
pub async fn verify_signature(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(verifier) = state.webhook_verifier.clone() else {
        return Ok(next.run(req).await);
    };

    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            warn!("Webhook call without signature");
            ApiError::Forbidden("Missing webhook signature".to_string())
        })?;

    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let is_form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|content_type| {
            content_type.starts_with("application/x-www-form-urlencoded")
        });

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_WEBHOOK_BODY_BYTES)
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read webhook body: {}", e)))?;

    let params: Vec<(String, String)> = if is_form {
        serde_urlencoded::from_bytes(&bytes)
            .map_err(|e| ApiError::BadRequest(format!("Invalid form body: {}", e)))?
    } else {
        Vec::new()
    };

    if !verifier.verify(&path_and_query, &params, &signature) {
        warn!(path = %path_and_query, "Webhook signature mismatch");
        return Err(ApiError::Forbidden("Invalid webhook signature".to_string()));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(
            WebhookSignaturePolicy::new("test-auth-token"),
            "https://basket.example.com/",
        )
        .unwrap()
    }

    #[test]
    fn test_signed_url_joins_public_url_and_path() {
        assert_eq!(
            verifier().signed_url("/sms/webhook"),
            "https://basket.example.com/sms/webhook"
        );
    }

    #[test]
    fn test_verify_form_params() {
        let params = vec![
            ("From".to_string(), "+15551234567".to_string()),
            ("Body".to_string(), "Pasta tonight".to_string()),
            ("NumMedia".to_string(), "0".to_string()),
        ];
        assert!(verifier().verify("/sms/webhook", &params, "2zQB+VK8R+jzxwI04xw8SkXEb9c="));
        assert!(!verifier().verify("/sms/events", &params, "2zQB+VK8R+jzxwI04xw8SkXEb9c="));
    }

    #[test]
    fn test_token_requires_public_url() {
        let args = MessagingArgs {
            twilio_auth_token: Some("token".to_string()),
            public_url: None,
        };
        assert!(WebhookVerifier::from_args(&args).is_err());

        let disabled = MessagingArgs {
            twilio_auth_token: None,
            public_url: None,
        };
        assert!(WebhookVerifier::from_args(&disabled).unwrap().is_none());
    }
}
