use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Validates the signature the messaging provider attaches to webhook calls.
///
/// The signed payload is the full public URL of the webhook followed by every
/// decoded form parameter as `key + value`, sorted by key.
#[derive(Clone)]
pub struct WebhookSignaturePolicy {
    auth_token: String,
}

impl std::fmt::Debug for WebhookSignaturePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSignaturePolicy")
            .field("auth_token", &"***")
            .finish()
    }
}

impl WebhookSignaturePolicy {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }

    pub fn expected_signature(&self, url: &str, params: &[(String, String)]) -> String {
        let mac = self.signed_mac(url, params);
        general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    pub fn verify(&self, url: &str, params: &[(String, String)], signature: &str) -> bool {
        let Ok(provided) = general_purpose::STANDARD.decode(signature.trim()) else {
            return false;
        };

        self.signed_mac(url, params).verify_slice(&provided).is_ok()
    }

    fn signed_mac(&self, url: &str, params: &[(String, String)]) -> HmacSha1 {
        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort();

        let mut mac = HmacSha1::new_from_slice(self.auth_token.as_bytes())
            .unwrap_or_else(|_| unreachable!("hmac keys have no length limit"));
        mac.update(url.as_bytes());
        for (key, value) in sorted {
            mac.update(key.as_bytes());
            mac.update(value.as_bytes());
        }
        mac
    }
}
