use std::sync::Arc;

use basket_core::application::BasketService;

use crate::{application::signature_middleware::WebhookVerifier, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: BasketService,
    /// Present when webhook signature validation is enabled.
    pub webhook_verifier: Option<Arc<WebhookVerifier>>,
}

impl AppState {
    pub fn new(
        args: Arc<Args>,
        service: BasketService,
        webhook_verifier: Option<WebhookVerifier>,
    ) -> Self {
        Self {
            args,
            service,
            webhook_verifier: webhook_verifier.map(Arc::new),
        }
    }
}
