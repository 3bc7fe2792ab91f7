use std::fmt;

use thiserror::Error;

/// External dependency a pipeline step talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalService {
    ImageHost,
    Ocr,
    IngredientModel,
    CategoryModel,
}

impl ExternalService {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalService::ImageHost => "image_host",
            ExternalService::Ocr => "ocr",
            ExternalService::IngredientModel => "ingredient_model",
            ExternalService::CategoryModel => "category_model",
        }
    }
}

impl fmt::Display for ExternalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorCause {
    /// The call never produced a response (connect, timeout, DNS, body read).
    Network,
    /// The service answered with an error status.
    ServiceRejected,
    /// The service answered, but the payload is unusable.
    MalformedResult,
}

impl fmt::Display for ServiceErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = match self {
            ServiceErrorCause::Network => "network",
            ServiceErrorCause::ServiceRejected => "service-rejected",
            ServiceErrorCause::MalformedResult => "malformed-result",
        };
        f.write_str(cause)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} call failed ({cause}): {message}")]
pub struct ServiceError {
    pub service: ExternalService,
    pub cause: ServiceErrorCause,
    pub message: String,
}

impl ServiceError {
    pub fn network(service: ExternalService, message: impl Into<String>) -> Self {
        Self {
            service,
            cause: ServiceErrorCause::Network,
            message: message.into(),
        }
    }

    pub fn rejected(service: ExternalService, message: impl Into<String>) -> Self {
        Self {
            service,
            cause: ServiceErrorCause::ServiceRejected,
            message: message.into(),
        }
    }

    pub fn malformed(service: ExternalService, message: impl Into<String>) -> Self {
        Self {
            service,
            cause: ServiceErrorCause::MalformedResult,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid image location: {0}")]
    InvalidImageLocation(String),

    #[error("Image too large. Max size is {max_bytes} bytes")]
    ImageTooLarge { max_bytes: usize },

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
