use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::shopping_list::value_objects::UncategorizedPolicy;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct BasketConfig {
    pub fetch: FetchConfig,
    pub ocr: OcrConfig,
    pub nlp: NlpConfig,
    pub formatting: FormattingConfig,
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_image_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub region: String,
    /// Overrides the regional Textract endpoint (local stacks, VPC endpoints).
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NlpBackend {
    /// Models are read from `model_dir` and evaluated in-process.
    Local,
    /// Models are served by a Hugging Face style inference endpoint.
    Remote,
}

#[derive(Clone, Debug)]
pub struct NlpConfig {
    pub backend: NlpBackend,
    pub model_dir: PathBuf,
    pub ingredient_model: String,
    pub category_model: String,
    pub inference_url: Option<String>,
    pub inference_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct FormattingConfig {
    pub uncategorized: UncategorizedPolicy,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
