use aws_sdk_textract::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    error::{DisplayErrorContext, SdkError},
    operation::detect_document_text::DetectDocumentTextError,
    primitives::Blob,
    types::{Block, BlockType, Document},
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{
        OcrConfig,
        entities::app_errors::{CoreError, ExternalService, ServiceError},
    },
    shopping_list::{
        ports::TextDetector,
        value_objects::{BlockKind, OcrBlock},
    },
};

const BACKEND_NAME: &str = "aws-textract";

/// Document text detection backed by AWS Textract `DetectDocumentText`.
#[derive(Clone, Debug)]
pub struct TextractTextDetector {
    client: Client,
}

impl TextractTextDetector {
    /// Builds the client once. Static credentials are used when both keys are
    /// configured, otherwise the default AWS provider chain.
    pub async fn new(config: &OcrConfig) -> Result<Self, CoreError> {
        if config.region.trim().is_empty() {
            return Err(CoreError::Configuration(
                "ocr region must not be empty".to_string(),
            ));
        }

        let region = Region::new(config.region.clone());
        let endpoint = config
            .endpoint
            .as_deref()
            .map(|endpoint| endpoint.trim_end_matches('/').to_string());

        tracing::info!(
            region = %config.region,
            endpoint = ?endpoint,
            static_credentials = config.access_key.is_some(),
            "Initializing Textract client"
        );

        let client = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => {
                let credentials = Credentials::new(access_key, secret_key, None, None, "basket");
                let mut builder = aws_sdk_textract::Config::builder()
                    .behavior_version(BehaviorVersion::latest())
                    .region(region)
                    .credentials_provider(credentials);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint_url(endpoint);
                }
                Client::from_conf(builder.build())
            }
            (None, None) => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                let mut builder = aws_sdk_textract::config::Builder::from(&shared);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint_url(endpoint);
                }
                Client::from_conf(builder.build())
            }
            _ => {
                return Err(CoreError::Configuration(
                    "ocr access key and secret key must be set together".to_string(),
                ));
            }
        };

        Ok(Self { client })
    }
}

impl TextDetector for TextractTextDetector {
    fn backend_name(&self) -> String {
        BACKEND_NAME.to_string()
    }

    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    async fn detect_blocks(&self, image: Bytes) -> Result<Vec<OcrBlock>, CoreError> {
        let document = Document::builder()
            .bytes(Blob::new(image.to_vec()))
            .build();

        let output = self
            .client
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Textract request failed: {}", DisplayErrorContext(&e));
                textract_error(e)
            })?;

        let blocks: Vec<OcrBlock> = output.blocks().iter().map(ocr_block).collect();
        tracing::debug!(blocks = blocks.len(), "Textract returned blocks");

        Ok(blocks)
    }
}

fn textract_error(error: SdkError<DetectDocumentTextError>) -> CoreError {
    let message = DisplayErrorContext(&error).to_string();
    let error = match error {
        SdkError::ServiceError(_) => ServiceError::rejected(ExternalService::Ocr, message),
        SdkError::ResponseError(_) => ServiceError::malformed(ExternalService::Ocr, message),
        _ => ServiceError::network(ExternalService::Ocr, message),
    };
    error.into()
}

fn ocr_block(block: &Block) -> OcrBlock {
    let kind = match block.block_type() {
        Some(BlockType::Page) => BlockKind::Page,
        Some(BlockType::Line) => BlockKind::Line,
        Some(BlockType::Word) => BlockKind::Word,
        _ => BlockKind::Other,
    };

    OcrBlock {
        kind,
        text: block.text().map(str::to_string),
    }
}
