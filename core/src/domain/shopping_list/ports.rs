use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    messaging::{
        entities::{InboundEvent, MessagingResponse},
        value_objects::ImageLocation,
    },
    shopping_list::{
        entities::ShoppingList,
        value_objects::{CategoryScores, OcrBlock, TaggedSpan},
    },
};

/// Retrieves the bytes of an inbound image
#[cfg_attr(test, mockall::automock)]
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, location: ImageLocation)
    -> impl Future<Output = Result<Bytes, CoreError>> + Send;
}

/// Document text detection (OCR)
#[cfg_attr(test, mockall::automock)]
pub trait TextDetector: Send + Sync {
    fn backend_name(&self) -> String;

    fn detect_blocks(
        &self,
        image: Bytes,
    ) -> impl Future<Output = Result<Vec<OcrBlock>, CoreError>> + Send;
}

/// Pretrained span tagging model finding ingredient mentions
#[cfg_attr(test, mockall::automock)]
pub trait IngredientTagger: Send + Sync {
    fn model_name(&self) -> String;

    fn tag(&self, text: String) -> impl Future<Output = Result<Vec<TaggedSpan>, CoreError>> + Send;
}

/// Pretrained classification model scoring an ingredient per category
#[cfg_attr(test, mockall::automock)]
pub trait CategoryScorer: Send + Sync {
    fn model_name(&self) -> String;

    fn score(&self, text: String) -> impl Future<Output = Result<CategoryScores, CoreError>> + Send;
}

/// Service trait for turning recipes into shopping lists
#[cfg_attr(test, mockall::automock)]
pub trait ShoppingListService: Send + Sync {
    /// Answers an inbound message. Never fails: every error becomes an
    /// apology in the reply envelope.
    fn reply_to_event(&self, event: InboundEvent) -> impl Future<Output = MessagingResponse> + Send;

    fn shopping_list_from_image(
        &self,
        image: Bytes,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn shopping_list_from_text(
        &self,
        text: String,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;
}
