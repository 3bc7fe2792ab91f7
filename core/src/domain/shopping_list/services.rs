use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{
        entities::app_errors::{CoreError, ExternalService, ServiceError},
        services::Service,
    },
    messaging::{
        entities::{InboundEvent, MessagingResponse},
        value_objects::ImageLocation,
    },
    shopping_list::{
        entities::{CategoryGrouping, CategoryLabel, RawText, ShoppingList},
        helpers::{capitalize_first, join_line_blocks, slice_ingredient_spans},
        ports::{CategoryScorer, ImageFetcher, IngredientTagger, ShoppingListService, TextDetector},
    },
};

impl<F, O, T, C> ShoppingListService for Service<F, O, T, C>
where
    F: ImageFetcher,
    O: TextDetector,
    T: IngredientTagger,
    C: CategoryScorer,
{
    async fn reply_to_event(&self, event: InboundEvent) -> MessagingResponse {
        // 1. Validate
        let Some(encoded_location) = event.image_location() else {
            tracing::info!(
                num_media = event.get("NumMedia").unwrap_or("0"),
                "Inbound message carries no image"
            );
            return MessagingResponse::no_image();
        };

        // 2..6. Fetch, read, extract, classify, format
        match self.shopping_list_from_location(encoded_location).await {
            Ok(list) if list.is_empty() => {
                tracing::info!(shopping_list_id = %list.id, "No ingredients found in image");
                MessagingResponse::no_ingredients()
            }
            Ok(list) => {
                tracing::info!(
                    shopping_list_id = %list.id,
                    ingredient_count = list.ingredient_count,
                    categories = list.categories.len(),
                    "Shopping list sent"
                );
                MessagingResponse::message(list.message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build shopping list");
                MessagingResponse::failure()
            }
        }
    }

    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    async fn shopping_list_from_image(&self, image: Bytes) -> Result<ShoppingList, CoreError> {
        let blocks = self.text_detector.detect_blocks(image).await?;
        let raw_text = join_line_blocks(&blocks);

        tracing::debug!(
            blocks = blocks.len(),
            characters = raw_text.as_str().chars().count(),
            "Text extracted from image"
        );

        self.categorize(raw_text).await
    }

    async fn shopping_list_from_text(&self, text: String) -> Result<ShoppingList, CoreError> {
        self.categorize(RawText::new(text)).await
    }
}

impl<F, O, T, C> Service<F, O, T, C>
where
    F: ImageFetcher,
    O: TextDetector,
    T: IngredientTagger,
    C: CategoryScorer,
{
    async fn shopping_list_from_location(
        &self,
        encoded_location: &str,
    ) -> Result<ShoppingList, CoreError> {
        let location = ImageLocation::decode(encoded_location)?;
        let image = self.image_fetcher.fetch(location).await?;
        self.shopping_list_from_image(image).await
    }

    async fn categorize(&self, raw_text: RawText) -> Result<ShoppingList, CoreError> {
        let spans = self
            .ingredient_tagger
            .tag(raw_text.as_str().to_string())
            .await?;
        let ingredients = slice_ingredient_spans(&raw_text, &spans)?;

        let mut grouping = CategoryGrouping::new();
        for ingredient in ingredients {
            let scores = self.category_scorer.score(ingredient.clone()).await?;
            let label = scores.top_label().ok_or_else(|| {
                ServiceError::malformed(
                    ExternalService::CategoryModel,
                    format!("no usable scores for {:?}", ingredient),
                )
            })?;

            grouping.insert(
                CategoryLabel::from_model_label(label),
                capitalize_first(&ingredient),
            );
        }

        Ok(ShoppingList::new(
            raw_text,
            &grouping,
            self.options.uncategorized,
        ))
    }
}
