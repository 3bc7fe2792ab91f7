use std::{sync::Arc, time::Instant};

use crate::domain::shopping_list::{
    ports::{CategoryScorer, ImageFetcher, IngredientTagger, TextDetector},
    value_objects::ShoppingListOptions,
};

/// Application service holding the pipeline adapters.
///
/// Adapters are shared behind `Arc`, so cloning the service per request is
/// cheap and every clone reuses the models loaded at startup.
pub struct Service<F, O, T, C>
where
    F: ImageFetcher,
    O: TextDetector,
    T: IngredientTagger,
    C: CategoryScorer,
{
    pub(crate) image_fetcher: Arc<F>,
    pub(crate) text_detector: Arc<O>,
    pub(crate) ingredient_tagger: Arc<T>,
    pub(crate) category_scorer: Arc<C>,
    pub(crate) options: ShoppingListOptions,
    pub(crate) started_at: Instant,
}

impl<F, O, T, C> Service<F, O, T, C>
where
    F: ImageFetcher,
    O: TextDetector,
    T: IngredientTagger,
    C: CategoryScorer,
{
    pub fn new(
        image_fetcher: F,
        text_detector: O,
        ingredient_tagger: T,
        category_scorer: C,
        options: ShoppingListOptions,
    ) -> Self {
        Self {
            image_fetcher: Arc::new(image_fetcher),
            text_detector: Arc::new(text_detector),
            ingredient_tagger: Arc::new(ingredient_tagger),
            category_scorer: Arc::new(category_scorer),
            options,
            started_at: Instant::now(),
        }
    }
}

impl<F, O, T, C> Clone for Service<F, O, T, C>
where
    F: ImageFetcher,
    O: TextDetector,
    T: IngredientTagger,
    C: CategoryScorer,
{
    fn clone(&self) -> Self {
        Self {
            image_fetcher: Arc::clone(&self.image_fetcher),
            text_detector: Arc::clone(&self.text_detector),
            ingredient_tagger: Arc::clone(&self.ingredient_tagger),
            category_scorer: Arc::clone(&self.category_scorer),
            options: self.options.clone(),
            started_at: self.started_at,
        }
    }
}
