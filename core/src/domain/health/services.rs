use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::{entities::ReadinessStatus, ports::HealthCheckService},
    shopping_list::ports::{CategoryScorer, ImageFetcher, IngredientTagger, TextDetector},
};

impl<F, O, T, C> HealthCheckService for Service<F, O, T, C>
where
    F: ImageFetcher,
    O: TextDetector,
    T: IngredientTagger,
    C: CategoryScorer,
{
    async fn readiness(&self) -> Result<ReadinessStatus, CoreError> {
        Ok(ReadinessStatus {
            status: "ready".to_string(),
            ocr_backend: self.text_detector.backend_name(),
            ingredient_model: self.ingredient_tagger.model_name(),
            category_model: self.category_scorer.model_name(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
        })
    }
}
