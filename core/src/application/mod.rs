use crate::{
    domain::{
        common::{BasketConfig, NlpBackend, NlpConfig, entities::app_errors::CoreError, services::Service},
        shopping_list::value_objects::ShoppingListOptions,
    },
    infrastructure::{
        image_fetch::HttpImageFetcher,
        nlp::{
            CategoryScorerBackend, InferenceClient, IngredientTaggerBackend, LexiconTagger,
            LinearClassifier, RemoteCategoryScorer, RemoteIngredientTagger,
        },
        ocr::TextractTextDetector,
    },
};

pub type BasketService = Service<
    HttpImageFetcher,
    TextractTextDetector,
    IngredientTaggerBackend,
    CategoryScorerBackend,
>;

/// Builds every adapter and loads both models. Called once per process;
/// clones of the returned service share the loaded models.
pub async fn create_service(config: BasketConfig) -> Result<BasketService, CoreError> {
    let image_fetcher = HttpImageFetcher::new(&config.fetch)?;
    let text_detector = TextractTextDetector::new(&config.ocr).await?;
    let (ingredient_tagger, category_scorer) = create_models(&config.nlp).await?;

    tracing::info!(
        nlp_backend = ?config.nlp.backend,
        ingredient_model = %config.nlp.ingredient_model,
        category_model = %config.nlp.category_model,
        uncategorized = ?config.formatting.uncategorized,
        "Shopping list service ready"
    );

    Ok(Service::new(
        image_fetcher,
        text_detector,
        ingredient_tagger,
        category_scorer,
        ShoppingListOptions {
            uncategorized: config.formatting.uncategorized,
        },
    ))
}

async fn create_models(
    config: &NlpConfig,
) -> Result<(IngredientTaggerBackend, CategoryScorerBackend), CoreError> {
    match config.backend {
        NlpBackend::Local => {
            let tagger = LexiconTagger::load(&config.model_dir, &config.ingredient_model).await?;
            let scorer = LinearClassifier::load(&config.model_dir, &config.category_model).await?;

            Ok((
                IngredientTaggerBackend::Local(tagger),
                CategoryScorerBackend::Local(scorer),
            ))
        }
        NlpBackend::Remote => {
            let url = config.inference_url.as_deref().ok_or_else(|| {
                CoreError::Configuration(
                    "an inference url is required for the remote nlp backend".to_string(),
                )
            })?;
            let client = InferenceClient::new(url, config.inference_token.clone(), config.timeout)?;

            Ok((
                IngredientTaggerBackend::Remote(RemoteIngredientTagger::new(
                    client.clone(),
                    config.ingredient_model.clone(),
                )),
                CategoryScorerBackend::Remote(RemoteCategoryScorer::new(
                    client,
                    config.category_model.clone(),
                )),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use super::*;
    use crate::domain::{
        common::{FetchConfig, FormattingConfig, OcrConfig},
        health::ports::HealthCheckService,
        shopping_list::ports::ShoppingListService,
    };

    fn config(backend: NlpBackend) -> BasketConfig {
        BasketConfig {
            fetch: FetchConfig::default(),
            ocr: OcrConfig {
                region: "us-east-1".to_string(),
                endpoint: None,
                access_key: Some("AKIDEXAMPLE".to_string()),
                secret_key: Some("secret".to_string()),
            },
            nlp: NlpConfig {
                backend,
                model_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../models")),
                ingredient_model: "ingredient_ner".to_string(),
                category_model: "ingredient_category".to_string(),
                inference_url: None,
                inference_token: None,
                timeout: Duration::from_secs(5),
            },
            formatting: FormattingConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_local_service_builds_recipe_list() {
        let service = create_service(config(NlpBackend::Local)).await.unwrap();

        let list = service
            .shopping_list_from_text("2 cups flour 1 lb chicken breast salt".to_string())
            .await
            .unwrap();
        assert_eq!(
            list.message,
            "PRODUCE\nFlour\n\nMEAT AND FISH\nChicken breast\n\nSPICES\nSalt\n\n"
        );

        let readiness = service.readiness().await.unwrap();
        assert_eq!(readiness.ingredient_model, "ingredient_ner");
        assert_eq!(readiness.ocr_backend, "aws-textract");
    }

    #[tokio::test]
    async fn test_remote_backend_requires_url() {
        let result = create_service(config(NlpBackend::Remote)).await;
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_missing_model_fails_at_startup() {
        let mut config = config(NlpBackend::Local);
        config.nlp.category_model = "missing_model".to_string();

        let result = create_service(config).await;
        assert!(matches!(result, Err(CoreError::ModelLoad(_))));
    }
}
