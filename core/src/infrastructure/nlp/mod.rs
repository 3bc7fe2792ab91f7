use crate::domain::{
    common::entities::app_errors::CoreError,
    shopping_list::{
        ports::{CategoryScorer, IngredientTagger},
        value_objects::{CategoryScores, TaggedSpan},
    },
};

pub mod inference_client;
pub mod lexicon_tagger;
pub mod linear_classifier;
pub mod model_store;
pub mod tokenize;

pub use inference_client::{InferenceClient, RemoteCategoryScorer, RemoteIngredientTagger};
pub use lexicon_tagger::LexiconTagger;
pub use linear_classifier::LinearClassifier;

/// Ingredient tagger selected at startup.
#[derive(Debug, Clone)]
pub enum IngredientTaggerBackend {
    Local(LexiconTagger),
    Remote(RemoteIngredientTagger),
}

impl IngredientTagger for IngredientTaggerBackend {
    fn model_name(&self) -> String {
        match self {
            IngredientTaggerBackend::Local(tagger) => tagger.model_name(),
            IngredientTaggerBackend::Remote(tagger) => tagger.model_name(),
        }
    }

    async fn tag(&self, text: String) -> Result<Vec<TaggedSpan>, CoreError> {
        match self {
            IngredientTaggerBackend::Local(tagger) => tagger.tag(text).await,
            IngredientTaggerBackend::Remote(tagger) => tagger.tag(text).await,
        }
    }
}

/// Category scorer selected at startup.
#[derive(Debug, Clone)]
pub enum CategoryScorerBackend {
    Local(LinearClassifier),
    Remote(RemoteCategoryScorer),
}

impl CategoryScorer for CategoryScorerBackend {
    fn model_name(&self) -> String {
        match self {
            CategoryScorerBackend::Local(scorer) => scorer.model_name(),
            CategoryScorerBackend::Remote(scorer) => scorer.model_name(),
        }
    }

    async fn score(&self, text: String) -> Result<CategoryScores, CoreError> {
        match self {
            CategoryScorerBackend::Local(scorer) => scorer.score(text).await,
            CategoryScorerBackend::Remote(scorer) => scorer.score(text).await,
        }
    }
}
