use std::{collections::HashSet, path::Path};

use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        shopping_list::{ports::IngredientTagger, value_objects::TaggedSpan},
    },
    infrastructure::nlp::{
        model_store::load_model,
        tokenize::{Token, normalize, tokenize},
    },
};

/// On-disk format of a lexicon span model.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconModel {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub label: String,
    pub patterns: Vec<String>,
}

/// Span tagger matching known ingredient phrases, longest match first.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    name: String,
    label: String,
    phrases: HashSet<Vec<String>>,
    longest_phrase: usize,
}

impl LexiconTagger {
    pub async fn load(model_dir: &Path, name: &str) -> Result<Self, CoreError> {
        let model: LexiconModel = load_model(model_dir, name).await?;
        Self::from_model(model)
    }

    pub fn from_model(model: LexiconModel) -> Result<Self, CoreError> {
        if model.label.trim().is_empty() {
            return Err(CoreError::ModelLoad(format!(
                "{}: label must not be empty",
                model.name
            )));
        }

        let phrases: HashSet<Vec<String>> = model
            .patterns
            .iter()
            .map(|pattern| {
                tokenize(pattern)
                    .iter()
                    .map(|token| normalize(&token.text))
                    .collect::<Vec<String>>()
            })
            .filter(|phrase| !phrase.is_empty())
            .collect();

        if phrases.is_empty() {
            return Err(CoreError::ModelLoad(format!(
                "{}: no usable patterns",
                model.name
            )));
        }

        let longest_phrase = phrases.iter().map(Vec::len).max().unwrap_or(1);

        tracing::debug!(
            model = %model.name,
            version = ?model.version,
            phrases = phrases.len(),
            "Lexicon tagger ready"
        );

        Ok(Self {
            name: model.name,
            label: model.label,
            phrases,
            longest_phrase,
        })
    }

    fn spans(&self, tokens: &[Token]) -> Vec<TaggedSpan> {
        let normalized: Vec<String> = tokens.iter().map(|token| normalize(&token.text)).collect();
        let mut spans = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            let longest = self.longest_phrase.min(tokens.len() - index);
            let matched = (1..=longest)
                .rev()
                .find(|length| self.phrases.contains(&normalized[index..index + length]));

            match matched {
                Some(length) => {
                    spans.push(TaggedSpan::new(
                        tokens[index].start,
                        tokens[index + length - 1].end,
                        self.label.clone(),
                    ));
                    index += length;
                }
                None => index += 1,
            }
        }

        spans
    }
}

impl IngredientTagger for LexiconTagger {
    fn model_name(&self) -> String {
        self.name.clone()
    }

    #[instrument(skip(self, text), fields(model = %self.name))]
    async fn tag(&self, text: String) -> Result<Vec<TaggedSpan>, CoreError> {
        let spans = self.spans(&tokenize(&text));
        tracing::debug!(spans = spans.len(), "Ingredients tagged");
        Ok(spans)
    }
}
