use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        shopping_list::{ports::CategoryScorer, value_objects::CategoryScores},
    },
    infrastructure::nlp::{
        model_store::load_model,
        tokenize::{normalize, tokenize},
    },
};

/// On-disk format of a bag-of-words classifier. `bias` and every entry of
/// `weights` hold one value per label, in label order.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub labels: Vec<String>,
    pub bias: Vec<f32>,
    pub weights: HashMap<String, Vec<f32>>,
}

/// Softmax classifier over normalized word counts.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    labels: Vec<String>,
    bias: Vec<f32>,
    weights: HashMap<String, Vec<f32>>,
}

impl LinearClassifier {
    pub async fn load(model_dir: &Path, name: &str) -> Result<Self, CoreError> {
        let model: LinearModel = load_model(model_dir, name).await?;
        Self::from_model(model)
    }

    pub fn from_model(model: LinearModel) -> Result<Self, CoreError> {
        let width = model.labels.len();
        if width == 0 {
            return Err(CoreError::ModelLoad(format!("{}: no labels", model.name)));
        }
        if model.bias.len() != width {
            return Err(CoreError::ModelLoad(format!(
                "{}: expected {} bias values, found {}",
                model.name,
                width,
                model.bias.len()
            )));
        }
        if let Some((word, row)) = model.weights.iter().find(|(_, row)| row.len() != width) {
            return Err(CoreError::ModelLoad(format!(
                "{}: weights for {:?} have {} values, expected {}",
                model.name,
                word,
                row.len(),
                width
            )));
        }

        // Keys are normalized the same way as the input words.
        let mut weights: HashMap<String, Vec<f32>> = HashMap::with_capacity(model.weights.len());
        for (word, row) in model.weights {
            let entry = weights
                .entry(normalize(&word))
                .or_insert_with(|| vec![0.0; width]);
            for (total, weight) in entry.iter_mut().zip(row) {
                *total += weight;
            }
        }

        tracing::debug!(
            model = %model.name,
            version = ?model.version,
            labels = width,
            vocabulary = weights.len(),
            "Linear classifier ready"
        );

        Ok(Self {
            name: model.name,
            labels: model.labels,
            bias: model.bias,
            weights,
        })
    }

    fn logits(&self, text: &str) -> Vec<f32> {
        let mut logits = self.bias.clone();
        for token in tokenize(text) {
            if let Some(row) = self.weights.get(&normalize(&token.text)) {
                for (logit, weight) in logits.iter_mut().zip(row) {
                    *logit += weight;
                }
            }
        }
        logits
    }

    fn probabilities(&self, text: &str) -> CategoryScores {
        let logits = self.logits(text);
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = logits.iter().map(|logit| (logit - max).exp()).collect();
        let sum: f32 = exps.iter().sum();

        self.labels
            .iter()
            .cloned()
            .zip(exps.into_iter().map(|e| e / sum))
            .collect()
    }
}

impl CategoryScorer for LinearClassifier {
    fn model_name(&self) -> String {
        self.name.clone()
    }

    #[instrument(skip(self, text), fields(model = %self.name))]
    async fn score(&self, text: String) -> Result<CategoryScores, CoreError> {
        Ok(self.probabilities(&text))
    }
}
