use reqwest::{Client, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::{CoreError, ExternalService, ServiceError},
    shopping_list::{
        ports::{CategoryScorer, IngredientTagger},
        value_objects::{CategoryScores, TaggedSpan},
    },
};

/// Client for a Hugging Face style inference server, where each model is
/// served at `{base_url}/{model}`.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a, P: Serialize> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<P>,
}

#[derive(Debug, Serialize)]
struct TokenClassificationParameters {
    aggregation_strategy: &'static str,
}

#[derive(Debug, Deserialize)]
struct EntityResponse {
    entity_group: String,
    start: usize,
    end: usize,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Text classification answers come back nested per input or flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Batched(Vec<Vec<LabelScore>>),
    Single(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_scores(self) -> CategoryScores {
        let scores = match self {
            ClassificationResponse::Batched(batches) => {
                batches.into_iter().next().unwrap_or_default()
            }
            ClassificationResponse::Single(scores) => scores,
        };

        scores
            .into_iter()
            .map(|label_score| (label_score.label, label_score.score))
            .collect()
    }
}

impl InferenceClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, CoreError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| CoreError::Configuration(format!("inference url: {}", e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Configuration(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    async fn infer<P: Serialize, T: DeserializeOwned>(
        &self,
        service: ExternalService,
        model: &str,
        request: InferenceRequest<'_, P>,
    ) -> Result<T, ServiceError> {
        let mut builder = self.client.post(self.model_url(model)).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Inference request to {} failed: {}", model, e);
            ServiceError::network(service, e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Inference error from {}: {} - {}", model, status, error_text);
            return Err(ServiceError::rejected(
                service,
                format!("{} - {}", status, error_text),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Inference response from {} interrupted: {}", model, e);
            ServiceError::network(service, e.to_string())
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Failed to parse inference response from {}: {}", model, e);
            ServiceError::malformed(service, e.to_string())
        })
    }
}

/// Ingredient tagger served by a token classification endpoint.
#[derive(Debug, Clone)]
pub struct RemoteIngredientTagger {
    client: InferenceClient,
    model: String,
}

impl RemoteIngredientTagger {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

impl IngredientTagger for RemoteIngredientTagger {
    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn tag(&self, text: String) -> Result<Vec<TaggedSpan>, CoreError> {
        let request = InferenceRequest {
            inputs: &text,
            parameters: Some(TokenClassificationParameters {
                aggregation_strategy: "simple",
            }),
        };

        let entities: Vec<EntityResponse> = self
            .client
            .infer(ExternalService::IngredientModel, &self.model, request)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| TaggedSpan::new(entity.start, entity.end, entity.entity_group))
            .collect())
    }
}

/// Category scorer served by a text classification endpoint.
#[derive(Debug, Clone)]
pub struct RemoteCategoryScorer {
    client: InferenceClient,
    model: String,
}

impl RemoteCategoryScorer {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

impl CategoryScorer for RemoteCategoryScorer {
    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn score(&self, text: String) -> Result<CategoryScores, CoreError> {
        let request: InferenceRequest<'_, ()> = InferenceRequest {
            inputs: &text,
            parameters: None,
        };

        let response: ClassificationResponse = self
            .client
            .infer(ExternalService::CategoryModel, &self.model, request)
            .await?;

        Ok(response.into_scores())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::common::entities::app_errors::ServiceErrorCause;

    #[test]
    fn test_classification_response_shapes() {
        let batched: ClassificationResponse = serde_json::from_str(
            r#"[[{"label":"MEAT_FISH","score":0.91},{"label":"OTHER","score":0.05}]]"#,
        )
        .unwrap();
        assert_eq!(batched.into_scores().top_label(), Some("MEAT_FISH"));

        let single: ClassificationResponse =
            serde_json::from_str(r#"[{"label":"DAIRY","score":0.7},{"label":"OTHER","score":0.3}]"#)
                .unwrap();
        assert_eq!(single.into_scores().top_label(), Some("DAIRY"));
    }

    #[test]
    fn test_entity_response() {
        let entities: Vec<EntityResponse> = serde_json::from_str(
            r#"[{"entity_group":"INGREDIENT","score":0.99,"word":"chicken breast","start":18,"end":32}]"#,
        )
        .unwrap();
        assert_eq!(entities[0].entity_group, "INGREDIENT");
        assert_eq!((entities[0].start, entities[0].end), (18, 32));
    }

    #[test]
    fn test_model_url() {
        let client =
            InferenceClient::new("https://inference.example.com/models/", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.model_url("ingredient_ner"),
            "https://inference.example.com/models/ingredient_ner"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            InferenceClient::new("not a url", None, Duration::from_secs(1)),
            Err(CoreError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_error() {
        let client = InferenceClient::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();
        let scorer = RemoteCategoryScorer::new(client, "ingredient_category".to_string());

        match scorer.score("salt".to_string()).await {
            Err(CoreError::Service(error)) => {
                assert_eq!(error.service, ExternalService::CategoryModel);
                assert_eq!(error.cause, ServiceErrorCause::Network);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
