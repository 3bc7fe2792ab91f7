use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub ocr_backend: String,
    pub ingredient_model: String,
    pub category_model: String,
    pub uptime_seconds: u64,
}
