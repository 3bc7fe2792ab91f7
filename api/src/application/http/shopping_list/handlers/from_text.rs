use axum::extract::State;
use basket_core::domain::shopping_list::{entities::ShoppingList, ports::ShoppingListService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    shopping_list::validators::ShoppingListTextRequest,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListResponse {
    pub data: ShoppingList,
}

#[utoipa::path(
    post,
    path = "/text",
    tag = "shopping-list",
    summary = "Build a shopping list from recipe text",
    description = "Extracts ingredients from the text, classifies each one and renders the categorized list",
    responses(
        (status = 200, body = ShoppingListResponse),
        (status = 400, description = "Invalid request body"),
        (status = 502, description = "A model call failed"),
    ),
    request_body = ShoppingListTextRequest
)]
pub async fn shopping_list_from_text(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ShoppingListTextRequest>,
) -> Result<Response<ShoppingListResponse>, ApiError> {
    let list = state
        .service
        .shopping_list_from_text(payload.text)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build shopping list from text: {}", e);
            ApiError::from(e)
        })?;

    Ok(Response::OK(ShoppingListResponse { data: list }))
}
