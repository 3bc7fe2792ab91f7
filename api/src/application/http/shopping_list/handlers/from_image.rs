use axum::extract::{Multipart, State};
use basket_core::domain::shopping_list::ports::ShoppingListService;
use bytes::Bytes;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    shopping_list::handlers::from_text::ShoppingListResponse,
};

#[utoipa::path(
    post,
    path = "/image",
    tag = "shopping-list",
    summary = "Build a shopping list from a recipe photo",
    description = "Reads the text of the uploaded `image` field, then extracts, classifies and renders the ingredients",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ShoppingListResponse),
        (status = 400, description = "Missing or oversized image"),
        (status = 502, description = "OCR or a model call failed"),
    ),
)]
pub async fn shopping_list_from_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<ShoppingListResponse>, ApiError> {
    let max_image_bytes = state.args.fetch.max_image_bytes;
    let mut image_data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > max_image_bytes {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                max_image_bytes
            )));
        }

        image_data = Some(data);
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    if image_data.is_empty() {
        return Err(ApiError::BadRequest("Image is empty".to_string()));
    }

    let list = state
        .service
        .shopping_list_from_image(image_data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build shopping list from image: {}", e);
            ApiError::from(e)
        })?;

    Ok(Response::OK(ShoppingListResponse { data: list }))
}
