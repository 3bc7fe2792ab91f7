use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    from_image::{__path_shopping_list_from_image, shopping_list_from_image},
    from_text::{__path_shopping_list_from_text, shopping_list_from_text},
};
use crate::application::http::server::app_state::AppState;

/// Room for multipart boundaries and headers around the image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(shopping_list_from_text, shopping_list_from_image))]
pub struct ShoppingListApiDoc;

pub fn shopping_list_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/shopping-lists/text", state.args.server.root_path),
            post(shopping_list_from_text),
        )
        .route(
            &format!("{}/shopping-lists/image", state.args.server.root_path),
            post(shopping_list_from_image).layer(DefaultBodyLimit::max(
                state.args.fetch.max_image_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
}
