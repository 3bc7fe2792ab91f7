mod common;

use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use basket_api::application::http::{
    server::api_entities::api_error::ApiErrorResponse,
    shopping_list::handlers::from_text::ShoppingListResponse,
};
use basket_core::domain::health::entities::ReadinessStatus;
use test_context::{AsyncTestContext, test_context};

use common::test_server;

struct ApiContext {
    server: TestServer,
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        Self {
            server: test_server(&[]).await,
        }
    }
}

struct SurfacingContext {
    server: TestServer,
}

impl AsyncTestContext for SurfacingContext {
    async fn setup() -> Self {
        Self {
            server: test_server(&["--uncategorized", "surface"]).await,
        }
    }
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_recipe_text_is_categorized(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/shopping-lists/text")
        .json(&serde_json::json!({ "text": "2 cups flour 1 lb chicken breast salt" }))
        .await;

    response.assert_status_ok();
    let list = response.json::<ShoppingListResponse>().data;

    assert_eq!(
        list.message,
        "PRODUCE\nFlour\n\nMEAT AND FISH\nChicken breast\n\nSPICES\nSalt\n\n"
    );
    assert_eq!(list.ingredient_count, 3);
    let names: Vec<&str> = list.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["PRODUCE", "MEAT AND FISH", "SPICES"]);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_repeated_ingredients_are_kept(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/shopping-lists/text")
        .json(&serde_json::json!({ "text": "butter, milk and more butter" }))
        .await;

    response.assert_status_ok();
    let list = response.json::<ShoppingListResponse>().data;
    assert_eq!(list.message, "DAIRY\nButter\nMilk\nButter\n\n");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_text_without_ingredients(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/shopping-lists/text")
        .json(&serde_json::json!({ "text": "preheat the oven" }))
        .await;

    response.assert_status_ok();
    let list = response.json::<ShoppingListResponse>().data;
    assert_eq!(list.ingredient_count, 0);
    assert_eq!(list.message, "");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_empty_text_is_rejected(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/shopping-lists/text")
        .json(&serde_json::json!({ "text": "" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<ApiErrorResponse>();
    assert_eq!(error.code, "E_BAD_REQUEST");
    assert_eq!(error.status, 400);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_image_field_is_required(ctx: &mut ApiContext) {
    let form = MultipartForm::new().add_part(
        "photo",
        Part::bytes(vec![0xff, 0xd8, 0xff]).file_name("recipe.jpg"),
    );

    let response = ctx
        .server
        .post("/shopping-lists/image")
        .multipart(form)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ApiErrorResponse>().message, "Missing image field");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_readiness_names_loaded_models(ctx: &mut ApiContext) {
    ctx.server.get("/health/live").await.assert_text("ok");

    let response = ctx.server.get("/health/ready").await;
    response.assert_status_ok();

    let status = response.json::<ReadinessStatus>();
    assert_eq!(status.status, "ready");
    assert_eq!(status.ocr_backend, "aws-textract");
    assert_eq!(status.ingredient_model, "ingredient_ner");
    assert_eq!(status.category_model, "ingredient_category");
}

#[test_context(SurfacingContext)]
#[tokio::test]
async fn test_surface_policy_matches_drop_for_known_labels(ctx: &mut SurfacingContext) {
    let response = ctx
        .server
        .post("/shopping-lists/text")
        .json(&serde_json::json!({ "text": "garlic and salmon" }))
        .await;

    response.assert_status_ok();
    let list = response.json::<ShoppingListResponse>().data;
    assert_eq!(list.message, "PRODUCE\nGarlic\n\nMEAT AND FISH\nSalmon\n\n");
    assert!(list.uncategorized.is_empty());
}
