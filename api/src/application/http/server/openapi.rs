use crate::application::http::{
    health::HealthApiDoc, shopping_list::router::ShoppingListApiDoc, sms::router::SmsApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Basket API",
        description = "Turns photographed recipes into categorized shopping lists"
    ),
    nest(
        (path = "/sms", api = SmsApiDoc),
        (path = "/shopping-lists", api = ShoppingListApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
