use std::sync::Arc;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use basket_core::{application::create_service, domain::common::BasketConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::{HttpMakeClassifier, TraceLayer};
use tracing::{Span, debug, info_span};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::http::health::health_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::application::http::shopping_list::router::shopping_list_routes;
use crate::application::http::sms::router::sms_routes;
use crate::application::signature_middleware::WebhookVerifier;
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let webhook_verifier = WebhookVerifier::from_args(&args.messaging)?;
    if webhook_verifier.is_none() {
        tracing::warn!("No twilio auth token configured, webhook signatures are not checked");
    }

    let basket_config = BasketConfig::from(args.as_ref().clone());
    let service = create_service(basket_config).await?;

    Ok(AppState::new(args, service, webhook_verifier))
}

type RequestTraceLayer = TraceLayer<HttpMakeClassifier, fn(&axum::extract::Request) -> Span>;

fn request_span(request: &axum::extract::Request) -> Span {
    let uri: String = request.uri().to_string();
    info_span!("http_request", method = ?request.method(), uri)
}

fn trace_layer() -> RequestTraceLayer {
    TraceLayer::new_for_http().make_span_with(request_span as fn(&axum::extract::Request) -> Span)
}

fn cors_layer(state: &AppState) -> Result<CorsLayer, anyhow::Error> {
    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    debug!("Allowed origins: {:?}", allowed_origins);

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true))
}

fn app_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(sms_routes(state.clone()))
        .merge(shopping_list_routes(state.clone()))
        .merge(health_routes(&state.args.server.root_path))
}

/// Application routes only, without metrics or API docs.
pub fn api_router(state: AppState) -> Result<Router, anyhow::Error> {
    let cors = cors_layer(&state)?;

    Ok(app_routes(&state)
        .layer(trace_layer())
        .layer(cors)
        .with_state(state))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let cors = cors_layer(&state)?;
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(app_routes(&state))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(trace_layer())
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}
