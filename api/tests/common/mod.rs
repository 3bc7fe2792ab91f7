use std::sync::Arc;

use axum_test::TestServer;
use basket_api::{
    application::http::server::http_server::{api_router, state},
    args::Args,
};
use clap::Parser;

const MODEL_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../models");

/// Builds a server with the bundled models and offline OCR credentials.
pub async fn test_server(extra_args: &[&str]) -> TestServer {
    let mut argv = vec![
        "basket",
        "--model-dir",
        MODEL_DIR,
        "--aws-region",
        "us-east-1",
        "--aws-access-key-id",
        "AKIDEXAMPLE",
        "--aws-secret-access-key",
        "secret",
        "--fetch-timeout-secs",
        "2",
    ];
    argv.extend_from_slice(extra_args);

    let args = Arc::new(Args::try_parse_from(argv).expect("valid test arguments"));
    let app_state = state(args).await.expect("service builds");
    let app = api_router(app_state).expect("router builds");

    TestServer::new(app).expect("test server starts")
}
