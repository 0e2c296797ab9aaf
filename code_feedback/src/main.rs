mod prompt;
mod routes;
mod service;
#[cfg(test)]
mod test_support;

use crate::service::AnalysisService;
use anyhow::Context;
use axum::Router;
use env_logger::Env;
use log::{error, info};
use serde::Deserialize;
use std::fmt;
use std::process::exit;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_redoc::Redoc;
use utoipa_redoc::Servable;

fn get_default_port() -> u16 {
    8080
}

fn get_default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn get_default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn get_default_upstream_timeout() -> u64 {
    60000
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "get_default_port")]
    port: u16,
    groq_api_key: String,
    #[serde(default = "get_default_base_url")]
    base_url: String,
    #[serde(default = "get_default_model")]
    model: String,
    /// Milliseconds
    #[serde(default = "get_default_upstream_timeout")]
    upstream_timeout: u64,
}

impl Config {
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("groq_api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

#[derive(OpenApi)]
#[openapi(info(description = "API for explaining errors in student code using llms"))]
struct ApiDoc;

fn router(service: Arc<AnalysisService>) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(routes::analyze))
        .split_for_parts();

    router
        .merge(Redoc::with_url("/redoc", api))
        .with_state(service)
}

async fn run() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = Config::from_vars(std::env::vars()).context("invalid configuration")?;
    let service = Arc::new(AnalysisService::new(&config)?);

    info!("Using model {} at {}", config.model, config.base_url);
    info!("Starting on port {}", config.port);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(listener, router(service)).await?;

    Ok(())
}

fn main() {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            exit(1)
        }
    };

    if let Err(err) = rt.block_on(run()) {
        error!("{:#}", err);
        exit(1)
    }
}
