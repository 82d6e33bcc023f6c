//! # Instagram Reply Relay
//!
//! Receives Instagram direct message webhooks from Meta, verifies them and
//! answers every incoming message with a templated reply through the Graph API.

pub mod api;
pub mod config;
pub mod consts;
pub mod logger;
pub mod metric;
pub mod server;
pub mod services;
pub mod webhook;

use envconfig::Envconfig;
use logfire::config::MetricsOptions;
use ntex::web;
use std::sync::Arc;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    let app_config = config::AppConfig::init_from_env()
        .map_err(|e| anyhow::anyhow!("failed to load configuration from environment: {e}"))?;
    app_config.validate()?;

    // Initialize logging and metrics
    let mut logfire_config = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()))
        .send_to_logfire(logfire::config::SendToLogfire::IfTokenPresent);
    if let Some(token) = &app_config.logfire_token {
        logfire_config = logfire_config.with_token(token);
    }
    let shutdown_handler = logfire_config.finish()?;

    if app_config.app_secret().is_none() {
        logfire::warn!("APP_SECRET is not set: webhook signatures will not be verified");
    }

    let graph_service: services::ImplGraphService =
        Arc::new(services::graph::GraphHandler::new(&app_config));

    configure_and_run_server(Arc::new(app_config), graph_service).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Creates application state from the provided services
fn create_app_state(
    config: Arc<config::AppConfig>,
    graph: services::ImplGraphService,
) -> server::AppState {
    server::AppState { config, graph }
}

/// Configures and starts the web server
async fn configure_and_run_server(
    app_config: Arc<config::AppConfig>,
    graph_service: services::ImplGraphService,
) -> anyhow::Result<()> {
    let server_addr = (app_config.host.clone(), app_config.port);

    logfire::info!(
        "Starting relay on {host}:{port}",
        host = app_config.host.clone(),
        port = app_config.port as i64
    );

    web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(app_config.clone(), graph_service.clone()))
            .configure(webhook::routes::instagram)
            .configure(server::routes::instagram_api)
            .configure(server::routes::health)
            .default_service(web::route().to(server::handlers::serve_not_found))
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
