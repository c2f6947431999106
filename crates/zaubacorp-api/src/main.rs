//! HTTP API for the zaubacorp.com scraper
//!
//! Thin plumbing over `zaubacorp-core`: routing, env configuration and
//! lifecycle. All extraction behavior lives in the core crate.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use zaubacorp_core::{DEFAULT_WEBDRIVER_URL, FetchBackend, FetchConfig, ZaubacorpScraper};

mod rest;

/// Shared application state
///
/// One scraper behind a mutex: requests are serialized onto a single
/// fetcher, so its inter-request delay acts as a process-wide rate cap
/// toward the target site.
pub struct AppState {
    pub scraper: Mutex<ZaubacorpScraper>,
}

fn config_from_env() -> Result<(FetchConfig, FetchBackend)> {
    let mut config = FetchConfig::default();

    if let Ok(delay) = std::env::var("ZAUBA_DELAY_SECS") {
        config.delay_secs = delay
            .parse()
            .context("ZAUBA_DELAY_SECS must be a number of seconds")?;
    }
    if let Ok(headless) = std::env::var("ZAUBA_HEADLESS") {
        config.headless = headless != "false" && headless != "0";
    }

    let backend = match std::env::var("ZAUBA_BACKEND").as_deref() {
        Ok("browser") => FetchBackend::Browser {
            webdriver_url: std::env::var("ZAUBA_WEBDRIVER_URL")
                .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string()),
        },
        _ => FetchBackend::Http,
    };

    Ok((config, backend))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("zaubacorp=info".parse()?))
        .init();

    let (config, backend) = config_from_env()?;
    info!(?backend, delay_secs = config.delay_secs, "starting scraper");

    let scraper = ZaubacorpScraper::with_config(config, backend)
        .await
        .context("failed to initialize scraper backend")?;
    let state = Arc::new(AppState {
        scraper: Mutex::new(scraper),
    });

    let app = Router::new()
        .route("/health", get(rest::health))
        .route("/search", get(rest::search))
        // wildcard capture: company identifiers are path fragments and
        // may contain slashes (e.g. "company/<name>/<cin>")
        .route("/company/{*company_id}", get(rest::company))
        .with_state(state.clone())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        );

    let host = std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("API_PORT").unwrap_or_else(|_| "8000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("listening on {host}:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the fetch backend on every exit path; the browser session
    // is an external process and is not reclaimed automatically
    if let Err(e) = state.scraper.lock().await.close().await {
        warn!(error = %e, "failed to close scraper backend");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
