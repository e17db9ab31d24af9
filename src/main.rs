// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pullsecret_injector::config::Config;
use pullsecret_injector::constants::WEBHOOK_ID;
use pullsecret_injector::kubernetes::create_client;
use pullsecret_injector::metrics::init_metrics;
use pullsecret_injector::webhook::server::{serve_metrics, serve_webhook};
use pullsecret_injector::webhook::{metrics_router, webhook_router, WebhookState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting {} webhook", WEBHOOK_ID);

    // Load configuration
    let config = Config::load();
    info!(
        "Configuration loaded: image_pull_secret_name={}, operator_namespace={}",
        config.image_pull_secret_name, config.operator_namespace
    );

    // Create Kubernetes client
    let client = create_client().await?;
    info!("Connected to Kubernetes cluster");

    let metrics_handle = init_metrics()?;

    let state = Arc::new(WebhookState::new(client, &config));
    state.warm_up().await;

    tokio::try_join!(
        serve_webhook(
            config.listen_addr,
            &config.tls_cert_file,
            &config.tls_key_file,
            webhook_router(state),
        ),
        serve_metrics(config.metrics_addr, metrics_router(metrics_handle)),
    )?;

    // Both servers run until the process is stopped
    warn!("Webhook servers stopped unexpectedly");
    Ok(())
}
