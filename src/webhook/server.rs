// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Listeners for the webhook (TLS) and the metrics endpoint (plain HTTP)

use crate::error::{InjectorError, Result};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

/// Serve the webhook router over TLS with the given PEM certificate and key
pub async fn serve_webhook(
    addr: SocketAddr,
    cert_file: &Path,
    key_file: &Path,
    router: Router,
) -> Result<()> {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let tls_config = RustlsConfig::from_pem_file(cert_file, key_file)
        .await
        .map_err(|e| InjectorError::ServerError(format!("TLS config error: {}", e)))?;

    info!(addr = %addr, "Listening for admission requests");

    axum_server::bind_rustls(addr, tls_config)
        .serve(router.into_make_service())
        .await
        .map_err(|e| InjectorError::ServerError(format!("Error serving webhook: {}", e)))
}

/// Serve the metrics router over plain HTTP
pub async fn serve_metrics(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        InjectorError::ServerError(format!("Failed to bind metrics port {}: {}", addr, e))
    })?;

    info!(addr = %addr, "Listening for metrics");

    axum::serve(listener, router)
        .await
        .map_err(|e| InjectorError::ServerError(format!("Error serving metrics: {}", e)))
}
