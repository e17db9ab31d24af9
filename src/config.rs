// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{server, DEFAULT_IMAGE_PULL_SECRET_NAME, DEFAULT_OPERATOR_NAMESPACE};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Webhook configuration loaded from flags, falling back to environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "pullsecret-injector", about = "Injects an image pull secret into every admitted pod")]
pub struct Config {
    /// TLS certificate file (PEM)
    #[arg(long, env = "TLS_CERT_FILE")]
    pub tls_cert_file: PathBuf,

    /// TLS key file (PEM)
    #[arg(long, env = "TLS_KEY_FILE")]
    pub tls_key_file: PathBuf,

    /// Name of the image pull secret to inject and replicate
    #[arg(long, env = "IMAGE_PULL_SECRET_NAME", default_value = DEFAULT_IMAGE_PULL_SECRET_NAME)]
    pub image_pull_secret_name: String,

    /// Namespace holding the source image pull secret
    #[arg(long, env = "POD_NAMESPACE", default_value = DEFAULT_OPERATOR_NAMESPACE)]
    pub operator_namespace: String,

    #[arg(long, env = "LISTEN_ADDR", default_value = server::DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = "METRICS_ADDR", default_value = server::DEFAULT_METRICS_ADDR)]
    pub metrics_addr: SocketAddr,

    /// Re-check replicated secrets after this many seconds; unset means never
    #[arg(long, env = "CACHE_TTL_SECONDS")]
    pub cache_ttl_seconds: Option<u64>,
}

impl Config {
    /// Load configuration from the process arguments and environment
    pub fn load() -> Self {
        Config::parse()
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_seconds.map(Duration::from_secs)
    }
}
