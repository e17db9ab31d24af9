// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mutating admission webhook for pods.
//!
//! The handler decodes the AdmissionReview, makes sure the pod's namespace
//! has a copy of the pull secret, and answers with a JSON patch that adds the
//! secret to `spec.imagePullSecrets` when it is missing.

pub mod handler;
pub mod server;

use crate::config::Config;
use crate::constants::SOURCE_REFRESH_INTERVAL_SECS;
use crate::kubernetes::SecretStore;
use crate::replication::{ExistenceCache, SecretReplicator};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use k8s_openapi::api::core::v1::Secret;
use kube::Client;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Shared state for webhook handlers
pub struct WebhookState {
    secret_name: String,
    operator_namespace: String,
    store: SecretStore,
    replicator: SecretReplicator,
    source: RwLock<Option<Arc<Secret>>>,
    last_fetch: Mutex<Option<Instant>>,
    refresh_interval: Duration,
}

impl WebhookState {
    pub fn new(client: Client, config: &Config) -> Self {
        let store = SecretStore::new(client);
        let cache = Arc::new(ExistenceCache::new(config.cache_ttl()));

        Self {
            secret_name: config.image_pull_secret_name.clone(),
            operator_namespace: config.operator_namespace.clone(),
            replicator: SecretReplicator::new(store.clone(), cache),
            store,
            source: RwLock::new(None),
            last_fetch: Mutex::new(None),
            refresh_interval: Duration::from_secs(SOURCE_REFRESH_INTERVAL_SECS),
        }
    }

    /// Minimum time between two fetches of a missing source secret
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    pub fn replicator(&self) -> &SecretReplicator {
        &self.replicator
    }

    /// The pull secret in the operator namespace.
    ///
    /// Once loaded it is kept for the process lifetime. While it is missing,
    /// at most one caller per refresh interval fetches it again; every other
    /// caller gets `None` straight away. No lock is held during the fetch.
    pub async fn source_secret(&self) -> Option<Arc<Secret>> {
        if let Some(secret) = self.cached_source() {
            return Some(secret);
        }

        if !self.claim_fetch() {
            debug!(
                "Source secret {}/{} unavailable, skipping fetch",
                self.operator_namespace, self.secret_name
            );
            return None;
        }

        match self.store.get(&self.operator_namespace, &self.secret_name).await {
            Ok(secret) => {
                let secret = Arc::new(secret);
                *self.source.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(secret.clone());
                Some(secret)
            }
            Err(e) => {
                error!(
                    "Error getting source secret {}/{}: {}",
                    self.operator_namespace, self.secret_name, e
                );
                None
            }
        }
    }

    fn cached_source(&self) -> Option<Arc<Secret>> {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reserve the next fetch slot, false if one was taken within the interval
    fn claim_fetch(&self) -> bool {
        let mut last_fetch = self.last_fetch.lock().unwrap_or_else(PoisonError::into_inner);

        match *last_fetch {
            Some(at) if at.elapsed() < self.refresh_interval => false,
            _ => {
                *last_fetch = Some(Instant::now());
                true
            }
        }
    }

    /// Fetch the source secret ahead of the first admission request
    pub async fn warm_up(&self) {
        if self.source_secret().await.is_some() {
            info!(
                "Loaded source secret {}/{}",
                self.operator_namespace, self.secret_name
            );
        }
    }
}

/// Create the webhook router
///
/// - POST /mutate - Mutate pods with the image pull secret
/// - GET /healthz - Liveness probe
pub fn webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/mutate", post(handler::mutate_handler))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Create the router exposing Prometheus metrics at GET /metrics
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
