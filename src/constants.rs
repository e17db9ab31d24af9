// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys written by the injector
pub mod annotations {
    /// Marks a secret that was replicated by the webhook rather than by a user
    pub const CREATED_BY_WEBHOOK: &str = "created-by-webhook";
}

/// Docker registry credential layout
pub mod docker {
    /// The data key holding the registry config blob
    pub const CONFIG_JSON_KEY: &str = ".dockerconfigjson";
    /// Secret type for registry credentials
    pub const SECRET_TYPE: &str = "kubernetes.io/dockerconfigjson";
}

/// Identifier of the mutating webhook
pub const WEBHOOK_ID: &str = "pod-add-image-pull-secret";

pub const DEFAULT_IMAGE_PULL_SECRET_NAME: &str = "cluster-docker-creds";
pub const DEFAULT_OPERATOR_NAMESPACE: &str = "k8s-webhooks";

/// Seconds between fetch attempts while the source secret is missing
pub const SOURCE_REFRESH_INTERVAL_SECS: u64 = 30;

pub mod server {
    pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
    pub const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:8081";
    /// Interval in seconds between Prometheus histogram upkeep runs
    pub const METRICS_UPKEEP_INTERVAL_SECS: u64 = 5;
}
