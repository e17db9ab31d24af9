// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and kubeconfig utilities

use crate::error::{InjectorError, Result};
use kube::{config::KubeConfigOptions, Client, Config as KConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

/// Create a Kubernetes client.
///
/// Tries `$KUBECONFIG`, then `$HOME/.kube/config`, and falls back to the
/// in-cluster service account when neither file exists.
pub async fn create_client() -> Result<Client> {
    let candidates =
        kubeconfig_candidates(std::env::var_os("KUBECONFIG"), std::env::var_os("HOME"));

    for path in candidates {
        if path.is_file() {
            info!("Valid kube config from {}", path.display());
            return create_client_from_kubeconfig_file(&path).await;
        }
    }

    info!("No kube config file found, using in-cluster configuration");
    let config = KConfig::incluster().map_err(|e| {
        InjectorError::KubeconfigError(format!("Failed to load in-cluster config: {}", e))
    })?;

    Client::try_from(config)
        .map_err(|e| InjectorError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Kubeconfig locations to probe, in order of preference
fn kubeconfig_candidates(kubeconfig: Option<OsString>, home: Option<OsString>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = kubeconfig.filter(|p| !p.is_empty()) {
        candidates.push(PathBuf::from(path));
    }
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        candidates.push(PathBuf::from(home).join(".kube").join("config"));
    }

    candidates
}

/// Create a Kubernetes client from a kubeconfig file
async fn create_client_from_kubeconfig_file(path: &Path) -> Result<Client> {
    use kube::config::Kubeconfig;

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        InjectorError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(&contents).map_err(|e| {
        InjectorError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e))
    })?;

    let client_config =
        KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                InjectorError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| InjectorError::KubeconfigError(format!("Failed to create client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_prefer_kubeconfig_env() {
        let candidates = kubeconfig_candidates(
            Some(OsString::from("/etc/kube/admin.conf")),
            Some(OsString::from("/home/dev")),
        );

        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/etc/kube/admin.conf"),
                PathBuf::from("/home/dev/.kube/config"),
            ]
        );
    }

    #[test]
    fn test_candidates_skip_empty_values() {
        let candidates =
            kubeconfig_candidates(Some(OsString::new()), Some(OsString::from("/root")));

        assert_eq!(candidates, vec![PathBuf::from("/root/.kube/config")]);
    }

    #[test]
    fn test_candidates_empty_without_env() {
        assert!(kubeconfig_candidates(None, None).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_kubeconfig_file_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "pullsecret-injector-kubeconfig-{}",
            std::process::id()
        ));
        tokio::fs::write(&path, "clusters: [not: valid").await.unwrap();

        let result = create_client_from_kubeconfig_file(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(matches!(result, Err(InjectorError::KubeconfigError(_))));
    }
}
