// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Get and create operations for secrets, addressed by namespace and name

use crate::error::{InjectorError, Result};
use k8s_openapi::api::core::v1::Secret;
use kube::{api::PostParams, Api, Client, ResourceExt};
use tracing::{debug, instrument};

/// Thin client over the secrets API.
///
/// Not-found and already-exists responses are surfaced as their own error
/// variants so callers can tell them apart from transport or auth failures.
/// Every call issues exactly one request and is never retried here.
#[derive(Clone)]
pub struct SecretStore {
    client: Client,
}

impl SecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, namespace: &str, name: &str) -> Result<Secret> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        match secrets.get(name).await {
            Ok(secret) => {
                debug!("Secret {}/{} exists", namespace, name);
                Ok(secret)
            }
            Err(kube::Error::Api(err)) if err.code == 404 => Err(InjectorError::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, secret), fields(name = %secret.name_any()))]
    pub async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        match secrets.create(&PostParams::default(), secret).await {
            Ok(created) => Ok(created),
            Err(kube::Error::Api(err)) if err.code == 409 => {
                Err(InjectorError::SecretAlreadyExists {
                    namespace: namespace.to_string(),
                    name: secret.name_any(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
