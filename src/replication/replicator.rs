// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Copies the source pull secret into namespaces that do not have it yet

use crate::constants::{annotations, docker};
use crate::error::{InjectorError, Result};
use crate::kubernetes::SecretStore;
use crate::metrics::record_replication;
use crate::replication::ExistenceCache;
use k8s_openapi::api::core::v1::Secret;
use kube::{api::ObjectMeta, ResourceExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// How a namespace came to have the pull secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replication {
    /// The namespace was already marked in the cache, no remote call made
    Cached,
    /// The secret already existed in the namespace
    Found,
    /// The secret was created by this call
    Created,
    /// A concurrent creator won the race
    AlreadyExists,
}

impl Replication {
    pub fn as_str(&self) -> &'static str {
        match self {
            Replication::Cached => "cached",
            Replication::Found => "found",
            Replication::Created => "created",
            Replication::AlreadyExists => "already_exists",
        }
    }
}

#[derive(Clone)]
pub struct SecretReplicator {
    store: SecretStore,
    cache: Arc<ExistenceCache>,
}

impl SecretReplicator {
    pub fn new(store: SecretStore, cache: Arc<ExistenceCache>) -> Self {
        Self { store, cache }
    }

    /// Make sure `namespace` holds a copy of `source`.
    ///
    /// An `Err` means the namespace may still lack the secret; the cache is
    /// left untouched so the next call checks again.
    #[instrument(skip(self, source), fields(secret = %source.name_any()))]
    pub async fn ensure(&self, namespace: &str, source: &Secret) -> Result<Replication> {
        let result = self.replicate(namespace, source).await;

        match &result {
            Ok(replication) => {
                if *replication != Replication::Cached {
                    self.cache.mark_present(namespace);
                }
                record_replication(replication.as_str());
            }
            Err(_) => record_replication("failed"),
        }

        result
    }

    async fn replicate(&self, namespace: &str, source: &Secret) -> Result<Replication> {
        let name = source.name_any();

        if self.cache.contains(namespace) {
            debug!("Cached secret {}/{} exists", namespace, name);
            return Ok(Replication::Cached);
        }

        match self.store.get(namespace, &name).await {
            Ok(_) => return Ok(Replication::Found),
            Err(InjectorError::SecretNotFound { .. }) => {
                info!("Secret {}/{} does not exist", namespace, name);
            }
            Err(e) => return Err(e),
        }

        let replica = build_replica(source, namespace)?;
        match self.store.create(namespace, &replica).await {
            Ok(_) => {
                info!("Created secret {}/{}", namespace, name);
                Ok(Replication::Created)
            }
            Err(InjectorError::SecretAlreadyExists { .. }) => {
                warn!("Secret {}/{} was created concurrently", namespace, name);
                Ok(Replication::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }
}

/// Build the copy of `source` to create in `namespace`.
///
/// Only the registry config blob is carried over; labels, other data keys and
/// annotations of the source are not propagated.
pub fn build_replica(source: &Secret, namespace: &str) -> Result<Secret> {
    let payload = source
        .data
        .as_ref()
        .and_then(|d| d.get(docker::CONFIG_JSON_KEY))
        .cloned()
        .ok_or_else(|| InjectorError::MissingPayload {
            namespace: source.namespace().unwrap_or_default(),
            name: source.name_any(),
        })?;

    Ok(Secret {
        metadata: ObjectMeta {
            name: source.metadata.name.clone(),
            namespace: Some(namespace.to_string()),
            annotations: Some(BTreeMap::from([(
                annotations::CREATED_BY_WEBHOOK.to_string(),
                "true".to_string(),
            )])),
            ..Default::default()
        },
        type_: Some(
            source
                .type_
                .clone()
                .unwrap_or_else(|| docker::SECRET_TYPE.to_string()),
        ),
        data: Some(BTreeMap::from([(
            docker::CONFIG_JSON_KEY.to_string(),
            payload,
        )])),
        ..Default::default()
    })
}
