// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::api::core::v1::{LocalObjectReference, Pod};

/// Result of inspecting a pod
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// The pod already references the pull secret
    Unchanged,
    /// Copy of the pod with the pull secret appended
    Mutated(Pod),
}

/// `namespace/name`, using the generate-name prefix for pods that have no name yet
pub fn pod_identifier(namespace: &str, pod: &Pod) -> String {
    let name = pod
        .metadata
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .or(pod.metadata.generate_name.as_deref())
        .unwrap_or_default();

    format!("{}/{}", namespace, name)
}

/// Append a reference to `secret_name` to the pod's image pull secrets unless
/// one is already there. Existing entries are kept as they are, in order.
pub fn decide(pod: &Pod, secret_name: &str) -> Mutation {
    let pull_secrets = pod
        .spec
        .as_ref()
        .and_then(|s| s.image_pull_secrets.as_deref())
        .unwrap_or_default();

    if pull_secrets.iter().any(|r| r.name == secret_name) {
        return Mutation::Unchanged;
    }

    let mut mutated = pod.clone();
    mutated
        .spec
        .get_or_insert_with(Default::default)
        .image_pull_secrets
        .get_or_insert_with(Vec::new)
        .push(LocalObjectReference {
            name: secret_name.to_string(),
        });

    Mutation::Mutated(mutated)
}
