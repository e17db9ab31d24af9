// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lazy replication of the pull secret into pod namespaces.

pub mod cache;
pub mod replicator;

pub use cache::ExistenceCache;
pub use replicator::{build_replica, Replication, SecretReplicator};
