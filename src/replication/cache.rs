// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-namespace record of where the pull secret is known to exist

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Remembers namespaces whose pull secret was found or created.
///
/// Entries never expire unless a TTL is configured, in which case a namespace
/// is re-checked remotely once its entry is older than the TTL. The lock is
/// only held for the map access itself, never across a remote call.
#[derive(Debug, Default)]
pub struct ExistenceCache {
    entries: Mutex<HashMap<String, Instant>>,
    ttl: Option<Duration>,
}

impl ExistenceCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Whether the namespace is marked present and the mark is still fresh
    pub fn contains(&self, namespace: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(marked_at) = entries.get(namespace) else {
            return false;
        };

        match self.ttl {
            Some(ttl) if marked_at.elapsed() >= ttl => {
                entries.remove(namespace);
                false
            }
            _ => true,
        }
    }

    pub fn mark_present(&self, namespace: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.to_string(), Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
