// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics for admissions and secret replication

use crate::constants::server::METRICS_UPKEEP_INTERVAL_SECS;
use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::trace;

pub const ADMISSION_REQUESTS_TOTAL: &str = "admission_requests_total";
pub const SECRET_REPLICATIONS_TOTAL: &str = "secret_replications_total";

// Installing a recorder is global and can only succeed once per process.
static PROMETHEUS_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Install the Prometheus recorder, or return the already installed one
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let mut prometheus_handle = PROMETHEUS_HANDLE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(handle) = &*prometheus_handle {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    *prometheus_handle = Some(handle.clone());

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(METRICS_UPKEEP_INTERVAL_SECS)).await;
            trace!("running metrics upkeep");
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

/// Count an admission request by outcome (`mutated`, `unchanged`, `skipped`, `invalid`, `denied`)
pub fn record_admission(outcome: &'static str) {
    counter!(ADMISSION_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

/// Count a replication attempt by result
pub fn record_replication(result: &'static str) {
    counter!(SECRET_REPLICATIONS_TOTAL, "result" => result).increment(1);
}
