// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AdmissionReview handling for pod creation requests

use crate::error::{InjectorError, Result};
use crate::metrics::record_admission;
use crate::mutation::{decide, pod_identifier, Mutation};
use crate::webhook::WebhookState;
use axum::{extract::State, Json};
use k8s_openapi::api::core::v1::Pod;
use kube::core::{
    admission::{AdmissionRequest, AdmissionResponse, AdmissionReview},
    DynamicObject,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Handle `POST /mutate`
pub async fn mutate_handler(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(request) => request,
        Err(e) => {
            warn!("Invalid admission review: {}", e);
            record_admission("invalid");
            return Json(AdmissionResponse::invalid(e.to_string()).into_review());
        }
    };

    let response = match admit(&state, &request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to mutate admission request {}: {}", request.uid, e);
            record_admission("denied");
            AdmissionResponse::from(&request).deny(e.to_string())
        }
    };

    Json(response.into_review())
}

#[instrument(skip(state, request), fields(uid = %request.uid))]
async fn admit(
    state: &WebhookState,
    request: &AdmissionRequest<DynamicObject>,
) -> Result<AdmissionResponse> {
    let response = AdmissionResponse::from(request);

    let Some(pod) = extract_pod(request)? else {
        debug!("Skipping non-pod object of kind {}", request.kind.kind);
        record_admission("skipped");
        return Ok(response);
    };

    let namespace = request.namespace.as_deref().unwrap_or_default();
    let pod_name = pod_identifier(namespace, &pod);
    info!("Received mutation request for pod {}", pod_name);

    if namespace.is_empty() {
        warn!("No namespace shown for pod {}", pod_name);
    } else if request.dry_run {
        debug!("Dry run for pod {}, not replicating secret", pod_name);
    } else if let Some(source) = state.source_secret().await {
        if let Err(e) = state.replicator().ensure(namespace, &source).await {
            error!("Unable to save secret in {} namespace: {}", namespace, e);
        }
    }

    match decide(&pod, state.secret_name()) {
        Mutation::Unchanged => {
            debug!("Not mutating pod {} with existing secret", pod_name);
            record_admission("unchanged");
            Ok(response)
        }
        Mutation::Mutated(mutated) => {
            debug!("Finished mutating pod {}", pod_name);
            let patch = json_patch::diff(
                &serde_json::to_value(&pod)?,
                &serde_json::to_value(&mutated)?,
            );
            record_admission("mutated");
            response
                .with_patch(patch)
                .map_err(|e| InjectorError::PatchError(e.to_string()))
        }
    }
}

/// The admitted object as a pod, or `None` when the request is for another kind
fn extract_pod(request: &AdmissionRequest<DynamicObject>) -> Result<Option<Pod>> {
    let is_pod = request.kind.group.is_empty()
        && request.kind.version == "v1"
        && request.kind.kind == "Pod";

    match (&request.object, is_pod) {
        (Some(object), true) => Ok(Some(serde_json::from_value(serde_json::to_value(
            object,
        )?)?)),
        _ => Ok(None),
    }
}
