// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decides whether a pod needs the pull secret and computes the mutated pod.

pub mod decision;

pub use decision::{decide, pod_identifier, Mutation};
