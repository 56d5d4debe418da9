// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation and kubeconfig utilities.

pub mod client;
pub mod kubeconfig;

pub use client::create_client;
