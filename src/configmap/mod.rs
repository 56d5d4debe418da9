// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMap access and API error classification.

pub mod failure;
pub mod gateway;

pub use failure::{classify, ApiFailure};
pub use gateway::{new_configmap, ConfigMapGateway, CreateOutcome};
