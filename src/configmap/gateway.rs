// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create, read and merge-patch a single ConfigMap

use super::failure::{classify, ApiFailure};
use crate::error::{CmapError, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    api::{ObjectMeta, Patch, PatchParams, PostParams},
    Api, Client,
};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use tracing::{error, info, instrument, warn};

/// Result of a create call that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The ConfigMap did not exist and was created
    Created(ConfigMap),
    /// A ConfigMap with this name was already there. Holds its current
    /// contents, or `None` if reading it back failed.
    AlreadyPresent(Option<ConfigMap>),
}

/// Issues ConfigMap calls through a shared client
#[derive(Clone)]
pub struct ConfigMapGateway {
    client: Client,
}

impl Debug for ConfigMapGateway {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigMapGateway")
            .field("default_namespace", &self.client.default_namespace())
            .finish()
    }
}

impl ConfigMapGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<ConfigMap> {
        Api::namespaced(self.client.clone(), namespace)
    }

    /// Create the ConfigMap. An existing ConfigMap with the same name counts
    /// as success and is returned as [`CreateOutcome::AlreadyPresent`].
    #[instrument(skip(self, data))]
    pub async fn create(
        &self,
        namespace: &str,
        name: &str,
        data: BTreeMap<String, String>,
    ) -> Option<CreateOutcome> {
        let configmap = new_configmap(namespace, name, data);

        match self
            .api(namespace)
            .create(&PostParams::default(), &configmap)
            .await
        {
            Ok(created) => {
                info!("ConfigMap {} created in namespace {}", name, namespace);
                Some(CreateOutcome::Created(created))
            }
            Err(e) => match classify(&e) {
                ApiFailure::AlreadyExists => {
                    info!(
                        "ConfigMap {} already exists in namespace {}",
                        name, namespace
                    );
                    Some(CreateOutcome::AlreadyPresent(self.get(namespace, name).await))
                }
                ApiFailure::Rejected { code, message } => {
                    error!(
                        "ConfigMap {} not created in namespace {}: {} ({})",
                        name, namespace, message, code
                    );
                    None
                }
                ApiFailure::NotFound => {
                    warn!(
                        "ConfigMap {} not created: namespace {} not found",
                        name, namespace
                    );
                    None
                }
                ApiFailure::Other => {
                    error!(
                        "ConfigMap {} not created in namespace {}: {}",
                        name, namespace, e
                    );
                    None
                }
            },
        }
    }

    /// Fetch the ConfigMap, `None` if it is missing or the call failed
    #[instrument(skip(self))]
    pub async fn get(&self, namespace: &str, name: &str) -> Option<ConfigMap> {
        match self.api(namespace).get(name).await {
            Ok(configmap) => {
                info!("ConfigMap {} found in namespace {}", name, namespace);
                Some(configmap)
            }
            Err(e) => {
                match classify(&e) {
                    ApiFailure::NotFound => {
                        warn!("ConfigMap {} not found in namespace {}", name, namespace)
                    }
                    ApiFailure::Rejected { code, message } => error!(
                        "Failed to get ConfigMap {} in namespace {}: {} ({})",
                        name, namespace, message, code
                    ),
                    ApiFailure::AlreadyExists | ApiFailure::Other => error!(
                        "Failed to get ConfigMap {} in namespace {}: {}",
                        name, namespace, e
                    ),
                }
                None
            }
        }
    }

    /// Apply a caller-built JSON merge patch to the ConfigMap.
    /// Unlike [`create`](Self::create) and [`get`](Self::get), failures are
    /// returned after being logged.
    #[instrument(skip(self, merge_patch))]
    pub async fn patch(&self, namespace: &str, name: &str, merge_patch: &[u8]) -> Result<()> {
        let payload: serde_json::Value = serde_json::from_slice(merge_patch).map_err(|e| {
            error!(
                "Merge patch for ConfigMap {} in namespace {} is not JSON: {}",
                name, namespace, e
            );
            CmapError::InvalidPatch(e.to_string())
        })?;

        match self
            .api(namespace)
            .patch(name, &PatchParams::default(), &Patch::Merge(&payload))
            .await
        {
            Ok(_) => {
                info!("ConfigMap {} patched in namespace {}", name, namespace);
                Ok(())
            }
            Err(e) => {
                match classify(&e) {
                    ApiFailure::NotFound => {
                        warn!("ConfigMap {} not found in namespace {}", name, namespace)
                    }
                    ApiFailure::Rejected { code, message } => error!(
                        "ConfigMap {} not patched in namespace {}: {} ({})",
                        name, namespace, message, code
                    ),
                    ApiFailure::AlreadyExists | ApiFailure::Other => error!(
                        "ConfigMap {} not patched in namespace {}: {}",
                        name, namespace, e
                    ),
                }
                Err(e.into())
            }
        }
    }

    /// Merge the given keys into the ConfigMap's data, leaving other keys alone
    pub async fn patch_data(
        &self,
        namespace: &str,
        name: &str,
        data: &BTreeMap<String, String>,
    ) -> Result<()> {
        let payload = serde_json::json!({ "data": data });
        self.patch(namespace, name, payload.to_string().as_bytes())
            .await
    }
}

/// Build the ConfigMap object submitted on create
pub fn new_configmap(namespace: &str, name: &str, data: BTreeMap<String, String>) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    }
}
