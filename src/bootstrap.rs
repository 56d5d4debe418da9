// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client and ConfigMap bootstrap at startup.

use crate::config::Config;
use crate::configmap::{ConfigMapGateway, CreateOutcome};
use crate::error::Result;
use crate::kubernetes::create_client;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::Client;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// What the startup create achieved, once a client was obtained
#[derive(Clone, Debug)]
pub enum Bootstrap {
    Created {
        gateway: ConfigMapGateway,
        configmap: ConfigMap,
    },
    /// The ConfigMap existed before we started. `configmap` is `None` if it
    /// could not be read back.
    AlreadyPresent {
        gateway: ConfigMapGateway,
        configmap: Option<ConfigMap>,
    },
    /// The client works but the ConfigMap could not be created
    CreateFailed { gateway: ConfigMapGateway },
}

impl Bootstrap {
    pub fn gateway(&self) -> &ConfigMapGateway {
        match self {
            Bootstrap::Created { gateway, .. }
            | Bootstrap::AlreadyPresent { gateway, .. }
            | Bootstrap::CreateFailed { gateway } => gateway,
        }
    }

    pub fn configmap(&self) -> Option<&ConfigMap> {
        match self {
            Bootstrap::Created { configmap, .. } => Some(configmap),
            Bootstrap::AlreadyPresent { configmap, .. } => configmap.as_ref(),
            Bootstrap::CreateFailed { .. } => None,
        }
    }

    /// Whether the ConfigMap is known to exist
    pub fn is_ready(&self) -> bool {
        !matches!(self, Bootstrap::CreateFailed { .. })
    }
}

/// Build a client for the configured cluster mode and create the ConfigMap.
/// Errors only when no client could be built.
#[instrument(skip(config, data), fields(namespace = %config.namespace, name = %config.name))]
pub async fn bootstrap(config: &Config, data: BTreeMap<String, String>) -> Result<Bootstrap> {
    let client = create_client(&config.client).await?;
    info!("Kubernetes client ready");

    Ok(bootstrap_with_client(client, &config.namespace, &config.name, data).await)
}

/// Create the ConfigMap through an existing client
pub async fn bootstrap_with_client(
    client: Client,
    namespace: &str,
    name: &str,
    data: BTreeMap<String, String>,
) -> Bootstrap {
    let gateway = ConfigMapGateway::new(client);

    match gateway.create(namespace, name, data).await {
        Some(CreateOutcome::Created(configmap)) => Bootstrap::Created { gateway, configmap },
        Some(CreateOutcome::AlreadyPresent(configmap)) => {
            Bootstrap::AlreadyPresent { gateway, configmap }
        }
        None => {
            warn!(
                "Bootstrap of ConfigMap {} in namespace {} failed",
                name, namespace
            );
            Bootstrap::CreateFailed { gateway }
        }
    }
}
