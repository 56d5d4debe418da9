// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation for in-cluster and out-of-cluster use

use crate::config::{ClientConfig, ClusterMode};
use crate::error::{CmapError, Result};
use crate::kubernetes::kubeconfig::{read_kubeconfig, resolve_path, DEFAULT_STRATEGIES};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client according to the configured cluster mode
#[instrument(skip(config), fields(mode = ?config.mode))]
pub async fn create_client(config: &ClientConfig) -> Result<Client> {
    create_client_with_env(config, |var| std::env::var(var).ok()).await
}

/// Same as [`create_client`], reading home directory variables through `lookup`
async fn create_client_with_env<F>(config: &ClientConfig, lookup: F) -> Result<Client>
where
    F: Fn(&str) -> Option<String>,
{
    match config.mode {
        ClusterMode::InCluster => create_in_cluster_client(),
        ClusterMode::OutOfCluster => {
            let path = resolve_path(&DEFAULT_STRATEGIES, config.kubeconfig.as_deref(), lookup);
            info!("Using kubeconfig {}", path.display());
            let kubeconfig = read_kubeconfig(&path)?;
            create_client_from_kubeconfig(kubeconfig, config.context.as_deref()).await
        }
    }
}

/// Create a client from the pod's service account
fn create_in_cluster_client() -> Result<Client> {
    let c = KConfig::incluster().map_err(|e| CmapError::InClusterError(e.to_string()))?;
    debug!("In-cluster config resolved for {}", c.cluster_url);

    Client::try_from(c)
        .map_err(|e| CmapError::InClusterError(format!("Failed to create client: {}", e)))
}

/// Create a Kubernetes client from a parsed kubeconfig
pub async fn create_client_from_kubeconfig(
    kubeconfig: Kubeconfig,
    context: Option<&str>,
) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let client_config = KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| CmapError::KubeconfigError(format!("Failed to create config: {}", e)))?;
    debug!("Kubeconfig resolved to {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| CmapError::KubeconfigError(format!("Failed to create client: {}", e)))
}
