// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, DEFAULT_KEY, DEFAULT_NAMESPACE};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Where the client takes its credentials from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterMode {
    /// Service account token and environment of the pod we run in
    #[default]
    InCluster,
    /// A kubeconfig file on the local filesystem
    OutOfCluster,
}

/// Settings for building a Kubernetes client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub mode: ClusterMode,
    /// Explicit kubeconfig path, takes precedence over the home directory default
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the file's current-context
    pub context: Option<String>,
}

impl ClientConfig {
    pub fn in_cluster() -> Self {
        Self::default()
    }

    pub fn out_of_cluster(kubeconfig: Option<PathBuf>) -> Self {
        Self {
            mode: ClusterMode::OutOfCluster,
            kubeconfig,
            context: None,
        }
    }
}

/// Bootstrap configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub namespace: String,
    /// Name of the ConfigMap created at startup
    pub name: String,
    /// Data key stamped with the current unix time
    pub key: String,
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let name = non_empty(vars::NAME)
            .with_context(|| format!("{} environment variable not set", vars::NAME))?;
        let namespace = non_empty(vars::NAMESPACE).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let key = non_empty(vars::KEY).unwrap_or_else(|| DEFAULT_KEY.to_string());

        let out_cluster: bool = non_empty(vars::OUT_CLUSTER)
            .unwrap_or("false".to_string())
            .parse()
            .unwrap_or(false);
        let mode = if out_cluster {
            ClusterMode::OutOfCluster
        } else {
            ClusterMode::InCluster
        };

        Ok(Config {
            namespace,
            name,
            key,
            client: ClientConfig {
                mode,
                kubeconfig: non_empty(vars::KUBECONFIG).map(PathBuf::from),
                context: non_empty(vars::CONTEXT),
            },
        })
    }
}
