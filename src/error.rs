// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmapError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load in-cluster config: {0}")]
    InClusterError(String),

    #[error("Could not resolve a kubeconfig path: no override given and no home directory found")]
    KubeconfigPathUnresolved,

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid merge patch: {0}")]
    InvalidPatch(String),
}

pub type Result<T> = std::result::Result<T, CmapError>;
