// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the `cmap` binary
pub mod env {
    /// Name of the ConfigMap to bootstrap (required)
    pub const NAME: &str = "CMAP_NAME";
    pub const NAMESPACE: &str = "CMAP_NAMESPACE";
    /// Data key that receives the unix timestamp
    pub const KEY: &str = "CMAP_KEY";
    /// When set to "true", credentials are read from a kubeconfig file
    pub const OUT_CLUSTER: &str = "CMAP_OUT_CLUSTER";
    pub const KUBECONFIG: &str = "CMAP_KUBECONFIG";
    pub const CONTEXT: &str = "CMAP_CONTEXT";
}

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_KEY: &str = "ts";

/// Kubeconfig location relative to the user's home directory
pub mod kubeconfig {
    pub const DIR: &str = ".kube";
    pub const FILE: &str = "config";
    /// POSIX home variable, checked first
    pub const HOME_VAR: &str = "HOME";
    /// Windows home variable
    pub const USERPROFILE_VAR: &str = "USERPROFILE";
}
