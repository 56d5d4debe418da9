// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig path resolution and loading

use crate::constants::kubeconfig::{DIR, FILE, HOME_VAR, USERPROFILE_VAR};
use crate::error::{CmapError, Result};
use kube::config::Kubeconfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One way of locating a kubeconfig file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    /// The path given in the client configuration
    Explicit,
    /// `<home>/.kube/config` where home is read from the named variable
    HomeDir(&'static str),
}

/// Strategies in the order they are tried
pub const DEFAULT_STRATEGIES: [PathStrategy; 3] = [
    PathStrategy::Explicit,
    PathStrategy::HomeDir(HOME_VAR),
    PathStrategy::HomeDir(USERPROFILE_VAR),
];

impl PathStrategy {
    /// Returns a path, or `None` when this strategy has no answer
    pub fn resolve<F>(&self, explicit: Option<&Path>, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            PathStrategy::Explicit => explicit
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf),
            PathStrategy::HomeDir(var) => lookup(*var)
                .filter(|home| !home.is_empty())
                .map(|home| Path::new(&home).join(DIR).join(FILE)),
        }
    }
}

/// Resolve the kubeconfig path by trying each strategy in turn.
/// Yields an empty path when none of them has an answer.
pub fn resolve_path<F>(strategies: &[PathStrategy], explicit: Option<&Path>, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    strategies
        .iter()
        .find_map(|strategy| {
            let path = strategy.resolve(explicit, &lookup)?;
            debug!("Kubeconfig path {} resolved via {:?}", path.display(), strategy);
            Some(path)
        })
        .unwrap_or_default()
}

/// Read and parse the kubeconfig file at `path`.
/// Relative certificate and key paths are resolved against the file's directory.
pub fn read_kubeconfig(path: &Path) -> Result<Kubeconfig> {
    if path.as_os_str().is_empty() {
        return Err(CmapError::KubeconfigPathUnresolved);
    }

    Kubeconfig::read_from(path).map_err(|e| {
        CmapError::KubeconfigError(format!("Failed to load {}: {}", path.display(), e))
    })
}
