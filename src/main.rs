// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cmap::bootstrap::{bootstrap, Bootstrap};
use cmap::config::Config;

fn unix_time() -> Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the unix epoch")?;
    Ok(now.as_secs().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={} name={} mode={:?}",
        config.namespace, config.name, config.client.mode
    );

    let data = BTreeMap::from([(config.key.clone(), unix_time()?)]);

    // A client that cannot be built is fatal here, and only here
    let outcome = bootstrap(&config, data)
        .await
        .context("Failed to create Kubernetes client")?;

    match &outcome {
        Bootstrap::Created { .. } => info!("ConfigMap {} created", config.name),
        Bootstrap::AlreadyPresent { .. } => info!("ConfigMap {} already present", config.name),
        Bootstrap::CreateFailed { .. } => {
            bail!("ConfigMap {}/{} could not be created", config.namespace, config.name)
        }
    }

    let gateway = outcome.gateway();
    if let Some(cm) = gateway.get(&config.namespace, &config.name).await {
        info!("Current data: {:?}", cm.data.unwrap_or_default());
    }

    // Stamp a fresh timestamp, leaving other keys untouched
    let stamp = BTreeMap::from([(config.key.clone(), unix_time()?)]);
    gateway
        .patch_data(&config.namespace, &config.name, &stamp)
        .await
        .context("Failed to patch ConfigMap")?;

    match gateway.get(&config.namespace, &config.name).await {
        Some(cm) => info!("Updated data: {:?}", cm.data.unwrap_or_default()),
        None => warn!("ConfigMap {} could not be read back", config.name),
    }

    Ok(())
}
