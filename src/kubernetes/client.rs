// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation for the cluster under test

use crate::error::{FixtureError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, instrument};

/// Create a client from an explicit kubeconfig file, or infer one from the environment
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    match kubeconfig {
        Some(path) => {
            debug!("Loading kubeconfig from {}", path.display());
            let kubeconfig = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FixtureError::io(path, e))?;
            create_client_from_kubeconfig(&kubeconfig).await
        }
        None => {
            let config = KConfig::infer().await.map_err(|e| {
                FixtureError::KubeconfigError(format!("Failed to infer config: {}", e))
            })?;
            Client::try_from(config).map_err(|e| {
                FixtureError::KubeconfigError(format!("Failed to create client: {}", e))
            })
        }
    }
}

/// Create a Kubernetes client from a kubeconfig string
pub async fn create_client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig).map_err(|e| {
        FixtureError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e))
    })?;

    let client_config =
        KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                FixtureError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| FixtureError::KubeconfigError(format!("Failed to create client: {}", e)))
}
