// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mcm_fixtures::apply::Applier;
use mcm_fixtures::config::Config;
use mcm_fixtures::kubernetes::{create_client, ensure_namespace_exists, ClusterHandle};
use mcm_fixtures::logfile::rotate_log_file;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first, it decides where logs go
    let config = Config::from_env()?;

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match &config.log_file {
        Some(path) => {
            let file = rotate_log_file(path).context("Failed to rotate log file")?;
            subscriber.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => subscriber.init(),
    }

    info!(
        "Applying fixtures from {} to namespace {}",
        config.manifest_path.display(),
        config.namespace
    );

    let client = create_client(config.kubeconfig.as_deref()).await?;
    info!("Connected to Kubernetes cluster");

    if config.create_namespace {
        ensure_namespace_exists(&client, &config.namespace).await?;
    }

    let applier = Applier::new(ClusterHandle::new(client), config.poll_config());
    let report = applier
        .apply_dir(&config.manifest_path, &config.namespace, config.batch_policy())
        .await?;

    let applied = report.applied().count();
    let mut failed = 0;
    for (path, e) in report.failures() {
        error!("{}: {}", path.display(), e);
        failed += 1;
    }
    info!("{} file(s) applied, {} failed", applied, failed);

    if failed > 0 {
        bail!("{} fixture file(s) failed to apply", failed);
    }
    Ok(())
}
