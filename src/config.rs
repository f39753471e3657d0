// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::apply::BatchPolicy;
use crate::constants::crd::{POLL_INTERVAL_MILLIS, POLL_TIMEOUT_SECS};
use crate::constants::DEFAULT_NAMESPACE;
use crate::kubernetes::{ConflictPolicy, PollConfig};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Fixture loader configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Manifest file or directory to apply
    pub manifest_path: PathBuf,
    /// Namespace namespaced fixtures are created in
    pub namespace: String,
    pub create_namespace: bool,
    /// Explicit kubeconfig; the ambient one is inferred when unset
    pub kubeconfig: Option<PathBuf>,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub fail_on_name_conflict: bool,
    pub abort_on_error: bool,
    /// Log to this file (rotated on start) instead of stdout
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let manifest_path = lookup("FIXTURE_MANIFEST_PATH")
            .map(PathBuf::from)
            .context("FIXTURE_MANIFEST_PATH environment variable not set")?;

        let poll_interval_ms: u64 = parse_or(&lookup, "FIXTURE_POLL_INTERVAL_MS", POLL_INTERVAL_MILLIS)?;
        if poll_interval_ms == 0 {
            bail!("FIXTURE_POLL_INTERVAL_MS must be greater than zero");
        }
        let poll_timeout_secs: u64 = parse_or(&lookup, "FIXTURE_POLL_TIMEOUT_SECS", POLL_TIMEOUT_SECS)?;

        Ok(Config {
            manifest_path,
            namespace: lookup("FIXTURE_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            create_namespace: parse_or(&lookup, "FIXTURE_CREATE_NAMESPACE", true)?,
            kubeconfig: lookup("FIXTURE_KUBECONFIG").map(PathBuf::from),
            poll_interval: Duration::from_millis(poll_interval_ms),
            poll_timeout: Duration::from_secs(poll_timeout_secs),
            fail_on_name_conflict: parse_or(&lookup, "FIXTURE_FAIL_ON_NAME_CONFLICT", false)?,
            abort_on_error: parse_or(&lookup, "FIXTURE_ABORT_ON_ERROR", false)?,
            log_file: lookup("FIXTURE_LOG_FILE").map(PathBuf::from),
        })
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: self.poll_interval,
            timeout: self.poll_timeout,
            on_conflict: if self.fail_on_name_conflict {
                ConflictPolicy::Fail
            } else {
                ConflictPolicy::Warn
            },
        }
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        if self.abort_on_error {
            BatchPolicy::Abort
        } else {
            BatchPolicy::Continue
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value '{}' for {}", value, key)),
        None => Ok(default),
    }
}
