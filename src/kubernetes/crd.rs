// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for CustomResourceDefinitions to become established

use crate::constants::crd::{
    ESTABLISHED, NAMES_ACCEPTED, POLL_INTERVAL_MILLIS, POLL_TIMEOUT_SECS,
};
use crate::error::{FixtureError, Result};
use crate::kubernetes::ClusterApi;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

/// What to do when a CRD reports NamesAccepted=False
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Log the conflict and keep polling
    #[default]
    Warn,
    /// Stop polling and return the conflict as an error
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
    pub on_conflict: ConflictPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(POLL_INTERVAL_MILLIS),
            timeout: Duration::from_secs(POLL_TIMEOUT_SECS),
            on_conflict: ConflictPolicy::default(),
        }
    }
}

/// Establishment state read from a CRD's status conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrdState {
    Established,
    Pending { names_conflict: Option<String> },
}

pub fn crd_state(crd: &CustomResourceDefinition) -> CrdState {
    let mut names_conflict = None;

    let conditions = crd.status.as_ref().and_then(|s| s.conditions.as_ref());
    for condition in conditions.into_iter().flatten() {
        match condition.type_.as_str() {
            ESTABLISHED if condition.status == "True" => return CrdState::Established,
            NAMES_ACCEPTED if condition.status == "False" => {
                names_conflict = Some(
                    condition
                        .reason
                        .clone()
                        .or_else(|| condition.message.clone())
                        .unwrap_or_default(),
                );
            }
            _ => {}
        }
    }

    CrdState::Pending { names_conflict }
}

/// Poll a CRD until it reports Established=True.
///
/// A failed fetch ends the wait immediately. When the budget runs out the
/// result is `FixtureError::Timeout`.
#[instrument(skip(api, config))]
pub async fn wait_for_established<C>(api: &C, name: &str, config: &PollConfig) -> Result<()>
where
    C: ClusterApi + ?Sized,
{
    let started = Instant::now();
    let deadline = started + config.timeout;

    loop {
        let crd = api.get_crd(name).await?;

        match crd_state(&crd) {
            CrdState::Established => {
                info!(
                    "CRD {} is established after {:?}",
                    name,
                    started.elapsed()
                );
                return Ok(());
            }
            CrdState::Pending {
                names_conflict: Some(reason),
            } => match config.on_conflict {
                ConflictPolicy::Warn => {
                    warn!("Naming conflict with created CRD {}: {}", name, reason);
                }
                ConflictPolicy::Fail => {
                    return Err(FixtureError::NamesConflict {
                        name: name.to_string(),
                        reason,
                    });
                }
            },
            CrdState::Pending {
                names_conflict: None,
            } => {
                debug!("CRD {} not yet established", name);
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(FixtureError::Timeout {
                name: name.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.interval.min(deadline - now)).await;
    }
}
