// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Dispatching decoded resources to the cluster

use crate::error::{FixtureError, Result};
use crate::kubernetes::{wait_for_established, ClusterApi, PollConfig};
use crate::manifest::{
    decode_file, decode_manifest, DecodeReport, DecodedResource, Resource, ResourceKind,
    SkippedDocument,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// What happened to a single decoded object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    /// The CRD was already registered; establishment was still awaited
    AlreadyExists,
    /// The kind has no create call, nothing was sent to the cluster
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReport {
    pub kind: ResourceKind,
    pub name: String,
    pub outcome: ApplyOutcome,
}

/// Result of applying one manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub objects: Vec<ObjectReport>,
    pub skipped: Vec<SkippedDocument>,
}

impl FileReport {
    pub fn count(&self, outcome: ApplyOutcome) -> usize {
        self.objects.iter().filter(|o| o.outcome == outcome).count()
    }
}

/// Creates decoded fixtures through a [`ClusterApi`], one object at a time
pub struct Applier<C> {
    api: C,
    poll: PollConfig,
}

impl<C: ClusterApi> Applier<C> {
    pub fn new(api: C, poll: PollConfig) -> Self {
        Self { api, poll }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    /// Create one object in `namespace` (ignored for cluster scoped CRDs).
    ///
    /// API errors are returned unchanged, except "already exists" on a CRD,
    /// which is absorbed before waiting for the CRD to be established.
    #[instrument(skip(self, decoded), fields(kind = %decoded.kind(), name = %decoded.name()))]
    pub async fn apply_resource(
        &self,
        decoded: &DecodedResource,
        namespace: &str,
    ) -> Result<ApplyOutcome> {
        let outcome = match &decoded.resource {
            Resource::CustomResourceDefinition(crd) => {
                let name = decoded.name();
                let outcome = match self.api.create_crd(crd).await {
                    Ok(()) => ApplyOutcome::Created,
                    Err(e) if e.is_already_exists() => {
                        debug!("CRD {} already exists", name);
                        ApplyOutcome::AlreadyExists
                    }
                    Err(e) => return Err(e),
                };
                if let Err(e) = wait_for_established(&self.api, &name, &self.poll).await {
                    warn!("CRD {} can not be established: {}", name, e);
                    return Err(e);
                }
                outcome
            }
            Resource::MachineClass(class) => {
                self.api.create_machine_class(namespace, class).await?;
                ApplyOutcome::Created
            }
            Resource::Machine(machine) => {
                self.api.create_machine(namespace, machine).await?;
                ApplyOutcome::Created
            }
            Resource::MachineDeployment(deployment) => {
                self.api
                    .create_machine_deployment(namespace, deployment)
                    .await?;
                ApplyOutcome::Created
            }
            Resource::Deployment(deployment) => {
                self.api.create_deployment(namespace, deployment).await?;
                ApplyOutcome::Created
            }
            Resource::Role(_)
            | Resource::ClusterRole(_)
            | Resource::RoleBinding(_)
            | Resource::ClusterRoleBinding(_)
            | Resource::ServiceAccount(_) => {
                debug!("No create call for {}, skipping", decoded.kind());
                ApplyOutcome::Unsupported
            }
        };

        Ok(outcome)
    }

    /// Apply every document of an in-memory manifest.
    ///
    /// `source` only labels the report and errors.
    pub async fn apply_manifest(
        &self,
        source: &Path,
        text: &str,
        namespace: &str,
    ) -> Result<FileReport> {
        self.apply_report(source, decode_manifest(text), namespace)
            .await
    }

    /// Apply a manifest file.
    ///
    /// Nothing is created when any document fails to decode. Otherwise the
    /// objects are created in order and the first failure aborts the file.
    #[instrument(skip(self))]
    pub async fn apply_file(&self, path: &Path, namespace: &str) -> Result<FileReport> {
        let report = decode_file(path).await?;
        self.apply_report(path, report, namespace).await
    }

    async fn apply_report(
        &self,
        path: &Path,
        report: DecodeReport,
        namespace: &str,
    ) -> Result<FileReport> {
        if report.has_failures() {
            return Err(FixtureError::InvalidManifest {
                path: path.to_path_buf(),
                failures: report.failures,
            });
        }

        let mut objects = Vec::with_capacity(report.resources.len());
        for decoded in &report.resources {
            let outcome = self.apply_resource(decoded, namespace).await?;
            objects.push(ObjectReport {
                kind: decoded.kind(),
                name: decoded.name(),
                outcome,
            });
        }

        let file_report = FileReport {
            path: path.to_path_buf(),
            objects,
            skipped: report.skipped,
        };
        info!(
            "Applied {} to namespace {}: {} created, {} already present, {} unsupported",
            path.display(),
            namespace,
            file_report.count(ApplyOutcome::Created),
            file_report.count(ApplyOutcome::AlreadyExists),
            file_report.count(ApplyOutcome::Unsupported),
        );

        Ok(file_report)
    }
}
