// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Multi-document manifest splitting and typed decoding

use crate::constants::DOCUMENT_SEPARATOR;
use crate::error::{FixtureError, Result};
use crate::manifest::kind::{DecodedResource, Resource, ResourceKind};
use kube::core::TypeMeta;
use kube::core::GroupVersionKind;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Outcome of decoding every document of a manifest
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub resources: Vec<DecodedResource>,
    pub skipped: Vec<SkippedDocument>,
    pub failures: Vec<DecodeFailure>,
}

impl DecodeReport {
    /// The error of the last document that failed to decode
    pub fn last_error(&self) -> Option<&FixtureError> {
        self.failures.last().map(|f| &f.error)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of non-empty documents seen
    pub fn document_count(&self) -> usize {
        self.resources.len() + self.skipped.len() + self.failures.len()
    }
}

/// A well-formed document whose kind has no decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub index: usize,
    pub api_version: String,
    pub kind: String,
}

#[derive(Debug)]
pub struct DecodeFailure {
    pub index: usize,
    pub error: FixtureError,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document {}: {}", self.index, self.error)
    }
}

enum Document {
    Known(DecodedResource),
    Unsupported(TypeMeta),
}

/// Split a multi-document manifest on `---` lines.
///
/// Fragments holding only whitespace or comments are dropped. Separator lines
/// are not part of any fragment, so joining the result with `"---\n"` gives
/// back the original text minus the dropped fragments.
pub fn split_documents(text: &str) -> Vec<&str> {
    let mut documents = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim_end() == DOCUMENT_SEPARATOR {
            push_document(&mut documents, &text[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    push_document(&mut documents, &text[start..]);

    documents
}

fn push_document<'a>(documents: &mut Vec<&'a str>, fragment: &'a str) {
    let blank = fragment
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if !blank {
        documents.push(fragment);
    }
}

/// Decode every document of a manifest.
///
/// A document that fails to decode does not stop the ones after it; every
/// failure is kept in the report.
pub fn decode_manifest(text: &str) -> DecodeReport {
    let mut report = DecodeReport::default();

    for (index, document) in split_documents(text).into_iter().enumerate() {
        match decode_document(index, document) {
            Ok(Document::Known(resource)) => report.resources.push(resource),
            Ok(Document::Unsupported(types)) => {
                warn!(
                    "Skipping document {} with unsupported type {}/{}",
                    index, types.api_version, types.kind
                );
                report.skipped.push(SkippedDocument {
                    index,
                    api_version: types.api_version,
                    kind: types.kind,
                });
            }
            Err(error) => {
                warn!("Error while decoding document {}: {}", index, error);
                report.failures.push(DecodeFailure { index, error });
            }
        }
    }

    report
}

/// Read a manifest file and decode its documents
#[instrument]
pub async fn decode_file(path: &Path) -> Result<DecodeReport> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FixtureError::io(path, e))?;

    let report = decode_manifest(&text);
    debug!(
        "Decoded {} of {} documents",
        report.resources.len(),
        report.document_count()
    );
    Ok(report)
}

fn decode_document(index: usize, document: &str) -> Result<Document> {
    // Only apiVersion and kind are read here; the typed decode below sees the full document
    let types: TypeMeta = serde_yaml::from_str(document)?;

    let Some(kind) = ResourceKind::from_kind(&types.kind) else {
        return Ok(Document::Unsupported(types));
    };

    let expected = kind.api_version();
    if types.api_version != expected {
        return Err(FixtureError::ApiVersionMismatch {
            kind: types.kind,
            expected: expected.into_owned(),
            found: types.api_version,
        });
    }

    debug!(
        "Decoding document {} as {} ({:?} API)",
        index,
        kind,
        kind.family()
    );

    let resource = match kind {
        ResourceKind::Role => Resource::Role(decode_as(document)?),
        ResourceKind::ClusterRole => Resource::ClusterRole(decode_as(document)?),
        ResourceKind::RoleBinding => Resource::RoleBinding(decode_as(document)?),
        ResourceKind::ClusterRoleBinding => Resource::ClusterRoleBinding(decode_as(document)?),
        ResourceKind::ServiceAccount => Resource::ServiceAccount(decode_as(document)?),
        ResourceKind::CustomResourceDefinition => {
            Resource::CustomResourceDefinition(Box::new(decode_as(document)?))
        }
        ResourceKind::Deployment => Resource::Deployment(Box::new(decode_as(document)?)),
        ResourceKind::MachineClass => Resource::MachineClass(decode_as(document)?),
        ResourceKind::Machine => Resource::Machine(decode_as(document)?),
        ResourceKind::MachineDeployment => Resource::MachineDeployment(decode_as(document)?),
    };

    Ok(Document::Known(DecodedResource {
        gvk: group_version_kind(&types),
        resource,
    }))
}

fn decode_as<K: DeserializeOwned>(document: &str) -> Result<K> {
    Ok(serde_yaml::from_str(document)?)
}

fn group_version_kind(types: &TypeMeta) -> GroupVersionKind {
    let (group, version) = types
        .api_version
        .split_once('/')
        .unwrap_or(("", types.api_version.as_str()));
    GroupVersionKind::gvk(group, version, &types.kind)
}
