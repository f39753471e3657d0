// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::manifest::DecodeFailure;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML document: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unexpected apiVersion for {kind}: expected {expected}, found {found}")]
    ApiVersionMismatch {
        kind: String,
        expected: String,
        found: String,
    },

    #[error("Manifest {} contains {} undecodable document(s)", path.display(), failures.len())]
    InvalidManifest {
        path: PathBuf,
        failures: Vec<DecodeFailure>,
    },

    #[error("Timed out after {timeout:?} waiting for CRD {name} to be established")]
    Timeout { name: String, timeout: Duration },

    #[error("CRD {name} has a naming conflict: {reason}")]
    NamesConflict { name: String, reason: String },

    #[error("Failed to walk manifest directory: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Namespace creation failed: {0}")]
    NamespaceError(String),
}

impl FixtureError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixtureError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the API server rejected a create because the object is already there.
    pub fn is_already_exists(&self) -> bool {
        match self {
            FixtureError::KubeError(kube::Error::Api(err)) => {
                err.code == 409 || err.reason == "AlreadyExists"
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> FixtureError {
        FixtureError::KubeError(kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("request failed with {}", reason),
            reason: reason.to_string(),
            code,
        }))
    }

    #[test]
    fn test_is_already_exists_conflict() {
        assert!(api_error(409, "AlreadyExists").is_already_exists());
    }

    #[test]
    fn test_is_already_exists_other_api_error() {
        assert!(!api_error(404, "NotFound").is_already_exists());
        assert!(!api_error(422, "Invalid").is_already_exists());
    }

    #[test]
    fn test_is_already_exists_non_api_error() {
        let err = FixtureError::Timeout {
            name: "machines.machine.sapcloud.io".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert!(!err.is_already_exists());
    }
}
