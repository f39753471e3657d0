// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Applying every manifest below a directory

use crate::apply::applier::{Applier, FileReport};
use crate::error::{FixtureError, Result};
use crate::kubernetes::ClusterApi;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};
use walkdir::WalkDir;

/// How a failing file affects the rest of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Record the failure and keep applying the remaining files
    #[default]
    Continue,
    /// Stop at the first failure that is not an "already exists" error
    Abort,
}

#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub result: Result<FileReport>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileResult>,
}

impl BatchReport {
    pub fn applied(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter_map(|f| f.result.as_ref().ok())
    }

    /// Files that failed for a reason other than an object already existing
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &FixtureError)> {
        self.files.iter().filter_map(|f| match &f.result {
            Err(e) if !e.is_already_exists() => Some((f.path.as_path(), e)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

impl<C: ClusterApi> Applier<C> {
    /// Apply every regular file below `source`, in file name order.
    ///
    /// `source` may also be a single file. Symlinks are followed. Walk errors
    /// are returned; per-file failures are handled according to `policy`.
    #[instrument(skip(self))]
    pub async fn apply_dir(
        &self,
        source: &Path,
        namespace: &str,
        policy: BatchPolicy,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        let walker = WalkDir::new(source).follow_links(true).sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                debug!("{} is a directory", path.display());
                continue;
            }
            if !entry.file_type().is_file() {
                debug!("Skipping {}, not a regular file", path.display());
                continue;
            }

            let result = match self.apply_file(path, namespace).await {
                Ok(file) => {
                    info!("File {} has been successfully applied to cluster", path.display());
                    Ok(file)
                }
                Err(e) if e.is_already_exists() => {
                    debug!("File {} was already applied: {}", path.display(), e);
                    Err(e)
                }
                Err(e) => {
                    error!("Failed to apply yaml file {}: {}", path.display(), e);
                    if policy == BatchPolicy::Abort {
                        return Err(e);
                    }
                    Err(e)
                }
            };

            report.files.push(FileResult {
                path: path.to_path_buf(),
                result,
            });
        }

        Ok(report)
    }
}
