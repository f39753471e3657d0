// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Numbered log file rotation

use crate::constants::LOG_BACKUPS;
use crate::error::{FixtureError, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Create a fresh file at `path`, keeping up to nine older copies.
///
/// An existing file moves to `<path>.1`, `<path>.1` to `<path>.2` and so on;
/// whatever sat at `<path>.9` ends up at `<path>.10`.
pub fn rotate_log_file(path: &Path) -> Result<File> {
    if path.exists() {
        for index in (1..=LOG_BACKUPS).rev() {
            let from = backup_path(path, index);
            if from.exists() {
                let to = backup_path(path, index + 1);
                fs::rename(&from, &to).map_err(|e| FixtureError::io(&from, e))?;
            }
        }
        fs::rename(path, backup_path(path, 1)).map_err(|e| FixtureError::io(path, e))?;
    }

    File::create(path).map_err(|e| FixtureError::io(path, e))
}

fn backup_path(path: &Path, index: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}
