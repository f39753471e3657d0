// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Creating decoded fixtures in the cluster, per object, file and directory.

pub mod applier;
pub mod batch;

pub use applier::{Applier, ApplyOutcome, FileReport, ObjectReport};
pub use batch::{BatchPolicy, BatchReport, FileResult};
