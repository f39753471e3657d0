// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster access: API handle, client creation, CRD establishment and namespaces.

pub mod client;
pub mod cluster;
pub mod crd;
pub mod namespaces;

pub use client::create_client;
pub use cluster::{ClusterApi, ClusterHandle};
pub use crd::{wait_for_established, ConflictPolicy, PollConfig};
pub use namespaces::ensure_namespace_exists;
