// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Line separating documents in a multi-document manifest
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Machine controller manager API group
pub mod machine {
    pub const GROUP: &str = "machine.sapcloud.io";
    pub const VERSION: &str = "v1alpha1";
}

/// CRD establishment polling configuration
pub mod crd {
    /// Default delay between two status checks, in milliseconds
    pub const POLL_INTERVAL_MILLIS: u64 = 500;
    /// Default budget for a CRD to become established, in seconds
    pub const POLL_TIMEOUT_SECS: u64 = 60;

    pub const ESTABLISHED: &str = "Established";
    pub const NAMES_ACCEPTED: &str = "NamesAccepted";
}

/// Number of numbered backups kept when rotating a log file
pub const LOG_BACKUPS: u32 = 9;

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "default";
