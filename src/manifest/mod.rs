// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest splitting and decoding into typed resources.

pub mod decoder;
pub mod kind;

pub use decoder::{
    decode_file, decode_manifest, split_documents, DecodeFailure, DecodeReport, SkippedDocument,
};
pub use kind::{ApiFamily, DecodedResource, Resource, ResourceKind};
