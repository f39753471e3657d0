// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed resources of the machine controller manager API.

pub mod machine;

pub use machine::{Machine, MachineClass, MachineDeployment};
