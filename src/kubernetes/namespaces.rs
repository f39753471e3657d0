// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management utilities

use crate::error::{FixtureError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

/// Make sure `namespace` exists before fixtures are created in it.
///
/// A namespace created by someone else between the lookup and the create is
/// accepted as present.
#[instrument(skip(client))]
pub async fn ensure_namespace_exists(client: &Client, namespace: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let existing = namespaces.get_opt(namespace).await.map_err(|e| {
        FixtureError::NamespaceError(format!("Failed to look up namespace {}: {}", namespace, e))
    })?;
    if existing.is_some() {
        debug!("Fixture namespace {} is present", namespace);
        return Ok(());
    }

    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    match namespaces
        .create(&PostParams::default(), &ns)
        .await
        .map_err(FixtureError::from)
    {
        Ok(_) => info!("Created fixture namespace {}", namespace),
        Err(e) if e.is_already_exists() => {
            debug!("Fixture namespace {} appeared concurrently", namespace)
        }
        Err(e) => return Err(e),
    }
    Ok(())
}
