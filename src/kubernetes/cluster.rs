// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access to the cluster APIs fixtures are created through

use crate::error::Result;
use crate::types::{Machine, MachineClass, MachineDeployment};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::NamespaceResourceScope;
use kube::{api::PostParams, Api, Client, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, instrument};

/// The create and get calls the applier needs, one per dispatched kind.
///
/// Covers three logically distinct APIs: apiextensions for CRDs, apps/v1 for
/// workloads and the machine API for machine classes, machines and machine
/// deployments.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn create_crd(&self, crd: &CustomResourceDefinition) -> Result<()>;

    async fn get_crd(&self, name: &str) -> Result<CustomResourceDefinition>;

    async fn create_deployment(&self, namespace: &str, deployment: &Deployment) -> Result<()>;

    async fn create_machine_class(&self, namespace: &str, class: &MachineClass) -> Result<()>;

    async fn create_machine(&self, namespace: &str, machine: &Machine) -> Result<()>;

    async fn create_machine_deployment(
        &self,
        namespace: &str,
        deployment: &MachineDeployment,
    ) -> Result<()>;
}

/// Cluster access backed by a kube client.
///
/// The handle is owned by the test session; the applier only borrows it.
#[derive(Clone)]
pub struct ClusterHandle {
    client: Client,
}

impl ClusterHandle {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

async fn create_namespaced<K>(client: &Client, namespace: &str, object: &K) -> Result<()>
where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned,
{
    let api: Api<K> = Api::namespaced(client.clone(), namespace);
    api.create(&PostParams::default(), object).await?;
    debug!(
        "Created {} {}/{}",
        K::kind(&()),
        namespace,
        object.name_any()
    );
    Ok(())
}

#[async_trait]
impl ClusterApi for ClusterHandle {
    #[instrument(skip(self, crd), fields(crd = %crd.name_any()))]
    async fn create_crd(&self, crd: &CustomResourceDefinition) -> Result<()> {
        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        crds.create(&PostParams::default(), crd).await?;
        debug!("Created CRD {}", crd.name_any());
        Ok(())
    }

    async fn get_crd(&self, name: &str) -> Result<CustomResourceDefinition> {
        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        Ok(crds.get(name).await?)
    }

    #[instrument(skip(self, deployment), fields(deployment = %deployment.name_any()))]
    async fn create_deployment(&self, namespace: &str, deployment: &Deployment) -> Result<()> {
        create_namespaced(&self.client, namespace, deployment).await
    }

    #[instrument(skip(self, class), fields(machine_class = %class.name_any()))]
    async fn create_machine_class(&self, namespace: &str, class: &MachineClass) -> Result<()> {
        create_namespaced(&self.client, namespace, class).await
    }

    #[instrument(skip(self, machine), fields(machine = %machine.name_any()))]
    async fn create_machine(&self, namespace: &str, machine: &Machine) -> Result<()> {
        create_namespaced(&self.client, namespace, machine).await
    }

    #[instrument(skip(self, deployment), fields(machine_deployment = %deployment.name_any()))]
    async fn create_machine_deployment(
        &self,
        namespace: &str,
        deployment: &MachineDeployment,
    ) -> Result<()> {
        create_namespaced(&self.client, namespace, deployment).await
    }
}
