// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kinds understood by the manifest decoder

use crate::types::{Machine, MachineClass, MachineDeployment};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::ServiceAccount;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::ObjectMeta;
use kube::core::GroupVersionKind;
use kube::Resource as KubeResource;
use std::borrow::Cow;
use std::fmt;

/// API family a kind is decoded and served through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    /// apiextensions.k8s.io
    Extension,
    /// Built-in core, rbac and apps groups
    Core,
    /// machine.sapcloud.io
    Machine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Role,
    ClusterRole,
    RoleBinding,
    ClusterRoleBinding,
    ServiceAccount,
    CustomResourceDefinition,
    Deployment,
    MachineClass,
    Machine,
    MachineDeployment,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Role,
        ResourceKind::ClusterRole,
        ResourceKind::RoleBinding,
        ResourceKind::ClusterRoleBinding,
        ResourceKind::ServiceAccount,
        ResourceKind::CustomResourceDefinition,
        ResourceKind::Deployment,
        ResourceKind::MachineClass,
        ResourceKind::Machine,
        ResourceKind::MachineDeployment,
    ];

    /// Look up a kind by the exact value of a document's `kind` field
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Role => "Role",
            ResourceKind::ClusterRole => "ClusterRole",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBinding",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::CustomResourceDefinition => "CustomResourceDefinition",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::MachineClass => "MachineClass",
            ResourceKind::Machine => "Machine",
            ResourceKind::MachineDeployment => "MachineDeployment",
        }
    }

    pub fn family(&self) -> ApiFamily {
        match self {
            ResourceKind::CustomResourceDefinition => ApiFamily::Extension,
            ResourceKind::MachineClass
            | ResourceKind::Machine
            | ResourceKind::MachineDeployment => ApiFamily::Machine,
            _ => ApiFamily::Core,
        }
    }

    /// The apiVersion a document of this kind must declare
    pub fn api_version(&self) -> Cow<'static, str> {
        match self {
            ResourceKind::Role => api_version_of::<Role>(),
            ResourceKind::ClusterRole => api_version_of::<ClusterRole>(),
            ResourceKind::RoleBinding => api_version_of::<RoleBinding>(),
            ResourceKind::ClusterRoleBinding => api_version_of::<ClusterRoleBinding>(),
            ResourceKind::ServiceAccount => api_version_of::<ServiceAccount>(),
            ResourceKind::CustomResourceDefinition => api_version_of::<CustomResourceDefinition>(),
            ResourceKind::Deployment => api_version_of::<Deployment>(),
            ResourceKind::MachineClass => api_version_of::<MachineClass>(),
            ResourceKind::Machine => api_version_of::<Machine>(),
            ResourceKind::MachineDeployment => api_version_of::<MachineDeployment>(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn api_version_of<K: KubeResource<DynamicType = ()>>() -> Cow<'static, str> {
    Cow::Owned(K::api_version(&()).into_owned())
}

/// A typed object decoded from a manifest document
#[derive(Debug, Clone)]
pub enum Resource {
    Role(Role),
    ClusterRole(ClusterRole),
    RoleBinding(RoleBinding),
    ClusterRoleBinding(ClusterRoleBinding),
    ServiceAccount(ServiceAccount),
    CustomResourceDefinition(Box<CustomResourceDefinition>),
    Deployment(Box<Deployment>),
    MachineClass(MachineClass),
    Machine(Machine),
    MachineDeployment(MachineDeployment),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Role(_) => ResourceKind::Role,
            Resource::ClusterRole(_) => ResourceKind::ClusterRole,
            Resource::RoleBinding(_) => ResourceKind::RoleBinding,
            Resource::ClusterRoleBinding(_) => ResourceKind::ClusterRoleBinding,
            Resource::ServiceAccount(_) => ResourceKind::ServiceAccount,
            Resource::CustomResourceDefinition(_) => ResourceKind::CustomResourceDefinition,
            Resource::Deployment(_) => ResourceKind::Deployment,
            Resource::MachineClass(_) => ResourceKind::MachineClass,
            Resource::Machine(_) => ResourceKind::Machine,
            Resource::MachineDeployment(_) => ResourceKind::MachineDeployment,
        }
    }

    pub fn meta(&self) -> &ObjectMeta {
        match self {
            Resource::Role(r) => r.meta(),
            Resource::ClusterRole(r) => r.meta(),
            Resource::RoleBinding(r) => r.meta(),
            Resource::ClusterRoleBinding(r) => r.meta(),
            Resource::ServiceAccount(r) => r.meta(),
            Resource::CustomResourceDefinition(r) => r.meta(),
            Resource::Deployment(r) => r.meta(),
            Resource::MachineClass(r) => r.meta(),
            Resource::Machine(r) => r.meta(),
            Resource::MachineDeployment(r) => r.meta(),
        }
    }

    /// Object name, falling back to generateName for generated objects
    pub fn name(&self) -> String {
        let meta = self.meta();
        meta.name
            .clone()
            .or_else(|| meta.generate_name.clone())
            .unwrap_or_default()
    }
}

/// A decoded object together with the group, version and kind it declared
#[derive(Debug, Clone)]
pub struct DecodedResource {
    pub gvk: GroupVersionKind,
    pub resource: Resource,
}

impl DecodedResource {
    pub fn kind(&self) -> ResourceKind {
        self.resource.kind()
    }

    pub fn name(&self) -> String {
        self.resource.name()
    }
}
