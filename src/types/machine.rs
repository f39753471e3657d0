// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::machine::{GROUP, VERSION};
use k8s_openapi::api::core::v1::SecretReference;
use k8s_openapi::NamespaceResourceScope;
use kube::api::ObjectMeta;
use kube::core::TypeMeta;
use kube::{CustomResource, Resource};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Provider specific template a Machine is created from.
///
/// MachineClass carries its fields at the top level instead of under `spec`,
/// so it implements `Resource` by hand rather than through `CustomResource`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MachineClass {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_spec: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_secret_ref: Option<SecretReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_template: Option<serde_json::Value>,
}

impl Resource for MachineClass {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "MachineClass".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "machineclasses".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "machine.sapcloud.io", version = "v1alpha1", kind = "Machine")]
#[kube(namespaced)]
#[kube(status = "MachineStatus")]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassSpec>,
    #[serde(rename = "providerID", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_template: Option<serde_json::Value>,
}

/// Reference from a Machine to the MachineClass it is built from
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct ClassSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<CurrentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_active: Option<bool>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "machine.sapcloud.io", version = "v1alpha1", kind = "MachineDeployment")]
#[kube(namespaced)]
#[kube(status = "MachineDeploymentStatus")]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<MachineSelector>,
    #[serde(default)]
    pub template: MachineTemplateSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ready_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct MachineTemplateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MachineTemplateMeta>,
    #[serde(default)]
    pub spec: MachineSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct MachineTemplateMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_replicas: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_class_api_coordinates() {
        assert_eq!(MachineClass::api_version(&()), "machine.sapcloud.io/v1alpha1");
        assert_eq!(MachineClass::plural(&()), "machineclasses");
    }

    #[test]
    fn test_machine_api_coordinates() {
        assert_eq!(Machine::api_version(&()), "machine.sapcloud.io/v1alpha1");
        assert_eq!(Machine::plural(&()), "machines");
        assert_eq!(MachineDeployment::kind(&()), "MachineDeployment");
        assert_eq!(MachineDeployment::plural(&()), "machinedeployments");
    }

    #[test]
    fn test_machine_class_top_level_fields() {
        let yaml = r#"
apiVersion: machine.sapcloud.io/v1alpha1
kind: MachineClass
metadata:
  name: test-mc
  namespace: default
provider: local
providerSpec:
  image: kindest/node:v1.30.0
secretRef:
  name: test-secret
  namespace: default
"#;
        let class: MachineClass = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(class.metadata.name.as_deref(), Some("test-mc"));
        assert_eq!(class.provider.as_deref(), Some("local"));
        assert_eq!(
            class.provider_spec.unwrap()["image"],
            serde_json::json!("kindest/node:v1.30.0")
        );
        assert_eq!(class.secret_ref.unwrap().name.as_deref(), Some("test-secret"));
        assert_eq!(class.types.unwrap().kind, "MachineClass");
    }

    #[test]
    fn test_machine_deployment_template() {
        let yaml = r#"
apiVersion: machine.sapcloud.io/v1alpha1
kind: MachineDeployment
metadata:
  name: test-md
spec:
  replicas: 3
  selector:
    matchLabels:
      name: test-machine
  template:
    metadata:
      labels:
        name: test-machine
    spec:
      class:
        kind: MachineClass
        name: test-mc
"#;
        let deployment: MachineDeployment = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(deployment.spec.replicas, Some(3));
        let class = deployment.spec.template.spec.class.unwrap();
        assert_eq!(class.name, "test-mc");
        assert_eq!(class.kind.as_deref(), Some("MachineClass"));
        assert!(deployment.status.is_none());
    }
}
