// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::error::{FixtureError, Result};
use crate::kubernetes::ClusterApi;
use crate::types::{Machine, MachineClass, MachineDeployment};
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, CustomResourceDefinitionCondition, CustomResourceDefinitionStatus,
};
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::{Client, ResourceExt};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("POST".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Method and path of every request seen so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);
        self.requests.lock().unwrap().push((method, path.clone()));

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a 409 already exists response
pub fn already_exists_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" already exists", resource, name),
        "reason": "AlreadyExists",
        "code": 409
    })
    .to_string()
}

/// Build a CRD for `name` carrying the given (type, status) conditions
pub fn make_crd(name: &str, conditions: &[(&str, &str)]) -> CustomResourceDefinition {
    let status = (!conditions.is_empty()).then(|| CustomResourceDefinitionStatus {
        conditions: Some(
            conditions
                .iter()
                .map(|(type_, status)| CustomResourceDefinitionCondition {
                    type_: type_.to_string(),
                    status: status.to_string(),
                    reason: (*status == "False").then(|| format!("{}Failed", type_)),
                    ..Default::default()
                })
                .collect(),
        ),
        ..Default::default()
    });

    CustomResourceDefinition {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        status,
        ..Default::default()
    }
}

/// Create a mock CRD JSON response
pub fn crd_json(name: &str, conditions: &[(&str, &str)]) -> String {
    serde_json::to_string(&make_crd(name, conditions)).unwrap()
}

fn api_error(code: u16) -> FixtureError {
    let reason = if code == 409 { "AlreadyExists" } else { "InternalError" };
    FixtureError::KubeError(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("mock failure {}", code),
        reason: reason.to_string(),
        code,
    }))
}

/// Status a [`SpyCluster`] reports for its CRD
#[derive(Debug, Clone)]
pub enum CrdResponse {
    Pending,
    Established,
    Conflict(String),
    Error,
}

/// A [`ClusterApi`] that records every call instead of talking to a cluster.
///
/// CRD responses are served in order; the last one repeats.
#[derive(Default)]
pub struct SpyCluster {
    calls: Mutex<Vec<String>>,
    crd_responses: Mutex<VecDeque<CrdResponse>>,
    create_failures: HashMap<String, u16>,
}

impl SpyCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crd_responses(self, responses: impl IntoIterator<Item = CrdResponse>) -> Self {
        self.crd_responses.lock().unwrap().extend(responses);
        self
    }

    /// Make the named create call fail with an API error of the given code
    pub fn fail_create(mut self, call: &str, code: u16) -> Self {
        self.create_failures.insert(call.to_string(), code);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_named(&self, call: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(call))
            .count()
    }

    fn record(&self, call: &str, target: String) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", call, target));
        match self.create_failures.get(call) {
            Some(code) => Err(api_error(*code)),
            None => Ok(()),
        }
    }

    fn next_crd_response(&self) -> CrdResponse {
        let mut responses = self.crd_responses.lock().unwrap();
        if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses.front().cloned().unwrap_or(CrdResponse::Pending)
        }
    }
}

#[async_trait]
impl ClusterApi for SpyCluster {
    async fn create_crd(&self, crd: &CustomResourceDefinition) -> Result<()> {
        self.record("create_crd", crd.name_any())
    }

    async fn get_crd(&self, name: &str) -> Result<CustomResourceDefinition> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("get_crd {}", name));
        match self.next_crd_response() {
            CrdResponse::Pending => Ok(make_crd(name, &[("Established", "False")])),
            CrdResponse::Established => Ok(make_crd(
                name,
                &[("NamesAccepted", "True"), ("Established", "True")],
            )),
            CrdResponse::Conflict(reason) => {
                let mut crd = make_crd(name, &[("NamesAccepted", "False")]);
                if let Some(conditions) = crd.status.as_mut().and_then(|s| s.conditions.as_mut()) {
                    conditions[0].reason = Some(reason);
                }
                Ok(crd)
            }
            CrdResponse::Error => Err(api_error(500)),
        }
    }

    async fn create_deployment(&self, namespace: &str, deployment: &Deployment) -> Result<()> {
        self.record(
            "create_deployment",
            format!("{}/{}", namespace, deployment.name_any()),
        )
    }

    async fn create_machine_class(&self, namespace: &str, class: &MachineClass) -> Result<()> {
        self.record(
            "create_machine_class",
            format!("{}/{}", namespace, class.name_any()),
        )
    }

    async fn create_machine(&self, namespace: &str, machine: &Machine) -> Result<()> {
        self.record(
            "create_machine",
            format!("{}/{}", namespace, machine.name_any()),
        )
    }

    async fn create_machine_deployment(
        &self,
        namespace: &str,
        deployment: &MachineDeployment,
    ) -> Result<()> {
        self.record(
            "create_machine_deployment",
            format!("{}/{}", namespace, deployment.name_any()),
        )
    }
}
