#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use brokerapi::{
    AppState, BrokerCredentials, BrokerError, BrokerLogger, api,
    domain::{
        BindDetails, Binding, BrokerResult, DeprovisionDetails, DeprovisionServiceSpec,
        GetBindingSpec, GetInstanceDetailsSpec, InstanceMetadata, LastOperation, MaintenanceInfo,
        LastOperationState, PollDetails, ProvisionDetails, ProvisionedServiceSpec,
        RequestContext, Service, ServiceBroker, ServicePlan, UnbindDetails, UnbindSpec,
        UpdateDetails, UpdateServiceSpec,
    },
    error::{ERR_BINDING_DOES_NOT_EXIST, ERR_INSTANCE_ALREADY_EXISTS, ERR_INSTANCE_DOES_NOT_EXIST},
};

pub const USERNAME: &str = "broker-user";
pub const PASSWORD: &str = "broker-pass";
pub const SERVICE_ID: &str = "svc-1";
pub const PLAN_ID: &str = "plan-1";
pub const MAINTAINED_PLAN_ID: &str = "plan-maintained";

/// In-memory broker whose behaviour tests can script.
#[derive(Default)]
pub struct FakeBroker {
    pub inner: Mutex<FakeState>,
}

#[derive(Default)]
pub struct FakeState {
    pub instances: HashMap<String, ProvisionDetails>,
    pub bindings: HashMap<String, BindDetails>,
    pub next_error: Option<BrokerError>,
    pub catalog_unavailable: bool,

    pub async_operations: bool,
    pub dashboard_url: String,
    pub operation_data: String,
    pub metadata: InstanceMetadata,
    pub credentials: Option<Value>,
    pub volume_mounts: Vec<brokerapi::domain::VolumeMount>,
    pub last_operation_state: Option<LastOperationState>,

    pub last_async_allowed: Option<bool>,
    pub last_ctx: Option<RequestContext>,
    pub last_poll: Option<PollDetails>,
    pub last_deprovision: Option<DeprovisionDetails>,
    pub last_update: Option<UpdateDetails>,
}

impl FakeBroker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut guard = self.inner.lock().unwrap();
        f(&mut guard)
    }

    pub fn fail_next(&self, err: impl Into<BrokerError>) {
        self.with(|s| s.next_error = Some(err.into()));
    }

    fn record(&self, ctx: &RequestContext, async_allowed: Option<bool>) -> BrokerResult<()> {
        self.with(|s| {
            s.last_ctx = Some(ctx.clone());
            s.last_async_allowed = async_allowed;
            match s.next_error.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }
}

pub fn catalog() -> Vec<Service> {
    vec![Service {
        id: SERVICE_ID.into(),
        name: "fake-db".into(),
        description: "a fake database".into(),
        bindable: true,
        plans: vec![
            ServicePlan {
                id: PLAN_ID.into(),
                name: "small".into(),
                description: "small plan".into(),
                ..Default::default()
            },
            ServicePlan {
                id: MAINTAINED_PLAN_ID.into(),
                name: "maintained".into(),
                description: "plan with maintenance info".into(),
                maintenance_info: Some(MaintenanceInfo {
                    version: "2.0.0".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ],
        ..Default::default()
    }]
}

#[async_trait]
impl ServiceBroker for FakeBroker {
    async fn services(&self, _ctx: &RequestContext) -> BrokerResult<Vec<Service>> {
        if self.with(|s| s.catalog_unavailable) {
            return Err(BrokerError::unknown("catalog backend unavailable"));
        }
        Ok(catalog())
    }

    async fn provision(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: ProvisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<ProvisionedServiceSpec> {
        self.record(ctx, Some(async_allowed))?;
        self.with(|s| {
            if let Some(existing) = s.instances.get(instance_id) {
                if *existing == details {
                    return Ok(ProvisionedServiceSpec {
                        already_exists: true,
                        dashboard_url: s.dashboard_url.clone(),
                        ..Default::default()
                    });
                }
                return Err(ERR_INSTANCE_ALREADY_EXISTS.into());
            }
            s.instances.insert(instance_id.to_string(), details);
            Ok(ProvisionedServiceSpec {
                is_async: async_allowed && s.async_operations,
                already_exists: false,
                dashboard_url: s.dashboard_url.clone(),
                operation_data: s.operation_data.clone(),
                metadata: s.metadata.clone(),
            })
        })
    }

    async fn deprovision(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: DeprovisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<DeprovisionServiceSpec> {
        self.record(ctx, Some(async_allowed))?;
        self.with(|s| {
            s.last_deprovision = Some(details);
            if s.instances.remove(instance_id).is_none() {
                return Err(ERR_INSTANCE_DOES_NOT_EXIST.into());
            }
            Ok(DeprovisionServiceSpec {
                is_async: async_allowed && s.async_operations,
                operation_data: s.operation_data.clone(),
            })
        })
    }

    async fn get_instance(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
    ) -> BrokerResult<GetInstanceDetailsSpec> {
        self.record(ctx, None)?;
        self.with(|s| {
            let details = s
                .instances
                .get(instance_id)
                .ok_or(ERR_INSTANCE_DOES_NOT_EXIST)?;
            Ok(GetInstanceDetailsSpec {
                service_id: details.service_id.clone(),
                plan_id: details.plan_id.clone(),
                dashboard_url: s.dashboard_url.clone(),
                parameters: details.parameters.clone(),
                metadata: s.metadata.clone(),
            })
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: UpdateDetails,
        async_allowed: bool,
    ) -> BrokerResult<UpdateServiceSpec> {
        self.record(ctx, Some(async_allowed))?;
        self.with(|s| {
            s.last_update = Some(details);
            Ok(UpdateServiceSpec {
                is_async: async_allowed && s.async_operations,
                dashboard_url: s.dashboard_url.clone(),
                operation_data: s.operation_data.clone(),
            })
        })
    }

    async fn last_operation(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation> {
        self.record(ctx, None)?;
        self.with(|s| {
            s.last_poll = Some(details);
            Ok(LastOperation {
                state: s.last_operation_state.unwrap_or(LastOperationState::InProgress),
                description: "working on it".into(),
            })
        })
    }

    async fn bind(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: BindDetails,
        async_allowed: bool,
    ) -> BrokerResult<Binding> {
        self.record(ctx, Some(async_allowed))?;
        self.with(|s| {
            if !s.instances.contains_key(instance_id) {
                return Err(ERR_INSTANCE_DOES_NOT_EXIST.into());
            }
            if let Some(existing) = s.bindings.get(binding_id) {
                if *existing == details {
                    return Ok(Binding {
                        already_exists: true,
                        credentials: s.credentials.clone(),
                        volume_mounts: s.volume_mounts.clone(),
                        ..Default::default()
                    });
                }
                return Err(brokerapi::error::ERR_BINDING_ALREADY_EXISTS.into());
            }
            s.bindings.insert(binding_id.to_string(), details);
            Ok(Binding {
                is_async: async_allowed && s.async_operations,
                operation_data: s.operation_data.clone(),
                credentials: s.credentials.clone(),
                volume_mounts: s.volume_mounts.clone(),
                ..Default::default()
            })
        })
    }

    async fn unbind(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        binding_id: &str,
        _details: UnbindDetails,
        async_allowed: bool,
    ) -> BrokerResult<UnbindSpec> {
        self.record(ctx, Some(async_allowed))?;
        self.with(|s| {
            if s.bindings.remove(binding_id).is_none() {
                return Err(ERR_BINDING_DOES_NOT_EXIST.into());
            }
            Ok(UnbindSpec {
                is_async: async_allowed && s.async_operations,
                operation_data: s.operation_data.clone(),
            })
        })
    }

    async fn get_binding(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        binding_id: &str,
    ) -> BrokerResult<GetBindingSpec> {
        self.record(ctx, None)?;
        self.with(|s| {
            let details = s
                .bindings
                .get(binding_id)
                .ok_or(brokerapi::error::ERR_BINDING_NOT_FOUND)?;
            Ok(GetBindingSpec {
                credentials: s.credentials.clone(),
                parameters: details.parameters.clone(),
                ..Default::default()
            })
        })
    }

    async fn last_binding_operation(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation> {
        self.record(ctx, None)?;
        self.with(|s| {
            s.last_poll = Some(details);
            Ok(LastOperation {
                state: s.last_operation_state.unwrap_or(LastOperationState::Succeeded),
                description: String::new(),
            })
        })
    }
}

pub fn app(broker: Arc<FakeBroker>) -> Router {
    let state = AppState::new(
        broker,
        BrokerLogger::new("brokerapi-test"),
        &[BrokerCredentials::new(USERNAME, PASSWORD)],
    );
    api::router(state)
}

pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

/// Authenticated request speaking the given API version.
pub fn request(method: &str, uri: &str, version: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(USERNAME, PASSWORD))
        .header("X-Broker-API-Version", version)
}

pub fn json_body(value: Value) -> Body {
    Body::from(value.to_string())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        body,
        text,
    }
}

pub fn provision_body() -> Value {
    serde_json::json!({
        "service_id": SERVICE_ID,
        "plan_id": PLAN_ID,
        "organization_guid": "org",
        "space_guid": "space",
    })
}

pub async fn provision(app: &Router, instance_id: &str) -> TestResponse {
    send(
        app,
        request("PUT", &format!("/v2/service_instances/{instance_id}"), "2.14")
            .header(header::CONTENT_TYPE, "application/json")
            .body(json_body(provision_body()))
            .unwrap(),
    )
    .await
}
