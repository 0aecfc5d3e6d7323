/*
 * Responsibility
 * - Response bodies of the v2 endpoints
 * - Empty strings/collections are omitted, matching what platforms expect
 */
use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    Binding, ExperimentalVolumeMount, GetBindingSpec, InstanceMetadata, LastOperation,
    LastOperationState, Service, VolumeMount,
};

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub services: Vec<Service>,
}

#[derive(Debug, Default, Serialize)]
pub struct ProvisioningResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dashboard_url: String,
    #[serde(rename = "operation", skip_serializing_if = "String::is_empty")]
    pub operation_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<InstanceMetadata>,
}

#[derive(Debug, Serialize)]
pub struct GetInstanceResponse {
    pub service_id: String,
    pub plan_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dashboard_url: String,
    pub parameters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<InstanceMetadata>,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dashboard_url: String,
    #[serde(rename = "operation", skip_serializing_if = "String::is_empty")]
    pub operation_data: String,
}

/// `{"operation": ...}` envelope of async deprovision, bind and unbind.
#[derive(Debug, Default, Serialize)]
pub struct OperationResponse {
    #[serde(rename = "operation", skip_serializing_if = "String::is_empty")]
    pub operation_data: String,
}

#[derive(Debug, Serialize)]
pub struct LastOperationResponse {
    pub state: LastOperationState,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl From<LastOperation> for LastOperationResponse {
    fn from(op: LastOperation) -> Self {
        Self {
            state: op.state,
            description: op.description,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct BindingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub syslog_drain_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route_service_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub backup_agent_url: String,
}

impl From<Binding> for BindingResponse {
    fn from(b: Binding) -> Self {
        Self {
            credentials: b.credentials,
            syslog_drain_url: b.syslog_drain_url,
            route_service_url: b.route_service_url,
            volume_mounts: b.volume_mounts,
            backup_agent_url: b.backup_agent_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetBindingResponse {
    #[serde(flatten)]
    pub binding: BindingResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl From<GetBindingSpec> for GetBindingResponse {
    fn from(spec: GetBindingSpec) -> Self {
        Self {
            binding: BindingResponse {
                credentials: spec.credentials,
                syslog_drain_url: spec.syslog_drain_url,
                route_service_url: spec.route_service_url,
                volume_mounts: spec.volume_mounts,
                backup_agent_url: String::new(),
            },
            parameters: spec.parameters,
        }
    }
}

/// Bind response for callers pinned to API 2.8 / 2.9.
#[derive(Debug, Serialize)]
pub struct ExperimentalVolumeMountBindingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub syslog_drain_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route_service_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<ExperimentalVolumeMount>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub backup_agent_url: String,
}

impl ExperimentalVolumeMountBindingResponse {
    pub fn from_binding(b: Binding) -> Result<Self, serde_json::Error> {
        let volume_mounts = b
            .volume_mounts
            .iter()
            .map(ExperimentalVolumeMount::from_mount)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            credentials: b.credentials,
            syslog_drain_url: b.syslog_drain_url,
            route_service_url: b.route_service_url,
            volume_mounts,
            backup_agent_url: b.backup_agent_url,
        })
    }
}
