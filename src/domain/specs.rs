//! Outcomes reported by the broker for each lifecycle operation.
//!
//! `already_exists` and `is_async` decide the response envelope; the
//! dispatcher never infers either on its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionedServiceSpec {
    pub is_async: bool,
    pub already_exists: bool,
    pub dashboard_url: String,
    pub operation_data: String,
    pub metadata: InstanceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceMetadata {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub labels: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl InstanceMetadata {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.attributes.is_empty()
    }

    /// `None` when empty, so responses omit the key entirely.
    pub fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeprovisionServiceSpec {
    pub is_async: bool,
    pub operation_data: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetInstanceDetailsSpec {
    pub service_id: String,
    pub plan_id: String,
    pub dashboard_url: String,
    pub parameters: Option<Value>,
    pub metadata: InstanceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateServiceSpec {
    pub is_async: bool,
    pub dashboard_url: String,
    pub operation_data: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    pub is_async: bool,
    pub already_exists: bool,
    pub operation_data: String,
    pub credentials: Option<Value>,
    pub syslog_drain_url: String,
    pub route_service_url: String,
    pub backup_agent_url: String,
    pub volume_mounts: Vec<VolumeMount>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetBindingSpec {
    pub credentials: Option<Value>,
    pub syslog_drain_url: String,
    pub route_service_url: String,
    pub volume_mounts: Vec<VolumeMount>,
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnbindSpec {
    pub is_async: bool,
    pub operation_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeMount {
    pub driver: String,
    pub container_dir: String,
    pub mode: String,
    pub device_type: String,
    pub device: SharedDevice,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedDevice {
    pub volume_id: String,
    #[serde(default)]
    pub mount_config: Map<String, Value>,
}

/// Volume-mount encoding used by callers pinned to API 2.8 and 2.9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalVolumeMount {
    pub container_path: String,
    pub mode: String,
    pub private: ExperimentalVolumeMountPrivate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalVolumeMountPrivate {
    pub driver: String,
    pub group_id: String,
    pub config: String,
}

impl ExperimentalVolumeMount {
    pub fn from_mount(mount: &VolumeMount) -> Result<Self, serde_json::Error> {
        Ok(Self {
            container_path: mount.container_dir.clone(),
            mode: mount.mode.clone(),
            private: ExperimentalVolumeMountPrivate {
                driver: mount.driver.clone(),
                group_id: mount.device.volume_id.clone(),
                config: serde_json::to_string(&mount.device.mount_config)?,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastOperation {
    pub state: LastOperationState,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastOperationState {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "succeeded")]
    Succeeded,
    #[serde(rename = "failed")]
    Failed,
}

impl LastOperationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LastOperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
