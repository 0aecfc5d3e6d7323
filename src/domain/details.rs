/*
 * Responsibility
 * - Request details handed to the broker (decoded body or query string)
 * - Every field defaults so a missing id surfaces as a 400 from validation,
 *   not as a decode failure
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::MaintenanceInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionDetails {
    pub service_id: String,
    pub plan_id: String,
    pub organization_guid: String,
    pub space_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprovisionDetails {
    pub service_id: String,
    pub plan_id: String,
    pub force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateDetails {
    pub service_id: String,
    pub plan_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    pub previous_values: PreviousValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviousValues {
    pub plan_id: String,
    pub service_id: String,
    #[serde(rename = "organization_id")]
    pub org_id: String,
    pub space_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindDetails {
    pub app_guid: String,
    pub plan_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind_resource: Option<BindResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindResource {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub app_guid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub space_guid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub credential_client_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub backup_agent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnbindDetails {
    pub service_id: String,
    pub plan_id: String,
}

/// Query of a last-operation poll. `operation_data` is the opaque token the
/// broker minted on async acceptance, passed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollDetails {
    pub service_id: String,
    pub plan_id: String,
    pub operation_data: String,
}
