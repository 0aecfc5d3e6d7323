//! Catalog types returned by `GET /v2/catalog`.
//!
//! The broker supplies these on every catalog/provision call; nothing here is
//! cached across requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub bindable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub instances_retrievable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bindings_retrievable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "plan_updateable", default)]
    pub plan_updatable: bool,
    pub plans: Vec<ServicePlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequiredPermission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ServiceMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_client: Option<ServiceDashboardClient>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_context_updates: bool,
}

impl Service {
    /// Looks up a plan of this service by id.
    pub fn plan(&self, plan_id: &str) -> Option<&ServicePlan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPermission {
    SyslogDrain,
    RouteForwarding,
    VolumeMount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDashboardClient {
    pub id: String,
    pub secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ServicePlanMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<ServiceSchemas>,
    #[serde(
        rename = "plan_updateable",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plan_updatable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_polling_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

/// Display metadata for a service. Keys not modelled here survive in
/// `additional` and are flattened back into the JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    #[serde(rename = "displayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(rename = "longDescription", default, skip_serializing_if = "String::is_empty")]
    pub long_description: String,
    #[serde(
        rename = "providerDisplayName",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub provider_display_name: String,
    #[serde(rename = "documentationUrl", default, skip_serializing_if = "String::is_empty")]
    pub documentation_url: String,
    #[serde(rename = "supportUrl", default, skip_serializing_if = "String::is_empty")]
    pub support_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePlanMetadata {
    #[serde(rename = "displayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub costs: Vec<ServicePlanCost>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePlanCost {
    pub amount: HashMap<String, f64>,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchemas {
    #[serde(rename = "service_instance", default)]
    pub instance: ServiceInstanceSchema,
    #[serde(rename = "service_binding", default)]
    pub binding: ServiceBindingSchema,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceSchema {
    #[serde(default)]
    pub create: Schema,
    #[serde(default)]
    pub update: Schema,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceBindingSchema {
    #[serde(default)]
    pub create: Schema,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceInfo {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub public: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_updatable_uses_wire_spelling() {
        let service = Service {
            id: "svc".into(),
            name: "db".into(),
            plan_updatable: true,
            ..Default::default()
        };
        let v = serde_json::to_value(&service).unwrap();
        assert_eq!(v["plan_updateable"], json!(true));
        assert!(v.get("tags").is_none());
        assert!(v.get("metadata").is_none());
    }

    #[test]
    fn additional_metadata_is_flattened() {
        let mut additional = Map::new();
        additional.insert("costs_url".into(), json!("https://example.com"));
        let metadata = ServiceMetadata {
            display_name: "Database".into(),
            additional,
            ..Default::default()
        };
        let v = serde_json::to_value(&metadata).unwrap();
        assert_eq!(v, json!({"displayName": "Database", "costs_url": "https://example.com"}));
    }

    #[test]
    fn finds_plan_by_id() {
        let service = Service {
            plans: vec![ServicePlan {
                id: "small".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(service.plan("small").is_some());
        assert!(service.plan("large").is_none());
    }
}
