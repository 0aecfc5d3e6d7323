/*
 * Responsibility
 * - Request-scoped data handed to every broker call
 * - Assembled by the middleware chain + extractor, enriched by validation
 *   with the resolved catalog entry, dropped when the response is written
 */
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use super::catalog::{Service, ServicePlan};
use super::version::ApiVersion;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub correlation_id: String,
    pub request_identity: Option<String>,
    /// Raw `X-Broker-API-Originating-Identity` header.
    pub originating_identity: Option<String>,
    pub info_location: Option<String>,
    pub api_version: Option<ApiVersion>,
    pub service: Option<Service>,
    pub plan: Option<ServicePlan>,
}

/// Decoded originating identity: `<platform> <base64(json)>`.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginatingIdentity {
    pub platform: String,
    pub value: Value,
}

impl RequestContext {
    pub fn with_catalog_entry(mut self, service: Service, plan: ServicePlan) -> Self {
        self.service = Some(service);
        self.plan = Some(plan);
        self
    }

    /// Parses the originating identity header, if present and well formed.
    pub fn originating_identity(&self) -> Option<OriginatingIdentity> {
        let raw = self.originating_identity.as_deref()?;
        let (platform, encoded) = raw.trim().split_once(' ')?;
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let value = serde_json::from_slice(&decoded).ok()?;
        Some(OriginatingIdentity {
            platform: platform.to_string(),
            value,
        })
    }
}
