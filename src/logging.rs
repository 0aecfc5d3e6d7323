//! Per-request structured logging.
//!
//! `BrokerLogger` is created once and handed to `AppState`; each request
//! derives its own `Session`, a child span carrying the identifiers every log
//! line of that request needs. Action keys are `<session>.<action>`, e.g.
//! `provision.instance-already-exists`.

use std::fmt;

use tracing::{Span, field};

use crate::domain::RequestContext;

#[derive(Debug, Clone)]
pub struct BrokerLogger {
    component: &'static str,
}

impl BrokerLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn session(&self, name: &'static str, ctx: &RequestContext) -> Session {
        self.bare_session(
            name,
            Some(ctx.correlation_id.as_str()),
            ctx.request_identity.clone(),
        )
    }

    /// Session for code running before the request context is assembled.
    pub fn bare_session(
        &self,
        name: &'static str,
        correlation_id: Option<&str>,
        request_identity: Option<String>,
    ) -> Session {
        let span = tracing::info_span!(
            "broker_session",
            component = self.component,
            session = name,
            instance_id = field::Empty,
            binding_id = field::Empty,
            correlation_id = field::Empty,
            request_identity = field::Empty,
        );
        if let Some(id) = correlation_id {
            span.record("correlation_id", id);
        }
        if let Some(identity) = request_identity.as_deref() {
            span.record("request_identity", identity);
        }
        Session {
            name,
            span,
            request_identity,
        }
    }
}

impl Default for BrokerLogger {
    fn default() -> Self {
        Self::new("brokerapi")
    }
}

#[derive(Debug)]
pub struct Session {
    name: &'static str,
    span: Span,
    request_identity: Option<String>,
}

impl Session {
    pub fn with_instance(self, instance_id: &str) -> Self {
        self.span.record("instance_id", instance_id);
        self
    }

    pub fn with_binding(self, binding_id: &str) -> Self {
        self.span.record("binding_id", binding_id);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn request_identity(&self) -> Option<&str> {
        self.request_identity.as_deref()
    }

    pub fn action(&self, action: &str) -> String {
        format!("{}.{}", self.name, action)
    }

    pub fn error(&self, action: &str, err: &dyn fmt::Display) {
        tracing::error!(parent: &self.span, action = %self.action(action), error = %err);
    }

    pub fn info(&self, action: &str) {
        tracing::info!(parent: &self.span, action = %self.action(action));
    }
}
