//! The capability the embedding application supplies.
//!
//! Brokers that only provision synchronously ignore `async_allowed`; brokers
//! that require async answer `ERR_ASYNC_REQUIRED` when it is false.
//! Idempotency is the broker's call: repeated identical requests report
//! `already_exists`, conflicting ones fail with a structured failure.

use async_trait::async_trait;

use super::catalog::Service;
use super::context::RequestContext;
use super::details::{
    BindDetails, DeprovisionDetails, PollDetails, ProvisionDetails, UnbindDetails, UpdateDetails,
};
use super::specs::{
    Binding, DeprovisionServiceSpec, GetBindingSpec, GetInstanceDetailsSpec, LastOperation,
    ProvisionedServiceSpec, UnbindSpec, UpdateServiceSpec,
};
use crate::error::BrokerError;

pub type BrokerResult<T> = Result<T, BrokerError>;

#[async_trait]
pub trait ServiceBroker: Send + Sync + 'static {
    async fn services(&self, ctx: &RequestContext) -> BrokerResult<Vec<Service>>;

    async fn provision(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: ProvisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<ProvisionedServiceSpec>;

    async fn deprovision(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: DeprovisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<DeprovisionServiceSpec>;

    async fn get_instance(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
    ) -> BrokerResult<GetInstanceDetailsSpec>;

    async fn update(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: UpdateDetails,
        async_allowed: bool,
    ) -> BrokerResult<UpdateServiceSpec>;

    async fn last_operation(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation>;

    async fn bind(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: BindDetails,
        async_allowed: bool,
    ) -> BrokerResult<Binding>;

    async fn unbind(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: UnbindDetails,
        async_allowed: bool,
    ) -> BrokerResult<UnbindSpec>;

    async fn get_binding(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
    ) -> BrokerResult<GetBindingSpec>;

    async fn last_binding_operation(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation>;
}
