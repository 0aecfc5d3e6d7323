/*
 * Responsibility
 * - Protocol data model and the ServiceBroker capability
 * - No HTTP here: handlers translate to/from these types
 */
mod broker;
mod catalog;
mod context;
mod details;
mod specs;
mod version;

pub use broker::{BrokerResult, ServiceBroker};
pub use catalog::*;
pub use context::{OriginatingIdentity, RequestContext};
pub use details::*;
pub use specs::*;
pub use version::{ApiVersion, MIN_FETCH_MINOR, SUPPORTED_MAJOR, VERSION_HEADER, VersionError};
