//! Open Service Broker API protocol layer.
//!
//! Plug a [`ServiceBroker`] into [`api::router`] (or run it standalone with
//! [`app::run`]) and this crate handles version negotiation, authentication,
//! request validation, status-code mapping and the error contract.
//!
//! ```ignore
//! let state = AppState::new(Arc::new(MyBroker), BrokerLogger::default(), &credentials);
//! let app = brokerapi::api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod state;

pub use config::BrokerCredentials;
pub use domain::ServiceBroker;
pub use error::{BrokerError, FailureResponse};
pub use logging::BrokerLogger;
pub use state::AppState;
