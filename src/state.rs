/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - broker: the embedding application's ServiceBroker
 *   - logger: root logger every request session derives from
 *   - credentials: accepted Basic auth pairs
 * - Clone is cheap (Arc inside)
 */
use std::fmt;
use std::sync::Arc;

use crate::config::BrokerCredentials;
use crate::domain::ServiceBroker;
use crate::logging::BrokerLogger;
use crate::middleware::auth::basic::CredentialSet;

#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<dyn ServiceBroker>,
    pub logger: BrokerLogger,
    pub credentials: Arc<CredentialSet>,
}

impl AppState {
    pub fn new(
        broker: Arc<dyn ServiceBroker>,
        logger: BrokerLogger,
        credentials: &[BrokerCredentials],
    ) -> Self {
        Self {
            broker,
            logger,
            credentials: Arc::new(CredentialSet::new(credentials)),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("logger", &self.logger)
            .field("credentials", &self.credentials.len())
            .finish_non_exhaustive()
    }
}
