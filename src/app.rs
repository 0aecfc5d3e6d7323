/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - axum::serve() で起動 (graceful shutdown 付き)
 * - The embedding application only supplies its ServiceBroker
 */
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{api, config::Config, domain::ServiceBroker, logging::BrokerLogger, state::AppState};

pub async fn run(broker: Arc<dyn ServiceBroker>) -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let state = AppState::new(broker, BrokerLogger::default(), &config.credentials);
    let app = api::router_with_body_limit(state, config.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "service broker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("service broker stopped");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
