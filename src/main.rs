//! jwt-revoker binary: loads configuration, connects the membership backend
//! and serves the revocation API until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jwt_revoker::adapters::http::RevocationAppState;
use jwt_revoker::adapters::{
    build_router, InMemoryBloomBackend, RedisBloomBackend, UnverifiedClaimsDecoder,
};
use jwt_revoker::config::{AppConfig, BackendKind, ServerConfig};
use jwt_revoker::ports::MembershipBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config.server)?;

    let backend = connect_backend(&config).await?;
    let state = RevocationAppState::new(
        Arc::new(UnverifiedClaimsDecoder::new()),
        backend.clone(),
        config.token.clone(),
    );
    let app = build_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        claim = %config.token.claim,
        backend = ?config.backend.kind,
        "jwt-revoker listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Err(e) = backend.close().await {
        tracing::warn!(error = %e, "Error closing membership backend");
    }
    tracing::info!("jwt-revoker stopped");

    Ok(())
}

fn init_tracing(server: &ServerConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .context("invalid log filter")?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if server.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    result.context("failed to initialise tracing")
}

async fn connect_backend(config: &AppConfig) -> anyhow::Result<Arc<dyn MembershipBackend>> {
    let backend: Arc<dyn MembershipBackend> = match config.backend.kind {
        BackendKind::Redis => Arc::new(
            RedisBloomBackend::connect(&config.backend)
                .await
                .with_context(|| {
                    format!(
                        "failed to connect to membership backend at {}",
                        config.backend.address()
                    )
                })?,
        ),
        BackendKind::Memory => {
            tracing::warn!("Using process-local membership backend; revocations are not shared");
            Arc::new(InMemoryBloomBackend::new(
                config.backend.capacity,
                config.backend.error_rate,
            ))
        }
    };
    Ok(backend)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
