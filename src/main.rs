// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};

use horizon_server::{
    api::{
        middleware::{RateLimiter, DEFAULT_TRACKED_CLIENTS},
        router,
    },
    blockchain::MessageSigner,
    config::{AppConfig, OwnerKeySource},
    state::AppState,
    storage::ProjectDatabase,
    telemetry::init_tracing,
};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let signer = load_signer(&config.owner_key)?;
    tracing::info!(signer = %signer.address(), "Owner key loaded");

    let db_path = config.database_path();
    let projects = ProjectDatabase::open(&db_path)?;
    tracing::info!(path = %db_path.display(), "Project database opened");

    let rate_limiter = RateLimiter::new(&config.rate_limit, DEFAULT_TRACKED_CLIENTS);
    let state = AppState::new(projects, signer, rate_limiter);
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();

    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    let addr = config.bind_addr;
    match &config.tls {
        Some(tls) => {
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            tracing::info!(%addr, "Horizon server listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app)
                .await?;
        }
        None => {
            tracing::info!(%addr, "Horizon server listening on http (docs at /docs)");
            axum_server::bind(addr).handle(handle).serve(app).await?;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

fn load_signer(source: &OwnerKeySource) -> Result<MessageSigner, Box<dyn std::error::Error>> {
    let signer = match source {
        OwnerKeySource::Hex(hex) => MessageSigner::from_hex(hex)?,
        OwnerKeySource::PemFile(path) => {
            let pem = std::fs::read(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            MessageSigner::from_pem(&pem)?
        }
    };
    Ok(signer)
}

async fn shutdown_on_signal(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
