//! Storefront server binary.
//!
//! Reads `STOREFRONT_*` configuration, starts the actors, seeds the
//! administrator, and serves the JSON API until Ctrl-C or SIGTERM.

use entity_actor::tracing::setup_tracing;
use storefront::config::StorefrontConfig;
use storefront::http::{self, AppState};
use storefront::lifecycle::StorefrontSystem;
use tokio::net::TcpListener;
use tracing::{error, info};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                error!(error = %e, "Could not register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StorefrontConfig::from_env();
    setup_tracing(&config.log_filter);

    info!(bind = %config.bind_addr, "Starting storefront");

    let system = StorefrontSystem::new(&config);

    if let Some(seed) = &config.admin {
        let admin = system
            .bootstrap_admin(seed)
            .await
            .map_err(|e| format!("admin bootstrap failed: {e}"))?;
        info!(user_id = %admin.id, email = %admin.email, "Administrator ready");
    }

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("bind failed: {e}"))?;
    info!("storefront listening on {}", config.bind_addr);

    let app = http::router(AppState::from_system(&system));
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"));

    // The router and its client clones are gone once serve returns.
    system.shutdown().await?;
    served?;

    info!("Storefront stopped");
    Ok(())
}
