use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, CorsLayer},
};
use tracing::{error, info, warn};

use stockroom_api::{self as api, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(&cfg.logging);

    let db_pool = api::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;
    if cfg.database.auto_migrate {
        api::db::run_migrations(&db_pool)
            .await
            .context("failed running migrations")?;
    } else {
        warn!("Automatic migrations disabled; expecting an up-to-date schema");
    }

    let cors = cors_layer(&cfg)?;
    let app_state = api::AppState::new(Arc::new(db_pool), cfg.clone());

    let app = api::build_router(app_state)
        .layer(CompressionLayer::new())
        .layer(cors);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("stockroom-api listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stockroom-api stopped");
    Ok(())
}

/// Explicit origins when configured, otherwise permissive where that is allowed
fn cors_layer(cfg: &AppConfig) -> anyhow::Result<CorsLayer> {
    let origins: Vec<HeaderValue> = cfg
        .cors
        .origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if !cfg.should_allow_permissive_cors() {
            error!("No usable CORS origins configured");
            anyhow::bail!("no usable origins in APP__CORS__ALLOWED_ORIGINS");
        }
        info!(environment = %cfg.environment, "Using permissive CORS");
        return Ok(CorsLayer::permissive());
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        // `*` cannot be combined with allow_credentials
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cfg.cors.allow_credentials))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
