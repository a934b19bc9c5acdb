use article_api::config::Config;
use article_api::server::{AppState, app};
use axum::{ServiceExt, extract::Request};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing .env is normal in production; reported once logging is up.
    let dotenv = dotenvy::dotenv();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if let Err(e) = dotenv {
        info!(error = %e, "No .env file loaded");
    }

    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        storage = %cfg.basic.storage,
        database = ?cfg.database,
        "Configuration loaded"
    );

    let repo = article_api::db::connect(&cfg).await.inspect_err(|e| {
        error!(error = %e, "Error connecting to the database");
    })?;
    repo.ensure_schema().await.inspect_err(|e| {
        error!(error = %e, "Error creating articles table");
    })?;

    let state = AppState::new(repo.clone());
    let service = app(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repo.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM. If a handler cannot be installed that
/// source is ignored rather than stopping the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let source = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "sigterm",
    };
    info!(signal = source, "Shutdown requested; draining connections");
}
