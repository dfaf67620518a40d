use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use web_collector::config::{Cli, Config};
use web_collector::handler::AppState;
use web_collector::server::build_router;
use web_collector::store::{BookmarkStore, InMemoryStore};
use web_collector::unpack_error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("web-collector.svc starting");
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, ".env file not loaded");
    }

    let args = Cli::parse();
    let cfg = Config::resolve(args.config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %unpack_error(&e), path = ?args.config_path, "failed to load config");
        std::process::exit(1);
    });

    if let Err(e) = run(cfg).await {
        tracing::error!(error = %format!("{:#}", e), "web-collector.svc failed");
        std::process::exit(1);
    }
    tracing::info!("web-collector.svc going off, graceful shutdown complete");
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    let store: Arc<dyn BookmarkStore> = if cfg.app.seed_samples {
        Arc::new(InMemoryStore::with_samples())
    } else {
        Arc::new(InMemoryStore::new())
    };

    let app = build_router(AppState::new(store), &cfg.cors.allowed_origins)
        .context("failed to build router")?;

    let address = cfg.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind tcp listener on {}", address))?;

    let cancellation_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancellation_token.clone()));

    tracing::info!("web-collector.svc running on {}", &address);
    axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("ctrl+c signal received, preparing to shutdown"),
        _ = terminate => tracing::info!("terminate signal received, preparing to shutdown"),
    }
    token.cancel();
}
