use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use xendit_webhooks::shared::infrastructure::webhook_store::file_system::FileSystemWebhookStore;
use xendit_webhooks::shell::config::AppConfig;
use xendit_webhooks::shell::http::{WEBHOOK_PATH, router};
use xendit_webhooks::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.listen_addr()?;

    let store = Arc::new(FileSystemWebhookStore::new(&config.data_dir));
    let app = router(AppState::new(store));

    tracing::info!(
        data_dir = %config.data_dir.display(),
        "webhook endpoint: http://{}{}",
        addr,
        WEBHOOK_PATH
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
