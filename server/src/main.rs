mod config;
mod logging;
mod persistence;
mod service;
mod shutdown;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use config::{Args, StoreKind};
use persistence::mongo::{MongoConnectionManager, MongoConnector, MongoGameRepository};
use persistence::{GameRepository, MemoryGameRepository, RetryPolicy};
use service::HttpSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_dir.as_deref());

    tracing::info!(
        mode = ?args.mode,
        store = ?args.store,
        "Starting game catalog server"
    );

    let http = HttpSettings {
        allowed_origin: args.allowed_origin()?,
        dev_mode: args.dev_mode(),
    };
    let addr = args.listen_addr();

    match args.store {
        StoreKind::Mongo => {
            let connection = MongoConnectionManager::new(
                MongoConnector,
                args.connection_settings(),
                RetryPolicy::default(),
            );
            connection
                .connect()
                .await
                .context("database unavailable at startup")?;

            let repo = Arc::new(MongoGameRepository::new(connection.clone()));
            let served = serve(repo, http, addr).await;
            connection.close().await;
            served
        }
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            serve(Arc::new(MemoryGameRepository::new()), http, addr).await
        }
    }
}

async fn serve<R>(repo: Arc<R>, http: HttpSettings, addr: SocketAddr) -> anyhow::Result<()>
where
    R: GameRepository + 'static,
{
    let app = service::router(repo, http);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
