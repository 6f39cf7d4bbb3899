use std::sync::Arc;

use anyhow::Context;
use log::{error, info};
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;

use api::{App, Server, ServerConfig};
use regression::{FileStore, MemoryStore, SampleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("invalid configuration")?;

    let filter = config.mode().default_log_filter();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let store: Arc<dyn SampleStore> = match config.samples_path() {
        Some(path) => {
            info!("storing samples in {}", path.display());
            Arc::new(FileStore::new(path))
        }
        None => {
            info!("storing samples in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("couldn't bind {addr}"))?;
    info!("listening at {}", listener.local_addr()?);

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("received SIGINT, shutting down");
                on_signal.cancel();
            }
            Err(e) => error!("couldn't listen for SIGINT: {e}"),
        }
    });

    let mut server = Server::new(App::new(store, config.api_key()));
    server.run(listener, shutdown).await?;

    Ok(())
}
