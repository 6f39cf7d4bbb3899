use std::{io, net::SocketAddr, sync::Arc, time::Instant};

use comms::Response;
use log::{debug, error, info, warn};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpListener,
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use crate::{error::error_response, routes::App};

/// The central server structure, it accepts connections and runs one task per client.
pub struct Server {
    app: Arc<App>,
    tasks: JoinSet<()>,
}

impl Server {
    /// Creates a new `Server`.
    ///
    /// # Arguments
    /// * `app` - The request handlers shared by every connection.
    pub fn new(app: App) -> Self {
        Self {
            app: Arc::new(app),
            tasks: JoinSet::new(),
        }
    }

    /// Binds a new client to this server and spawns its own connection task.
    ///
    /// # Arguments
    /// * `rx` - The receiving end of the connection.
    /// * `tx` - The sending end of the connection.
    /// * `peer` - The client's address, for logging.
    pub fn spawn<R, W>(&mut self, rx: R, tx: W, peer: SocketAddr)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let app = Arc::clone(&self.app);

        self.tasks.spawn(async move {
            match serve_connection(&app, rx, tx).await {
                Ok(()) => debug!("{peer} disconnected"),
                Err(e) => debug!("{peer} dropped: {e}"),
            }
        });
    }

    /// Accepts clients until `shutdown` is cancelled, then aborts the open connections.
    ///
    /// # Arguments
    /// * `listener` - The bound listener to accept from.
    /// * `shutdown` - Stops the accept loop once cancelled.
    pub async fn run(&mut self, listener: TcpListener, shutdown: CancellationToken) -> io::Result<()> {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!("{peer} connected");
                        let (rx, tx) = stream.into_split();
                        self.spawn(rx, tx, peer);
                    }
                    Err(e) => warn!("accept failed: {e}"),
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    if let Err(e) = joined {
                        error!("connection task failed: {e}");
                    }
                }
            }
        }

        info!("closing {} open connection(s)", self.tasks.len());
        self.tasks.shutdown().await;
        Ok(())
    }
}

/// Answers requests on a single connection until the client leaves or asks to close.
///
/// A request that can't be parsed is answered with its error status and the
/// connection is closed right after.
///
/// # Arguments
/// * `app` - The request handlers.
/// * `rx` - The receiving end of the connection.
/// * `tx` - The sending end of the connection.
///
/// # Returns
/// An io error if the transport fails.
pub async fn serve_connection<R, W>(app: &App, rx: R, tx: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut rx, mut tx) = comms::channel(rx, tx);

    loop {
        let req = match rx.recv().await {
            Ok(Some(req)) => req,
            Ok(None) => return Ok(()),
            Err(e) => {
                let Some(status) = e.status() else {
                    return Err(e.into());
                };

                warn!("unreadable request: {e}");
                let res = error_response(status, &e.to_string()).with_header("connection", "close");
                return tx.send(&res).await;
            }
        };

        let started = Instant::now();
        let keep_alive = req.keep_alive();

        let mut res: Response = app.handle(&req).await;
        if !keep_alive {
            res = res.with_header("connection", "close");
        }

        tx.send(&res).await?;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
        info!(
            status = res.status.code(), elapsed_ms = elapsed_ms;
            "{} {} {} {} - {elapsed_ms:.3} ms",
            req.method,
            req.path,
            res.status.code(),
            res.body.len(),
        );

        if !keep_alive {
            return Ok(());
        }
    }
}
