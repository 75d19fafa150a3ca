use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::net::{TcpListener, TcpSocket};
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Config;
use crate::http::connection::handle_connection;
use crate::http::mime;
use crate::server::shutdown::Shutdown;

/// A bound listener plus the connections it has handed out.
pub struct Server {
    listener: TcpListener,
    root: Arc<Path>,
    shutdown: Shutdown,
    connections: JoinSet<()>,
}

impl Server {
    /// Binds and starts listening. Any failure here is a startup error.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let listener = listen(cfg).await?;
        mime::init();

        Ok(Self {
            listener,
            root: Arc::from(cfg.root_dir.as_path()),
            shutdown: Shutdown::new(),
            connections: JoinSet::new(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle that stops the accept loop when triggered.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Accepts until shutdown is requested, then waits for open connections.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(addr = %self.local_addr()?, root = %self.root.display(), "Listening");

        while self.shutdown.is_running() {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((socket, peer)) => self.dispatch(socket, peer),
                    Err(e) => error!(error = %e, "accept failed"),
                },
                _ = self.shutdown.notified() => {
                    info!("Shutdown requested, no longer accepting");
                }
            }
            self.reap();
        }

        while let Some(result) = self.connections.join_next().await {
            report(result);
        }
        info!("All connections closed");
        Ok(())
    }

    fn dispatch(&mut self, socket: tokio::net::TcpStream, peer: SocketAddr) {
        info!("Accepted connection from {}", peer);
        let root = Arc::clone(&self.root);
        let span = info_span!("connection", %peer);
        self.connections.spawn(
            async move {
                handle_connection(socket, root).await;
            }
            .instrument(span),
        );
    }

    /// Collects finished connection tasks without waiting on running ones.
    fn reap(&mut self) {
        while let Some(result) = self.connections.try_join_next() {
            report(result);
        }
    }
}

fn report(result: Result<(), JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            error!(error = %e, "connection task panicked");
        } else {
            warn!(error = %e, "connection task cancelled");
        }
    }
}

/// Binds the first resolved address that accepts a socket and starts listening on it.
async fn listen(cfg: &Config) -> anyhow::Result<TcpListener> {
    let port = cfg.port_number()?;
    let addrs = tokio::net::lookup_host((cfg.addr.as_str(), port))
        .await
        .with_context(|| format!("failed to resolve {}:{}", cfg.addr, cfg.port))?;

    for addr in addrs {
        let created = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        };
        let socket = match created {
            Ok(socket) => socket,
            Err(e) => {
                warn!(%addr, error = %e, "socket creation failed");
                continue;
            }
        };
        socket
            .set_reuseaddr(true)
            .context("failed to set SO_REUSEADDR")?;
        if let Err(e) = socket.bind(addr) {
            warn!(%addr, error = %e, "bind failed");
            continue;
        }
        return socket
            .listen(cfg.backlog)
            .with_context(|| format!("failed to listen on {}", addr));
    }

    bail!("failed to bind {}:{}", cfg.addr, cfg.port)
}

/// Binds according to `cfg` and serves until `shutdown` is triggered.
pub async fn run(cfg: &Config, shutdown: Shutdown) -> anyhow::Result<()> {
    let mut server = Server::bind(cfg).await?;
    server.shutdown = shutdown;
    server.run().await
}
