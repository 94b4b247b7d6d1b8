//! Connection Dispatcher
//!
//! The dispatcher owns the listening socket. It accepts connections
//! forever and hands each one to the strategy for the configured mode.
//! Everything per-session happens behind [`handle_session`]; the only
//! failures that surface here are accept failures on the listener itself.
//!
//! [`handle_session`]: crate::connection::handle_session

use crate::config::ServerConfig;
use crate::connection::ServerStats;
use crate::dispatch::DispatchMode;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

/// Accepts connections and routes them to sessions.
pub struct Dispatcher {
    /// The bound listening socket
    listener: TcpListener,

    /// The configured dispatch mode
    mode: DispatchMode,

    /// Server statistics (shared with every session)
    stats: Arc<ServerStats>,
}

impl Dispatcher {
    /// Binds the listening socket and prepares the dispatcher.
    ///
    /// Goes through [`TcpSocket`] rather than [`TcpListener::bind`] because
    /// the listen backlog comes from the config.
    pub fn bind(
        config: &ServerConfig,
        mode: DispatchMode,
        stats: Arc<ServerStats>,
    ) -> io::Result<Self> {
        let addr = config.socket_addr();

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(config.backlog)?;

        Ok(Self {
            listener,
            mode,
            stats,
        })
    }

    /// The address the listener is actually bound to.
    ///
    /// Differs from the configured address when the config asked for
    /// port 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the process ends or accept itself fails.
    ///
    /// In sequential mode each iteration blocks on the running session, so
    /// waiting clients queue in the listen backlog. Per-session failures
    /// never reach this loop.
    pub async fn run(self) -> io::Result<()> {
        let strategy = self.mode.strategy();
        info!(mode = %self.mode, "Dispatcher running");

        loop {
            let (stream, addr) = self.listener.accept().await?;
            info!(client = %addr, "Accepted connection");
            strategy
                .dispatch(stream, addr, Arc::clone(&self.stats))
                .await;
        }
    }
}
