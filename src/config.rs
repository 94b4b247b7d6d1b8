//! Server Configuration
//!
//! The listening socket parameters live in one value that the bootstrap
//! hands to the dispatcher at construction. There is no dynamic
//! reconfiguration: once the listener is bound the config is spent.

use std::net::{IpAddr, SocketAddr};

use crate::{DEFAULT_HOST, DEFAULT_PORT, LISTEN_BACKLOG};

/// Listening configuration for the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Listen backlog for not-yet-accepted connections
    pub backlog: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            backlog: LISTEN_BACKLOG,
        }
    }
}

impl ServerConfig {
    /// Returns the address to bind the listener to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
