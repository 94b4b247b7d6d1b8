//! Dispatch Strategies
//!
//! A dispatch strategy decides what happens between `accept()` returning
//! and the next `accept()` call: either the accepted client is served to
//! completion right there on the accept loop (sequential), or a task is
//! spawned for it and the loop goes straight back to accepting (parallel).
//!
//! The strategy is chosen once at startup from the CLI argument and never
//! changes for the life of the process.

use crate::connection::{handle_session, ServerStats};
use async_trait::async_trait;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tracing::debug;

/// The two ways accepted connections reach their sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One session at a time: each client is served to completion before
    /// the next connection is accepted. Waiting clients sit in the listen
    /// backlog.
    Sequential,

    /// One task per session: clients are served concurrently with no
    /// upper bound on the number of simultaneous sessions.
    Parallel,
}

/// Error for a mode string matching neither mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dispatch mode: {0:?}")]
pub struct ParseDispatchModeError(String);

impl FromStr for DispatchMode {
    type Err = ParseDispatchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(DispatchMode::Sequential),
            "parallel" => Ok(DispatchMode::Parallel),
            _ => Err(ParseDispatchModeError(s.to_string())),
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Sequential => write!(f, "sequential"),
            DispatchMode::Parallel => write!(f, "parallel"),
        }
    }
}

impl DispatchMode {
    /// Returns the strategy implementing this mode.
    pub fn strategy(self) -> Box<dyn DispatchStrategy> {
        match self {
            DispatchMode::Sequential => Box::new(SerialDispatch),
            DispatchMode::Parallel => Box::new(SpawnDispatch),
        }
    }
}

/// How one accepted connection is handed to its session.
///
/// Object-safe so the dispatcher can hold whichever strategy the mode
/// selected without generics leaking into the accept loop.
#[async_trait]
pub trait DispatchStrategy: Send + Sync {
    /// Hands one accepted connection to a session handler.
    ///
    /// Sequential dispatch returns only once the session is over;
    /// parallel dispatch returns as soon as the session task is spawned.
    async fn dispatch(&self, stream: TcpStream, addr: SocketAddr, stats: Arc<ServerStats>);
}

/// Serves each session inline on the accept loop.
pub struct SerialDispatch;

#[async_trait]
impl DispatchStrategy for SerialDispatch {
    async fn dispatch(&self, stream: TcpStream, addr: SocketAddr, stats: Arc<ServerStats>) {
        handle_session(stream, addr, stats).await;
    }
}

/// Spawns one task per session.
pub struct SpawnDispatch;

#[async_trait]
impl DispatchStrategy for SpawnDispatch {
    async fn dispatch(&self, stream: TcpStream, addr: SocketAddr, stats: Arc<ServerStats>) {
        tokio::spawn(handle_session(stream, addr, stats));
        debug!(client = %addr, "Spawned session task");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "sequential".parse::<DispatchMode>().unwrap(),
            DispatchMode::Sequential
        );
        assert_eq!(
            "parallel".parse::<DispatchMode>().unwrap(),
            DispatchMode::Parallel
        );
    }

    #[test]
    fn test_mode_from_str_is_case_insensitive() {
        assert_eq!(
            "SEQUENTIAL".parse::<DispatchMode>().unwrap(),
            DispatchMode::Sequential
        );
        assert_eq!(
            "Parallel".parse::<DispatchMode>().unwrap(),
            DispatchMode::Parallel
        );
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        assert!("both".parse::<DispatchMode>().is_err());
        assert!("".parse::<DispatchMode>().is_err());
        assert!("sequential ".parse::<DispatchMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [DispatchMode::Sequential, DispatchMode::Parallel] {
            assert_eq!(mode.to_string().parse::<DispatchMode>().unwrap(), mode);
        }
    }
}
