//! # calcline - A Line-Oriented TCP Calculator Server
//!
//! calcline is a small TCP server speaking a newline-delimited text
//! protocol: clients send arithmetic commands one line at a time and get
//! exactly one response line back. It demonstrates systems programming
//! concepts like socket ownership, line framing over a byte stream, and
//! pluggable concurrency.
//!
//! ## Features
//!
//! - **Plain Text Protocol**: One UTF-8 request line in, one response line out
//! - **Two Dispatch Modes**: Sequential (one session at a time) or parallel
//!   (one task per connection), selected on the command line
//! - **Pure Evaluator**: Parsing and arithmetic are free of I/O and state,
//!   testable without a socket
//! - **Async I/O**: Built on Tokio; parallel mode handles many concurrent
//!   sessions
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              calcline                               │
//! │                                                                     │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────────┐     │
//! │  │ Dispatcher  │───>│   Session    │───>│  Command Evaluator  │     │
//! │  │ (accept)    │    │   Handler    │    │  (pure, per line)   │     │
//! │  └──────┬──────┘    └──────────────┘    └─────────────────────┘     │
//! │         │                  ▲                                        │
//! │         │                  │ framed lines                           │
//! │         ▼                  │                                        │
//! │  ┌──────────────────┐   ┌──┴───────────┐                            │
//! │  │ DispatchStrategy │   │  LineReader  │                            │
//! │  │ serial / spawn   │   │  (BytesMut)  │                            │
//! │  └──────────────────┘   └──────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use calcline::config::ServerConfig;
//! use calcline::connection::ServerStats;
//! use calcline::dispatch::{Dispatcher, DispatchMode};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let stats = Arc::new(ServerStats::new());
//!
//!     let dispatcher = Dispatcher::bind(&config, DispatchMode::Parallel, stats)?;
//!     dispatcher.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Protocol
//!
//! Requests are whitespace-tokenized lines; verbs are case-insensitive:
//!
//! | Request             | Response                             |
//! |---------------------|--------------------------------------|
//! | `add 2 3`           | `Результат: 5`                       |
//! | `sub 2 5`           | `Результат: -3`                      |
//! | `mul 4 2.5`         | `Результат: 10`                      |
//! | `div 10 4`          | `Результат: 2.5`                     |
//! | `div 10 0`          | `Помилка: ділення на нуль.`          |
//! | `pow 2 3`           | `Результат: 8`                       |
//! | `sqrt 9`            | `Результат: 3`                       |
//! | `sqrt -5`           | error line (negative operand)        |
//! | `quit`              | `З'єднання завершено.` then close    |
//! | anything else       | `Сервер отримав: <line>`             |
//!
//! ## Module Overview
//!
//! - [`protocol`]: Line framing over TCP and response rendering
//! - [`commands`]: The pure command parser and evaluator
//! - [`connection`]: Per-client session handling and server statistics
//! - [`dispatch`]: The accept loop and the sequential/parallel strategies
//! - [`config`]: Listening socket configuration
//!
//! ## Design Highlights
//!
//! ### Session Ownership
//!
//! Each accepted connection is owned by exactly one session handler for
//! its whole lifetime. Sessions share nothing but the statistics
//! counters, so a failing session can only ever take down itself.
//!
//! ### Line Framing
//!
//! TCP gives a byte stream, not messages. The [`protocol::LineReader`]
//! accumulates bytes in a `BytesMut` buffer and yields complete lines,
//! so a request split across reads and several requests in one packet
//! both come out the same way.
//!
//! ### Pluggable Concurrency
//!
//! The accept loop is identical in both modes; only the
//! [`dispatch::DispatchStrategy`] behind it changes. Sequential mode
//! awaits each session inline and lets waiting clients queue in the
//! listen backlog; parallel mode spawns a task per session.

pub mod commands;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod protocol;

// Re-export commonly used types for convenience
pub use commands::{evaluate, Command};
pub use config::ServerConfig;
pub use connection::{handle_session, ServerStats, SessionHandler};
pub use dispatch::{DispatchMode, Dispatcher};
pub use protocol::{LineReader, Response};

use std::net::{IpAddr, Ipv4Addr};

/// The default host the server binds to (all interfaces)
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// The default port the server listens on
pub const DEFAULT_PORT: u16 = 5055;

/// The default listen backlog
pub const LISTEN_BACKLOG: u32 = 5;

/// Version of calcline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
