//! Session Module
//!
//! This module manages individual client sessions. Each accepted
//! connection is served by exactly one [`SessionHandler`]; whether the
//! handler runs inline on the accept loop or on its own task is the
//! dispatcher's choice, not this module's.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Dispatcher                              │
//! │                  (accept loop)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept()
//!                        ▼
//!           ┌────────────────────────┐
//!           │   For each client...   │
//!           └────────────┬───────────┘
//!                        │
//!                        │ await inline / spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SessionHandler                             │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │ Read line   │───>│ Parse cmd   │───>│ Evaluate    │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! │                                               │             │
//! │                                               ▼             │
//! │                                      ┌─────────────┐        │
//! │                                      │ Send line   │        │
//! │                                      └─────────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Async I/O**: Uses Tokio for non-blocking network operations
//! - **Line Framing**: Incremental BytesMut buffering via [`LineReader`](crate::protocol::LineReader)
//! - **Pipelining**: Multiple request lines in a single TCP packet each get a response
//! - **Statistics**: Tracks session and request metrics
//!
//! ## Example
//!
//! ```ignore
//! use calcline::connection::{handle_session, ServerStats};
//! use std::sync::Arc;
//!
//! let stats = Arc::new(ServerStats::new());
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_session(stream, addr, Arc::clone(&stats)));
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_session, ServerStats, SessionEnd, SessionError, SessionHandler};
