//! Command Processing Module
//!
//! This module implements the request processing layer for calcline.
//! It receives one trimmed request line, parses it into a [`Command`],
//! and evaluates it to a [`Response`](crate::protocol::Response).
//!
//! ## Architecture
//!
//! ```text
//! Request Line
//!      |
//!      v
//! +-----------------+
//! | Command::parse  |  (tokenize, recognize verb)
//! +-----------------+
//!      |
//!      v
//! +-------------------+
//! | Command::evaluate |  (pure arithmetic, no I/O)
//! +-------------------+
//!      |
//!      v
//! Response Line
//! ```
//!
//! The layer is deliberately free of session state: everything a session
//! needs from a request line comes back in the [`Response`](crate::protocol::Response),
//! plus [`Command::is_quit`] for the terminate signal.

pub mod eval;

pub use eval::{evaluate, BinaryOp, Command, UnaryOp};
