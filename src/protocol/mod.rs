//! Wire Protocol Implementation
//!
//! This module implements the calcline wire protocol: plain UTF-8 text over
//! TCP, one newline-terminated line per request and exactly one
//! newline-terminated line per response.
//!
//! ## Overview
//!
//! Inbound framing and outbound rendering are deliberately separate:
//!
//! - `reader`: [`LineReader`], a buffered reader that turns the byte stream
//!   into a lazy sequence of complete lines
//! - `types`: [`Response`] and [`EvalError`], the response lines and their
//!   exact localized wire texts
//!
//! Parsing a line into a command lives in the `commands` module; nothing in
//! here interprets request content.
//!
//! ## Example
//!
//! ```ignore
//! use calcline::protocol::{LineReader, Response};
//!
//! let mut lines = LineReader::new(read_half);
//! while let Some(line) = lines.next_line().await? {
//!     // hand the trimmed line to the evaluator...
//! }
//!
//! let bytes = Response::Result(5.0).to_line(); // "Результат: 5\n"
//! ```

pub mod reader;
pub mod types;

// Re-export commonly used types for convenience
pub use reader::{LineError, LineReader, MAX_LINE_BYTES};
pub use types::{EvalError, Response, LINE_TERMINATOR};
