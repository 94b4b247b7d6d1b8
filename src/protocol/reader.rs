//! Buffered Line Reader
//!
//! This module implements the line framing layer of the protocol. TCP is a
//! stream protocol: a single read may deliver half a request, or several
//! requests at once. The reader owns a growable buffer, accumulates incoming
//! bytes, and yields complete newline-terminated lines one at a time.
//!
//! ## How the Reader Works
//!
//! Each call to [`LineReader::next_line`] returns:
//! - `Ok(Some(line))` - a complete line, terminator stripped
//! - `Ok(None)` - the peer closed the connection with nothing buffered
//! - `Err(LineError)` - I/O failure, invalid UTF-8, an unterminated line at
//!   EOF, or an oversized line
//!
//! The caller drives the sequence lazily: nothing is read from the socket
//! until the next line is asked for, and bytes after the current line stay
//! buffered for the following call. Trailing `\r` is left in place; callers
//! that want the original protocol semantics trim surrounding whitespace.

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Maximum bytes buffered for a single unterminated line (64 KB).
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Errors that can occur while framing lines.
#[derive(Debug, Error)]
pub enum LineError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line contained invalid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// The peer closed the connection in the middle of a line
    #[error("connection closed mid-line")]
    TruncatedLine,

    /// An unterminated line exceeded the buffer cap
    #[error("line too long: {size} bytes buffered (max: {max})")]
    LineTooLong { size: usize, max: usize },
}

/// A buffered reader that yields newline-delimited lines from a byte stream.
///
/// The reader is generic over any [`AsyncRead`], so sessions hand it the read
/// half of their socket and tests can hand it an in-memory stream.
#[derive(Debug)]
pub struct LineReader<R> {
    /// The underlying byte stream
    reader: R,

    /// Buffer for incoming data
    buf: BytesMut,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Creates a line reader over the given byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
        }
    }

    /// Returns the next complete line without its trailing newline, or
    /// `None` once the peer has closed and the buffer is empty.
    ///
    /// A complete line that is already buffered is returned without touching
    /// the underlying stream; otherwise the reader pulls more bytes until a
    /// terminator arrives.
    pub async fn next_line(&mut self) -> Result<Option<String>, LineError> {
        loop {
            // A buffered terminator means a complete line is ready.
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let line = self.buf.split_to(pos + 1);
                let text = std::str::from_utf8(&line[..pos])
                    .map_err(|e| LineError::InvalidUtf8(e.to_string()))?;
                return Ok(Some(text.to_string()));
            }

            // Guard against a peer that never sends a terminator.
            if self.buf.len() >= MAX_LINE_BYTES {
                return Err(LineError::LineTooLong {
                    size: self.buf.len(),
                    max: MAX_LINE_BYTES,
                });
            }

            // Ensure we have some capacity
            if self.buf.capacity() - self.buf.len() < 1024 {
                self.buf.reserve(4096);
            }

            let n = self.reader.read_buf(&mut self.buf).await?;

            if n == 0 {
                // Connection closed by the peer
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(LineError::TruncatedLine);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_single_line() {
        let mut lines = LineReader::new(&b"add 2 3\n"[..]);
        assert_eq!(lines.next_line().await.unwrap(), Some("add 2 3".into()));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_multiple_lines_in_one_chunk() {
        let mut lines = LineReader::new(&b"add 2 3\nsqrt 9\nquit\n"[..]);
        assert_eq!(lines.next_line().await.unwrap(), Some("add 2 3".into()));
        assert_eq!(lines.next_line().await.unwrap(), Some("sqrt 9".into()));
        assert_eq!(lines.next_line().await.unwrap(), Some("quit".into()));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_line_split_across_reads() {
        let stream = Builder::new()
            .read(b"add ")
            .read(b"2 3\nqu")
            .read(b"it\n")
            .build();
        let mut lines = LineReader::new(stream);
        assert_eq!(lines.next_line().await.unwrap(), Some("add 2 3".into()));
        assert_eq!(lines.next_line().await.unwrap(), Some("quit".into()));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_crlf_is_preserved_for_the_caller_to_trim() {
        let mut lines = LineReader::new(&b"add 2 3\r\n"[..]);
        assert_eq!(lines.next_line().await.unwrap(), Some("add 2 3\r".into()));
    }

    #[tokio::test]
    async fn test_empty_line() {
        let mut lines = LineReader::new(&b"\n"[..]);
        assert_eq!(lines.next_line().await.unwrap(), Some(String::new()));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_eof_mid_line_is_an_error() {
        let mut lines = LineReader::new(&b"add 2"[..]);
        assert!(matches!(
            lines.next_line().await,
            Err(LineError::TruncatedLine)
        ));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_an_error() {
        let mut lines = LineReader::new(&[0xff, 0xfe, b'\n'][..]);
        assert!(matches!(
            lines.next_line().await,
            Err(LineError::InvalidUtf8(_))
        ));
    }

    #[tokio::test]
    async fn test_oversized_unterminated_line_is_an_error() {
        let data = vec![b'a'; MAX_LINE_BYTES];
        let stream = Builder::new().read(&data).build();
        let mut lines = LineReader::new(stream);
        match lines.next_line().await {
            Err(LineError::LineTooLong { size, max }) => {
                assert!(size >= max);
                assert_eq!(max, MAX_LINE_BYTES);
            }
            other => panic!("expected LineTooLong, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_terminated_line_under_the_cap_succeeds() {
        let mut data = vec![b'a'; 1000];
        data.push(b'\n');
        let stream = Builder::new().read(&data).build();
        let mut lines = LineReader::new(stream);
        let line = lines.next_line().await.unwrap().unwrap();
        assert_eq!(line.len(), 1000);
    }

    #[tokio::test]
    async fn test_bytes_after_a_line_stay_buffered() {
        let stream = Builder::new().read(b"first\nsecond\n").build();
        let mut lines = LineReader::new(stream);
        assert_eq!(lines.next_line().await.unwrap(), Some("first".into()));
        assert_eq!(lines.next_line().await.unwrap(), Some("second".into()));
    }
}
