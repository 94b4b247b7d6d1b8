//! Session Handler Module
//!
//! This module handles individual client sessions. Each accepted
//! connection gets its own handler that runs a request loop, reading
//! one line at a time and sending back exactly one response line.
//!
//! ## Session Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. SessionHandler created
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Request Loop            │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read one line           │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Parse command           │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Evaluate command        │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Send response line      │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │   [Loop back, unless quit]   │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. quit / client disconnects / error
//!        │
//!        ▼
//! 5. Handler ends, connection closes
//! ```
//!
//! ## Termination
//!
//! A session ends in one of three ways: the client sends `quit` (the
//! acknowledgement line is written first, then the connection closes),
//! the client disconnects, or an I/O or framing error occurs. All three
//! release the connection, which is what lets the sequential dispatcher
//! move on to the next waiting client.

use crate::commands::Command;
use crate::protocol::{LineError, LineReader, Response};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

/// Statistics for session handling
#[derive(Debug, Default)]
pub struct ServerStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active sessions
    pub active_sessions: AtomicU64,
    /// Total requests handled
    pub requests_handled: AtomicU64,
    /// Total request bytes read, terminators included
    pub bytes_read: AtomicU64,
    /// Total response bytes written, terminators included
    pub bytes_written: AtomicU64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn session_closed(&self) {
        self.active_sessions.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn request_handled(&self) {
        self.requests_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// How a session came to its normal end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client sent `quit` and was acknowledged.
    QuitRequested,
    /// The client closed the connection at a line boundary.
    ClientDisconnected,
}

/// Errors that can occur while serving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// I/O error while writing a response
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Framing error while reading a request line
    #[error("Line framing error: {0}")]
    Line(#[from] LineError),
}

impl SessionError {
    /// True when the client dropped the connection underneath us.
    fn is_connection_reset(&self) -> bool {
        let kind = match self {
            SessionError::Io(e) => e.kind(),
            SessionError::Line(LineError::Io(e)) => e.kind(),
            SessionError::Line(_) => return false,
        };
        matches!(
            kind,
            std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::BrokenPipe
        )
    }
}

/// Handles a single client session.
///
/// Owns the connection for its whole lifetime: the read half feeds the
/// line reader, the write half carries response lines back. Nothing is
/// shared with other sessions except the [`ServerStats`] counters.
pub struct SessionHandler {
    /// Framed line reader over the read half of the connection
    reader: LineReader<OwnedReadHalf>,

    /// Buffered writer over the write half of the connection
    writer: BufWriter<OwnedWriteHalf>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Server statistics (shared)
    stats: Arc<ServerStats>,
}

impl SessionHandler {
    /// Creates a new session handler and registers the session in the stats.
    ///
    /// # Arguments
    ///
    /// * `stream` - The accepted TCP stream for this client
    /// * `addr` - The client's socket address
    /// * `stats` - Shared server statistics
    pub fn new(stream: TcpStream, addr: SocketAddr, stats: Arc<ServerStats>) -> Self {
        stats.session_opened();

        let (read_half, write_half) = stream.into_split();

        Self {
            reader: LineReader::new(read_half),
            writer: BufWriter::new(write_half),
            addr,
            stats,
        }
    }

    /// Runs the session to completion.
    ///
    /// Reads request lines and answers each with one response line until
    /// the client quits, disconnects, or an error occurs.
    pub async fn run(mut self) -> Result<SessionEnd, SessionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.serve().await;

        match &result {
            Ok(SessionEnd::QuitRequested) => {
                info!(client = %self.addr, "Session closed at client request")
            }
            Ok(SessionEnd::ClientDisconnected) => {
                info!(client = %self.addr, "Client disconnected")
            }
            Err(e) if e.is_connection_reset() => {
                debug!(client = %self.addr, "Connection reset by client")
            }
            Err(e) => warn!(client = %self.addr, error = %e, "Session error"),
        }

        self.stats.session_closed();
        result
    }

    /// The read-evaluate-respond loop.
    async fn serve(&mut self) -> Result<SessionEnd, SessionError> {
        while let Some(raw) = self.reader.next_line().await? {
            // The terminator was stripped by the reader; count it back in.
            self.stats.bytes_read(raw.len() + 1);

            let line = raw.trim();
            info!(client = %self.addr, request = %line, "Request received");

            let command = Command::parse(line);
            let response = command.evaluate();
            self.send_response(&response).await?;
            self.stats.request_handled();

            if command.is_quit() {
                return Ok(SessionEnd::QuitRequested);
            }
        }

        Ok(SessionEnd::ClientDisconnected)
    }

    /// Sends one response line to the client.
    async fn send_response(&mut self, response: &Response) -> Result<(), SessionError> {
        let line = response.to_line();
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        self.stats.bytes_written(line.len());
        trace!(
            client = %self.addr,
            bytes = line.len(),
            "Sent response"
        );
        Ok(())
    }
}

/// Handles a client session to completion.
///
/// This is a convenience function that creates a SessionHandler and runs
/// it, absorbing the result: session failures are confined to the one
/// client and must never take down the server or a dispatcher task.
///
/// # Arguments
///
/// * `stream` - The accepted TCP stream for this client
/// * `addr` - The client's socket address
/// * `stats` - Shared server statistics
pub async fn handle_session(stream: TcpStream, addr: SocketAddr, stats: Arc<ServerStats>) {
    let handler = SessionHandler::new(stream, addr, stats);
    if let Err(e) = handler.run().await {
        if !e.is_connection_reset() {
            debug!(client = %addr, error = %e, "Session ended with error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn create_test_server() -> (SocketAddr, Arc<ServerStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(ServerStats::new());

        let stats_clone = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Ok((stream, client_addr)) = listener.accept().await {
                let stats = Arc::clone(&stats_clone);
                tokio::spawn(handle_session(stream, client_addr, stats));
            }
        });

        (addr, stats)
    }

    /// Reads one terminated response line, byte by byte.
    async fn read_response(client: &mut TcpStream) -> String {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            let n = client.read(&mut byte).await.unwrap();
            if n == 0 {
                break;
            }
            line.push(byte[0]);
            if byte[0] == b'\n' {
                break;
            }
        }
        String::from_utf8(line).unwrap()
    }

    #[tokio::test]
    async fn test_arithmetic_roundtrip() {
        let (addr, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client.write_all("add 2 3\n".as_bytes()).await.unwrap();
        assert_eq!(read_response(&mut client).await, "Результат: 5\n");

        client.write_all("div 10 4\n".as_bytes()).await.unwrap();
        assert_eq!(read_response(&mut client).await, "Результат: 2.5\n");
    }

    #[tokio::test]
    async fn test_error_lines_keep_session_open() {
        let (addr, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client.write_all("div 10 0\n".as_bytes()).await.unwrap();
        assert_eq!(
            read_response(&mut client).await,
            "Помилка: ділення на нуль.\n"
        );

        client.write_all("sqrt -5\n".as_bytes()).await.unwrap();
        assert_eq!(
            read_response(&mut client).await,
            "Помилка: не можна брати корінь з від'ємного числа.\n"
        );

        // The session survives error responses.
        client.write_all("sqrt 9\n".as_bytes()).await.unwrap();
        assert_eq!(read_response(&mut client).await, "Результат: 3\n");
    }

    #[tokio::test]
    async fn test_echo_roundtrip() {
        let (addr, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client
            .write_all("hello world foo bar\n".as_bytes())
            .await
            .unwrap();
        assert_eq!(
            read_response(&mut client).await,
            "Сервер отримав: hello world foo bar\n"
        );
    }

    #[tokio::test]
    async fn test_crlf_requests_are_trimmed() {
        let (addr, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client.write_all("add 2 3\r\n".as_bytes()).await.unwrap();
        assert_eq!(read_response(&mut client).await, "Результат: 5\n");
    }

    #[tokio::test]
    async fn test_quit_acknowledges_then_closes() {
        let (addr, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client.write_all("QUIT\n".as_bytes()).await.unwrap();
        assert_eq!(read_response(&mut client).await, "З'єднання завершено.\n");

        // The server closes its end after the acknowledgement.
        let mut buf = [0u8; 16];
        let n = client.read(&mut buf).await.unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_pipelined_requests_each_get_a_response() {
        let (addr, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client
            .write_all("add 1 2\nmul 3 4\nsqrt 16\n".as_bytes())
            .await
            .unwrap();

        assert_eq!(read_response(&mut client).await, "Результат: 3\n");
        assert_eq!(read_response(&mut client).await, "Результат: 12\n");
        assert_eq!(read_response(&mut client).await, "Результат: 4\n");
    }

    #[tokio::test]
    async fn test_session_stats() {
        let (addr, stats) = create_test_server().await;

        assert_eq!(stats.active_sessions.load(Ordering::Relaxed), 0);

        let mut client = TcpStream::connect(addr).await.unwrap();

        // Give the server time to accept the connection
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.connections_accepted.load(Ordering::Relaxed), 1);
        assert_eq!(stats.active_sessions.load(Ordering::Relaxed), 1);

        client.write_all("add 2 3\n".as_bytes()).await.unwrap();
        let _ = read_response(&mut client).await;

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.requests_handled.load(Ordering::Relaxed), 1);
        assert_eq!(stats.bytes_read.load(Ordering::Relaxed), 8);
        assert!(stats.bytes_written.load(Ordering::Relaxed) > 0);

        // Disconnecting without quit still releases the session.
        drop(client);

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.active_sessions.load(Ordering::Relaxed), 0);
    }
}
