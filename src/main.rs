//! calcline - A Line-Oriented TCP Calculator Server
//!
//! This is the main entry point for the calcline server.
//! It reads the dispatch mode from the command line, binds the listener,
//! and runs the dispatcher until Ctrl+C.

use calcline::config::ServerConfig;
use calcline::connection::ServerStats;
use calcline::dispatch::{DispatchMode, Dispatcher};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn print_usage() {
    println!(
        r#"
calcline - A Line-Oriented TCP Calculator Server

USAGE:
    calcline <MODE>

MODES:
    sequential    Serve one client at a time; further clients wait in
                  the listen backlog until the current session ends
    parallel      Serve every client on its own task, with no limit on
                  concurrent sessions

The mode is case-insensitive. The server listens on 0.0.0.0:5055 with a
backlog of 5.

EXAMPLES:
    calcline sequential
    calcline parallel

CONNECTING:
    Any line-oriented TCP client works:
    $ nc 127.0.0.1 5055
    add 2 3
    Результат: 5
    quit
    З'єднання завершено.
"#
    );
}

fn print_banner(config: &ServerConfig, mode: DispatchMode) {
    println!(
        r#"
calcline v{} - line-oriented TCP calculator
──────────────────────────────────────────────
Server starting on {} (mode: {})

Use Ctrl+C to shutdown gracefully.
"#,
        calcline::VERSION,
        config.socket_addr(),
        mode
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Missing or extra arguments fail before anything is bound.
    if args.len() != 2 {
        eprintln!("Usage: calcline <sequential|parallel>");
        std::process::exit(1);
    }

    // An unrecognized mode prints usage and does nothing else.
    let mode = match args[1].parse::<DispatchMode>() {
        Ok(mode) => mode,
        Err(_) => {
            print_usage();
            return Ok(());
        }
    };

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = ServerConfig::default();

    // Print the banner
    print_banner(&config, mode);

    // Server statistics (shared across all sessions)
    let stats = Arc::new(ServerStats::new());

    // Bind the listener before serving anything
    let dispatcher = Dispatcher::bind(&config, mode, Arc::clone(&stats))?;
    info!("Listening on {} (mode: {})", config.socket_addr(), mode);

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    // Accept loop, until Ctrl+C or a listener failure
    tokio::select! {
        result = dispatcher.run() => result?,
        _ = shutdown => {}
    }

    info!(
        sessions = stats.connections_accepted.load(Ordering::Relaxed),
        requests = stats.requests_handled.load(Ordering::Relaxed),
        "Server shutdown complete"
    );
    Ok(())
}
