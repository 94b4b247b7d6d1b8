//! calcline-client - Interactive client for the calcline server
//!
//! Connects to a running server, then loops: prompt for a line on stdin,
//! send it, print the single response line. Sending `quit` prints the
//! server's closing line and exits.

use calcline::protocol::LineReader;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: calcline-client <host> <port>");
        std::process::exit(1);
    }

    let host = args[1].clone();
    let port: u16 = args[2].parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid port number");
        std::process::exit(1);
    });

    println!("[INFO] Підключення до {}:{} ...", host, port);
    let stream = TcpStream::connect((host.as_str(), port)).await?;
    println!("[INFO] Підключено.");

    let (read_half, mut write_half) = stream.into_split();
    let mut responses = LineReader::new(read_half);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Введіть текст (або 'quit' щоб вийти): ");
        std::io::stdout().flush()?;

        let msg = match input.next_line().await? {
            Some(line) => line,
            None => break,
        };

        write_half.write_all(format!("{}\n", msg).as_bytes()).await?;

        let response = match responses.next_line().await? {
            Some(line) => line,
            None => {
                println!("[INFO] Сервер закрив з'єднання.");
                break;
            }
        };

        if msg.eq_ignore_ascii_case("quit") {
            println!("{}", response.trim());
            break;
        }

        println!("Відповідь сервера: {}", response.trim());
    }

    Ok(())
}
