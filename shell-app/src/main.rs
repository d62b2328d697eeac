// station-shell -- interactive shell for the DCC command station.
//
// Two modes:
//
//   station-shell                          simulated station on stdin/stdout
//   station-shell --port /dev/ttyACM0     forward each line to real hardware
//
// In simulation mode the full dispatcher runs in-process against mock
// collaborators, so every command behaves exactly as on the board minus
// the track signal. In link mode each input line is sent to the station
// over the serial port and the response lines are echoed back.

use std::io::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use bytes::BytesMut;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use station::cmd::Dispatcher;
use station::proto::{params, ResponseWriter};
use station::transport::{SerialTransport, DEFAULT_BAUD};
use station::Transport;
use station_test_harness::{MockBoard, MockChannel, MockTempSensor, SimRefreshBuffer};

/// Interactive shell for the DCC command station.
#[derive(Parser)]
#[command(name = "station-shell", version, about)]
struct Cli {
    /// Serial port of a real station (e.g. /dev/ttyACM0, COM3).
    /// When omitted, a simulated station runs in-process.
    #[arg(long)]
    port: Option<String>,

    /// Baud rate for the serial link.
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Simulate a Pico W board instead of a plain Pico.
    #[arg(long)]
    pico_w: bool,

    /// Response timeout in milliseconds (link mode).
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout carries only protocol responses.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match &cli.port {
        Some(port) => run_link(port, cli.baud, Duration::from_millis(cli.timeout_ms)).await,
        None => run_sim(cli.pico_w).await,
    }
}

/// Simulation mode: dispatch every stdin line against mock collaborators.
async fn run_sim(pico_w: bool) -> Result<()> {
    let board = if pico_w {
        MockBoard::pico_w()
    } else {
        MockBoard::pico()
    };
    let mut dispatcher = Dispatcher::new(
        board,
        SimRefreshBuffer::new(),
        MockChannel::new(),
        MockTempSensor::default(),
    );

    tracing::info!(pico_w, "simulated station ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let prm = params::tokenize(&line);
        if prm.is_empty() {
            continue;
        }
        let stdout = std::io::stdout();
        let mut writer = ResponseWriter::new(stdout.lock());
        dispatcher
            .dispatch(&prm, &mut writer)
            .context("writing response")?;
    }

    Ok(())
}

/// Link mode: forward each stdin line to the station and echo its response.
async fn run_link(port: &str, baud: u32, timeout: Duration) -> Result<()> {
    let mut transport = SerialTransport::open(port, baud)
        .await
        .with_context(|| format!("opening {port}"))?;

    tracing::info!(port, baud, "connected to station");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let mut request = line.into_bytes();
        request.push(b'\n');
        transport.send(&request).await.context("sending request")?;

        relay_response(&mut transport, timeout).await?;
    }

    transport.close().await.context("closing serial port")?;
    Ok(())
}

/// Read response lines until the terminal line of the response arrives.
///
/// Single-line responses are terminated by their own `+`/`-` marker;
/// multi-line blocks by the `.` end-of-response line.
async fn relay_response(transport: &mut SerialTransport, timeout: Duration) -> Result<()> {
    let mut acc = BytesMut::with_capacity(1024);
    let mut chunk = [0u8; 256];
    let stdout = std::io::stdout();

    loop {
        let n = transport
            .receive(&mut chunk, timeout)
            .await
            .context("waiting for response")?;
        acc.extend_from_slice(&chunk[..n]);

        while let Some(pos) = acc.iter().position(|&b| b == b'\n') {
            let raw = acc.split_to(pos + 1);
            let line = String::from_utf8_lossy(&raw[..pos]);
            let line = line.trim_end_matches('\r');
            writeln!(stdout.lock(), "{line}").context("writing response")?;

            if is_terminal_line(line) {
                return Ok(());
            }
        }
    }
}

/// Whether `line` completes a response.
///
/// Error lines always carry a token after the marker, which keeps them
/// distinct from negative slot indices in rbuf header lines ("-1 0").
fn is_terminal_line(line: &str) -> bool {
    line == "." || line == "+" || line.starts_with("+ ") || line.starts_with("- ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_error_and_eor_lines_terminate() {
        assert!(is_terminal_line("+ 20"));
        assert!(is_terminal_line("+"));
        assert!(is_terminal_line("- inv_cmd"));
        assert!(is_terminal_line("."));
    }

    #[test]
    fn diagnostic_data_lines_do_not_terminate() {
        // rbuf header and entry lines keep the relay reading.
        assert!(!is_terminal_line("0 2"));
        assert!(!is_terminal_line("-1 0"));
        assert!(!is_terminal_line("0 3 1 0 128 0 0 0 0 0 0 0 0 0 0 0 1 1"));
        assert!(!is_terminal_line("help (list all commands)"));
        assert!(!is_terminal_line(""));
    }
}
