//! Prints live telemetry received over a network socket.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use telemetry_viewer::transport::{SocketTransport, Transport};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Telemetry packet console.
#[derive(Debug, Parser)]
struct Args {
    /// Network hostname
    #[arg(long)]
    hostname: Option<String>,

    /// Network port
    #[arg(long, default_value_t = 1234)]
    port: u16,

    /// Serial port to receive on
    #[arg(long)]
    serial: Option<String>,

    /// Serial baud rate
    #[arg(long, default_value_t = 38400)]
    baud: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(port) = &args.serial {
        bail!(
            "serial transport is not available ({port} at {} baud); use --hostname",
            args.baud
        );
    }
    let Some(hostname) = &args.hostname else {
        bail!("no transport given; use --hostname");
    };

    let mut telemetry = SocketTransport::connect(hostname, args.port)?;
    println!("Opened network socket on {hostname}: {}", args.port);

    let stdout = std::io::stdout();
    loop {
        telemetry.process_rx()?;
        thread::sleep(POLL_INTERVAL);

        let mut out = stdout.lock();
        while let Some(packet) = telemetry.next_rx_packet() {
            writeln!(out)?;
            writeln!(out, "{packet}")?;
        }
        while let Some(byte) = telemetry.next_rx_byte() {
            write!(out, "{}", char::from(byte))?;
        }
        out.flush().context("writing to stdout")?;

        if telemetry.is_closed() {
            println!();
            log::info!("remote closed the connection");
            return Ok(());
        }
    }
}
