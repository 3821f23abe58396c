use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use gunstick_serial::{open_line_source, Session, SessionConfig, TickOutcome};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Read the gun joystick controller over serial and log its channels.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML session configuration
    #[arg(short, long, default_value = "gunstick.toml")]
    config: PathBuf,
    /// Override the serial port name
    #[arg(long)]
    port: Option<String>,
    /// Override the baud rate
    #[arg(long)]
    baud: Option<u32>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = SessionConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(port) = cli.port {
        config.port.name = port;
    }
    if let Some(baud) = cli.baud {
        config.port.baud_rate = baud;
    }

    let source = open_line_source(&config.port)?;
    let mut session = Session::new(source, config.conditioning, config.channels.clone())?;
    info!(
        port = %config.port.name,
        baud = config.port.baud_rate,
        tick_ms = config.tick_interval_ms,
        "session started"
    );

    let step = config.tick_interval();
    let mut last = session.snapshot();
    loop {
        let started = Instant::now();

        match session.tick() {
            Ok(TickOutcome::Updated) => {
                let state = session.state();
                if state.just_pressed() {
                    info!(button = %state.names().fire, "pressed");
                } else if state.just_released() {
                    info!(button = %state.names().fire, "released");
                }

                let snapshot = session.snapshot();
                if snapshot != last {
                    info!(
                        horizontal = snapshot.horizontal,
                        vertical = snapshot.vertical,
                        aim_horizontal = snapshot.aim_horizontal,
                        aim_vertical = snapshot.aim_vertical,
                        fire = snapshot.fire,
                        "channels"
                    );
                    last = snapshot;
                }
            }
            Ok(outcome) => debug!(?outcome, "tick"),
            Err(e) => {
                error!(port = %config.port.name, "transport failed: {e}");
                return Err(e).context("serial transport");
            }
        }

        // Fixed time step; a slow tick just starts the next one late
        if let Some(rest) = step.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}
