//! vss-send-signal: send one hardware signal to the vss-lib D-Bus service.
//!
//! Calls `EmitHardwareSignal(signal_name, value)` on
//! `com.vss_lib.VehicleSignals` (or whatever the configuration names) and
//! exits non-zero if the bus or the call fails.
//!
//! ## Configuration
//! - VSS_CONFIG: Path to a YAML configuration file (optional)
//! - VSS__BUS__TYPE / VSS__BUS__ADDRESS: Bus selection (default: system bus)
//! - VSS__PUBLISHER__*: Remote addressing and call timeout
//! - VSS_LOG: Tracing filter (default: info)
//! - VSS_LOG_FORMAT: `json` for JSON log lines

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use vss_client::BusConfig;
use vss_lib::config::Config;
use vss_lib::utils::bootstrap::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "vss-send-signal")]
#[command(about = "Send a hardware signal to the vss-lib D-Bus service")]
struct Args {
    /// Signal name, e.g. Speed
    #[arg(default_value = "Speed")]
    signal: String,

    /// Signal value
    #[arg(default_value_t = 80.0, allow_negative_numbers = true)]
    value: f64,

    /// Vendor reporting the signal
    #[arg(long)]
    vendor: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// D-Bus address to use instead of the configured bus
    #[arg(long)]
    bus_address: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Could not send the signal");
            eprintln!("Error: Could not send the signal. Details: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.bus_address {
        config.bus = BusConfig::address(address);
    }

    let publisher = config.publisher()?;
    info!(
        service = publisher.target().service(),
        method = publisher.method(),
        "vss-send-signal started"
    );

    publisher.publish(&args.signal, args.value).await?;

    match args.vendor {
        Some(vendor) => println!(
            "Hardware signal '{}' with value {} sent to D-Bus by {}.",
            args.signal, args.value, vendor
        ),
        None => println!(
            "Hardware signal '{}' with value {} sent to D-Bus.",
            args.signal, args.value
        ),
    }
    Ok(())
}
