//! ipcam-launcher - start the IPcam HTTPS camera server
//!
//! Configuration comes from the environment only:
//! - `PYTHON_BIN` (default `python3`)
//! - `CERT_FILE` (default `cert.pem`)
//! - `KEY_FILE` (default `key.pem`)
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `8443`)
//!
//! Relative paths are resolved against the directory holding this binary.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ipcam_launcher::{LaunchError, Launcher};

/// Start IPcam.py with TLS and bind settings taken from the environment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run all checks and print the command instead of starting it
    #[arg(long)]
    dry_run: bool,
}

fn fail(e: LaunchError) -> ! {
    eprintln!("{}", e);
    std::process::exit(e.exit_code());
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the camera server
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipcam_launcher=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    let cli = Cli::parse();

    if !cli.dry_run {
        fail(ipcam_launcher::run());
    }

    let launcher = Launcher::from_env().unwrap_or_else(|e| fail(e));
    let process = launcher.prepare().unwrap_or_else(|e| fail(e));
    println!("{}", process.command_line());

    Ok(())
}
