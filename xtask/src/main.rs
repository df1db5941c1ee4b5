// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing, clippy::use_debug)]
#![allow(missing_docs)]

mod check;
mod doc;
mod program;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ov7670::CaptureMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "OV7670 bring-up development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the driver builds for the embedded target and the host
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Print a capture mode's register program
    Program {
        /// vga, qvga, qqvga or qqqvga
        #[arg(value_parser = parse_mode)]
        mode: CaptureMode,
        /// Run a bring-up against host mocks and print the bus trace
        #[arg(long)]
        simulate: bool,
    },
}

fn parse_mode(s: &str) -> Result<CaptureMode, String> {
    s.parse().map_err(|e: ov7670::mode::UnknownMode| e.to_string())
}

fn main() -> Result<()> {
    // RUST_LOG=ov7670=trace shows every register write during --simulate
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
        Commands::Program { mode, simulate } => program::run(mode, simulate),
    }
}
