//! Command-line interface for configer
//!
//! Loads one of the sample configs from repeated `--config` files plus the
//! environment and prints the result as JSON.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use configer::{Config, StringSlice};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;

use app::{AppConfig, FileServerConfig};

/// Load layered configuration from files and environment variables
#[derive(Parser)]
#[command(name = "configer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load (.json, .yaml, .yml, .env); repeat to layer files,
    /// later files override earlier ones
    #[arg(short = 'c', long = "config", value_name = "PATH", action = ArgAction::Append)]
    config: Vec<String>,

    /// Which sample config to load
    #[arg(short, long, value_enum, default_value_t = Sample::App)]
    sample: Sample,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Sample {
    /// Name, log settings, environment and ids
    App,
    /// Server address, port and served directory
    FileServer,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let mut files = StringSlice::new();
    for path in cli.config {
        files.set(path);
    }
    tracing::debug!("Loading configuration from [{}]", files);

    match cli.sample {
        Sample::App => print_loaded::<AppConfig>(&files),
        Sample::FileServer => print_loaded::<FileServerConfig>(&files),
    }
}

fn print_loaded<C: Config + Default>(files: &StringSlice) -> Result<()> {
    let mut cfg = C::default();
    configer::load(&mut cfg, files).context("Failed loading configuration")?;

    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
