//! configer: load layered configuration and print it
//!
//! Demonstrates repeatable `--config` flags feeding the config loader.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
