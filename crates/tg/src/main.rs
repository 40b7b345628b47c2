//! Talent Guard - Entry Point
//!
//! Binary entry point for the `tg` command line. Lives in the facade
//! crate so the binary and the library share one name.

use clap::Parser;
use tg::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
