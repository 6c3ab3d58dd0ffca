#![allow(dead_code)]

mod cli;
mod application;
mod domain;
mod data;
mod infra;
mod ml;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slidekit=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
