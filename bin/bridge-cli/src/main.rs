//! CLI for inspecting and exercising the bridge core locally.

mod cli;
mod handlers;
mod script;

use anyhow::Result;
use chainbridge_common::logging::{self, LoggerConfig};
use clap::Parser;

use crate::handlers::{replay, resource_id};

fn main() -> Result<()> {
    logging::init(LoggerConfig::with_base_name("chainbridge-cli"));

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::ResourceId(args) => resource_id::handle_resource_id(args),
        cli::Commands::Replay(args) => replay::handle_replay(args),
    }
}
