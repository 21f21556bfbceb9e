use std::path::PathBuf;

use chainbridge_primitives::prelude::{Address, ChainId};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chainbridge-cli",
    about = "Local tooling for the chainbridge control core",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    ResourceId(ResourceIdArgs),

    Replay(ReplayArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the resource id of an asset", version)]
pub(crate) struct ResourceIdArgs {
    #[arg(long, help = "the address of the asset contract")]
    pub(crate) asset: Address,

    #[arg(long, help = "the chain the asset contract is deployed on")]
    pub(crate) chain_id: ChainId,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Apply a script of operations to a fresh bridge core and report the outcome",
    version
)]
pub(crate) struct ReplayArgs {
    #[arg(
        long,
        short = 'p',
        help = "the file containing the params for the bridge core",
        default_value = "params.toml"
    )]
    pub(crate) params: PathBuf,

    #[arg(long, short = 's', help = "the file containing the operations to apply")]
    pub(crate) script: PathBuf,

    #[arg(long, help = "stop at the first operation that fails")]
    pub(crate) fail_fast: bool,
}
