mod block;
mod blocks;
mod burnstats_subcommand;
mod chart;
mod common;
mod config;
mod fullness;
mod summary;

use clap::Parser;

pub use block::block;
pub use blocks::blocks;
pub use burnstats_subcommand::{BurnstatsSubcommand, ConfigCommand, OutputFormat};
pub use chart::chart;
pub use config::config_init;
pub use fullness::fullness;
pub use summary::summary;

#[derive(Parser, Debug)]
#[command(
    name = "burnstats",
    version,
    about = "Replay a block feed and render burn statistics"
)]
pub struct BurnstatsCli {
    #[command(subcommand)]
    pub command: BurnstatsSubcommand,
}

impl BurnstatsCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
