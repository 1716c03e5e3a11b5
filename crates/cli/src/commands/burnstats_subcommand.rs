use super::common::ReplayArgs;
use burnstats_report::chart::ChartMetric;
use clap::{Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum BurnstatsSubcommand {
    #[command(
        name = "summary",
        long_about = "Replay the feed and print session counters and window totals."
    )]
    Summary {
        #[command(flatten)]
        args: ReplayArgs,
    },

    #[command(name = "blocks", long_about = "Print the most recent blocks, newest first.")]
    Blocks {
        #[command(flatten)]
        args: ReplayArgs,

        /// Maximum number of rows. Defaults to the configured table size.
        #[arg(long, short = 'n')]
        max_rows: Option<usize>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    #[command(name = "chart", long_about = "Render a fixed-width chart series.")]
    Chart {
        #[command(flatten)]
        args: ReplayArgs,

        /// One of basefee, tips, issuance, gas. Defaults to the configured metric.
        #[arg(long, short)]
        metric: Option<ChartMetric>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the series to this file instead of stdout.
        #[arg(long, short)]
        out: Option<String>,
    },

    #[command(
        name = "fullness",
        long_about = "Report how many blocks ran close to the gas limit, and the longest run of such blocks."
    )]
    Fullness {
        #[command(flatten)]
        args: ReplayArgs,

        /// Gas-limit percentages above which a block counts as full, e.g. `90,95,99`.
        #[arg(long = "threshold", short, value_delimiter = ',')]
        thresholds: Vec<u8>,

        /// Shortest run that counts as consecutive full blocks.
        #[arg(long)]
        min_streak: Option<usize>,
    },

    #[command(
        name = "block",
        long_about = "Look up a single block in the index. Defaults to the newest block."
    )]
    Block {
        #[command(flatten)]
        args: ReplayArgs,

        number: Option<u64>,
    },

    #[command(name = "config", about = "Config file commands")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    #[command(name = "init", about = "Write a config file with default settings")]
    Init {
        #[arg(long, short, default_value = "burnstats.toml")]
        out: String,
    },
}
