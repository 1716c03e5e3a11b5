mod commands;
mod error;
mod source;
mod util;

use commands::{BurnstatsCli, BurnstatsSubcommand, ConfigCommand};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();
    let args = BurnstatsCli::parse_args();

    match args.command {
        BurnstatsSubcommand::Summary { args } => commands::summary(&args).await?,

        BurnstatsSubcommand::Blocks {
            args,
            max_rows,
            format,
        } => commands::blocks(&args, max_rows, format).await?,

        BurnstatsSubcommand::Chart {
            args,
            metric,
            format,
            out,
        } => commands::chart(&args, metric, format, out).await?,

        BurnstatsSubcommand::Fullness {
            args,
            thresholds,
            min_streak,
        } => commands::fullness(&args, thresholds, min_streak).await?,

        BurnstatsSubcommand::Block { args, number } => commands::block(&args, number).await?,

        BurnstatsSubcommand::Config { command } => match command {
            ConfigCommand::Init { out } => commands::config_init(&out)?,
        },
    }

    Ok(())
}
