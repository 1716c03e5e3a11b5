use super::{
    common::{replay, ReplayArgs},
    OutputFormat,
};
use crate::{error::BurnstatsError, util::bold};
use burnstats_report::{
    export::{write_json, write_rows_csv},
    table::{block_rows, BlockRow},
};
use chrono::Utc;

pub async fn blocks(
    args: &ReplayArgs,
    max_rows: Option<usize>,
    format: OutputFormat,
) -> Result<(), BurnstatsError> {
    let replay = replay(args).await?;
    let snapshot = replay.snapshot()?;
    let max_rows = max_rows.unwrap_or(replay.config.table.max_rows);
    let rows = block_rows(&snapshot.blocks, max_rows, Utc::now());

    match format {
        OutputFormat::Text => print_rows(&rows),
        OutputFormat::Json => write_json(std::io::stdout().lock(), &rows)?,
        OutputFormat::Csv => write_rows_csv(std::io::stdout().lock(), &rows)?,
    }
    Ok(())
}

fn print_rows(rows: &[BlockRow]) {
    println!(
        "{}",
        bold(format!(
            "{:>10} {:>20} {:>20} {:>16} {:>16} {:>6} {:>5} {:>6}  {}",
            "block", "burned", "rewards", "base fee", "tip", "gas%", "txs", "type2%", "age"
        ))
    );
    for row in rows {
        println!(
            "{:>10} {:>20} {:>20} {:>16} {:>16} {:>5}% {:>5} {:>5}%  {}",
            row.number,
            row.burned,
            row.rewards,
            row.base_fee,
            row.priority_fee,
            row.gas_used_percent,
            row.transactions,
            row.type2_percent,
            row.age
        );
    }
}
