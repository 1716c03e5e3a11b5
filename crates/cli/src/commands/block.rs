use super::common::{replay, ReplayArgs};
use crate::{
    error::BurnstatsError,
    util::{bold, print_kv},
};
use burnstats_core::{BlockRecord, IndexSnapshot};
use burnstats_report::{
    chart::BlockDerivation, fullness::gas_used_percent_of_limit, table::BlockRow,
    units::auto_format_signed,
};
use chrono::Utc;

/// Requested block, or the newest one when no number is given.
fn find_block(
    snapshot: &IndexSnapshot,
    number: Option<u64>,
) -> Result<&BlockRecord, BurnstatsError> {
    match number {
        Some(number) => snapshot
            .get_block_stats(number)
            .ok_or(BurnstatsError::BlockNotFound(number)),
        None => snapshot.latest().ok_or(BurnstatsError::EmptyIndex),
    }
}

pub async fn block(args: &ReplayArgs, number: Option<u64>) -> Result<(), BurnstatsError> {
    let replay = replay(args).await?;
    let snapshot = replay.snapshot()?;
    let block = find_block(&snapshot, number)?;

    let row = BlockRow::new(block, Utc::now());
    let derived = BlockDerivation::new(block);

    println!("{}", bold(format!("block {}", row.number)));
    print_kv("time", format!("{} ({})", row.time, row.age));
    print_kv("base fee", &row.base_fee);
    print_kv("priority fee", &row.priority_fee);
    print_kv("burned", &row.burned);
    print_kv("tips", &row.tips);
    print_kv("rewards", &row.rewards);
    print_kv("net issuance", auto_format_signed(derived.issuance));
    print_kv("burned / reward", format!("{:.2}%", derived.reduction));
    print_kv(
        "gas used",
        format!(
            "{} ({}% of target, {:.1}% of limit)",
            row.gas_used,
            row.gas_used_percent,
            gas_used_percent_of_limit(block)
        ),
    );
    print_kv(
        "transactions",
        format!("{} ({}% type 2)", row.transactions, row.type2_percent),
    );
    Ok(())
}
