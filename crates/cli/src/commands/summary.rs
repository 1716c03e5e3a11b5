use super::common::{replay, ReplayArgs};
use crate::{
    error::BurnstatsError,
    util::{bold, print_kv},
};
use burnstats_report::summary::SessionSummary;
use chrono::Utc;

pub async fn summary(args: &ReplayArgs) -> Result<(), BurnstatsError> {
    let replay = replay(args).await?;
    let snapshot = replay.snapshot()?;
    let summary = SessionSummary::new(&snapshot, Utc::now());

    println!("{}", bold(replay.title.current()));
    print_kv("current block", summary.current_block);
    print_kv("base fee", &summary.current_base_fee);
    print_kv("priority fee", &summary.current_priority_fee);
    print_kv("protocol version", &summary.version);
    print_kv("clients", summary.clients);
    print_kv("usd price", summary.usd_price);
    println!();

    println!("{}", bold("session"));
    print_kv("since", summary.since.format("%Y-%m-%d %H:%M:%S UTC"));
    print_kv("blocks", summary.block_count);
    print_kv("transactions", summary.transaction_count);
    print_kv("tx per block", format!("{:.2}", summary.transactions_per_block));
    print_kv("burned", &summary.burned);
    print_kv("tips", &summary.tips);
    print_kv("rewards", &summary.rewards);
    print_kv(
        "base fee range",
        match (&summary.min_base_fee, &summary.max_base_fee) {
            (Some(min), Some(max)) => format!("{min} .. {max}"),
            _ => "-".to_owned(),
        },
    );
    print_kv(
        "replayed",
        format!(
            "{} accepted, {} duplicates",
            replay.report.accepted, replay.report.duplicates
        ),
    );

    for window in &summary.windows {
        println!();
        println!("{}", bold(format!("last {}", window.window)));
        print_kv("burned", &window.burned);
        print_kv("rewards", &window.rewards);
        print_kv("tips", &window.tips);
        print_kv("net issuance", &window.issuance);
        print_kv("net reduction", format!("{:.2}%", window.net_reduction));
        print_kv(
            "base fee",
            format!(
                "min {} | median {} | 90th {} | max {}",
                window.base_fee_min,
                window.base_fee_median,
                window.base_fee_ninetieth,
                window.base_fee_max
            ),
        );
    }

    Ok(())
}
