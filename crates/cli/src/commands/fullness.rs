use super::common::{replay, ReplayArgs};
use crate::{
    error::BurnstatsError,
    util::{bold, print_kv},
};
use burnstats_report::{
    fullness::{analyze_fullness, FullnessReport},
    units::auto_format,
};

pub async fn fullness(
    args: &ReplayArgs,
    thresholds: Vec<u8>,
    min_streak: Option<usize>,
) -> Result<(), BurnstatsError> {
    let replay = replay(args).await?;
    let snapshot = replay.snapshot()?;
    let config = &replay.config.fullness;
    let thresholds = if thresholds.is_empty() {
        config.thresholds.clone()
    } else {
        thresholds
    };
    let min_streak = min_streak.unwrap_or(config.min_streak);

    for threshold in thresholds {
        print_report(&analyze_fullness(&snapshot.blocks, threshold, min_streak));
        println!();
    }
    Ok(())
}

fn print_report(report: &FullnessReport) {
    println!(
        "{}",
        bold(format!("blocks over {}% of the gas limit", report.threshold))
    );
    print_kv(
        "full",
        format!(
            "{} of {} ({:.2}%)",
            report.full_blocks,
            report.total_blocks,
            report.full_percent()
        ),
    );
    print_kv(
        &format!("in runs of {}+", report.min_streak),
        format!(
            "{} ({:.2}%)",
            report.consecutive_full_blocks,
            report.consecutive_percent()
        ),
    );

    let Some(streak) = &report.record_streak else {
        return;
    };
    print_kv(
        "longest run",
        format!(
            "{} blocks ({} .. {})",
            streak.blocks, streak.start_block, streak.end_block
        ),
    );
    for (name, stats) in [
        ("burned", &streak.burned),
        ("rewards", &streak.rewards),
        ("tips", &streak.tips),
        ("base fee", &streak.base_fee),
        ("priority fee", &streak.priority_fee),
    ] {
        print_kv(
            &format!("  {name}"),
            format!(
                "total {} | min {} | avg {} | max {}",
                auto_format(stats.total),
                auto_format(stats.min),
                auto_format(stats.average(streak.blocks)),
                auto_format(stats.max)
            ),
        );
    }
    print_kv(
        "  transactions",
        format!(
            "{} ({:.2}% type 2)",
            streak.transactions,
            streak.type2_percent()
        ),
    );
}
