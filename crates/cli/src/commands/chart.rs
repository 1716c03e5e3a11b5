use super::{
    common::{replay, ReplayArgs},
    OutputFormat,
};
use crate::{
    error::BurnstatsError,
    util::{bold, dim},
};
use burnstats_report::{
    chart::{ChartMetric, ChartSeries, SeriesBuilder},
    export::{save_series, write_json, write_series_csv},
};
use nu_ansi_term::Color;
use std::{fs::File, io::Write};
use tracing::info;

const BAR_WIDTH: f64 = 50.0;

pub async fn chart(
    args: &ReplayArgs,
    metric: Option<ChartMetric>,
    format: OutputFormat,
    out: Option<String>,
) -> Result<(), BurnstatsError> {
    let replay = replay(args).await?;
    let snapshot = replay.snapshot()?;
    let chart = &replay.config.chart;
    let metric = metric.unwrap_or(chart.metric);

    let series = SeriesBuilder::new(chart.window(args.device()), metric).build(&snapshot.blocks);

    match (format, out) {
        (OutputFormat::Text, None) => print_series(&series),
        (OutputFormat::Text, Some(path)) => save_series(&path, &series)?,
        (OutputFormat::Json, None) => write_json(std::io::stdout().lock(), &series)?,
        (OutputFormat::Csv, None) => write_series_csv(std::io::stdout().lock(), &series)?,
        (format, Some(path)) => {
            let mut file = File::create(&path)?;
            match format {
                OutputFormat::Csv => write_series_csv(&mut file, &series)?,
                _ => write_json(&mut file, &series)?,
            }
            file.flush()?;
            info!("wrote {metric} chart to {path}");
        }
    }
    Ok(())
}

fn print_series(series: &ChartSeries) {
    let legend = match series.secondary_name {
        Some(secondary) => format!(
            "{} + {}",
            Color::Yellow.paint(series.primary_name),
            Color::Green.paint(secondary)
        ),
        None => Color::Yellow.paint(series.primary_name).to_string(),
    };
    println!(
        "{} [{}] {legend}",
        bold(format!("{} chart", series.metric)),
        series.unit
    );

    let padding = series.points.len() - series.real_points().count();
    if padding > 0 {
        println!("{}", dim(format!("({padding} empty slots before the oldest block)")));
    }

    let max = series.max_primary();
    let scale = |value: f64| {
        if max > 0.0 {
            (value.abs() / max * BAR_WIDTH).round() as usize
        } else {
            0
        }
    };

    for point in series.real_points() {
        let number = point.number.unwrap_or_default();
        let primary = Color::Yellow.paint("#".repeat(scale(point.primary)));
        let secondary = point
            .secondary
            .map(|s| Color::Green.paint("+".repeat(scale(s))).to_string())
            .unwrap_or_default();
        let values = match point.secondary {
            Some(s) => format!("{:>14.4} {:>12.4}", point.primary, s),
            None => format!("{:>14.4} {:>12}", point.primary, ""),
        };
        println!("{number:>10} {values} {primary}{secondary}");
    }
}
