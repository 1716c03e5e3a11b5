use crate::{chart::ChartSeries, table::BlockRow, Result};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Serialize)]
struct ChartCsvRow<'a> {
    number: Option<u64>,
    timestamp: Option<&'a str>,
    primary: f64,
    secondary: Option<f64>,
    issuance: String,
    burned: String,
    reduction: f64,
    gas_used_percent: f64,
}

/// Writes one CSV row per chart point, oldest first. Amounts are exact wei.
pub fn write_series_csv<W: Write>(writer: W, series: &ChartSeries) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for point in &series.points {
        writer.serialize(ChartCsvRow {
            number: point.number,
            timestamp: point.timestamp.as_deref(),
            primary: point.primary,
            secondary: point.secondary,
            issuance: point.derived.issuance.to_string(),
            burned: point.derived.burned.to_string(),
            reduction: point.derived.reduction,
            gas_used_percent: point.gas_used_percent,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_rows_csv<W: Write>(writer: W, rows: &[BlockRow]) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// Saves the series to `path`, choosing CSV or JSON from the extension.
pub fn save_series(path: &str, series: &ChartSeries) -> Result<()> {
    info!("exporting {} chart to {path}", series.metric);
    let file = std::fs::File::create(path)?;
    if path.ends_with(".csv") {
        write_series_csv(file, series)
    } else {
        write_json(file, series)
    }
}
