//! Inbound messages from the event source.

use crate::{block::BlockRecord, totals::Totals, totals::TotalsWindow};
use serde::{Deserialize, Serialize};

/// Metadata and window totals carried by both the bootstrap payload and every
/// block event. Replaced wholesale on each accepted block.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseData {
    pub totals: Totals,
    pub totals_hour: Totals,
    pub totals_day: Totals,
    pub totals_week: Totals,
    pub totals_month: Totals,
    pub clients: u32,
    pub version: String,
    pub usd_price: f64,
}

impl Default for BaseData {
    fn default() -> Self {
        Self {
            totals: Totals::default(),
            totals_hour: Totals::default(),
            totals_day: Totals::default(),
            totals_week: Totals::default(),
            totals_month: Totals::default(),
            clients: 0,
            version: "NA".to_owned(),
            usd_price: 1.0,
        }
    }
}

impl BaseData {
    pub fn window(&self, window: TotalsWindow) -> &Totals {
        match window {
            TotalsWindow::Hour => &self.totals_hour,
            TotalsWindow::Day => &self.totals_day,
            TotalsWindow::Week => &self.totals_week,
            TotalsWindow::Month => &self.totals_month,
            TotalsWindow::AllTime => &self.totals,
        }
    }
}

/// Bootstrap payload delivered once per connection.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialData {
    /// Recent blocks, newest first.
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
    #[serde(flatten)]
    pub base: BaseData,
    /// Chain head reported by the source at bootstrap time.
    #[serde(default)]
    pub block_number: u64,
}

/// One new-block event.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
    pub block: BlockRecord,
    #[serde(flatten)]
    pub base: BaseData,
}

impl BlockData {
    pub fn new(block: BlockRecord, base: BaseData) -> Self {
        Self { block, base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_block_event_with_flattened_totals() {
        let json = r#"{
            "block": {"number": 42, "baseFee": "0x3b9aca00"},
            "totals": {"id": "infinity", "burned": "0x10"},
            "totalsHour": {"id": "hour"},
            "clients": 12,
            "version": "1.0.0",
            "usdPrice": 3200.5
        }"#;
        let data: BlockData = serde_json::from_str(json).unwrap();
        assert_eq!(data.block.number, 42);
        assert_eq!(data.base.clients, 12);
        assert_eq!(data.base.version, "1.0.0");
        assert_eq!(data.base.totals.id, "infinity");
        assert_eq!(data.base.window(TotalsWindow::Hour).id, "hour");
        assert_eq!(data.base.totals_week, Totals::default());
    }

    #[test]
    fn bootstrap_defaults_when_fields_absent() {
        let data: InitialData = serde_json::from_str(r#"{"version": "2.0.0"}"#).unwrap();
        assert!(data.blocks.is_empty());
        assert_eq!(data.block_number, 0);
        assert_eq!(data.base.version, "2.0.0");
        assert_eq!(data.base.usd_price, 1.0);
    }
}
