use alloy::primitives::{I256, U256};
use serde::{Deserialize, Serialize};

/// Base fee distribution over a time window, in wei.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BaseFeePercentiles {
    #[serde(rename = "Minimum", default)]
    pub minimum: u64,
    #[serde(rename = "Median", default)]
    pub median: u64,
    #[serde(rename = "ninetieth", default)]
    pub ninetieth: u64,
    #[serde(rename = "Maximum", default)]
    pub maximum: u64,
}

/// Aggregate statistics for one trailing window.
///
/// These are computed upstream and stored verbatim; the index never derives them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Totals {
    pub id: String,
    pub base_fee: u64,
    pub base_fee_percentiles: BaseFeePercentiles,
    pub burned: U256,
    pub duration: u64,
    pub issuance: I256,
    pub rewards: U256,
    pub tips: U256,
    pub net_reduction: f64,
}

/// Trailing windows that accompany every bootstrap and block event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TotalsWindow {
    Hour,
    Day,
    Week,
    Month,
    AllTime,
}

impl TotalsWindow {
    pub const ALL: [TotalsWindow; 5] = [
        TotalsWindow::Hour,
        TotalsWindow::Day,
        TotalsWindow::Week,
        TotalsWindow::Month,
        TotalsWindow::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TotalsWindow::Hour => "hour",
            TotalsWindow::Day => "day",
            TotalsWindow::Week => "week",
            TotalsWindow::Month => "month",
            TotalsWindow::AllTime => "all time",
        }
    }
}

impl std::fmt::Display for TotalsWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_totals() {
        let json = r#"{
            "id": "day",
            "baseFee": 30000000000,
            "baseFeePercentiles": {"Maximum": 90, "Median": 40, "Minimum": 10, "ninetieth": 80},
            "burned": "0x3635c9adc5dea00000",
            "duration": 86400,
            "issuance": "-1000",
            "rewards": "0x0",
            "tips": "0x0"
        }"#;
        let totals: Totals = serde_json::from_str(json).unwrap();
        assert_eq!(totals.base_fee_percentiles.maximum, 90);
        assert_eq!(totals.base_fee_percentiles.ninetieth, 80);
        assert_eq!(totals.burned, U256::from(1_000_000_000_000_000_000_000u128));
        assert!(totals.issuance.is_negative());
        assert_eq!(totals.net_reduction, 0.0);
    }
}
