use super::series::BlockDerivation;
use crate::units::DisplayUnit;
use alloy::primitives::{utils::ParseUnits, U256};
use burnstats_core::BlockRecord;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Selectable chart.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChartMetric {
    /// Base fee against priority fee.
    #[default]
    BaseFee,
    /// Block reward against tips.
    Tips,
    /// Net issuance (reward minus burned).
    Issuance,
    /// Gas used.
    Gas,
}

/// Extracts a raw amount from a block and its derived values.
pub type Extractor = fn(&BlockRecord, &BlockDerivation) -> ParseUnits;

#[derive(Clone, Copy)]
pub struct SeriesSpec {
    /// Legend / tooltip name.
    pub name: &'static str,
    pub extract: Extractor,
}

impl std::fmt::Debug for SeriesSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesSpec").field("name", &self.name).finish()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MetricSpec {
    pub unit: DisplayUnit,
    pub title: &'static str,
    pub primary: SeriesSpec,
    pub secondary: Option<SeriesSpec>,
}

impl ChartMetric {
    pub fn spec(&self) -> MetricSpec {
        match self {
            ChartMetric::BaseFee => MetricSpec {
                unit: DisplayUnit::Gwei,
                title: "Base Fee",
                primary: SeriesSpec {
                    name: "basefee",
                    extract: |b, _| b.base_fee.into(),
                },
                secondary: Some(SeriesSpec {
                    name: "priorityfee",
                    extract: |b, _| b.priority_fee.into(),
                }),
            },
            ChartMetric::Tips => MetricSpec {
                unit: DisplayUnit::Ether,
                title: "Tips",
                primary: SeriesSpec {
                    name: "reward",
                    extract: |b, _| b.rewards.into(),
                },
                secondary: Some(SeriesSpec {
                    name: "tips",
                    extract: |b, _| b.tips.into(),
                }),
            },
            ChartMetric::Issuance => MetricSpec {
                unit: DisplayUnit::Ether,
                title: "Issuance",
                primary: SeriesSpec {
                    name: "issuance",
                    extract: |_, d| d.issuance.into(),
                },
                secondary: None,
            },
            ChartMetric::Gas => MetricSpec {
                unit: DisplayUnit::Wei,
                title: "Gas",
                primary: SeriesSpec {
                    name: "gas used",
                    extract: |b, _| U256::from(b.gas_used).into(),
                },
                secondary: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn metric_names_parse_back() {
        for metric in ChartMetric::iter() {
            assert_eq!(ChartMetric::from_str(&metric.to_string()).unwrap(), metric);
        }
        assert_eq!(ChartMetric::from_str("basefee").unwrap(), ChartMetric::BaseFee);
        assert!(ChartMetric::from_str("volume").is_err());
    }

    #[test]
    fn only_comparison_charts_have_a_secondary_series() {
        let with_secondary: Vec<_> = ChartMetric::iter()
            .filter(|m| m.spec().secondary.is_some())
            .collect();
        assert_eq!(with_secondary, vec![ChartMetric::BaseFee, ChartMetric::Tips]);
    }
}
