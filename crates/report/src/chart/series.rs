use super::{metric::ChartMetric, DeviceClass};
use crate::{
    time::{absolute_time, time_since},
    units::{to_display_f64, DisplayUnit},
};
use alloy::primitives::{I256, U256};
use burnstats_core::BlockRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Borrow;

/// Values every chart shows in its tooltip, whatever the metric.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BlockDerivation {
    /// Reward minus burned; negative when more was burned than issued.
    pub issuance: I256,
    /// Burned amount, capped at the reward when issuance is negative.
    pub burned: U256,
    /// Burned as a percentage of reward, at 0.01 resolution.
    pub reduction: f64,
}

impl BlockDerivation {
    pub fn new(block: &BlockRecord) -> Self {
        let (issuance, burned) = if block.rewards >= block.burned {
            (signed(block.rewards - block.burned), block.burned)
        } else {
            let shortfall = block.burned - block.rewards;
            (-signed(shortfall), block.burned - shortfall)
        };

        Self {
            issuance,
            burned,
            reduction: reduction_percent(block.burned, block.rewards),
        }
    }
}

/// Saturates at `I256::MAX` for amounts beyond the signed range.
fn signed(value: U256) -> I256 {
    I256::try_from(value).unwrap_or(I256::MAX)
}

/// `burned * 10000 / rewards` as a percentage; zero when there is no reward.
/// Out-of-range ratios saturate rather than wrap.
fn reduction_percent(burned: U256, rewards: U256) -> f64 {
    burned
        .saturating_mul(U256::from(10_000u64))
        .checked_div(rewards)
        .map(|basis_points| u64::try_from(basis_points).unwrap_or(u64::MAX) as f64 / 100.0)
        .unwrap_or_default()
}

/// Gas used as a percentage of the gas target, zero when the target is unknown.
pub fn gas_used_percent(block: &BlockRecord) -> f64 {
    if block.gas_target == 0 {
        return 0.0;
    }
    block.gas_used as f64 / block.gas_target as f64 * 100.0
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// `None` for padding points.
    pub number: Option<u64>,
    pub timestamp: Option<String>,
    pub timeago: Option<String>,
    #[serde(flatten)]
    pub derived: BlockDerivation,
    pub gas_used_percent: f64,
    pub primary: f64,
    pub secondary: Option<f64>,
}

impl ChartPoint {
    pub fn is_placeholder(&self) -> bool {
        self.number.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub metric: ChartMetric,
    pub unit: DisplayUnit,
    pub primary_name: &'static str,
    pub secondary_name: Option<&'static str>,
    /// Exactly `window` points, oldest first.
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn real_points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter().filter(|p| !p.is_placeholder())
    }

    /// Largest primary value, used to scale the y axis.
    pub fn max_primary(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.primary + p.secondary.unwrap_or_default())
            .fold(0.0, f64::max)
    }
}

/// Stateless builder for fixed-width chart series.
#[derive(Clone, Copy, Debug)]
pub struct SeriesBuilder {
    pub window: usize,
    pub metric: ChartMetric,
    pub now: DateTime<Utc>,
}

impl SeriesBuilder {
    pub fn new(window: usize, metric: ChartMetric) -> Self {
        Self {
            window,
            metric,
            now: Utc::now(),
        }
    }

    pub fn for_device(device: DeviceClass, desktop: usize, mobile: usize, metric: ChartMetric) -> Self {
        let window = match device {
            DeviceClass::Desktop => desktop,
            DeviceClass::Mobile => mobile,
        };
        Self::new(window, metric)
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Shapes `blocks` (newest first) into exactly `window` points, oldest first.
    ///
    /// Missing history is padded with zero points at the front so the newest
    /// block always sits at the right edge.
    pub fn build<B: Borrow<BlockRecord>>(&self, blocks: &[B]) -> ChartSeries {
        let spec = self.metric.spec();
        let real = blocks.len().min(self.window);
        let padding = self.window - real;

        let placeholder = ChartPoint {
            secondary: spec.secondary.map(|_| 0.0),
            ..Default::default()
        };

        let points = std::iter::repeat(placeholder)
            .take(padding)
            .chain(blocks[..real].iter().rev().map(|block| {
                let block: &BlockRecord = block.borrow();
                let derived = BlockDerivation::new(block);
                ChartPoint {
                    number: Some(block.number),
                    timestamp: Some(absolute_time(block.timestamp)),
                    timeago: Some(time_since(block.timestamp, self.now)),
                    gas_used_percent: gas_used_percent(block),
                    primary: to_display_f64((spec.primary.extract)(block, &derived), spec.unit),
                    secondary: spec
                        .secondary
                        .map(|s| to_display_f64((s.extract)(block, &derived), spec.unit)),
                    derived,
                }
            }))
            .collect();

        ChartSeries {
            metric: self.metric,
            unit: spec.unit,
            primary_name: spec.primary.name,
            secondary_name: spec.secondary.map(|s| s.name),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GWEI: u64 = 1_000_000_000;
    const ETHER: u128 = 1_000_000_000_000_000_000;

    fn block(number: u64) -> BlockRecord {
        BlockRecord {
            number,
            timestamp: 1_630_000_000 + number,
            burned: U256::from(ETHER / 2),
            tips: U256::from(ETHER / 10),
            rewards: U256::from(2 * ETHER),
            base_fee: U256::from(40 * GWEI),
            priority_fee: U256::from(2 * GWEI),
            gas_used: 15_000_000,
            gas_target: 15_000_000,
            transactions: 100,
            type2_transactions: 50,
        }
    }

    fn newest_first(numbers: std::ops::RangeInclusive<u64>) -> Vec<BlockRecord> {
        numbers.rev().map(block).collect()
    }

    fn builder(window: usize, metric: ChartMetric) -> SeriesBuilder {
        let now = DateTime::<Utc>::from_timestamp(1_630_000_100, 0).unwrap();
        SeriesBuilder::new(window, metric).at(now)
    }

    #[test]
    fn pads_oldest_positions_when_history_is_short() {
        let blocks = newest_first(1..=2);
        let series = builder(5, ChartMetric::BaseFee).build(&blocks);

        assert_eq!(series.points.len(), 5);
        for p in &series.points[..3] {
            assert!(p.is_placeholder());
            assert_eq!(p.primary, 0.0);
            assert_eq!(p.secondary, Some(0.0));
            assert!(p.timestamp.is_none());
        }
        assert_eq!(series.points[3].number, Some(1));
        assert_eq!(series.points[4].number, Some(2));
    }

    #[test]
    fn keeps_only_most_recent_window_oldest_first() {
        let blocks = newest_first(1..=10);
        let series = builder(4, ChartMetric::Gas).build(&blocks);
        let numbers: Vec<_> = series.points.iter().map(|p| p.number.unwrap()).collect();
        assert_eq!(numbers, vec![7, 8, 9, 10]);
        assert_eq!(series.real_points().count(), 4);
    }

    #[test]
    fn empty_history_is_all_padding() {
        let series = builder(3, ChartMetric::Issuance).build::<BlockRecord>(&[]);
        assert_eq!(series.points.len(), 3);
        assert!(series.points.iter().all(|p| p.is_placeholder()));
        assert!(series.points.iter().all(|p| p.secondary.is_none()));
    }

    #[test]
    fn formats_each_metric_in_its_unit() {
        let blocks = newest_first(1..=1);

        let fees = builder(1, ChartMetric::BaseFee).build(&blocks);
        assert_eq!(fees.points[0].primary, 40.0);
        assert_eq!(fees.points[0].secondary, Some(2.0));
        assert_eq!(fees.unit, DisplayUnit::Gwei);

        let tips = builder(1, ChartMetric::Tips).build(&blocks);
        assert_eq!(tips.points[0].primary, 2.0);
        assert_eq!(tips.points[0].secondary, Some(0.1));
        assert_eq!(tips.secondary_name, Some("tips"));

        let issuance = builder(1, ChartMetric::Issuance).build(&blocks);
        assert_eq!(issuance.points[0].primary, 1.5);

        let gas = builder(1, ChartMetric::Gas).build(&blocks);
        assert_eq!(gas.points[0].primary, 15_000_000.0);
        assert_eq!(gas.points[0].gas_used_percent, 100.0);
    }

    #[test]
    fn point_carries_display_times() {
        let series = builder(1, ChartMetric::BaseFee).build(&newest_first(40..=40));
        let point = &series.points[0];
        assert_eq!(point.timestamp.as_deref(), Some("2021-08-26 17:47:20 UTC"));
        assert_eq!(point.timeago.as_deref(), Some("1 min ago"));
    }

    #[test]
    fn reduction_is_zero_without_rewards() {
        let block = BlockRecord {
            number: 1,
            ..Default::default()
        };
        let derived = BlockDerivation::new(&block);
        assert_eq!(derived.reduction, 0.0);
        assert_eq!(derived.issuance, I256::ZERO);
        assert!(derived.burned.is_zero());
    }

    #[test]
    fn extreme_amounts_saturate() {
        let minted = BlockDerivation::new(&BlockRecord {
            rewards: U256::MAX,
            ..Default::default()
        });
        assert_eq!(minted.issuance, I256::MAX);
        assert_eq!(minted.reduction, 0.0);

        let burnt = BlockDerivation::new(&BlockRecord {
            rewards: U256::from(1u64),
            burned: U256::MAX,
            ..Default::default()
        });
        assert_eq!(burnt.issuance, -I256::MAX);
        assert_eq!(burnt.burned, U256::from(1u64));
        assert_eq!(burnt.reduction, u64::MAX as f64 / 100.0);
    }

    #[test]
    fn reduction_is_burned_share_of_reward() {
        let derived = BlockDerivation::new(&block(1));
        assert_eq!(derived.reduction, 25.0);

        let thirds = BlockRecord {
            number: 2,
            burned: U256::from(1u64),
            rewards: U256::from(3u64),
            ..Default::default()
        };
        assert_eq!(BlockDerivation::new(&thirds).reduction, 33.33);
    }

    #[test]
    fn negative_issuance_caps_displayed_burn() {
        let block = BlockRecord {
            number: 1,
            rewards: U256::from(100u64),
            burned: U256::from(150u64),
            ..Default::default()
        };
        let derived = BlockDerivation::new(&block);
        assert_eq!(derived.issuance, I256::try_from(-50i64).unwrap());
        assert_eq!(derived.burned, U256::from(100u64));
        assert_eq!(derived.reduction, 150.0);
    }

    #[test]
    fn gas_percent_tolerates_missing_target() {
        let block = BlockRecord {
            number: 1,
            gas_used: 10,
            ..Default::default()
        };
        assert_eq!(gas_used_percent(&block), 0.0);
    }

    #[test]
    fn device_class_selects_window() {
        let desktop = SeriesBuilder::for_device(DeviceClass::Desktop, 100, 30, ChartMetric::Gas);
        let mobile = SeriesBuilder::for_device(DeviceClass::Mobile, 100, 30, ChartMetric::Gas);
        assert_eq!(desktop.window, 100);
        assert_eq!(mobile.window, 30);
    }
}
