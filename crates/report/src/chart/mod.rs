mod metric;
mod series;

pub use metric::{ChartMetric, Extractor, MetricSpec, SeriesSpec};
pub use series::{gas_used_percent, BlockDerivation, ChartPoint, ChartSeries, SeriesBuilder};

use serde::{Deserialize, Serialize};

/// Display surface; constrained surfaces get a shorter chart window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}
