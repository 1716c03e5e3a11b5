use crate::Result;
use burnstats_report::chart::{ChartMetric, DeviceClass};
use serde::{Deserialize, Serialize};
use std::fs::read;

/// Dashboard settings. Defines the TOML schema for config files; every
/// field is optional on disk and falls back to its default.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Protocol version this client understands.
    pub server_version: String,

    /// Window title the base-fee indicator decorates.
    pub title: String,

    pub chart: ChartConfig,
    pub table: TableConfig,
    pub fullness: FullnessConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    pub max_blocks: usize,
    pub max_blocks_mobile: usize,
    pub metric: ChartMetric,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub max_rows: usize,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FullnessConfig {
    /// Gas-limit percentages above which a block counts as full.
    pub thresholds: Vec<u8>,
    pub min_streak: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_version: "1.0.0".to_owned(),
            title: "Watch The Burn".to_owned(),
            chart: ChartConfig::default(),
            table: TableConfig::default(),
            fullness: FullnessConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_blocks: 150,
            max_blocks_mobile: 40,
            metric: ChartMetric::BaseFee,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { max_rows: 50 }
    }
}

impl Default for FullnessConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![90, 95, 99],
            min_streak: 3,
        }
    }
}

impl ChartConfig {
    /// Number of chart points shown on `device`.
    pub fn window(&self, device: DeviceClass) -> usize {
        match device {
            DeviceClass::Desktop => self.max_blocks,
            DeviceClass::Mobile => self.max_blocks_mobile,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(file_path: &str) -> Result<DashboardConfig> {
        let file_contents_str = String::from_utf8_lossy(&read(file_path)?).to_string();
        Self::from_toml(&file_contents_str)
    }

    pub fn from_toml(contents: &str) -> Result<DashboardConfig> {
        Ok(toml::from_str(contents)?)
    }

    pub fn encode_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn save_toml(&self, file_path: &str) -> Result<()> {
        let encoded = self.encode_toml()?;
        std::fs::write(file_path, encoded)?;
        Ok(())
    }

    /// Number of blocks the bootstrap should deliver; the larger of the chart
    /// and table windows.
    pub fn history_depth(&self) -> usize {
        self.chart
            .max_blocks
            .max(self.chart.max_blocks_mobile)
            .max(self.table.max_rows)
    }
}
