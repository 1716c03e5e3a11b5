mod dashboard;
pub mod error;

pub use dashboard::{ChartConfig, DashboardConfig, FullnessConfig, TableConfig};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Environment variable consulted for the config path when none is given.
pub const CONFIG_ENV: &str = "BURNSTATS_CONFIG";
