//! Display-ready views over index snapshots: chart series, block tables,
//! session summaries and gas-limit fullness.

pub mod chart;
pub mod error;
pub mod export;
pub mod fullness;
pub mod summary;
pub mod table;
pub mod time;
pub mod units;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
