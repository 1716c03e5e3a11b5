use crate::error::BurnstatsError;
use burnstats_config::DashboardConfig;
use tracing::info;

pub fn config_init(out: &str) -> Result<(), BurnstatsError> {
    DashboardConfig::default().save_toml(out)?;
    info!("wrote default config to {out}");
    Ok(())
}
