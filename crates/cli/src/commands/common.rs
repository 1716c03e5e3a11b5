use crate::{error::BurnstatsError, source::FileEventSource, util::print_stale_banner};
use burnstats_config::{DashboardConfig, CONFIG_ENV};
use burnstats_core::{
    hook::TitleIndicator,
    session::{run_session, SessionEnd, SessionOptions, SessionReport},
    IndexSnapshot,
};
use burnstats_report::chart::DeviceClass;
use clap::Args;
use std::{path::PathBuf, sync::Arc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Clone, Debug, Args)]
pub struct ReplayArgs {
    /// Bootstrap payload (JSON) holding recent blocks and window totals.
    #[arg(long, short, value_name = "FILE")]
    pub bootstrap: PathBuf,

    /// Newline-delimited JSON block events, applied in order after the bootstrap.
    #[arg(long, short, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, short, env = CONFIG_ENV)]
    pub config: Option<String>,

    /// Protocol version to accept. Overrides `server_version` from the config.
    #[arg(long)]
    pub expected_version: Option<String>,

    /// Use the shorter chart window for small screens.
    #[arg(long)]
    pub mobile: bool,
}

impl ReplayArgs {
    pub fn device(&self) -> DeviceClass {
        if self.mobile {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn load_config(&self) -> Result<DashboardConfig, BurnstatsError> {
        match &self.config {
            Some(path) => {
                info!("loading config from {path}");
                Ok(DashboardConfig::from_file(path)?)
            }
            None => Ok(DashboardConfig::default()),
        }
    }
}

/// Outcome of replaying a recorded feed through a session.
pub struct Replay {
    pub config: DashboardConfig,
    pub report: SessionReport,
    pub title: Arc<TitleIndicator>,
}

impl Replay {
    /// Final snapshot, or an error when nothing was ingested.
    pub fn snapshot(&self) -> Result<Arc<IndexSnapshot>, BurnstatsError> {
        self.report.snapshot.clone().ok_or(BurnstatsError::NoSnapshot)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self.report.end, SessionEnd::Stale { .. })
    }
}

/// Cancels `cancel` on CTRL-C. The task exits as soon as `cancel` fires,
/// whoever fired it.
fn spawn_ctrl_c_listener(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::task::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            res = tokio::signal::ctrl_c() => {
                if res.is_ok() {
                    warn!("CTRL-C received, stopping replay");
                    cancel.cancel();
                }
            }
        }
    })
}

/// Feeds the bootstrap and event files through a fresh session. Ctrl-C stops
/// ingestion early and keeps what was applied so far.
pub async fn replay(args: &ReplayArgs) -> Result<Replay, BurnstatsError> {
    let config = args.load_config()?;
    let options = SessionOptions {
        expected_version: args
            .expected_version
            .clone()
            .unwrap_or_else(|| config.server_version.clone()),
        max_blocks: config.history_depth(),
    };
    let title = Arc::new(TitleIndicator::new(config.title.clone()));

    let mut source = FileEventSource::open(&args.bootstrap, args.events.as_deref()).await?;

    let cancel = CancellationToken::new();
    let listener = spawn_ctrl_c_listener(cancel.clone());

    let result = run_session(&mut source, &options, title.clone(), cancel.clone()).await;
    cancel.cancel();
    if let Err(e) = listener.await {
        warn!("ctrl-c listener failed: {e}");
    }
    let report = result?;

    if let SessionEnd::Stale { expected, received } = &report.end {
        print_stale_banner(expected, received);
    }

    Ok(Replay {
        config,
        report,
        title,
    })
}
