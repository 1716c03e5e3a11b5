use crate::units::{auto_format, auto_format_signed};
use alloy::primitives::U256;
use burnstats_core::{totals::TotalsWindow, IndexSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub window: &'static str,
    pub burned: String,
    pub rewards: String,
    pub tips: String,
    pub issuance: String,
    pub net_reduction: f64,
    pub base_fee_min: String,
    pub base_fee_median: String,
    pub base_fee_ninetieth: String,
    pub base_fee_max: String,
}

/// Headline numbers for the current session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub current_block: u64,
    pub current_base_fee: String,
    pub current_priority_fee: String,
    pub since: DateTime<Utc>,
    pub elapsed_secs: i64,
    pub block_count: u64,
    pub transaction_count: u64,
    pub transactions_per_block: f64,
    pub burned: String,
    pub tips: String,
    pub rewards: String,
    pub min_base_fee: Option<String>,
    pub max_base_fee: Option<String>,
    pub clients: u32,
    pub version: String,
    pub usd_price: f64,
    pub windows: Vec<WindowSummary>,
}

impl SessionSummary {
    pub fn new(snapshot: &IndexSnapshot, now: DateTime<Utc>) -> Self {
        let details = &snapshot.details;
        let session = &snapshot.session;

        let windows = TotalsWindow::ALL
            .iter()
            .map(|&window| {
                let totals = details.base.window(window);
                let percentiles = &totals.base_fee_percentiles;
                WindowSummary {
                    window: window.label(),
                    burned: auto_format(totals.burned).to_string(),
                    rewards: auto_format(totals.rewards).to_string(),
                    tips: auto_format(totals.tips).to_string(),
                    issuance: auto_format_signed(totals.issuance).to_string(),
                    net_reduction: totals.net_reduction,
                    base_fee_min: auto_format(U256::from(percentiles.minimum)).to_string(),
                    base_fee_median: auto_format(U256::from(percentiles.median)).to_string(),
                    base_fee_ninetieth: auto_format(U256::from(percentiles.ninetieth)).to_string(),
                    base_fee_max: auto_format(U256::from(percentiles.maximum)).to_string(),
                }
            })
            .collect();

        Self {
            current_block: details.current_block,
            current_base_fee: auto_format(details.current_base_fee).to_string(),
            current_priority_fee: auto_format(details.current_priority_fee).to_string(),
            since: session.since,
            elapsed_secs: (now - session.since).num_seconds().max(0),
            block_count: session.block_count,
            transaction_count: session.transaction_count,
            transactions_per_block: session.transactions_per_block(),
            burned: auto_format(session.burned).to_string(),
            tips: auto_format(session.tips).to_string(),
            rewards: auto_format(session.rewards).to_string(),
            min_base_fee: session.min_base_fee.map(|v| auto_format(v).to_string()),
            max_base_fee: session.max_base_fee.map(|v| auto_format(v).to_string()),
            clients: details.base.clients,
            version: details.base.version.clone(),
            usd_price: details.base.usd_price,
            windows,
        }
    }
}
