use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Summary of a single mined block as delivered by the event source.
///
/// Fee and value fields are exact wei amounts. Gas and transaction counts are
/// quantities: hex strings from the daemon, plain numbers are accepted too.
/// Absent fields decode to zero so a partially populated record still renders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub number: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub burned: U256,
    #[serde(default)]
    pub tips: U256,
    #[serde(default)]
    pub rewards: U256,
    #[serde(default)]
    pub base_fee: U256,
    #[serde(default)]
    pub priority_fee: U256,
    #[serde(default, with = "alloy::serde::quantity")]
    pub gas_used: u64,
    #[serde(default, with = "alloy::serde::quantity")]
    pub gas_target: u64,
    #[serde(default, with = "alloy::serde::quantity")]
    pub transactions: u64,
    #[serde(default, rename = "type2transactions", with = "alloy::serde::quantity")]
    pub type2_transactions: u64,
}

impl BlockRecord {
    /// Block gas limit implied by the EIP-1559 elasticity multiplier.
    pub fn gas_limit(&self) -> u64 {
        self.gas_target.saturating_mul(2)
    }
}
