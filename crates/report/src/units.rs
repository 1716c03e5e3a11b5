//! Exact unit scaling for wei-denominated amounts.
//!
//! Amounts stay integers until [`to_display_f64`] or [`auto_format`] renders
//! them; the only lossy step is the final parse into `f64`.

use alloy::primitives::{
    utils::{format_units, ParseUnits},
    I256, U256,
};
use serde::{Deserialize, Serialize};

/// 0.00009 ether; larger amounts are shown in ETH.
const MIN_BOUND_ETHER: U256 = U256::from_limbs([90_000_000_000_000, 0, 0, 0]);
/// 0.00001 gwei; smaller amounts are shown in WEI.
const MIN_BOUND_GWEI: U256 = U256::from_limbs([10_000, 0, 0, 0]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DisplayUnit {
    Wei,
    Gwei,
    Ether,
}

impl DisplayUnit {
    /// Unit name understood by `format_units`.
    pub fn name(&self) -> &'static str {
        match self {
            DisplayUnit::Wei => "wei",
            DisplayUnit::Gwei => "gwei",
            DisplayUnit::Ether => "ether",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayUnit::Wei => "WEI",
            DisplayUnit::Gwei => "GWEI",
            DisplayUnit::Ether => "ETH",
        }
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scales `amount` into `unit` and parses the result, falling back to `0.0`.
pub fn to_display_f64(amount: impl Into<ParseUnits>, unit: DisplayUnit) -> f64 {
    format_units(amount, unit.name())
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or_default()
}

/// Exact decimal string of `amount` in `unit`, without trailing zeros.
pub fn format_amount(amount: impl Into<ParseUnits>, unit: DisplayUnit) -> String {
    format_units(amount, unit.name())
        .map(|s| trim_decimals(&s).to_owned())
        .unwrap_or_else(|_| "0".to_owned())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AutoFormatted {
    pub value: String,
    pub unit: DisplayUnit,
}

impl std::fmt::Display for AutoFormatted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Picks the most readable unit for a wei amount.
pub fn auto_format(amount: U256) -> AutoFormatted {
    if amount.is_zero() {
        return AutoFormatted {
            value: "0".to_owned(),
            unit: DisplayUnit::Wei,
        };
    }

    let unit = if amount > MIN_BOUND_ETHER {
        DisplayUnit::Ether
    } else if amount < MIN_BOUND_GWEI {
        DisplayUnit::Wei
    } else {
        DisplayUnit::Gwei
    };

    AutoFormatted {
        value: format_amount(amount, unit),
        unit,
    }
}

/// Like [`auto_format`], keeping the sign of a net amount.
pub fn auto_format_signed(amount: I256) -> AutoFormatted {
    let mut formatted = auto_format(amount.unsigned_abs());
    if amount.is_negative() {
        formatted.value.insert(0, '-');
    }
    formatted
}

fn trim_decimals(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
