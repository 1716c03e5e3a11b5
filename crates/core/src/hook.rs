use crate::error::HookError;
use alloy::primitives::{utils::format_units, U256};
use std::sync::{Arc, Mutex};

/// Called by the index after every accepted (non-duplicate) insert.
pub trait OnBaseFeeChanged: Send + Sync {
    fn on_base_fee_changed(&self, base_fee: U256) -> Result<(), HookError>;
}

impl<T: OnBaseFeeChanged + ?Sized> OnBaseFeeChanged for Arc<T> {
    fn on_base_fee_changed(&self, base_fee: U256) -> Result<(), HookError> {
        (**self).on_base_fee_changed(base_fee)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NilHook;

impl OnBaseFeeChanged for NilHook {
    fn on_base_fee_changed(&self, _base_fee: U256) -> Result<(), HookError> {
        // do nothing
        Ok(())
    }
}

/// Keeps a window title in sync with the latest base fee, e.g. `"42 GWEI | Watch The Burn"`.
#[derive(Debug)]
pub struct TitleIndicator {
    original_title: String,
    current: Mutex<String>,
}

impl TitleIndicator {
    pub fn new(original_title: impl Into<String>) -> Self {
        let original_title = original_title.into();
        Self {
            current: Mutex::new(original_title.clone()),
            original_title,
        }
    }

    /// The title as last rendered.
    pub fn current(&self) -> String {
        match self.current.lock() {
            Ok(title) => title.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn render(&self, base_fee: U256) -> Result<String, HookError> {
        Ok(format!(
            "{} GWEI | {}",
            whole_gwei(base_fee)?,
            self.original_title
        ))
    }
}

impl OnBaseFeeChanged for TitleIndicator {
    fn on_base_fee_changed(&self, base_fee: U256) -> Result<(), HookError> {
        let title = self.render(base_fee)?;
        let mut current = self
            .current
            .lock()
            .map_err(|_| HookError::new("title lock poisoned"))?;
        *current = title;
        Ok(())
    }
}

/// Integer gwei, truncated toward zero.
fn whole_gwei(wei: U256) -> Result<String, HookError> {
    let gwei = format_units(wei, "gwei").map_err(|e| HookError::new(e.to_string()))?;
    Ok(gwei
        .split_once('.')
        .map(|(whole, _)| whole.to_owned())
        .unwrap_or(gwei))
}
