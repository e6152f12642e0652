//! Reward granted after a fully watched rewarded video.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    pub amount: i32,
    pub currency: String,
}

impl RewardItem {
    pub fn new(amount: i32, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Builds a reward from the network's verification response.
    ///
    /// The network reports the amount as a decimal string; it is truncated.
    /// Returns `None` when the amount is missing or not a number.
    pub fn from_verification(response: &HashMap<String, String>) -> Option<Self> {
        let amount: f64 = response.get("amount")?.trim().parse().ok()?;
        if !amount.is_finite() {
            return None;
        }
        let currency = response.get("currency").cloned().unwrap_or_default();

        Some(Self {
            amount: amount.trunc() as i32,
            currency,
        })
    }
}
