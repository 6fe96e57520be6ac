//! Splitting a parent's auto-transfer between a child's allowance and investment balances.

use crate::error::Res;
use crate::model::Amount;
use anyhow::{bail, Context};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The two parts of an auto-transfer. `allowance + investment` always equals the amount split.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSplit {
    pub allowance: Amount,
    pub investment: Amount,
}

/// Splits `amount` so that `investment_ratio` percent goes to investment, rounded down to whole
/// won, and the remainder goes to allowance.
///
/// ```
/// # use famibank::transfer::split;
/// # use rust_decimal::Decimal;
/// let s = split(Decimal::from(10_001), 30).unwrap();
/// assert_eq!(s.investment.value(), Decimal::from(3_000));
/// assert_eq!(s.allowance.value(), Decimal::from(7_001));
/// ```
pub fn split(amount: Decimal, investment_ratio: u8) -> Res<TransferSplit> {
    if amount <= Decimal::ZERO {
        bail!("The transfer amount must be positive, got {amount}");
    }
    if investment_ratio > 100 {
        bail!("The investment ratio is a percentage from 0 to 100, got {investment_ratio}");
    }

    let investment = amount
        .checked_mul(Decimal::from(investment_ratio))
        .with_context(|| format!("The transfer amount {amount} is too large"))?
        / Decimal::ONE_HUNDRED;
    let investment = investment.round_dp_with_strategy(0, RoundingStrategy::ToZero);
    let allowance = amount - investment;

    Ok(TransferSplit {
        allowance: Amount::new(allowance),
        investment: Amount::new(investment),
    })
}
