use crate::error::Res;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of this month's spending relative to last month's.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparedType {
    More,
    Less,
    Same,
}

serde_plain::derive_display_from_serialize!(ComparedType);
serde_plain::derive_fromstr_from_deserialize!(ComparedType);

/// The absolute month-over-month delta and its direction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Comparison {
    pub amount: Decimal,
    pub compared_type: ComparedType,
}

/// Compares exactly; there is no tolerance.
pub fn compare(current: Decimal, previous: Decimal) -> Res<Comparison> {
    let compared_type = match current.cmp(&previous) {
        Ordering::Greater => ComparedType::More,
        Ordering::Less => ComparedType::Less,
        Ordering::Equal => ComparedType::Same,
    };
    let amount = current
        .checked_sub(previous)
        .with_context(|| format!("Cannot compare {current} with {previous}"))?
        .abs();
    Ok(Comparison {
        amount,
        compared_type,
    })
}
