//! The monthly spending report.
//!
//! A report is a pure function of two months of Core transactions: the requested month and the
//! one before it. Nothing here does I/O; fetching and storing happen in `commands`.
//!
//! - `aggregate` sums amounts per category
//! - `percentage` turns a category sum into a share of the total
//! - `compare` classifies the month-over-month change
//! - `Report::assemble` puts those together, and `Report::view` formats it for clients

mod aggregate;
mod compare;
mod percentage;

pub use aggregate::{aggregate, total};
pub use compare::{compare, ComparedType, Comparison};
pub use percentage::{percentage, PERCENT_DP};

use crate::error::Res;
use crate::model::{Amount, Category, CoreTransaction, YearMonth};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One category's line in a report.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Decimal,
    /// Share of the month's total, 0-100 with two decimal places.
    pub percentage: Decimal,
}

/// A user's categorized spending for one month, compared against the month before.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Report {
    pub period: YearMonth,
    pub total_amount: Decimal,
    /// Absolute difference from the previous month's total.
    pub compared_amount: Decimal,
    pub compared_type: ComparedType,
    /// Largest amount first; equal amounts fall back to category order.
    pub categories: Vec<CategoryShare>,
}

impl Report {
    /// Builds the report for `period` from that month's transactions and the previous month's.
    ///
    /// Fails only when the amounts are too large for `Decimal` arithmetic.
    pub fn assemble(
        period: YearMonth,
        current: &[CoreTransaction],
        previous: &[CoreTransaction],
    ) -> Res<Self> {
        let sums = aggregate(current)?;
        let total_amount = total(&sums)?;
        let previous_total = total(&aggregate(previous)?)?;
        let comparison = compare(total_amount, previous_total)?;

        let mut categories = sums
            .into_iter()
            .map(|(category, amount)| {
                Ok(CategoryShare {
                    category,
                    amount,
                    percentage: percentage(amount, total_amount)?,
                })
            })
            .collect::<Res<Vec<CategoryShare>>>()?;
        // `sums` iterates in category order and the sort is stable.
        categories.sort_by_key(|share| Reverse(share.amount));

        Ok(Self {
            period,
            total_amount,
            compared_amount: comparison.amount,
            compared_type: comparison.compared_type,
            categories,
        })
    }

    /// Formats the report for a JSON client.
    pub fn view(&self) -> ReportView {
        ReportView {
            year: self.period.year(),
            month: self.period.month(),
            total_amount: Amount::new(self.total_amount),
            compared_amount: Amount::new(self.compared_amount),
            compared_type: self.compared_type,
            categories: self
                .categories
                .iter()
                .map(|share| CategoryView {
                    category: share.category,
                    label: share.category.label().to_string(),
                    amount: Amount::new(share.amount),
                    percentage: format_percentage(share.percentage),
                })
                .collect(),
        }
    }
}

/// The shape a client receives: amounts as grouped whole-won strings, percentages with exactly
/// two decimal places.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub year: i32,
    pub month: u32,
    pub total_amount: Amount,
    pub compared_amount: Amount,
    pub compared_type: ComparedType,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub category: Category,
    pub label: String,
    pub amount: Amount,
    pub percentage: String,
}

fn format_percentage(value: Decimal) -> String {
    let mut value = value;
    value.rescale(PERCENT_DP);
    value.to_string()
}
