use crate::error::Res;
use crate::model::{Category, CoreTransaction};
use anyhow::Context;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sums transaction amounts per category. Categories with no transactions are absent.
///
/// Fails only if a sum leaves the range of `Decimal`.
pub fn aggregate<'a, I>(transactions: I) -> Res<BTreeMap<Category, Decimal>>
where
    I: IntoIterator<Item = &'a CoreTransaction>,
{
    let mut sums = BTreeMap::new();
    for tx in transactions {
        let sum = sums.entry(tx.category).or_insert(Decimal::ZERO);
        *sum = sum.checked_add(tx.amount).with_context(|| {
            format!(
                "The {} total overflowed at transaction '{}'",
                tx.category, tx.transaction_id
            )
        })?;
    }
    Ok(sums)
}

/// The grand total of an aggregation.
pub fn total(sums: &BTreeMap<Category, Decimal>) -> Res<Decimal> {
    sums.values().try_fold(Decimal::ZERO, |acc, sum| {
        acc.checked_add(*sum)
            .context("The month total is too large to represent")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txs(items: &[(Category, Decimal)]) -> Vec<CoreTransaction> {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        items
            .iter()
            .enumerate()
            .map(|(ix, (c, a))| CoreTransaction::new(format!("tx-{ix}"), 1, date, *c, *a))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let sums = aggregate(&Vec::<CoreTransaction>::new()).unwrap();
        assert!(sums.is_empty());
        assert_eq!(total(&sums).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_sums_per_category() {
        let input = txs(&[
            (Category::Transfer, dec!(328830)),
            (Category::Etc, dec!(126430)),
            (Category::Shopping, dec!(88440)),
            (Category::Etc, dec!(6257)),
        ]);
        let sums = aggregate(&input).unwrap();
        assert_eq!(sums.len(), 3);
        assert_eq!(sums[&Category::Etc], dec!(132687));
        assert_eq!(sums[&Category::Transfer], dec!(328830));
        assert_eq!(sums[&Category::Shopping], dec!(88440));
        assert_eq!(total(&sums).unwrap(), dec!(549957));
    }

    #[test]
    fn test_conservation() {
        let inputs = vec![
            txs(&[(Category::Food, dec!(0.1)), (Category::Food, dec!(0.2))]),
            txs(&[
                (Category::Edu, dec!(1000000)),
                (Category::Ent, dec!(12.345)),
                (Category::Transport, dec!(1250)),
                (Category::Edu, dec!(0)),
                (Category::Transport, dec!(99999.99)),
            ]),
            txs(&[(Category::Etc, dec!(7))]),
        ];
        for input in inputs {
            let expected: Decimal = input.iter().map(|t| t.amount).sum();
            assert_eq!(total(&aggregate(&input).unwrap()).unwrap(), expected);
        }
    }

    #[test]
    fn test_no_float_drift() {
        let input = txs(&[(Category::Food, dec!(0.1)), (Category::Food, dec!(0.2))]);
        assert_eq!(aggregate(&input).unwrap()[&Category::Food], dec!(0.3));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let input = txs(&[(Category::Food, Decimal::MAX), (Category::Food, Decimal::MAX)]);
        let err = aggregate(&input).unwrap_err();
        assert!(err.to_string().contains("'tx-1'"), "{err}");

        let input = txs(&[(Category::Food, Decimal::MAX), (Category::Edu, Decimal::MAX)]);
        let sums = aggregate(&input).unwrap();
        assert!(total(&sums).is_err());
    }
}
