use crate::error::Res;
use crate::model::{Category, UserId};
use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The largest single amount accepted from the Core: one quadrillion won. Anything bigger is
/// corrupt data, and the cap keeps report arithmetic far from the limits of `Decimal`.
pub const MAX_TRANSACTION_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// A single transaction as reported by the Core banking service.
///
/// Only `category` and `amount` feed a report. The rest is carried along for logging and for
/// anyone inspecting the raw data.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreTransaction {
    pub transaction_id: String,
    #[serde(default)]
    pub user_id: UserId,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub amount: Decimal,
}

impl CoreTransaction {
    pub fn new(
        transaction_id: impl Into<String>,
        user_id: UserId,
        date: NaiveDate,
        category: Category,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            user_id,
            date,
            description: String::new(),
            category,
            amount,
        }
    }

    /// Spending amounts from the Core are magnitudes. A negative amount means the Core sent us
    /// something we do not understand, so it is refused rather than netted into a report.
    pub(crate) fn validate(&self) -> Res<()> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            bail!(
                "Transaction '{}' has a negative amount {}",
                self.transaction_id,
                self.amount
            );
        }
        if self.amount > MAX_TRANSACTION_AMOUNT {
            bail!(
                "Transaction '{}' has an implausible amount {}",
                self.transaction_id,
                self.amount
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
    }

    #[test]
    fn test_deserialize_core_json() {
        let json = r#"{
            "transactionId": "tx-0001",
            "date": "2024-05-03",
            "description": "Online store",
            "category": "SHOPPING",
            "amount": "88440"
        }"#;
        let tx: CoreTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.category, Category::Shopping);
        assert_eq!(tx.amount, dec!(88440));
        assert_eq!(tx.date, date());
        assert_eq!(tx.user_id, 0);
    }

    #[test]
    fn test_deserialize_unknown_category_fails() {
        let json = r#"{"transactionId":"x","date":"2024-05-03","category":"PETS","amount":"1"}"#;
        assert!(serde_json::from_str::<CoreTransaction>(json).is_err());
    }

    #[test]
    fn test_validate() {
        let ok = CoreTransaction::new("a", 1, date(), Category::Food, dec!(5000));
        assert!(ok.validate().is_ok());
        let zero = CoreTransaction::new("b", 1, date(), Category::Food, Decimal::ZERO);
        assert!(zero.validate().is_ok());
        let negative = CoreTransaction::new("c", 1, date(), Category::Food, dec!(-1));
        let err = negative.validate().unwrap_err().to_string();
        assert!(err.contains("'c'"), "{err}");

        let capped =
            CoreTransaction::new("d", 1, date(), Category::Food, MAX_TRANSACTION_AMOUNT);
        assert!(capped.validate().is_ok());
        let huge = CoreTransaction::new("e", 1, date(), Category::Food, Decimal::MAX);
        let err = huge.validate().unwrap_err().to_string();
        assert!(err.contains("'e'"), "{err}");
    }

    #[test]
    fn test_max_amount() {
        assert_eq!(MAX_TRANSACTION_AMOUNT, dec!(1000000000000000));
    }
}
