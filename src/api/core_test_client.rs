//! Implements the `CoreBank` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a Core banking service.

use crate::api::CoreBank;
use crate::error::Res;
use crate::model::{Category, CoreTransaction, UserId, YearMonth};
use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Cursor;

/// An implementation of the `CoreBank` trait that holds transactions in memory, either given by
/// the caller or loaded from the seed data below.
pub(crate) struct TestCoreBank {
    data: Vec<CoreTransaction>,
}

impl TestCoreBank {
    pub(crate) fn new(data: Vec<CoreTransaction>) -> Self {
        Self { data }
    }

    /// A bank holding the seed transactions from this module.
    pub(crate) fn seeded() -> Res<Self> {
        let data = load_csv(TRANSACTION_DATA).context("Unable to load the seed transactions")?;
        Ok(Self::new(data))
    }
}

#[async_trait::async_trait]
impl CoreBank for TestCoreBank {
    async fn transactions(
        &mut self,
        user_id: UserId,
        period: YearMonth,
    ) -> Res<Vec<CoreTransaction>> {
        Ok(self
            .data
            .iter()
            .filter(|tx| tx.user_id == user_id && period.contains(tx.date))
            .cloned()
            .collect())
    }
}


/// A row of the seed CSV.
#[derive(Debug, Deserialize)]
struct SeedRow {
    #[serde(rename = "User ID")]
    user_id: UserId,
    #[serde(rename = "Transaction ID")]
    transaction_id: String,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Category")]
    category: Category,
    #[serde(rename = "Amount")]
    amount: Decimal,
}

/// Loads transactions from a CSV-formatted string.
fn load_csv(csv_data: &str) -> Res<Vec<CoreTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut transactions = Vec::new();
    for (ix, result) in rdr.deserialize::<SeedRow>().enumerate() {
        let row = result.with_context(|| format!("Bad seed row {}", ix + 1))?;
        transactions.push(CoreTransaction {
            transaction_id: row.transaction_id,
            user_id: row.user_id,
            date: row.date,
            description: row.description,
            category: row.category,
            amount: row.amount,
        });
    }
    Ok(transactions)
}

/// Seed transaction data. User 1's May 2024 is the month the app's mock report was built from:
/// it totals 549,957 against April's 524,957.
const TRANSACTION_DATA: &str = r##"User ID,Transaction ID,Date,Description,Category,Amount
1,tx-20240503-0001,2024-05-03,Auto-transfer to savings,TRANSFER,328830
1,tx-20240507-0002,2024-05-07,Stationery store,ETC,126430
1,tx-20240512-0003,2024-05-12,Online shopping mall,SHOPPING,88440
1,tx-20240520-0004,2024-05-20,Vending machine,ETC,6257
1,tx-20240402-0005,2024-04-02,Transfer to friend,TRANSFER,300000
1,tx-20240410-0006,2024-04-10,School cafeteria,FOOD,150000
1,tx-20240418-0007,2024-04-18,English academy,EDU,74957
2,tx-20240505-0008,2024-05-05,Bus card top-up,TRANSPORT,20000
2,tx-20240511-0009,2024-05-11,Movie theater,ENT,14000
2,tx-20240516-0010,2024-05-16,Convenience store,FOOD,6500
2,tx-20240421-0011,2024-04-21,Bus card top-up,TRANSPORT,20000
2,tx-20240427-0012,2024-04-27,Comic book cafe,ENT,20500
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seed_parses() {
        let transactions = load_csv(TRANSACTION_DATA).unwrap();
        assert_eq!(transactions.len(), 12);
        assert_eq!(transactions[0].category, Category::Transfer);
        assert_eq!(transactions[3].amount, dec!(6257));
    }

    #[test]
    fn test_seeded() {
        let core = TestCoreBank::seeded().unwrap();
        assert_eq!(core.data.len(), 12);
    }

    #[test]
    fn test_bad_seed_row() {
        let csv = "User ID,Transaction ID,Date,Description,Category,Amount\n\
                   1,t,2024-05-01,x,PETS,10\n";
        let err = load_csv(csv).unwrap_err();
        assert!(format!("{err:#}").contains("Bad seed row 1"), "{err:#}");
    }

    #[tokio::test]
    async fn test_filters_by_user_and_month() {
        let mut core = TestCoreBank::seeded().unwrap();
        let may = YearMonth::new(2024, 5).unwrap();

        let user_1 = core.transactions(1, may).await.unwrap();
        assert_eq!(user_1.len(), 4);
        let total: Decimal = user_1.iter().map(|tx| tx.amount).sum();
        assert_eq!(total, dec!(549957));

        let april: Decimal = core
            .transactions(1, may.previous())
            .await
            .unwrap()
            .iter()
            .map(|tx| tx.amount)
            .sum();
        assert_eq!(april, dec!(524957));

        assert_eq!(core.transactions(2, may).await.unwrap().len(), 3);
        assert!(core.transactions(3, may).await.unwrap().is_empty());
        let june = YearMonth::new(2024, 6).unwrap();
        assert!(core.transactions(1, june).await.unwrap().is_empty());
    }
}
