//! Access to the Core banking service, the system of record for transactions.
//!
//! Everything outside this module talks to the Core through the `CoreBank` trait. In production
//! that is `CoreClient`, an HTTP client; in test mode it is `TestCoreBank`, which serves seeded
//! data from memory.

mod core_client;
mod core_test_client;

use crate::error::Res;
use crate::model::{CoreTransaction, UserId, YearMonth};
use crate::Config;
use anyhow::Context;
use tracing::debug;

pub(crate) use core_client::CoreClient;
pub(crate) use core_test_client::TestCoreBank;

/// Setting this environment variable to anything non-empty makes the program use `TestCoreBank`.
pub const TEST_MODE_ENV: &str = "FAMIBANK_IN_TEST_MODE";

/// Which `CoreBank` implementation to use.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Talk to the Core banking service over HTTP.
    #[default]
    Core,
    /// Use seeded in-memory data instead of the Core banking service.
    Testing,
}

impl Mode {
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Testing,
            _ => Mode::Core,
        }
    }
}

/// The operations we need from the Core banking service.
#[async_trait::async_trait]
pub(crate) trait CoreBank {
    /// All of `user_id`'s transactions that fall within `period`.
    async fn transactions(
        &mut self,
        user_id: UserId,
        period: YearMonth,
    ) -> Res<Vec<CoreTransaction>>;
}

/// Creates the `CoreBank` for `mode`.
pub(crate) fn core_bank(config: &Config, mode: Mode) -> Res<Box<dyn CoreBank + Send>> {
    Ok(match mode {
        Mode::Core => Box::new(CoreClient::new(config.core_url())?),
        Mode::Testing => Box::new(TestCoreBank::seeded()?),
    })
}

/// Fetches a month of transactions and refuses the batch if any of them is malformed.
pub(crate) async fn fetch_month(
    core: &mut (dyn CoreBank + Send),
    user_id: UserId,
    period: YearMonth,
) -> Res<Vec<CoreTransaction>> {
    let transactions = core
        .transactions(user_id, period)
        .await
        .with_context(|| format!("Unable to fetch {period} transactions for user {user_id}"))?;
    for tx in &transactions {
        tx.validate()
            .with_context(|| format!("The Core returned bad data for {period}"))?;
    }
    debug!(
        "Fetched {} transactions for user {user_id} in {period}",
        transactions.len()
    );
    Ok(transactions)
}
