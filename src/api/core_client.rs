//! Implements the `CoreBank` trait over HTTP.

use crate::api::CoreBank;
use crate::error::Res;
use crate::model::{CoreTransaction, UserId, YearMonth};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;
use tracing::trace;
use url::Url;

const TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to the Core banking service's REST API rooted at `base`.
pub(crate) struct CoreClient {
    base: Url,
    client: reqwest::Client,
}

impl CoreClient {
    pub(crate) fn new(base: &Url) -> Res<Self> {
        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .context("Unable to build the HTTP client")?;
        Ok(Self {
            base: base.clone(),
            client,
        })
    }

    fn transactions_url(&self, user_id: UserId, period: YearMonth) -> Res<Url> {
        let mut url = self
            .base
            .join(&format!("api/v1/users/{user_id}/transactions"))
            .with_context(|| format!("Unable to build a transactions URL from {}", self.base))?;
        url.query_pairs_mut()
            .append_pair("year", &period.year().to_string())
            .append_pair("month", &period.month().to_string());
        Ok(url)
    }
}

/// The body of the Core's transactions response.
#[derive(Debug, Deserialize)]
struct TransactionsResponse {
    transactions: Vec<CoreTransaction>,
}

#[async_trait::async_trait]
impl CoreBank for CoreClient {
    async fn transactions(
        &mut self,
        user_id: UserId,
        period: YearMonth,
    ) -> Res<Vec<CoreTransaction>> {
        let url = self.transactions_url(user_id, period)?;
        trace!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            anyhow::bail!("Core request {url} failed with status {status}: {body}");
        }

        let body: TransactionsResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse the Core response from {url}"))?;

        // The Core does not echo the user on each row.
        Ok(body
            .transactions
            .into_iter()
            .map(|mut tx| {
                tx.user_id = user_id;
                tx
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transactions_url() {
        let base = Url::from_str("http://core.internal:8081/").unwrap();
        let client = CoreClient::new(&base).unwrap();
        let period = YearMonth::new(2024, 5).unwrap();
        let url = client.transactions_url(42, period).unwrap();
        assert_eq!(
            url.as_str(),
            "http://core.internal:8081/api/v1/users/42/transactions?year=2024&month=5"
        );
    }

    #[test]
    fn test_transactions_url_keeps_base_path() {
        let base = Url::from_str("https://bank.example.com/core/").unwrap();
        let client = CoreClient::new(&base).unwrap();
        let period = YearMonth::new(2023, 12).unwrap();
        let url = client.transactions_url(1, period).unwrap();
        assert_eq!(
            url.as_str(),
            "https://bank.example.com/core/api/v1/users/1/transactions?year=2023&month=12"
        );
    }

    #[test]
    fn test_parse_response() {
        let json = r#"{"transactions":[
            {"transactionId":"t1","date":"2024-05-03","category":"EDU","amount":"45000"},
            {"transactionId":"t2","date":"2024-05-04","category":"FOOD","amount":3200}
        ]}"#;
        let body: TransactionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.transactions.len(), 2);
    }
}
