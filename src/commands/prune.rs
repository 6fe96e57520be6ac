use crate::args::PruneArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::YearMonth;
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;

/// The outcome of a `prune` run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pruned {
    /// The oldest month that was kept. Reports for earlier months were deleted.
    pub kept_from: YearMonth,
    pub deleted: u64,
}

/// Deletes stored reports, for every user, that fall outside the retention window.
///
/// The window is `keep_months` months long and ends with the current month, so `keep_months = 1`
/// keeps only this month's reports. When `keep_months` is not given, `report_retention_months`
/// from the config file is used.
pub async fn prune(config: Config, args: PruneArgs) -> Result<Out<Pruned>> {
    prune_from(config, args, YearMonth::current()).await
}

async fn prune_from(config: Config, args: PruneArgs, now: YearMonth) -> Result<Out<Pruned>> {
    let keep = args
        .keep_months()
        .unwrap_or_else(|| config.report_retention_months());
    if keep == 0 {
        return Err(anyhow!("keep_months must be at least 1")).pub_result(ErrorType::Request);
    }

    let kept_from = now.months_back(keep - 1);
    let deleted = config
        .db()
        .prune_reports(kept_from)
        .await
        .pub_result(ErrorType::Database)?;

    Ok(Out::new(
        format!("Deleted {deleted} reports older than {kept_from}"),
        Pruned { kept_from, deleted },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use crate::test::TestEnv;

    async fn store_empty_reports(env: &TestEnv, periods: &[(i32, u32)]) {
        for &(year, month) in periods {
            let period = YearMonth::new(year, month).unwrap();
            let report = Report::assemble(period, &[], &[]).unwrap();
            env.config().db().save_report(1, &report).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_prune_keeps_window() {
        let env = TestEnv::new().await;
        store_empty_reports(&env, &[(2023, 11), (2023, 12), (2024, 1), (2024, 2), (2024, 3)]).await;

        let now = YearMonth::new(2024, 3).unwrap();
        let out = prune_from(env.config(), PruneArgs::new(Some(3)), now)
            .await
            .unwrap();
        let pruned = out.structure().unwrap();
        assert_eq!(pruned.deleted, 2);
        assert_eq!(pruned.kept_from, YearMonth::new(2024, 1).unwrap());

        let left = env.config().db().list_reports(1).await.unwrap();
        assert_eq!(left.len(), 3);
        assert_eq!(left[2].period, YearMonth::new(2024, 1).unwrap());
    }

    #[tokio::test]
    async fn test_prune_uses_configured_retention() {
        let env = TestEnv::new().await;
        store_empty_reports(&env, &[(2022, 1), (2024, 2)]).await;

        let now = YearMonth::new(2024, 3).unwrap();
        let out = prune_from(env.config(), PruneArgs::default(), now)
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().deleted, 1);
    }

    #[tokio::test]
    async fn test_prune_zero_months_is_rejected() {
        let env = TestEnv::new().await;
        let err = prune(env.config(), PruneArgs::new(Some(0)))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Request);
    }
}
