//! This module is responsible for reading, writing and managing the SQLite database of generated
//! reports.

mod migrations;

use crate::error::Res;
use crate::model::{UserId, YearMonth};
use crate::report::Report;
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// The schema version this build of the program expects.
const CURRENT_VERSION: i32 = 1;

/// A summary row describing a stored report.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub report_id: String,
    pub user_id: UserId,
    pub period: YearMonth,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct Db {
    pool: SqlitePool,
}

impl Db {
    /// - Validates that there is a SQLite file at `path`
    /// - Creates a SQLite client
    /// - Updates the database schema with migrations if it is out-of-date
    pub(crate) async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("The SQLite database is missing '{}'", path.display());
        }
        let pool = connect(path, false).await?;
        let current = schema_version(&pool).await?;
        if current > CURRENT_VERSION {
            bail!(
                "The database schema version {current} is newer than this program supports \
                ({CURRENT_VERSION})"
            );
        }
        migrations::run(&pool, current, CURRENT_VERSION).await?;
        Ok(Self { pool })
    }

    /// - Validates that no file currently exists at `path`
    /// - Creates a new SQLite file at `path`
    /// - Initializes the database schema
    pub(crate) async fn init(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("A file already exists at '{}'", path.display());
        }
        let pool = connect(path, true).await?;

        sqlx::query("CREATE TABLE schema_version (version INTEGER NOT NULL)")
            .execute(&pool)
            .await
            .context("Failed to create schema_version table")?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (0)")
            .execute(&pool)
            .await
            .context("Failed to insert initial schema version")?;

        migrations::run(&pool, 0, CURRENT_VERSION).await?;
        Ok(Self { pool })
    }

    /// Stores `report` for `user_id`, replacing any report already stored for the same month.
    /// Returns the new report's ID.
    pub(crate) async fn save_report(&self, user_id: UserId, report: &Report) -> Res<String> {
        let report_id = Uuid::new_v4().to_string();
        let json = serde_json::to_string(report).context("Unable to serialize report")?;
        sqlx::query(
            "INSERT INTO reports (report_id, user_id, year, month, total_amount, report_json, \
             created_at) VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, year, month) DO UPDATE SET \
             report_id = excluded.report_id, \
             total_amount = excluded.total_amount, \
             report_json = excluded.report_json, \
             created_at = excluded.created_at",
        )
        .bind(&report_id)
        .bind(user_id)
        .bind(report.period.year())
        .bind(i64::from(report.period.month()))
        .bind(report.total_amount.to_string())
        .bind(json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save the {} report", report.period))?;
        debug!("Saved report {report_id} for user {user_id} in {}", report.period);
        Ok(report_id)
    }

    /// The stored report for `user_id` and `period`, if there is one.
    pub(crate) async fn get_report(
        &self,
        user_id: UserId,
        period: YearMonth,
    ) -> Res<Option<Report>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT report_json FROM reports WHERE user_id = ? AND year = ? AND month = ?",
        )
        .bind(user_id)
        .bind(period.year())
        .bind(i64::from(period.month()))
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to query the {period} report"))?;

        row.map(|(json,)| {
            serde_json::from_str(&json)
                .with_context(|| format!("The stored {period} report is corrupt"))
        })
        .transpose()
    }

    /// Summaries of every report stored for `user_id`, newest month first.
    pub(crate) async fn list_reports(&self, user_id: UserId) -> Res<Vec<StoredReport>> {
        let rows: Vec<(String, i64, i32, i64, String, String)> = sqlx::query_as(
            "SELECT report_id, user_id, year, month, total_amount, created_at FROM reports \
             WHERE user_id = ? ORDER BY year DESC, month DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reports")?;

        rows.into_iter()
            .map(
                |(report_id, user_id, year, month, total_amount, created_at)| {
                    let month = u32::try_from(month)
                        .with_context(|| format!("Bad month {month} in report {report_id}"))?;
                    Ok(StoredReport {
                        period: YearMonth::new(year, month)?,
                        total_amount: Decimal::from_str(&total_amount).with_context(|| {
                            format!("Bad total_amount '{total_amount}' in report {report_id}")
                        })?,
                        created_at: DateTime::parse_from_rfc3339(&created_at)
                            .with_context(|| {
                                format!("Bad created_at '{created_at}' in report {report_id}")
                            })?
                            .with_timezone(&Utc),
                        report_id,
                        user_id,
                    })
                },
            )
            .collect()
    }

    /// Deletes every report, for all users, whose month is earlier than `before`. Returns the
    /// number of reports deleted.
    pub(crate) async fn prune_reports(&self, before: YearMonth) -> Res<u64> {
        let result = sqlx::query("DELETE FROM reports WHERE year < ? OR (year = ? AND month < ?)")
            .bind(before.year())
            .bind(before.year())
            .bind(i64::from(before.month()))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to prune reports older than {before}"))?;
        Ok(result.rows_affected())
    }
}

async fn connect(path: &Path, create: bool) -> Res<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .context("Failed to parse SQLite connection string")?
        .create_if_missing(create)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open SQLite database at {}", path.display()))
}

async fn schema_version(pool: &SqlitePool) -> Res<i32> {
    let row: (i32,) = sqlx::query_as("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to query schema version")?;
    Ok(row.0)
}
