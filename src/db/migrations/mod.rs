//! Schema migrations for the report database.
//!
//! Each schema version `NN` has a `migration_NN_up.sql`, which takes the database from `NN-1` to
//! `NN`, and a `migration_NN_down.sql` that reverses it.

use anyhow::Context;
use sqlx::{Executor, SqlitePool};
use tracing::debug;

use crate::error::Res;

struct Migration {
    version: i32,
    up_sql: &'static str,
    down_sql: &'static str,
}

/// Version 1 creates the `reports` table.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    up_sql: include_str!("migration_01_up.sql"),
    down_sql: include_str!("migration_01_down.sql"),
}];

/// One script to run and the schema version the database is at afterwards.
struct Step {
    sql: &'static str,
    new_version: i32,
}

/// Moves the schema from `current_ver` to `target_ver` in either direction. Every step is checked
/// for before anything runs, and each step commits together with its `schema_version` update.
pub(crate) async fn run(pool: &SqlitePool, current_ver: i32, target_ver: i32) -> Res<()> {
    if current_ver == target_ver {
        debug!("Report database already at version {target_ver}");
        return Ok(());
    }

    for step in plan(current_ver, target_ver)? {
        debug!("Migrating the report database to version {}", step.new_version);
        run_step(pool, &step).await?;
    }

    debug!("Report database migrated from version {current_ver} to {target_ver}");
    Ok(())
}

/// The steps from `current_ver` to `target_ver`, or an error naming the first missing version.
fn plan(current_ver: i32, target_ver: i32) -> Res<Vec<Step>> {
    let lookup = |version: i32| {
        MIGRATIONS
            .iter()
            .find(|m| m.version == version)
            .with_context(|| {
                format!(
                    "Migration {version} is missing but required to migrate from version \
                    {current_ver} to {target_ver}"
                )
            })
    };

    if current_ver < target_ver {
        ((current_ver + 1)..=target_ver)
            .map(|version| {
                lookup(version).map(|m| Step {
                    sql: m.up_sql,
                    new_version: version,
                })
            })
            .collect()
    } else {
        ((target_ver + 1)..=current_ver)
            .rev()
            .map(|version| {
                lookup(version).map(|m| Step {
                    sql: m.down_sql,
                    new_version: version - 1,
                })
            })
            .collect()
    }
}

async fn run_step(pool: &SqlitePool, step: &Step) -> Res<()> {
    let version = step.new_version;
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin migration transaction")?;

    tx.execute(step.sql)
        .await
        .with_context(|| format!("Failed to migrate the report database to version {version}"))?;

    sqlx::query("DELETE FROM schema_version")
        .execute(&mut *tx)
        .await
        .context("Failed to clear schema_version")?;
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await
        .context("Failed to update schema_version")?;

    tx.commit()
        .await
        .with_context(|| format!("Failed to commit migration to version {version}"))
}
