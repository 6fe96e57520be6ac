//! Report command handlers.

use crate::api::{self, CoreBank, Mode};
use crate::args::{ReportArgs, ReportsArgs};
use crate::commands::Out;
use crate::db::StoredReport;
use crate::error::{ErrorType, IntoResult, Res};
use crate::model::{Amount, UserId, YearMonth};
use crate::report::{ComparedType, Report, ReportView};
use crate::{Config, Result};
use anyhow::Context;
use tracing::info;

/// Generates the spending report for a user and month, stores it, and returns it formatted for
/// clients.
///
/// The Core banking service is asked for the requested month and for the month before it. If a
/// report for the same user and month is already stored, it is replaced.
///
/// # Errors
///
/// - Returns a `Request` error if the month is not 1 through 12.
/// - Returns a `Core` error if the Core cannot be reached or returns malformed transactions.
/// - Returns a `Database` error if the report cannot be stored.
pub async fn monthly_report(config: Config, mode: Mode, args: ReportArgs) -> Result<Out<ReportView>> {
    let period = YearMonth::new(args.year(), args.month()).pub_result(ErrorType::Request)?;
    let mut core = api::core_bank(&config, mode).pub_result(ErrorType::Core)?;
    let report = generate_report(core.as_mut(), args.user_id(), period)
        .await
        .pub_result(ErrorType::Core)?;

    let report_id = config
        .db()
        .save_report(args.user_id(), &report)
        .await
        .pub_result(ErrorType::Database)?;

    let view = report.view();
    let change = match view.compared_type {
        ComparedType::More => format!("{} more than", view.compared_amount),
        ComparedType::Less => format!("{} less than", view.compared_amount),
        ComparedType::Same => "the same as".to_string(),
    };
    let message = format!(
        "Report {report_id} for user {} in {period}: spent {}, {change} the previous month",
        args.user_id(),
        view.total_amount,
    );
    Ok(Out::new(message, view))
}

/// Returns a previously generated report without contacting the Core banking service.
///
/// If no report is stored for the user and month, the output has a message and no structure.
pub async fn stored_report(config: Config, args: ReportArgs) -> Result<Out<ReportView>> {
    let period = YearMonth::new(args.year(), args.month()).pub_result(ErrorType::Request)?;
    let stored = config
        .db()
        .get_report(args.user_id(), period)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(match stored {
        Some(report) => Out::new(
            format!(
                "Stored report for user {} in {period}: spent {}",
                args.user_id(),
                Amount::new(report.total_amount)
            ),
            report.view(),
        ),
        None => Out::new_message(format!(
            "No report is stored for user {} in {period}; generate one with `report`",
            args.user_id()
        )),
    })
}

/// Lists the reports stored for a user, newest month first.
pub async fn list_reports(config: Config, args: ReportsArgs) -> Result<Out<Vec<StoredReport>>> {
    let reports = config
        .db()
        .list_reports(args.user_id())
        .await
        .pub_result(ErrorType::Database)?;
    let message = format!(
        "Found {} stored reports for user {}",
        reports.len(),
        args.user_id()
    );
    Ok(Out::new(message, reports))
}

/// Fetches the two months a report needs from `core` and assembles the report.
pub(crate) async fn generate_report(
    core: &mut (dyn CoreBank + Send),
    user_id: UserId,
    period: YearMonth,
) -> Res<Report> {
    let current = api::fetch_month(core, user_id, period).await?;
    let previous = api::fetch_month(core, user_id, period.previous()).await?;
    let report = Report::assemble(period, &current, &previous)
        .with_context(|| format!("Unable to build the {period} report for user {user_id}"))?;
    info!(
        "Assembled {period} report for user {user_id} from {} transactions",
        current.len()
    );
    Ok(report)
}
