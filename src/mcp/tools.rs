//! The tools exposed by the famibank MCP server.

use crate::args::{PruneArgs, ReportArgs, ReportsArgs, SplitArgs};
use crate::commands;
use crate::mcp::mcp_utils::tool_result;
use crate::mcp::FamibankServer;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use rmcp::{tool, tool_router};
use tracing::info;

#[tool_router(vis = "pub(super)")]
impl FamibankServer {
    #[tool]
    /// Initialize the famibank MCP service for this session and return usage instructions. You
    /// **MUST** call this **ONCE** before using other tools so that you have the full usage
    /// instructions. You **MAY** call it more than once if you have forgotten them.
    async fn initialize_service(&self) -> Result<CallToolResult, McpError> {
        let mut initialized = self.initialized.lock().await;
        *initialized = true;
        Ok(CallToolResult::success(vec![rmcp::model::Content::text(
            include_str!("docs/INSTRUCTIONS.md"),
        )]))
    }

    /// Generate a user's spending report for a month from the Core banking service's
    /// transactions, store it, and return it.
    ///
    /// The report has the month's total, the difference from the previous month, and each
    /// category's amount and percentage share, largest first.
    #[tool]
    async fn monthly_report(
        &self,
        Parameters(args): Parameters<ReportArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!(
            "MCP: monthly_report called for user {} {}-{}",
            args.user_id(),
            args.year(),
            args.month()
        );
        let config = (*self.config).clone();
        tool_result(commands::monthly_report(config, self.mode, args).await)
    }

    /// Return a previously generated report for a user and month without contacting the Core
    /// banking service. If none is stored, the result says so and carries no data.
    #[tool]
    async fn get_report(
        &self,
        Parameters(args): Parameters<ReportArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!(
            "MCP: get_report called for user {} {}-{}",
            args.user_id(),
            args.year(),
            args.month()
        );
        let config = (*self.config).clone();
        tool_result(commands::stored_report(config, args).await)
    }

    /// List the reports stored for a user, newest month first.
    #[tool]
    async fn list_reports(
        &self,
        Parameters(args): Parameters<ReportsArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: list_reports called for user {}", args.user_id());
        let config = (*self.config).clone();
        tool_result(commands::list_reports(config, args).await)
    }

    /// Delete stored reports, for all users, older than `keep_months` months counting the
    /// current month. Without `keep_months` the configured retention is used.
    #[tool]
    async fn prune_reports(
        &self,
        Parameters(args): Parameters<PruneArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: prune_reports called");
        let config = (*self.config).clone();
        tool_result(commands::prune(config, args).await)
    }

    /// Show how an auto-transfer divides between the child's allowance and investment balances.
    /// `investment_ratio` percent of `amount`, rounded down to whole won, goes to investment.
    #[tool]
    async fn split_transfer(
        &self,
        Parameters(args): Parameters<SplitArgs>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: split_transfer called");
        tool_result(commands::split(args))
    }
}
