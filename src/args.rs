//! These structs provide the CLI interface for the famibank CLI.
//!
//! Argument structs that double as MCP tool parameters also derive `Deserialize` and `JsonSchema`.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

use crate::model::UserId;

/// famibank: monthly spending reports for a family-banking backend.
///
/// The purpose of this program is to turn a child's transactions, as recorded by the Core banking
/// service, into a monthly spending report: totals per category, each category's share, and how
/// the month compares to the one before. Generated reports are kept in a local SQLite database.
///
/// There is also a mode in which an AI agent can use this program through the mcp subcommand.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, the configuration file and the report database.
    ///
    /// This is the first command you should run. You need the base URL of the Core banking
    /// service, e.g. http://localhost:8081.
    Init(InitArgs),
    /// Generate a user's spending report for a month, print it as JSON and store it.
    Report(ReportArgs),
    /// Print a previously generated report without contacting the Core banking service.
    Show(ReportArgs),
    /// List the reports stored for a user.
    Reports(ReportsArgs),
    /// Delete stored reports older than the retention window.
    Prune(PruneArgs),
    /// Show how an auto-transfer splits between allowance and investment.
    Split(SplitArgs),
    /// Run the MCP server on stdio.
    Mcp(McpArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where famibank data and configuration is held. Defaults to ~/famibank
    #[arg(long, env = "FAMIBANK_HOME", default_value_t = default_famibank_home())]
    famibank_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, famibank_home: PathBuf) -> Self {
        Self {
            log_level,
            famibank_home: famibank_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn famibank_home(&self) -> &DisplayPath {
        &self.famibank_home
    }
}

/// Args for the `famibank init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the Core banking service.
    #[arg(long)]
    core_url: String,
}

impl InitArgs {
    pub fn new(core_url: impl Into<String>) -> Self {
        Self {
            core_url: core_url.into(),
        }
    }

    pub fn core_url(&self) -> &str {
        &self.core_url
    }
}

/// Args for the `famibank report` and `famibank show` commands and the `monthly_report` and
/// `get_report` MCP tools.
#[derive(Debug, Parser, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportArgs {
    /// The Core banking service's ID of the user whose spending is reported.
    #[arg(long)]
    user_id: UserId,

    /// The year of the report month, 1 through 9999.
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: i32,

    /// The report month, 1 through 12.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}

impl ReportArgs {
    pub fn new(user_id: UserId, year: i32, month: u32) -> Self {
        Self {
            user_id,
            year,
            month,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

/// Args for the `famibank reports` command and the `list_reports` MCP tool.
#[derive(Debug, Parser, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportsArgs {
    /// The Core banking service's ID of the user.
    #[arg(long)]
    user_id: UserId,
}

impl ReportsArgs {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Args for the `famibank prune` command and the `prune_reports` MCP tool.
#[derive(Debug, Parser, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PruneArgs {
    /// How many months of reports to keep, counting the current month. Defaults to
    /// `report_retention_months` from config.json.
    #[arg(long)]
    #[serde(default)]
    keep_months: Option<u32>,
}

impl PruneArgs {
    pub fn new(keep_months: Option<u32>) -> Self {
        Self { keep_months }
    }

    pub fn keep_months(&self) -> Option<u32> {
        self.keep_months
    }
}

/// Args for the `famibank split` command and the `split_transfer` MCP tool.
#[derive(Debug, Parser, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SplitArgs {
    /// The auto-transfer amount in won.
    #[arg(long)]
    amount: Decimal,

    /// The percentage of the amount, 0 through 100, that goes to investment.
    #[arg(long)]
    investment_ratio: u8,
}

impl SplitArgs {
    pub fn new(amount: Decimal, investment_ratio: u8) -> Self {
        Self {
            amount,
            investment_ratio,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn investment_ratio(&self) -> u8 {
        self.investment_ratio
    }
}

/// Args for the `famibank mcp` command.
#[derive(Debug, Parser, Clone)]
pub struct McpArgs {}

fn default_famibank_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("famibank"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --famibank-home or FAMIBANK_HOME instead of relying on the \
                default famibank home directory.",
            );
            PathBuf::from("famibank")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_report() {
        let args = Args::try_parse_from([
            "famibank",
            "--famibank-home",
            "/tmp/fb",
            "report",
            "--user-id",
            "1",
            "--year",
            "2024",
            "--month",
            "5",
        ])
        .unwrap();
        assert_eq!(args.common().famibank_home().path(), Path::new("/tmp/fb"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        match args.command() {
            Command::Report(r) => {
                assert_eq!((r.user_id(), r.year(), r.month()), (1, 2024, 5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        let result = Args::try_parse_from([
            "famibank", "report", "--user-id", "1", "--year", "2024", "--month", "13",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        for year in ["0", "-1", "10000"] {
            let result = Args::try_parse_from([
                "famibank", "report", "--user-id", "1", "--year", year, "--month", "5",
            ]);
            assert!(result.is_err(), "year {year} was accepted");
        }
    }

    #[test]
    fn test_parse_split() {
        let args = Args::try_parse_from([
            "famibank",
            "--log-level",
            "debug",
            "split",
            "--amount",
            "50000",
            "--investment-ratio",
            "30",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        match args.command() {
            Command::Split(s) => {
                assert_eq!(s.amount(), dec!(50000));
                assert_eq!(s.investment_ratio(), 30);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_prune_defaults() {
        let args = Args::try_parse_from(["famibank", "prune"]).unwrap();
        match args.command() {
            Command::Prune(p) => assert_eq!(p.keep_months(), None),
            other => panic!("unexpected command {other:?}"),
        }
        let p: PruneArgs = serde_json::from_str("{}").unwrap();
        assert_eq!(p.keep_months(), None);
    }

    #[test]
    fn test_report_args_from_json() {
        let r: ReportArgs =
            serde_json::from_str(r#"{"user_id": 2, "year": 2024, "month": 4}"#).unwrap();
        assert_eq!((r.user_id(), r.year(), r.month()), (2, 2024, 4));
    }
}
