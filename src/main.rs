use clap::Parser;
use famibank::args::{Args, Command};
use famibank::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().famibank_home().path();

    // When FAMIBANK_IN_TEST_MODE is set and non-empty, transactions come from the built-in seed
    // data instead of the Core banking service.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.core_url()).await?.print(),

        Command::Report(report_args) => {
            let config = Config::load(home).await?;
            commands::monthly_report(config, mode, report_args.clone())
                .await?
                .print()
        }

        Command::Show(show_args) => {
            let config = Config::load(home).await?;
            commands::stored_report(config, show_args.clone())
                .await?
                .print()
        }

        Command::Reports(reports_args) => {
            let config = Config::load(home).await?;
            commands::list_reports(config, reports_args.clone())
                .await?
                .print()
        }

        Command::Prune(prune_args) => {
            let config = Config::load(home).await?;
            commands::prune(config, prune_args.clone()).await?.print()
        }

        Command::Split(split_args) => commands::split(split_args.clone())?.print(),

        Command::Mcp(_mcp_args) => commands::mcp(Config::load(home).await?, mode)
            .await?
            .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so that stdout carries only JSON output
/// and MCP traffic.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
