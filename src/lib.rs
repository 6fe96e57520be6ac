//! famibank generates monthly spending reports for children using a family-banking service.
//!
//! Transactions are read from the Core banking service, grouped by category, and summarized as a
//! month total, per-category shares and a comparison with the previous month. Reports are kept in
//! a local SQLite database. The same commands are available from the CLI and as MCP tools.

mod api;
pub mod args;
pub mod commands;
mod config;
mod db;
mod error;
mod mcp;
pub mod model;
pub mod report;
pub mod transfer;
mod utils;

#[cfg(test)]
mod test;

pub use api::Mode;
pub use config::Config;
pub use db::StoredReport;
pub use error::{Error, ErrorType, Result};
