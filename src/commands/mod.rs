//! Command handlers for the famibank CLI.
//!
//! Each handler is shared by the CLI and the MCP server, so each returns an `Out` with a human
//! readable message and, optionally, structured data.

mod init;
mod mcp;
mod prune;
mod report;
mod split;

use serde::Serialize;
use std::fmt::Debug;
use tracing::info;

pub use init::init;
pub use mcp::mcp;
pub use prune::{prune, Pruned};
pub use report::{list_reports, monthly_report, stored_report};
pub use split::split;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to both the command line and MCP server interfaces.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as pretty JSON to
    /// stdout, so that it can be piped into other tools.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                println!("{json}");
            }
        }
    }
}
