//! Handler for `famibank mcp`, which runs the MCP server for AI agents.

use crate::commands::Out;
use crate::mcp::Io;
use crate::{mcp, Config, Mode, Result};

/// Runs the MCP server over stdin/stdout until the client disconnects.
pub async fn mcp(config: Config, mode: Mode) -> Result<Out<()>> {
    mcp::run_server(config, mode, Io::Stdio).await?;
    Ok("Done running MCP server".into())
}
