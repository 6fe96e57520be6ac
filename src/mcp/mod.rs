//! MCP (Model Context Protocol) server.
//!
//! Exposes the report commands as tools so that an AI agent can generate and inspect spending
//! reports. The server speaks JSON-RPC over stdio.

/// Returns an error tool result if `initialize_service` has not been called yet.
macro_rules! require_init {
    ($self:expr) => {
        if !$self.check_initialized().await {
            return Self::uninitialized();
        }
    };
}

mod mcp_utils;
mod tools;

use crate::error::{ErrorType, IntoResult};
use crate::{Config, Mode};
use anyhow::anyhow;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{
    CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::ErrorData as McpError;
use rmcp::{tool_handler, ServerHandler, ServiceExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
pub struct FamibankServer {
    initialized: Arc<Mutex<bool>>,
    mode: Mode,
    config: Arc<Config>,
    tool_router: ToolRouter<FamibankServer>,
}

impl FamibankServer {
    pub fn new(config: Config, mode: Mode) -> Self {
        Self {
            initialized: Arc::new(Mutex::new(false)),
            mode,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    async fn check_initialized(&self) -> bool {
        *self.initialized.lock().await
    }

    fn uninitialized() -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::error(vec![rmcp::model::Content::text(
            "The service is not initialized. Call initialize_service first.",
        )]))
    }
}

#[tool_handler]
impl ServerHandler for FamibankServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "famibank".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(include_str!("docs/INTRO.md").into()),
        }
    }
}

/// Transport for the MCP server.
#[derive(Debug, Default)]
pub(crate) enum Io {
    #[default]
    Stdio,
    /// One end of an in-memory duplex channel.
    #[cfg(test)]
    Mock(tokio::io::DuplexStream),
}

/// Serves MCP requests on `io` until the client disconnects or the transport fails.
pub(crate) async fn run_server(config: Config, mode: Mode, io: Io) -> crate::Result<()> {
    let server = FamibankServer::new(config, mode);
    info!("Starting MCP server...");

    let service = match io {
        Io::Stdio => server
            .serve(stdio())
            .await
            .map_err(|e| anyhow!("Failed to start MCP server: {e}"))
            .pub_result(ErrorType::Service)?,
        #[cfg(test)]
        Io::Mock(stream) => server
            .serve(stream)
            .await
            .map_err(|e| anyhow!("Failed to start MCP server: {e}"))
            .pub_result(ErrorType::Service)?,
    };

    info!("MCP server running, waiting for requests...");
    service
        .waiting()
        .await
        .map_err(|e| anyhow!("MCP server error: {e}"))
        .pub_result(ErrorType::Service)?;

    info!("MCP server shut down");
    Ok(())
}
