use crate::commands::Out;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{error, warn};

/// Turns command output into MCP content: the message as text, followed by the structured data
/// as JSON when there is any.
pub(super) fn to_content<T>(out: &Out<T>) -> Result<Vec<Content>, ErrorData>
where
    T: Debug + Clone + Serialize,
{
    let mut content = vec![Content::text(out.message())];
    if let Some(structure) = out.structure() {
        content.push(Content::json(structure)?);
    }
    Ok(content)
}

/// Command errors, and output that cannot be serialized, are reported to the agent as tool
/// errors rather than protocol errors so that it can read the message.
pub(super) fn tool_result<T>(result: crate::Result<Out<T>>) -> Result<CallToolResult, ErrorData>
where
    T: Debug + Clone + Serialize,
{
    let out = match result {
        Ok(out) => out,
        Err(e) => {
            warn!("MCP tool call failed: {e}");
            return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
        }
    };
    Ok(match to_content(&out) {
        Ok(content) => CallToolResult::success(content),
        Err(e) => {
            error!("Unable to serialize tool output as JSON: {}", e.message);
            CallToolResult::error(vec![Content::text(format!(
                "{} However, the result data could not be serialized: {}",
                out.message(),
                e.message
            ))])
        }
    })
}
