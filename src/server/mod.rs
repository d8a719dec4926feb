//! MCP server for the customer registry.
//!
//! This module provides the MCP protocol server that exposes the customer
//! operations to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::CustomerMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the customer MCP server with stdio transport.
///
/// Communicates via stdin/stdout and returns once the client disconnects.
pub async fn run_server(server: CustomerMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
