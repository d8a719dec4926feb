//! MCP tool handlers for the customer registry.
//!
//! This module exposes the customer operations as MCP tools using the rmcp
//! SDK's tool_router pattern.

use crate::domain::CustomerId;
use crate::error::CustomerError;
use crate::models::CustomerPayload;
use crate::services::CustomerService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing customer create/read/update/delete tools.
#[derive(Clone)]
pub struct CustomerMcpServer {
    customer_service: Arc<dyn CustomerService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for CustomerMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "customer-registry".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Customer registry - create, read, update and delete customers and their phone numbers. Phone numbers are matched by normalized number, type and country code.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CustomerIdParams {
    customer_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateCustomerParams {
    customer_id: String,
    customer: CustomerPayload,
}

/// Map a customer outcome onto an MCP error.
///
/// Validation and duplicate email failures are the caller's to fix and carry
/// structured data; not found maps to the resource error; anything else is
/// internal.
fn to_mcp_error(e: CustomerError) -> McpError {
    let (code, data) = match &e {
        CustomerError::ValidationFailed(errors) => (
            ErrorCode::INVALID_PARAMS,
            Some(serde_json::json!({
                "errors": errors,
                "fieldErrors": errors.to_flat_map(),
            })),
        ),
        CustomerError::DuplicateEmail(email) => (
            ErrorCode::INVALID_PARAMS,
            Some(serde_json::json!({ "emailAddress": email })),
        ),
        CustomerError::NotFound(id) => (
            ErrorCode::RESOURCE_NOT_FOUND,
            Some(serde_json::json!({ "customerId": id })),
        ),
        CustomerError::Store(_) => (ErrorCode::INTERNAL_ERROR, None),
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data,
    }
}

fn internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, McpError> {
    CustomerId::parse(raw).map_err(|e| McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    })
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let body = serde_json::to_string_pretty(value).map_err(internal_error)?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[tool_router]
impl CustomerMcpServer {
    /// Create a new customer MCP server.
    pub fn new(customer_service: Arc<dyn CustomerService>) -> Self {
        Self {
            customer_service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Create a customer with its phone numbers. Every field is validated in one pass and all failures are reported together. Fails if the email address is already registered."
    )]
    async fn create_customer(
        &self,
        params: Parameters<CustomerPayload>,
    ) -> Result<CallToolResult, McpError> {
        let customer = self
            .customer_service
            .create(params.0)
            .await
            .map_err(to_mcp_error)?;

        json_result(&customer)
    }

    #[tool(description = "Get a customer by ID, including its phone numbers.")]
    async fn get_customer(
        &self,
        params: Parameters<CustomerIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_customer_id(&params.0.customer_id)?;
        let customer = self
            .customer_service
            .get(id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&customer)
    }

    #[tool(description = "List every customer with its phone numbers.")]
    async fn list_customers(&self) -> Result<CallToolResult, McpError> {
        let customers = self
            .customer_service
            .get_all()
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "count": customers.len(),
            "customers": customers,
        }))
    }

    #[tool(
        description = "Replace a customer's fields and phone numbers. Phone numbers matching an existing one by normalized number, type and country code keep their identity; the rest are added or deleted."
    )]
    async fn update_customer(
        &self,
        params: Parameters<UpdateCustomerParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let id = parse_customer_id(&params.customer_id)?;
        let customer = self
            .customer_service
            .update(id, params.customer)
            .await
            .map_err(to_mcp_error)?;

        json_result(&customer)
    }

    #[tool(description = "Delete a customer and every phone number it owns.")]
    async fn delete_customer(
        &self,
        params: Parameters<CustomerIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_customer_id(&params.0.customer_id)?;
        self.customer_service
            .delete(id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "deleted": true,
            "customerId": id,
        }))
    }
}
