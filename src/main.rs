//! Customer Registry - Main entry point
//!
//! Serves the customer registry over the Model Context Protocol on stdio,
//! backed by the in-memory store.

use anyhow::Result;
use customer_registry::observability::OperationMetrics;
use customer_registry::repositories::{CustomerStore, InMemoryCustomerStore};
use customer_registry::validation::{DefaultValidationOracle, FieldValidator, ValidationOracle};
use customer_registry::{Config, CustomerMcpServer, CustomerService, CustomerServiceImpl};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration first, so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Logging goes to stderr only; stdout carries MCP traffic
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let limits = config.payload_limits();
    info!(
        max_name_length = limits.max_name_length,
        max_country_code_length = limits.max_country_code_length,
        require_phone_numbers = limits.require_phone_numbers,
        "Payload limits"
    );

    let store = Arc::new(InMemoryCustomerStore::new()) as Arc<dyn CustomerStore>;
    let oracle = Arc::new(DefaultValidationOracle::new()) as Arc<dyn ValidationOracle>;
    let validator = FieldValidator::new(oracle, limits);
    let metrics = OperationMetrics::new();

    let service = Arc::new(CustomerServiceImpl::new(store, validator, metrics.clone()))
        as Arc<dyn CustomerService>;

    let server = CustomerMcpServer::new(service);

    info!("Starting MCP server with stdio transport");
    customer_registry::server::run_server(server).await?;

    info!("{}", metrics.summary());
    info!("Customer registry shutdown complete");
    Ok(())
}
