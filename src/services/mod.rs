//! Application service layer.
//!
//! Services contain business logic and orchestrate validation, reconciliation
//! and the store. They provide a clean boundary between the MCP handlers and
//! the data access layer.

mod customer_service;

pub use customer_service::{CustomerService, CustomerServiceImpl};
