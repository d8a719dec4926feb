//! Customer Registry - customer and phone number aggregates served over MCP.
//!
//! The core validates customers exhaustively, reconciles each customer's phone
//! numbers by semantic equality rather than row identity, and enforces email
//! uniqueness both before writing and at commit time.
//!
//! # Architecture
//!
//! - **domain**: Value objects: identifiers, phone types, normalization, audit stamps, validation errors
//! - **models**: The customer aggregate, its phone numbers and the inbound payload
//! - **validation**: Validation oracle and the exhaustive field validator
//! - **reconcile**: Phone set diffing
//! - **repositories**: Store boundary and the in-memory transactional store
//! - **services**: The customer aggregate service
//! - **observability**: Operation counters and timers
//! - **server**: MCP protocol server
//! - **config**: Configuration management from environment variables
//! - **error**: Error types for precise error handling

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod observability;
pub mod reconcile;
pub mod repositories;
pub mod server;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::{ConfigError, CustomerError, StoreError};
pub use models::{Customer, CustomerPayload, PhoneNumber, PhoneNumberPayload};
pub use reconcile::{reconcile, PhoneSetDelta};
pub use server::CustomerMcpServer;
pub use services::{CustomerService, CustomerServiceImpl};
