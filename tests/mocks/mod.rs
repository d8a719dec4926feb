mod mock_customer_store;
mod mock_validation_oracle;

pub use mock_customer_store::MockCustomerStore;
pub use mock_validation_oracle::MockValidationOracle;
