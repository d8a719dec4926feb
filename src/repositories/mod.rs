mod in_memory;
mod traits;

pub use in_memory::{InMemoryCustomerStore, EMAIL_UNIQUE_CONSTRAINT};
pub use traits::{CustomerStore, StoreTransaction};
