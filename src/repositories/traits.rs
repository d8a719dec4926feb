use crate::domain::CustomerId;
use crate::error::StoreResult;
use crate::models::{Customer, PhoneNumber};
use async_trait::async_trait;

/// Storage for customers and their phone numbers.
///
/// Reads outside a transaction see committed state only. Writes go through a
/// [`StoreTransaction`] obtained from [`CustomerStore::begin`].
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Retrieve a customer by ID, without its phone numbers.
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    /// Retrieve a customer by ID with its phone numbers attached.
    async fn find_by_id_with_phones(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    /// Every customer with phone numbers attached, in a stable order.
    async fn find_all(&self) -> StoreResult<Vec<Customer>>;

    /// Whether any customer owns `email`.
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool>;

    /// Whether a customer with `id` exists.
    async fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool>;

    /// Open a unit of work.
    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>>;
}

/// An all-or-nothing unit of work.
///
/// Reads inside the transaction see its own writes. Nothing becomes visible
/// to others until [`commit`](StoreTransaction::commit) succeeds; dropping the
/// transaction uncommitted discards every write.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Retrieve a customer by ID with its phone numbers attached.
    async fn find_by_id_with_phones(&mut self, id: CustomerId) -> StoreResult<Option<Customer>>;

    /// Whether any customer owns `email`.
    async fn exists_by_email(&mut self, email: &str) -> StoreResult<bool>;

    /// Whether a customer with `id` exists.
    async fn exists_by_id(&mut self, id: CustomerId) -> StoreResult<bool>;

    /// Insert or update a customer's own fields, stamping its audit.
    ///
    /// The phone collection on `customer` is not written. Fails with
    /// `StoreError::UniqueViolation` if another customer owns the email.
    async fn save(&mut self, customer: Customer) -> StoreResult<Customer>;

    /// Delete a customer and, by cascade, every phone number it owns.
    async fn delete_by_id(&mut self, id: CustomerId) -> StoreResult<()>;

    /// Insert or update phone numbers; each must name an existing owner.
    async fn save_all_phones(&mut self, phones: Vec<PhoneNumber>) -> StoreResult<Vec<PhoneNumber>>;

    /// Delete the given phone number rows.
    async fn delete_all_phones(&mut self, phones: &[PhoneNumber]) -> StoreResult<()>;

    /// Apply every write atomically.
    ///
    /// Constraints are re-checked against the state current at commit time,
    /// so a conflicting write committed meanwhile fails this commit.
    async fn commit(&mut self) -> StoreResult<()>;
}
