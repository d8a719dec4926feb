use async_trait::async_trait;
use customer_registry::domain::CustomerId;
use customer_registry::error::{StoreError, StoreResult};
use customer_registry::models::{Customer, PhoneNumber};
use customer_registry::repositories::{CustomerStore, InMemoryCustomerStore, StoreTransaction};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock customer store for testing.
///
/// Delegates to an [`InMemoryCustomerStore`] while tracking method calls, and
/// can inject faults: hide taken emails from the pre-check (simulating a race
/// lost between check and write), fail phone writes, or fail commits.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCustomerStore {
    inner: InMemoryCustomerStore,
    hide_taken_emails: Arc<AtomicBool>,
    fail_phone_writes: Arc<AtomicBool>,
    fail_commits: Arc<AtomicBool>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped store, for inspecting committed state.
    pub fn inner(&self) -> &InMemoryCustomerStore {
        &self.inner
    }

    /// Make `exists_by_email` outside a transaction always answer false.
    pub fn hide_taken_emails(&self, hide: bool) {
        self.hide_taken_emails.store(hide, Ordering::SeqCst);
    }

    /// Make `save_all_phones` fail with an unavailable store.
    pub fn fail_phone_writes(&self, fail: bool) {
        self.fail_phone_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `commit` fail with an unavailable store.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn increment_call_count(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl CustomerStore for MockCustomerStore {
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        self.increment_call_count("find_by_id");
        self.inner.find_by_id(id).await
    }

    async fn find_by_id_with_phones(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        self.increment_call_count("find_by_id_with_phones");
        self.inner.find_by_id_with_phones(id).await
    }

    async fn find_all(&self) -> StoreResult<Vec<Customer>> {
        self.increment_call_count("find_all");
        self.inner.find_all().await
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        self.increment_call_count("exists_by_email");
        if self.hide_taken_emails.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.inner.exists_by_email(email).await
    }

    async fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool> {
        self.increment_call_count("exists_by_id");
        self.inner.exists_by_id(id).await
    }

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        self.increment_call_count("begin");
        let inner = self.inner.begin().await?;
        Ok(Box::new(MockTransaction {
            inner,
            store: self.clone(),
        }))
    }
}

struct MockTransaction {
    inner: Box<dyn StoreTransaction>,
    store: MockCustomerStore,
}

#[async_trait]
impl StoreTransaction for MockTransaction {
    async fn find_by_id_with_phones(&mut self, id: CustomerId) -> StoreResult<Option<Customer>> {
        self.store.increment_call_count("tx.find_by_id_with_phones");
        self.inner.find_by_id_with_phones(id).await
    }

    async fn exists_by_email(&mut self, email: &str) -> StoreResult<bool> {
        self.store.increment_call_count("tx.exists_by_email");
        self.inner.exists_by_email(email).await
    }

    async fn exists_by_id(&mut self, id: CustomerId) -> StoreResult<bool> {
        self.store.increment_call_count("tx.exists_by_id");
        self.inner.exists_by_id(id).await
    }

    async fn save(&mut self, customer: Customer) -> StoreResult<Customer> {
        self.store.increment_call_count("tx.save");
        self.inner.save(customer).await
    }

    async fn delete_by_id(&mut self, id: CustomerId) -> StoreResult<()> {
        self.store.increment_call_count("tx.delete_by_id");
        self.inner.delete_by_id(id).await
    }

    async fn save_all_phones(&mut self, phones: Vec<PhoneNumber>) -> StoreResult<Vec<PhoneNumber>> {
        self.store.increment_call_count("tx.save_all_phones");
        if self.store.fail_phone_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("phone table offline".to_string()));
        }
        self.inner.save_all_phones(phones).await
    }

    async fn delete_all_phones(&mut self, phones: &[PhoneNumber]) -> StoreResult<()> {
        self.store.increment_call_count("tx.delete_all_phones");
        self.inner.delete_all_phones(phones).await
    }

    async fn commit(&mut self) -> StoreResult<()> {
        self.store.increment_call_count("tx.commit");
        if self.store.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.inner.commit().await
    }
}
