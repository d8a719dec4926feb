//! Customer aggregate service.
//!
//! Orchestrates validation, phone set reconciliation and persistence for the
//! customer aggregate. Every write runs inside a single store transaction.

use crate::domain::CustomerId;
use crate::error::{CustomerError, CustomerResult, StoreError};
use crate::models::{Customer, CustomerPayload};
use crate::observability::{Operation, OperationMetrics, Timer};
use crate::reconcile::reconcile;
use crate::repositories::CustomerStore;
use crate::validation::FieldValidator;
use async_trait::async_trait;
use std::sync::Arc;

/// Customer service trait for business operations.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Validate and persist a new customer with its phone numbers.
    async fn create(&self, payload: CustomerPayload) -> CustomerResult<Customer>;

    /// Get a customer with its phone numbers.
    async fn get(&self, id: CustomerId) -> CustomerResult<Customer>;

    /// Get every customer with phone numbers attached.
    async fn get_all(&self) -> CustomerResult<Vec<Customer>>;

    /// Overwrite a customer's fields and reconcile its phone numbers.
    ///
    /// Phone numbers semantically equal to existing ones keep their row.
    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> CustomerResult<Customer>;

    /// Delete a customer and every phone number it owns.
    async fn delete(&self, id: CustomerId) -> CustomerResult<()>;
}

/// Default implementation of CustomerService.
pub struct CustomerServiceImpl {
    store: Arc<dyn CustomerStore>,
    validator: FieldValidator,
    metrics: OperationMetrics,
}

impl CustomerServiceImpl {
    /// Create a new customer service.
    pub fn new(
        store: Arc<dyn CustomerStore>,
        validator: FieldValidator,
        metrics: OperationMetrics,
    ) -> Self {
        Self {
            store,
            validator,
            metrics,
        }
    }

    pub fn metrics(&self) -> &OperationMetrics {
        &self.metrics
    }

    fn validate(&self, payload: &CustomerPayload) -> CustomerResult<()> {
        self.validator
            .validate(payload)
            .into_result()
            .map_err(CustomerError::ValidationFailed)
    }

    /// Record the outcome of `operation` and pass the result through.
    fn observe<T>(&self, timer: Timer, result: CustomerResult<T>) -> CustomerResult<T> {
        let operation = timer.operation();
        let duration_ms = timer.finish();
        match &result {
            Ok(_) => self.metrics.track_success(operation, duration_ms),
            Err(e) => self.metrics.track_failure(operation, e),
        }
        result
    }

    async fn create_inner(&self, payload: CustomerPayload) -> CustomerResult<Customer> {
        self.validate(&payload)?;

        if self.store.exists_by_email(&payload.email_address).await? {
            tracing::debug!(email = %payload.email_address, "Email already registered");
            return Err(CustomerError::DuplicateEmail(payload.email_address));
        }

        let phones = self
            .validator
            .build_phone_numbers(&payload.phone_numbers)
            .map_err(CustomerError::ValidationFailed)?;

        let customer = Customer::from_payload(&payload);
        let id = customer.id;
        let owned: Vec<_> = phones.into_iter().map(|p| p.owned_by(id)).collect();
        let phone_count = owned.len();

        let write = async {
            let mut tx = self.store.begin().await?;
            let mut saved = tx.save(customer).await?;
            saved.phone_numbers = tx.save_all_phones(owned).await?;
            tx.commit().await?;
            Ok::<_, StoreError>(saved)
        };

        let saved = write
            .await
            .map_err(|e| duplicate_on_unique(e, &payload.email_address))?;

        self.metrics.track_phone_changes(phone_count, 0);
        tracing::info!(customer_id = %saved.id, phones = phone_count, "Customer created");
        Ok(saved)
    }

    async fn update_inner(
        &self,
        id: CustomerId,
        payload: CustomerPayload,
    ) -> CustomerResult<Customer> {
        let mut tx = self.store.begin().await?;

        let mut customer = tx
            .find_by_id_with_phones(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        self.validate(&payload)?;

        customer.apply(&payload);

        let incoming = self
            .validator
            .build_phone_numbers(&payload.phone_numbers)
            .map_err(CustomerError::ValidationFailed)?;

        let existing = std::mem::take(&mut customer.phone_numbers);
        let delta = reconcile(&existing, incoming);
        tracing::debug!(
            customer_id = %id,
            to_add = delta.to_add.len(),
            to_remove = delta.to_remove.len(),
            to_update = delta.to_update.len(),
            "Reconciled phone numbers"
        );

        let write = async {
            tx.delete_all_phones(&delta.to_remove).await?;

            let changed: Vec<_> = delta
                .to_add
                .iter()
                .cloned()
                .map(|p| p.owned_by(id))
                .chain(delta.to_update.iter().cloned())
                .collect();
            let written = tx.save_all_phones(changed).await?;

            let mut saved = tx.save(customer).await?;
            tx.commit().await?;

            // Rows written in this transaction carry fresh audit stamps
            let mut phones = delta.apply(&existing);
            for phone in phones.iter_mut() {
                if let Some(w) = written.iter().find(|w| w.id == phone.id) {
                    *phone = w.clone();
                }
            }
            saved.phone_numbers = phones;
            Ok::<_, StoreError>(saved)
        };

        let saved = write
            .await
            .map_err(|e| duplicate_on_unique(e, &payload.email_address))?;

        self.metrics
            .track_phone_changes(delta.to_add.len(), delta.to_remove.len());
        tracing::info!(customer_id = %id, "Customer updated");
        Ok(saved)
    }

    async fn delete_inner(&self, id: CustomerId) -> CustomerResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        let mut tx = self.store.begin().await?;
        tx.delete_by_id(id).await?;
        tx.commit().await?;

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}

/// Turn a store-level uniqueness violation into the duplicate email outcome.
fn duplicate_on_unique(error: StoreError, email: &str) -> CustomerError {
    match error {
        StoreError::UniqueViolation { constraint } => {
            tracing::error!(
                email = %email,
                constraint = %constraint,
                "Uniqueness violation while persisting customer"
            );
            CustomerError::DuplicateEmail(email.to_string())
        }
        other => CustomerError::Store(other),
    }
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn create(&self, payload: CustomerPayload) -> CustomerResult<Customer> {
        let timer = Timer::start(Operation::Create);
        let result = self.create_inner(payload).await;
        self.observe(timer, result)
    }

    async fn get(&self, id: CustomerId) -> CustomerResult<Customer> {
        let timer = Timer::start(Operation::Get);
        let result = match self.store.find_by_id_with_phones(id).await {
            Ok(Some(customer)) => Ok(customer),
            Ok(None) => Err(CustomerError::NotFound(id)),
            Err(e) => Err(e.into()),
        };
        self.observe(timer, result)
    }

    async fn get_all(&self) -> CustomerResult<Vec<Customer>> {
        let timer = Timer::start(Operation::List);
        let result = self.store.find_all().await.map_err(CustomerError::from);
        self.observe(timer, result)
    }

    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> CustomerResult<Customer> {
        let timer = Timer::start(Operation::Update);
        let result = self.update_inner(id, payload).await;
        self.observe(timer, result)
    }

    async fn delete(&self, id: CustomerId) -> CustomerResult<()> {
        let timer = Timer::start(Operation::Delete);
        let result = self.delete_inner(id).await;
        self.observe(timer, result)
    }
}
