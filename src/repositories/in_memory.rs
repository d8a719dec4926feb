//! In-memory customer store with snapshot transactions.

use super::traits::{CustomerStore, StoreTransaction};
use crate::domain::{Audit, CustomerId, PhoneNumberId};
use crate::error::{StoreError, StoreResult};
use crate::models::{Customer, PhoneNumber};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Name of the unique index on customer email addresses.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "customer_email_address_key";

/// Committed rows. Customers are stored without their phone collection.
#[derive(Debug, Clone, Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    phones: HashMap<PhoneNumberId, PhoneNumber>,
}

/// A recorded write, replayed against current state at commit.
#[derive(Debug, Clone)]
enum Write {
    /// `existed` records whether the row was present when the write was made
    SaveCustomer {
        customer: Customer,
        at: DateTime<Utc>,
        existed: bool,
    },
    DeleteCustomer(CustomerId),
    SavePhones(Vec<PhoneNumber>, DateTime<Utc>),
    DeletePhones(Vec<PhoneNumberId>),
}

impl Tables {
    fn apply(&mut self, write: &Write) -> StoreResult<()> {
        match write {
            Write::SaveCustomer {
                customer,
                at,
                existed,
            } => {
                if *existed && !self.customers.contains_key(&customer.id) {
                    return Err(StoreError::Conflict(format!(
                        "customer {} was deleted by a concurrent transaction",
                        customer.id
                    )));
                }
                self.save_customer(customer.clone(), *at)?;
            }
            Write::DeleteCustomer(id) => {
                self.customers.remove(id);
                self.phones.retain(|_, p| p.customer_id != Some(*id));
            }
            Write::SavePhones(phones, at) => {
                self.save_phones(phones.clone(), *at)?;
            }
            Write::DeletePhones(ids) => {
                for id in ids {
                    self.phones.remove(id);
                }
            }
        }
        Ok(())
    }

    fn save_customer(&mut self, customer: Customer, at: DateTime<Utc>) -> StoreResult<Customer> {
        let taken = self
            .customers
            .values()
            .any(|c| c.id != customer.id && c.email_address == customer.email_address);
        if taken {
            return Err(StoreError::UniqueViolation {
                constraint: EMAIL_UNIQUE_CONSTRAINT.to_string(),
            });
        }

        let previous = self.customers.get(&customer.id).and_then(|c| c.audit);
        let mut saved = customer;
        saved.audit = Some(Audit::stamp(previous, at));

        self.customers.insert(saved.id, saved.without_phones());
        Ok(saved)
    }

    fn save_phones(
        &mut self,
        phones: Vec<PhoneNumber>,
        at: DateTime<Utc>,
    ) -> StoreResult<Vec<PhoneNumber>> {
        for phone in &phones {
            match phone.customer_id {
                Some(owner) if self.customers.contains_key(&owner) => {}
                Some(owner) => {
                    return Err(StoreError::IntegrityViolation(format!(
                        "phone number {} references missing customer {}",
                        phone.id, owner
                    )))
                }
                None => {
                    return Err(StoreError::IntegrityViolation(format!(
                        "phone number {} has no owning customer",
                        phone.id
                    )))
                }
            }
        }

        let mut saved = Vec::with_capacity(phones.len());
        for mut phone in phones {
            let previous = self.phones.get(&phone.id).and_then(|p| p.audit);
            phone.audit = Some(Audit::stamp(previous, at));
            self.phones.insert(phone.id, phone.clone());
            saved.push(phone);
        }
        Ok(saved)
    }

    fn phones_of(&self, id: CustomerId) -> Vec<PhoneNumber> {
        let mut phones: Vec<PhoneNumber> = self
            .phones
            .values()
            .filter(|p| p.customer_id == Some(id))
            .cloned()
            .collect();
        phones.sort_by_key(|p| (p.audit.map(|a| a.created_at), p.id));
        phones
    }

    fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers.get(&id).cloned()
    }

    fn customer_with_phones(&self, id: CustomerId) -> Option<Customer> {
        self.customer(id).map(|mut c| {
            c.phone_numbers = self.phones_of(id);
            c
        })
    }

    fn all_customers(&self) -> Vec<Customer> {
        let mut ids: Vec<(Option<DateTime<Utc>>, CustomerId)> = self
            .customers
            .values()
            .map(|c| (c.audit.map(|a| a.created_at), c.id))
            .collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|(_, id)| self.customer_with_phones(id))
            .collect()
    }

    fn email_taken(&self, email: &str) -> bool {
        self.customers.values().any(|c| c.email_address == email)
    }
}

/// Customer store held entirely in memory.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed customer rows.
    pub async fn customer_count(&self) -> usize {
        self.tables.read().await.customers.len()
    }

    /// Number of committed phone number rows, owned or not.
    pub async fn phone_row_count(&self) -> usize {
        self.tables.read().await.phones.len()
    }

    /// Whether a phone number row with `id` is committed.
    pub async fn contains_phone(&self, id: PhoneNumberId) -> bool {
        self.tables.read().await.phones.contains_key(&id)
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.tables.read().await.customer(id))
    }

    async fn find_by_id_with_phones(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.tables.read().await.customer_with_phones(id))
    }

    async fn find_all(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.tables.read().await.all_customers())
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        Ok(self.tables.read().await.email_taken(email))
    }

    async fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool> {
        Ok(self.tables.read().await.customers.contains_key(&id))
    }

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        let snapshot = self.tables.read().await.clone();
        Ok(Box::new(InMemoryTransaction {
            shared: self.tables.clone(),
            working: snapshot,
            writes: Vec::new(),
            committed: false,
        }))
    }
}

/// Transaction over a snapshot of the store.
///
/// Writes apply to the snapshot immediately, so constraint failures surface at
/// the offending call, and are replayed against current state on commit.
struct InMemoryTransaction {
    shared: Arc<RwLock<Tables>>,
    working: Tables,
    writes: Vec<Write>,
    committed: bool,
}

impl InMemoryTransaction {
    fn ensure_open(&self) -> StoreResult<()> {
        if self.committed {
            Err(StoreError::TransactionClosed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn find_by_id_with_phones(&mut self, id: CustomerId) -> StoreResult<Option<Customer>> {
        self.ensure_open()?;
        Ok(self.working.customer_with_phones(id))
    }

    async fn exists_by_email(&mut self, email: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.working.email_taken(email))
    }

    async fn exists_by_id(&mut self, id: CustomerId) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.working.customers.contains_key(&id))
    }

    async fn save(&mut self, customer: Customer) -> StoreResult<Customer> {
        self.ensure_open()?;
        let at = Utc::now();
        let existed = self.working.customers.contains_key(&customer.id);
        let saved = self.working.save_customer(customer.clone(), at)?;
        self.writes.push(Write::SaveCustomer {
            customer,
            at,
            existed,
        });
        Ok(saved)
    }

    async fn delete_by_id(&mut self, id: CustomerId) -> StoreResult<()> {
        self.ensure_open()?;
        let write = Write::DeleteCustomer(id);
        self.working.apply(&write)?;
        self.writes.push(write);
        Ok(())
    }

    async fn save_all_phones(&mut self, phones: Vec<PhoneNumber>) -> StoreResult<Vec<PhoneNumber>> {
        self.ensure_open()?;
        if phones.is_empty() {
            return Ok(phones);
        }
        let at = Utc::now();
        let saved = self.working.save_phones(phones.clone(), at)?;
        self.writes.push(Write::SavePhones(phones, at));
        Ok(saved)
    }

    async fn delete_all_phones(&mut self, phones: &[PhoneNumber]) -> StoreResult<()> {
        self.ensure_open()?;
        if phones.is_empty() {
            return Ok(());
        }
        let write = Write::DeletePhones(phones.iter().map(|p| p.id).collect());
        self.working.apply(&write)?;
        self.writes.push(write);
        Ok(())
    }

    async fn commit(&mut self) -> StoreResult<()> {
        self.ensure_open()?;

        let mut state = self.shared.write().await;
        let mut next = state.clone();
        for write in &self.writes {
            next.apply(write)?;
        }
        *state = next;

        self.committed = true;
        tracing::trace!(writes = self.writes.len(), "Transaction committed");
        Ok(())
    }
}
