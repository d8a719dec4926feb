use customer_registry::validation::ValidationOracle;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock validation oracle for testing.
///
/// Emails are valid when they contain an '@', phone numbers when they carry at
/// least ten digits, unless explicitly rejected. Tracks calls for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockValidationOracle {
    rejected_emails: Arc<Mutex<HashSet<String>>>,
    rejected_numbers: Arc<Mutex<HashSet<String>>>,
    phone_budget: Arc<Mutex<Option<usize>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockValidationOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `email` regardless of its shape.
    pub fn reject_email(&self, email: &str) {
        self.rejected_emails.lock().unwrap().insert(email.to_string());
    }

    /// Reject `number` regardless of its shape.
    pub fn reject_number(&self, number: &str) {
        self.rejected_numbers
            .lock()
            .unwrap()
            .insert(number.to_string());
    }

    /// Accept only the next `checks` phone numbers; reject every later one.
    pub fn accept_phone_checks(&self, checks: usize) {
        *self.phone_budget.lock().unwrap() = Some(checks);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn increment_call_count(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl ValidationOracle for MockValidationOracle {
    fn is_valid_email(&self, email: &str) -> bool {
        self.increment_call_count("is_valid_email");
        email.contains('@') && !self.rejected_emails.lock().unwrap().contains(email)
    }

    fn is_valid_phone_number(&self, raw_number: &str, _country_code: &str) -> bool {
        self.increment_call_count("is_valid_phone_number");

        let mut budget = self.phone_budget.lock().unwrap();
        match budget.as_mut() {
            Some(0) => return false,
            Some(remaining) => *remaining -= 1,
            None => {}
        }
        drop(budget);

        raw_number.chars().filter(|c| c.is_ascii_digit()).count() >= 10
            && !self.rejected_numbers.lock().unwrap().contains(raw_number)
    }
}
