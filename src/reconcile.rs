//! Phone set reconciliation.
//!
//! Diffs a customer's persisted phone numbers against an incoming set using
//! semantic equality (normalized number, type, country code), never row
//! identity. Entries present on both sides keep their persisted row.

use crate::domain::PhoneKey;
use crate::models::PhoneNumber;
use std::collections::{HashMap, HashSet};

/// The changes needed to turn an existing phone set into an incoming one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneSetDelta {
    /// Incoming entries with no semantic match in the existing set
    pub to_add: Vec<PhoneNumber>,

    /// Existing entries with no semantic match in the incoming set
    pub to_remove: Vec<PhoneNumber>,

    /// Matched existing rows whose verified flag changes, already patched
    pub to_update: Vec<PhoneNumber>,
}

impl PhoneSetDelta {
    /// Whether applying the delta would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty() && self.to_update.is_empty()
    }

    /// The phone set that results from applying this delta to `existing`.
    pub fn apply(&self, existing: &[PhoneNumber]) -> Vec<PhoneNumber> {
        let removed: HashSet<PhoneKey> = self.to_remove.iter().map(PhoneNumber::key).collect();
        let updated: HashMap<PhoneKey, &PhoneNumber> =
            self.to_update.iter().map(|p| (p.key(), p)).collect();

        existing
            .iter()
            .filter(|p| !removed.contains(&p.key()))
            .map(|p| updated.get(&p.key()).map_or_else(|| p.clone(), |u| (*u).clone()))
            .chain(self.to_add.iter().cloned())
            .collect()
    }
}

/// Compute the add/remove/update delta between `existing` and `incoming`.
///
/// `to_add` and `to_remove` partition the symmetric difference: no entry is
/// in both, and `existing - to_remove + to_add` equals `incoming` as a set.
/// Semantically equal incoming entries collapse to the first occurrence.
pub fn reconcile(existing: &[PhoneNumber], incoming: Vec<PhoneNumber>) -> PhoneSetDelta {
    let existing_by_key: HashMap<PhoneKey, &PhoneNumber> =
        existing.iter().map(|p| (p.key(), p)).collect();

    let mut incoming_keys = HashSet::with_capacity(incoming.len());
    let mut delta = PhoneSetDelta::default();

    for phone in incoming {
        let key = phone.key();
        if !incoming_keys.insert(key.clone()) {
            continue;
        }

        match existing_by_key.get(&key) {
            Some(current) if current.verified != phone.verified => {
                let mut patched = (*current).clone();
                patched.verified = phone.verified;
                delta.to_update.push(patched);
            }
            Some(_) => {}
            None => delta.to_add.push(phone),
        }
    }

    delta.to_remove = existing
        .iter()
        .filter(|p| !incoming_keys.contains(&p.key()))
        .cloned()
        .collect();

    delta
}
