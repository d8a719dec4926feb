//! Creation and modification stamps carried by persisted entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit stamps, filled in by the store when a row is inserted or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Audit {
    /// Stamps for a row inserted at `now`.
    pub fn inserted(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            modified_at: now,
        }
    }

    /// Stamps after an update at `now`; `created_at` never moves.
    pub fn touched(self, now: DateTime<Utc>) -> Self {
        Self {
            created_at: self.created_at,
            modified_at: now.max(self.created_at),
        }
    }

    /// Stamp `audit` for a write at `now`: insert if unset, touch otherwise.
    pub fn stamp(audit: Option<Audit>, now: DateTime<Utc>) -> Audit {
        match audit {
            Some(existing) => existing.touched(now),
            None => Audit::inserted(now),
        }
    }
}
