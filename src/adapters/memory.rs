//! In-memory adapter: Implementation of CredentialStore.
//!
//! The directory lives only as long as the process. Construct one per process
//! and share it behind an `Arc`.
//!
//! # Mutex Behavior
//!
//! The map is guarded by a `Mutex` so the store is `Sync`. A poisoned lock is
//! recovered rather than propagated: inserts are single map operations and
//! cannot leave the map half-written.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::CredentialRecord;
use crate::ports::CredentialStore;

/// Volatile user directory keyed by normalized email.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: Mutex<HashMap<String, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, CredentialRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find(&self, email: &str) -> Option<CredentialRecord> {
        self.records().get(email).cloned()
    }

    fn insert_if_absent(&self, record: CredentialRecord) -> bool {
        let mut records = self.records();
        if records.contains_key(&record.email) {
            return false;
        }
        records.insert(record.email.clone(), record);
        true
    }

    fn len(&self) -> usize {
        self.records().len()
    }
}
