//! Credential store port: Trait for the user directory.
//!
//! The application only needs lookup and insert-if-absent. Records are never
//! updated or deleted.

use crate::domain::CredentialRecord;

/// Directory of registered users, keyed by normalized email.
///
/// Implementations receive keys that are already normalized.
pub trait CredentialStore: Send + Sync {
    /// Look up the record stored under `email`.
    fn find(&self, email: &str) -> Option<CredentialRecord>;

    /// Insert `record` unless its key is already present.
    ///
    /// Returns `false` and leaves the store untouched when the key exists.
    /// The check and the insert happen as one step.
    fn insert_if_absent(&self, record: CredentialRecord) -> bool;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
