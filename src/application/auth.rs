//! Auth service: sign-up and login against the user directory.
//!
//! This is the uniqueness boundary only. Email format and password
//! confirmation are checked by the caller before it gets here, and the
//! caller is the one that updates the session on success.

use std::sync::Arc;

use crate::domain::{normalize_email, CredentialRecord};
use crate::ports::CredentialStore;

/// Sign-up refused because the normalized email is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("email already registered")]
pub struct EmailTaken;

/// Login refused. Unknown email and wrong password are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid email or password")]
pub struct InvalidCredentials;

/// Service for registering and authenticating users.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> Clone for AuthService<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a service over an injected store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Returns `EmailTaken` if a record already exists for the normalized email.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), EmailTaken> {
        let record = CredentialRecord::new(name, email, password);
        if self.store.insert_if_absent(record) {
            tracing::info!(users = self.store.len(), "Registered new user");
            Ok(())
        } else {
            tracing::debug!("Sign-up refused: email already registered");
            Err(EmailTaken)
        }
    }

    /// Authenticate and return the stored display name.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` if no record exists for the normalized
    /// email or the password does not match exactly.
    pub fn login(&self, email: &str, password: &str) -> Result<String, InvalidCredentials> {
        match self.store.find(&normalize_email(email)) {
            Some(record) if record.password == password => Ok(record.display_name),
            _ => {
                tracing::debug!("Login refused");
                Err(InvalidCredentials)
            }
        }
    }
}
