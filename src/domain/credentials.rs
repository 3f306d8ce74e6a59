//! Credential records and the pure validation rules applied before sign-up
//! and login.
//!
//! Only Gmail addresses are accepted. The restriction is deliberate.

use serde::{Deserialize, Serialize};

/// The only email domain allowed to register or sign in.
pub const ALLOWED_EMAIL_DOMAIN: &str = "gmail.com";

/// Stored sign-up data keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Normalized email (trimmed, lowercase). Unique key in the store.
    pub email: String,

    /// Name shown once the user is signed in
    pub display_name: String,

    /// Plaintext password. Hashing is out of scope for this application.
    pub password: String,
}

impl CredentialRecord {
    /// Create a record, normalizing the email key.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        email: &str,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: normalize_email(email),
            display_name: display_name.into(),
            password: password.into(),
        }
    }
}

/// Reasons an email address is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("email address is not of the form local@domain.tld")]
    Format,

    #[error("only gmail.com addresses are accepted")]
    DomainNotAllowed,
}

/// Trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check well-formedness first, then the domain restriction.
///
/// # Errors
/// Returns `EmailError::Format` for anything that is not `local@domain.tld`,
/// and `EmailError::DomainNotAllowed` for well-formed non-Gmail addresses.
pub fn validate_email(raw: &str) -> Result<(), EmailError> {
    let email = normalize_email(raw);

    let (local, domain) = email.split_once('@').ok_or(EmailError::Format)?;
    if local.is_empty() || domain.contains('@') {
        return Err(EmailError::Format);
    }

    // domain needs a dot with something on each side of it
    let (host, tld) = domain.rsplit_once('.').ok_or(EmailError::Format)?;
    if host.is_empty() || tld.is_empty() {
        return Err(EmailError::Format);
    }

    if domain != ALLOWED_EMAIL_DOMAIN {
        return Err(EmailError::DomainNotAllowed);
    }

    Ok(())
}

/// Whether `raw` is a well-formed Gmail address.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    validate_email(raw).is_ok()
}

/// Exact comparison of a password and its confirmation.
#[must_use]
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}
