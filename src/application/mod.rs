//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the session workflow: sign-up, login, routing and prediction.

mod auth;
mod prediction;
mod router;
mod workflow;

pub use auth::{AuthService, EmailTaken, InvalidCredentials};
pub use prediction::{PredictionDispatcher, PredictionFailed};
pub use router::{route, Route};
pub use workflow::{FormError, LoginForm, SignupForm, Workflow};

#[cfg(test)]
pub(crate) use prediction::tests as prediction_stubs;
