//! Driven port for persisting a new account on the remote service.
//!
//! The form controller calls this after local validation passes. Adapters map
//! their transport failures into [`AccountCreationError`] so the controller
//! can classify outcomes by error kind rather than by call site.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{RegistrationInput, ValidationError};

define_port_error! {
    /// Errors surfaced while creating an account.
    pub enum AccountCreationError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "account creation transport failed: {message}",
        /// The request or the remote service timed out.
        Timeout { message: String } =>
            "account creation timed out: {message}",
        /// The remote service answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "account creation rejected with status {status}: {message}",
        /// An account with the same identity already exists.
        Conflict { message: String } =>
            "account already exists: {message}",
        /// The client re-validated the input and found field violations.
        Validation { error: ValidationError } =>
            "account creation rejected invalid fields: {error}",
        /// Any other failure the adapter could not classify.
        Unexpected { message: String } =>
            "account creation failed unexpectedly: {message}",
    }
}

impl AccountCreationError {
    /// Field violations carried by this error, if it is a validation failure.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { error } => Some(error),
            _ => None,
        }
    }
}

/// Port for the account-creation call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCreationClient: Send + Sync {
    /// Create an account from validated form values.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use signup::domain::RegistrationInput;
    /// use signup::domain::ports::{AccountCreationClient, FixtureAccountCreationClient};
    ///
    /// let client = FixtureAccountCreationClient;
    /// client
    ///     .create_account(&RegistrationInput::new("Ana", "ana@example.com", "pw"))
    ///     .await?;
    /// # Ok::<(), signup::domain::ports::AccountCreationError>(())
    /// ```
    async fn create_account(&self, input: &RegistrationInput) -> Result<(), AccountCreationError>;
}

/// Fixture implementation that accepts every account.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAccountCreationClient;

#[async_trait]
impl AccountCreationClient for FixtureAccountCreationClient {
    async fn create_account(&self, _input: &RegistrationInput) -> Result<(), AccountCreationError> {
        Ok(())
    }
}
