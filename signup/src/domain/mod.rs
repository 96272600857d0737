//! Registration domain: form values, validation, error mapping, and the
//! controller that ties them to the account-creation port.
//!
//! Purpose: keep every rule of the registration screen testable without a
//! rendering environment or network. Adapters live in `inbound` and
//! `outbound`; this module only talks to them through [`ports`].
//!
//! Public surface:
//! - RegistrationInput / FieldName — raw form values and their keys.
//! - ValidationSchema / ValidationError / Rule — declarative field rules.
//! - ErrorMapper / FieldErrorMap / MessageCatalogue — inline messages.
//! - FormController / SubmissionOutcome / FormState — submission flow.
//! - FocusChain — presentation-owned "next field" ordering.

pub mod field_errors;
pub mod focus_chain;
pub mod form_controller;
pub mod ports;
pub mod registration;
pub mod validation;

pub use self::field_errors::{
    ErrorMapper, FieldErrorMap, FieldMessageCatalogue, MessageCatalogue, RuleNameCatalogue,
};
pub use self::focus_chain::{FocusChain, FocusChainError, FocusStep};
pub use self::form_controller::{
    FailureKind, FeedbackMessages, FormBusy, FormController, FormState, SubmissionOutcome,
};
pub use self::registration::{FieldName, RegistrationInput};
pub use self::validation::{Rule, ValidationError, ValidationSchema, Violation};
