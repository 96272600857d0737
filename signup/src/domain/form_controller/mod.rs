//! Registration form orchestration.
//!
//! [`FormController`] runs one submission attempt at a time: it clears the
//! previous field errors, validates the raw values, calls the
//! account-creation port when validation passes, and reports the result
//! either as inline field errors or as signals for the presentation layer.
//!
//! The two failure paths never mix. A validation failure fills the
//! [`FieldErrorMap`] and emits no signal; a remote failure emits
//! [`RegistrationSignal::ShowRemoteError`] and leaves the map empty.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::ports::{AccountCreationClient, Feedback, RegistrationSignal, SignalSink};
use super::{
    ErrorMapper, FieldErrorMap, MessageCatalogue, RegistrationInput, RuleNameCatalogue,
    ValidationError, ValidationSchema,
};

/// Lifecycle of the form controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Ready for a submission.
    Idle,
    /// Schema evaluation in progress.
    Validating,
    /// Account-creation call in flight.
    Submitting,
    /// The account was created.
    Succeeded,
    /// The account-creation call failed.
    RemoteFailed,
    /// One or more fields failed validation.
    ValidationFailed,
}

impl FormState {
    /// Whether the state ends a submission attempt.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::RemoteFailed | Self::ValidationFailed
        )
    }

    /// Whether a submission attempt is still running.
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::RemoteFailed => "remote failed",
            Self::ValidationFailed => "validation failed",
        };
        f.write_str(label)
    }
}

/// Classification of a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Field-attributable; no remote call was made or the client reported
    /// field violations.
    ValidationFailure,
    /// Not field-attributable; the remote call failed.
    RemoteFailure,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The account was created.
    Success,
    /// The attempt failed.
    Failure {
        /// Which failure path was taken.
        kind: FailureKind,
    },
}

/// Returned when `submit` is called while an earlier attempt never finished.
///
/// This happens only when the future of a previous `submit` was dropped
/// mid-flight; call [`FormController::reset`] before retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("registration form is busy ({state})")]
pub struct FormBusy {
    /// State the controller was left in.
    pub state: FormState,
}

/// Alert texts used for the terminal signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessages {
    /// Shown after the account is created.
    pub success: Feedback,
    /// Shown after any remote failure.
    pub remote_error: Feedback,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            success: Feedback::new(
                "Registration complete!",
                "You can now sign in to the application.",
            ),
            remote_error: Feedback::new(
                "Registration failed",
                "An error occurred while creating your account, please try again.",
            ),
        }
    }
}

/// Orchestrates registration submissions for one screen instance.
///
/// `submit` borrows the controller mutably, so a second submission cannot
/// start while one is awaiting the account-creation call.
pub struct FormController<C, S, M = RuleNameCatalogue> {
    schema: ValidationSchema,
    mapper: ErrorMapper<M>,
    client: Arc<C>,
    signals: Arc<S>,
    feedback: FeedbackMessages,
    state: FormState,
    field_errors: FieldErrorMap,
}

impl<C, S> FormController<C, S, RuleNameCatalogue>
where
    C: AccountCreationClient,
    S: SignalSink,
{
    /// Create an idle controller using rule names as inline messages.
    pub fn new(client: Arc<C>, signals: Arc<S>) -> Self {
        Self {
            schema: ValidationSchema::registration(),
            mapper: ErrorMapper::default(),
            client,
            signals,
            feedback: FeedbackMessages::default(),
            state: FormState::Idle,
            field_errors: FieldErrorMap::default(),
        }
    }
}

impl<C, S, M> FormController<C, S, M>
where
    C: AccountCreationClient,
    S: SignalSink,
    M: MessageCatalogue,
{
    /// Replace the alert texts.
    #[must_use]
    pub fn with_feedback(mut self, feedback: FeedbackMessages) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replace the catalogue used for inline field messages.
    pub fn with_catalogue<N: MessageCatalogue>(self, catalogue: N) -> FormController<C, S, N> {
        FormController {
            schema: self.schema,
            mapper: ErrorMapper::new(catalogue),
            client: self.client,
            signals: self.signals,
            feedback: self.feedback,
            state: self.state,
            field_errors: self.field_errors,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether the form can accept a submission right now.
    ///
    /// Presentation layers use this to enable or disable the submit trigger.
    pub fn is_idle(&self) -> bool {
        self.state == FormState::Idle
    }

    /// Inline errors from the latest attempt.
    pub fn field_errors(&self) -> &FieldErrorMap {
        &self.field_errors
    }

    /// Record that the caller has observed a terminal state.
    ///
    /// Field errors stay visible until the next submission clears them.
    pub fn acknowledge(&mut self) {
        if self.state.is_terminal() {
            self.transition(FormState::Idle);
        }
    }

    /// Force the controller back to `Idle`, discarding field errors.
    ///
    /// Intended for recovery after an in-flight attempt was abandoned.
    pub fn reset(&mut self) {
        self.field_errors = FieldErrorMap::default();
        self.transition(FormState::Idle);
    }

    /// Run one submission attempt.
    ///
    /// # Errors
    ///
    /// Returns [`FormBusy`] when an earlier attempt was abandoned mid-flight.
    /// Validation and remote failures are reported through the returned
    /// [`SubmissionOutcome`], not as errors.
    pub async fn submit(&mut self, raw: &RegistrationInput) -> Result<SubmissionOutcome, FormBusy> {
        if self.state.is_in_flight() {
            return Err(FormBusy { state: self.state });
        }

        self.field_errors = FieldErrorMap::default();
        self.transition(FormState::Validating);
        if let Err(error) = self.schema.validate(raw) {
            return Ok(self.fail_validation(&error));
        }

        self.transition(FormState::Submitting);
        let result = self.client.create_account(raw).await;
        match result {
            Ok(()) => Ok(self.succeed()),
            Err(error) => match error.validation_error() {
                Some(violations) => {
                    debug!(error = %error, "account client reported field violations");
                    Ok(self.fail_validation(violations))
                }
                None => {
                    warn!(error = %error, "account creation failed");
                    Ok(self.fail_remote())
                }
            },
        }
    }

    fn fail_validation(&mut self, error: &ValidationError) -> SubmissionOutcome {
        self.field_errors = self.mapper.to_field_errors(error);
        debug!(
            fields = ?self.field_errors.fields().collect::<Vec<_>>(),
            "registration input failed validation"
        );
        self.transition(FormState::ValidationFailed);
        SubmissionOutcome::Failure {
            kind: FailureKind::ValidationFailure,
        }
    }

    fn succeed(&mut self) -> SubmissionOutcome {
        info!("account created");
        self.transition(FormState::Succeeded);
        // Confirmation goes out before navigation so it survives the screen
        // being dismissed.
        self.signals
            .emit(RegistrationSignal::ShowSuccess(self.feedback.success.clone()));
        self.signals.emit(RegistrationSignal::NavigateBack);
        SubmissionOutcome::Success
    }

    fn fail_remote(&mut self) -> SubmissionOutcome {
        self.transition(FormState::RemoteFailed);
        self.signals.emit(RegistrationSignal::ShowRemoteError(
            self.feedback.remote_error.clone(),
        ));
        SubmissionOutcome::Failure {
            kind: FailureKind::RemoteFailure,
        }
    }

    fn transition(&mut self, next: FormState) {
        debug!(from = %self.state, to = %next, "form state transition");
        self.state = next;
    }
}
