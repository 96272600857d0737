//! Terminal adapter for the registration form.
//!
//! The terminal plays the presentation layer: it prompts for field values in
//! focus order, prints inline field errors, and renders controller signals as
//! plain-text alerts. Interactive prompts go through `dialoguer`, which hides
//! the password while it is typed.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use dialoguer::{Input, Password};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ports::{Feedback, RegistrationSignal, SignalSink};
use crate::domain::{FieldErrorMap, FieldName, FocusChain, FocusStep, RegistrationInput};

/// Errors raised while talking to the terminal.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// The interactive prompt failed.
    #[error("failed to read {field}: {source}")]
    Prompt {
        field: FieldName,
        #[source]
        source: dialoguer::Error,
    },
    /// Input ended before a value for the field was read.
    #[error("input closed while waiting for {field}")]
    InputClosed { field: FieldName },
}

/// Source of values for single form fields.
pub trait FieldPrompt {
    /// Ask for the value of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError`] when no value can be read.
    fn prompt(&mut self, field: FieldName) -> Result<String, TerminalError>;
}

/// Interactive terminal prompt. The password is read without echo.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompt;

impl FieldPrompt for DialoguerPrompt {
    fn prompt(&mut self, field: FieldName) -> Result<String, TerminalError> {
        let read = match field {
            FieldName::Password => Password::new()
                .with_prompt(field.label())
                .allow_empty_password(true)
                .interact(),
            FieldName::Name | FieldName::Email => Input::<String>::new()
                .with_prompt(field.label())
                .allow_empty(true)
                .interact_text(),
        };
        read.map_err(|source| TerminalError::Prompt { field, source })
    }
}

/// Prompt that replays prepared answers in order.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<FieldName>,
}

impl ScriptedPrompt {
    /// Queue `answers` for successive prompts.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Fields prompted so far, in order.
    pub fn asked(&self) -> &[FieldName] {
        &self.asked
    }
}

impl FieldPrompt for ScriptedPrompt {
    fn prompt(&mut self, field: FieldName) -> Result<String, TerminalError> {
        self.asked.push(field);
        self.answers
            .pop_front()
            .ok_or(TerminalError::InputClosed { field })
    }
}

/// Walk the focus chain and prompt for every field `pending` selects.
///
/// Fields that are not selected keep the value already held in `input`.
///
/// # Errors
///
/// Propagates [`TerminalError`] from the prompt.
pub fn fill_fields(
    chain: &FocusChain,
    mut input: RegistrationInput,
    pending: impl Fn(FieldName) -> bool,
    prompter: &mut impl FieldPrompt,
) -> Result<RegistrationInput, TerminalError> {
    let mut step = FocusStep::Focus(chain.first());
    while let FocusStep::Focus(field) = step {
        if pending(field) {
            let value = prompter.prompt(field)?;
            input = input.with_value(field, value);
        }
        step = chain.advance(field);
    }
    Ok(input)
}

/// Print one `field: message` line per inline error, in schema order.
///
/// # Errors
///
/// Returns the underlying I/O error when writing fails.
pub fn render_field_errors(out: &mut impl Write, errors: &FieldErrorMap) -> io::Result<()> {
    for (field, message) in errors.iter() {
        writeln!(out, "{field}: {message}")?;
    }
    out.flush()
}

/// Signal sink that prints alerts to a terminal stream.
///
/// A `NavigateBack` signal marks the session as finished; the binary reads
/// [`TerminalSignals::navigated_back`] to decide its exit status.
pub struct TerminalSignals<W> {
    out: Mutex<W>,
    navigated_back: AtomicBool,
}

impl<W: Write + Send> TerminalSignals<W> {
    /// Print alerts to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            navigated_back: AtomicBool::new(false),
        }
    }

    /// Whether the controller asked to leave the form.
    pub fn navigated_back(&self) -> bool {
        self.navigated_back.load(Ordering::Acquire)
    }

    /// Release the wrapped stream.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_alert(&self, feedback: &Feedback) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = writeln!(out, "{}", feedback.title)
            .and_then(|()| writeln!(out, "{}", feedback.message))
            .and_then(|()| out.flush());
        if let Err(error) = written {
            warn!(error = %error, title = %feedback.title, "failed to print alert");
        }
    }
}

impl<W: Write + Send> SignalSink for TerminalSignals<W> {
    fn emit(&self, signal: RegistrationSignal) {
        match signal {
            RegistrationSignal::ShowSuccess(feedback)
            | RegistrationSignal::ShowRemoteError(feedback) => self.write_alert(&feedback),
            RegistrationSignal::NavigateBack => {
                debug!("leaving registration form");
                self.navigated_back.store(true, Ordering::Release);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Terminal adapter behaviour against scripted answers and in-memory
    //! streams.

    use super::*;
    use crate::domain::{ErrorMapper, Rule, ValidationError, Violation};
    use rstest::rstest;

    fn errors_for(violations: Vec<Violation>) -> FieldErrorMap {
        let error = ValidationError::from_violations(violations).expect("non-empty violations");
        let mapper: ErrorMapper = ErrorMapper::default();
        mapper.to_field_errors(&error)
    }

    #[rstest]
    #[case(FieldName::Name)]
    #[case(FieldName::Email)]
    #[case(FieldName::Password)]
    fn scripted_prompt_reports_closed_input(#[case] field: FieldName) {
        let mut prompter = ScriptedPrompt::new(Vec::<String>::new());
        let err = prompter.prompt(field).expect_err("no answers left");
        assert!(matches!(err, TerminalError::InputClosed { field: closed } if closed == field));
    }

    #[test]
    fn fill_fields_prompts_in_focus_order() {
        let mut prompter = ScriptedPrompt::new(["Ana", "ana@example.com", "secret"]);
        let input = fill_fields(
            &FocusChain::default(),
            RegistrationInput::default(),
            |_| true,
            &mut prompter,
        )
        .expect("all fields answered");

        assert_eq!(input.name(), "Ana");
        assert_eq!(input.email(), "ana@example.com");
        assert_eq!(input.password(), "secret");
        assert_eq!(prompter.asked(), FieldName::ALL.as_slice());
    }

    #[test]
    fn fill_fields_skips_fields_not_pending() {
        let mut prompter = ScriptedPrompt::new(["ana@example.com"]);
        let input = fill_fields(
            &FocusChain::default(),
            RegistrationInput::new("Ana", "bad", "secret"),
            |field| field == FieldName::Email,
            &mut prompter,
        )
        .expect("email answered");

        assert_eq!(input.name(), "Ana");
        assert_eq!(input.email(), "ana@example.com");
        assert_eq!(input.password(), "secret");
        assert_eq!(prompter.asked(), [FieldName::Email].as_slice());
    }

    #[test]
    fn fill_fields_follows_a_custom_chain() {
        let chain =
            FocusChain::new(vec![FieldName::Email, FieldName::Name]).expect("valid chain");
        let mut prompter = ScriptedPrompt::new(["ana@example.com", "Ana"]);
        let input = fill_fields(&chain, RegistrationInput::default(), |_| true, &mut prompter)
            .expect("fields answered");

        assert_eq!(input.email(), "ana@example.com");
        assert_eq!(input.name(), "Ana");
        assert_eq!(input.password(), "");
        assert_eq!(
            prompter.asked(),
            [FieldName::Email, FieldName::Name].as_slice()
        );
    }

    #[test]
    fn fill_fields_stops_when_answers_run_out() {
        let mut prompter = ScriptedPrompt::new(["Ana"]);
        let err = fill_fields(
            &FocusChain::default(),
            RegistrationInput::default(),
            |_| true,
            &mut prompter,
        )
        .expect_err("email has no answer");
        assert!(matches!(
            err,
            TerminalError::InputClosed {
                field: FieldName::Email
            }
        ));
    }

    #[test]
    fn render_field_errors_uses_schema_order() {
        let errors = errors_for(vec![
            Violation::new(FieldName::Password, Rule::Required),
            Violation::new(FieldName::Name, Rule::Required),
        ]);
        let mut out = Vec::new();
        render_field_errors(&mut out, &errors).expect("write to memory");
        assert_eq!(
            String::from_utf8(out).expect("UTF-8"),
            "name: Required\npassword: Required\n"
        );
    }

    #[test]
    fn terminal_signals_print_alerts_and_record_navigation() {
        let signals = TerminalSignals::new(Vec::new());
        signals.emit(RegistrationSignal::ShowSuccess(Feedback::new(
            "Registration complete!",
            "You can now sign in to the application.",
        )));
        assert!(!signals.navigated_back());
        signals.emit(RegistrationSignal::NavigateBack);
        assert!(signals.navigated_back());

        let printed = String::from_utf8(signals.into_inner()).expect("UTF-8");
        assert_eq!(
            printed,
            "Registration complete!\nYou can now sign in to the application.\n"
        );
    }
}
