//! Driven port through which the form controller asks the presentation layer
//! for user-visible side effects.
//!
//! Signals are requests, not commands: the presentation layer decides how an
//! alert looks and how navigation happens. Emission order is significant.

use std::sync::{Mutex, PoisonError};

/// Title and body of a blocking alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Short heading.
    pub title: String,
    /// Explanatory body text.
    pub message: String,
}

impl Feedback {
    /// Pair a heading with its body text.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// UI side effect requested by the form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationSignal {
    /// Confirm that the account was created.
    ShowSuccess(Feedback),
    /// Report a failure that cannot be attributed to a field.
    ShowRemoteError(Feedback),
    /// Leave the registration screen.
    NavigateBack,
}

/// Port receiving controller signals in emission order.
#[cfg_attr(test, mockall::automock)]
pub trait SignalSink: Send + Sync {
    /// Deliver one signal.
    fn emit(&self, signal: RegistrationSignal);
}

/// Sink that records every signal, for tests and headless callers.
#[derive(Debug, Default)]
pub struct RecordingSignalSink {
    signals: Mutex<Vec<RegistrationSignal>>,
}

impl RecordingSignalSink {
    /// Snapshot of the signals received so far.
    pub fn signals(&self) -> Vec<RegistrationSignal> {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SignalSink for RecordingSignalSink {
    fn emit(&self, signal: RegistrationSignal) {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(signal);
    }
}
