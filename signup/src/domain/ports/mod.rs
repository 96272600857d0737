//! Domain ports defining the edges of the hexagon.
//!
//! The controller drives two outward-facing ports: the account-creation call
//! and the signal sink owned by the presentation layer. Each error type is a
//! strongly typed enum so adapters map failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod account_creation_client;
mod signal_sink;

#[cfg(test)]
pub use account_creation_client::MockAccountCreationClient;
pub use account_creation_client::{
    AccountCreationClient, AccountCreationError, FixtureAccountCreationClient,
};
#[cfg(test)]
pub use signal_sink::MockSignalSink;
pub use signal_sink::{Feedback, RecordingSignalSink, RegistrationSignal, SignalSink};
