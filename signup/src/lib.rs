//! Registration form controller library.
//!
//! The `domain` module holds the form logic and its ports; `outbound` hosts
//! the HTTP account-creation adapter; `inbound` renders the form on a
//! terminal for the `signup` binary.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::SignupSettings;
