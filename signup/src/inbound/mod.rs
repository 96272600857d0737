//! Inbound adapters driving the registration form.

pub mod cli;
