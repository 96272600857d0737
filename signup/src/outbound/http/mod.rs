//! HTTP outbound adapters.
//!
//! This module provides a thin reqwest implementation of the
//! `AccountCreationClient` port.

mod account_client;
mod dto;

pub use account_client::HttpAccountCreationClient;
