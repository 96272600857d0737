//! Reqwest-backed account-creation adapter.
//!
//! This adapter owns transport details only: request serialisation, optional
//! timeout, and mapping HTTP failures onto [`AccountCreationError`]. Response
//! bodies are read for diagnostics but never parsed for field detail.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::CreateAccountBody;
use crate::domain::RegistrationInput;
use crate::domain::ports::{AccountCreationClient, AccountCreationError};

/// Account-creation adapter that POSTs form values to one endpoint.
pub struct HttpAccountCreationClient {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl HttpAccountCreationClient {
    /// Build an adapter with an optional request timeout.
    ///
    /// `None` lets the call run until the server or the network gives up.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Option<Duration>,
        user_agent: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            user_agent: user_agent.into(),
        })
    }

    /// Endpoint receiving the account-creation request.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AccountCreationClient for HttpAccountCreationClient {
    async fn create_account(&self, input: &RegistrationInput) -> Result<(), AccountCreationError> {
        debug!(endpoint = %self.endpoint, "posting account creation request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&CreateAccountBody::from(input))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> AccountCreationError {
    if error.is_timeout() {
        AccountCreationError::timeout(error.to_string())
    } else if error.is_connect() || error.is_request() {
        AccountCreationError::transport(error.to_string())
    } else {
        AccountCreationError::unexpected(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AccountCreationError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AccountCreationError::timeout(message)
        }
        StatusCode::CONFLICT => AccountCreationError::conflict(message),
        _ => AccountCreationError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
