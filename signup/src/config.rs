//! Client settings loaded via OrthoConfig.
//!
//! Values come from `SIGNUP_*` environment variables or a config file; every
//! field is optional and falls back to a default through its accessor.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{FeedbackMessages, FieldMessageCatalogue, FieldName, Rule};
use crate::domain::ports::Feedback;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_USERS_PATH: &str = "/users";
/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "signup-client/0.1";

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The account-creation endpoint is not a valid absolute URL.
    #[error("invalid account endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },
}

/// Configuration for the registration client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SIGNUP")]
pub struct SignupSettings {
    /// Base URL of the account service.
    #[ortho_config(default = DEFAULT_API_BASE_URL.to_owned())]
    pub api_base_url: String,
    /// Path of the account-creation resource.
    #[ortho_config(default = DEFAULT_USERS_PATH.to_owned())]
    pub users_path: String,
    /// Transport timeout for the account-creation call. Absent means none.
    pub request_timeout_secs: Option<u64>,
    /// User-Agent header sent with requests.
    #[ortho_config(default = DEFAULT_USER_AGENT.to_owned())]
    pub user_agent: String,
    /// Heading of the success alert.
    pub success_title: Option<String>,
    /// Body of the success alert.
    pub success_message: Option<String>,
    /// Heading of the remote failure alert.
    pub error_title: Option<String>,
    /// Body of the remote failure alert.
    pub error_message: Option<String>,
    /// Inline message for an empty name.
    pub name_required_message: Option<String>,
    /// Inline message for an empty e-mail.
    pub email_required_message: Option<String>,
    /// Inline message for a malformed e-mail.
    pub email_invalid_message: Option<String>,
    /// Inline message for an empty password.
    pub password_required_message: Option<String>,
}

impl SignupSettings {
    /// Resolve the account-creation endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEndpoint`] when the joined URL does not
    /// parse.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let base = self.api_base_url.trim_end_matches('/');
        let path = self.users_path.as_str();
        let raw = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };

        Url::parse(&raw).map_err(|error| SettingsError::InvalidEndpoint {
            url: raw.clone(),
            message: error.to_string(),
        })
    }

    /// Transport timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// User-Agent header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Alert texts, with defaults for anything unset.
    pub fn feedback(&self) -> FeedbackMessages {
        let defaults = FeedbackMessages::default();
        FeedbackMessages {
            success: Feedback::new(
                self.success_title
                    .clone()
                    .unwrap_or(defaults.success.title),
                self.success_message
                    .clone()
                    .unwrap_or(defaults.success.message),
            ),
            remote_error: Feedback::new(
                self.error_title
                    .clone()
                    .unwrap_or(defaults.remote_error.title),
                self.error_message
                    .clone()
                    .unwrap_or(defaults.remote_error.message),
            ),
        }
    }

    /// Inline field messages; rules without an override show their name.
    pub fn catalogue(&self) -> FieldMessageCatalogue {
        [
            (FieldName::Name, Rule::Required, &self.name_required_message),
            (FieldName::Email, Rule::Required, &self.email_required_message),
            (FieldName::Email, Rule::InvalidFormat, &self.email_invalid_message),
            (FieldName::Password, Rule::Required, &self.password_required_message),
        ]
        .into_iter()
        .fold(FieldMessageCatalogue::default(), |catalogue, (field, rule, text)| {
            match text {
                Some(text) => catalogue.with_message(field, rule, text.as_str()),
                None => catalogue,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use crate::domain::MessageCatalogue;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 12] = [
        "SIGNUP_API_BASE_URL",
        "SIGNUP_USERS_PATH",
        "SIGNUP_REQUEST_TIMEOUT_SECS",
        "SIGNUP_USER_AGENT",
        "SIGNUP_SUCCESS_TITLE",
        "SIGNUP_SUCCESS_MESSAGE",
        "SIGNUP_ERROR_TITLE",
        "SIGNUP_ERROR_MESSAGE",
        "SIGNUP_NAME_REQUIRED_MESSAGE",
        "SIGNUP_EMAIL_REQUIRED_MESSAGE",
        "SIGNUP_EMAIL_INVALID_MESSAGE",
        "SIGNUP_PASSWORD_REQUIRED_MESSAGE",
    ];

    fn load_from_empty_args() -> SignupSettings {
        SignupSettings::load_from_iter([OsString::from("signup")]).expect("config should load")
    }

    fn cleared_env() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None::<String>)).collect()
    }

    fn settings(base: &str, path: &str) -> SignupSettings {
        SignupSettings {
            api_base_url: base.to_owned(),
            users_path: path.to_owned(),
            request_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            success_title: None,
            success_message: None,
            error_title: None,
            error_message: None,
            name_required_message: None,
            email_required_message: None,
            email_invalid_message: None,
            password_required_message: None,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.endpoint().expect("default endpoint").as_str(),
            "http://localhost:3333/users"
        );
        assert!(settings.request_timeout().is_none());
        assert_eq!(settings.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(settings.feedback(), FeedbackMessages::default());
        assert_eq!(
            settings.catalogue().message(FieldName::Email, Rule::InvalidFormat),
            "InvalidFormat"
        );
    }

    #[rstest]
    fn field_message_overrides_reach_the_catalogue() {
        let mut vars = cleared_env();
        vars.extend([
            ("SIGNUP_NAME_REQUIRED_MESSAGE", Some("Name required".to_owned())),
            ("SIGNUP_EMAIL_INVALID_MESSAGE", Some("Enter a valid e-mail".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let catalogue = load_from_empty_args().catalogue();
        assert_eq!(
            catalogue.message(FieldName::Name, Rule::Required),
            "Name required"
        );
        assert_eq!(
            catalogue.message(FieldName::Email, Rule::InvalidFormat),
            "Enter a valid e-mail"
        );
        assert_eq!(
            catalogue.message(FieldName::Password, Rule::Required),
            "Required"
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared_env();
        vars.extend([
            ("SIGNUP_API_BASE_URL", Some("https://api.example.test/v1/".to_owned())),
            ("SIGNUP_USERS_PATH", Some("accounts".to_owned())),
            ("SIGNUP_REQUEST_TIMEOUT_SECS", Some("15".to_owned())),
            ("SIGNUP_ERROR_TITLE", Some("Sign-up failed".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.endpoint().expect("configured endpoint").as_str(),
            "https://api.example.test/v1/accounts"
        );
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
        let feedback = settings.feedback();
        assert_eq!(feedback.remote_error.title, "Sign-up failed");
        assert_eq!(
            feedback.remote_error.message,
            FeedbackMessages::default().remote_error.message
        );
    }

    #[rstest]
    #[case("http://localhost:3333", "/users", "http://localhost:3333/users")]
    #[case("http://localhost:3333/", "users", "http://localhost:3333/users")]
    #[case("https://api.example.test/v1", "/api/users", "https://api.example.test/v1/api/users")]
    fn endpoint_joins_base_and_path(
        #[case] base: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let endpoint = settings(base, path).endpoint().expect("valid endpoint");
        assert_eq!(endpoint.as_str(), expected);
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = settings("not a url", DEFAULT_USERS_PATH)
            .endpoint()
            .expect_err("relative base must fail");
        assert!(matches!(err, SettingsError::InvalidEndpoint { .. }));
    }
}
