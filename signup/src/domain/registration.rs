//! Registration form values and the field identifiers that key them.
//!
//! Values are kept exactly as typed. Trimming is a validation concern, not a
//! storage one, so the account-creation call receives what the user entered.

use std::fmt;

use zeroize::Zeroizing;

/// Identifier for one registration form field.
///
/// Declaration order is schema order; `Ord` follows it so ordered maps keyed
/// by field iterate the way the form is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    /// Full name of the person registering.
    Name,
    /// Contact email, also used as the sign-in identifier.
    Email,
    /// Account password.
    Password,
}

impl FieldName {
    /// Every field in schema order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Password];

    /// Wire key used in request bodies and error maps.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// Human label used when prompting for the field.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "E-mail",
            Self::Password => "Password",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values collected from the registration form for one submission.
///
/// ## Invariants
/// - Values are stored untrimmed; the schema decides what counts as empty.
/// - The password is zeroised on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use signup::domain::{FieldName, RegistrationInput};
///
/// let input = RegistrationInput::new("Ana", "ana@example.com", "secret");
/// assert_eq!(input.value(FieldName::Email), "ana@example.com");
/// assert!(!format!("{input:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl RegistrationInput {
    /// Capture the current field values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Name as typed.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email as typed.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Look up a value by field identifier.
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => self.name(),
            FieldName::Email => self.email(),
            FieldName::Password => self.password(),
        }
    }

    /// Return a copy with one field replaced.
    #[must_use]
    pub fn with_value(mut self, field: FieldName, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            FieldName::Name => self.name = value,
            FieldName::Email => self.email = value,
            FieldName::Password => self.password = Zeroizing::new(value),
        }
        self
    }
}

impl Default for RegistrationInput {
    fn default() -> Self {
        Self::new(String::new(), String::new(), String::new())
    }
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
