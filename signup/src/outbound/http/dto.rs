//! Wire shapes for the account-creation endpoint.

use serde::Serialize;

use crate::domain::RegistrationInput;

/// JSON body of `POST /users`.
#[derive(Debug, Serialize)]
pub(super) struct CreateAccountBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a RegistrationInput> for CreateAccountBody<'a> {
    fn from(input: &'a RegistrationInput) -> Self {
        Self {
            name: input.name(),
            email: input.email(),
            password: input.password(),
        }
    }
}
