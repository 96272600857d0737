//! Presentation-owned ordering of keyboard focus across form fields.
//!
//! A "next" action on a field moves focus to the following field; on the
//! last field it asks the presentation layer to submit the form. The form
//! controller never consults this type.

use thiserror::Error;

use super::FieldName;

/// What the presentation layer should do after a "next" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStep {
    /// Move focus to this field.
    Focus(FieldName),
    /// The chain is exhausted; submit the form.
    Submit,
}

/// Errors returned when constructing a [`FocusChain`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusChainError {
    /// The chain lists no fields.
    #[error("focus chain must contain at least one field")]
    Empty,
    /// A field appears more than once.
    #[error("focus chain lists {field} more than once")]
    Duplicate { field: FieldName },
}

/// Ordered sequence of fields visited by "next" actions.
///
/// ## Invariants
/// - Non-empty.
/// - Each field appears at most once.
///
/// # Examples
/// ```
/// use signup::domain::{FieldName, FocusChain, FocusStep};
///
/// let chain = FocusChain::default();
/// assert_eq!(chain.first(), FieldName::Name);
/// assert_eq!(chain.advance(FieldName::Name), FocusStep::Focus(FieldName::Email));
/// assert_eq!(chain.advance(FieldName::Password), FocusStep::Submit);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChain {
    fields: Vec<FieldName>,
}

impl FocusChain {
    /// Build a chain from an explicit field order.
    ///
    /// # Errors
    ///
    /// Returns [`FocusChainError`] when the order is empty or repeats a field.
    pub fn new(fields: Vec<FieldName>) -> Result<Self, FocusChainError> {
        if fields.is_empty() {
            return Err(FocusChainError::Empty);
        }
        for (index, field) in fields.iter().enumerate() {
            if fields.iter().skip(index + 1).any(|other| other == field) {
                return Err(FocusChainError::Duplicate { field: *field });
            }
        }
        Ok(Self { fields })
    }

    /// Field that receives focus when the form opens.
    pub fn first(&self) -> FieldName {
        // Non-empty by construction.
        self.fields.first().copied().unwrap_or(FieldName::Name)
    }

    /// Step to take after a "next" action on `current`.
    ///
    /// Fields outside the chain behave like the last field.
    pub fn advance(&self, current: FieldName) -> FocusStep {
        self.fields
            .iter()
            .position(|field| *field == current)
            .and_then(|index| self.fields.get(index + 1))
            .map_or(FocusStep::Submit, |next| FocusStep::Focus(*next))
    }

    /// Fields in focus order.
    pub fn fields(&self) -> &[FieldName] {
        self.fields.as_slice()
    }
}

impl Default for FocusChain {
    fn default() -> Self {
        Self {
            fields: FieldName::ALL.to_vec(),
        }
    }
}
