//! Mapping from schema failures to per-field inline messages.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::{FieldName, Rule, ValidationError};

/// Source of human-readable text for a `(field, rule)` pair.
///
/// Text is opaque to the form logic; localisation lives behind this trait.
pub trait MessageCatalogue: Send + Sync {
    /// Message shown next to `field` when it breaks `rule`.
    fn message(&self, field: FieldName, rule: Rule) -> String;
}

/// Catalogue that renders the rule name, e.g. `Required`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleNameCatalogue;

impl MessageCatalogue for RuleNameCatalogue {
    fn message(&self, _field: FieldName, rule: Rule) -> String {
        rule.as_str().to_owned()
    }
}

/// Catalogue with per-field texts, falling back to the rule name.
///
/// # Examples
/// ```
/// use signup::domain::{FieldMessageCatalogue, FieldName, MessageCatalogue, Rule};
///
/// let catalogue = FieldMessageCatalogue::default()
///     .with_message(FieldName::Email, Rule::InvalidFormat, "Enter a valid e-mail");
/// assert_eq!(
///     catalogue.message(FieldName::Email, Rule::InvalidFormat),
///     "Enter a valid e-mail"
/// );
/// assert_eq!(catalogue.message(FieldName::Name, Rule::Required), "Required");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMessageCatalogue {
    messages: BTreeMap<(FieldName, Rule), String>,
}

impl FieldMessageCatalogue {
    /// Register the text for one `(field, rule)` pair.
    #[must_use]
    pub fn with_message(mut self, field: FieldName, rule: Rule, text: impl Into<String>) -> Self {
        self.messages.insert((field, rule), text.into());
        self
    }
}

impl MessageCatalogue for FieldMessageCatalogue {
    fn message(&self, field: FieldName, rule: Rule) -> String {
        self.messages
            .get(&(field, rule))
            .cloned()
            .unwrap_or_else(|| RuleNameCatalogue.message(field, rule))
    }
}

/// Inline error messages keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorMap {
    errors: BTreeMap<FieldName, String>,
}

impl FieldErrorMap {
    /// Message for `field`, if it has one.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether `field` has a message.
    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    /// Whether no field has a message.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fields with messages, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.keys().copied()
    }

    /// `(field, message)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Converts a [`ValidationError`] into a [`FieldErrorMap`].
///
/// Pure: the same error always yields the same map. When a field carries
/// several violations only the first one reported is kept.
#[derive(Debug, Clone, Default)]
pub struct ErrorMapper<C = RuleNameCatalogue> {
    catalogue: C,
}

impl<C: MessageCatalogue> ErrorMapper<C> {
    /// Build a mapper that draws text from `catalogue`.
    pub const fn new(catalogue: C) -> Self {
        Self { catalogue }
    }

    /// Produce one message per failing field.
    pub fn to_field_errors(&self, error: &ValidationError) -> FieldErrorMap {
        let mut errors = BTreeMap::new();
        for violation in error.violations() {
            if let Entry::Vacant(slot) = errors.entry(violation.field) {
                slot.insert(self.catalogue.message(violation.field, violation.rule));
            }
        }
        FieldErrorMap { errors }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Violation;
    use rstest::rstest;

    fn mapper() -> ErrorMapper {
        ErrorMapper::default()
    }

    fn error(violations: &[(FieldName, Rule)]) -> ValidationError {
        ValidationError::from_violations(
            violations
                .iter()
                .map(|(field, rule)| Violation::new(*field, *rule))
                .collect(),
        )
        .expect("at least one violation")
    }

    #[rstest]
    #[case(&[(FieldName::Name, Rule::Required)], &[(FieldName::Name, "Required")])]
    #[case(&[(FieldName::Email, Rule::InvalidFormat)], &[(FieldName::Email, "InvalidFormat")])]
    #[case(
        &[(FieldName::Password, Rule::Required), (FieldName::Name, Rule::Required)],
        &[(FieldName::Name, "Required"), (FieldName::Password, "Required")]
    )]
    fn rule_names_are_the_default_messages(
        #[case] violations: &[(FieldName, Rule)],
        #[case] expected: &[(FieldName, &str)],
    ) {
        let map = mapper().to_field_errors(&error(violations));
        assert_eq!(map.iter().collect::<Vec<_>>(), expected.to_vec());
    }

    #[test]
    fn first_violation_per_field_wins() {
        let map = mapper().to_field_errors(&error(&[
            (FieldName::Email, Rule::Required),
            (FieldName::Email, Rule::InvalidFormat),
        ]));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(FieldName::Email), Some("Required"));
    }

    #[test]
    fn mapping_is_repeatable() {
        let mapper = mapper();
        let failure = error(&[
            (FieldName::Name, Rule::Required),
            (FieldName::Email, Rule::InvalidFormat),
        ]);
        assert_eq!(
            mapper.to_field_errors(&failure),
            mapper.to_field_errors(&failure)
        );
    }

    #[test]
    fn custom_catalogue_supplies_field_text() {
        let catalogue = FieldMessageCatalogue::default()
            .with_message(FieldName::Name, Rule::Required, "Name is required")
            .with_message(FieldName::Email, Rule::InvalidFormat, "Enter a valid e-mail");
        let map = ErrorMapper::new(catalogue).to_field_errors(&error(&[
            (FieldName::Name, Rule::Required),
            (FieldName::Email, Rule::InvalidFormat),
            (FieldName::Password, Rule::Required),
        ]));

        assert_eq!(map.get(FieldName::Name), Some("Name is required"));
        assert_eq!(map.get(FieldName::Email), Some("Enter a valid e-mail"));
        assert_eq!(map.get(FieldName::Password), Some("Required"));
    }

    #[test]
    fn default_map_is_empty() {
        let map = FieldErrorMap::default();
        assert!(map.is_empty());
        assert!(!map.contains(FieldName::Name));
        assert_eq!(map.fields().count(), 0);
    }
}
