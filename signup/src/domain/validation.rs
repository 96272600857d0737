//! Declarative validation schema for the registration form.
//!
//! The schema is a static table of field rules. Every field is evaluated on
//! each call so one submission reports the complete invalid set; within a
//! field, evaluation stops at the first failing constraint.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::{FieldName, RegistrationInput};

/// Rule a field value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    /// Value was missing or blank.
    Required,
    /// Value was present but not in the expected shape.
    InvalidFormat,
}

impl Rule {
    /// Stable rule name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::InvalidFormat => "InvalidFormat",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(field, rule)` pair reported by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    /// Field that failed.
    pub field: FieldName,
    /// Rule the field failed.
    pub rule: Rule,
}

impl Violation {
    /// Pair a field with the rule it violated.
    pub const fn new(field: FieldName, rule: Rule) -> Self {
        Self { field, rule }
    }
}

/// Validation failure carrying every violated rule in schema order.
///
/// ## Invariants
/// - Holds at least one violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Build an error from collected violations, or `None` when there are none.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// Error for a single violated rule.
    pub fn single(field: FieldName, rule: Rule) -> Self {
        Self {
            violations: vec![Violation::new(field, rule)],
        }
    }

    /// Violations in the order they were reported.
    pub fn violations(&self) -> &[Violation] {
        self.violations.as_slice()
    }

    /// Fields that failed, in report order, possibly repeated.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.violations.iter().map(|violation| violation.field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", violation.field, violation.rule)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Constraint attached to a field in the schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    /// Non-empty once surrounding whitespace is ignored.
    NonBlank,
    /// Non-empty, whitespace counts as content.
    NonEmpty,
    /// `local@domain.tld` shape.
    Email,
}

impl Constraint {
    fn check(self, value: &str) -> Result<(), Rule> {
        match self {
            Self::NonBlank if value.trim().is_empty() => Err(Rule::Required),
            Self::NonEmpty if value.is_empty() => Err(Rule::Required),
            Self::Email if !email_regex().is_match(value) => Err(Rule::InvalidFormat),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: FieldName,
    constraints: &'static [Constraint],
}

const REGISTRATION_RULES: [FieldRule; 3] = [
    FieldRule {
        field: FieldName::Name,
        constraints: &[Constraint::NonBlank],
    },
    FieldRule {
        field: FieldName::Email,
        constraints: &[Constraint::NonBlank, Constraint::Email],
    },
    FieldRule {
        field: FieldName::Password,
        constraints: &[Constraint::NonEmpty],
    },
];

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dotted domain with non-empty labels.
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Field rules for the registration form.
///
/// - `name`: required (blank counts as missing).
/// - `email`: required, then must look like `local@domain.tld`.
/// - `password`: required. No length or complexity rule.
///
/// # Examples
/// ```
/// use signup::domain::{FieldName, RegistrationInput, Rule, ValidationSchema};
///
/// let schema = ValidationSchema::registration();
/// let err = schema
///     .validate(&RegistrationInput::new("", "not-an-email", "x"))
///     .unwrap_err();
/// let fields: Vec<_> = err.violations().iter().map(|v| (v.field, v.rule)).collect();
/// assert_eq!(
///     fields,
///     vec![(FieldName::Name, Rule::Required), (FieldName::Email, Rule::InvalidFormat)]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValidationSchema {
    rules: &'static [FieldRule],
}

impl ValidationSchema {
    /// The registration schema.
    pub const fn registration() -> Self {
        Self {
            rules: &REGISTRATION_RULES,
        }
    }

    /// Fields covered by the schema, in evaluation order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.rules.iter().map(|rule| rule.field)
    }

    /// Check every field and report all violations at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing each failing field with the first
    /// rule it broke.
    pub fn validate(&self, input: &RegistrationInput) -> Result<(), ValidationError> {
        let violations = self
            .rules
            .iter()
            .filter_map(|rule| {
                let value = input.value(rule.field);
                rule.constraints
                    .iter()
                    .find_map(|constraint| constraint.check(value).err())
                    .map(|failed| Violation::new(rule.field, failed))
            })
            .collect();

        match ValidationError::from_violations(violations) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self::registration()
    }
}
