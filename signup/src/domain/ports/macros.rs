//! Helper macro for declaring port error enums.
//!
//! `define_port_error!` expands to a `thiserror` enum plus one snake-case
//! constructor per variant. Constructor parameters accept `impl Into<T>` so
//! call sites can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::{FieldName, Rule, ValidationError};

    define_port_error! {
        pub enum SamplePortError {
            Offline => "endpoint offline",
            Refused { message: String } => "refused: {message}",
            Status { status: u16, message: String } => "status {status}: {message}",
            Invalid { error: ValidationError } => "invalid: {error}",
        }
    }

    #[test]
    fn unit_variants_get_a_plain_constructor() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
        assert_eq!(SamplePortError::offline().to_string(), "endpoint offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::refused("no route");
        assert_eq!(err.to_string(), "refused: no route");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::status(503_u16, "busy");
        assert_eq!(err.to_string(), "status 503: busy");
    }

    #[test]
    fn domain_values_can_be_carried() {
        let err = SamplePortError::invalid(ValidationError::single(
            FieldName::Email,
            Rule::InvalidFormat,
        ));
        assert_eq!(err.to_string(), "invalid: email: InvalidFormat");
    }
}
