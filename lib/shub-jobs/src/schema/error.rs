use serde_json::Value;

use super::{Operation, Shape};

/// Local, pre-flight validation failures.
///
/// These errors depend only on the caller's arguments and the static operation
/// schemas. They are returned before any request is built, so a
/// `ValidationError` always means that no network call happened.
#[derive(Debug, Clone, PartialEq, derive_more::Error, derive_more::Display)]
pub enum ValidationError {
    /// The argument bag contains a key the operation does not declare.
    #[display("{operation}: unknown argument '{key}'")]
    UnknownArgument {
        /// The operation being validated.
        operation: Operation,
        /// The undeclared key.
        key: String,
    },

    /// A required argument is absent.
    #[display("{operation}: missing required argument '{key}'")]
    MissingArgument {
        /// The operation being validated.
        operation: Operation,
        /// The name of the missing argument.
        key: &'static str,
    },

    /// An argument value does not have the declared shape.
    #[display("{operation}: argument '{key}' must be {expected}, got {value}")]
    InvalidArgument {
        /// The operation being validated.
        operation: Operation,
        /// The offending argument.
        key: &'static str,
        /// The shape declared by the schema.
        expected: Shape,
        /// The value that was provided.
        value: Value,
    },

    /// An argument value has the right shape but lies outside its domain.
    #[display("{operation}: argument '{key}' is out of range, expected {expected}, got {value}")]
    OutOfDomain {
        /// The operation being validated.
        operation: Operation,
        /// The offending argument.
        key: &'static str,
        /// The shape (and domain) declared by the schema.
        expected: Shape,
        /// The value that was provided.
        value: Value,
    },

    /// Arguments were built from a JSON value that is not an object.
    #[display("arguments must be a JSON object, got {value}")]
    NotAnObject {
        /// The rejected value.
        value: Value,
    },

    /// No API key was provided when building a client.
    #[display("api_key is required")]
    MissingApiKey,

    /// The API key is an empty string.
    #[display("api_key must be a non-empty string")]
    EmptyApiKey,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validation_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ValidationError>();
        assert_sync::<ValidationError>();
    }

    #[test]
    fn test_display_messages() {
        let unknown = ValidationError::UnknownArgument {
            operation: Operation::List,
            key: "foo".to_string(),
        };
        insta::assert_snapshot!(unknown, @"list: unknown argument 'foo'");

        let missing = ValidationError::MissingArgument {
            operation: Operation::Schedule,
            key: "spider",
        };
        insta::assert_snapshot!(missing, @"schedule: missing required argument 'spider'");

        let invalid = ValidationError::InvalidArgument {
            operation: Operation::Delete,
            key: "project",
            expected: Shape::Natural,
            value: json!(-1),
        };
        insta::assert_snapshot!(invalid, @"delete: argument 'project' must be a natural number, got -1");

        let out_of_domain = ValidationError::OutOfDomain {
            operation: Operation::Schedule,
            key: "priority",
            expected: Shape::BoundedInteger { min: 0, max: 4 },
            value: json!(5),
        };
        insta::assert_snapshot!(out_of_domain, @"schedule: argument 'priority' is out of range, expected an integer in 0..=4, got 5");
    }
}
