//! Static argument schemas and the pre-flight validator.
//!
//! Every operation of the jobs API declares the arguments it accepts in an
//! [`OperationSchema`]: a `static` table of [`Field`]s, each with a
//! [`Presence`] and a [`Shape`]. Validation runs against these tables before
//! any request is built:
//!
//! 1. every key of the [`Arguments`] bag must be declared by the schema,
//! 2. every required field must be present,
//! 3. every present value must match its field shape and domain.
//!
//! The first violation is reported as a [`ValidationError`].
//!
//! ```rust
//! use shub_jobs::{Arguments, Operation, ValidationError};
//!
//! let args = Arguments::new().arg("project", 1).arg("priority", 7);
//! let error = Operation::Schedule.schema().validate(&args).unwrap_err();
//! assert!(matches!(error, ValidationError::MissingArgument { key: "spider", .. }));
//! ```

use std::fmt;

use serde_json::Value;

mod arguments;
pub use self::arguments::Arguments;

mod error;
pub use self::error::ValidationError;

mod operation;
pub use self::operation::Operation;

/// Whether a field must be present in the argument bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// The call is rejected when the field is absent.
    Required,
    /// The field may be omitted.
    Optional,
}

/// The accepted shape (and value domain) of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// An integer greater than or equal to zero.
    Natural,
    /// A string.
    Text,
    /// A string taken from a fixed set of values.
    OneOf(&'static [&'static str]),
    /// A string, or a list whose every element is a string.
    TextOrList,
    /// An integer within the inclusive range `min..=max`.
    BoundedInteger {
        /// Lowest accepted value.
        min: u64,
        /// Highest accepted value.
        max: u64,
    },
    /// An object whose every value is a string.
    TextMap,
}

/// Why a value does not fit a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mismatch {
    Shape,
    Domain,
}

impl Shape {
    fn check(self, value: &Value) -> Result<(), Mismatch> {
        match self {
            Self::Natural => value.as_u64().map(|_| ()).ok_or(Mismatch::Shape),
            Self::Text => value.is_string().then_some(()).ok_or(Mismatch::Shape),
            Self::OneOf(members) => {
                let text = value.as_str().ok_or(Mismatch::Shape)?;
                members
                    .iter()
                    .any(|member| *member == text)
                    .then_some(())
                    .ok_or(Mismatch::Domain)
            }
            Self::TextOrList => match value {
                Value::String(_) => Ok(()),
                Value::Array(items) if items.iter().all(Value::is_string) => Ok(()),
                _ => Err(Mismatch::Shape),
            },
            Self::BoundedInteger { min, max } => match value.as_u64() {
                Some(number) if (min..=max).contains(&number) => Ok(()),
                Some(_) => Err(Mismatch::Domain),
                // negative integers are still integers
                None if value.is_i64() => Err(Mismatch::Domain),
                None => Err(Mismatch::Shape),
            },
            Self::TextMap => match value {
                Value::Object(entries) if entries.values().all(Value::is_string) => Ok(()),
                _ => Err(Mismatch::Shape),
            },
        }
    }

    /// Returns `true` if the value matches both the shape and its domain.
    pub fn accepts(self, value: &Value) -> bool {
        self.check(value).is_ok()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural => write!(f, "a natural number"),
            Self::Text => write!(f, "a string"),
            Self::OneOf(members) => write!(f, "one of [{}]", members.join(", ")),
            Self::TextOrList => write!(f, "a string or a list of strings"),
            Self::BoundedInteger { min, max } => write!(f, "an integer in {min}..={max}"),
            Self::TextMap => write!(f, "a map of strings to strings"),
        }
    }
}

/// A declared argument: name, presence and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// The argument name, as sent on the wire.
    pub name: &'static str,
    /// Whether the argument is required.
    pub presence: Presence,
    /// The accepted shape.
    pub shape: Shape,
}

impl Field {
    /// Declares a required field.
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            presence: Presence::Required,
            shape,
        }
    }

    /// Declares an optional field.
    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            shape,
        }
    }

    /// Returns `true` for required fields.
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// The static argument contract of one [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSchema {
    operation: Operation,
    fields: &'static [Field],
}

impl OperationSchema {
    pub(crate) const fn new(operation: Operation, fields: &'static [Field]) -> Self {
        Self { operation, fields }
    }

    /// The operation this schema belongs to.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// All declared fields, in declaration order.
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Iterates over the required fields.
    pub fn required(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter().filter(|field| field.is_required())
    }

    /// Validates an argument bag against this schema.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, checking unknown keys first, then
    /// missing required fields, then each present value in declaration order.
    pub fn validate(&self, args: &Arguments) -> Result<(), ValidationError> {
        let operation = self.operation;

        if let Some(key) = args.keys().find(|key| self.field(key).is_none()) {
            return Err(ValidationError::UnknownArgument {
                operation,
                key: key.to_string(),
            });
        }

        if let Some(field) = self.required().find(|field| !args.contains(field.name)) {
            return Err(ValidationError::MissingArgument {
                operation,
                key: field.name,
            });
        }

        for field in self.fields {
            let Some(value) = args.get(field.name) else {
                continue;
            };
            field.shape.check(value).map_err(|mismatch| match mismatch {
                Mismatch::Shape => ValidationError::InvalidArgument {
                    operation,
                    key: field.name,
                    expected: field.shape,
                    value: value.clone(),
                },
                Mismatch::Domain => ValidationError::OutOfDomain {
                    operation,
                    key: field.name,
                    expected: field.shape,
                    value: value.clone(),
                },
            })?;
        }

        Ok(())
    }
}
