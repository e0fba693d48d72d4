use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::ValidationError;

/// The keyword arguments of a single call.
///
/// `Arguments` is an insertion-ordered map from argument names to JSON values.
/// It is deliberately untyped: any key and any value can be stored, and the
/// operation schema decides what is acceptable when the call is made.
///
/// # Example
///
/// ```rust
/// use shub_jobs::Arguments;
/// use serde_json::json;
///
/// let args = Arguments::new()
///     .arg("project", 1)
///     .arg("job", vec!["1/1/1", "1/1/2"]);
/// assert_eq!(args.get("project"), Some(&json!(1)));
///
/// let same = Arguments::try_from(json!({"project": 1, "job": ["1/1/1", "1/1/2"]}))?;
/// assert_eq!(args, same);
/// # Ok::<(), shub_jobs::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(IndexMap<String, Value>);

impl Arguments {
    /// Creates an empty argument bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, replacing any previous value for the same key.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an argument, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes an argument, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the value of an argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the argument is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over argument names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no argument is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for Arguments {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            value => Err(ValidationError::NotAnObject { value }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
