use core::fmt::Display;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// A structured value whose fields can be looked up by name.
///
/// [`group_by_field`] uses this to turn a field name into a bucket key.
/// Implement it for your own types to group them by field name.
///
/// [`group_by_field`]: crate::group::group_by_field
///
/// # Examples
///
/// ```
/// use flatline::group::{group_by_field, Record};
///
/// struct User {
///     name: &'static str,
///     state: &'static str,
/// }
///
/// impl Record for User {
///     fn field_key(&self, field: &str) -> Option<String> {
///         match field {
///             "name" => Some(self.name.to_string()),
///             "state" => Some(self.state.to_string()),
///             _ => None,
///         }
///     }
/// }
///
/// let users = vec![
///     User { name: "Greg", state: "NJ" },
///     User { name: "Julie", state: "NY" },
/// ];
/// let by_state = group_by_field(users, "state").unwrap();
/// assert_eq!(by_state.keys().collect::<Vec<_>>(), ["NJ", "NY"]);
/// ```
pub trait Record {
    /// Returns the stringified value of `field`, or `None` if the record has
    /// no such field.
    fn field_key(&self, field: &str) -> Option<String>;
}

/// Stringify a JSON value for use as a key: strings are used verbatim,
/// everything else as its JSON text.
pub(crate) fn json_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Record for Value {
    fn field_key(&self, field: &str) -> Option<String> {
        self.as_object()?.field_key(field)
    }
}

impl Record for Map<String, Value> {
    fn field_key(&self, field: &str) -> Option<String> {
        self.get(field).map(json_key)
    }
}

impl<V: Display, S: BuildHasher> Record for HashMap<String, V, S> {
    fn field_key(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }
}

impl<V: Display> Record for BTreeMap<String, V> {
    fn field_key(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_key(&self, field: &str) -> Option<String> {
        (**self).field_key(field)
    }
}
