//! Partition a collection into ordered buckets.
//!
//! Every function here walks the collection once, in order. A bucket is
//! created the first time its key is produced, so bucket order is the order
//! in which keys first occur, and each bucket holds its elements in input
//! order. No element is dropped or duplicated.
//!
//! | Name               | Key comes from                 | On failure |
//! | ---                | ---                            | ---        |
//! | [`group_by`]       | `FnMut(&T) -> K`               | panics unwind |
//! | [`try_group_by`]   | `FnMut(&T) -> Result<K, E>`    | first `Err`, no partial map |
//! | [`group_by_field`] | a named field of a [`Record`]  | [`FieldError`], no partial map |
//!
//! # Examples
//!
//! ```
//! use flatline::group::group_by;
//!
//! let staff = ["Liz", "Ceren", "Shanna", "Charlotte"];
//! let by_initial = group_by(staff, |name| name.chars().next());
//!
//! assert_eq!(by_initial[&Some('C')], ["Ceren", "Charlotte"]);
//! assert_eq!(by_initial[&Some('L')], ["Liz"]);
//! assert_eq!(by_initial[&Some('S')], ["Shanna"]);
//! ```

use core::hash::Hash;

mod buckets;
mod record;

pub use buckets::Buckets;
pub use record::Record;

/// An error returned by [`group_by_field`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// An element did not have the requested field.
    #[error("element {index} has no field `{field}`")]
    Missing {
        /// Position of the element in the input collection.
        index: usize,
        /// The requested field name.
        field: String,
    },
}

/// Group elements by the key `selector` returns for each of them.
///
/// The set of buckets is exactly the set of distinct keys returned, in
/// first-occurrence order.
pub fn group_by<I, K, F>(collection: I, mut selector: F) -> Buckets<K, I::Item>
where
    I: IntoIterator,
    K: Hash + Eq + Clone,
    F: FnMut(&I::Item) -> K,
{
    let mut buckets = Buckets::new();
    for element in collection {
        let key = selector(&element);
        buckets.push(key, element);
    }
    buckets
}

/// Group elements by a fallible key selector.
///
/// If `selector` fails for any element the whole call fails with that error
/// and no partially built map is returned. Elements after the failing one are
/// not visited.
///
/// # Examples
///
/// ```
/// use flatline::group::try_group_by;
///
/// let ok = try_group_by(["1", "22", "3"], |s| s.parse::<u32>().map(|n| n > 9));
/// assert_eq!(ok.unwrap()[&false], ["1", "3"]);
///
/// let err = try_group_by(["1", "x"], |s| s.parse::<u32>());
/// assert!(err.is_err());
/// ```
pub fn try_group_by<I, K, E, F>(collection: I, mut selector: F) -> Result<Buckets<K, I::Item>, E>
where
    I: IntoIterator,
    K: Hash + Eq + Clone,
    F: FnMut(&I::Item) -> Result<K, E>,
{
    let mut buckets = Buckets::new();
    for element in collection {
        let key = selector(&element)?;
        buckets.push(key, element);
    }
    Ok(buckets)
}

/// Group records by the stringified value of one of their fields.
///
/// String fields are used verbatim. Other JSON values use their JSON text, so
/// `12` becomes `"12"` and `null` becomes `"null"`.
///
/// # Examples
///
/// ```
/// use flatline::group::group_by_field;
/// use serde_json::json;
///
/// let users = vec![
///     json!({ "name": "Greg", "state": "NJ" }),
///     json!({ "name": "Julie", "state": "NY" }),
///     json!({ "name": "Bobby", "state": "NJ" }),
/// ];
///
/// let by_state = group_by_field(users, "state").unwrap();
/// assert_eq!(by_state.keys().collect::<Vec<_>>(), ["NJ", "NY"]);
/// assert_eq!(by_state["NJ"].len(), 2);
/// ```
pub fn group_by_field<I>(collection: I, field: &str) -> Result<Buckets<String, I::Item>, FieldError>
where
    I: IntoIterator,
    I::Item: Record,
{
    let mut index = 0;
    try_group_by(collection, |element| {
        let key = element.field_key(field).ok_or_else(|| FieldError::Missing {
            index,
            field: field.to_owned(),
        });
        index += 1;
        key
    })
}
