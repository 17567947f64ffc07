use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::ops::Index;
use std::collections::HashMap;

/// An insertion-ordered map from key to the elements which produced it.
///
/// Keys iterate in the order they were first seen. Within a bucket elements
/// keep the order they were inserted in.
///
/// This `struct` is created by [`group_by`], [`try_group_by`], and
/// [`group_by_field`]. See their documentation for more.
///
/// [`group_by`]: crate::group::group_by
/// [`try_group_by`]: crate::group::try_group_by
/// [`group_by_field`]: crate::group::group_by_field
#[derive(Clone)]
pub struct Buckets<K, T> {
    /// Position of each key in `buckets`.
    index: HashMap<K, usize>,
    buckets: Vec<(K, Vec<T>)>,
}

impl<K, T> Buckets<K, T> {
    /// Create an empty `Buckets`.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if no element has been grouped.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of grouped elements across every bucket.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, bucket)| bucket.len()).sum()
    }

    /// Iterate over the keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.iter().map(|(key, _)| key)
    }

    /// Iterate over the buckets in first-occurrence order of their keys.
    pub fn values(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.buckets.iter().map(|(_, bucket)| bucket.as_slice())
    }

    /// Iterate over `(key, bucket)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> + '_ {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key, bucket.as_slice()))
    }

    /// Consume the map, returning the `(key, bucket)` pairs in order.
    pub fn into_vec(self) -> Vec<(K, Vec<T>)> {
        self.buckets
    }
}

impl<K: Hash + Eq, T> Buckets<K, T> {
    /// Returns the bucket for `key`, if any element produced it.
    pub fn get<Q>(&self, key: &Q) -> Option<&[T]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(key)?;
        Some(self.buckets[position].1.as_slice())
    }

    /// Returns `true` if some element produced `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone, T> Buckets<K, T> {
    /// Append `element` to the bucket for `key`, creating the bucket at the
    /// end if it does not exist yet.
    pub(crate) fn push(&mut self, key: K, element: T) {
        match self.index.get(&key) {
            Some(&position) => self.buckets[position].1.push(element),
            None => {
                self.index.insert(key.clone(), self.buckets.len());
                self.buckets.push((key, vec![element]));
            }
        }
    }
}

impl<K, T> Default for Buckets<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Buckets<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold the same buckets in the same order.
impl<K: PartialEq, T: PartialEq> PartialEq for Buckets<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.buckets == other.buckets
    }
}

impl<K: Eq, T: Eq> Eq for Buckets<K, T> {}

impl<K, T, Q> Index<&Q> for Buckets<K, T>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = [T];

    /// # Panics
    ///
    /// Panics if no element produced `key`.
    fn index(&self, key: &Q) -> &[T] {
        self.get(key).expect("no bucket for key")
    }
}

impl<K, T> IntoIterator for Buckets<K, T> {
    type Item = (K, Vec<T>);
    type IntoIter = std::vec::IntoIter<(K, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a, K, T> IntoIterator for &'a Buckets<K, T> {
    type Item = (&'a K, &'a [T]);
    type IntoIter = Box<dyn Iterator<Item = (&'a K, &'a [T])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
