//! Small collection utilities.
//!
//! - [`UniqueValueSet`]: a bidirectional map in which keys *and* values are
//!   unique, so either side can be used to look up the other.
//! - [`OptionalItemsExt`]: treats an absent collection as an empty one.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::errors::{Result, ToolbeltError};

const CONTAINER: &str = "UniqueValueSet";
const KEY: &str = "key";
const VALUE: &str = "value";

// ---------------------------------------------------------------------------
// UniqueValueSet
// ---------------------------------------------------------------------------

/// Bidirectional one-to-one map. Iterates in insertion order.
///
/// Errors name the container and which side of the pair was looked up; see
/// [`UniqueValueSet::labelled`].
#[derive(Debug, Clone)]
pub struct UniqueValueSet<K, V> {
    container: &'static str,
    key_label: &'static str,
    value_label: &'static str,
    entries: Vec<(K, V)>,
    by_key: HashMap<K, usize>,
    by_value: HashMap<V, usize>,
}

impl<K, V> UniqueValueSet<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Eq + Hash + Clone + Display,
{
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::labelled(CONTAINER, KEY, VALUE)
    }

    /// Creates an empty set whose errors report `container` and call the two
    /// sides of a pair `key_label` and `value_label`.
    pub fn labelled(
        container: &'static str,
        key_label: &'static str,
        value_label: &'static str,
    ) -> Self {
        Self {
            container,
            key_label,
            value_label,
            entries: Vec::new(),
            by_key: HashMap::new(),
            by_value: HashMap::new(),
        }
    }

    /// Adds a `key` ↔ `value` pair.
    ///
    /// Fails with [`ToolbeltError::Duplicate`] if either side is already
    /// present; the set is left unchanged in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.by_key.contains_key(&key) {
            return Err(ToolbeltError::duplicate(self.container, self.key_label, &key));
        }
        if self.by_value.contains_key(&value) {
            return Err(ToolbeltError::duplicate(self.container, self.value_label, &value));
        }

        let position = self.entries.len();
        self.by_key.insert(key.clone(), position);
        self.by_value.insert(value.clone(), position);
        self.entries.push((key, value));
        Ok(())
    }

    /// Returns the value paired with `key`.
    pub fn value_for<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.by_key
            .get(key)
            .map(|&i| &self.entries[i].1)
            .ok_or_else(|| ToolbeltError::not_found(self.container, self.key_label, key))
    }

    /// Returns the key paired with `value`.
    pub fn key_for<Q>(&self, value: &Q) -> Result<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.by_value
            .get(value)
            .map(|&i| &self.entries[i].0)
            .ok_or_else(|| ToolbeltError::not_found(self.container, self.value_label, value))
    }

    /// Insertion position of the pair whose key is `key`.
    pub(crate) fn position_of_key<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_key.get(key).copied()
    }

    /// Insertion position of the pair whose value is `value`.
    pub(crate) fn position_of_value<Q>(&self, value: &Q) -> Option<usize>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_value.get(value).copied()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for UniqueValueSet<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Eq + Hash + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Optional collections
// ---------------------------------------------------------------------------

/// Helpers for collections that may be absent altogether.
pub trait OptionalItemsExt<I: IntoIterator> {
    /// Iterates the items, or nothing when the collection is absent.
    fn or_empty(self) -> std::iter::Flatten<std::option::IntoIter<I>>;

    /// Returns `true` when the collection is absent or yields no items.
    fn is_none_or_empty(self) -> bool;
}

impl<I: IntoIterator> OptionalItemsExt<I> for Option<I> {
    fn or_empty(self) -> std::iter::Flatten<std::option::IntoIter<I>> {
        self.into_iter().flatten()
    }

    fn is_none_or_empty(self) -> bool {
        self.or_empty().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_work_in_both_directions() {
        let mut set: UniqueValueSet<i32, &str> = UniqueValueSet::new();
        set.insert(1, "one").unwrap();
        set.insert(2, "two").unwrap();

        assert_eq!(set.value_for(&2_i32), Ok(&"two"));
        assert_eq!(set.key_for("one"), Ok(&1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_key_or_value_is_rejected_without_side_effects() {
        let mut set: UniqueValueSet<i32, &str> = UniqueValueSet::new();
        set.insert(1, "one").unwrap();

        assert!(matches!(
            set.insert(1, "uno"),
            Err(ToolbeltError::Duplicate { ref lookup, .. }) if lookup == "key"
        ));
        assert!(matches!(
            set.insert(3, "one"),
            Err(ToolbeltError::Duplicate { ref lookup, .. }) if lookup == "value"
        ));
        assert_eq!(set.len(), 1);
        assert!(set.key_for("uno").is_err());
    }

    #[test]
    fn missing_lookup_is_not_found() {
        let set: UniqueValueSet<u8, String> = UniqueValueSet::default();
        assert!(set.is_empty());
        assert!(matches!(
            set.value_for(&7_u8),
            Err(ToolbeltError::NotFound { .. })
        ));
    }

    #[test]
    fn labelled_sets_name_their_container_in_errors() {
        let mut set: UniqueValueSet<u8, &str> =
            UniqueValueSet::labelled("Grades", "score", "grade");
        set.insert(90, "A").unwrap();

        assert_eq!(
            set.insert(80, "A"),
            Err(ToolbeltError::Duplicate {
                container: "Grades".into(),
                lookup: "grade".into(),
                key: "A".into(),
            })
        );
        assert!(matches!(
            set.value_for(&70_u8),
            Err(ToolbeltError::NotFound { ref container, ref lookup, .. })
                if container == "Grades" && lookup == "score"
        ));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut set: UniqueValueSet<i32, &str> = UniqueValueSet::new();
        for (k, v) in [(30, "c"), (10, "a"), (20, "b")] {
            set.insert(k, v).unwrap();
        }
        let keys: Vec<_> = set.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![30, 10, 20]);
    }

    #[test]
    fn absent_collections_behave_as_empty() {
        let absent: Option<Vec<u8>> = None;
        assert!(absent.clone().is_none_or_empty());
        assert_eq!(absent.or_empty().count(), 0);

        assert!(Some(Vec::<u8>::new()).is_none_or_empty());
        assert!(!Some(vec![1]).is_none_or_empty());
        assert_eq!(Some(vec![1, 2]).or_empty().sum::<u8>(), 3);
    }
}
