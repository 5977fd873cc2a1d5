//! Bidirectional one-to-one map
//!
//! Keeps a key-to-value and a value-to-key hash map in lockstep, so lookups,
//! membership tests, and removals are O(1) from either side. Purely
//! bookkeeping; both sides must stay one-to-one, which `insert` enforces by
//! rejecting a duplicate in either direction before touching anything.

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Error type for [`BiMap::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiMapError {
    /// The key is already mapped to some value
    DuplicateKey,
    /// The value is already mapped to some key
    DuplicateValue,
}

impl fmt::Display for BiMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiMapError::DuplicateKey => write!(f, "key is already present"),
            BiMapError::DuplicateValue => write!(f, "value is already present"),
        }
    }
}

impl std::error::Error for BiMapError {}

/// Two synchronized one-to-one mappings
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert("a", 1).unwrap();
/// map.insert("b", 2).unwrap();
///
/// assert_eq!(map.get_by_key(&"a"), Some(&1));
/// assert_eq!(map.get_by_value(&2), Some(&"b"));
/// assert!(map.insert("a", 3).is_err());
/// ```
pub struct BiMap<K, V> {
    forward: FxHashMap<K, V>,
    reverse: FxHashMap<V, K>,
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            forward: FxHashMap::default(),
            reverse: FxHashMap::default(),
        }
    }

    /// Number of pairs in the map; a pair counts once, not once per side
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if the map contains no pairs
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Adds a key/value pair to both sides
    ///
    /// # Errors
    /// [`BiMapError::DuplicateKey`] or [`BiMapError::DuplicateValue`] when
    /// either side already contains the respective entry; neither side is
    /// modified on the error path.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), BiMapError> {
        if self.forward.contains_key(&key) {
            return Err(BiMapError::DuplicateKey);
        }
        if self.reverse.contains_key(&value) {
            return Err(BiMapError::DuplicateValue);
        }
        self.reverse.insert(value.clone(), key.clone());
        self.forward.insert(key, value);
        Ok(())
    }

    /// Removes the pair named by its key from both sides
    ///
    /// Returns whether a pair was removed.
    pub fn remove_key(&mut self, key: &K) -> bool {
        match self.forward.remove(key) {
            Some(value) => self.reverse.remove(&value).is_some(),
            None => false,
        }
    }

    /// Removes the pair named by its value from both sides
    ///
    /// Returns whether a pair was removed.
    pub fn remove_value(&mut self, value: &V) -> bool {
        match self.reverse.remove(value) {
            Some(key) => self.forward.remove(&key).is_some(),
            None => false,
        }
    }

    /// Returns true if the key side contains `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Returns true if the value side contains `value`
    pub fn contains_value(&self, value: &V) -> bool {
        self.reverse.contains_key(value)
    }

    /// Looks up the value mapped to a key
    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Looks up the key mapped to a value
    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    /// Removes every pair from both sides
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Iterates the key-to-value view
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }

    /// Iterates the value-to-key view
    pub fn iter_reverse(&self) -> impl Iterator<Item = (&V, &K)> {
        self.reverse.iter()
    }
}

impl<K, V> Default for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
