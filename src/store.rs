//! In-memory, non-durable record stores.
//!
//! [`Store`] is the one storage interface. Two backends implement it, and the
//! caller picks the addressing scheme by picking the backend:
//!
//! | Backend | Container | Key |
//! |---|---|---|
//! | [`KeyedStore`] | `BTreeMap<i64, T>` | caller-visible id, insert assigns `max + 1` (lowest free positive key past `i64::MAX`) |
//! | [`OrderedStore`] | `Vec<T>` | position; negative or out-of-range addresses nothing |
//!
//! Each operation takes the lock for its own duration only. Two requests that
//! update the same key race and the last write wins; nothing here provides
//! isolation across operations.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Insert / get / update / delete / list over cloned values.
pub trait Store<T>: Send + Sync {
    type Key;

    /// Adds `value` and returns the key it is now addressed by.
    fn insert(&self, value: T) -> Self::Key;

    fn get(&self, key: &Self::Key) -> Option<T>;

    /// Overwrites an existing entry and returns the stored value.
    /// Returns `None`, storing nothing, when `key` is absent.
    fn update(&self, key: &Self::Key, value: T) -> Option<T>;

    /// Removes and returns the entry at `key`.
    fn delete(&self, key: &Self::Key) -> Option<T>;

    /// Every value, in key order.
    fn list(&self) -> Vec<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A panicking writer cannot leave a half-built value behind: every mutation
// is a single insert/remove call on the container.
fn read<C>(lock: &RwLock<C>) -> RwLockReadGuard<'_, C> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<C>(lock: &RwLock<C>) -> RwLockWriteGuard<'_, C> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// ── KeyedStore ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct KeyedStore<T> {
    entries: RwLock<BTreeMap<i64, T>>,
}

impl<T> KeyedStore<T> {
    pub fn new() -> Self {
        Self { entries: RwLock::new(BTreeMap::new()) }
    }

    pub fn contains(&self, key: i64) -> bool {
        read(&self.entries).contains_key(&key)
    }
}

impl<T> FromIterator<(i64, T)> for KeyedStore<T> {
    fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
        Self { entries: RwLock::new(iter.into_iter().collect()) }
    }
}

/// Smallest positive key not in use. Only reached once `i64::MAX` is taken.
fn first_free_key<T>(entries: &BTreeMap<i64, T>) -> i64 {
    let mut candidate = 1;
    for &key in entries.range(1..).map(|(k, _)| k) {
        if key != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

impl<T: Clone + Send + Sync> Store<T> for KeyedStore<T> {
    type Key = i64;

    fn insert(&self, value: T) -> i64 {
        let mut entries = write(&self.entries);
        let key = match entries.keys().next_back() {
            None => 1,
            Some(last) => last.checked_add(1).unwrap_or_else(|| first_free_key(&entries)),
        };
        entries.insert(key, value);
        key
    }

    fn get(&self, key: &i64) -> Option<T> {
        read(&self.entries).get(key).cloned()
    }

    fn update(&self, key: &i64, value: T) -> Option<T> {
        let mut entries = write(&self.entries);
        let slot = entries.get_mut(key)?;
        *slot = value;
        Some(slot.clone())
    }

    fn delete(&self, key: &i64) -> Option<T> {
        write(&self.entries).remove(key)
    }

    fn list(&self) -> Vec<T> {
        read(&self.entries).values().cloned().collect()
    }

    fn len(&self) -> usize {
        read(&self.entries).len()
    }
}

// ── OrderedStore ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct OrderedStore<T> {
    entries: RwLock<Vec<T>>,
}

impl<T> OrderedStore<T> {
    pub fn new() -> Self {
        Self { entries: RwLock::new(Vec::new()) }
    }
}

/// Maps a signed index onto the vector, rejecting negatives and overflow.
fn position(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

impl<T: Clone + Send + Sync> Store<T> for OrderedStore<T> {
    type Key = i64;

    fn insert(&self, value: T) -> i64 {
        let mut entries = write(&self.entries);
        entries.push(value);
        // Vec length never exceeds isize::MAX.
        (entries.len() - 1) as i64
    }

    fn get(&self, index: &i64) -> Option<T> {
        let entries = read(&self.entries);
        position(*index, entries.len()).map(|i| entries[i].clone())
    }

    fn update(&self, index: &i64, value: T) -> Option<T> {
        let mut entries = write(&self.entries);
        let i = position(*index, entries.len())?;
        entries[i] = value;
        Some(entries[i].clone())
    }

    /// Removes the entry and shifts every later entry down by one.
    fn delete(&self, index: &i64) -> Option<T> {
        let mut entries = write(&self.entries);
        let i = position(*index, entries.len())?;
        Some(entries.remove(i))
    }

    fn list(&self) -> Vec<T> {
        read(&self.entries).clone()
    }

    fn len(&self) -> usize {
        read(&self.entries).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_insert_continues_after_highest_key() {
        let store: KeyedStore<&str> = [(1, "a"), (7, "b")].into_iter().collect();
        assert_eq!(store.insert("c"), 8);
        assert_eq!(KeyedStore::new().insert("first"), 1);
    }

    #[test]
    fn keyed_insert_after_max_key_reuses_lowest_gap() {
        let store: KeyedStore<&str> = [(i64::MAX, "top")].into_iter().collect();
        assert_eq!(store.insert("a"), 1);
        assert_eq!(store.insert("b"), 2);

        let store: KeyedStore<&str> = [(-5, "neg"), (1, "a"), (2, "b"), (i64::MAX, "top")].into_iter().collect();
        assert_eq!(store.insert("c"), 3);
        assert_eq!(store.get(&i64::MAX), Some("top"));
    }

    #[test]
    fn keyed_update_only_touches_existing_keys() {
        let store: KeyedStore<&str> = [(1, "a")].into_iter().collect();
        assert_eq!(store.update(&1, "z"), Some("z"));
        assert_eq!(store.get(&1), Some("z"));
        assert_eq!(store.update(&2, "y"), None);
        assert!(!store.contains(2));
    }

    #[test]
    fn keyed_delete_is_not_repeatable() {
        let store: KeyedStore<&str> = [(2, "b")].into_iter().collect();
        assert_eq!(store.delete(&2), Some("b"));
        assert_eq!(store.delete(&2), None);
        assert!(store.is_empty());
    }

    #[test]
    fn keyed_list_is_key_ordered() {
        let store: KeyedStore<&str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
        assert_eq!(store.list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn ordered_addresses_by_position() {
        let store = OrderedStore::new();
        assert_eq!(store.insert("a"), 0);
        assert_eq!(store.insert("b"), 1);
        assert_eq!(store.get(&1), Some("b"));
        assert_eq!(store.get(&2), None);
        assert_eq!(store.get(&-1), None);
        assert_eq!(store.list(), vec!["a", "b"]);
    }

    #[test]
    fn ordered_delete_shifts_later_entries() {
        let store = OrderedStore::new();
        for v in ["a", "b", "c"] {
            store.insert(v);
        }
        assert_eq!(store.delete(&0), Some("a"));
        assert_eq!(store.get(&0), Some("b"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.update(&5, "x"), None);
    }
}
