//! Collection store - array CRUD over a key-value substrate.
//!
//! Each key holds one collection: an ordered JSON array of records of a single
//! type. Every mutation is one read-modify-write cycle: read the whole array,
//! transform it in memory, write the whole array back with a single substrate
//! write. There is no locking; two interleaved cycles on the same key lose the
//! earlier writer's changes.
//!
//! Reads are forgiving: an absent key, a substrate failure or content that
//! does not parse all read as an empty collection. Writes are not: every
//! mutating operation returns the substrate's error.

use crate::error::Result;
use crate::storage::Storage;
use serde::{de::DeserializeOwned, Serialize};

/// Array-of-records persistence over an injected [`Storage`].
#[derive(Debug, Clone, Default)]
pub struct CollectionStore<S> {
    storage: S,
}

impl<S: Storage> CollectionStore<S> {
    /// Wrap a substrate.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying substrate.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the underlying substrate.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Unwrap the substrate.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Read the collection stored under `key`.
    ///
    /// Returns an empty `Vec` when the key is absent, the substrate refuses
    /// the read, or the stored text is not an array of `T`. Callers cannot
    /// tell an empty collection from a corrupt one.
    pub fn get_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "collection read failed, treating as empty");
                return Vec::new();
            }
        };

        if raw.is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "collection is unparsable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the collection under `key` with `items`.
    pub fn set_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.storage.write(key, &raw)?;
        tracing::debug!(key, len = items.len(), "collection written");
        Ok(())
    }

    /// Append `item` to the end of the collection.
    pub fn add_item<T>(&mut self, key: &str, item: T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.get_collection(key);
        items.push(item);
        self.set_collection(key, &items)
    }

    /// Replace every record matching `predicate` with `updater(record)`.
    ///
    /// Positions and count are preserved and non-matching records are left
    /// untouched. The collection is written back even when nothing matched.
    /// Returns the number of records that were updated.
    pub fn update_item<T, P, F>(&mut self, key: &str, mut predicate: P, mut updater: F) -> Result<usize>
    where
        T: Serialize + DeserializeOwned,
        P: FnMut(&T) -> bool,
        F: FnMut(T) -> T,
    {
        let mut updated = 0;
        let items: Vec<T> = self
            .get_collection(key)
            .into_iter()
            .map(|item| {
                if predicate(&item) {
                    updated += 1;
                    updater(item)
                } else {
                    item
                }
            })
            .collect();

        self.set_collection(key, &items)?;
        Ok(updated)
    }

    /// Drop every record matching `predicate`, keeping the relative order of
    /// the rest. Returns the number of records removed.
    pub fn remove_item<T, P>(&mut self, key: &str, mut predicate: P) -> Result<usize>
    where
        T: Serialize + DeserializeOwned,
        P: FnMut(&T) -> bool,
    {
        let mut items: Vec<T> = self.get_collection(key);
        let before = items.len();
        items.retain(|item| !predicate(item));
        let removed = before - items.len();

        self.set_collection(key, &items)?;
        Ok(removed)
    }

    /// First record matching `predicate`, in collection order.
    pub fn find_item<T, P>(&self, key: &str, predicate: P) -> Option<T>
    where
        T: DeserializeOwned,
        P: FnMut(&T) -> bool,
    {
        self.get_collection(key).into_iter().find(predicate)
    }

    /// Write `defaults` under `key` only if the key is absent or holds the
    /// empty string.
    ///
    /// A stored empty array counts as a value and is left alone. Returns
    /// `true` when the defaults were written.
    pub fn init_collection<T: Serialize>(&mut self, key: &str, defaults: &[T]) -> Result<bool> {
        if self.storage.read(key)?.is_some_and(|raw| !raw.is_empty()) {
            return Ok(false);
        }
        self.set_collection(key, defaults)?;
        Ok(true)
    }

    /// Read a single (non-array) value. Absent or unreadable reads as `None`.
    pub fn get_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.read(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "value read failed");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!(key, error = %e, "value is unparsable"))
            .ok()
    }

    /// Write a single (non-array) value.
    pub fn set_value<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.storage.write(key, &raw)
    }

    /// Remove `key` from the substrate.
    pub fn remove_key(&mut self, key: &str) -> Result<()> {
        self.storage.remove(key)
    }

    /// Whether `key` currently holds any value. Read failures count as absent.
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.storage.read(key), Ok(Some(_)))
    }
}
