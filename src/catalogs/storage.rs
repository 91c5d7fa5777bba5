//! Named, read-only collections of catalog items.

use std::collections::BTreeMap;

/// Items that carry their own lookup key.
pub trait Named {
    fn name(&self) -> &str;
}

/// A named collection of items keyed by item name (case-insensitive).
///
/// Iteration is in key order, so catalog listings are stable.
#[derive(Clone, Debug)]
pub struct Storage<T> {
    name: String,
    items: BTreeMap<String, T>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl<T: Named> Storage<T> {
    /// Collect items. A later item with the same name replaces an earlier one.
    pub fn from_items(name: impl Into<String>, items: impl IntoIterator<Item = T>) -> Self {
        let mut storage = Self::empty(name);
        for item in items {
            storage.insert(item);
        }
        storage
    }

    pub(crate) fn insert(&mut self, item: T) {
        self.items.insert(key(item.name()), item);
    }
}

impl<T> Storage<T> {
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: BTreeMap::new(),
        }
    }

    /// Collection name, e.g. `"Boosters"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an item by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.get(&key(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(&key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
