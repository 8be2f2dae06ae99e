//! Local list state for one admin resource.

use std::collections::HashSet;

use crate::models::Id;
use crate::table::TableRow;

/// The last known server state of a resource list plus in-flight deletes.
#[derive(Debug, Clone)]
pub struct ResourceList<T> {
    items: Vec<T>,
    loaded: bool,
    deleting: HashSet<Id>,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            deleting: HashSet::new(),
        }
    }
}

impl<T: TableRow + Clone> ResourceList<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: Id) -> Option<&T> {
        self.items.iter().find(|item| item.row_key() == id)
    }

    /// Default `order` for a new entry.
    pub fn next_order(&self) -> i64 {
        self.items.len() as i64 + 1
    }

    /// Replace the whole list with a fresh fetch.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
        self.sort();
    }

    /// Append the object the server returned for a create.
    pub fn apply_created(&mut self, item: T) {
        self.items.push(item);
        self.sort();
    }

    /// Replace the row with the object the server returned for an update.
    pub fn apply_updated(&mut self, item: T) {
        let key = item.row_key();
        match self.items.iter_mut().find(|existing| existing.row_key() == key) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.sort();
    }

    /// Drop the row with `id`; returns whether it was present.
    pub fn remove(&mut self, id: Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.row_key() != id);
        self.items.len() != before
    }

    /// Mark `id` as being deleted. Returns false if a delete is already in flight.
    pub fn begin_delete(&mut self, id: Id) -> bool {
        self.deleting.insert(id)
    }

    pub fn finish_delete(&mut self, id: Id) {
        self.deleting.remove(&id);
    }

    pub fn deleting(&self) -> HashSet<Id> {
        self.deleting.clone()
    }

    /// Stable sort by display order for entities that carry one.
    fn sort(&mut self) {
        if self.items.iter().any(|item| item.display_order().is_some()) {
            self.items
                .sort_by_key(|item| item.display_order().unwrap_or(i64::MAX));
        }
    }
}
