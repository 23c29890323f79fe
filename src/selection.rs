//! Selection model: the set of selected room ids.
//!
//! Plain click replaces the selection, shift-click toggles a single id.
//! Order carries no meaning; ids are kept sorted so "first selected" is
//! deterministic.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::BTreeSet;

use crate::doc::{RoomId, RoomStore};

/// Set of selected room ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RoomId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with exactly `id`.
    pub fn select_single(&mut self, id: RoomId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: RoomId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Single-select, or toggle when the multi-select modifier is held.
    pub fn select(&mut self, id: RoomId, multi: bool) {
        if multi {
            self.toggle(id);
        } else {
            self.select_single(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Remove every selected room from `store`, then clear the selection.
    ///
    /// Returns the ids that were removed.
    pub fn delete_selected(&mut self, store: &mut RoomStore) -> Vec<RoomId> {
        let removed = store.remove(&self.ids);
        self.ids.clear();
        removed
    }

    #[must_use]
    pub fn contains(&self, id: RoomId) -> bool {
        self.ids.contains(&id)
    }

    /// Lowest selected id, if any.
    #[must_use]
    pub fn first(&self) -> Option<RoomId> {
        self.ids.first().copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
