//! Document model: rooms and the in-memory store that owns them.
//!
//! This module defines what is on the canvas (`Room`), a sparse-update type
//! for incremental geometry edits (`PartialRoom`), and the runtime store that
//! owns all live rooms (`RoomStore`).
//!
//! The store is the only place rooms are mutated. The interaction engine
//! computes new geometry and hands it here; the renderer reads rooms back in
//! id order, which is also their draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::consts::MIN_ROOM_SIZE;
use crate::geometry::Rect;

/// Unique identifier for a room. Assigned as `max(existing) + 1`.
pub type RoomId = u32;

/// A rectangular room on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier for this room.
    pub id: RoomId,
    /// Left edge in model coordinates.
    pub x: f64,
    /// Top edge in model coordinates.
    pub y: f64,
    /// Width in model units; never below the store's floor.
    pub width: f64,
    /// Height in model units; never below the store's floor.
    pub height: f64,
    /// Free-text label. Not required to be unique.
    pub label: String,
}

impl Room {
    /// The room's geometry as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Sparse geometry update for a room. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialRoom {
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PartialRoom {
    /// Update carrying only a new position.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Update carrying every geometry field of `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self { x: Some(rect.x), y: Some(rect.y), width: Some(rect.width), height: Some(rect.height) }
    }
}

/// In-memory store of rooms, keyed and ordered by id.
#[derive(Debug, Clone)]
pub struct RoomStore {
    rooms: BTreeMap<RoomId, Room>,
    min_size: f64,
}

impl RoomStore {
    /// Create an empty store with the standard size floor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_size(MIN_ROOM_SIZE)
    }

    /// Create an empty store that floors room sizes at `min_size`.
    #[must_use]
    pub fn with_min_size(min_size: f64) -> Self {
        Self { rooms: BTreeMap::new(), min_size }
    }

    /// The id the next added room will receive.
    #[must_use]
    pub fn next_id(&self) -> RoomId {
        self.rooms.last_key_value().map_or(1, |(id, _)| id + 1)
    }

    /// Add a room of the configured default size at a pseudo-random position.
    ///
    /// The position is an integer point in
    /// `[margin, canvas - reserve)` on each axis, and the label is a random
    /// category word followed by the new id.
    pub fn add<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &EditorConfig) -> Room {
        let id = self.next_id();
        let x = config.placement_margin + (rng.random::<f64>() * config.placement_span_x()).floor();
        let y = config.placement_margin + (rng.random::<f64>() * config.placement_span_y()).floor();
        let word = if config.labels.is_empty() {
            "Room"
        } else {
            config.labels[rng.random_range(0..config.labels.len())].as_str()
        };
        let room = Room {
            id,
            x,
            y,
            width: config.default_room_width.max(self.min_size),
            height: config.default_room_height.max(self.min_size),
            label: format!("{word} {id}"),
        };
        self.rooms.insert(id, room.clone());
        room
    }

    /// Insert or replace a room. Its size is floored like any other update.
    pub fn insert(&mut self, mut room: Room) {
        room.width = room.width.max(self.min_size);
        room.height = room.height.max(self.min_size);
        self.rooms.insert(room.id, room);
    }

    /// Remove every room whose id is in `ids`, returning the ids actually removed.
    pub fn remove(&mut self, ids: &BTreeSet<RoomId>) -> Vec<RoomId> {
        ids.iter().copied().filter(|id| self.rooms.remove(id).is_some()).collect()
    }

    /// Return a reference to a room by id.
    #[must_use]
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    /// Merge the present fields of `partial` into a room. Returns false if the room doesn't exist.
    ///
    /// Width and height are re-floored here so direct callers cannot break
    /// the minimum-size invariant.
    pub fn update_geometry(&mut self, id: RoomId, partial: &PartialRoom) -> bool {
        let Some(room) = self.rooms.get_mut(&id) else {
            return false;
        };
        if let Some(x) = partial.x {
            room.x = x;
        }
        if let Some(y) = partial.y {
            room.y = y;
        }
        if let Some(w) = partial.width {
            room.width = w.max(self.min_size);
        }
        if let Some(h) = partial.height {
            room.height = h.max(self.min_size);
        }
        true
    }

    /// Replace a room's label verbatim. Returns false if the room doesn't exist.
    pub fn relabel(&mut self, id: RoomId, text: &str) -> bool {
        let Some(room) = self.rooms.get_mut(&id) else {
            return false;
        };
        text.clone_into(&mut room.label);
        true
    }

    /// All rooms in ascending id order, which is also draw order.
    pub fn rooms(&self) -> impl DoubleEndedIterator<Item = &Room> {
        self.rooms.values()
    }

    /// Number of rooms currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the store contains no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new()
    }
}
