//! Input model: the shift modifier, mouse buttons, and the interaction state machine.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a
//! pointer event. `InputState` is either idle or holds the one active
//! [`Session`], which carries everything needed to recompute a room's
//! geometry from the pointer position: the pointer origin and a snapshot of
//! the room taken at pointer-down. The snapshot is never touched mid-session,
//! so every move event is computed from the same reference point.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::RoomId;
use crate::geometry::{self, Point, Rect};
use crate::hit::Handle;
use crate::viewport::Viewport;

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held. Shift toggles rooms in and out of the selection.
    pub shift: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` index. Unknown indices are treated as secondary.
    #[must_use]
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Middle,
            _ => Self::Secondary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// What an active session does to its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Translate the room, keeping its size.
    Move,
    /// Drag one handle, reshaping the room.
    Resize(Handle),
}

/// One continuous pointer-down-to-pointer-up interaction on a room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    /// Room being manipulated.
    pub room: RoomId,
    /// Move or resize.
    pub kind: SessionKind,
    /// Screen-space pointer position at pointer-down.
    pub origin: Point,
    /// Room geometry at pointer-down.
    pub original: Rect,
}

impl Session {
    /// Geometry the room should have with the pointer at `current` (screen space).
    #[must_use]
    pub fn geometry_at(&self, current: Point, viewport: &Viewport, min_size: f64) -> Rect {
        let zoom = viewport.zoom();
        let mx = geometry::to_model_delta(current.x - self.origin.x, zoom);
        let my = geometry::to_model_delta(current.y - self.origin.y, zoom);
        let grid = viewport.snap_grid();
        match self.kind {
            SessionKind::Move => geometry::moved(self.original, mx, my, grid),
            SessionKind::Resize(handle) => geometry::resized(self.original, handle, mx, my, grid, min_size),
        }
    }
}

/// Internal state for the interaction state machine.
///
/// At most one session exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No interaction in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A move or resize is in progress.
    Active(Session),
}

impl InputState {
    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Idle => None,
            Self::Active(session) => Some(session),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// End the active session, returning it. The state is `Idle` afterwards on every path.
    pub fn release(&mut self) -> Option<Session> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Active(session) => Some(session),
        }
    }
}
