//! Resize handles and hit-testing.
//!
//! Pointer-down targets are classified by explicit containment checks rather
//! than by whatever DOM element happened to receive the event. Handles of
//! selected rooms win over room bodies, and later rooms (drawn on top) win
//! over earlier ones.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{RoomId, RoomStore};
use crate::geometry::{Point, Rect};
use crate::selection::Selection;
use crate::viewport::Viewport;

/// One of the eight compass-point resize handles on a room's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

impl Handle {
    /// All handles in clockwise order starting at the top-left corner.
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
    ];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::Sw | Self::W)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// Model-space center of this handle on `rect`.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.x + rect.width
        } else {
            rect.x + rect.width / 2.0
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.y + rect.height
        } else {
            rect.y + rect.height / 2.0
        };
        Point::new(x, y)
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }

    /// Short lowercase name (`"nw"`, `"n"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown handle name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize handle: {0}")]
pub struct ParseHandleError(pub String);

impl FromStr for Handle {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| ParseHandleError(s.to_owned()))
    }
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A resize handle of a selected room.
    Handle { id: RoomId, handle: Handle },
    /// The body of a room.
    RoomBody(RoomId),
    /// Empty canvas.
    Background,
}

/// Classify the screen point `screen_pt` against the current rooms.
#[must_use]
pub fn hit_test(screen_pt: Point, doc: &RoomStore, selection: &Selection, viewport: &Viewport) -> HitTarget {
    let pt = viewport.screen_to_model(screen_pt);
    let slop = viewport.screen_dist_to_model(HANDLE_SIZE_PX / 2.0);

    for room in doc.rooms().rev().filter(|r| selection.contains(r.id)) {
        let rect = room.rect();
        let handle = Handle::ALL.into_iter().find(|h| {
            let c = h.position(&rect);
            (pt.x - c.x).abs() <= slop && (pt.y - c.y).abs() <= slop
        });
        if let Some(handle) = handle {
            return HitTarget::Handle { id: room.id, handle };
        }
    }

    doc.rooms()
        .rev()
        .find(|r| r.rect().contains(pt))
        .map_or(HitTarget::Background, |r| HitTarget::RoomBody(r.id))
}
