//! Shared numeric constants for the editor crate.

// ── Grid ────────────────────────────────────────────────────────

/// Grid cell edge in model units at zoom 1.0.
pub const GRID_SIZE: f64 = 24.0;

// ── Rooms ───────────────────────────────────────────────────────

/// Smallest width or height a room may have, in model units.
pub const MIN_ROOM_SIZE: f64 = 32.0;

/// Width of a freshly added room.
pub const DEFAULT_ROOM_WIDTH: f64 = 140.0;

/// Height of a freshly added room.
pub const DEFAULT_ROOM_HEIGHT: f64 = 100.0;

/// Category words used to build default room labels.
pub const ROOM_LABELS: [&str; 8] = ["Office", "Bedroom", "Bath", "Living", "Kitchen", "Store", "Lab", "Zone"];

// ── Canvas ──────────────────────────────────────────────────────

/// Model-space width of the canvas.
pub const CANVAS_WIDTH: f64 = 900.0;

/// Model-space height of the canvas.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Minimum distance from the canvas origin for a new room's top-left corner.
pub const PLACEMENT_MARGIN: f64 = 40.0;

/// Horizontal space kept free at the right edge when placing a new room.
pub const PLACEMENT_RESERVE_X: f64 = 200.0;

/// Vertical space kept free at the bottom edge when placing a new room.
pub const PLACEMENT_RESERVE_Y: f64 = 150.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.45;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 1.7;

/// Increment applied by a single zoom-in or zoom-out step.
pub const ZOOM_STEP: f64 = 0.13;

// ── Hit-testing ─────────────────────────────────────────────────

/// Edge length of a resize handle in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 12.0;
