//! Rendering: draws the editor scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the room store, selection and viewport and
//! produces pixels and does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{Room, RoomStore};
use crate::hit::Handle;
use crate::selection::Selection;
use crate::viewport::Viewport;

const CANVAS_BG: &str = "#f9fafb";
const GRID_LINE: &str = "#e5e7eb";
const ROOM_FILL: &str = "#ffffff";
const ROOM_FILL_SELECTED: &str = "#e0f2fe";
const ROOM_BORDER: &str = "#d1d5db";
const ROOM_BORDER_SELECTED: &str = "#3b82f6";
const HANDLE_BORDER: &str = "#06b6d4";
const LABEL_COLOR: &str = "#111827";

/// Label inset from the room's top-left corner, in model units.
const LABEL_INSET_X: f64 = 12.0;
const LABEL_INSET_Y: f64 = 8.0;
const LABEL_FONT: &str = "600 16px Inter, sans-serif";

/// Draw the full scene: background, grid, rooms and selection UI.
///
/// The context is scaled by the zoom factor, so everything after the
/// background is drawn in model units.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &RoomStore,
    selection: &Selection,
    viewport: &Viewport,
) -> Result<(), JsValue> {
    let (width_px, height_px) = viewport.canvas_size_px();
    let zoom = viewport.zoom();

    // Layer 1: clear and set up transforms.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, f64::from(width_px), f64::from(height_px));
    ctx.set_fill_style_str(CANVAS_BG);
    ctx.fill_rect(0.0, 0.0, f64::from(width_px), f64::from(height_px));
    ctx.scale(zoom, zoom)?;

    // Layer 2: grid.
    if viewport.grid_enabled() {
        draw_grid(ctx, viewport);
    }

    // Layer 3: rooms in id order.
    for room in doc.rooms() {
        draw_room(ctx, room, selection.contains(room.id), zoom)?;
    }

    // Layer 4: handles above every room.
    for room in doc.rooms().filter(|r| selection.contains(r.id)) {
        draw_handles(ctx, room, zoom);
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, viewport: &Viewport) {
    let cell = viewport.grid_cell();
    let (w, h) = viewport.base_size();

    ctx.save();
    ctx.set_stroke_style_str(GRID_LINE);
    ctx.set_line_width(1.0 / viewport.zoom());
    ctx.begin_path();
    let mut x = 0.0;
    while x <= w {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        x += cell;
    }
    let mut y = 0.0;
    while y <= h {
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        y += cell;
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_room(ctx: &CanvasRenderingContext2d, room: &Room, selected: bool, zoom: f64) -> Result<(), JsValue> {
    ctx.save();

    ctx.set_fill_style_str(if selected { ROOM_FILL_SELECTED } else { ROOM_FILL });
    ctx.fill_rect(room.x, room.y, room.width, room.height);

    ctx.set_stroke_style_str(if selected { ROOM_BORDER_SELECTED } else { ROOM_BORDER });
    let border_px = if selected { 2.5 } else { 2.0 };
    ctx.set_line_width(border_px / zoom);
    ctx.stroke_rect(room.x, room.y, room.width, room.height);

    if !room.label.is_empty() {
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        ctx.set_font(LABEL_FONT);
        let max_w = (room.width - LABEL_INSET_X * 2.0).max(1.0);
        ctx.fill_text_with_max_width(&room.label, room.x + LABEL_INSET_X, room.y + LABEL_INSET_Y, max_w)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_handles(ctx: &CanvasRenderingContext2d, room: &Room, zoom: f64) {
    let size = HANDLE_SIZE_PX / zoom;
    let rect = room.rect();

    ctx.save();
    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str(HANDLE_BORDER);
    ctx.set_line_width(2.0 / zoom);

    for handle in Handle::ALL {
        let c = handle.position(&rect);
        ctx.fill_rect(c.x - size / 2.0, c.y - size / 2.0, size, size);
        ctx.stroke_rect(c.x - size / 2.0, c.y - size / 2.0, size, size);
    }

    ctx.restore();
}
