use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::EditorConfig;
use crate::doc::{PartialRoom, Room, RoomId, RoomStore};
use crate::error::{ConfigError, EngineError};
use crate::geometry::{Point, Rect};
use crate::hit::{self, Handle, HitTarget};
use crate::input::{Button, InputState, Key, Modifiers, Session, SessionKind};
use crate::render;
use crate::selection::Selection;
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Seed used when no entropy source is supplied.
const DEFAULT_SEED: u64 = 0x726f_6f6d;

/// Actions returned from commands and input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    RoomCreated(Room),
    RoomUpdated { id: RoomId, fields: PartialRoom },
    RoomRelabeled { id: RoomId, label: String },
    RoomsDeleted { ids: Vec<RoomId> },
    SelectionChanged { ids: Vec<RoomId> },
    EditLabelRequested { id: RoomId, label: String },
    CanvasResized { width: u32, height: u32 },
    SetCursor { cursor: String },
    RenderNeeded,
}

/// Read-only projection of the editor for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Rendered canvas width in pixels.
    pub width_px: u32,
    /// Rendered canvas height in pixels.
    pub height_px: u32,
    pub zoom: f64,
    pub grid_enabled: bool,
    /// Grid cell edge in model units at the current zoom.
    pub grid_cell: f64,
    /// Rooms in draw order.
    pub rooms: Vec<SceneRoom>,
}

/// One room as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneRoom {
    pub id: RoomId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub selected: bool,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every mutation of rooms, selection and zoom goes through this type.
pub struct EngineCore {
    pub doc: RoomStore,
    pub selection: Selection,
    pub viewport: Viewport,
    pub input: InputState,
    config: EditorConfig,
    rng: SmallRng,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(EditorConfig::default(), DEFAULT_SEED)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with a caller-chosen placement seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EditorConfig::default(), seed)
    }

    /// Build an engine from `config` after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn with_config(config: EditorConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: EditorConfig, seed: u64) -> Self {
        Self {
            doc: RoomStore::with_min_size(config.min_room_size),
            selection: Selection::new(),
            viewport: Viewport::from_config(&config),
            input: InputState::Idle,
            config,
            rng: SmallRng::seed_from_u64(seed),
            cursor: "default",
        }
    }

    // --- Room commands ---

    /// Add a room at a random position and make it the sole selection.
    pub fn add_room(&mut self) -> Vec<Action> {
        let room = self.doc.add(&mut self.rng, &self.config);
        tracing::debug!(id = room.id, x = room.x, y = room.y, label = %room.label, "room added");
        self.selection.select_single(room.id);
        vec![Action::RoomCreated(room), self.selection_changed(), Action::RenderNeeded]
    }

    /// Delete every selected room and clear the selection. No-op when nothing is selected.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.selection.delete_selected(&mut self.doc);
        if self.input.session().is_some_and(|s| !self.doc.contains(s.room)) {
            self.input.release();
        }
        tracing::debug!(?ids, "rooms deleted");
        vec![Action::RoomsDeleted { ids }, self.selection_changed(), Action::RenderNeeded]
    }

    /// Select a room; `multi` toggles it instead of replacing the selection.
    pub fn select_room(&mut self, id: RoomId, multi: bool) -> Vec<Action> {
        if !self.doc.contains(id) {
            return Vec::new();
        }
        self.selection.select(id, multi);
        vec![self.selection_changed(), Action::RenderNeeded]
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) -> Vec<Action> {
        self.selection.clear();
        vec![self.selection_changed(), Action::RenderNeeded]
    }

    /// Place a room's top-left corner at `(x, y)` model units, unsnapped.
    pub fn move_room(&mut self, id: RoomId, x: f64, y: f64) -> Vec<Action> {
        self.commit_geometry(id, PartialRoom::position(x, y))
    }

    /// Replace a room's geometry. Width and height are floored by the store.
    pub fn resize_room(&mut self, id: RoomId, rect: Rect) -> Vec<Action> {
        self.commit_geometry(id, PartialRoom::from_rect(rect))
    }

    /// Apply one handle drag of `(dx, dy)` screen pixels to a room's current geometry.
    ///
    /// Uses the same rules as an interactive resize session.
    pub fn resize_room_with_handle(&mut self, id: RoomId, handle: Handle, dx: f64, dy: f64) -> Vec<Action> {
        let Some(room) = self.doc.get(id) else {
            return Vec::new();
        };
        tracing::debug!(id, %handle, dx, dy, "scripted handle resize");
        let session = Session {
            room: id,
            kind: SessionKind::Resize(handle),
            origin: Point::new(0.0, 0.0),
            original: room.rect(),
        };
        let rect = session.geometry_at(Point::new(dx, dy), &self.viewport, self.config.min_room_size);
        self.commit_geometry(id, PartialRoom::from_rect(rect))
    }

    /// Replace a room's label verbatim.
    pub fn relabel_room(&mut self, id: RoomId, text: &str) -> Vec<Action> {
        if !self.doc.relabel(id, text) {
            return Vec::new();
        }
        vec![Action::RoomRelabeled { id, label: text.to_owned() }, Action::RenderNeeded]
    }

    /// Relabel the selected room. Only applies when exactly one room is selected.
    pub fn relabel_selected(&mut self, text: &str) -> Vec<Action> {
        match (self.selection.len(), self.selection.first()) {
            (1, Some(id)) => self.relabel_room(id, text),
            _ => Vec::new(),
        }
    }

    // --- Viewport commands ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.change_zoom(Viewport::zoom_in)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.change_zoom(Viewport::zoom_out)
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        self.change_zoom(Viewport::reset)
    }

    /// Set zoom directly; the value is clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        self.change_zoom(|vp| vp.set_zoom(zoom))
    }

    pub fn toggle_grid(&mut self) -> Vec<Action> {
        self.viewport.toggle_grid();
        tracing::debug!(enabled = self.viewport.grid_enabled(), "grid toggled");
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Pointer pressed at `screen_pt` (canvas-relative pixels).
    ///
    /// Only the primary button starts anything. A press on a selected room's
    /// handle starts a resize, a press on a room body selects it and starts a
    /// move, and a press on empty canvas clears the selection.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        match hit::hit_test(screen_pt, &self.doc, &self.selection, &self.viewport) {
            HitTarget::Handle { id, handle } => {
                let mut actions = self.start_session(id, SessionKind::Resize(handle), screen_pt);
                actions.extend(self.set_cursor(handle.cursor()));
                actions
            }
            HitTarget::RoomBody(id) => {
                self.selection.select(id, modifiers.shift);
                let mut actions = vec![self.selection_changed(), Action::RenderNeeded];
                actions.extend(self.start_session(id, SessionKind::Move, screen_pt));
                actions.extend(self.set_cursor("grabbing"));
                actions
            }
            HitTarget::Background => {
                if self.selection.is_empty() {
                    Vec::new()
                } else {
                    self.deselect_all()
                }
            }
        }
    }

    /// Pointer moved to `screen_pt`.
    ///
    /// During a session the room's geometry is recomputed from the session
    /// snapshot and committed immediately. Otherwise only the hover cursor is updated.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let Some(session) = self.input.session().copied() else {
            let cursor = self.cursor_at(screen_pt);
            return self.set_cursor(cursor).into_iter().collect();
        };
        let rect = session.geometry_at(screen_pt, &self.viewport, self.config.min_room_size);
        let fields = match session.kind {
            SessionKind::Move => PartialRoom::position(rect.x, rect.y),
            SessionKind::Resize(_) => PartialRoom::from_rect(rect),
        };
        tracing::trace!(id = session.room, ?fields, "session update");
        let actions = self.commit_geometry(session.room, fields);
        if actions.is_empty() {
            // Room vanished mid-session.
            self.input.release();
        }
        actions
    }

    /// Pointer released. Ends the active session regardless of button.
    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let Some(session) = self.input.release() else {
            return Vec::new();
        };
        tracing::debug!(id = session.room, kind = ?session.kind, "session ended");
        let cursor = self.cursor_at(screen_pt);
        self.set_cursor(cursor).into_iter().collect()
    }

    /// Pointer stream lost (pointercancel, window blur). Ends any session without further change.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        match self.input.release() {
            Some(session) => {
                tracing::debug!(id = session.room, "session cancelled");
                self.set_cursor("default").into_iter().collect()
            }
            None => Vec::new(),
        }
    }

    /// Double-click: request inline label editing for the room under the pointer.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        match hit::hit_test(screen_pt, &self.doc, &self.selection, &self.viewport) {
            HitTarget::RoomBody(id) => self
                .doc
                .get(id)
                .map(|room| vec![Action::EditLabelRequested { id, label: room.label.clone() }])
                .unwrap_or_default(),
            HitTarget::Handle { .. } | HitTarget::Background => Vec::new(),
        }
    }

    /// Key pressed while the editor has focus.
    ///
    /// `Delete` removes the selected rooms; `Escape` ends any session and clears the selection.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_delete() {
            self.delete_selected()
        } else if key.is_escape() {
            self.input.release();
            self.deselect_all()
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// All rooms in draw order.
    pub fn rooms(&self) -> impl DoubleEndedIterator<Item = &Room> {
        self.doc.rooms()
    }

    /// Look up a room by id.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.doc.get(id)
    }

    /// Selected room ids, ascending.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<RoomId> {
        self.selection.ids().collect()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    #[must_use]
    pub fn grid_enabled(&self) -> bool {
        self.viewport.grid_enabled()
    }

    /// Rendered canvas size in pixels.
    #[must_use]
    pub fn canvas_size_px(&self) -> (u32, u32) {
        self.viewport.canvas_size_px()
    }

    /// Label of the first selected room, or empty when nothing is selected.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        self.selection
            .first()
            .and_then(|id| self.doc.get(id))
            .map_or("", |room| room.label.as_str())
    }

    /// Whether a delete command would remove anything.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Whether a move or resize session is in progress.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        !self.input.is_idle()
    }

    /// Snapshot of everything a renderer needs.
    #[must_use]
    pub fn scene(&self) -> Scene {
        let (width_px, height_px) = self.viewport.canvas_size_px();
        Scene {
            width_px,
            height_px,
            zoom: self.viewport.zoom(),
            grid_enabled: self.viewport.grid_enabled(),
            grid_cell: self.viewport.grid_cell(),
            rooms: self
                .doc
                .rooms()
                .map(|r| SceneRoom {
                    id: r.id,
                    x: r.x,
                    y: r.y,
                    width: r.width,
                    height: r.height,
                    label: r.label.clone(),
                    selected: self.selection.contains(r.id),
                })
                .collect(),
        }
    }

    // --- Internals ---

    fn start_session(&mut self, id: RoomId, kind: SessionKind, origin: Point) -> Vec<Action> {
        let Some(room) = self.doc.get(id) else {
            return Vec::new();
        };
        let session = Session { room: id, kind, origin, original: room.rect() };
        tracing::debug!(id, ?kind, "session started");
        self.input = InputState::Active(session);
        Vec::new()
    }

    fn commit_geometry(&mut self, id: RoomId, fields: PartialRoom) -> Vec<Action> {
        if !self.doc.update_geometry(id, &fields) {
            return Vec::new();
        }
        vec![Action::RoomUpdated { id, fields }, Action::RenderNeeded]
    }

    fn change_zoom(&mut self, f: impl FnOnce(&mut Viewport)) -> Vec<Action> {
        let before = self.viewport.canvas_size_px();
        f(&mut self.viewport);
        let (width, height) = self.viewport.canvas_size_px();
        tracing::debug!(zoom = self.viewport.zoom(), "zoom changed");
        let mut actions = Vec::new();
        if (width, height) != before {
            actions.push(Action::CanvasResized { width, height });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn selection_changed(&self) -> Action {
        Action::SelectionChanged { ids: self.selected_ids() }
    }

    fn cursor_at(&self, screen_pt: Point) -> &'static str {
        match hit::hit_test(screen_pt, &self.doc, &self.selection, &self.viewport) {
            HitTarget::Handle { handle, .. } => handle.cursor(),
            HitTarget::RoomBody(id) if self.selection.contains(id) => "move",
            HitTarget::RoomBody(_) => "pointer",
            HitTarget::Background => "default",
        }
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor { cursor: cursor.to_owned() })
    }
}

/// The full editor engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Exported to JavaScript; input methods return the resulting actions as a JSON array.
#[wasm_bindgen]
pub struct Engine {
    canvas: HtmlCanvasElement,
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine with the stock configuration bound to `canvas`.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Engine {
        Self { canvas, core: EngineCore::with_seed(browser_seed()) }
    }

    /// Create an engine from a JSON config document.
    ///
    /// # Errors
    ///
    /// Fails if the config is malformed or out of range.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas: HtmlCanvasElement, config_json: &str) -> Result<Engine, JsError> {
        let config = EditorConfig::from_json(config_json).map_err(EngineError::from)?;
        let core = EngineCore::with_config(config, browser_seed()).map_err(EngineError::from)?;
        Ok(Self { canvas, core })
    }

    #[wasm_bindgen(js_name = addRoom)]
    pub fn add_room(&mut self) -> Result<String, JsError> {
        let actions = self.core.add_room();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> Result<String, JsError> {
        let actions = self.core.delete_selected();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = selectRoom)]
    pub fn select_room(&mut self, id: RoomId, multi: bool) -> Result<String, JsError> {
        let actions = self.core.select_room(id, multi);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = deselectAll)]
    pub fn deselect_all(&mut self) -> Result<String, JsError> {
        let actions = self.core.deselect_all();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = moveRoom)]
    pub fn move_room(&mut self, id: RoomId, x: f64, y: f64) -> Result<String, JsError> {
        let actions = self.core.move_room(id, x, y);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = resizeRoom)]
    pub fn resize_room(&mut self, id: RoomId, x: f64, y: f64, width: f64, height: f64) -> Result<String, JsError> {
        let actions = self.core.resize_room(id, Rect::new(x, y, width, height));
        Ok(actions_json(&actions)?)
    }

    /// Drag `handle` (`"nw"`, `"n"`, ... `"w"`) of a room by `(dx, dy)` screen pixels.
    ///
    /// # Errors
    ///
    /// Fails if `handle` is not one of the eight handle names.
    #[wasm_bindgen(js_name = resizeRoomWithHandle)]
    pub fn resize_room_with_handle(&mut self, id: RoomId, handle: &str, dx: f64, dy: f64) -> Result<String, JsError> {
        let handle: Handle = handle.parse().map_err(EngineError::from)?;
        let actions = self.core.resize_room_with_handle(id, handle, dx, dy);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = relabelRoom)]
    pub fn relabel_room(&mut self, id: RoomId, text: &str) -> Result<String, JsError> {
        let actions = self.core.relabel_room(id, text);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = relabelSelected)]
    pub fn relabel_selected(&mut self, text: &str) -> Result<String, JsError> {
        let actions = self.core.relabel_selected(text);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Result<String, JsError> {
        let actions = self.core.zoom_in();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<String, JsError> {
        let actions = self.core.zoom_out();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) -> Result<String, JsError> {
        let actions = self.core.reset_zoom();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: f64) -> Result<String, JsError> {
        let actions = self.core.set_zoom(zoom);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = toggleGrid)]
    pub fn toggle_grid(&mut self) -> Result<String, JsError> {
        let actions = self.core.toggle_grid();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, shift: bool) -> Result<String, JsError> {
        let modifiers = Modifiers { shift };
        let actions = self.core.on_pointer_down(Point::new(x, y), Button::from_index(button), modifiers);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool) -> Result<String, JsError> {
        let modifiers = Modifiers { shift };
        let actions = self.core.on_pointer_move(Point::new(x, y), modifiers);
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsError> {
        let actions = self.core.on_pointer_up(Point::new(x, y), Button::from_index(button), Modifiers::default());
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> Result<String, JsError> {
        let actions = self.core.on_pointer_cancel();
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, x: f64, y: f64) -> Result<String, JsError> {
        let actions = self.core.on_double_click(Point::new(x, y));
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: String) -> Result<String, JsError> {
        let actions = self.core.on_key_down(&Key(key), Modifiers::default());
        Ok(actions_json(&actions)?)
    }

    /// Current scene as JSON, for hosts that draw rooms with the DOM.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.scene()).map_err(EngineError::Serialize)?)
    }

    #[wasm_bindgen(js_name = selectedLabel)]
    #[must_use]
    pub fn selected_label(&self) -> String {
        self.core.selected_label().to_owned()
    }

    #[wasm_bindgen(js_name = canDelete)]
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.core.can_delete()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.core.zoom()
    }

    #[wasm_bindgen(js_name = gridEnabled)]
    #[must_use]
    pub fn grid_enabled(&self) -> bool {
        self.core.grid_enabled()
    }

    /// Resize the backing canvas to the current zoom and draw the scene.
    ///
    /// Drawing failures are logged, not surfaced.
    pub fn render(&self) {
        if let Err(err) = self.try_render() {
            tracing::warn!(error = ?err, "render failed");
        }
    }
}

impl Engine {
    fn try_render(&self) -> Result<(), JsValue> {
        let (width, height) = self.core.canvas_size_px();
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core.doc, &self.core.selection, &self.core.viewport)
    }
}

fn actions_json(actions: &[Action]) -> Result<String, EngineError> {
    serde_json::to_string(actions).map_err(EngineError::Serialize)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn browser_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
