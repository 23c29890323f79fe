//! Direct-manipulation engine for the room-layout editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editor state end to end: the room collection, the selection, the zoom and
//! grid settings, and the pointer-driven move/resize interaction. The host
//! JavaScript layer only wires DOM events into the engine and reacts to the
//! [`engine::Action`]s it returns (redraw, cursor changes, label editing).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Room types and the in-memory room store |
//! | [`selection`] | Set of selected room ids |
//! | [`geometry`] | Points, rectangles, grid snapping and the resize rules |
//! | [`viewport`] | Zoom and grid settings, screen/model conversion |
//! | [`input`] | Input event types and the interaction state machine |
//! | [`hit`] | Resize handles and hit-testing against rooms |
//! | [`render`] | Canvas 2D rendering of the grid and rooms |
//! | [`config`] | Editor configuration overrides |
//! | [`error`] | Error types for the fallible edges |
//! | [`consts`] | Shared numeric constants (grid size, zoom limits, minimum sizes, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod viewport;
