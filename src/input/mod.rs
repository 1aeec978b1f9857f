//! Input handling: tools, the color panel, and the application context.
//!
//! Hosts translate their native pointer and button events into calls on
//! [`CanvasState`], which dispatches clicks through the active [`Tool`] and
//! persists the drawing as the pointer moves.

pub mod color;
pub mod events;
pub mod state;
pub mod tool;

pub use color::ColorSelection;
pub use events::{Hsv, PickerColor, PointerEvent};
pub use state::{CanvasState, RestoreOutcome};
pub use tool::{Tool, ToolSelection, apply_tool};
