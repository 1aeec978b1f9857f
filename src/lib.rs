//! Pixel-art drawing canvas.
//!
//! A square surface divided into a 4×4 or 32×32 grid, a color panel with
//! current/previous colors and swatches, and a pencil/fill/eyedropper palette.
//! The host UI feeds pointer events into [`input::CanvasState`]; the drawing
//! is persisted as a JSON snapshot through a [`session::SnapshotStore`].

pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod replay;
pub mod session;

pub use config::Config;
pub use error::{CanvasError, CanvasResult};
