//! Drawing primitives for the pixel canvas.
//!
//! - [`Rgb`] / [`HexColor`]: numeric and textual colors, plus [`to_hex`]
//! - [`GridModel`]: pixel to cell arithmetic
//! - [`Surface`]: the pixel-addressable boundary, with a Cairo implementation
//! - [`PixelCanvas`]: grid-aware paint, fill, clear, and read operations

pub mod canvas;
pub mod color;
pub mod grid;
pub mod surface;

pub use canvas::PixelCanvas;
pub use color::{HexColor, Rgb, rgb_text, to_hex};
pub use color::{BLACK, BLUE, RED, WHITE};
pub use grid::GridModel;
pub use surface::{CairoSurface, Surface};
