//! Host-agnostic input event types.

/// Pointer position relative to the drawing surface's top-left corner.
///
/// Hosts only deliver events that originate on the surface, so coordinates
/// are always inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: u32,
    pub y: u32,
}

impl PointerEvent {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Hue/saturation/value triple as reported by a color picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees (0-360)
    pub h: f64,
    /// Saturation (0.0-1.0)
    pub s: f64,
    /// Value (0.0-1.0)
    pub v: f64,
}

/// Color reported by the external picker widget on every interaction.
///
/// Only `hex` is consumed; the other representations are informational.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerColor {
    pub hex: String,
    pub hsv: Hsv,
    pub rgb: (f64, f64, f64),
}
