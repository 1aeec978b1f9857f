//! RGB color types, hex color codes, and the text-to-hex converter.

use crate::error::{CanvasError, CanvasResult};
use std::fmt;

/// Represents an opaque 24-bit RGB color.
///
/// # Examples
///
/// ```
/// use pixelcanvas::draw::Rgb;
/// let orange = Rgb::new(255, 128, 0);
/// assert_eq!(orange.to_hex().as_str(), "#ff8000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    /// Creates a new color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as a canonical lowercase `#rrggbb` code.
    pub fn to_hex(self) -> HexColor {
        HexColor(format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }

    /// Components scaled to Cairo's 0.0-1.0 range.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// A color in its textual `#`-prefixed hex form.
///
/// Equality is plain string equality, so `#ABCDEF` and `#abcdef` are
/// different values even though they paint the same.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Parses a paintable hex color (`#rgb` or `#rrggbb`, either case).
    pub fn parse(text: &str) -> CanvasResult<Self> {
        let color = Self(text.to_string());
        color.to_rgb()?;
        Ok(color)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the hex digits into an [`Rgb`] value.
    ///
    /// Shorthand `#rgb` expands each digit (`#f80` paints as `#ff8800`).
    pub fn to_rgb(&self) -> CanvasResult<Rgb> {
        let invalid = || CanvasError::InvalidColorFormat(self.0.clone());
        let digits = self.0.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        match digits.len() {
            3 => Ok(Rgb::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Converts color text into a hex color code.
///
/// Accepts text that already starts with `#` (returned unchanged, without
/// validation) or text containing an `rgb(r, g, b)` group with decimal
/// components. Components are not range-checked: `rgb(256, 0, 0)` becomes
/// `#1000000`.
///
/// # Errors
/// [`CanvasError::UnrecognizedColorFormat`] for empty text, text that is
/// neither `#`-prefixed nor contains `rgb`, and text whose `rgb` group is
/// malformed.
pub fn to_hex(text: &str) -> CanvasResult<HexColor> {
    if text.is_empty() {
        return Err(CanvasError::UnrecognizedColorFormat(String::new()));
    }
    if text.starts_with('#') {
        return Ok(HexColor(text.to_string()));
    }

    let unrecognized = || CanvasError::UnrecognizedColorFormat(text.to_string());
    // ASCII lowercasing keeps byte offsets intact.
    let lowered = text.to_ascii_lowercase();
    if !lowered.contains("rgb") {
        return Err(unrecognized());
    }

    let [r, g, b] = lowered
        .match_indices("rgb(")
        .find_map(|(start, _)| parse_rgb_components(&text[start + 4..]))
        .ok_or_else(unrecognized)?;

    Ok(HexColor(format!("#{r:02x}{g:02x}{b:02x}")))
}

/// Renders an [`Rgb`] value as `rgb(r, g, b)` text.
pub fn rgb_text(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

/// Parses `r,\s*g,\s*b)` following an `rgb(` prefix.
fn parse_rgb_components(rest: &str) -> Option<[u64; 3]> {
    let inner = &rest[..rest.find(')')?];
    let mut parts = inner.split(',');
    let mut out = [0u64; 3];
    for (index, slot) in out.iter_mut().enumerate() {
        let part = parts.next()?;
        // Whitespace is only allowed after a comma.
        let digits = if index == 0 { part } else { part.trim_start() };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        *slot = digits.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

// ============================================================================
// Predefined Colors
// ============================================================================

/// Background color of a cleared surface.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Initial drawing color.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// First preset swatch.
pub const RED: Rgb = Rgb::new(255, 0, 0);

/// Second preset swatch.
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
