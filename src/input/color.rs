//! Current/previous color tracking and the color panel.

use super::events::PickerColor;
use crate::draw::{BLACK, BLUE, HexColor, RED, Rgb};
use crate::error::CanvasResult;
use log::debug;

/// Color panel state: the active color, the one before it, preset swatches,
/// and the picker popup.
///
/// The picker reports colors continuously while open; the reported color only
/// becomes current when the picker closes.
#[derive(Debug, Clone)]
pub struct ColorSelection {
    current: Rgb,
    previous: Rgb,
    swatches: Vec<Rgb>,
    picker_open: bool,
    picker_color: Option<Rgb>,
}

impl Default for ColorSelection {
    fn default() -> Self {
        Self::new(BLACK, vec![RED, BLUE])
    }
}

impl ColorSelection {
    /// Starts with `initial` as both current and previous color.
    pub fn new(initial: Rgb, swatches: Vec<Rgb>) -> Self {
        Self {
            current: initial,
            previous: initial,
            swatches,
            picker_open: false,
            picker_color: None,
        }
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn previous(&self) -> Rgb {
        self.previous
    }

    pub fn current_hex(&self) -> HexColor {
        self.current.to_hex()
    }

    pub fn swatches(&self) -> &[Rgb] {
        &self.swatches
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Makes `color` current; the old current color becomes previous.
    pub fn set_current(&mut self, color: Rgb) {
        self.previous = self.current;
        self.current = color;
        debug!(
            "Current color {} (previous {})",
            self.current.to_hex(),
            self.previous.to_hex()
        );
    }

    /// Parses `color` and makes it current.
    pub fn set_current_hex(&mut self, color: &HexColor) -> CanvasResult<()> {
        let rgb = color.to_rgb()?;
        self.set_current(rgb);
        Ok(())
    }

    /// Swaps back to the previous color.
    pub fn choose_previous(&mut self) {
        self.set_current(self.previous);
    }

    /// Makes swatch `index` current. Unknown indices are ignored.
    pub fn choose_swatch(&mut self, index: usize) {
        match self.swatches.get(index).copied() {
            Some(color) => self.set_current(color),
            None => debug!("No swatch at index {}", index),
        }
    }

    /// Opens a closed picker, or closes (and commits) an open one.
    pub fn toggle_picker(&mut self) {
        if self.picker_open {
            self.close_picker();
        } else {
            self.picker_open = true;
            self.picker_color = Some(self.current);
        }
    }

    /// Closes the picker, committing its last reported color. No-op when closed.
    pub fn close_picker(&mut self) {
        if !self.picker_open {
            return;
        }
        self.picker_open = false;
        if let Some(color) = self.picker_color.take() {
            self.set_current(color);
        }
    }

    /// Records the color the picker currently shows.
    pub fn on_picker_change(&mut self, picked: &PickerColor) -> CanvasResult<()> {
        let rgb = HexColor::parse(&picked.hex)?.to_rgb()?;
        self.picker_color = Some(rgb);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use crate::input::events::Hsv;

    fn picked(hex: &str) -> PickerColor {
        PickerColor {
            hex: hex.to_string(),
            hsv: Hsv {
                h: 0.0,
                s: 0.0,
                v: 0.0,
            },
            rgb: (0.0, 0.0, 0.0),
        }
    }

    #[test]
    fn starts_black_with_two_swatches() {
        let colors = ColorSelection::default();
        assert_eq!(colors.current(), BLACK);
        assert_eq!(colors.previous(), BLACK);
        assert_eq!(colors.swatches(), &[RED, BLUE]);
    }

    #[test]
    fn set_current_shifts_previous() {
        let mut colors = ColorSelection::default();
        colors.set_current(RED);
        colors.set_current(BLUE);
        assert_eq!(colors.current(), BLUE);
        assert_eq!(colors.previous(), RED);

        colors.choose_previous();
        assert_eq!(colors.current(), RED);
        assert_eq!(colors.previous(), BLUE);
    }

    #[test]
    fn swatches_select_presets() {
        let mut colors = ColorSelection::default();
        colors.choose_swatch(1);
        assert_eq!(colors.current_hex().as_str(), "#0000ff");
        colors.choose_swatch(7);
        assert_eq!(colors.current(), BLUE);
    }

    #[test]
    fn picker_commits_on_close_only() {
        let mut colors = ColorSelection::default();
        colors.toggle_picker();
        assert!(colors.is_picker_open());

        colors.on_picker_change(&picked("#336699")).unwrap();
        assert_eq!(colors.current(), BLACK);

        colors.toggle_picker();
        assert!(!colors.is_picker_open());
        assert_eq!(colors.current(), Rgb::new(0x33, 0x66, 0x99));
        assert_eq!(colors.previous(), BLACK);

        // Closing an already closed picker changes nothing.
        colors.close_picker();
        assert_eq!(colors.previous(), BLACK);
    }

    #[test]
    fn picker_rejects_malformed_hex() {
        let mut colors = ColorSelection::default();
        colors.toggle_picker();
        assert!(matches!(
            colors.on_picker_change(&picked("teal")),
            Err(CanvasError::InvalidColorFormat(_))
        ));
        colors.close_picker();
        assert_eq!(colors.current(), BLACK);
    }
}
