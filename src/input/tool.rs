//! Drawing tool selection and dispatch.

use super::color::ColorSelection;
use super::events::PointerEvent;
use crate::draw::{PixelCanvas, Surface};
use crate::error::CanvasResult;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what a click on the surface does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paints the clicked cell with the current color (default)
    #[default]
    Pencil,
    /// Paints the whole surface with the current color
    Fill,
    /// Makes the clicked pixel's color current
    Eyedropper,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pencil, Tool::Fill, Tool::Eyedropper];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Fill => "fill",
            Self::Eyedropper => "eyedropper",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pencil" => Ok(Self::Pencil),
            "fill" | "bucket" => Ok(Self::Fill),
            "eyedropper" | "picker" => Ok(Self::Eyedropper),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

/// The single active tool in the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolSelection {
    active: Tool,
}

impl ToolSelection {
    pub fn active(&self) -> Tool {
        self.active
    }

    /// Replaces the active tool.
    pub fn select(&mut self, tool: Tool) {
        if self.active != tool {
            debug!("Tool changed: {} -> {}", self.active, tool);
        }
        self.active = tool;
    }
}

/// Runs `tool` for a click at `event`.
///
/// Only the eyedropper can fail, when the surface pixel cannot be read.
pub fn apply_tool<S: Surface>(
    tool: Tool,
    event: PointerEvent,
    canvas: &mut PixelCanvas<S>,
    colors: &mut ColorSelection,
) -> CanvasResult<()> {
    match tool {
        Tool::Pencil => canvas.paint_cell(event.x, event.y, colors.current()),
        Tool::Fill => canvas.fill_all(colors.current()),
        Tool::Eyedropper => {
            let sampled = canvas.read_color_at(event.x, event.y)?;
            colors.set_current_hex(&sampled)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CairoSurface, RED, Rgb, WHITE};

    fn setup() -> (PixelCanvas<CairoSurface>, ColorSelection) {
        let canvas = PixelCanvas::new(CairoSurface::new(128).unwrap(), 4);
        let mut colors = ColorSelection::default();
        colors.set_current(RED);
        (canvas, colors)
    }

    #[test]
    fn pencil_paints_one_cell() {
        let (mut canvas, mut colors) = setup();
        apply_tool(Tool::Pencil, PointerEvent::new(40, 40), &mut canvas, &mut colors).unwrap();

        assert_eq!(canvas.read_color_at(32, 32).unwrap(), RED.to_hex());
        assert_eq!(canvas.read_color_at(0, 0).unwrap(), WHITE.to_hex());
    }

    #[test]
    fn fill_paints_everything() {
        let (mut canvas, mut colors) = setup();
        apply_tool(Tool::Fill, PointerEvent::new(0, 0), &mut canvas, &mut colors).unwrap();

        assert_eq!(canvas.read_color_at(127, 0).unwrap(), RED.to_hex());
        assert_eq!(canvas.read_color_at(64, 127).unwrap(), RED.to_hex());
    }

    #[test]
    fn eyedropper_picks_pixel_color() {
        let (mut canvas, mut colors) = setup();
        canvas.paint_cell(100, 100, Rgb::new(10, 20, 30));

        apply_tool(Tool::Eyedropper, PointerEvent::new(97, 127), &mut canvas, &mut colors)
            .unwrap();
        assert_eq!(colors.current(), Rgb::new(10, 20, 30));
        assert_eq!(colors.previous(), RED);
    }

    #[test]
    fn selection_defaults_to_pencil() {
        let mut tools = ToolSelection::default();
        assert_eq!(tools.active(), Tool::Pencil);
        tools.select(Tool::Eyedropper);
        assert_eq!(tools.active(), Tool::Eyedropper);
    }

    #[test]
    fn tool_names_parse() {
        for tool in Tool::ALL {
            assert_eq!(tool.name().parse::<Tool>(), Ok(tool));
        }
        assert!("transform".parse::<Tool>().is_err());
    }
}
