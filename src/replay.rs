//! Scripted event replay for driving the canvas without a UI.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! density 32x32
//! tool pencil
//! color #ff8800
//! click 40 12
//! move
//! ```

use crate::config::GridDensity;
use crate::draw::{HexColor, Surface};
use crate::input::{CanvasState, Hsv, PickerColor, PointerEvent, Tool};
use anyhow::{Context, Result, anyhow};
use log::debug;
use std::str::FromStr;

/// A single host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Density(GridDensity),
    Color(HexColor),
    Swatch(usize),
    Previous,
    TogglePicker,
    Pick(String),
    Click(PointerEvent),
    Move,
    Clear,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let mut arg = |name: &str| {
            words
                .next()
                .ok_or_else(|| anyhow!("'{}' expects {}", verb, name))
        };

        let command = match verb.to_lowercase().as_str() {
            "tool" => Command::Tool(arg("a tool name")?.parse().map_err(|e: String| anyhow!(e))?),
            "density" => {
                Command::Density(arg("4x4 or 32x32")?.parse().map_err(|e: String| anyhow!(e))?)
            }
            "color" => Command::Color(HexColor::parse(arg("a hex color")?)?),
            "swatch" => Command::Swatch(arg("a swatch index")?.parse()?),
            "previous" => Command::Previous,
            "picker" => Command::TogglePicker,
            "pick" => Command::Pick(arg("a hex color")?.to_string()),
            "click" => {
                let x = arg("x and y")?.parse()?;
                let y = arg("x and y")?.parse()?;
                Command::Click(PointerEvent::new(x, y))
            }
            "move" => Command::Move,
            "clear" => Command::Clear,
            other => return Err(anyhow!("unknown command '{}'", other)),
        };
        Ok(command)
    }
}

/// Parses a whole script, reporting the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            line.parse::<Command>()
                .with_context(|| format!("line {}: {}", number, line))
        })
        .collect()
}

/// Feeds one command to the canvas.
pub fn dispatch<S: Surface>(state: &mut CanvasState<S>, command: &Command) -> Result<()> {
    debug!("Replaying {:?}", command);
    match command {
        Command::Tool(tool) => state.select_tool(*tool),
        Command::Density(density) => state.set_density(*density),
        Command::Color(color) => state.colors.set_current_hex(color)?,
        Command::Swatch(index) => state.colors.choose_swatch(*index),
        Command::Previous => state.colors.choose_previous(),
        Command::TogglePicker => state.colors.toggle_picker(),
        Command::Pick(hex) => state.on_picker_change(&PickerColor {
            hex: hex.clone(),
            hsv: Hsv {
                h: 0.0,
                s: 0.0,
                v: 0.0,
            },
            rgb: (0.0, 0.0, 0.0),
        })?,
        Command::Click(event) => state.on_click(*event)?,
        Command::Move => state.on_pointer_move()?,
        Command::Clear => state.clear(),
    }
    Ok(())
}

/// Parses and runs `text`, returning the number of commands executed.
pub fn run_script<S: Surface>(state: &mut CanvasState<S>, text: &str) -> Result<usize> {
    let commands = parse_script(text)?;
    for command in &commands {
        dispatch(state, command)?;
    }
    Ok(commands.len())
}
