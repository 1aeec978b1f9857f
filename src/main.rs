use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pixelcanvas::Config;
use pixelcanvas::draw::CairoSurface;
use pixelcanvas::input::CanvasState;
use pixelcanvas::session::{self, FileStore, SessionOptions, SnapshotStore};
use std::fs;
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PIXELCANVAS_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "pixelcanvas")]
#[command(version = VERSION, about = "Pixel-art drawing canvas with a persistent grid")]
struct Cli {
    /// Show where the drawing is stored and what it contains
    #[arg(long, action = ArgAction::SetTrue)]
    info: bool,

    /// Remove the stored drawing
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "replay")]
    clear: bool,

    /// Print the stored drawing as rows of hex colors
    #[arg(long, action = ArgAction::SetTrue)]
    print: bool,

    /// Replay pointer events from a script against the stored drawing
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if !(cli.info || cli.clear || cli.print || cli.replay.is_some()) {
        print_usage();
        return Ok(());
    }

    let config = Config::load()?;
    let options = session::options_from_config(&config.storage)?;

    if cli.clear {
        let outcome = session::clear_snapshot(&options)?;
        if outcome.removed_snapshot {
            println!("Removed stored drawing {}", options.snapshot_file_path().display());
        } else {
            println!("No stored drawing to remove");
        }
    }

    if let Some(script_path) = &cli.replay {
        replay(&config, &options, script_path)?;
    }

    if cli.info {
        print_info(&options)?;
    }

    if cli.print {
        print_drawing(&options)?;
    }

    Ok(())
}

fn replay(config: &Config, options: &SessionOptions, script_path: &Path) -> Result<()> {
    let script = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;

    let surface = CairoSurface::new(config.canvas.surface_size)?;
    let store = FileStore::new(options.clone());
    let mut state = CanvasState::new(config, surface, Box::new(store));

    let count = pixelcanvas::replay::run_script(&mut state, &script)?;
    log::info!("Replayed {} commands from {}", count, script_path.display());

    println!(
        "Replayed {} commands: grid {}, tool {}, color {}",
        count,
        state.density(),
        state.active_tool(),
        state.colors.current_hex()
    );
    Ok(())
}

fn print_info(options: &SessionOptions) -> Result<()> {
    let inspection = session::inspect_snapshot(options)?;

    println!("Snapshot file: {}", inspection.path.display());
    if !inspection.exists {
        println!("  no stored drawing");
        return Ok(());
    }

    if let Some(size) = inspection.size_bytes {
        println!("  size: {} bytes", size);
    }
    if let Some(modified) = inspection.modified {
        let local: chrono::DateTime<chrono::Local> = modified.into();
        println!("  modified: {}", local.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("  compressed: {}", if inspection.compressed { "yes" } else { "no" });
    match inspection.dimension {
        Some(dimension) => println!("  grid: {0}x{0}", dimension),
        None if inspection.corrupt => println!("  grid: unreadable (corrupt data)"),
        None => println!("  grid: unknown"),
    }
    Ok(())
}

fn print_drawing(options: &SessionOptions) -> Result<()> {
    let store = FileStore::new(options.clone());
    let Some(text) = store.load(&options.key)? else {
        println!("No stored drawing");
        return Ok(());
    };

    let snapshot = session::decode(&text)?;
    for row in snapshot.rows() {
        let line: Vec<&str> = row.iter().map(|color| color.as_str()).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn print_usage() {
    println!("pixelcanvas: Pixel-art drawing canvas with a persistent grid");
    println!();
    println!("Usage:");
    println!("  pixelcanvas --info            Show the stored drawing's location and grid");
    println!("  pixelcanvas --print           Print the stored drawing as hex colors");
    println!("  pixelcanvas --clear           Remove the stored drawing");
    println!("  pixelcanvas --replay FILE     Replay scripted pointer events");
    println!("  pixelcanvas --help            Show help");
    println!();
    println!("Script commands (one per line):");
    println!("  tool pencil|fill|eyedropper   density 4x4|32x32");
    println!("  color #rrggbb                 swatch N | previous");
    println!("  picker | pick #rrggbb         click X Y | move | clear");
    println!();
    println!("The drawing is saved on every 'move' to $XDG_DATA_HOME/pixelcanvas.");
}
