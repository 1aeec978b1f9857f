//! Application context tying the canvas, color panel, tool palette, and
//! snapshot store together.

use super::color::ColorSelection;
use super::events::{PickerColor, PointerEvent};
use super::tool::{Tool, ToolSelection, apply_tool};
use crate::config::{Config, GridDensity};
use crate::draw::{PixelCanvas, Surface};
use crate::error::{CanvasError, CanvasResult};
use crate::session::{self, Snapshot, SnapshotStore, StoredFormat};
use anyhow::Result;
use log::{debug, info, warn};

/// What happened to the persisted drawing at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing was stored.
    Blank,
    /// The stored drawing was painted at the given density.
    Restored(GridDensity),
    /// The stored drawing was unusable. Undecodable data is removed; data the
    /// store refused to read is replaced by the next save.
    Discarded,
}

/// Everything a host needs to drive the widget, constructed once.
///
/// Hosts forward surface clicks to [`CanvasState::on_click`], pointer motion
/// over the surface to [`CanvasState::on_pointer_move`], and palette/panel
/// buttons to the matching methods.
pub struct CanvasState<S: Surface> {
    canvas: PixelCanvas<S>,
    pub colors: ColorSelection,
    tools: ToolSelection,
    density: GridDensity,
    store: Box<dyn SnapshotStore>,
    key: String,
    last_saved: Option<Snapshot>,
}

impl<S: Surface> CanvasState<S> {
    /// Builds the context and restores any stored drawing.
    pub fn new(config: &Config, surface: S, store: Box<dyn SnapshotStore>) -> Self {
        let density = config.canvas.default_density;
        let canvas =
            PixelCanvas::with_background(surface, density.dimension(), config.background_rgb());

        let mut state = Self {
            canvas,
            colors: ColorSelection::new(config.initial_rgb(), config.swatch_rgbs()),
            tools: ToolSelection::default(),
            density,
            store,
            key: config.storage.key.clone(),
            last_saved: None,
        };
        state.restore();
        state
    }

    pub fn canvas(&self) -> &PixelCanvas<S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PixelCanvas<S> {
        &mut self.canvas
    }

    pub fn density(&self) -> GridDensity {
        self.density
    }

    pub fn active_tool(&self) -> Tool {
        self.tools.active()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select(tool);
    }

    /// Switches grid density, clearing the drawing.
    pub fn set_density(&mut self, density: GridDensity) {
        info!("Switching grid to {}", density);
        self.density = density;
        self.canvas.set_dimension(density.dimension());
    }

    /// Clears the whole surface to the background color.
    pub fn clear(&mut self) {
        self.canvas.clear_all();
    }

    /// Click on the surface: runs the active tool.
    pub fn on_click(&mut self, event: PointerEvent) -> CanvasResult<()> {
        apply_tool(self.tools.active(), event, &mut self.canvas, &mut self.colors)
    }

    /// Pointer moved over the surface: closes the picker and persists the drawing.
    pub fn on_pointer_move(&mut self) -> Result<()> {
        self.colors.close_picker();
        self.persist()
    }

    /// Forwards a picker report to the color panel.
    pub fn on_picker_change(&mut self, picked: &PickerColor) -> CanvasResult<()> {
        self.colors.on_picker_change(picked)
    }

    /// Captures the drawing and writes it to the store.
    ///
    /// Identical consecutive snapshots are written once.
    pub fn persist(&mut self) -> Result<()> {
        let snapshot = self.canvas.snapshot()?;
        if self.last_saved.as_ref() == Some(&snapshot) {
            return Ok(());
        }

        let encoded = session::encode(&snapshot)?;
        self.store.save(&self.key, &encoded)?;
        debug!("Persisted {0}x{0} drawing", snapshot.dimension());
        self.last_saved = Some(snapshot);
        Ok(())
    }

    /// Paints the stored drawing, if any, switching to its density first.
    ///
    /// Corrupt data and unsupported dimensions are removed from the store and
    /// leave a blank surface. Legacy data without a dimension field is only
    /// applied when it matches the current density.
    pub fn restore(&mut self) -> RestoreOutcome {
        let stored = match self.store.load(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return RestoreOutcome::Blank,
            Err(err) => {
                warn!(
                    "Failed to read stored drawing, starting blank: {:#}",
                    err
                );
                return RestoreOutcome::Discarded;
            }
        };

        match self.apply_stored(&stored) {
            Ok(density) => {
                info!("Restored {} drawing", density);
                RestoreOutcome::Restored(density)
            }
            Err(err) => {
                warn!("Discarding stored drawing: {}", err);
                self.canvas.clear_all();
                if let Err(err) = self.store.remove(&self.key) {
                    warn!("Failed to remove stored drawing: {:#}", err);
                }
                RestoreOutcome::Discarded
            }
        }
    }

    fn apply_stored(&mut self, stored: &str) -> CanvasResult<GridDensity> {
        let (snapshot, format) = session::decode_with_format(stored)?;
        let mismatch = CanvasError::DimensionMismatch {
            expected: self.density.dimension(),
            found: snapshot.dimension(),
        };
        let density = match format {
            StoredFormat::Versioned => {
                GridDensity::from_dimension(snapshot.dimension()).ok_or(mismatch)?
            }
            // Without a dimension field only the current density is trusted.
            StoredFormat::Legacy if snapshot.dimension() == self.density.dimension() => {
                self.density
            }
            StoredFormat::Legacy => return Err(mismatch),
        };

        if density != self.density {
            self.set_density(density);
        }
        self.canvas.restore(&snapshot)?;
        self.last_saved = Some(snapshot);
        Ok(density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, CairoSurface, RED, Rgb, WHITE};
    use crate::session::{FileStore, MemoryStore, SessionOptions, encode};

    /// Store handle whose contents stay inspectable after being boxed.
    #[derive(Clone, Default)]
    struct SharedStore(std::rc::Rc<std::cell::RefCell<MemoryStore>>);

    impl SnapshotStore for SharedStore {
        fn load(&self, key: &str) -> Result<Option<String>> {
            self.0.borrow().load(key)
        }
        fn save(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.borrow_mut().save(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<bool> {
            self.0.borrow_mut().remove(key)
        }
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.canvas.surface_size = 128;
        config
    }

    fn state_with(store: &SharedStore) -> CanvasState<CairoSurface> {
        let config = small_config();
        let surface = CairoSurface::new(config.canvas.surface_size).unwrap();
        CanvasState::new(&config, surface, Box::new(store.clone()))
    }

    fn stored(store: &SharedStore) -> Option<String> {
        store.load("canvasData").unwrap()
    }

    #[test]
    fn starts_blank_without_stored_drawing() {
        let store = SharedStore::default();
        let mut state = state_with(&store);
        assert_eq!(state.density(), GridDensity::Coarse);
        assert_eq!(state.active_tool(), Tool::Pencil);
        assert_eq!(state.canvas_mut().read_color_at(5, 5).unwrap(), WHITE.to_hex());
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn pointer_move_persists_and_reload_restores() {
        let store = SharedStore::default();
        let mut state = state_with(&store);
        state.colors.set_current(RED);
        state.on_click(PointerEvent::new(40, 100)).unwrap();
        state.on_pointer_move().unwrap();

        let first = session::capture(state.canvas_mut()).unwrap();
        assert!(stored(&store).is_some());

        let mut reloaded = state_with(&store);
        assert_eq!(session::capture(reloaded.canvas_mut()).unwrap(), first);
        assert_eq!(
            reloaded.canvas_mut().read_color_at(32, 96).unwrap(),
            RED.to_hex()
        );
    }

    #[test]
    fn unchanged_drawing_is_not_rewritten() {
        let store = SharedStore::default();
        let mut state = state_with(&store);
        state.on_pointer_move().unwrap();
        let first = stored(&store).unwrap();

        // A different payload in the store proves the second move skipped the write.
        store.0.borrow_mut().save("canvasData", "marker").unwrap();
        state.on_pointer_move().unwrap();
        assert_eq!(stored(&store).as_deref(), Some("marker"));

        state.on_click(PointerEvent::new(0, 0)).unwrap();
        state.colors.set_current(BLUE);
        state.on_click(PointerEvent::new(0, 0)).unwrap();
        state.on_pointer_move().unwrap();
        assert_ne!(stored(&store).unwrap(), first);
    }

    #[test]
    fn restore_switches_to_stored_density() {
        let store = SharedStore::default();
        {
            let mut state = state_with(&store);
            state.set_density(GridDensity::Fine);
            state.colors.set_current(BLUE);
            state.on_click(PointerEvent::new(127, 127)).unwrap();
            state.on_pointer_move().unwrap();
        }

        let mut state = state_with(&store);
        assert_eq!(state.restore(), RestoreOutcome::Restored(GridDensity::Fine));
        assert_eq!(state.density(), GridDensity::Fine);
        assert_eq!(state.canvas().grid().cell_size(), 4);
        assert_eq!(state.canvas_mut().read_color_at(124, 124).unwrap(), BLUE.to_hex());
        assert_eq!(state.canvas_mut().read_color_at(123, 124).unwrap(), WHITE.to_hex());
    }

    #[test]
    fn corrupt_stored_drawing_is_discarded() {
        let store = SharedStore::default();
        store.0.borrow_mut().save("canvasData", "{ nope").unwrap();

        let mut state = state_with(&store);
        assert_eq!(stored(&store), None);
        assert_eq!(state.canvas_mut().read_color_at(0, 0).unwrap(), WHITE.to_hex());
    }

    #[test]
    fn unsupported_dimension_is_discarded() {
        let store = SharedStore::default();
        let rows = vec![vec![RED.to_hex(); 8]; 8];
        let snapshot = Snapshot::from_rows(rows).unwrap();
        store
            .0
            .borrow_mut()
            .save("canvasData", &encode(&snapshot).unwrap())
            .unwrap();

        let mut state = state_with(&store);
        assert_eq!(state.density(), GridDensity::Coarse);
        assert_eq!(stored(&store), None);
        assert_eq!(state.canvas_mut().read_color_at(0, 0).unwrap(), WHITE.to_hex());
        assert_eq!(state.restore(), RestoreOutcome::Blank);
    }

    #[test]
    fn legacy_drawing_of_current_density_is_restored() {
        let store = SharedStore::default();
        let mut rows = vec![vec![WHITE.to_hex(); 4]; 4];
        rows[0][1] = RED.to_hex();
        let legacy = serde_json::to_string(
            &rows
                .iter()
                .map(|row| row.iter().map(|c| c.as_str()).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        )
        .unwrap();
        store.0.borrow_mut().save("canvasData", &legacy).unwrap();

        let mut state = state_with(&store);
        assert_eq!(state.density(), GridDensity::Coarse);
        assert_eq!(state.canvas_mut().read_color_at(32, 0).unwrap(), RED.to_hex());
        assert!(stored(&store).is_some());
    }

    #[test]
    fn legacy_drawing_of_other_density_is_discarded() {
        let store = SharedStore::default();
        let rows = vec![vec!["#ff0000"; 32]; 32];
        store
            .0
            .borrow_mut()
            .save("canvasData", &serde_json::to_string(&rows).unwrap())
            .unwrap();

        let mut state = state_with(&store);
        assert_eq!(state.density(), GridDensity::Coarse);
        assert_eq!(stored(&store), None);
        assert_eq!(state.canvas_mut().read_color_at(0, 0).unwrap(), WHITE.to_hex());
    }

    #[test]
    fn oversized_stored_file_is_reported_and_replaced() {
        let temp = tempfile::tempdir().unwrap();
        let mut options = SessionOptions::new(temp.path().to_path_buf(), "canvasData");
        options.max_file_size_bytes = 64;
        std::fs::write(options.snapshot_file_path(), "x".repeat(65)).unwrap();

        let config = small_config();
        let surface = CairoSurface::new(config.canvas.surface_size).unwrap();
        let mut state =
            CanvasState::new(&config, surface, Box::new(FileStore::new(options.clone())));
        assert_eq!(state.restore(), RestoreOutcome::Discarded);
        assert_eq!(state.canvas_mut().read_color_at(0, 0).unwrap(), WHITE.to_hex());
        assert!(options.snapshot_file_path().exists());
    }

    #[test]
    fn resize_clears_before_next_persist() {
        let store = SharedStore::default();
        let mut state = state_with(&store);
        state.select_tool(Tool::Fill);
        state.on_click(PointerEvent::new(1, 1)).unwrap();
        state.set_density(GridDensity::Fine);
        state.on_pointer_move().unwrap();

        let snapshot = session::decode(&stored(&store).unwrap()).unwrap();
        assert_eq!(snapshot.dimension(), 32);
        assert!(
            snapshot
                .rows()
                .iter()
                .flatten()
                .all(|color| *color == WHITE.to_hex())
        );
    }

    #[test]
    fn pointer_move_closes_picker() {
        let store = SharedStore::default();
        let mut state = state_with(&store);
        state.colors.toggle_picker();
        state
            .on_picker_change(&PickerColor {
                hex: "#808000".to_string(),
                hsv: crate::input::events::Hsv {
                    h: 60.0,
                    s: 1.0,
                    v: 0.5,
                },
                rgb: (128.0, 128.0, 0.0),
            })
            .unwrap();
        state.on_pointer_move().unwrap();

        assert!(!state.colors.is_picker_open());
        assert_eq!(state.colors.current(), Rgb::new(128, 128, 0));
    }
}
