//! Glue between the catalog store, the grid layout, and a rendering
//! front-end. Owns the folder settings and the current selection; the
//! actual painting and input handling live behind whatever surface calls
//! this.

use std::path::{Path, PathBuf};

use crate::domain::Image;
use crate::error::Result;
use crate::grid::{CellMetrics, GridCell, GridLayout};
use crate::settings::Settings;
use crate::{Library, ScanProgress};

/// Outcome of a tag toggle: the refreshed snapshot for the detail view and,
/// when the image is currently in the grid, the one cell to repaint.
#[derive(Debug)]
pub struct TagUpdate {
    pub image: Image,
    pub cell: Option<GridCell>,
}

pub struct CatalogController {
    library: Library,
    settings: Settings,
    settings_path: PathBuf,
    grid: GridLayout<Image>,
    metrics: CellMetrics,
    selection: Option<usize>,
}

impl CatalogController {
    /// Load settings and, when folders are already registered, populate the
    /// grid from the catalog. A first run starts with an empty grid.
    pub fn new(library: Library, settings_path: &Path, metrics: CellMetrics) -> Result<Self> {
        let settings = Settings::load(settings_path)?;
        let mut controller = Self {
            library,
            settings,
            settings_path: settings_path.to_path_buf(),
            grid: GridLayout::new(),
            metrics,
            selection: None,
        };
        if !controller.settings.folders.is_empty() {
            controller.reload()?;
        }
        Ok(controller)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn grid(&self) -> &GridLayout<Image> {
        &self.grid
    }

    pub fn folders(&self) -> Vec<PathBuf> {
        self.settings.folder_paths()
    }

    /// Refresh the grid from the store. A structural reset: the selection
    /// is cleared.
    pub fn reload(&mut self) -> Result<()> {
        let images = self.library.images()?;
        self.grid.set_items(images);
        self.selection = None;
        Ok(())
    }

    /// Register a folder, persist the settings, scan it, and reload the
    /// grid. Returns the number of newly catalogued images.
    pub fn add_folder(
        &mut self,
        folder: &Path,
        progress: Option<&mut dyn FnMut(ScanProgress)>,
    ) -> Result<usize> {
        let added = self.library.scan_folder(folder, None, progress)?;
        self.settings.add_folder(folder.to_path_buf());
        self.settings.mark_scanned(folder);
        self.settings.save(&self.settings_path)?;
        self.reload()?;
        Ok(added)
    }

    /// Re-scan every registered folder, picking up files added on disk.
    pub fn rescan(
        &mut self,
        mut progress: Option<&mut dyn FnMut(ScanProgress)>,
    ) -> Result<usize> {
        let mut added = 0;
        for folder in self.settings.folder_paths() {
            added += self
                .library
                .scan_folder(&folder, None, progress.as_deref_mut())?;
            self.settings.mark_scanned(&folder);
        }
        self.settings.save(&self.settings_path)?;
        self.reload()?;
        Ok(added)
    }

    /// Viewport resize: re-derive the column count from the cell width.
    /// Returns `true` on a structural reset, which clears the selection.
    pub fn resize(&mut self, viewport_width: i32) -> bool {
        let reset = self
            .grid
            .recompute_columns(viewport_width, self.metrics.cell_width() as i32);
        if reset {
            self.selection = None;
        }
        reset
    }

    pub fn select(&mut self, position: usize) -> Option<&Image> {
        if position >= self.grid.len() {
            return None;
        }
        self.selection = Some(position);
        self.grid.item_at(position)
    }

    pub fn selected(&self) -> Option<&Image> {
        self.grid.item_at(self.selection?)
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selection
    }

    /// Directional navigation by whole columns, without wrapping rows.
    pub fn move_selection(&mut self, delta_columns: isize) -> Option<usize> {
        let next = self.grid.move_selection(self.selection?, delta_columns)?;
        self.selection = Some(next);
        Some(next)
    }

    /// Toggle a tag and hand back the refreshed snapshot plus the single
    /// grid cell to repaint. The grid's copy of the image is updated in
    /// place, so this is not a structural reset.
    pub fn toggle_tag(&mut self, image_id: i64, tag_id: i64, present: bool) -> Result<TagUpdate> {
        self.library.set_tag(image_id, tag_id, present)?;
        let image = self.library.image(image_id)?;

        let position = self.grid.items().iter().position(|img| img.id == image_id);
        let cell = match position {
            Some(pos) => {
                self.grid.replace_item(pos, image.clone());
                self.grid.notify_item_changed(pos)
            }
            None => None,
        };
        Ok(TagUpdate { image, cell })
    }
}
