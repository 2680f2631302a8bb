pub mod catalog;
pub mod controller;
pub mod domain;
pub mod error;
pub mod grid;
pub mod probe;
pub mod scanner;
pub mod settings;

use std::path::{Path, PathBuf};

pub use catalog::{Catalog, DEFAULT_EXTENSIONS, GROUP_CAPACITY};
pub use controller::{CatalogController, TagUpdate};
pub use domain::{Group, Image, Tag};
pub use error::{Error, Result};
pub use grid::{CellMetrics, GridCell, GridLayout};
pub use settings::Settings;

/// Callback events emitted while a folder scan runs, so a front-end can
/// draw progress without the core knowing about terminals or windows.
pub enum ScanProgress {
    FolderStart { folder: PathBuf, file_count: usize },
    FileAdded { path: PathBuf },
    Complete { added: usize },
}

/// The main entry point for the shoebox library: a catalog of images with
/// boolean tags and bounded groups.
pub struct Library {
    catalog: Catalog,
}

impl Library {
    /// Open or create the catalog database at the given path.
    pub fn open(catalog_path: &Path) -> Result<Self> {
        let catalog = Catalog::open(catalog_path)?;
        Ok(Self { catalog })
    }

    /// In-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let catalog = Catalog::open_in_memory()?;
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Scan a folder, reporting progress per file. Per-file failures are
    /// absorbed as unknown sizes; a missing folder scans zero files.
    /// Returns the number of newly catalogued images.
    pub fn scan_folder(
        &self,
        folder: &Path,
        extensions: Option<&[&str]>,
        mut progress: Option<&mut (dyn FnMut(ScanProgress) + '_)>,
    ) -> Result<usize> {
        let extensions = extensions.unwrap_or(DEFAULT_EXTENSIONS);
        let candidates = scanner::list_folder(folder, extensions);

        if let Some(ref mut cb) = progress {
            cb(ScanProgress::FolderStart {
                folder: folder.to_path_buf(),
                file_count: candidates.len(),
            });
        }

        let mut added = 0;
        for path in candidates {
            let (width, height) = probe::probe_file(&path);
            let (_, new) = self.catalog.add_image(&path, width, height)?;
            if new {
                added += 1;
            }
            if let Some(ref mut cb) = progress {
                cb(ScanProgress::FileAdded { path });
            }
        }

        if let Some(ref mut cb) = progress {
            cb(ScanProgress::Complete { added });
        }
        Ok(added)
    }

    /// All images with their tag sets.
    pub fn images(&self) -> Result<Vec<Image>> {
        self.catalog.list_images()
    }

    /// One image snapshot with its current tag set.
    pub fn image(&self, image_id: i64) -> Result<Image> {
        self.catalog.get_image(image_id)
    }

    pub fn remove_image(&self, image_id: i64) -> Result<()> {
        self.catalog.remove_image(image_id)
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        self.catalog.list_tags()
    }

    pub fn get_or_create_tag(&self, name: &str) -> Result<Tag> {
        self.catalog.get_or_create_tag(name)
    }

    pub fn find_tag(&self, name: &str) -> Result<Option<Tag>> {
        self.catalog.find_tag(name)
    }

    /// Attach or detach a tag on an image; idempotent either way.
    pub fn set_tag(&self, image_id: i64, tag_id: i64, present: bool) -> Result<()> {
        self.catalog.set_tag(image_id, tag_id, present)
    }

    pub fn create_group(&self, name: &str) -> Result<i64> {
        self.catalog.create_group(name)
    }

    pub fn groups(&self) -> Result<Vec<Group>> {
        self.catalog.list_groups()
    }

    pub fn find_group(&self, name: &str) -> Result<Option<Group>> {
        self.catalog.find_group(name)
    }

    pub fn add_to_group(&mut self, group_id: i64, image_id: i64) -> Result<()> {
        self.catalog.add_to_group(group_id, image_id)
    }

    pub fn remove_from_group(&self, group_id: i64, image_id: i64) -> Result<()> {
        self.catalog.remove_from_group(group_id, image_id)
    }

    pub fn group_images(&self, group_id: i64) -> Result<Vec<Image>> {
        self.catalog.list_group_images(group_id)
    }
}
