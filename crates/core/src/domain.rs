use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A boolean tag. Created on first use, never renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Snapshot of one catalogued image, including its current tag set.
///
/// Snapshots are copies: mutating one never touches the store. Tag
/// membership is compared by id; the names ride along for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub filepath: PathBuf,
    /// Pixel width, or 0 when the dimensions could not be determined.
    pub width: u32,
    /// Pixel height, or 0 when the dimensions could not be determined.
    pub height: u32,
    pub tags: Vec<Tag>,
}

impl Image {
    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// A named group of at most [`crate::catalog::GROUP_CAPACITY`] images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}
