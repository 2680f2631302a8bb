pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::debug;

use crate::domain::{Group, Image, Tag};
use crate::error::{Error, Result};
use crate::probe;
use crate::scanner;

/// Extensions admitted by a folder scan when the caller supplies no list.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif"];

/// Upper bound on group membership.
pub const GROUP_CAPACITY: usize = 10;

/// One row of the image JOIN queries: image columns plus an optional tag.
type ImageRow = (i64, String, u32, u32, Option<i64>, Option<String>);

/// SQLite-backed store for images, tags, and bounded groups.
///
/// The store exclusively owns the persisted entities; everything it hands
/// out is a snapshot. All access goes through one connection, so operations
/// are serialized.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open or create a catalog at the given path with WAL mode.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::initialize(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::initialize(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    // ── Images ───────────────────────────────────────────────────────

    /// Scan the immediate entries of `folder`, probing sizes and inserting
    /// new rows. Re-scanning is idempotent: already-catalogued paths are
    /// ignored. Returns the number of newly added images.
    pub fn scan_folder(&self, folder: &Path, extensions: Option<&[&str]>) -> Result<usize> {
        let extensions = extensions.unwrap_or(DEFAULT_EXTENSIONS);
        let mut added = 0;
        for path in scanner::list_folder(folder, extensions) {
            let (width, height) = probe::probe_file(&path);
            let (_, new) = self.add_image(&path, width, height)?;
            if new {
                added += 1;
            }
        }
        debug!(folder = %folder.display(), added, "folder scan finished");
        Ok(added)
    }

    /// Insert-or-ignore a single image row keyed by absolute path.
    /// Returns the row id and whether the row is new.
    pub fn add_image(&self, path: &Path, width: u32, height: u32) -> Result<(i64, bool)> {
        let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let path_str = abs.to_string_lossy();
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO images (filepath, width, height) VALUES (?1, ?2, ?3)",
            params![path_str.as_ref(), width, height],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM images WHERE filepath = ?1",
            params![path_str.as_ref()],
            |row| row.get(0),
        )?;
        Ok((id, changed > 0))
    }

    /// Fetch one image with its current tag set.
    pub fn get_image(&self, image_id: i64) -> Result<Image> {
        let (id, filepath, width, height) = self
            .conn
            .query_row(
                "SELECT id, filepath, width, height FROM images WHERE id = ?1",
                params![image_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, u32>(3)?,
                    ))
                },
            )
            .map_err(|_| Error::ImageNotFound(image_id))?;

        Ok(Image {
            id,
            filepath: PathBuf::from(filepath),
            width,
            height,
            tags: self.tags_for_image(id)?,
        })
    }

    /// All images with their tag sets, hydrated by a single JOIN rather
    /// than one tag query per image.
    pub fn list_images(&self) -> Result<Vec<Image>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.filepath, i.width, i.height, t.id, t.name
             FROM images i
             LEFT JOIN image_tags it ON it.image_id = i.id
             LEFT JOIN tags t ON t.id = it.tag_id
             ORDER BY i.id, t.name",
        )?;
        let rows = stmt
            .query_map([], row_to_image_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(collect_images(rows))
    }

    pub fn count_images(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete an image; the schema cascades away its tag and group links.
    pub fn remove_image(&self, image_id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM images WHERE id = ?1", params![image_id])?;
        if changed == 0 {
            return Err(Error::ImageNotFound(image_id));
        }
        Ok(())
    }

    // ── Tags ─────────────────────────────────────────────────────────

    /// Exact-match lookup by name, inserting on first use. Safe to call
    /// repeatedly: at most one row ever exists per name.
    pub fn get_or_create_tag(&self, name: &str) -> Result<Tag> {
        self.conn.execute(
            "INSERT OR IGNORE INTO tags (name) VALUES (?1)",
            params![name],
        )?;
        let tag = self.conn.query_row(
            "SELECT id, name FROM tags WHERE name = ?1",
            params![name],
            |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )?;
        Ok(tag)
    }

    pub fn find_tag(&self, name: &str) -> Result<Option<Tag>> {
        let tag = self
            .conn
            .query_row(
                "SELECT id, name FROM tags WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Tag {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .ok();
        Ok(tag)
    }

    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM tags ORDER BY name")?;
        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// Attach (`present = true`) or detach a tag on an image. Idempotent in
    /// both directions: a duplicate attach and a missing detach are no-ops.
    pub fn set_tag(&self, image_id: i64, tag_id: i64, present: bool) -> Result<()> {
        if present {
            self.conn.execute(
                "INSERT OR IGNORE INTO image_tags (image_id, tag_id) VALUES (?1, ?2)",
                params![image_id, tag_id],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM image_tags WHERE image_id = ?1 AND tag_id = ?2",
                params![image_id, tag_id],
            )?;
        }
        Ok(())
    }

    fn tags_for_image(&self, image_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.name
             FROM tags t
             JOIN image_tags it ON it.tag_id = t.id
             WHERE it.image_id = ?1
             ORDER BY t.name",
        )?;
        let tags = stmt
            .query_map(params![image_id], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    // ── Groups ───────────────────────────────────────────────────────

    /// Get-or-create a group by name, returning its id.
    pub fn create_group(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO groups (name) VALUES (?1)",
            params![name],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM groups WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub fn get_group(&self, group_id: i64) -> Result<Group> {
        self.conn
            .query_row(
                "SELECT id, name FROM groups WHERE id = ?1",
                params![group_id],
                |row| {
                    Ok(Group {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .map_err(|_| Error::GroupNotFound(group_id))
    }

    pub fn find_group(&self, name: &str) -> Result<Option<Group>> {
        let group = self
            .conn
            .query_row(
                "SELECT id, name FROM groups WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Group {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .ok();
        Ok(group)
    }

    pub fn list_groups(&self) -> Result<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM groups ORDER BY name")?;
        let groups = stmt
            .query_map([], |row| {
                Ok(Group {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    /// Add an image to a group, enforcing the membership cap. The count and
    /// insert run in one transaction so concurrent callers cannot both slip
    /// past a count of nine. A full group leaves the store untouched.
    pub fn add_to_group(&mut self, group_id: i64, image_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM group_images WHERE group_id = ?1",
            params![group_id],
            |row| row.get(0),
        )?;
        if count as usize >= GROUP_CAPACITY {
            return Err(Error::GroupFull(group_id));
        }
        tx.execute(
            "INSERT OR IGNORE INTO group_images (group_id, image_id) VALUES (?1, ?2)",
            params![group_id, image_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Remove an image from a group; a missing link is a no-op.
    pub fn remove_from_group(&self, group_id: i64, image_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM group_images WHERE group_id = ?1 AND image_id = ?2",
            params![group_id, image_id],
        )?;
        Ok(())
    }

    /// Images in the group, each with its tag set.
    pub fn list_group_images(&self, group_id: i64) -> Result<Vec<Image>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.filepath, i.width, i.height, t.id, t.name
             FROM images i
             JOIN group_images gi ON gi.image_id = i.id
             LEFT JOIN image_tags it ON it.image_id = i.id
             LEFT JOIN tags t ON t.id = it.tag_id
             WHERE gi.group_id = ?1
             ORDER BY i.id, t.name",
        )?;
        let rows = stmt
            .query_map(params![group_id], row_to_image_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(collect_images(rows))
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn row_to_image_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImageRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

/// Fold JOIN rows (ordered by image id) into image snapshots.
fn collect_images(rows: Vec<ImageRow>) -> Vec<Image> {
    let mut images: Vec<Image> = Vec::new();
    for (id, filepath, width, height, tag_id, tag_name) in rows {
        let new_image = images.last().map(|img| img.id) != Some(id);
        if new_image {
            images.push(Image {
                id,
                filepath: PathBuf::from(filepath),
                width,
                height,
                tags: Vec::new(),
            });
        }
        if let (Some(tid), Some(tname)) = (tag_id, tag_name) {
            if let Some(image) = images.last_mut() {
                image.tags.push(Tag {
                    id: tid,
                    name: tname,
                });
            }
        }
    }
    images
}
