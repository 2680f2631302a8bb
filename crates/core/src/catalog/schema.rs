use rusqlite::{params, Connection};

use crate::error::{Error, Result};

/// Version written to fresh catalogs; bump alongside new migrations.
pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS images (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            filepath TEXT NOT NULL UNIQUE,
            width    INTEGER NOT NULL DEFAULT 0,
            height   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS tags (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS image_tags (
            image_id INTEGER NOT NULL REFERENCES images(id) ON DELETE CASCADE,
            tag_id   INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (image_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_image_tags_tag ON image_tags(tag_id);

        CREATE TABLE IF NOT EXISTS groups (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS group_images (
            group_id INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
            image_id INTEGER NOT NULL REFERENCES images(id) ON DELETE CASCADE,
            PRIMARY KEY (group_id, image_id)
        );

        CREATE INDEX IF NOT EXISTS idx_group_images_image ON group_images(image_id);

        CREATE TABLE IF NOT EXISTS config (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Stamp fresh catalogs with the current schema version and refuse to open
/// catalogs written by a newer build. Idempotent.
pub fn migrate(conn: &Connection) -> Result<()> {
    let db_version: Option<String> = conn
        .query_row(
            "SELECT value FROM config WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .ok();

    match db_version {
        None => {
            conn.execute(
                "INSERT INTO config (key, value) VALUES ('schema_version', ?1)",
                params![SCHEMA_VERSION.to_string()],
            )?;
            Ok(())
        }
        Some(raw) => {
            let db = raw.parse::<i64>().unwrap_or(0);
            if db > SCHEMA_VERSION {
                return Err(Error::SchemaTooNew {
                    db,
                    code: SCHEMA_VERSION,
                });
            }
            Ok(())
        }
    }
}
