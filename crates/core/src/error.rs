use crate::catalog::GROUP_CAPACITY;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("image not found: {0}")]
    ImageNotFound(i64),

    #[error("group not found: {0}")]
    GroupNotFound(i64),

    #[error("group {0} already holds {GROUP_CAPACITY} images (maximum reached)")]
    GroupFull(i64),

    #[error("catalog schema version {db} is newer than this build supports ({code})")]
    SchemaTooNew { db: i64, code: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
