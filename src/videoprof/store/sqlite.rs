use super::{CacheEntry, CacheStore};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS videos (
    filename varchar PRIMARY KEY,
    size integer,
    modified real,
    tracks text
)";

/// SQLite backed cache, one row per file in the `videos` table.
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`, creating missing parent
    /// directories and the `videos` table.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                fs::create_dir_all(dir)?;
            }
        }

        let connection = Connection::open(path)?;
        Self::init(connection)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self> {
        // Other processes may hold the write lock on a shared cache file.
        connection.busy_timeout(BUSY_TIMEOUT)?;
        connection.execute(CREATE_TABLE, [])?;
        Ok(Self { connection })
    }
}

impl CacheStore for SqliteStore {
    fn get(&self, filename: &str) -> Result<Option<CacheEntry>> {
        let entry = self
            .connection
            .query_row(
                "SELECT filename, size, modified, tracks FROM videos WHERE filename = ?1",
                params![filename],
                |row| {
                    let size: i64 = row.get(1)?;
                    Ok(CacheEntry {
                        filename: row.get(0)?,
                        size: u64::try_from(size).unwrap_or_default(),
                        modified: row.get(2)?,
                        tracks: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn put(&mut self, entry: &CacheEntry) -> Result<()> {
        // size, modified and tracks change together or not at all.
        let tx = self.connection.transaction()?;
        tx.execute(
            "INSERT INTO videos (filename, size, modified, tracks) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(filename) DO UPDATE SET
                size = excluded.size,
                modified = excluded.modified,
                tracks = excluded.tracks",
            params![
                entry.filename,
                i64::try_from(entry.size).unwrap_or(i64::MAX),
                entry.modified,
                entry.tracks
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}
