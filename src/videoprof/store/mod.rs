//! # Metadata Cache
//!
//! Extracting metadata is the slow part of a run, so the track list of every
//! analyzed file is memoized in a [`CacheStore`], keyed by the file's
//! absolute path and validated against its size and modification time.
//!
//! ## Coherence Rules
//!
//! [`get_tracks`] implements the whole policy:
//!
//! - no row for the file: extract, insert, return
//! - row with a different size or mtime: extract, overwrite, return
//! - otherwise: return the stored tracks without extracting
//!
//! Extraction errors propagate untouched and leave the store unchanged.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: durable store, one row per file in a `videos`
//!   table, each write a single transaction
//! - [`memory::InMemoryStore`]: `HashMap` backed store for tests

use crate::error::Result;
use crate::tracks::TrackList;
use tracing::{debug, warn};

pub mod memory;
pub mod sqlite;

/// One cached file. `tracks` holds the JSON encoded [`TrackList`].
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub filename: String,
    pub size: u64,
    pub modified: f64,
    pub tracks: String,
}

/// Durable key-value storage for cache entries.
pub trait CacheStore {
    fn get(&self, filename: &str) -> Result<Option<CacheEntry>>;

    /// Insert the entry, replacing any row with the same filename.
    fn put(&mut self, entry: &CacheEntry) -> Result<()>;
}

pub fn get_tracks<S, F>(
    store: &mut S,
    filename: &str,
    size: u64,
    modified: f64,
    extract: F,
) -> Result<TrackList>
where
    S: CacheStore + ?Sized,
    F: FnOnce() -> Result<TrackList>,
{
    match store.get(filename)? {
        None => debug!(filename = %filename, "cache miss"),
        Some(entry) if entry.size != size || entry.modified != modified => {
            debug!(filename = %filename, "cache stale");
        }
        Some(entry) => match serde_json::from_str(&entry.tracks) {
            Ok(tracks) => {
                debug!(filename = %filename, "cache hit");
                return Ok(tracks);
            }
            Err(e) => warn!(filename = %filename, "discarding undecodable cache entry: {}", e),
        },
    }

    let tracks = extract()?;
    store.put(&CacheEntry {
        filename: filename.to_string(),
        size,
        modified,
        tracks: serde_json::to_string(&tracks)?,
    })?;
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;
    use crate::error::VideoprofError;
    use crate::tracks::Track;
    use serde_json::json;
    use std::cell::Cell;

    fn sample() -> TrackList {
        vec![json!({"track_type": "Video", "format": "AVC"})
            .as_object()
            .cloned()
            .unwrap()]
    }

    #[test]
    fn first_lookup_extracts_and_stores() {
        let mut store = InMemoryStore::new();
        let calls = Cell::new(0);

        let tracks = get_tracks(&mut store, "/a.mkv", 10, 1.5, || {
            calls.set(calls.get() + 1);
            Ok(sample())
        })
        .unwrap();

        assert_eq!(tracks, sample());
        assert_eq!(calls.get(), 1);
        let entry = store.get("/a.mkv").unwrap().unwrap();
        assert_eq!(entry.size, 10);
        assert_eq!(entry.modified, 1.5);
    }

    #[test]
    fn unchanged_file_is_not_extracted_again() {
        let mut store = InMemoryStore::new();
        let calls = Cell::new(0);
        let extract = || {
            calls.set(calls.get() + 1);
            Ok(sample())
        };

        get_tracks(&mut store, "/a.mkv", 10, 1.5, extract).unwrap();
        let again = get_tracks(&mut store, "/a.mkv", 10, 1.5, extract).unwrap();

        assert_eq!(again, sample());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn size_or_mtime_change_forces_one_extraction() {
        let mut store = InMemoryStore::new();
        let calls = Cell::new(0);
        let extract = || {
            calls.set(calls.get() + 1);
            Ok(sample())
        };

        get_tracks(&mut store, "/a.mkv", 10, 1.5, extract).unwrap();
        get_tracks(&mut store, "/a.mkv", 11, 1.5, extract).unwrap();
        assert_eq!(calls.get(), 2);
        get_tracks(&mut store, "/a.mkv", 11, 2.5, extract).unwrap();
        assert_eq!(calls.get(), 3);
        get_tracks(&mut store, "/a.mkv", 11, 2.5, extract).unwrap();
        assert_eq!(calls.get(), 3);

        let entry = store.get("/a.mkv").unwrap().unwrap();
        assert_eq!((entry.size, entry.modified), (11, 2.5));
    }

    #[test]
    fn stale_entry_is_overwritten_with_new_tracks() {
        let mut store = InMemoryStore::new();
        get_tracks(&mut store, "/a.mkv", 10, 1.5, || Ok(sample())).unwrap();

        let updated = get_tracks(&mut store, "/a.mkv", 20, 1.5, || Ok(vec![Track::new()])).unwrap();
        assert_eq!(updated, vec![Track::new()]);
        assert_eq!(store.get("/a.mkv").unwrap().unwrap().tracks, "[{}]");
    }

    #[test]
    fn extraction_errors_propagate_and_store_nothing() {
        let mut store = InMemoryStore::new();
        let err = get_tracks(&mut store, "/bad.mkv", 1, 1.0, || {
            Err(VideoprofError::Extraction {
                path: "/bad.mkv".into(),
                message: "corrupt".into(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, VideoprofError::Extraction { .. }));
        assert!(store.get("/bad.mkv").unwrap().is_none());
    }

    #[test]
    fn undecodable_entry_is_extracted_again() {
        let mut store = InMemoryStore::new();
        store
            .put(&CacheEntry {
                filename: "/a.mkv".into(),
                size: 10,
                modified: 1.5,
                tracks: "not json".into(),
            })
            .unwrap();

        let tracks = get_tracks(&mut store, "/a.mkv", 10, 1.5, || Ok(sample())).unwrap();
        assert_eq!(tracks, sample());
        assert_ne!(store.get("/a.mkv").unwrap().unwrap().tracks, "not json");
    }
}
