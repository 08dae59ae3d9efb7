use crate::attribute::Attribute;
use crate::error::Result;
use crate::quality::Quality;
use crate::store::{get_tracks, CacheStore};
use crate::tracks::{Extractor, TrackList};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{debug, error};

/// A discovered file and the qualities resolved for it.
#[derive(Debug, Clone)]
pub struct Video {
    path: PathBuf,
    filename: String,
    qualities: Vec<Quality>,
}

impl Video {
    /// `filename`, the absolute path, is the file's identity in the cache.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = std::path::absolute(&path)
            .unwrap_or_else(|_| path.clone())
            .to_string_lossy()
            .into_owned();
        Self {
            path,
            filename,
            qualities: Vec::new(),
        }
    }

    pub fn with_qualities(mut self, qualities: Vec<Quality>) -> Self {
        self.qualities = qualities;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn qualities(&self) -> &[Quality] {
        &self.qualities
    }

    pub fn is_flagged(&self) -> bool {
        self.qualities.iter().any(Quality::is_flagged)
    }

    /// Tracks for this file, served from the cache unless the file changed
    /// since it was last extracted.
    pub fn cached_tracks<S, E>(&self, store: &mut S, extractor: &E) -> Result<TrackList>
    where
        S: CacheStore + ?Sized,
        E: Extractor + ?Sized,
    {
        let metadata = fs::metadata(&self.filename)?;
        let modified = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();

        get_tracks(store, &self.filename, metadata.len(), modified, || {
            extractor.extract(Path::new(&self.filename))
        })
    }

    /// Resolves every attribute against this file's tracks and records the
    /// results. Attributes without a value are skipped; any other failure
    /// aborts with the tracks logged for inspection.
    pub fn analyze<S, E>(
        &mut self,
        attributes: &mut [Attribute],
        store: &mut S,
        extractor: &E,
    ) -> Result<()>
    where
        S: CacheStore + ?Sized,
        E: Extractor + ?Sized,
    {
        let tracks = self.cached_tracks(store, extractor)?;
        self.classify(attributes, &tracks)
    }

    pub fn classify(&mut self, attributes: &mut [Attribute], tracks: &TrackList) -> Result<()> {
        for attribute in attributes.iter_mut() {
            match attribute.get_preference(tracks) {
                Ok(preference) => self
                    .qualities
                    .push(Quality::new(attribute.title(), preference)),
                Err(e) if e.is_missing_attribute() => {
                    debug!(file = %self.filename, "skipping attribute: {}", e);
                }
                Err(e) => {
                    let dump = serde_json::to_string_pretty(tracks).unwrap_or_default();
                    error!(file = %self.filename, tracks = %dump, "classification failed");
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
