//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every client of the library.
//!
//! `VideoprofApi` owns the three pieces of state a run needs:
//!
//! - the configured [`Attribute`]s, whose preference lists grow as files are
//!   analyzed
//! - the [`CacheStore`] holding extracted metadata
//! - the [`Extractor`] used on cache misses
//!
//! It is generic over the store and the extractor:
//! - Production: `VideoprofApi<SqliteStore, MediaInfoCli>`
//! - Testing: `VideoprofApi<InMemoryStore, _>` with a closure extractor
//!
//! Nothing here writes to stdout or stderr.

use crate::attribute::Attribute;
use crate::commands::{analyze, report, scan, Report, ReportSections};
use crate::error::Result;
use crate::store::CacheStore;
use crate::tracks::{Extractor, TrackList};
use std::path::Path;

pub use crate::commands::scan::{Directory, Library};

pub struct VideoprofApi<S: CacheStore, E: Extractor> {
    attributes: Vec<Attribute>,
    store: S,
    extractor: E,
}

impl<S: CacheStore, E: Extractor> VideoprofApi<S, E> {
    pub fn new(attributes: Vec<Attribute>, store: S, extractor: E) -> Self {
        Self {
            attributes,
            store,
            extractor,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn scan<P: AsRef<Path>>(&self, sources: &[P], depth: usize) -> Result<Library> {
        scan::run(sources, depth)
    }

    pub fn analyze<F: FnMut(usize, usize)>(
        &mut self,
        library: &mut Library,
        on_progress: F,
    ) -> Result<()> {
        analyze::run(
            library,
            &mut self.attributes,
            &mut self.store,
            &self.extractor,
            on_progress,
        )
    }

    /// Cached metadata records of the first file in the library.
    pub fn first_tracks(&mut self, library: &Library) -> Result<Option<TrackList>> {
        match library.videos.first() {
            Some(video) => Ok(Some(video.cached_tracks(&mut self.store, &self.extractor)?)),
            None => Ok(None),
        }
    }

    pub fn report(&self, library: &Library, sections: ReportSections) -> Report {
        let mut out = Report::default();
        if sections.summary {
            out.summary = report::summary(&self.attributes, &library.videos);
        }
        if sections.files {
            out.files = report::file_reports(&library.videos);
        }
        if sections.directories {
            out.directories = report::directory_reports(library);
        }
        if sections.flags {
            out.flags = report::flag_reports(&library.videos);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VideoprofConfig;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;
    use std::fs;

    fn extractor(path: &Path) -> Result<TrackList> {
        let format = if path.ends_with("old/b.mkv") {
            "MPEG-4 Visual"
        } else {
            "HEVC"
        };
        Ok(vec![
            json!({"track_type": "General", "format": "Matroska"}),
            json!({"track_type": "Video", "format": format, "height": 1080, "bit_depth": 10}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect())
    }

    fn api() -> VideoprofApi<InMemoryStore, fn(&Path) -> Result<TrackList>> {
        let attributes = VideoprofConfig::bundled()
            .unwrap()
            .make_attributes()
            .unwrap();
        VideoprofApi::new(attributes, InMemoryStore::new(), extractor)
    }

    #[test]
    fn empty_directory_reports_zero_counts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut api = api();

        let mut library = api.scan(&[temp_dir.path()], 1).unwrap();
        api.analyze(&mut library, |_, _| {}).unwrap();
        let report = api.report(&library, ReportSections::all());

        assert!(library.videos.is_empty());
        assert!(report.files.is_empty());
        assert!(report.directories.is_empty());
        assert!(report.flags.is_empty());
        assert_eq!(report.summary.len(), api.attributes().len());
        assert!(report
            .summary
            .iter()
            .flat_map(|row| row.counts.iter())
            .all(|(_, count)| *count == 0));
    }

    #[test]
    fn end_to_end_with_bundled_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("new")).unwrap();
        fs::create_dir_all(temp_dir.path().join("old")).unwrap();
        fs::write(temp_dir.path().join("new/a.mkv"), b"a").unwrap();
        fs::write(temp_dir.path().join("old/b.mkv"), b"b").unwrap();
        let mut api = api();

        let mut library = api.scan(&[temp_dir.path()], 1).unwrap();
        api.analyze(&mut library, |_, _| {}).unwrap();
        let report = api.report(&library, ReportSections::all());

        let dirs: Vec<(usize, usize)> = report
            .directories
            .iter()
            .map(|d| (d.flagged, d.total))
            .collect();
        assert_eq!(dirs, vec![(0, 1), (1, 1)]);

        assert_eq!(report.flags.len(), 1);
        assert_eq!(report.flags[0].attribute, "Video codec");

        let profile = report
            .summary
            .iter()
            .find(|row| row.title == "Profile")
            .unwrap();
        let hevc = profile
            .counts
            .iter()
            .find(|(p, _)| p.title() == "HEVC 10 bit")
            .unwrap();
        assert_eq!(hevc.1, 1);
    }

    #[test]
    fn first_tracks_of_empty_library_is_none() {
        let mut api = api();
        assert!(api.first_tracks(&Library::default()).unwrap().is_none());
    }
}
