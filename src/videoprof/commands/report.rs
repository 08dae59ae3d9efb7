//! Aggregation of analyzed files into report rows.
//!
//! Everything here returns plain data; glyphs, colors and layout are the
//! client's business.

use super::scan::Library;
use crate::attribute::Attribute;
use crate::preference::Preference;
use crate::quality::Quality;
use crate::video::Video;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct AttributeSummary {
    pub title: String,
    /// Every preference of the attribute, in creation order, with the number
    /// of files that resolved to it.
    pub counts: Vec<(Rc<Preference>, usize)>,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub flagged: bool,
    /// Sorted by attribute title.
    pub qualities: Vec<Quality>,
}

#[derive(Debug, Clone)]
pub struct DirectoryReport {
    pub path: PathBuf,
    pub flagged: usize,
    pub total: usize,
    /// Distinct qualities of the directory's files, sorted by attribute title.
    pub qualities: Vec<Quality>,
}

#[derive(Debug, Clone)]
pub struct FlagReport {
    pub path: PathBuf,
    pub attribute: String,
    pub preference: Rc<Preference>,
}

/// Number of files resolved to each preference. Keys compare by title, so
/// same-titled preferences share a count.
pub fn preference_counts(videos: &[Video]) -> HashMap<Rc<Preference>, usize> {
    let mut counts = HashMap::new();
    for quality in videos.iter().flat_map(Video::qualities) {
        *counts.entry(Rc::clone(&quality.preference)).or_insert(0) += 1;
    }
    counts
}

pub fn summary(attributes: &[Attribute], videos: &[Video]) -> Vec<AttributeSummary> {
    let counts = preference_counts(videos);
    attributes
        .iter()
        .map(|attribute| AttributeSummary {
            title: attribute.title().to_string(),
            counts: attribute
                .preferences()
                .iter()
                .map(|p| (Rc::clone(p), counts.get(p).copied().unwrap_or(0)))
                .collect(),
        })
        .collect()
}

pub fn file_reports(videos: &[Video]) -> Vec<FileReport> {
    let mut reports: Vec<FileReport> = videos
        .iter()
        .map(|video| FileReport {
            path: video.path().to_path_buf(),
            flagged: video.is_flagged(),
            qualities: sorted_by_attribute(video.qualities().to_vec()),
        })
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
}

pub fn directory_reports(library: &Library) -> Vec<DirectoryReport> {
    let mut reports: Vec<DirectoryReport> = library
        .directories
        .iter()
        .map(|directory| {
            let mut flagged = 0;
            let mut total = 0;
            let mut qualities: Vec<Quality> = Vec::new();

            for video in library.directory_videos(directory) {
                total += 1;
                if video.is_flagged() {
                    flagged += 1;
                }
                for quality in video.qualities() {
                    if !qualities.contains(quality) {
                        qualities.push(quality.clone());
                    }
                }
            }

            DirectoryReport {
                path: directory.path.clone(),
                flagged,
                total,
                qualities: sorted_by_attribute(qualities),
            }
        })
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
}

pub fn flag_reports(videos: &[Video]) -> Vec<FlagReport> {
    let mut sorted: Vec<&Video> = videos.iter().collect();
    sorted.sort_by(|a, b| a.path().cmp(b.path()));

    sorted
        .into_iter()
        .flat_map(|video| {
            video
                .qualities()
                .iter()
                .filter(|q| q.is_flagged())
                .map(move |q| FlagReport {
                    path: video.path().to_path_buf(),
                    attribute: q.attribute.clone(),
                    preference: Rc::clone(&q.preference),
                })
        })
        .collect()
}

fn sorted_by_attribute(mut qualities: Vec<Quality>) -> Vec<Quality> {
    qualities.sort_by(|a, b| a.attribute.cmp(&b.attribute));
    qualities
}
