//! # Metadata Records
//!
//! A file's metadata is a list of [`Track`]s: flat JSON objects describing
//! one logical stream (the container itself, a video stream, an audio
//! stream...) and tagged with a `track_type` field.
//!
//! Extraction is delegated to an [`Extractor`]. Production uses
//! [`MediaInfoCli`], which shells out to the `mediainfo` command line tool;
//! tests pass closures.

use crate::error::{Result, VideoprofError};
use serde_json::{Map, Value};
use std::path::Path;
use std::process::Command;

pub const TRACK_TYPE: &str = "track_type";

pub type Track = Map<String, Value>;
pub type TrackList = Vec<Track>;

pub fn track_type(track: &Track) -> Option<&str> {
    track.get(TRACK_TYPE).and_then(Value::as_str)
}

/// String form of a scalar field value. Returns `None` for null and for
/// nested values, which records are not expected to carry.
pub fn field_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Turns a file into its list of metadata records.
pub trait Extractor {
    fn extract(&self, path: &Path) -> Result<TrackList>;
}

impl<F> Extractor for F
where
    F: Fn(&Path) -> Result<TrackList>,
{
    fn extract(&self, path: &Path) -> Result<TrackList> {
        self(path)
    }
}

/// Extractor backed by the `mediainfo` binary (`mediainfo --Output=JSON`).
#[derive(Debug, Clone)]
pub struct MediaInfoCli {
    program: String,
}

impl Default for MediaInfoCli {
    fn default() -> Self {
        Self {
            program: "mediainfo".to_string(),
        }
    }
}

impl MediaInfoCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Extractor for MediaInfoCli {
    fn extract(&self, path: &Path) -> Result<TrackList> {
        let extraction_error = |message: String| VideoprofError::Extraction {
            path: path.to_path_buf(),
            message,
        };

        let output = Command::new(&self.program)
            .arg("--Output=JSON")
            .arg(path)
            .output()
            .map_err(|e| extraction_error(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(extraction_error(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let document: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| extraction_error(format!("unreadable mediainfo output: {}", e)))?;

        parse_mediainfo_json(&document).ok_or_else(|| {
            extraction_error("mediainfo output has no media.track list".to_string())
        })
    }
}

/// Normalizes `mediainfo --Output=JSON` into flat records.
///
/// `@type` becomes `track_type`, CamelCase keys become snake_case and
/// anything that is not a scalar is dropped.
pub fn parse_mediainfo_json(document: &Value) -> Option<TrackList> {
    let tracks = document.get("media")?.get("track")?.as_array()?;

    let records = tracks
        .iter()
        .filter_map(Value::as_object)
        .map(|raw| {
            let mut track = Track::new();
            for (key, value) in raw {
                if matches!(value, Value::Array(_) | Value::Object(_) | Value::Null) {
                    continue;
                }
                let key = if key == "@type" {
                    TRACK_TYPE.to_string()
                } else {
                    snake_case(key.trim_start_matches('@'))
                };
                track.insert(key, value.clone());
            }
            track
        })
        .filter(|track| track_type(track).is_some())
        .collect();

    Some(records)
}

fn snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
