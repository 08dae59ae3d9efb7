//! # Rendering Module
//!
//! Turns report rows into tab separated terminal text. Every function returns
//! a `String` with one newline-terminated line per row, so an empty report
//! renders as an empty string and the caller can skip it entirely.
//!
//! Colors come from each preference's level; `colored` already honors
//! `NO_COLOR` and non-terminal output.

use std::fmt::Write;
use std::path::Path;
use videoprof::commands::report::{AttributeSummary, DirectoryReport, FileReport, FlagReport};
use videoprof::preference::Preference;
use videoprof::quality::Quality;

pub const FLAGGED_MARKER: &str = "\u{2612} ";
pub const OK_MARKER: &str = "\u{2713} ";

pub fn badge(preference: &Preference) -> String {
    let marker = if preference.is_flagged() {
        FLAGGED_MARKER
    } else {
        OK_MARKER
    };
    preference.render(&format!("{}{}", marker, preference.title()))
}

fn badges(qualities: &[Quality]) -> String {
    qualities
        .iter()
        .map(|q| badge(&q.preference))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quoted(path: &Path) -> String {
    format!("'{}'", path.display())
}

pub fn render_summary(rows: &[AttributeSummary]) -> String {
    let mut out = String::new();
    for row in rows {
        let counts: Vec<String> = row
            .counts
            .iter()
            .map(|(preference, count)| {
                format!("{}:\t{}", preference.title(), preference.render(&count.to_string()))
            })
            .collect();
        let _ = writeln!(out, "{}\t{}", row.title, counts.join("\t"));
    }
    out
}

pub fn render_files(rows: &[FileReport]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{}:\t{}", quoted(&row.path), badges(&row.qualities));
    }
    out
}

pub fn render_directories(rows: &[DirectoryReport]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}:\t{}/{}\t{}",
            quoted(&row.path),
            row.flagged,
            row.total,
            badges(&row.qualities)
        );
    }
    out
}

pub fn render_flags(rows: &[FlagReport]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}:\t{}:\t'{}'",
            quoted(&row.path),
            row.attribute,
            row.preference.render(row.preference.title())
        );
    }
    out
}
