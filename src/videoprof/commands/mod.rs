use crate::commands::report::{AttributeSummary, DirectoryReport, FileReport, FlagReport};

pub mod analyze;
pub mod report;
pub mod scan;

/// Everything a client may want to show after a run. Sections are only
/// filled when requested.
#[derive(Debug, Default)]
pub struct Report {
    pub summary: Vec<AttributeSummary>,
    pub files: Vec<FileReport>,
    pub directories: Vec<DirectoryReport>,
    pub flags: Vec<FlagReport>,
}

/// Which report sections to compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSections {
    pub summary: bool,
    pub files: bool,
    pub directories: bool,
    pub flags: bool,
}

impl ReportSections {
    pub fn all() -> Self {
        Self {
            summary: true,
            files: true,
            directories: true,
            flags: true,
        }
    }

    /// The summary alone is shown when nothing else was asked for.
    pub fn or_summary(mut self) -> Self {
        if !(self.summary || self.files || self.directories || self.flags) {
            self.summary = true;
        }
        self
    }
}
