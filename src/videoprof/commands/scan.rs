use crate::error::{Result, VideoprofError};
use crate::video::Video;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files grouped under one directory at the reporting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub path: PathBuf,
    /// Indexes into [`Library::videos`].
    pub videos: Vec<usize>,
}

/// Every file discovered for a run, plus its directory groups.
#[derive(Debug, Default)]
pub struct Library {
    pub videos: Vec<Video>,
    pub directories: Vec<Directory>,
}

impl Library {
    pub fn directory_videos<'a>(&'a self, directory: &'a Directory) -> impl Iterator<Item = &'a Video> {
        directory.videos.iter().map(move |&i| &self.videos[i])
    }
}

/// Walks each source. The entries exactly `depth` levels below a source are
/// the directory groups; every regular file below a group belongs to it. A
/// source that is itself a file is a group of one, whatever the depth.
pub fn run<P: AsRef<Path>>(sources: &[P], depth: usize) -> Result<Library> {
    let mut library = Library::default();

    for source in sources {
        let source = source.as_ref();
        if !source.exists() {
            return Err(VideoprofError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("source not found: {}", source.display()),
            )));
        }

        if source.is_file() {
            add_group(&mut library, source)?;
            continue;
        }

        let roots = WalkDir::new(source)
            .follow_links(true)
            .min_depth(depth)
            .max_depth(depth)
            .sort_by_file_name();

        for root in roots {
            add_group(&mut library, root?.path())?;
        }
    }

    Ok(library)
}

/// Adds `root` as a group holding every regular file at or below it.
/// Symlinks are followed, so linked videos count like plain files.
fn add_group(library: &mut Library, root: &Path) -> Result<()> {
    let mut directory = Directory {
        path: root.to_path_buf(),
        videos: Vec::new(),
    };

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            directory.videos.push(library.videos.len());
            library.videos.push(Video::new(entry.path()));
        }
    }

    library.directories.push(directory);
    Ok(())
}
