use super::scan::Library;
use crate::attribute::Attribute;
use crate::error::Result;
use crate::store::CacheStore;
use crate::tracks::Extractor;

/// Analyzes every file of the library in discovery order. `on_progress` is
/// called with `(done, total)` after each file.
///
/// Stops at the first file that fails: a run is all or nothing.
pub fn run<S, E, F>(
    library: &mut Library,
    attributes: &mut [Attribute],
    store: &mut S,
    extractor: &E,
    mut on_progress: F,
) -> Result<()>
where
    S: CacheStore + ?Sized,
    E: Extractor + ?Sized,
    F: FnMut(usize, usize),
{
    let total = library.videos.len();
    for (done, video) in library.videos.iter_mut().enumerate() {
        video.analyze(attributes, store, extractor)?;
        on_progress(done + 1, total);
    }
    Ok(())
}
