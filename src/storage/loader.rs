use std::{io, sync::Arc, time::Instant};

use tracing::instrument;

use crate::{
    domain::{RawRecord, TypedRecord},
    observer::{Observer, ProgressTracker},
    storage::{SourceFile, segmenter::Segmenter},
};

/// Errors that can occur when loading the records of a scene file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The observer cancelled the load.
    #[error("load cancelled")]
    Cancelled,
}

/// Segments and classifies every record of `source` in one streaming pass.
///
/// Progress is reported as the share of the file's bytes covered by the
/// records emitted so far, and always ends at 100 once the file is read.
#[instrument(level = "debug", skip(source, observer), fields(path = %source.path().display()))]
pub(crate) fn load(
    source: &Arc<SourceFile>,
    comment_marker: &str,
    observer: &mut dyn Observer,
) -> Result<Vec<TypedRecord>, LoadError> {
    let start = Instant::now();
    observer.event_occurred("Reading File");

    let mut segmenter = Segmenter::new(source.reader()?, comment_marker);
    let mut progress = ProgressTracker::default();
    let mut records = Vec::new();
    let mut loaded = 0;

    for segment in segmenter.by_ref() {
        if observer.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        let segment = segment?;

        loaded += segment.size;
        progress.report(observer, loaded, source.size(), true);

        records.push(TypedRecord::classify(RawRecord {
            source: Arc::clone(source),
            line: segment.line,
            offset: segment.offset,
            size: segment.size,
            description: segment.description,
        }));
    }

    // Skipped lines before the first record are never counted.
    progress.report(observer, 1, 1, true);

    let elapsed = start.elapsed().as_secs_f64();
    tracing::debug!(
        records = records.len(),
        skipped_bytes = segmenter.skipped_bytes(),
        lines = segmenter.lines_read(),
        elapsed,
        "loaded records"
    );
    observer.event_occurred(&format!("File Load Complete: {elapsed:.3}s"));

    Ok(records)
}
