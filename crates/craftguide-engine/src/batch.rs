//! Running a batch of requested items and writing the result.

use std::collections::BTreeSet;
use std::path::Path;

use craftguide_core::builder::TreeBuilder;
use craftguide_core::cache::InfoCache;
use craftguide_core::guide::{GuideEntry, build_guide};
use craftguide_core::tracker::ExpansionTracker;
use tracing::{debug, error, info, warn};

use crate::error::EngineError;

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Guides that were built, in request order.
    pub entries: Vec<GuideEntry>,
    /// Requested items whose guide could not be built.
    pub failed: Vec<String>,
}

/// Build the guide of every item in order, sharing `tracker`.
///
/// A failing item is logged and skipped; it leaves the tracker as it was.
pub fn run_batch<C: InfoCache>(
    items: &[String],
    builder: &mut TreeBuilder<'_, C>,
    tracker: &mut ExpansionTracker,
) -> BatchReport {
    let mut report = BatchReport::default();
    for item in items {
        match build_guide(item, builder, tracker) {
            Ok((tree, entry)) => {
                debug!(item = %item, "Acquisition tree:\n{tree}");
                report.entries.push(entry);
            }
            Err(e) => {
                error!(item = %item, error = %e, "Failed to build guide");
                report.failed.push(item.clone());
            }
        }
    }
    info!(
        built = report.entries.len(),
        failed = report.failed.len(),
        expanded = tracker.len(),
        "Batch complete"
    );
    report
}

/// Media paths referenced by `entries` that do not exist under `root`.
pub fn missing_media(entries: &[GuideEntry], root: &Path) -> BTreeSet<String> {
    entries
        .iter()
        .flat_map(GuideEntry::media_paths)
        .filter(|path| !root.join(path).is_file())
        .map(str::to_owned)
        .collect()
}

/// Log every missing media file.
pub fn report_missing_media(entries: &[GuideEntry], root: &Path) {
    let missing = missing_media(entries, root);
    for path in &missing {
        warn!(path = %path, "Missing media file");
    }
    if !missing.is_empty() {
        info!(count = missing.len(), root = %root.display(), "Media check complete");
    }
}

/// Write the entries as a pretty-printed JSON array.
pub fn write_guide(path: &Path, entries: &[GuideEntry]) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(entries).map_err(|source| EngineError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = entries.len(), "Guide written");
    Ok(())
}
