//! Guide engine binary.
//!
//! Loads the scraped game records, builds the acquisition guide of every
//! requested item, and writes them all to a single JSON file.
//!
//! # Sequence
//!
//! 1. Load configuration from `craftguide.yaml` (or the path given as the
//!    first argument); a missing file means defaults
//! 2. Initialize structured logging (tracing)
//! 3. Load and index the record files
//! 4. Read the requested-items list
//! 5. Build every guide in order, sharing one expansion tracker
//! 6. Write `guide.json` and report missing media files

mod batch;
mod error;
mod loader;

use std::path::PathBuf;

use craftguide_core::builder::TreeBuilder;
use craftguide_core::cache::{InfoCache, JsonFileCache, MemoryInfoCache};
use craftguide_core::config::GuideConfig;
use craftguide_core::data::GameData;
use craftguide_core::tracker::ExpansionTracker;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::batch::BatchReport;
use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "craftguide.yaml";

/// Application entry point.
///
/// Returns an error only for batch-wide failures; items that fail to build
/// are logged and left out of the guide.
fn main() -> Result<(), EngineError> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let config = GuideConfig::load_or_default(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %config_path.display(),
        data_dir = %config.data.dir.display(),
        item_list = %config.items.list_path.display(),
        cache_dir = ?config.cache.dir,
        pre_expanded = config.pre_expanded.len(),
        "craftguide-engine starting"
    );

    let data = loader::load_game_data(&config.data)?;
    let items = loader::load_item_list(&config.items.list_path)?;
    info!(count = items.len(), "Requested items loaded");

    let report = match &config.cache.dir {
        Some(dir) => generate(&config, &data, &items, JsonFileCache::open(dir)?),
        None => generate(&config, &data, &items, MemoryInfoCache::new()),
    };

    batch::write_guide(&config.output.guide_path, &report.entries)?;
    if let Some(root) = &config.media.root {
        batch::report_missing_media(&report.entries, root);
    }

    info!(
        built = report.entries.len(),
        failed = report.failed.len(),
        "craftguide-engine finished"
    );
    Ok(())
}

/// Build every requested guide with the given info cache.
fn generate<C: InfoCache>(
    config: &GuideConfig,
    data: &GameData,
    items: &[String],
    cache: C,
) -> BatchReport {
    let mut tracker = ExpansionTracker::seeded(config.pre_expanded.iter().cloned());
    let mut builder = TreeBuilder::new(data, cache);
    batch::run_batch(items, &mut builder, &mut tracker)
}
