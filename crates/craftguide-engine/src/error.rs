//! Error types for the guide engine binary.
//!
//! [`EngineError`] covers everything that stops the whole batch: bad
//! configuration, unreadable data files, and an unwritable output. A
//! failure while building one requested item is not an engine error; the
//! batch logs it and moves on.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: craftguide_core::config::ConfigError,
    },

    /// A data, list or output file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A data file held malformed JSON, or the guide failed to serialize.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The info cache could not be set up.
    #[error("guide error: {source}")]
    Guide {
        /// The underlying guide error.
        #[from]
        source: craftguide_core::error::GuideError,
    },
}
