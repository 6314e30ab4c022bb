//! Error types for the `craftguide-core` crate.
//!
//! Every error here is fatal for the requested item being built: the caller
//! drops that item's tree and moves on to the next one. Ingredient cycles are
//! not errors; the builder logs and skips them.

use craftguide_types::UnknownVariant;

/// What kind of record a failed lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An item record.
    Item,
    /// A crafting-station record.
    Table,
    /// A static world-object entry.
    Object,
    /// An NPC record.
    Npc,
    /// A positional entry in a boss or event summon list.
    SummonSource,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Item => "item",
            Self::Table => "table",
            Self::Object => "object",
            Self::Npc => "NPC",
            Self::SummonSource => "summon source",
        })
    }
}

/// Errors that can occur while building an acquisition tree.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// A referenced record is absent from the game data.
    #[error("{kind} {name:?} not found")]
    NotFound {
        /// The kind of record looked up.
        kind: RecordKind,
        /// The name that was looked up.
        name: String,
    },

    /// A scraped enumeration field held a value the builder does not know.
    #[error(transparent)]
    UnrecognizedEnum(#[from] UnknownVariant),

    /// The per-item info cache could not be read or written.
    #[error("info cache failure for {name:?}: {message}")]
    Cache {
        /// The item whose entry failed.
        name: String,
        /// Description of the failure.
        message: String,
    },
}

impl GuideError {
    /// Shorthand for a [`GuideError::NotFound`].
    pub fn not_found(kind: RecordKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}
