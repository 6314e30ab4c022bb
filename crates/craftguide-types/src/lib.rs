//! Shared type definitions for the craftguide generator.
//!
//! This crate is the single source of truth for the scraped record schema
//! and for the closed enumerations that the tree builder, note renderer and
//! guide flattener all match on.
//!
//! # Modules
//!
//! - [`enums`] -- Node, group and note kinds plus the scraped enumerations
//! - [`structs`] -- Record structs (items, recipes, drops, NPCs, bosses,
//!   events, tables, objects, name substitutions)

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BossSummonType, Currency, DropSourceType, EventSummonType, GroupKind, NodeKind, NoteType,
    UnknownVariant,
};
pub use structs::{
    Boss, Drop, DropRange, EnemyGroup, Event, GameObject, Ingredient, Item, Misc, Npc, Price,
    Recipe, Table,
};
