//! Typed, read-only view over every record kind.
//!
//! [`GameData`] is assembled once per batch from the flat record lists and
//! then only read. Each record kind sits in a [`RecordIndex`] keyed by its
//! identity field; the builder goes through the helpers here rather than
//! poking at the indexes directly.

use craftguide_types::{Boss, Drop, Event, GameObject, Item, Misc, Npc, Recipe, Table};

use crate::error::{GuideError, RecordKind};
use crate::index::RecordIndex;

/// All scraped records plus the hand-maintained objects and aliases.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    /// Items keyed by name.
    pub items: RecordIndex<Item>,
    /// Recipes keyed by result item.
    pub recipes: RecordIndex<Recipe>,
    /// Drops keyed by dropped item.
    pub drops: RecordIndex<Drop>,
    /// NPCs keyed by name.
    pub npcs: RecordIndex<Npc>,
    /// Bosses keyed by name.
    pub bosses: RecordIndex<Boss>,
    /// Events keyed by name.
    pub events: RecordIndex<Event>,
    /// Crafting stations keyed by name.
    pub tables: RecordIndex<Table>,
    /// Static world objects, in file order.
    pub objects: Vec<GameObject>,
    /// Item and NPC aliases.
    pub misc: Misc,
}

/// Unsorted record lists, as loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct RawRecords {
    /// Item records.
    pub items: Vec<Item>,
    /// Recipe records.
    pub recipes: Vec<Recipe>,
    /// Drop records.
    pub drops: Vec<Drop>,
    /// NPC records.
    pub npcs: Vec<Npc>,
    /// Boss records.
    pub bosses: Vec<Boss>,
    /// Event records.
    pub events: Vec<Event>,
    /// Crafting-station records.
    pub tables: Vec<Table>,
    /// Static world objects.
    pub objects: Vec<GameObject>,
    /// Item and NPC aliases.
    pub misc: Misc,
}

impl GameData {
    /// Index every record list by its identity field.
    pub fn new(raw: RawRecords) -> Self {
        Self {
            items: RecordIndex::new(raw.items, |r| r.name.as_str()),
            recipes: RecordIndex::new(raw.recipes, |r| r.result_item.as_str()),
            drops: RecordIndex::new(raw.drops, |r| r.item.as_str()),
            npcs: RecordIndex::new(raw.npcs, |r| r.name.as_str()),
            bosses: RecordIndex::new(raw.bosses, |r| r.name.as_str()),
            events: RecordIndex::new(raw.events, |r| r.name.as_str()),
            tables: RecordIndex::new(raw.tables, |r| r.name.as_str()),
            objects: raw.objects,
            misc: raw.misc,
        }
    }

    /// Apply the item alias table.
    pub fn canonical_item_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.misc
            .name_replacements
            .get(name)
            .map_or(name, String::as_str)
    }

    /// Apply the NPC alias table.
    pub fn canonical_npc_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.misc
            .npc_replacements
            .get(name)
            .map_or(name, String::as_str)
    }

    /// Look up an item by exact (case-insensitive) name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.lookup_one(name)
    }

    /// Like [`GameData::item`] but a miss is an error.
    pub fn require_item(&self, name: &str) -> Result<&Item, GuideError> {
        self.item(name)
            .ok_or_else(|| GuideError::not_found(RecordKind::Item, name))
    }

    /// Look up a crafting station, failing when absent.
    pub fn require_table(&self, name: &str) -> Result<&Table, GuideError> {
        self.tables
            .lookup_one(name)
            .ok_or_else(|| GuideError::not_found(RecordKind::Table, name))
    }

    /// Look up a static world object by exact name, failing when absent.
    pub fn require_object(&self, name: &str) -> Result<&GameObject, GuideError> {
        self.objects
            .iter()
            .find(|object| object.name == name)
            .ok_or_else(|| GuideError::not_found(RecordKind::Object, name))
    }

    /// Look up an NPC by name, failing when absent.
    pub fn require_npc(&self, name: &str) -> Result<&Npc, GuideError> {
        self.npcs
            .lookup_one(name)
            .ok_or_else(|| GuideError::not_found(RecordKind::Npc, name))
    }

    /// Look up a boss by name.
    pub fn boss(&self, name: &str) -> Option<&Boss> {
        self.bosses.lookup_one(name)
    }

    /// Every recipe producing `item`, in index order.
    pub fn recipes_for(&self, item: &str) -> &[Recipe] {
        self.recipes.lookup_all(item)
    }

    /// Every drop record of `item`, in index order.
    pub fn drops_of(&self, item: &str) -> &[Drop] {
        self.drops.lookup_all(item)
    }

    /// The event with `enemy` in one of its waves. When several events
    /// feature the enemy, the last one in name order wins.
    pub fn event_featuring(&self, enemy: &str) -> Option<&Event> {
        self.events
            .iter()
            .rev()
            .find(|event| event.features_enemy(enemy))
    }
}
