//! Scraped record structs.
//!
//! Every record mirrors one entry of the scraper's JSON output. Relationships
//! between records are plain names (a recipe lists ingredient *names*, a boss
//! lists summon item *names*); resolving them is the builder's job.
//!
//! Enumerated fields that the builder must reject when unknown (drop source,
//! summon types) are kept as raw strings and parsed on demand, so a single
//! odd record fails the item that reaches it rather than the whole load.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{BossSummonType, Currency, DropSourceType, EventSummonType, UnknownVariant};

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

const fn one() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A buy or sell price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, Currency)", into = "(u64, Currency)")]
pub struct Price {
    /// Amount in the smallest unit of the currency.
    pub amount: u64,
    /// Currency the amount is expressed in.
    pub currency: Currency,
}

impl From<(u64, Currency)> for Price {
    fn from((amount, currency): (u64, Currency)) -> Self {
        Self { amount, currency }
    }
}

impl From<Price> for (u64, Currency) {
    fn from(price: Price) -> Self {
        (price.amount, price.currency)
    }
}

/// An inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name; the item's identity.
    #[serde(rename = "item_name")]
    pub name: String,
    /// Internal game identifier.
    #[serde(rename = "item_internal_name", default)]
    pub internal_name: Option<String>,
    /// Image file name on the wiki.
    #[serde(rename = "item_image", default)]
    pub image: Option<String>,
    /// Maximum stack size.
    #[serde(rename = "item_stack", default)]
    pub stack: Option<u32>,
    /// Whether the item is only available in hardmode.
    #[serde(rename = "item_hardmode", default)]
    pub hardmode: Option<bool>,
    /// Price when bought from a vendor.
    #[serde(rename = "item_buy_price", default)]
    pub buy_price: Option<Price>,
    /// Names of the NPCs selling this item.
    #[serde(rename = "item_vendors", default, deserialize_with = "null_as_default")]
    pub vendors: Vec<String>,
    /// Free-form wiki tags.
    #[serde(rename = "item_tags", default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient item name.
    pub item_name: String,
    /// Units consumed per craft.
    pub amount: u32,
}

/// On-disk shape of a recipe: `[name, amount]` pairs.
#[derive(Serialize, Deserialize)]
struct RecipeRecord {
    recipe_result: (String, u32),
    recipe_ingredients: Vec<(String, u32)>,
    #[serde(default, deserialize_with = "null_as_default")]
    recipe_station: Vec<String>,
}

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecipeRecord", into = "RecipeRecord")]
pub struct Recipe {
    /// Name of the item produced.
    pub result_item: String,
    /// Units produced per craft.
    pub result_amount: u32,
    /// Ingredients in recipe-definition order.
    pub ingredients: Vec<Ingredient>,
    /// Required crafting stations (table names).
    pub stations: Vec<String>,
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        let (result_item, result_amount) = record.recipe_result;
        Self {
            result_item,
            result_amount,
            ingredients: record
                .recipe_ingredients
                .into_iter()
                .map(|(item_name, amount)| Ingredient { item_name, amount })
                .collect(),
            stations: record.recipe_station,
        }
    }
}

impl From<Recipe> for RecipeRecord {
    fn from(recipe: Recipe) -> Self {
        Self {
            recipe_result: (recipe.result_item, recipe.result_amount),
            recipe_ingredients: recipe
                .ingredients
                .into_iter()
                .map(|ingredient| (ingredient.item_name, ingredient.amount))
                .collect(),
            recipe_station: recipe.stations,
        }
    }
}

// ---------------------------------------------------------------------------
// Drop
// ---------------------------------------------------------------------------

/// A `[min, max]` range per difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[(f64, f64); 3]", into = "[(f64, f64); 3]")]
pub struct DropRange {
    /// Normal mode range.
    pub normal: (f64, f64),
    /// Expert mode range.
    pub expert: (f64, f64),
    /// Master mode range.
    pub master: (f64, f64),
}

impl From<[(f64, f64); 3]> for DropRange {
    fn from([normal, expert, master]: [(f64, f64); 3]) -> Self {
        Self {
            normal,
            expert,
            master,
        }
    }
}

impl From<DropRange> for [(f64, f64); 3] {
    fn from(range: DropRange) -> Self {
        [range.normal, range.expert, range.master]
    }
}

/// A single loot entry: `item` drops from `source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    /// Enemy or container name.
    #[serde(rename = "drop_source")]
    pub source: String,
    /// Raw source type (`"NPC"` or `"Chest"`).
    #[serde(rename = "drop_source_type")]
    pub source_type: String,
    /// Name of the dropped item.
    #[serde(rename = "drop_item")]
    pub item: String,
    /// Stack size per drop.
    #[serde(rename = "drop_amount", default)]
    pub amount: Option<DropRange>,
    /// Drop chance in percent.
    #[serde(rename = "drop_rate", default)]
    pub rate: Option<DropRange>,
}

impl Drop {
    /// Parse the raw source type.
    pub fn source_kind(&self) -> Result<DropSourceType, UnknownVariant> {
        self.source_type.parse()
    }
}

// ---------------------------------------------------------------------------
// NPC / Boss
// ---------------------------------------------------------------------------

/// A regular enemy or town NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Display name; the NPC's identity.
    #[serde(rename = "npc_name")]
    pub name: String,
    /// Image file name on the wiki.
    #[serde(rename = "npc_image", default)]
    pub image: Option<String>,
    /// Whether the NPC only appears in hardmode.
    #[serde(rename = "npc_hardmode", default)]
    pub hardmode: Option<bool>,
    /// Biomes the NPC spawns in.
    #[serde(rename = "npc_environment", default, deserialize_with = "null_as_default")]
    pub environment: Vec<String>,
}

/// A boss and how to summon it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    /// Display name; the boss's identity.
    #[serde(rename = "boss_name")]
    pub name: String,
    /// Icon file name.
    #[serde(rename = "boss_icon", default)]
    pub image: Option<String>,
    /// Raw summon type (see [`BossSummonType`]).
    #[serde(rename = "boss_summon_type")]
    pub summon_type: String,
    /// Summon sources: items, objects or enemies depending on the type.
    #[serde(rename = "boss_summon", default, deserialize_with = "null_as_default")]
    pub summon: Vec<String>,
    /// Number of summon items consumed.
    #[serde(rename = "boss_summon_count", default = "one")]
    pub summon_count: u32,
    /// Bosses that must be defeated first.
    #[serde(rename = "boss_prerequisite", default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
}

impl Boss {
    /// Parse the raw summon type.
    pub fn summon_kind(&self) -> Result<BossSummonType, UnknownVariant> {
        self.summon_type.parse()
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A wave of enemies within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyGroup {
    /// Bosses that must be defeated before this group appears.
    #[serde(rename = "event_enemies_prerequisite", default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
    /// Enemy names in the group.
    #[serde(rename = "event_enemies_list", default, deserialize_with = "null_as_default")]
    pub enemies: Vec<String>,
}

/// A world event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Display name; the event's identity.
    #[serde(rename = "event_name")]
    pub name: String,
    /// Raw summon type (see [`EventSummonType`]).
    #[serde(rename = "event_summon_type")]
    pub summon_type: String,
    /// Summon sources: items, objects or enemies depending on the type.
    #[serde(rename = "event_summon_item", default, deserialize_with = "null_as_default")]
    pub summon_items: Vec<String>,
    /// Enemy waves.
    #[serde(rename = "event_enemies", default, deserialize_with = "null_as_default")]
    pub enemies: Vec<EnemyGroup>,
    /// Bosses that must be defeated before the event can start.
    #[serde(rename = "event_prerequisite", default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
}

impl Event {
    /// Parse the raw summon type.
    pub fn summon_kind(&self) -> Result<EventSummonType, UnknownVariant> {
        self.summon_type.parse()
    }

    /// Whether any enemy group of this event lists `enemy`.
    pub fn features_enemy(&self, enemy: &str) -> bool {
        self.enemies
            .iter()
            .any(|group| group.enemies.iter().any(|name| name == enemy))
    }
}

// ---------------------------------------------------------------------------
// Table / Object / Misc
// ---------------------------------------------------------------------------

/// A crafting station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Display name; the table's identity.
    #[serde(rename = "table_name")]
    pub name: String,
    /// Image file name.
    #[serde(rename = "table_image", default)]
    pub image: Option<String>,
}

/// A placed world object (altar, shrine...) that summons something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    /// Display name.
    #[serde(rename = "object_name")]
    pub name: String,
    /// Image file name.
    #[serde(rename = "object_image", default)]
    pub image: Option<String>,
}

/// Hand-maintained name substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misc {
    /// Item alias to canonical item name.
    #[serde(default)]
    pub name_replacements: BTreeMap<String, String>,
    /// NPC alias to canonical NPC name.
    #[serde(default)]
    pub npc_replacements: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
