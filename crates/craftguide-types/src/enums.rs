//! Enumeration types for the craftguide generator.
//!
//! Two families live here. The tree enumerations ([`NodeKind`],
//! [`GroupKind`], [`NoteType`]) are closed sets produced by the builder and
//! matched exhaustively by every consumer. The record enumerations
//! ([`DropSourceType`], [`BossSummonType`], [`EventSummonType`],
//! [`Currency`]) are parsed case-insensitively from scraped strings; an
//! unknown string surfaces as [`UnknownVariant`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// A scraped string did not name any variant of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {field} value: {value:?}")]
pub struct UnknownVariant {
    /// The record field the value came from (e.g. `"drop_source_type"`).
    pub field: &'static str,
    /// The raw value as it appeared in the record.
    pub value: String,
}

/// Case-insensitive lookup of `value` in a `(label, variant)` table.
fn parse_labelled<T: Copy>(
    field: &'static str,
    value: &str,
    table: &[(&str, T)],
) -> Result<T, UnknownVariant> {
    table
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(value.trim()))
        .map(|&(_, variant)| variant)
        .ok_or_else(|| UnknownVariant {
            field,
            value: value.to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Tree node kinds
// ---------------------------------------------------------------------------

/// What a node in an acquisition tree stands for.
///
/// The kind decides where the node's image lives and whether the builder
/// expands it (only [`NodeKind::Item`] nodes are expanded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// An inventory item.
    Item,
    /// A crafting station.
    Table,
    /// A lootable container (stored as an item record).
    Chest,
    /// A regular enemy or town NPC.
    #[serde(rename = "NPC")]
    Npc,
    /// A boss enemy.
    Boss,
    /// A world event (invasion, moon event...).
    Event,
    /// A placed world object such as an altar.
    Object,
}

impl NodeKind {
    /// Display label, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Table => "Table",
            Self::Chest => "Chest",
            Self::Npc => "NPC",
            Self::Boss => "Boss",
            Self::Event => "Event",
            Self::Object => "Object",
        }
    }

    /// The `images/{folder}` directory holding pictures of this kind.
    ///
    /// Chests share the item folder; events have no picture at all.
    pub const fn image_folder(self) -> Option<&'static str> {
        match self {
            Self::Item | Self::Chest => Some("item"),
            Self::Table => Some("table"),
            Self::Npc => Some("npc"),
            Self::Boss => Some("boss"),
            Self::Object => Some("object"),
            Self::Event => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Child-group kinds
// ---------------------------------------------------------------------------

/// One way of satisfying a node's requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Craft from ingredients at a station (all elements required).
    Recipe,
    /// Loot from chests or enemies (any element suffices).
    Drop,
    /// Buy from a vendor (any element suffices).
    Vendor,
    /// What it takes to make a boss or event appear.
    Summon,
    /// Manually flagged: just go and find it.
    Obtain,
    /// The enemy only appears during an event.
    Event,
    /// Auxiliary branch, e.g. how to get a crafting station.
    Other,
}

impl GroupKind {
    /// Display label, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recipe => "Recipe",
            Self::Drop => "Drop",
            Self::Vendor => "Vendor",
            Self::Summon => "Summon",
            Self::Obtain => "Obtain",
            Self::Event => "Event",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a rendered note segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteType {
    /// Plain connective text.
    Text,
    /// A reference to a node, drawn as its picture and count.
    Image,
}

// ---------------------------------------------------------------------------
// Record enumerations
// ---------------------------------------------------------------------------

/// Where a drop comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropSourceType {
    /// Killing an enemy.
    Npc,
    /// Opening a container.
    Chest,
}

impl FromStr for DropSourceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled("drop_source_type", s, &[("NPC", Self::Npc), ("Chest", Self::Chest)])
    }
}

/// How a boss is summoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossSummonType {
    /// Use an item.
    Item,
    /// Interact with a world object.
    Object,
    /// Use an item at a world object.
    ItemAndObject,
    /// Defeat other enemies first.
    Enemy,
    /// Spawns on its own.
    Auto,
}

impl FromStr for BossSummonType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled(
            "boss_summon_type",
            s,
            &[
                ("Item", Self::Item),
                ("Object", Self::Object),
                ("Item and Object", Self::ItemAndObject),
                ("Enemy", Self::Enemy),
                ("Auto", Self::Auto),
            ],
        )
    }
}

/// How an event is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSummonType {
    /// Happens on its own.
    Natural,
    /// Interact with a world object.
    Object,
    /// Use an item at a world object.
    ItemAndObject,
    /// Use an item.
    Item,
    /// Defeat an enemy first.
    Enemy,
}

impl FromStr for EventSummonType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled(
            "event_summon_type",
            s,
            &[
                ("Natural", Self::Natural),
                ("Object", Self::Object),
                ("Item and Object", Self::ItemAndObject),
                ("Item", Self::Item),
                ("Enemy", Self::Enemy),
            ],
        )
    }
}

/// Currency of a vendor price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// Regular coins.
    Coins,
    /// Defender medals.
    Medals,
}

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled("currency", s, &[("Coins", Self::Coins), ("Medals", Self::Medals)])
    }
}

impl TryFrom<String> for Currency {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Coins => Self::from("Coins"),
            Currency::Medals => Self::from("Medals"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn drop_source_parses_case_insensitively() {
        assert_eq!("npc".parse::<DropSourceType>().unwrap(), DropSourceType::Npc);
        assert_eq!("CHEST".parse::<DropSourceType>().unwrap(), DropSourceType::Chest);
    }

    #[test]
    fn unknown_drop_source_reports_field_and_value() {
        let err = "Fishing".parse::<DropSourceType>().unwrap_err();
        assert_eq!(err.field, "drop_source_type");
        assert_eq!(err.value, "Fishing");
    }

    #[test]
    fn boss_summon_type_accepts_multi_word_label() {
        assert_eq!(
            "item and object".parse::<BossSummonType>().unwrap(),
            BossSummonType::ItemAndObject
        );
        assert!("Npc".parse::<BossSummonType>().is_err());
    }

    #[test]
    fn event_summon_type_includes_natural() {
        assert_eq!(
            "Natural".parse::<EventSummonType>().unwrap(),
            EventSummonType::Natural
        );
    }

    #[test]
    fn currency_round_trips_through_json() {
        let currency: Currency = serde_json::from_str("\"coins\"").unwrap();
        assert_eq!(currency, Currency::Coins);
        assert_eq!(serde_json::to_string(&Currency::Medals).unwrap(), "\"Medals\"");
    }

    #[test]
    fn node_kind_serializes_npc_in_capitals() {
        assert_eq!(serde_json::to_string(&NodeKind::Npc).unwrap(), "\"NPC\"");
        assert_eq!(NodeKind::Npc.to_string(), "NPC");
    }

    #[test]
    fn image_folders() {
        assert_eq!(NodeKind::Chest.image_folder(), Some("item"));
        assert_eq!(NodeKind::Object.image_folder(), Some("object"));
        assert_eq!(NodeKind::Event.image_folder(), None);
    }
}
