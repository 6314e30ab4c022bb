//! Per-item info cache.
//!
//! Expanding an item first gathers its [`ItemInfo`]: every recipe producing
//! it, every drop of it, its vendor offers, and the manual `obtainable`
//! flag. The builder asks an injected [`InfoCache`] for that info and only
//! computes it on a miss, so a persisted cache makes generation idempotent
//! across runs and lets a maintainer flip `obtainable` by hand.
//!
//! Two implementations ship here: [`MemoryInfoCache`] for tests and
//! throwaway runs, and [`JsonFileCache`] with one pretty-printed JSON file
//! per item. Neither guards against concurrent writers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use craftguide_types::{Currency, Drop, Item, Recipe};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::GameData;
use crate::error::GuideError;

// ---------------------------------------------------------------------------
// ItemInfo
// ---------------------------------------------------------------------------

/// A vendor selling an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOffer {
    /// Name of the selling NPC.
    pub vendor_name: String,
    /// Buy price, when the item record lists one.
    pub price: Option<u64>,
    /// Currency of the price.
    pub currency: Option<Currency>,
}

/// Everything the builder needs to decide how an item is obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Recipes producing the item, in index order.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Drop records of the item, in index order.
    #[serde(default)]
    pub drops: Vec<Drop>,
    /// Vendor offers, in the item record's vendor order.
    #[serde(default)]
    pub vendors: Vec<VendorOffer>,
    /// Manual override: the item is simply found in the world.
    #[serde(default)]
    pub obtainable: bool,
}

impl ItemInfo {
    /// Derive the info for `item` from the game data.
    ///
    /// `obtainable` always starts out false.
    pub fn compute(data: &GameData, item: &Item) -> Self {
        let price = item.buy_price;
        Self {
            recipes: data.recipes_for(&item.name).to_vec(),
            drops: data.drops_of(&item.name).to_vec(),
            vendors: item
                .vendors
                .iter()
                .map(|vendor| VendorOffer {
                    vendor_name: vendor.clone(),
                    price: price.map(|p| p.amount),
                    currency: price.map(|p| p.currency),
                })
                .collect(),
            obtainable: false,
        }
    }
}

// ---------------------------------------------------------------------------
// InfoCache
// ---------------------------------------------------------------------------

/// Get-or-compute storage for [`ItemInfo`], keyed by item name.
pub trait InfoCache {
    /// Fetch a stored entry, `None` on a miss.
    fn load(&mut self, item: &str) -> Result<Option<ItemInfo>, GuideError>;

    /// Store an entry, replacing any previous one.
    fn store(&mut self, item: &str, info: &ItemInfo) -> Result<(), GuideError>;

    /// Return the stored entry, or compute, store and return a fresh one.
    fn get_or_compute(
        &mut self,
        item: &str,
        compute: &dyn Fn() -> ItemInfo,
    ) -> Result<ItemInfo, GuideError> {
        if let Some(info) = self.load(item)? {
            return Ok(info);
        }
        let info = compute();
        self.store(item, &info)?;
        Ok(info)
    }
}

/// In-memory cache, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryInfoCache {
    entries: BTreeMap<String, ItemInfo>,
}

impl MemoryInfoCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Seed an entry, e.g. to mark an item obtainable in a test.
    pub fn insert(&mut self, item: impl Into<String>, info: ItemInfo) {
        self.entries.insert(item.into(), info);
    }

    /// Peek at an entry.
    pub fn get(&self, item: &str) -> Option<&ItemInfo> {
        self.entries.get(item)
    }

    /// Number of cached items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InfoCache for MemoryInfoCache {
    fn load(&mut self, item: &str) -> Result<Option<ItemInfo>, GuideError> {
        Ok(self.entries.get(item).cloned())
    }

    fn store(&mut self, item: &str, info: &ItemInfo) -> Result<(), GuideError> {
        self.entries.insert(item.to_owned(), info.clone());
        Ok(())
    }
}

/// One `{item name}.json` file per item inside a directory.
///
/// Files are keyed by the raw item name, so items whose names only differ
/// in punctuation get separate entries.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// Use `dir` as the cache directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, GuideError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| GuideError::Cache {
            name: dir.display().to_string(),
            message: format!("cannot create cache directory: {e}"),
        })?;
        Ok(Self { dir })
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the entry for `item`.
    ///
    /// Fails when the name cannot be a single file name inside the cache
    /// directory.
    pub fn entry_path(&self, item: &str) -> Result<PathBuf, GuideError> {
        if item.is_empty() || item.contains(['/', '\\', '\0']) || item == "." || item == ".." {
            return Err(GuideError::Cache {
                name: item.to_owned(),
                message: String::from("item name cannot be used as a cache file name"),
            });
        }
        Ok(self.dir.join(format!("{item}.json")))
    }
}

impl InfoCache for JsonFileCache {
    fn load(&mut self, item: &str) -> Result<Option<ItemInfo>, GuideError> {
        let path = self.entry_path(item)?;
        if !path.exists() {
            return Ok(None);
        }
        let cache_err = |message: String| GuideError::Cache {
            name: item.to_owned(),
            message,
        };
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| cache_err(format!("read {}: {e}", path.display())))?;
        let info = serde_json::from_str(&contents)
            .map_err(|e| cache_err(format!("parse {}: {e}", path.display())))?;
        debug!(item, path = %path.display(), "Item info loaded from cache");
        Ok(Some(info))
    }

    fn store(&mut self, item: &str, info: &ItemInfo) -> Result<(), GuideError> {
        let path = self.entry_path(item)?;
        let cache_err = |message: String| GuideError::Cache {
            name: item.to_owned(),
            message,
        };
        let json = serde_json::to_string_pretty(info)
            .map_err(|e| cache_err(format!("serialize: {e}")))?;
        std::fs::write(&path, json)
            .map_err(|e| cache_err(format!("write {}: {e}", path.display())))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
