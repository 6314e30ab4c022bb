//! Acquisition tree construction.
//!
//! [`TreeBuilder::generate_tree`] turns a requested item name into an
//! [`AcquisitionNode`] tree:
//!
//! 1. The root item node is created and expanded.
//! 2. An explicit stack worklist visits every reachable node in pre-order.
//!    Item nodes are expanded the first time their name is seen in the
//!    batch; later occurrences stay terminal references. Other nodes are
//!    only walked through.
//! 3. A cleanup pass drops auxiliary [`GroupKind::Other`] branches that lead
//!    nowhere (typically "how to get this crafting station" when the station
//!    needs no steps).
//!
//! # Expanding an item
//!
//! The first applicable method wins: the manual obtain flag, then the first
//! recipe, then drops, then vendors. Recipe ingredients already present in
//! the ancestor history are skipped, which breaks circular recipes.
//!
//! # Resolving an enemy
//!
//! Drops, vendors and enemy-type summons all resolve enemies the same way.
//! A boss gets a summon group; an enemy that
//! belongs to an event additionally gets an event group describing how to
//! start that event. The chain of enemies being resolved is tracked so
//! mutually-summoning enemies cannot recurse forever.

use craftguide_types::{BossSummonType, DropSourceType, EventSummonType, GroupKind, NodeKind};
use craftguide_types::{Boss, Drop, Event, Item, Recipe};
use tracing::{debug, info, warn};

use crate::cache::{InfoCache, ItemInfo, VendorOffer};
use crate::data::GameData;
use crate::error::{GuideError, RecordKind};
use crate::node::{AcquisitionNode, ChildGroup, NodeIdentity};
use crate::tracker::ExpansionTracker;

/// Station name meaning "no station needed".
pub const BY_HAND: &str = "By Hand";

/// Position of a node below the root: `(group index, element index)` pairs.
type NodePath = Vec<(usize, usize)>;

/// Builds acquisition trees against one set of game data.
#[derive(Debug)]
pub struct TreeBuilder<'a, C> {
    data: &'a GameData,
    cache: C,
}

impl<'a, C: InfoCache> TreeBuilder<'a, C> {
    /// Create a builder reading `data` and caching item info in `cache`.
    pub const fn new(data: &'a GameData, cache: C) -> Self {
        Self { data, cache }
    }

    /// The game data being read.
    pub const fn data(&self) -> &'a GameData {
        self.data
    }

    /// The info cache.
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Give back the info cache.
    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Build the full acquisition tree for `item_name`.
    ///
    /// The root is always expanded. Every other item is expanded at most
    /// once per batch, as recorded in `tracker`; the tracker only learns
    /// about this build's expansions if the build succeeds.
    pub fn generate_tree(
        &mut self,
        item_name: &str,
        tracker: &mut ExpansionTracker,
    ) -> Result<AcquisitionNode, GuideError> {
        let mut run = tracker.begin_run();
        let item = self.resolve_item(item_name)?;
        let mut root = item_node(item, 1, &[]);
        info!(item = %item.name, "Generating tree");

        run.claim(&item.name);
        self.expand_item(&mut root)?;

        let mut stack: Vec<NodePath> = Vec::new();
        push_children(&mut stack, &root, &[]);
        while let Some(path) = stack.pop() {
            let Some(node) = node_at_mut(&mut root, &path) else {
                continue;
            };
            if node.kind == NodeKind::Item {
                if !run.claim(node.title()) {
                    continue;
                }
                self.expand_item(node)?;
            }
            push_children(&mut stack, node, &path);
        }

        prune_idle_branches(&mut root);
        tracker.commit(run);
        Ok(root)
    }

    /// Compute the children of an item node in place.
    fn expand_item(&mut self, node: &mut AcquisitionNode) -> Result<(), GuideError> {
        let data = self.data;
        let item = data.require_item(node.title())?;
        let info = self
            .cache
            .get_or_compute(&item.name, &|| ItemInfo::compute(data, item))?;
        debug!(
            item = %item.name,
            count = node.count,
            recipes = info.recipes.len(),
            drops = info.drops.len(),
            vendors = info.vendors.len(),
            obtainable = info.obtainable,
            "Expanding item"
        );
        node.children = self
            .acquisition_group(&info, node.count, &node.history)?
            .into_iter()
            .collect();
        Ok(())
    }

    /// The single group describing how to get an item, by priority.
    fn acquisition_group(
        &self,
        info: &ItemInfo,
        count: u32,
        history: &[String],
    ) -> Result<Option<ChildGroup>, GuideError> {
        if info.obtainable {
            return Ok(Some(ChildGroup::new(GroupKind::Obtain)));
        }
        if let Some(recipe) = info.recipes.first() {
            return self.recipe_group(recipe, count, history).map(Some);
        }
        if let Some(group) = self.drop_group(&info.drops, history)? {
            return Ok(Some(group));
        }
        self.vendor_group(&info.vendors, history)
    }

    // -----------------------------------------------------------------------
    // Recipes
    // -----------------------------------------------------------------------

    fn recipe_group(
        &self,
        recipe: &Recipe,
        count: u32,
        history: &[String],
    ) -> Result<ChildGroup, GuideError> {
        let crafts = count.div_ceil(recipe.result_amount.max(1));

        let mut elements = vec![self.station_node(&recipe.stations, history)?];
        for ingredient in &recipe.ingredients {
            let item = self.resolve_item(&ingredient.item_name)?;
            if history.contains(&item.name) {
                warn!(
                    recipe = %recipe.result_item,
                    ingredient = %item.name,
                    ?history,
                    "Recipe loop detected, skipping ingredient"
                );
                continue;
            }
            elements.push(item_node(
                item,
                ingredient.amount.saturating_mul(crafts),
                history,
            ));
        }
        Ok(ChildGroup::with_elements(GroupKind::Recipe, elements))
    }

    /// The crafting-station node of a recipe, carrying an [`GroupKind::Other`]
    /// branch with every station that can itself be obtained as an item.
    fn station_node(
        &self,
        stations: &[String],
        history: &[String],
    ) -> Result<AcquisitionNode, GuideError> {
        let identity = if stations.is_empty() {
            vec![NodeIdentity::new(BY_HAND, None)]
        } else {
            stations
                .iter()
                .map(|name| -> Result<NodeIdentity, GuideError> {
                    let table = self.data.require_table(name)?;
                    Ok(NodeIdentity::new(name.as_str(), table.image.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        let mut node = AcquisitionNode::fused(NodeKind::Table, identity);

        let station_items = stations
            .iter()
            .filter_map(|name| self.resolve_item(name).ok())
            .filter(|item| !history.contains(&item.name))
            .map(|item| item_node(item, 1, history))
            .collect();
        node.children
            .push(ChildGroup::with_elements(GroupKind::Other, station_items));
        Ok(node)
    }

    // -----------------------------------------------------------------------
    // Drops and vendors
    // -----------------------------------------------------------------------

    fn drop_group(
        &self,
        drops: &[Drop],
        history: &[String],
    ) -> Result<Option<ChildGroup>, GuideError> {
        let mut chests = Vec::new();
        let mut enemies = Vec::new();
        for drop in drops {
            match drop.source_kind()? {
                DropSourceType::Chest => chests.push(self.chest_node(&drop.source)?),
                DropSourceType::Npc => {
                    enemies.extend(self.enemy_node(&drop.source, history, &mut Vec::new())?);
                }
            }
        }
        chests.append(&mut enemies);
        Ok(non_empty_group(GroupKind::Drop, chests))
    }

    fn vendor_group(
        &self,
        vendors: &[VendorOffer],
        history: &[String],
    ) -> Result<Option<ChildGroup>, GuideError> {
        let mut elements = Vec::new();
        for offer in vendors {
            elements.extend(self.enemy_node(&offer.vendor_name, history, &mut Vec::new())?);
        }
        Ok(non_empty_group(GroupKind::Vendor, elements))
    }

    /// A chest is an item record shown as a terminal container.
    fn chest_node(&self, name: &str) -> Result<AcquisitionNode, GuideError> {
        let chest = self.data.require_item(name)?;
        Ok(AcquisitionNode::new(
            NodeKind::Chest,
            NodeIdentity::new(name, chest.image.clone()),
        ))
    }

    // -----------------------------------------------------------------------
    // Enemies, bosses, events
    // -----------------------------------------------------------------------

    /// Resolve an enemy (or vendor) by name.
    ///
    /// `chain` holds the enemies currently being resolved above this one;
    /// meeting one of them again returns `None` instead of recursing.
    fn enemy_node(
        &self,
        name: &str,
        history: &[String],
        chain: &mut Vec<String>,
    ) -> Result<Option<AcquisitionNode>, GuideError> {
        if chain.iter().any(|seen| seen == name) {
            warn!(enemy = name, ?chain, "Enemy summon loop detected, skipping enemy");
            return Ok(None);
        }
        chain.push(name.to_owned());
        let resolved = self.resolve_enemy(name, history, chain);
        chain.pop();
        resolved.map(Some)
    }

    fn resolve_enemy(
        &self,
        name: &str,
        history: &[String],
        chain: &mut Vec<String>,
    ) -> Result<AcquisitionNode, GuideError> {
        let mut node = match self.data.boss(name) {
            Some(boss) => self.boss_node(boss, history, chain)?,
            None => self.npc_node(name)?,
        };
        if let Some(event) = self.data.event_featuring(name) {
            let event_node = self.event_node(event, history, chain)?;
            node.children
                .push(ChildGroup::with_elements(GroupKind::Event, vec![event_node]));
        }
        Ok(node)
    }

    /// A terminal enemy node: a boss when a boss record matches, otherwise
    /// an NPC looked up through the NPC alias table.
    fn npc_node(&self, name: &str) -> Result<AcquisitionNode, GuideError> {
        if let Some(boss) = self.data.boss(name) {
            return Ok(AcquisitionNode::new(
                NodeKind::Boss,
                NodeIdentity::new(name, boss.image.clone()),
            ));
        }
        let canonical = self.data.canonical_npc_name(name);
        if canonical != name {
            debug!(npc = name, replacement = canonical, "Replacing NPC name");
        }
        let npc = self.data.require_npc(canonical)?;
        Ok(AcquisitionNode::new(
            NodeKind::Npc,
            NodeIdentity::new(canonical, npc.image.clone()),
        ))
    }

    fn boss_node(
        &self,
        boss: &Boss,
        history: &[String],
        chain: &mut Vec<String>,
    ) -> Result<AcquisitionNode, GuideError> {
        let mut node = AcquisitionNode::new(
            NodeKind::Boss,
            NodeIdentity::new(boss.name.as_str(), boss.image.clone()),
        );
        let sources = &boss.summon;
        let elements = match boss.summon_kind()? {
            BossSummonType::Item => {
                let item = self.resolve_item(summon_source(sources, 0, &boss.name)?)?;
                vec![item_node(item, boss.summon_count, history)]
            }
            BossSummonType::Object => {
                vec![self.object_node(summon_source(sources, 0, &boss.name)?)?]
            }
            BossSummonType::ItemAndObject => {
                let item = self.resolve_item(summon_source(sources, 0, &boss.name)?)?;
                let mut object = self.object_node(summon_source(sources, 1, &boss.name)?)?;
                object.children.push(ChildGroup::with_elements(
                    GroupKind::Summon,
                    vec![item_node(item, boss.summon_count, history)],
                ));
                vec![object]
            }
            BossSummonType::Enemy => {
                let mut enemies = Vec::new();
                for source in sources {
                    enemies.extend(self.enemy_node(source, history, chain)?);
                }
                enemies
            }
            BossSummonType::Auto => Vec::new(),
        };
        node.children.extend(non_empty_group(GroupKind::Summon, elements));
        Ok(node)
    }

    fn event_node(
        &self,
        event: &Event,
        history: &[String],
        chain: &mut Vec<String>,
    ) -> Result<AcquisitionNode, GuideError> {
        let mut node =
            AcquisitionNode::new(NodeKind::Event, NodeIdentity::new(event.name.as_str(), None));
        let sources = &event.summon_items;
        let elements = match event.summon_kind()? {
            EventSummonType::Item => {
                let item = self.resolve_item(summon_source(sources, 0, &event.name)?)?;
                vec![item_node(item, 1, history)]
            }
            EventSummonType::Object => {
                vec![self.object_node(summon_source(sources, 0, &event.name)?)?]
            }
            EventSummonType::ItemAndObject => {
                let item = self.resolve_item(summon_source(sources, 0, &event.name)?)?;
                let object = self.object_node(summon_source(sources, 1, &event.name)?)?;
                vec![object, item_node(item, 1, history)]
            }
            EventSummonType::Enemy => self
                .enemy_node(summon_source(sources, 0, &event.name)?, history, chain)?
                .into_iter()
                .collect(),
            EventSummonType::Natural => Vec::new(),
        };
        node.children.extend(non_empty_group(GroupKind::Summon, elements));
        Ok(node)
    }

    fn object_node(&self, name: &str) -> Result<AcquisitionNode, GuideError> {
        let object = self.data.require_object(name)?;
        Ok(AcquisitionNode::new(
            NodeKind::Object,
            NodeIdentity::new(name, object.image.clone()),
        ))
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Apply the item alias table and fetch the record.
    fn resolve_item(&self, name: &str) -> Result<&'a Item, GuideError> {
        let data = self.data;
        let canonical = data.canonical_item_name(name);
        if canonical != name {
            debug!(item = name, replacement = canonical, "Replacing item name");
        }
        data.require_item(canonical)
    }
}

/// An unexpanded item node whose history extends `parent_history`.
fn item_node(item: &Item, count: u32, parent_history: &[String]) -> AcquisitionNode {
    let mut node = AcquisitionNode::new(
        NodeKind::Item,
        NodeIdentity::new(item.name.as_str(), item.image.clone()),
    )
    .with_count(count);
    node.history = parent_history.to_vec();
    node.history.push(item.name.clone());
    node
}

fn non_empty_group(kind: GroupKind, elements: Vec<AcquisitionNode>) -> Option<ChildGroup> {
    (!elements.is_empty()).then(|| ChildGroup::with_elements(kind, elements))
}

fn summon_source<'s>(sources: &'s [String], index: usize, owner: &str) -> Result<&'s str, GuideError> {
    sources
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| GuideError::not_found(RecordKind::SummonSource, format!("{owner}#{index}")))
}

// ---------------------------------------------------------------------------
// Worklist helpers
// ---------------------------------------------------------------------------

/// Push the paths of `node`'s elements so that the first element of the
/// first group is popped first.
fn push_children(stack: &mut Vec<NodePath>, node: &AcquisitionNode, path: &[(usize, usize)]) {
    for (g, group) in node.children.iter().enumerate().rev() {
        for e in (0..group.elements.len()).rev() {
            let mut child = path.to_vec();
            child.push((g, e));
            stack.push(child);
        }
    }
}

fn node_at_mut<'n>(
    root: &'n mut AcquisitionNode,
    path: &[(usize, usize)],
) -> Option<&'n mut AcquisitionNode> {
    path.iter().try_fold(root, |node, &(g, e)| {
        node.children.get_mut(g)?.elements.get_mut(e)
    })
}

/// Remove [`GroupKind::Other`] groups that are empty or whose elements are
/// all childless. Subtrees are cleaned before their parents are judged.
pub fn prune_idle_branches(node: &mut AcquisitionNode) {
    for group in &mut node.children {
        for element in &mut group.elements {
            prune_idle_branches(element);
        }
    }
    node.children
        .retain(|group| !(group.kind == GroupKind::Other && group.is_idle()));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftguide_types::{EnemyGroup, GameObject, Ingredient, Misc, Npc, Table};

    use super::*;
    use crate::cache::MemoryInfoCache;
    use crate::data::RawRecords;

    fn item(name: &str) -> Item {
        Item {
            name: name.to_owned(),
            internal_name: None,
            image: Some(format!("{name}.png")),
            stack: None,
            hardmode: None,
            buy_price: None,
            vendors: Vec::new(),
            tags: Vec::new(),
        }
    }

    fn sold_by(name: &str, vendors: &[&str]) -> Item {
        Item {
            vendors: vendors.iter().map(|v| (*v).to_owned()).collect(),
            ..item(name)
        }
    }

    fn recipe(result: &str, amount: u32, ingredients: &[(&str, u32)], station: &str) -> Recipe {
        Recipe {
            result_item: result.to_owned(),
            result_amount: amount,
            ingredients: ingredients
                .iter()
                .map(|(name, amount)| Ingredient {
                    item_name: (*name).to_owned(),
                    amount: *amount,
                })
                .collect(),
            stations: vec![station.to_owned()],
        }
    }

    fn drop(source: &str, source_type: &str, item: &str) -> Drop {
        Drop {
            source: source.to_owned(),
            source_type: source_type.to_owned(),
            item: item.to_owned(),
            amount: None,
            rate: None,
        }
    }

    fn npc(name: &str) -> Npc {
        Npc {
            name: name.to_owned(),
            image: None,
            hardmode: None,
            environment: Vec::new(),
        }
    }

    fn boss(name: &str, summon_type: &str, summon: &[&str], count: u32) -> Boss {
        Boss {
            name: name.to_owned(),
            image: Some(format!("{name} icon.png")),
            summon_type: summon_type.to_owned(),
            summon: summon.iter().map(|s| (*s).to_owned()).collect(),
            summon_count: count,
            prerequisites: Vec::new(),
        }
    }

    fn event(name: &str, summon_type: &str, summon: &[&str], enemies: &[&str]) -> Event {
        Event {
            name: name.to_owned(),
            summon_type: summon_type.to_owned(),
            summon_items: summon.iter().map(|s| (*s).to_owned()).collect(),
            enemies: vec![EnemyGroup {
                prerequisites: Vec::new(),
                enemies: enemies.iter().map(|s| (*s).to_owned()).collect(),
            }],
            prerequisites: Vec::new(),
        }
    }

    fn table(name: &str) -> Table {
        Table {
            name: name.to_owned(),
            image: None,
        }
    }

    fn base_records() -> RawRecords {
        RawRecords {
            items: vec![item("Gel"), item("Wood"), item("Torch"), item("Work Bench")],
            recipes: vec![
                recipe("Torch", 3, &[("Wood", 1), ("Gel", 1)], "By Hand"),
                recipe("Work Bench", 1, &[("Wood", 10)], "By Hand"),
            ],
            drops: vec![drop("Blue Slime", "NPC", "Gel")],
            npcs: vec![npc("Blue Slime")],
            tables: vec![table("By Hand"), table("Work Bench")],
            ..RawRecords::default()
        }
    }

    fn build(data: &GameData, name: &str) -> Result<AcquisitionNode, GuideError> {
        let mut builder = TreeBuilder::new(data, MemoryInfoCache::new());
        builder.generate_tree(name, &mut ExpansionTracker::new())
    }

    fn only_group(node: &AcquisitionNode) -> &ChildGroup {
        assert_eq!(node.children.len(), 1, "expected one group on {}", node.title());
        node.children.first().unwrap()
    }

    fn element(group: &ChildGroup, index: usize) -> &AcquisitionNode {
        group.elements.get(index).unwrap()
    }

    #[test]
    fn recipe_counts_round_crafts_up() {
        let data = GameData::new(base_records());
        let mut builder = TreeBuilder::new(&data, MemoryInfoCache::new());
        let mut tracker = ExpansionTracker::new();
        let mut root = builder.generate_tree("Torch", &mut tracker).unwrap();
        root.count = 7;
        builder.expand_item(&mut root).unwrap();

        let group = only_group(&root);
        assert_eq!(group.kind, GroupKind::Recipe);
        assert_eq!(element(group, 0).kind, NodeKind::Table);
        assert_eq!(element(group, 1).title(), "Wood");
        assert_eq!(element(group, 1).count, 3);
        assert_eq!(element(group, 2).count, 3);
    }

    #[test]
    fn first_recipe_only() {
        let mut records = base_records();
        records
            .recipes
            .push(recipe("Torch", 1, &[("Gel", 5)], "Work Bench"));
        let data = GameData::new(records);
        let root = build(&data, "Torch").unwrap();
        let group = only_group(&root);
        assert_eq!(group.elements.len(), 3);
        assert_eq!(element(group, 0).title(), BY_HAND);
    }

    #[test]
    fn item_alias_resolves_to_canonical_record() {
        let mut records = base_records();
        records.misc = Misc {
            name_replacements: [(String::from("Slime Gel"), String::from("Gel"))]
                .into_iter()
                .collect(),
            npc_replacements: std::collections::BTreeMap::new(),
        };
        let data = GameData::new(records);
        let root = build(&data, "Slime Gel").unwrap();
        assert_eq!(root.title(), "Gel");
        assert_eq!(only_group(&root).kind, GroupKind::Drop);
    }

    #[test]
    fn unknown_root_is_not_found() {
        let data = GameData::new(base_records());
        let err = build(&data, "Zenith").unwrap_err();
        assert!(matches!(
            err,
            GuideError::NotFound { kind: RecordKind::Item, ref name } if name == "Zenith"
        ));
    }

    #[test]
    fn missing_table_is_fatal() {
        let mut records = base_records();
        records.tables.retain(|t| t.name != "By Hand");
        let data = GameData::new(records);
        assert!(matches!(
            build(&data, "Torch").unwrap_err(),
            GuideError::NotFound { kind: RecordKind::Table, .. }
        ));
    }

    #[test]
    fn unknown_drop_source_type_is_fatal() {
        let mut records = base_records();
        records.drops = vec![drop("Angler", "Quest", "Gel")];
        let data = GameData::new(records);
        assert!(matches!(
            build(&data, "Gel").unwrap_err(),
            GuideError::UnrecognizedEnum(ref e) if e.value == "Quest"
        ));
    }

    #[test]
    fn chests_come_before_enemies() {
        let mut records = base_records();
        records.items.push(item("Wooden Chest"));
        records.drops = vec![
            drop("Blue Slime", "NPC", "Gel"),
            drop("Wooden Chest", "Chest", "Gel"),
        ];
        let data = GameData::new(records);
        let root = build(&data, "Gel").unwrap();
        let group = only_group(&root);
        let kinds: Vec<_> = group.elements.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Chest, NodeKind::Npc]);
    }

    #[test]
    fn vendor_used_when_nothing_else_applies() {
        let mut records = base_records();
        records.items.push(sold_by("Mining Helmet", &["Merchant"]));
        records.npcs.push(npc("Merchant"));
        let data = GameData::new(records);
        let root = build(&data, "Mining Helmet").unwrap();
        let group = only_group(&root);
        assert_eq!(group.kind, GroupKind::Vendor);
        assert_eq!(element(group, 0).title(), "Merchant");
        assert_eq!(element(group, 0).kind, NodeKind::Npc);
    }

    #[test]
    fn npc_alias_is_applied_for_vendors() {
        let mut records = base_records();
        records.items.push(sold_by("Rope", &["Merchant (NPC)"]));
        records.npcs.push(npc("Merchant"));
        records.misc.npc_replacements =
            [(String::from("Merchant (NPC)"), String::from("Merchant"))]
                .into_iter()
                .collect();
        let data = GameData::new(records);
        let root = build(&data, "Rope").unwrap();
        assert_eq!(element(only_group(&root), 0).title(), "Merchant");
    }

    #[test]
    fn item_without_sources_is_terminal() {
        let mut records = base_records();
        records.items.push(item("Dirt Block"));
        let data = GameData::new(records);
        assert!(build(&data, "Dirt Block").unwrap().is_terminal());
    }

    #[test]
    fn boss_drop_carries_item_summon() {
        let mut records = base_records();
        records.items.extend([item("Lens"), item("Suspicious Looking Eye")]);
        records.drops.push(drop("Eye of Cthulhu", "NPC", "Lens"));
        records.bosses = vec![boss("Eye of Cthulhu", "Item", &["Suspicious Looking Eye"], 1)];
        records.drops.push(drop("Demon Eye", "NPC", "Suspicious Looking Eye"));
        records.npcs.push(npc("Demon Eye"));
        let data = GameData::new(records);

        let root = build(&data, "Lens").unwrap();
        let boss_node = element(only_group(&root), 0);
        assert_eq!(boss_node.kind, NodeKind::Boss);
        assert_eq!(boss_node.identity.first().unwrap().image.as_deref(), Some("Eye of Cthulhu icon.png"));
        let summon = only_group(boss_node);
        assert_eq!(summon.kind, GroupKind::Summon);
        let eye = element(summon, 0);
        assert_eq!(eye.title(), "Suspicious Looking Eye");
        // The summon item is expanded through the worklist.
        assert_eq!(only_group(eye).kind, GroupKind::Drop);
    }

    #[test]
    fn auto_boss_has_no_summon_group() {
        let mut records = base_records();
        records.drops.push(drop("Lepus", "NPC", "Wood"));
        records.bosses = vec![boss("Lepus", "Auto", &[], 1)];
        let data = GameData::new(records);
        let root = build(&data, "Wood").unwrap();
        assert!(element(only_group(&root), 0).is_terminal());
    }

    #[test]
    fn item_and_object_boss_wraps_item_under_object() {
        let mut records = base_records();
        records.items.extend([item("Soul"), item("Guide Voodoo Doll")]);
        records.drops.push(drop("Wall of Flesh", "NPC", "Soul"));
        records.bosses = vec![boss("Wall of Flesh", "Item and Object", &["Guide Voodoo Doll", "Lava"], 1)];
        records.objects = vec![object("Lava")];
        let data = GameData::new(records);
        let root = build(&data, "Soul").unwrap();
        let summon = only_group(element(only_group(&root), 0));
        let lava = element(summon, 0);
        assert_eq!(lava.kind, NodeKind::Object);
        let inner = only_group(lava);
        assert_eq!(inner.kind, GroupKind::Summon);
        assert_eq!(element(inner, 0).title(), "Guide Voodoo Doll");
    }

    #[test]
    fn missing_summon_object_is_fatal() {
        let mut records = base_records();
        records.drops.push(drop("Skeletron", "NPC", "Wood"));
        records.bosses = vec![boss("Skeletron", "Object", &["Old Man"], 1)];
        let data = GameData::new(records);
        assert!(matches!(
            build(&data, "Wood").unwrap_err(),
            GuideError::NotFound { kind: RecordKind::Object, .. }
        ));
    }

    #[test]
    fn unknown_boss_summon_type_is_fatal() {
        let mut records = base_records();
        records.drops.push(drop("Skeletron", "NPC", "Wood"));
        records.bosses = vec![boss("Skeletron", "Ritual", &[], 1)];
        let data = GameData::new(records);
        assert!(matches!(
            build(&data, "Wood").unwrap_err(),
            GuideError::UnrecognizedEnum(ref e) if e.field == "boss_summon_type"
        ));
    }

    #[test]
    fn event_enemy_keeps_base_node_and_nests_event() {
        let mut records = base_records();
        records.items.extend([item("Spiky Ball"), item("Goblin Battle Standard")]);
        records.drops.push(drop("Goblin Peon", "NPC", "Spiky Ball"));
        records.npcs.push(npc("Goblin Peon"));
        records.events = vec![event("Goblin Army", "Item", &["Goblin Battle Standard"], &["Goblin Peon"])];
        let data = GameData::new(records);

        let root = build(&data, "Spiky Ball").unwrap();
        let peon = element(only_group(&root), 0);
        assert_eq!(peon.kind, NodeKind::Npc);
        let event_group = only_group(peon);
        assert_eq!(event_group.kind, GroupKind::Event);
        let army = element(event_group, 0);
        assert_eq!(army.kind, NodeKind::Event);
        let summon = only_group(army);
        assert_eq!(element(summon, 0).title(), "Goblin Battle Standard");
    }

    #[test]
    fn event_boss_keeps_its_own_summon() {
        let mut records = base_records();
        records.items.extend([item("Pumpkin Medallion"), item("Spooky Wood")]);
        records.drops.push(drop("Mourning Wood", "NPC", "Spooky Wood"));
        records.bosses = vec![boss("Mourning Wood", "Auto", &[], 1)];
        records.events = vec![event("Pumpkin Moon", "Item", &["Pumpkin Medallion"], &["Mourning Wood"])];
        let data = GameData::new(records);
        let root = build(&data, "Spooky Wood").unwrap();
        let wood = element(only_group(&root), 0);
        assert_eq!(wood.kind, NodeKind::Boss);
        assert_eq!(only_group(wood).kind, GroupKind::Event);
    }

    #[test]
    fn natural_event_has_no_summon_group() {
        let mut records = base_records();
        records.items.push(item("Shark Fin"));
        records.drops.push(drop("Blood Zombie", "NPC", "Shark Fin"));
        records.npcs.push(npc("Blood Zombie"));
        records.events = vec![event("Blood Moon", "Natural", &[], &["Blood Zombie"])];
        let data = GameData::new(records);
        let root = build(&data, "Shark Fin").unwrap();
        let zombie = element(only_group(&root), 0);
        assert!(element(only_group(zombie), 0).is_terminal());
    }

    /// "Spiky Ball" dropped by "Goblin Peon", who appears in `events`.
    fn peon_records(events: Vec<Event>) -> RawRecords {
        let mut records = base_records();
        records.items.extend([item("Spiky Ball"), item("Goblin Battle Standard")]);
        records.drops.push(drop("Goblin Peon", "NPC", "Spiky Ball"));
        records.npcs.push(npc("Goblin Peon"));
        records.events = events;
        records
    }

    fn object(name: &str) -> GameObject {
        GameObject {
            name: name.to_owned(),
            image: None,
        }
    }

    /// The event node nested under the first drop source of `root`.
    fn peon_event(root: &AcquisitionNode) -> &AcquisitionNode {
        let peon = element(only_group(root), 0);
        let event_group = only_group(peon);
        assert_eq!(event_group.kind, GroupKind::Event);
        element(event_group, 0)
    }

    #[test]
    fn enemy_in_several_events_uses_the_last_one() {
        let data = GameData::new(peon_records(vec![
            event("Alpha Invasion", "Item", &["Goblin Battle Standard"], &["Goblin Peon"]),
            event("Beta Invasion", "Item", &["Goblin Battle Standard"], &["Goblin Peon"]),
        ]));
        let root = build(&data, "Spiky Ball").unwrap();
        assert_eq!(peon_event(&root).title(), "Beta Invasion");
        assert_eq!(data.event_featuring("Goblin Peon").unwrap().name, "Beta Invasion");
    }

    #[test]
    fn object_event_summon_is_an_object_node() {
        let mut records = peon_records(vec![event("Goblin Army", "Object", &["Shadow Orb"], &["Goblin Peon"])]);
        records.objects = vec![object("Shadow Orb")];
        let data = GameData::new(records);
        let root = build(&data, "Spiky Ball").unwrap();
        let summon = only_group(peon_event(&root));
        assert_eq!(summon.kind, GroupKind::Summon);
        assert_eq!(summon.elements.len(), 1);
        assert_eq!(element(summon, 0).kind, NodeKind::Object);
        assert_eq!(element(summon, 0).title(), "Shadow Orb");
    }

    #[test]
    fn item_and_object_event_summon_lists_object_then_item() {
        let mut records = peon_records(vec![event(
            "Old One's Army",
            "Item and Object",
            &["Goblin Battle Standard", "Eternia Crystal Stand"],
            &["Goblin Peon"],
        )]);
        records.objects = vec![object("Eternia Crystal Stand")];
        let data = GameData::new(records);
        let root = build(&data, "Spiky Ball").unwrap();
        let summon = only_group(peon_event(&root));
        let kinds: Vec<_> = summon.elements.iter().map(|n| (n.kind, n.title())).collect();
        assert_eq!(kinds, vec![
            (NodeKind::Object, "Eternia Crystal Stand"),
            (NodeKind::Item, "Goblin Battle Standard"),
        ]);
        assert!(element(summon, 0).is_terminal());
    }

    #[test]
    fn enemy_event_summon_resolves_the_first_source() {
        let mut records = peon_records(vec![event(
            "Lunar Events",
            "Enemy",
            &["Lunatic Cultist", "Blue Slime"],
            &["Goblin Peon"],
        )]);
        records.bosses = vec![boss("Lunatic Cultist", "Auto", &[], 1)];
        let data = GameData::new(records);
        let root = build(&data, "Spiky Ball").unwrap();
        let summon = only_group(peon_event(&root));
        assert_eq!(summon.elements.len(), 1);
        let cultist = element(summon, 0);
        assert_eq!(cultist.kind, NodeKind::Boss);
        assert_eq!(cultist.title(), "Lunatic Cultist");
        assert!(cultist.is_terminal());
    }

    #[test]
    fn unknown_event_summon_type_is_fatal() {
        let data = GameData::new(peon_records(vec![event("Goblin Army", "Ritual", &[], &["Goblin Peon"])]));
        assert!(matches!(
            build(&data, "Spiky Ball").unwrap_err(),
            GuideError::UnrecognizedEnum(ref e) if e.field == "event_summon_type" && e.value == "Ritual"
        ));
    }

    #[test]
    fn missing_event_summon_source_is_fatal() {
        let data = GameData::new(peon_records(vec![event("Goblin Army", "Item", &[], &["Goblin Peon"])]));
        assert!(matches!(
            build(&data, "Spiky Ball").unwrap_err(),
            GuideError::NotFound { kind: RecordKind::SummonSource, ref name } if name == "Goblin Army#0"
        ));
    }

    #[test]
    fn missing_second_summon_source_is_fatal() {
        let data = GameData::new(peon_records(vec![event(
            "Old One's Army",
            "Item and Object",
            &["Goblin Battle Standard"],
            &["Goblin Peon"],
        )]));
        assert!(matches!(
            build(&data, "Spiky Ball").unwrap_err(),
            GuideError::NotFound { kind: RecordKind::SummonSource, ref name } if name == "Old One's Army#1"
        ));
    }

    #[test]
    fn enemy_summoned_boss_lists_every_prerequisite_enemy() {
        let mut records = base_records();
        records.items.push(item("Luminite"));
        records.drops.push(drop("Moon Lord", "NPC", "Luminite"));
        records.npcs.extend([npc("Solar Pillar"), npc("Vortex Pillar")]);
        records.bosses = vec![boss("Moon Lord", "Enemy", &["Solar Pillar", "Vortex Pillar"], 1)];
        let data = GameData::new(records);
        let root = build(&data, "Luminite").unwrap();
        let moon_lord = element(only_group(&root), 0);
        assert_eq!(moon_lord.kind, NodeKind::Boss);
        let summon = only_group(moon_lord);
        assert_eq!(summon.kind, GroupKind::Summon);
        let pillars: Vec<_> = summon.elements.iter().map(|n| (n.kind, n.title())).collect();
        assert_eq!(pillars, vec![
            (NodeKind::Npc, "Solar Pillar"),
            (NodeKind::Npc, "Vortex Pillar"),
        ]);
    }

    #[test]
    fn mutually_summoning_enemies_do_not_recurse_forever() {
        let mut records = base_records();
        records.items.push(item("Relic"));
        records.drops.push(drop("Twin A", "NPC", "Relic"));
        records.bosses = vec![
            boss("Twin A", "Enemy", &["Twin B"], 1),
            boss("Twin B", "Enemy", &["Twin A"], 1),
        ];
        let data = GameData::new(records);
        let root = build(&data, "Relic").unwrap();
        let a = element(only_group(&root), 0);
        let b = element(only_group(a), 0);
        assert_eq!(b.title(), "Twin B");
        assert!(b.is_terminal());
    }

    #[test]
    fn station_branch_survives_when_station_needs_steps() {
        let mut records = base_records();
        records.items.push(item("Chair"));
        records.recipes.push(recipe("Chair", 1, &[("Wood", 4)], "Work Bench"));
        let data = GameData::new(records);
        let root = build(&data, "Chair").unwrap();
        let station = element(only_group(&root), 0);
        let other = only_group(station);
        assert_eq!(other.kind, GroupKind::Other);
        assert_eq!(element(other, 0).title(), "Work Bench");
        assert!(!element(other, 0).is_terminal());
    }

    #[test]
    fn station_branch_pruned_when_station_already_expanded() {
        let mut records = base_records();
        records.items.push(item("Chair"));
        records.recipes.push(recipe("Chair", 1, &[("Wood", 4)], "Work Bench"));
        let data = GameData::new(records);
        let mut builder = TreeBuilder::new(&data, MemoryInfoCache::new());
        let mut tracker = ExpansionTracker::seeded(["Work Bench"]);
        let root = builder.generate_tree("Chair", &mut tracker).unwrap();
        assert!(element(only_group(&root), 0).is_terminal());
    }

    #[test]
    fn prune_keeps_non_other_groups() {
        let mut node = AcquisitionNode::new(NodeKind::Table, NodeIdentity::new("Anvil", None));
        node.children.push(ChildGroup::new(GroupKind::Other));
        node.children.push(ChildGroup::new(GroupKind::Obtain));
        prune_idle_branches(&mut node);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children.first().unwrap().kind, GroupKind::Obtain);
    }
}
