//! Turning an annotated tree into an ordered list of steps.
//!
//! [`flatten`] walks the tree in post-order so that everything a node needs
//! is listed before the node itself. Only nodes that can actually be acted
//! on become steps: at least one group, and a non-empty note on every group.
//! Event and auxiliary groups render blank, so nodes carrying them are
//! skipped while their descendants still contribute.

use std::collections::BTreeSet;

use craftguide_types::NodeKind;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::TreeBuilder;
use crate::cache::InfoCache;
use crate::error::GuideError;
use crate::media::{image_path, video_path};
use crate::node::AcquisitionNode;
use crate::render::{TextNote, annotate};
use crate::tracker::ExpansionTracker;

/// One actionable node of a guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Title of the node.
    pub item: String,
    /// Picture of the node.
    pub image: Option<String>,
    /// One note per way of obtaining the node.
    pub options: Vec<TextNote>,
}

/// The complete guide for one requested item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideEntry {
    /// The requested item name.
    pub item: String,
    /// Picture of the requested item.
    pub image: String,
    /// Showcase video of the requested item.
    pub video: String,
    /// Steps, prerequisites first.
    pub guide: Vec<Step>,
}

impl GuideEntry {
    /// Every image and video path the entry refers to, sorted.
    pub fn media_paths(&self) -> BTreeSet<&str> {
        let mut paths = BTreeSet::from([self.image.as_str(), self.video.as_str()]);
        for step in &self.guide {
            paths.extend(step.image.as_deref());
            for note in &step.options {
                paths.extend(note.video.as_deref());
                paths.extend(note.content.iter().filter_map(|c| c.note_image.as_deref()));
            }
        }
        paths
    }
}

/// Collect the steps of an annotated tree, prerequisites first.
pub fn flatten(root: &AcquisitionNode) -> Vec<Step> {
    let mut steps = Vec::new();
    collect_steps(root, &mut steps);
    steps
}

fn collect_steps(node: &AcquisitionNode, steps: &mut Vec<Step>) {
    for group in &node.children {
        for element in &group.elements {
            collect_steps(element, steps);
        }
    }

    let options: Option<Vec<TextNote>> = node
        .children
        .iter()
        .map(|group| group.note.clone().filter(|note| !note.is_empty()))
        .collect();
    if let Some(options) = options.filter(|o| !o.is_empty()) {
        steps.push(Step {
            item: node.title().to_owned(),
            image: image_path(node.kind, node.title()),
            options,
        });
    }
}

/// Build, annotate and flatten the guide for one requested item.
pub fn build_guide<C: InfoCache>(
    item: &str,
    builder: &mut TreeBuilder<'_, C>,
    tracker: &mut ExpansionTracker,
) -> Result<(AcquisitionNode, GuideEntry), GuideError> {
    let mut tree = builder.generate_tree(item, tracker)?;
    annotate(&mut tree);
    let guide = flatten(&tree);
    info!(item, steps = guide.len(), "Guide built");

    let entry = GuideEntry {
        item: item.to_owned(),
        image: image_path(NodeKind::Item, item).unwrap_or_default(),
        video: video_path("show", item),
        guide,
    };
    Ok((tree, entry))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftguide_types::GroupKind;

    use super::*;
    use crate::node::{ChildGroup, NodeIdentity};

    fn leaf(kind: NodeKind, title: &str) -> AcquisitionNode {
        AcquisitionNode::new(kind, NodeIdentity::new(title, None))
    }

    fn with_group(mut node: AcquisitionNode, kind: GroupKind, elements: Vec<AcquisitionNode>) -> AcquisitionNode {
        node.children.push(ChildGroup::with_elements(kind, elements));
        node
    }

    #[test]
    fn post_order_lists_prerequisites_first() {
        let bar = with_group(leaf(NodeKind::Item, "Iron Bar"), GroupKind::Obtain, Vec::new());
        let mut pickaxe = with_group(leaf(NodeKind::Item, "Iron Pickaxe"), GroupKind::Recipe, vec![
            leaf(NodeKind::Table, "Iron Anvil"),
            bar,
        ]);
        annotate(&mut pickaxe);

        let steps = flatten(&pickaxe);
        let items: Vec<_> = steps.iter().map(|s| s.item.as_str()).collect();
        assert_eq!(items, vec!["Iron Bar", "Iron Pickaxe"]);
        assert_eq!(steps.last().unwrap().image.as_deref(), Some("images/item/iron_pickaxe.png"));
    }

    #[test]
    fn blank_notes_suppress_the_step_but_not_descendants() {
        let standard = with_group(leaf(NodeKind::Item, "Goblin Battle Standard"), GroupKind::Obtain, Vec::new());
        let army = with_group(leaf(NodeKind::Event, "Goblin Army"), GroupKind::Summon, vec![standard]);
        let mut peon = with_group(leaf(NodeKind::Npc, "Goblin Peon"), GroupKind::Event, vec![army]);
        annotate(&mut peon);

        let items: Vec<_> = flatten(&peon).into_iter().map(|s| s.item).collect();
        assert_eq!(items, vec!["Goblin Battle Standard", "Goblin Army"]);
    }

    #[test]
    fn unannotated_tree_has_no_steps() {
        let tree = with_group(leaf(NodeKind::Item, "Daybloom"), GroupKind::Obtain, Vec::new());
        assert!(flatten(&tree).is_empty());
    }

    #[test]
    fn terminal_nodes_are_not_steps() {
        let mut tree = leaf(NodeKind::Item, "Dirt Block");
        annotate(&mut tree);
        assert!(flatten(&tree).is_empty());
    }

    #[test]
    fn media_paths_cover_every_reference() {
        let mut tree = with_group(leaf(NodeKind::Item, "Daybloom"), GroupKind::Obtain, Vec::new());
        annotate(&mut tree);
        let entry = GuideEntry {
            item: String::from("Daybloom"),
            image: String::from("images/item/daybloom.png"),
            video: String::from("videos/show_daybloom.mp4"),
            guide: flatten(&tree),
        };
        let paths: Vec<_> = entry.media_paths().into_iter().collect();
        assert_eq!(paths, vec![
            "images/item/daybloom.png",
            "videos/obtain_daybloom.mp4",
            "videos/show_daybloom.mp4",
        ]);
    }
}
