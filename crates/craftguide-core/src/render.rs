//! Human-readable notes for child groups.
//!
//! Once a tree is final, [`annotate`] gives every [`ChildGroup`] a
//! [`TextNote`]: a sentence made of text segments and node references
//! ("Combine [12 Iron Bar] and [3 Wood] into [1 Iron Pickaxe] at
//! [1 Iron Anvil]") plus the tutorial video that goes with it. A note only
//! depends on the group's parent and the group's own elements.

use std::fmt;

use craftguide_types::{GroupKind, NodeKind, NoteType};
use serde::{Deserialize, Serialize};

use crate::builder::BY_HAND;
use crate::media::{image_path, video_path};
use crate::node::{AcquisitionNode, ChildGroup};

/// One segment of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    /// Text or node reference.
    pub note_type: NoteType,
    /// The text itself, or the referenced node's title.
    pub note_text: String,
    /// Picture of the referenced node, if it has one.
    pub note_image: Option<String>,
    /// How many of the referenced node are needed.
    pub note_count: u32,
}

/// The rendered description of one child group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNote {
    /// Tutorial video path.
    pub video: Option<String>,
    /// Kind of the described group.
    #[serde(rename = "type")]
    pub kind: GroupKind,
    /// Sentence segments in reading order.
    pub content: Vec<NoteContent>,
}

impl TextNote {
    /// Whether the note says nothing (event and auxiliary groups).
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    const fn blank(kind: GroupKind) -> Self {
        Self {
            video: None,
            kind,
            content: Vec::new(),
        }
    }
}

impl fmt::Display for TextNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.content {
            match segment.note_type {
                NoteType::Text => f.write_str(&segment.note_text)?,
                NoteType::Image => write!(f, "[{} {}]", segment.note_count, segment.note_text)?,
            }
        }
        Ok(())
    }
}

/// Attach a note to every group in the tree.
pub fn annotate(node: &mut AcquisitionNode) {
    let notes: Vec<TextNote> = node
        .children
        .iter()
        .map(|group| render_group(node, group))
        .collect();
    for (group, note) in node.children.iter_mut().zip(notes) {
        group.note = Some(note);
        for element in &mut group.elements {
            annotate(element);
        }
    }
}

/// Render the note for `group`, a child group of `parent`.
pub fn render_group(parent: &AcquisitionNode, group: &ChildGroup) -> TextNote {
    let mut note = Sentence::default();
    let elements: Vec<&AcquisitionNode> = group.elements.iter().collect();

    let video = match group.kind {
        GroupKind::Recipe => {
            let Some((station, ingredients)) = elements.split_first() else {
                return TextNote::blank(group.kind);
            };
            note.text(if ingredients.len() == 1 { "Craft " } else { "Combine " })
                .list(ingredients, true)
                .text(" into ")
                .node(parent);
            if station.title() == BY_HAND {
                note.text(" by hand");
            } else {
                note.text(" at ").node(station);
            }
            Some(video_path("table", station.title()))
        }
        GroupKind::Drop => {
            let chests: Vec<_> = elements
                .iter()
                .copied()
                .filter(|n| n.kind == NodeKind::Chest)
                .collect();
            let enemies: Vec<_> = elements
                .iter()
                .copied()
                .filter(|n| matches!(n.kind, NodeKind::Npc | NodeKind::Boss))
                .collect();
            note.text("Get ").node(parent);
            if !chests.is_empty() {
                note.text(" by looting ").list(&chests, false);
            }
            if !enemies.is_empty() {
                note.text(if chests.is_empty() { " by killing " } else { " or by killing " })
                    .list(&enemies, false);
            }
            elements.first().map(|n| video_path("drop", n.title()))
        }
        GroupKind::Vendor => {
            note.text("Buy ")
                .node(parent)
                .text(" from ")
                .list(&elements, false);
            elements.first().map(|n| video_path("vendor", n.title()))
        }
        GroupKind::Summon if parent.kind == NodeKind::Object => {
            note.text("Activate ")
                .node(parent)
                .text(" using ")
                .list(&elements, false);
            Some(video_path("summon", parent.title()))
        }
        GroupKind::Summon => {
            note.text("Summon ").node(parent);
            match elements.as_slice() {
                [first, ..] if first.kind == NodeKind::Item => {
                    note.text(" using ").list(&elements, false);
                }
                [object, item, rest @ ..]
                    if object.kind == NodeKind::Object && item.kind == NodeKind::Item =>
                {
                    let items: Vec<_> = std::iter::once(*item).chain(rest.iter().copied()).collect();
                    note.text(" at ").node(object).text(" using ").list(&items, false);
                }
                [first, ..] if first.kind == NodeKind::Object => {
                    note.text(" at ").list(&elements, false);
                }
                [first, ..] if matches!(first.kind, NodeKind::Npc | NodeKind::Boss) => {
                    note.text(" by killing ").list(&elements, true);
                }
                _ => {}
            }
            Some(video_path("summon", parent.title()))
        }
        GroupKind::Obtain => {
            note.text("Find and obtain ").node(parent);
            Some(video_path("obtain", parent.title()))
        }
        GroupKind::Event | GroupKind::Other => return TextNote::blank(group.kind),
    };

    TextNote {
        video,
        kind: group.kind,
        content: note.segments,
    }
}

/// Accumulates note segments.
#[derive(Debug, Default)]
struct Sentence {
    segments: Vec<NoteContent>,
}

impl Sentence {
    fn text(&mut self, text: &str) -> &mut Self {
        self.segments.push(NoteContent {
            note_type: NoteType::Text,
            note_text: text.to_owned(),
            note_image: None,
            note_count: 1,
        });
        self
    }

    fn node(&mut self, node: &AcquisitionNode) -> &mut Self {
        self.segments.push(NoteContent {
            note_type: NoteType::Image,
            note_text: node.title().to_owned(),
            note_image: image_path(node.kind, node.title()),
            note_count: node.count,
        });
        self
    }

    /// `A`, `A and B`, `A, B, and C` (or "or" when not `additive`).
    fn list(&mut self, nodes: &[&AcquisitionNode], additive: bool) -> &mut Self {
        let conjunction = if additive { "and" } else { "or" };
        match nodes {
            [] => {}
            [only] => {
                self.node(only);
            }
            [first, second] => {
                self.node(first)
                    .text(&format!(" {conjunction} "))
                    .node(second);
            }
            [init @ .., last] => {
                for node in init {
                    self.node(node).text(", ");
                }
                self.text(&format!("{conjunction} ")).node(last);
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
