//! Acquisition tree types.
//!
//! An [`AcquisitionNode`] is one obtainable thing (item, station, chest,
//! enemy, boss, event, object). Its [`ChildGroup`]s are the ways of getting
//! it; each group owns the nodes it needs. Nodes exclusively own their
//! children, and the builder guarantees the tree never loops back on itself.
//!
//! The [`fmt::Display`] impl prints the tree with box-drawing guides, one
//! node or group per line, which the engine logs at `debug` level.

use std::fmt;

use craftguide_types::{GroupKind, NodeKind};

use crate::render::TextNote;

/// One (title, image) pair identifying what a node shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    /// Display name.
    pub title: String,
    /// Image file name from the records, when known.
    pub image: Option<String>,
}

impl NodeIdentity {
    /// Create an identity.
    pub fn new(title: impl Into<String>, image: Option<String>) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }
}

/// A node of an acquisition tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionNode {
    /// What the node shows. Normally one entry; a crafting-station node
    /// requiring several stations fuses them.
    pub identity: Vec<NodeIdentity>,
    /// What the node stands for.
    pub kind: NodeKind,
    /// How many are needed by the parent (at least 1).
    pub count: u32,
    /// Ways of obtaining this node; empty means terminal.
    pub children: Vec<ChildGroup>,
    /// Item names from the root down to this node, inclusive.
    /// Empty for non-item nodes.
    pub(crate) history: Vec<String>,
}

impl AcquisitionNode {
    /// A childless node with a single identity and a count of 1.
    pub fn new(kind: NodeKind, identity: NodeIdentity) -> Self {
        Self::fused(kind, vec![identity])
    }

    /// A childless node showing several identities at once.
    pub const fn fused(kind: NodeKind, identity: Vec<NodeIdentity>) -> Self {
        Self {
            identity,
            kind,
            count: 1,
            children: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Set the required count; zero is raised to 1.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count.max(1);
        self
    }

    /// The primary title.
    pub fn title(&self) -> &str {
        self.identity.first().map_or("", |id| id.title.as_str())
    }

    /// Whether the node has no ways of obtaining it listed.
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Ancestor item names (root first), ending with this node's own name
    /// for item nodes.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The first child group of the given kind.
    pub fn group(&self, kind: GroupKind) -> Option<&ChildGroup> {
        self.children.iter().find(|group| group.kind == kind)
    }

    /// This node and every node below it, in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, lead: &str, prefix: &str) -> fmt::Result {
        let name = self
            .identity
            .iter()
            .map(|id| id.title.as_str())
            .collect::<Vec<_>>()
            .join(" + ");
        if self.count > 1 {
            writeln!(f, "{lead}{prefix}{name} ({}) [{}]", self.count, self.kind)?;
        } else {
            writeln!(f, "{lead}{prefix}{name} [{}]", self.kind)?;
        }
        let inner = format!("{lead}{}", continuation(prefix));
        let last = self.children.len().saturating_sub(1);
        for (i, group) in self.children.iter().enumerate() {
            group.write_tree(f, &inner, branch(i == last))?;
        }
        Ok(())
    }
}

impl fmt::Display for AcquisitionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, "", "")
    }
}

/// One way of satisfying a node's requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildGroup {
    /// How the elements combine.
    pub kind: GroupKind,
    /// Required or alternative nodes. A recipe group starts with its station.
    pub elements: Vec<AcquisitionNode>,
    /// Rendered description, attached once the tree is final.
    pub note: Option<TextNote>,
}

impl ChildGroup {
    /// An empty group.
    pub const fn new(kind: GroupKind) -> Self {
        Self::with_elements(kind, Vec::new())
    }

    /// A group holding `elements`.
    pub const fn with_elements(kind: GroupKind, elements: Vec<AcquisitionNode>) -> Self {
        Self {
            kind,
            elements,
            note: None,
        }
    }

    /// Whether the group contributes nothing: no elements, or only
    /// elements without children of their own.
    pub fn is_idle(&self) -> bool {
        self.elements.iter().all(AcquisitionNode::is_terminal)
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, lead: &str, prefix: &str) -> fmt::Result {
        writeln!(f, "{lead}{prefix}{}", self.kind)?;
        let inner = format!("{lead}{}", continuation(prefix));
        let last = self.elements.len().saturating_sub(1);
        for (i, element) in self.elements.iter().enumerate() {
            element.write_tree(f, &inner, branch(i == last))?;
        }
        Ok(())
    }
}

const FORK: &str = "├── ";
const END: &str = "└── ";

const fn branch(is_last: bool) -> &'static str {
    if is_last { END } else { FORK }
}

/// Indentation carried below a line drawn with `prefix`.
fn continuation(prefix: &str) -> &'static str {
    match prefix {
        FORK => "│   ",
        END => "    ",
        _ => "",
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a AcquisitionNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AcquisitionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for group in node.children.iter().rev() {
            self.stack.extend(group.elements.iter().rev());
        }
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
