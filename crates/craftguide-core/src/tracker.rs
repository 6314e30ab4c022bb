//! Batch-wide record of which items have already been expanded.
//!
//! Items requested in one batch share a single [`ExpansionTracker`]. An item
//! expanded while building an earlier tree is not expanded again later; it
//! shows up as a terminal reference instead, so each acquisition path is
//! spelled out once per batch.
//!
//! A build works on an [`ExpansionRun`] (a private copy of the set) and only
//! [`ExpansionTracker::commit`]s it on success, so a failed build leaves the
//! tracker untouched.

use std::collections::BTreeSet;

/// Items already expanded in this batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionTracker {
    expanded: BTreeSet<String>,
}

impl ExpansionTracker {
    /// An empty tracker.
    pub const fn new() -> Self {
        Self {
            expanded: BTreeSet::new(),
        }
    }

    /// A tracker that treats `items` as already expanded (typically the
    /// common crafting stations).
    pub fn seeded<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `item` has been expanded.
    pub fn contains(&self, item: &str) -> bool {
        self.expanded.contains(item)
    }

    /// Number of expanded items.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing has been expanded yet.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Expanded item names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Start a build against a copy of the current set.
    pub fn begin_run(&self) -> ExpansionRun {
        ExpansionRun {
            expanded: self.expanded.clone(),
        }
    }

    /// Adopt everything a successful run expanded.
    pub fn commit(&mut self, run: ExpansionRun) {
        self.expanded = run.expanded;
    }
}

/// Working copy of the expanded set for one tree build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRun {
    expanded: BTreeSet<String>,
}

impl ExpansionRun {
    /// Record `item` as expanded; `false` if it already was.
    pub fn claim(&mut self, item: &str) -> bool {
        if self.expanded.contains(item) {
            return false;
        }
        self.expanded.insert(item.to_owned())
    }

    /// Whether `item` has been expanded in the batch so far.
    pub fn contains(&self, item: &str) -> bool {
        self.expanded.contains(item)
    }
}
