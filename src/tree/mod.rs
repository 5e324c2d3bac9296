//! Story Hierarchy
//!
//! The hierarchy mapping: one insertion-ordered map from identifier to
//! either a group (organizational node) or a leaf (registered story).
//! Insertion order is the canonical order for sequential navigation.

pub mod builder;
pub mod path;

use crate::record::LeafRecord;
use crate::types::EntryId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// A synthesized grouping node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: EntryId,
    pub name: String,
    pub children: Vec<EntryId>,
    pub parent: Option<EntryId>,
    pub depth: usize,
    pub is_root: bool,
    /// Deepest group of its chain: its children are leaves
    pub is_component: bool,
}

/// A registered story attached under its component group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    pub id: EntryId,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub children: Vec<EntryId>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    pub parent: EntryId,
}

impl Leaf {
    pub fn from_record(record: &LeafRecord, parent: EntryId, parameters: Map<String, Value>) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: record.kind.clone(),
            children: record.children.clone(),
            parameters,
            parent,
        }
    }
}

/// Hierarchy entry: explicit kind tag instead of field-presence checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Group(Group),
    Leaf(Leaf),
}

impl Entry {
    pub fn id(&self) -> &str {
        match self {
            Entry::Group(group) => &group.id,
            Entry::Leaf(leaf) => &leaf.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Group(group) => &group.name,
            Entry::Leaf(leaf) => &leaf.name,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            Entry::Group(group) => group.parent.as_deref(),
            Entry::Leaf(leaf) => Some(&leaf.parent),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Entry::Group(group) => Some(group),
            Entry::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Entry::Leaf(leaf) => Some(leaf),
            Entry::Group(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf(_))
    }

    pub(crate) fn kind_label(&self) -> &'static str {
        match self {
            Entry::Group(_) => "group",
            Entry::Leaf(_) => "leaf",
        }
    }
}

/// Structural problem found in a merged hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    DanglingParent { id: EntryId, parent: EntryId },
    DanglingChild { id: EntryId, child: EntryId },
    LeafUnderNonComponent { group: EntryId, leaf: EntryId },
    /// A group lists a leaf whose `parent` is another group
    ForeignChild { group: EntryId, leaf: EntryId, parent: EntryId },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DanglingParent { id, parent } => {
                write!(f, "{} references missing parent {}", id, parent)
            }
            IntegrityIssue::DanglingChild { id, child } => {
                write!(f, "{} references missing child {}", id, child)
            }
            IntegrityIssue::LeafUnderNonComponent { group, leaf } => {
                write!(f, "leaf {} is a child of non-component group {}", leaf, group)
            }
            IntegrityIssue::ForeignChild { group, leaf, parent } => {
                write!(f, "group {} lists leaf {} whose parent is {}", group, leaf, parent)
            }
        }
    }
}

/// How entries are laid out after a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyOrder {
    /// Order of first insertion
    #[default]
    Insertion,
    /// Every group directly followed by its descendants
    DepthFirst,
}

/// The hierarchy mapping
///
/// Read-only outside the crate; `StoriesHashStore` is the single writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    entries: IndexMap<EntryId, Entry>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in mapping key order
    pub fn iter(&self) -> impl Iterator<Item = (&EntryId, &Entry)> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.entries.keys()
    }

    /// Leaves in mapping key order
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.entries.values().filter_map(Entry::as_leaf)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.entries.values().filter_map(Entry::as_group)
    }

    /// Component groups (parents of leaves) in mapping key order
    pub fn component_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups().filter(|group| group.is_component)
    }

    pub fn leaf(&self, id: &str) -> Option<&Leaf> {
        self.get(id).and_then(Entry::as_leaf)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.get(id).and_then(Entry::as_group)
    }

    pub(crate) fn entry_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.get_mut(id)
    }

    /// Insert or replace; a replaced key keeps its position
    pub(crate) fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.id().to_string(), entry)
    }

    /// Check the structural invariants of a fully merged mapping
    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for (id, entry) in &self.entries {
            if let Some(parent) = entry.parent() {
                if !self.contains(parent) {
                    issues.push(IntegrityIssue::DanglingParent {
                        id: id.clone(),
                        parent: parent.to_string(),
                    });
                }
            }

            let Entry::Group(group) = entry else {
                continue;
            };
            for child in &group.children {
                match self.get(child) {
                    None => issues.push(IntegrityIssue::DanglingChild {
                        id: id.clone(),
                        child: child.clone(),
                    }),
                    Some(Entry::Leaf(_)) if !group.is_component => {
                        issues.push(IntegrityIssue::LeafUnderNonComponent {
                            group: id.clone(),
                            leaf: child.clone(),
                        })
                    }
                    Some(Entry::Leaf(leaf)) if leaf.parent != *id => {
                        issues.push(IntegrityIssue::ForeignChild {
                            group: id.clone(),
                            leaf: child.clone(),
                            parent: leaf.parent.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        issues
    }

    /// Re-lay entries so each group is followed by its descendants.
    ///
    /// Walks entries in current order; each not yet placed is placed with its
    /// subtree. Leaf `children` are not followed.
    pub(crate) fn reorder_depth_first(&mut self) {
        let mut placed: HashSet<EntryId> = HashSet::with_capacity(self.entries.len());
        let mut order: Vec<EntryId> = Vec::with_capacity(self.entries.len());

        for id in self.entries.keys() {
            self.place_subtree(id, &mut placed, &mut order);
        }

        let mut old = std::mem::take(&mut self.entries);
        self.entries = order
            .into_iter()
            .filter_map(|id| old.swap_remove(&id).map(|entry| (id, entry)))
            .collect();
    }

    fn place_subtree(&self, id: &str, placed: &mut HashSet<EntryId>, order: &mut Vec<EntryId>) {
        let Some(entry) = self.entries.get(id) else {
            return;
        };
        if !placed.insert(id.to_string()) {
            return;
        }
        order.push(id.to_string());
        if let Entry::Group(group) = entry {
            for child in &group.children {
                self.place_subtree(child, placed, order);
            }
        }
    }
}
