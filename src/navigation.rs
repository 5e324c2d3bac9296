//! Navigation
//!
//! Sequential navigation over the hierarchy (next/previous leaf, next/previous
//! component) and selection by id or by (kind, name). Every operation is a
//! pure read of one hierarchy snapshot plus the caller's selection; the only
//! side effect is the call to the [`Navigator`].

use crate::ids::IdSynthesis;
use crate::store::{StatePatch, StateStore};
use crate::tree::{Entry, Hierarchy};
use crate::types::{EntryId, Selection, ViewMode};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routing primitive: moves the active location
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// A navigable location, rendered as `/<viewMode>/<storyId>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub view_mode: ViewMode,
    pub story_id: EntryId,
}

impl Location {
    pub fn new(view_mode: ViewMode, story_id: impl Into<EntryId>) -> Self {
        Self {
            view_mode,
            story_id: story_id.into(),
        }
    }

    /// Whether `story_id` survives a render/parse round trip
    pub fn is_routable(story_id: &str) -> bool {
        !story_id.is_empty() && !story_id.contains('/')
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.view_mode, self.story_id)
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let rest = path
            .strip_prefix('/')
            .ok_or_else(|| format!("Location must start with '/': {}", path))?;
        let (view_mode, story_id) = rest
            .split_once('/')
            .ok_or_else(|| format!("Location must be /<viewMode>/<storyId>: {}", path))?;
        if !Location::is_routable(story_id) {
            return Err(format!("Invalid story id in location: {}", path));
        }
        Ok(Location::new(view_mode.parse()?, story_id))
    }
}

/// Direction of a sequential jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Previous => index.checked_sub(1),
            Direction::Next => Some(index + 1).filter(|next| *next < len),
        }
    }
}

/// Navigator that writes the parsed location into a state store
pub struct StoreNavigator<S: StateStore> {
    store: Arc<S>,
}

impl<S: StateStore> StoreNavigator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: StateStore> Navigator for StoreNavigator<S> {
    fn navigate(&self, path: &str) {
        match path.parse::<Location>() {
            Ok(location) => self
                .store
                .set_state(StatePatch::selection(location.story_id, location.view_mode)),
            Err(e) => warn!(path, error = %e, "Ignoring unroutable location"),
        }
    }
}

/// Navigation over one hierarchy snapshot
pub struct NavigationEngine<'a> {
    hierarchy: &'a Hierarchy,
    ids: &'a dyn IdSynthesis,
    navigator: &'a dyn Navigator,
}

impl<'a> NavigationEngine<'a> {
    pub fn new(
        hierarchy: &'a Hierarchy,
        ids: &'a dyn IdSynthesis,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            hierarchy,
            ids,
            navigator,
        }
    }

    fn go(&self, location: Location) -> Option<Location> {
        debug!(location = %location, "Navigating");
        self.navigator.navigate(&location.to_string());
        Some(location)
    }

    /// The current story id if it is present in the hierarchy
    fn current<'s>(&self, selection: &'s Selection) -> Option<&'s str> {
        selection
            .story_id
            .as_deref()
            .filter(|id| self.hierarchy.contains(id))
    }

    /// Move to the previous or next leaf in mapping key order.
    ///
    /// No-op without a current selection present in the hierarchy, at either
    /// end of the leaf list, or without a view mode.
    pub fn jump_to_story(&self, selection: &Selection, direction: Direction) -> Option<Location> {
        let current = self.current(selection)?;
        let leaves: Vec<&str> = self.hierarchy.leaves().map(|leaf| leaf.id.as_str()).collect();
        let index = leaves.iter().position(|id| *id == current)?;
        let target = leaves[direction.step(index, leaves.len())?];
        let view_mode = selection.view_mode?;

        self.go(Location::new(view_mode, target))
    }

    /// Move to the first leaf of the previous or next component group.
    ///
    /// Same no-op rules as [`jump_to_story`](Self::jump_to_story), and a no-op
    /// when no component lists the current leaf. Defaults to the story view.
    pub fn jump_to_component(
        &self,
        selection: &Selection,
        direction: Direction,
    ) -> Option<Location> {
        let current = self.current(selection)?;
        // A component can also hold deeper groups; only its leaves count
        let components: Vec<Vec<&EntryId>> = self
            .hierarchy
            .component_groups()
            .map(|group| {
                group
                    .children
                    .iter()
                    .filter(|child| self.hierarchy.leaf(child).is_some())
                    .collect::<Vec<_>>()
            })
            .filter(|leaves| !leaves.is_empty())
            .collect();
        let index = components
            .iter()
            .position(|leaves| leaves.iter().any(|leaf| *leaf == current))?;
        let target = components[direction.step(index, components.len())?][0];
        let view_mode = selection.view_mode.unwrap_or_default();

        self.go(Location::new(view_mode, target.clone()))
    }

    /// Select a story by id, by (kind, name), or by name within the current kind.
    ///
    /// - `name` omitted: `kind_or_id` is a full story id.
    /// - `kind_or_id` omitted: the kind is the prefix of the current story id
    ///   as defined by [`IdSynthesis::kind_prefix`].
    /// - both given: the id is synthesized from the pair.
    ///
    /// Defaults to the story view. No-op when neither is given, or when only
    /// a name is given and there is no current selection.
    pub fn select_story(
        &self,
        selection: &Selection,
        kind_or_id: Option<&str>,
        name: Option<&str>,
    ) -> Option<Location> {
        let story_id = match (kind_or_id, name) {
            (Some(id), None) => id.to_string(),
            (Some(kind), Some(name)) => self.ids.story_id(kind, name),
            (None, Some(name)) => {
                let Some(current) = selection.story_id.as_deref() else {
                    debug!(name, "No current selection to resolve a sibling story from");
                    return None;
                };
                self.ids.story_id(self.ids.kind_prefix(current), name)
            }
            (None, None) => return None,
        };

        if !Location::is_routable(&story_id) {
            debug!(story_id = %story_id, "Story id cannot be expressed as a location");
            return None;
        }
        if !self.hierarchy.contains(&story_id) {
            debug!(story_id = %story_id, "Selecting a story not in the hierarchy");
        }
        self.go(Location::new(
            selection.view_mode.unwrap_or_default(),
            story_id,
        ))
    }

    /// Entry for `id`, group or leaf
    pub fn get_data(&self, id: &str) -> Option<&'a Entry> {
        self.hierarchy.get(id)
    }

    /// Parameters of the leaf `id`; `None` for groups and unknown ids
    pub fn get_parameters(&self, id: &str) -> Option<&'a Map<String, Value>> {
        self.hierarchy.leaf(id).map(|leaf| &leaf.parameters)
    }

    /// One parameter of the leaf `id`.
    ///
    /// `None` when `id` is not a leaf; `Some(None)` when the leaf lacks `name`.
    pub fn get_parameter(&self, id: &str, name: &str) -> Option<Option<&'a Value>> {
        self.get_parameters(id).map(|parameters| parameters.get(name))
    }
}
