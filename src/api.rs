//! Stories API
//!
//! Entry point for the event plumbing: registration batches go in through
//! `set_stories`, navigation requests read one state snapshot and hand the
//! current selection to the navigation engine explicitly.

use crate::ids::IdSynthesis;
use crate::navigation::{Direction, Location, NavigationEngine, Navigator};
use crate::record::Batch;
use crate::store::{BatchReport, HierarchySettings, State, StateStore, StoriesHashStore};
use crate::tree::Entry;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Stories API service
pub struct StoriesApi {
    store: Arc<dyn StateStore>,
    ids: Arc<dyn IdSynthesis>,
    navigator: Arc<dyn Navigator>,
    stories: StoriesHashStore,
}

impl StoriesApi {
    pub fn new(
        store: Arc<dyn StateStore>,
        ids: Arc<dyn IdSynthesis>,
        navigator: Arc<dyn Navigator>,
        settings: HierarchySettings,
    ) -> Self {
        let stories = StoriesHashStore::new(
            Arc::clone(&store),
            Arc::clone(&ids),
            Arc::clone(&navigator),
            settings,
        );
        Self {
            store,
            ids,
            navigator,
            stories,
        }
    }

    /// Register a batch of stories
    pub fn set_stories(&self, batch: &Batch) -> BatchReport {
        self.stories.set_stories(batch)
    }

    /// Current state snapshot
    pub fn state(&self) -> State {
        self.store.get_state()
    }

    fn with_engine<T>(&self, f: impl FnOnce(&NavigationEngine<'_>, &State) -> T) -> T {
        let state = self.store.get_state();
        let engine = NavigationEngine::new(
            &state.stories_hash,
            self.ids.as_ref(),
            self.navigator.as_ref(),
        );
        f(&engine, &state)
    }

    pub fn jump_to_story(&self, direction: Direction) -> Option<Location> {
        self.with_engine(|engine, state| engine.jump_to_story(&state.selection(), direction))
    }

    pub fn jump_to_component(&self, direction: Direction) -> Option<Location> {
        self.with_engine(|engine, state| engine.jump_to_component(&state.selection(), direction))
    }

    pub fn select_story(&self, kind_or_id: Option<&str>, name: Option<&str>) -> Option<Location> {
        self.with_engine(|engine, state| {
            engine.select_story(&state.selection(), kind_or_id, name)
        })
    }

    pub fn get_data(&self, id: &str) -> Option<Entry> {
        self.store.get_state().stories_hash.get(id).cloned()
    }

    /// Parameters of a leaf; `None` for groups and unknown ids
    pub fn get_parameters(&self, id: &str) -> Option<Map<String, Value>> {
        self.with_engine(|engine, _| engine.get_parameters(id).cloned())
    }

    /// One parameter of a leaf; `Some(None)` when the leaf lacks it
    pub fn get_parameter(&self, id: &str, name: &str) -> Option<Option<Value>> {
        self.with_engine(|engine, _| {
            engine
                .get_parameter(id, name)
                .map(|value| value.cloned())
        })
    }
}
