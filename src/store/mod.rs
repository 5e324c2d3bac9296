//! State Store
//!
//! The key-value store the catalog publishes into. Writers send patches;
//! readers take snapshots. The hierarchy is shared behind an `Arc`, so a
//! snapshot never observes a half-merged batch.

pub mod stories;

pub use stories::{BatchReport, HierarchySettings, StoriesHashStore};

use crate::tree::Hierarchy;
use crate::types::{EntryId, Selection, ViewMode};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::trace;

/// Process state visible to the catalog
#[derive(Debug, Clone, Default)]
pub struct State {
    pub stories_hash: Arc<Hierarchy>,
    pub story_id: Option<EntryId>,
    pub view_mode: Option<ViewMode>,
}

impl State {
    /// Current selection, detached from the state
    pub fn selection(&self) -> Selection {
        Selection {
            story_id: self.story_id.clone(),
            view_mode: self.view_mode,
        }
    }
}

/// Partial update of [`State`]; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub stories_hash: Option<Arc<Hierarchy>>,
    pub story_id: Option<EntryId>,
    pub view_mode: Option<ViewMode>,
}

impl StatePatch {
    pub fn stories_hash(hierarchy: Hierarchy) -> Self {
        Self {
            stories_hash: Some(Arc::new(hierarchy)),
            ..Self::default()
        }
    }

    pub fn selection(story_id: impl Into<EntryId>, view_mode: ViewMode) -> Self {
        Self {
            story_id: Some(story_id.into()),
            view_mode: Some(view_mode),
            ..Self::default()
        }
    }

    fn apply(self, state: &mut State) {
        if let Some(hierarchy) = self.stories_hash {
            state.stories_hash = hierarchy;
        }
        if let Some(story_id) = self.story_id {
            state.story_id = Some(story_id);
        }
        if let Some(view_mode) = self.view_mode {
            state.view_mode = Some(view_mode);
        }
    }
}

/// Store contract: snapshot reads, shallow-merged patch writes
pub trait StateStore: Send + Sync {
    fn get_state(&self) -> State;
    fn set_state(&self, patch: StatePatch);
}

type Subscriber = Arc<dyn Fn(&State) + Send + Sync>;

/// In-process store with subscriber notification
#[derive(Default)]
pub struct MemoryStateStore {
    state: RwLock<State>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: State) -> Self {
        Self {
            state: RwLock::new(state),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback invoked with the new state after every write.
    ///
    /// Callbacks run with no lock held, so they may write to the store.
    pub fn subscribe(&self, subscriber: impl Fn(&State) + Send + Sync + 'static) {
        self.subscribers.lock().push(Arc::new(subscriber));
    }
}

impl StateStore for MemoryStateStore {
    fn get_state(&self) -> State {
        self.state.read().clone()
    }

    fn set_state(&self, patch: StatePatch) {
        let snapshot = {
            let mut state = self.state.write();
            patch.apply(&mut state);
            state.clone()
        };

        let subscribers: Vec<Subscriber> = self.subscribers.lock().clone();
        trace!(subscribers = subscribers.len(), "State updated");
        for subscriber in subscribers.iter() {
            subscriber(&snapshot);
        }
    }
}
