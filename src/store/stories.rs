//! Stories hash: folds registration batches into the published hierarchy

use crate::error::CatalogError;
use crate::ids::IdSynthesis;
use crate::merge::{Merge, MergeAnomaly, MergeLog};
use crate::navigation::{Location, Navigator};
use crate::record::{Batch, LeafRecord, GROUP_SEPARATOR_PARAM, ROOT_SEPARATOR_PARAM};
use crate::store::{StatePatch, StateStore};
use crate::tree::builder::{build_chain, link_chain};
use crate::tree::path::{split_path, Separator, SplitPath};
use crate::tree::{Entry, Group, Hierarchy, HierarchyOrder, IntegrityIssue, Leaf};
use crate::types::Selection;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// How paths are split and the hierarchy laid out
#[derive(Debug, Clone)]
pub struct HierarchySettings {
    /// Used when a record has no usable `hierarchyRootSeparator`
    pub root_separator: Separator,
    /// Used when a record has no usable `hierarchySeparator`
    pub group_separator: Separator,
    pub order: HierarchyOrder,
    /// Merged under every leaf's own parameters
    pub default_parameters: Map<String, Value>,
    /// Group for leaves whose path has no segments at all
    pub fallback_group: String,
}

impl Default for HierarchySettings {
    fn default() -> Self {
        Self {
            root_separator: Separator::literal("|"),
            group_separator: Separator::literal("/"),
            order: HierarchyOrder::default(),
            default_parameters: Map::new(),
            fallback_group: "Ungrouped".to_string(),
        }
    }
}

/// Outcome of one `set_stories` call
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub leaves: usize,
    pub groups_created: usize,
    pub anomalies: Vec<MergeAnomaly>,
    pub integrity: Vec<IntegrityIssue>,
    /// Set when the previous selection was gone and the first leaf was selected
    #[serde(skip)]
    pub navigated: Option<Location>,
}

/// Single writer of the hierarchy mapping
pub struct StoriesHashStore {
    store: Arc<dyn StateStore>,
    ids: Arc<dyn IdSynthesis>,
    navigator: Arc<dyn Navigator>,
    settings: HierarchySettings,
    writer: Mutex<()>,
}

impl StoriesHashStore {
    pub fn new(
        store: Arc<dyn StateStore>,
        ids: Arc<dyn IdSynthesis>,
        navigator: Arc<dyn Navigator>,
        settings: HierarchySettings,
    ) -> Self {
        Self {
            store,
            ids,
            navigator,
            settings,
            writer: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &HierarchySettings {
        &self.settings
    }

    /// Merge a batch into the published hierarchy.
    ///
    /// Groups accumulate children across records and batches; a leaf
    /// re-registered under the same id replaces the previous one in place.
    /// When the current selection is missing from the result, the first leaf
    /// is selected (if a view mode is set). Batches are serialized.
    #[instrument(skip(self, batch), fields(records = batch.len()))]
    pub fn set_stories(&self, batch: &Batch) -> BatchReport {
        let _writer = self.writer.lock();
        let start = Instant::now();

        let state = self.store.get_state();
        let mut hierarchy = Hierarchy::clone(&state.stories_hash);
        let groups_before = hierarchy.groups().count();
        let mut log = MergeLog::new();

        for (key, record) in batch {
            if *key != record.id {
                warn!(key = %key, id = %record.id, "Batch key differs from record id, using record id");
            }
            self.add_record(&mut hierarchy, record, &mut log);
        }

        if self.settings.order == HierarchyOrder::DepthFirst {
            hierarchy.reorder_depth_first();
        }

        let integrity = hierarchy.check_integrity();
        for issue in &integrity {
            warn!(issue = %issue, "Hierarchy integrity issue");
        }

        let navigated = self.recover_selection(&state.selection(), &hierarchy);

        let report = BatchReport {
            leaves: hierarchy.leaves().count(),
            groups_created: hierarchy.groups().count().saturating_sub(groups_before),
            anomalies: log.into_anomalies(),
            integrity,
            navigated,
        };

        self.store.set_state(StatePatch::stories_hash(hierarchy));

        info!(
            leaves = report.leaves,
            groups_created = report.groups_created,
            anomalies = report.anomalies.len(),
            duration_ms = start.elapsed().as_millis(),
            "Stories hash updated"
        );
        report
    }

    fn add_record(&self, hierarchy: &mut Hierarchy, record: &LeafRecord, log: &mut MergeLog) {
        let split = self.split(record);
        let mut chain = build_chain(&split, self.ids.as_ref());
        if chain.is_empty() {
            warn!(id = %record.id, fallback = %self.settings.fallback_group, "Story path has no segments, using fallback group");
            let fallback = SplitPath {
                root: None,
                groups: vec![self.settings.fallback_group.clone()],
            };
            chain = build_chain(&fallback, self.ids.as_ref());
        }
        link_chain(&mut chain, &record.id);

        let Some(parent) = chain.last().map(|group| group.id.clone()) else {
            return;
        };
        debug!(id = %record.id, parent = %parent, depth = chain.len(), "Registering story");

        for group in chain {
            merge_group(hierarchy, group, log);
        }

        let mut parameters = record.parameters.clone();
        if !self.settings.default_parameters.is_empty() {
            let mut merged = Value::Object(parameters);
            merged.merge_from(
                Value::Object(self.settings.default_parameters.clone()),
                &format!("{}.parameters", record.id),
                log,
            );
            parameters = match merged {
                Value::Object(map) => map,
                _ => record.parameters.clone(),
            };
        }

        let leaf = Leaf::from_record(record, parent.clone(), parameters);
        match hierarchy.insert(Entry::Leaf(leaf)) {
            Some(Entry::Group(_)) => log.record(&record.id, "leaf", "group"),
            Some(Entry::Leaf(previous)) if previous.parent != parent => {
                debug!(id = %record.id, from = %previous.parent, to = %parent, "Story moved to another group");
                if let Some(Entry::Group(old)) = hierarchy.entry_mut(&previous.parent) {
                    old.children.retain(|child| *child != record.id);
                }
            }
            _ => {}
        }
    }

    /// Split a record's path with its own separators, falling back to the defaults
    fn split(&self, record: &LeafRecord) -> SplitPath {
        let root = resolve_separator(
            record,
            ROOT_SEPARATOR_PARAM,
            record.root_separator(),
            &self.settings.root_separator,
        );
        let group = resolve_separator(
            record,
            GROUP_SEPARATOR_PARAM,
            record.group_separator(),
            &self.settings.group_separator,
        );
        let split = split_path(&record.kind, &root, &group);
        trace!(id = %record.id, root = ?split.root, groups = ?split.groups, "Split story path");
        split
    }

    fn recover_selection(&self, selection: &Selection, hierarchy: &Hierarchy) -> Option<Location> {
        let current = selection.story_id.as_deref();
        if current.is_some_and(|id| hierarchy.contains(id)) {
            return None;
        }

        let first = hierarchy.leaves().next()?;
        let view_mode = selection.view_mode?;
        let location = Location::new(view_mode, first.id.clone());
        info!(previous = ?current, location = %location, "Selection missing, selecting first story");
        self.navigator.navigate(&location.to_string());
        Some(location)
    }
}

fn resolve_separator(
    record: &LeafRecord,
    parameter: &str,
    parsed: Option<Result<Separator, CatalogError>>,
    default: &Separator,
) -> Separator {
    match parsed {
        Some(Ok(separator)) => separator,
        Some(Err(e)) => {
            warn!(id = %record.id, parameter, error = %e, default = %default, "Unusable separator, using default");
            default.clone()
        }
        None => default.clone(),
    }
}

fn merge_group(hierarchy: &mut Hierarchy, group: Group, log: &mut MergeLog) {
    match hierarchy.entry_mut(&group.id) {
        Some(existing) => {
            let path = group.id.clone();
            existing.merge_from(Entry::Group(group), &path, log);
        }
        None => {
            trace!(id = %group.id, "New group");
            hierarchy.insert(Entry::Group(group));
        }
    }
}
