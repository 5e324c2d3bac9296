//! Integration tests for selecting the first story when the selection is gone

use super::test_utils::{batch, recording_harness, story};
use storyhash::navigation::Location;
use storyhash::store::HierarchySettings;
use storyhash::types::ViewMode;

#[test]
fn test_missing_selection_selects_first_leaf_once() {
    let harness = recording_harness(HierarchySettings::default());
    harness.select("removed--story", ViewMode::Story);

    let report = harness
        .api
        .set_stories(&batch(vec![story("UI", "Button"), story("UI", "Input")]));

    assert_eq!(
        report.navigated,
        Some(Location::new(ViewMode::Story, "ui--button"))
    );
    assert_eq!(harness.navigator.paths(), vec!["/story/ui--button"]);
}

#[test]
fn test_present_selection_is_kept() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&batch(vec![story("UI", "Button")]));
    harness.select("ui--button", ViewMode::Story);

    let report = harness.api.set_stories(&batch(vec![story("UI", "Input")]));

    assert!(report.navigated.is_none());
    assert!(harness.navigator.paths().is_empty());
}

#[test]
fn test_no_selection_without_view_mode_does_not_navigate() {
    let harness = recording_harness(HierarchySettings::default());
    let report = harness.api.set_stories(&batch(vec![story("UI", "Button")]));

    assert!(report.navigated.is_none());
    assert!(harness.navigator.paths().is_empty());
}

#[test]
fn test_empty_batch_with_no_leaves_does_not_navigate() {
    let harness = recording_harness(HierarchySettings::default());
    harness.select("removed--story", ViewMode::Story);

    let report = harness.api.set_stories(&batch(vec![]));
    assert!(report.navigated.is_none());
    assert!(harness.navigator.paths().is_empty());
}
