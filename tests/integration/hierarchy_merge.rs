//! Integration tests for building and merging the hierarchy

use super::test_utils::{batch, recording_harness, story};
use serde_json::json;
use storyhash::store::HierarchySettings;
use storyhash::tree::path::Separator;
use storyhash::tree::Entry;

#[test]
fn test_sibling_stories_share_one_component_group() {
    let harness = recording_harness(HierarchySettings::default());
    harness
        .api
        .set_stories(&batch(vec![story("UI", "Button"), story("UI", "Input")]));

    let hierarchy = harness.api.state().stories_hash;
    assert_eq!(hierarchy.len(), 3);

    let ui = hierarchy.group("ui").expect("group ui");
    assert!(ui.is_component);
    assert!(!ui.is_root);
    assert_eq!(ui.depth, 0);
    assert_eq!(ui.parent, None);
    assert_eq!(ui.children, vec!["ui--button", "ui--input"]);

    for id in ["ui--button", "ui--input"] {
        assert_eq!(hierarchy.leaf(id).unwrap().parent, "ui");
    }
    assert!(hierarchy.check_integrity().is_empty());
}

#[test]
fn test_root_and_nested_groups() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&batch(vec![
        story("Core|Forms/Input", "Basic"),
        story("Core|Forms/Select", "Basic"),
        story("Core|Layout", "Grid"),
    ]));

    let hierarchy = harness.api.state().stories_hash;
    let core = hierarchy.group("core").unwrap();
    assert!(core.is_root);
    assert!(!core.is_component);
    assert_eq!(core.children, vec!["core-forms", "core-layout"]);

    let forms = hierarchy.group("core-forms").unwrap();
    assert_eq!(forms.depth, 1);
    assert_eq!(forms.parent.as_deref(), Some("core"));
    assert!(!forms.is_component);
    assert_eq!(forms.children, vec!["core-forms-input", "core-forms-select"]);

    let input = hierarchy.group("core-forms-input").unwrap();
    assert!(input.is_component);
    assert_eq!(input.depth, 2);

    let leaf = hierarchy.leaf("core-forms-input--basic").unwrap();
    assert_eq!(leaf.parent, "core-forms-input");
    assert!(hierarchy.check_integrity().is_empty());
}

#[test]
fn test_successive_batches_accumulate_children() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&batch(vec![story("UI", "Button")]));
    harness.api.set_stories(&batch(vec![story("UI", "Input")]));

    let hierarchy = harness.api.state().stories_hash;
    assert_eq!(
        hierarchy.group("ui").unwrap().children,
        vec!["ui--button", "ui--input"]
    );
    let ids: Vec<&str> = hierarchy.ids().map(String::as_str).collect();
    assert_eq!(ids, vec!["ui", "ui--button", "ui--input"]);
}

#[test]
fn test_registering_same_batch_twice_is_idempotent() {
    let harness = recording_harness(HierarchySettings::default());
    let records = batch(vec![
        story("A/B", "one"),
        story("A/B", "two"),
        story("A/C", "three"),
    ]);

    harness.api.set_stories(&records);
    let first = harness.api.state().stories_hash;
    let report = harness.api.set_stories(&records);
    let second = harness.api.state().stories_hash;

    assert_eq!(*first, *second);
    assert_eq!(report.groups_created, 0);
    assert!(report.anomalies.is_empty());
}

#[test]
fn test_reregistered_leaf_replaces_in_place() {
    let harness = recording_harness(HierarchySettings::default());
    harness
        .api
        .set_stories(&batch(vec![story("UI", "Button"), story("UI", "Input")]));

    let updated = story("UI", "Button").with_parameter("notes", json!("v2"));
    harness.api.set_stories(&batch(vec![updated]));

    let hierarchy = harness.api.state().stories_hash;
    let ids: Vec<&str> = hierarchy.ids().map(String::as_str).collect();
    assert_eq!(ids, vec!["ui", "ui--button", "ui--input"]);
    assert_eq!(
        hierarchy.leaf("ui--button").unwrap().parameters["notes"],
        "v2"
    );
}

#[test]
fn test_parameters_preserved_verbatim() {
    let harness = recording_harness(HierarchySettings::default());
    let opaque = json!({ "nested": { "list": [1, "two", null] }, "flag": false });
    let record = story("UI", "Button")
        .with_parameter("fileName", json!("./ui/button.stories.js"))
        .with_parameter("opaque", opaque.clone());
    harness.api.set_stories(&batch(vec![record]));

    let parameters = harness.api.get_parameters("ui--button").unwrap();
    assert_eq!(parameters["opaque"], opaque);
    assert_eq!(parameters["fileName"], "./ui/button.stories.js");
    assert_eq!(parameters.len(), 2);
}

#[test]
fn test_per_record_separators() {
    let settings = HierarchySettings {
        group_separator: Separator::pattern("[/.]").unwrap(),
        ..HierarchySettings::default()
    };
    let harness = recording_harness(settings);
    let dotted = story("Widgets.Card", "Plain");
    let arrowed = story("Widgets > List", "Plain")
        .with_parameter("hierarchySeparator", json!({ "pattern": "\\s*>\\s*" }));
    harness.api.set_stories(&batch(vec![dotted, arrowed]));

    let hierarchy = harness.api.state().stories_hash;
    assert_eq!(
        hierarchy.group("widgets").unwrap().children,
        vec!["widgets-card", "widgets-list"]
    );
}

#[test]
fn test_lookups() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&batch(vec![
        story("UI", "Button").with_parameter("layout", json!("centered"))
    ]));

    assert!(matches!(harness.api.get_data("ui"), Some(Entry::Group(_))));
    assert!(matches!(harness.api.get_data("ui--button"), Some(Entry::Leaf(_))));
    assert!(harness.api.get_data("missing").is_none());

    assert!(harness.api.get_parameters("ui").is_none());
    assert!(harness.api.get_parameters("missing").is_none());
    assert_eq!(
        harness.api.get_parameter("ui--button", "layout"),
        Some(Some(json!("centered")))
    );
    assert_eq!(harness.api.get_parameter("ui--button", "absent"), Some(None));
    assert_eq!(harness.api.get_parameter("ui", "layout"), None);
}

#[test]
fn test_moved_story_is_listed_only_by_new_group() {
    let harness = recording_harness(HierarchySettings::default());
    harness
        .api
        .set_stories(&batch(vec![story("A", "one"), story("B", "one")]));

    let moved = storyhash::record::LeafRecord::new("a--one", "one", "C");
    let report = harness.api.set_stories(&batch(vec![moved]));

    let hierarchy = harness.api.state().stories_hash;
    assert!(hierarchy.group("a").unwrap().children.is_empty());
    assert_eq!(hierarchy.group("c").unwrap().children, vec!["a--one"]);
    assert_eq!(hierarchy.leaf("a--one").unwrap().parent, "c");
    assert!(report.integrity.is_empty());
}
