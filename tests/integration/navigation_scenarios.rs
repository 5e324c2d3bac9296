//! Integration tests for sequential navigation and selection

use super::test_utils::{batch, recording_harness, routed_api, story};
use storyhash::navigation::{Direction, Location};
use storyhash::store::{HierarchySettings, StateStore};
use storyhash::types::ViewMode;

fn two_components() -> storyhash::record::Batch {
    batch(vec![
        story("A", "one"),
        story("A", "two"),
        story("B", "one"),
        story("B", "two"),
    ])
}

#[test]
fn test_jump_to_story_visits_every_leaf_in_order() {
    let (store, api) = routed_api();
    api.set_stories(&two_components());
    store.set_state(storyhash::store::StatePatch::selection("a--one", ViewMode::Story));

    let mut visited = vec![store.get_state().story_id.unwrap()];
    while let Some(location) = api.jump_to_story(Direction::Next) {
        visited.push(location.story_id);
    }

    assert_eq!(visited, vec!["a--one", "a--two", "b--one", "b--two"]);
    assert_eq!(api.jump_to_story(Direction::Next), None);
    assert_eq!(store.get_state().story_id.as_deref(), Some("b--two"));
}

#[test]
fn test_jump_to_story_backwards_stops_at_first() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&two_components());

    harness.select("a--two", ViewMode::Docs);
    assert_eq!(
        harness.api.jump_to_story(Direction::Previous),
        Some(Location::new(ViewMode::Docs, "a--one"))
    );

    harness.select("a--one", ViewMode::Docs);
    assert_eq!(harness.api.jump_to_story(Direction::Previous), None);
    assert_eq!(harness.navigator.paths(), vec!["/docs/a--one"]);
}

#[test]
fn test_jump_without_selection_is_noop() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&two_components());

    assert_eq!(harness.api.jump_to_story(Direction::Next), None);
    assert_eq!(harness.api.jump_to_component(Direction::Next), None);

    harness.select("gone--story", ViewMode::Story);
    assert_eq!(harness.api.jump_to_story(Direction::Next), None);
    assert_eq!(harness.api.jump_to_component(Direction::Next), None);
    assert!(harness.navigator.paths().is_empty());
}

#[test]
fn test_jump_to_component_lands_on_first_child() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&two_components());

    harness.select("a--two", ViewMode::Story);
    assert_eq!(
        harness.api.jump_to_component(Direction::Next),
        Some(Location::new(ViewMode::Story, "b--one"))
    );
    assert_eq!(harness.navigator.paths(), vec!["/story/b--one"]);
}

#[test]
fn test_jump_to_component_bounds() {
    let harness = recording_harness(HierarchySettings::default());
    harness.api.set_stories(&two_components());

    harness.select("b--two", ViewMode::Story);
    assert_eq!(harness.api.jump_to_component(Direction::Next), None);
    assert_eq!(
        harness.api.jump_to_component(Direction::Previous),
        Some(Location::new(ViewMode::Story, "a--one"))
    );

    harness.select("a--one", ViewMode::Story);
    assert_eq!(harness.api.jump_to_component(Direction::Previous), None);
}

#[test]
fn test_select_sibling_by_name() {
    let harness = recording_harness(HierarchySettings::default());
    harness
        .api
        .set_stories(&batch(vec![story("UI", "Button"), story("UI", "Input")]));
    harness.select("ui--button", ViewMode::Story);

    assert_eq!(
        harness.api.select_story(None, Some("Input")),
        Some(Location::new(ViewMode::Story, "ui--input"))
    );
}

#[test]
fn test_select_by_kind_and_name_or_id() {
    let harness = recording_harness(HierarchySettings::default());
    harness
        .api
        .set_stories(&batch(vec![story("UI/Forms", "Text Field")]));
    harness.select("ui-forms--text-field", ViewMode::Docs);

    let by_pair = harness.api.select_story(Some("UI/Forms"), Some("Text Field"));
    let by_id = harness.api.select_story(Some("ui-forms--text-field"), None);
    let by_synthesized_kind = harness.api.select_story(Some("ui-forms"), Some("Text Field"));

    let expected = Some(Location::new(ViewMode::Docs, "ui-forms--text-field"));
    assert_eq!(by_pair, expected);
    assert_eq!(by_id, expected);
    assert_eq!(by_synthesized_kind, expected);
    assert_eq!(harness.navigator.paths().len(), 3);
}

#[test]
fn test_jump_to_component_lands_on_leaf_when_components_nest() {
    let harness = recording_harness(HierarchySettings::default());
    harness
        .api
        .set_stories(&batch(vec![story("UI/Forms", "Field"), story("UI", "Button")]));
    harness.select("ui-forms--field", ViewMode::Story);

    let hierarchy = harness.api.state().stories_hash;
    assert_eq!(hierarchy.group("ui").unwrap().children, vec!["ui-forms", "ui--button"]);

    let location = harness.api.jump_to_component(Direction::Previous).unwrap();
    assert_eq!(location, Location::new(ViewMode::Story, "ui--button"));
    assert!(hierarchy.leaf(&location.story_id).is_some());

    harness.select("ui--button", ViewMode::Story);
    let location = harness.api.jump_to_component(Direction::Next).unwrap();
    assert_eq!(location.story_id, "ui-forms--field");
}
