use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use storyhash::api::StoriesApi;
use storyhash::ids::{IdSynthesis, SanitizedIds};
use storyhash::merge::merge;
use storyhash::navigation::StoreNavigator;
use storyhash::record::{Batch, LeafRecord};
use storyhash::store::{HierarchySettings, MemoryStateStore};
use storyhash::tree::Hierarchy;

const KINDS: &[&str] = &["UI", "UI/Forms", "Core|Button", "Core|UI/Input", "Docs/Intro"];

fn api() -> StoriesApi {
    let store = Arc::new(MemoryStateStore::new());
    StoriesApi::new(
        store.clone(),
        Arc::new(SanitizedIds::default()),
        Arc::new(StoreNavigator::new(store)),
        HierarchySettings::default(),
    )
}

/// Batch whose story names are `prefix` plus the record index, so two
/// batches with different prefixes never share a leaf id
fn batch(prefix: &str, kinds: &[usize]) -> Batch {
    let ids = SanitizedIds::default();
    kinds
        .iter()
        .enumerate()
        .map(|(i, &k)| {
            let kind = KINDS[k];
            let name = format!("{} {}", prefix, i);
            let record = LeafRecord::new(ids.story_id(kind, &name), name, kind)
                .with_parameter("index", json!(i));
            (record.id.clone(), record)
        })
        .collect()
}

fn registered(batches: &[&Batch]) -> Hierarchy {
    let api = api();
    for batch in batches {
        api.set_stories(batch);
    }
    Hierarchy::clone(&api.state().stories_hash)
}

fn kinds_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..KINDS.len(), 1..8)
}

fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_sequential_batches_match_combined(a in kinds_strategy(), b in kinds_strategy()) {
        let first = batch("alpha", &a);
        let second = batch("beta", &b);
        let mut combined = first.clone();
        combined.extend(second.clone());

        let sequential = registered(&[&first, &second]);
        let together = registered(&[&combined]);

        prop_assert_eq!(&sequential, &together);
        let sequential_ids: Vec<&String> = sequential.ids().collect();
        let together_ids: Vec<&String> = together.ids().collect();
        prop_assert_eq!(sequential_ids, together_ids);
    }

    #[test]
    fn prop_registration_idempotent(a in kinds_strategy()) {
        let stories = batch("alpha", &a);
        prop_assert_eq!(registered(&[&stories]), registered(&[&stories, &stories]));
    }

    #[test]
    fn prop_every_leaf_has_component_parent(a in kinds_strategy()) {
        let hierarchy = registered(&[&batch("alpha", &a)]);
        prop_assert!(hierarchy.check_integrity().is_empty());
        for leaf in hierarchy.leaves() {
            let parent = hierarchy.group(&leaf.parent);
            prop_assert!(parent.is_some_and(|g| g.is_component && g.children.contains(&leaf.id)));
        }
    }

    #[test]
    fn prop_value_merge_with_self_is_identity(value in json_strategy()) {
        let (merged, anomalies) = merge(value.clone(), value.clone());
        prop_assert_eq!(merged, value);
        prop_assert!(anomalies.is_empty());
    }
}
