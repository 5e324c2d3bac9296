//! Integration tests for configuration driving the hierarchy

use super::test_utils::{batch, story};
use std::fs;
use std::sync::Arc;
use storyhash::api::StoriesApi;
use storyhash::config::ConfigLoader;
use storyhash::navigation::StoreNavigator;
use storyhash::store::MemoryStateStore;
use tempfile::TempDir;

#[test]
fn test_config_file_settings_apply_to_registration() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storyhash.toml");
    fs::write(
        &path,
        r#"
[hierarchy]
order = "depth_first"
group_separator = { pattern = "[/.]" }

[hierarchy.default_parameters]
layout = "padded"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path)
        .unwrap()
        .validated()
        .unwrap();
    let store = Arc::new(MemoryStateStore::new());
    let api = StoriesApi::new(
        store.clone(),
        Arc::new(config.ids.synthesizer()),
        Arc::new(StoreNavigator::new(store.clone())),
        config.hierarchy.settings().unwrap(),
    );

    api.set_stories(&batch(vec![
        story("A.X", "one"),
        story("B", "one"),
        story("A.X", "two"),
    ]));

    let hierarchy = api.state().stories_hash;
    let ids: Vec<&str> = hierarchy.ids().map(String::as_str).collect();
    assert_eq!(ids, vec!["a", "a-x", "a-x--one", "a-x--two", "b", "b--one"]);
    assert_eq!(
        api.get_parameter("b--one", "layout"),
        Some(Some(serde_json::json!("padded")))
    );
}

#[test]
fn test_invalid_kind_separator_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storyhash.toml");
    fs::write(&path, "[ids]\nkind_separator = \"-\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert!(config.validated().is_err());
}
