//! Storyhash: Story Hierarchy Catalog
//!
//! Turns flat batches of registered stories, each carrying a delimited path,
//! into a merged group hierarchy with deterministic ids, and navigates it:
//! next/previous story, next/previous component, selection by id or name.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod merge;
pub mod navigation;
pub mod record;
pub mod store;
pub mod tree;
pub mod types;
