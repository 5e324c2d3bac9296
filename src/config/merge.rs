//! Layer merging for configuration sources.

pub mod merge_policy;
