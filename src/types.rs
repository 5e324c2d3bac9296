//! Shared identifier and selection types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a group or leaf in the hierarchy mapping
pub type EntryId = String;

/// How the selected leaf is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Story,
    Docs,
    Info,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Story => "story",
            ViewMode::Docs => "docs",
            ViewMode::Info => "info",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "story" => Ok(ViewMode::Story),
            "docs" => Ok(ViewMode::Docs),
            "info" => Ok(ViewMode::Info),
            other => Err(format!(
                "Unknown view mode: {} (must be 'story', 'docs' or 'info')",
                other
            )),
        }
    }
}

/// The externally owned cursor: current leaf and view mode.
///
/// Navigation reads it but never stores it; callers pass it in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub story_id: Option<EntryId>,
    pub view_mode: Option<ViewMode>,
}

impl Selection {
    pub fn new(story_id: impl Into<EntryId>, view_mode: ViewMode) -> Self {
        Self {
            story_id: Some(story_id.into()),
            view_mode: Some(view_mode),
        }
    }

    /// Selection with no current leaf and no view mode
    pub fn empty() -> Self {
        Self::default()
    }
}
