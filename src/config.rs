//! Configuration System
//!
//! Layered configuration (defaults, global file, workspace files, environment)
//! for path splitting, id synthesis, navigation and logging.

use crate::error::CatalogError;
use crate::ids::{sanitize, SanitizedIds};
use crate::logging::LoggingConfig;
use crate::store::HierarchySettings;
use crate::tree::path::Separator;
use crate::tree::HierarchyOrder;
use crate::types::ViewMode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    #[serde(default)]
    pub ids: IdsConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Separator as written in configuration: a literal string or `{ pattern = "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeparatorSpec {
    Literal(String),
    Pattern {
        pattern: String,
        #[serde(default)]
        flags: String,
    },
}

impl SeparatorSpec {
    pub fn compile(&self) -> Result<Separator, CatalogError> {
        match self {
            SeparatorSpec::Literal(text) => Ok(Separator::literal(text.as_str())),
            SeparatorSpec::Pattern { pattern, flags } => {
                Separator::pattern_with_flags(pattern, flags)
            }
        }
    }
}

/// Path splitting and layout of the hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default = "default_root_separator")]
    pub root_separator: SeparatorSpec,

    #[serde(default = "default_group_separator")]
    pub group_separator: SeparatorSpec,

    #[serde(default)]
    pub order: HierarchyOrder,

    /// Parameters every leaf inherits unless it sets them itself
    #[serde(default)]
    pub default_parameters: Map<String, Value>,

    #[serde(default = "default_fallback_group")]
    pub fallback_group: String,
}

fn default_root_separator() -> SeparatorSpec {
    SeparatorSpec::Literal("|".to_string())
}

fn default_group_separator() -> SeparatorSpec {
    SeparatorSpec::Literal("/".to_string())
}

fn default_fallback_group() -> String {
    "Ungrouped".to_string()
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            root_separator: default_root_separator(),
            group_separator: default_group_separator(),
            order: HierarchyOrder::default(),
            default_parameters: Map::new(),
            fallback_group: default_fallback_group(),
        }
    }
}

impl HierarchyConfig {
    /// Compile into the settings used by the stories hash store
    pub fn settings(&self) -> Result<HierarchySettings, CatalogError> {
        Ok(HierarchySettings {
            root_separator: self.root_separator.compile()?,
            group_separator: self.group_separator.compile()?,
            order: self.order,
            default_parameters: self.default_parameters.clone(),
            fallback_group: self.fallback_group.clone(),
        })
    }
}

/// Id synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsConfig {
    /// Marker between kind and name in story ids
    #[serde(default = "default_kind_separator")]
    pub kind_separator: String,
}

fn default_kind_separator() -> String {
    crate::ids::DEFAULT_KIND_SEPARATOR.to_string()
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            kind_separator: default_kind_separator(),
        }
    }
}

impl IdsConfig {
    pub fn synthesizer(&self) -> SanitizedIds {
        SanitizedIds::new(self.kind_separator.as_str())
    }

    /// The marker must be something `sanitize` never produces: a double dash
    /// or a character outside `[a-z0-9-]`.
    pub fn validate(&self) -> Result<(), String> {
        let sep = &self.kind_separator;
        if sep.is_empty() {
            return Err("Kind separator cannot be empty".to_string());
        }
        let foreign = sep
            .chars()
            .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        if !foreign && !sep.contains("--") {
            return Err(format!(
                "Kind separator {:?} can appear inside sanitized ids",
                sep
            ));
        }
        Ok(())
    }
}

/// Navigation defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub default_view_mode: ViewMode,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Hierarchy(String),
    Ids(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Hierarchy(msg) => write!(f, "Hierarchy: {}", msg),
            ValidationError::Ids(msg) => write!(f, "Ids: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl CatalogConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.hierarchy.settings() {
            errors.push(ValidationError::Hierarchy(e.to_string()));
        }
        if sanitize(&self.hierarchy.fallback_group).is_empty() {
            errors.push(ValidationError::Hierarchy(format!(
                "Fallback group {:?} has no id characters",
                self.hierarchy.fallback_group
            )));
        }
        if let Err(e) = self.ids.validate() {
            errors.push(ValidationError::Ids(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every error into one [`CatalogError::Config`]
    pub fn validated(self) -> Result<Self, CatalogError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            CatalogError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}
