//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("hierarchy.root_separator", "|")?
        .set_default("hierarchy.group_separator", "/")?
        .set_default("hierarchy.order", "insertion")?
        .set_default("hierarchy.fallback_group", "Ungrouped")?
        .set_default("ids.kind_separator", "--")?
        .set_default("navigation.default_view_mode", "story")?
        .set_default("logging.level", "info")
}
