//! Environment source: STORYHASH_<SECTION>__<KEY>, e.g. STORYHASH_HIERARCHY__ORDER=depth_first

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("STORYHASH")
            .prefix_separator("_")
            .separator("__"),
    )
}
