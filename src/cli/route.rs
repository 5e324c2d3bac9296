//! CLI route: single route table and run context.

use crate::api::StoriesApi;
use crate::cli::output::format_outline;
use crate::cli::parse::{Commands, OutputFormat};
use crate::config::{CatalogConfig, ConfigLoader};
use crate::error::CatalogError;
use crate::navigation::{Direction, Location, StoreNavigator};
use crate::record::load_batch;
use crate::store::{BatchReport, MemoryStateStore, StatePatch, StateStore};
use crate::types::ViewMode;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: validated configuration.
pub struct RunContext {
    config: CatalogConfig,
}

impl RunContext {
    /// Load configuration from an explicit file or from the workspace.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CatalogError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(config.validated()?))
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fresh store and API, with `batches` registered in order
    fn session(
        &self,
        batches: &[PathBuf],
    ) -> Result<(Arc<MemoryStateStore>, StoriesApi, Vec<BatchReport>), CatalogError> {
        let store = Arc::new(MemoryStateStore::new());
        let navigator = Arc::new(StoreNavigator::new(Arc::clone(&store)));
        let api = StoriesApi::new(
            store.clone(),
            Arc::new(self.config.ids.synthesizer()),
            navigator,
            self.config.hierarchy.settings()?,
        );

        let mut reports = Vec::with_capacity(batches.len());
        for path in batches {
            let batch = load_batch(path)?;
            info!(batch = %path.display(), records = batch.len(), "Registering batch");
            reports.push(api.set_stories(&batch));
        }
        Ok((store, api, reports))
    }

    fn view_mode(&self, requested: Option<&str>) -> Result<ViewMode, CatalogError> {
        match requested {
            Some(mode) => mode.parse().map_err(CatalogError::Config),
            None => Ok(self.config.navigation.default_view_mode),
        }
    }

    /// Execute a command, returning its printable output
    pub fn execute(&self, command: &Commands) -> Result<String, CatalogError> {
        match command {
            Commands::Index { batches, format } => {
                let (_, api, _) = self.session(batches)?;
                let hierarchy = api.state().stories_hash;
                match format {
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&*hierarchy)?),
                    OutputFormat::Text => Ok(format_outline(&hierarchy)),
                }
            }
            Commands::Check { batches } => {
                let (_, _, reports) = self.session(batches)?;
                let issues: Vec<String> = reports
                    .last()
                    .map(|r| r.integrity.iter().map(ToString::to_string).collect())
                    .unwrap_or_default();
                let anomalies: Vec<String> = reports
                    .iter()
                    .flat_map(|r| r.anomalies.iter().map(ToString::to_string))
                    .collect();
                let output = serde_json::to_string_pretty(&json!({
                    "integrity": issues,
                    "anomalies": anomalies,
                }))?;
                if issues.is_empty() {
                    Ok(output)
                } else {
                    Err(CatalogError::Integrity(output))
                }
            }
            Commands::Jump {
                batch,
                from,
                component,
                prev,
                view_mode,
            } => {
                let (store, api, _) = self.session(std::slice::from_ref(batch))?;
                let view_mode = self.view_mode(view_mode.as_deref())?;
                store.set_state(StatePatch::selection(from.as_str(), view_mode));
                let direction = if *prev { Direction::Previous } else { Direction::Next };
                let location = if *component {
                    api.jump_to_component(direction)
                } else {
                    api.jump_to_story(direction)
                };
                Ok(describe(location))
            }
            Commands::Select {
                batch,
                from,
                kind,
                name,
                view_mode,
            } => {
                let (store, api, _) = self.session(std::slice::from_ref(batch))?;
                let view_mode = self.view_mode(view_mode.as_deref())?;
                match from {
                    Some(from) => store.set_state(StatePatch::selection(from.as_str(), view_mode)),
                    None => store.set_state(StatePatch {
                        view_mode: Some(view_mode),
                        ..StatePatch::default()
                    }),
                }
                Ok(describe(api.select_story(kind.as_deref(), name.as_deref())))
            }
            Commands::Params { batch, id, name } => {
                let (_, api, _) = self.session(std::slice::from_ref(batch))?;
                let value = match name {
                    Some(name) => match api.get_parameter(id, name) {
                        Some(value) => value.unwrap_or(serde_json::Value::Null),
                        None => return Ok(format!("{} is not a story", id)),
                    },
                    None => match api.get_parameters(id) {
                        Some(parameters) => serde_json::Value::Object(parameters),
                        None => return Ok(format!("{} is not a story", id)),
                    },
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
        }
    }
}

fn describe(location: Option<Location>) -> String {
    match location {
        Some(location) => location.to_string(),
        None => "no navigation".to_string(),
    }
}
