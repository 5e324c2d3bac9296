//! Leaf records: the batch wire format handed over by story registration

use crate::error::CatalogError;
use crate::tree::path::Separator;
use crate::types::EntryId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Parameter key holding the root separator
pub const ROOT_SEPARATOR_PARAM: &str = "hierarchyRootSeparator";
/// Parameter key holding the group separator
pub const GROUP_SEPARATOR_PARAM: &str = "hierarchySeparator";
/// Parameter key holding the story's source file
pub const FILE_NAME_PARAM: &str = "fileName";

/// One registered story as received from registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub id: EntryId,
    pub name: String,
    /// Raw hierarchy path, e.g. `Core|UI/Button`
    #[serde(alias = "path")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<EntryId>,
    /// Opaque parameters, preserved verbatim
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl LeafRecord {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            children: Vec::new(),
            parameters: Map::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn file_name(&self) -> Option<&str> {
        self.parameters.get(FILE_NAME_PARAM).and_then(Value::as_str)
    }

    /// Root separator from the parameters; `None` when absent
    pub fn root_separator(&self) -> Option<Result<Separator, CatalogError>> {
        self.parameters.get(ROOT_SEPARATOR_PARAM).map(Separator::from_value)
    }

    /// Group separator from the parameters; `None` when absent
    pub fn group_separator(&self) -> Option<Result<Separator, CatalogError>> {
        self.parameters.get(GROUP_SEPARATOR_PARAM).map(Separator::from_value)
    }
}

/// One registration batch, in input order
pub type Batch = IndexMap<EntryId, LeafRecord>;

/// Parse a batch from JSON text
pub fn parse_batch(json: &str) -> Result<Batch, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a batch file
pub fn load_batch(path: &Path) -> Result<Batch, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    parse_batch(&text)
}
