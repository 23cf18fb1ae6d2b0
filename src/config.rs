//! Runner configuration
//!
//! An optional `conforma.yaml` next to the fixtures names the
//! transformation collaborator and any extra arguments. CLI flags
//! override file values.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file name searched for in the fixture directory
pub const CONFIG_FILE: &str = "conforma.yaml";

/// Per-directory runner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RunConfig {
    /// Collaborator program to invoke per case
    #[serde(default)]
    pub transform: Option<String>,

    /// Extra arguments placed before the language pair
    #[serde(default)]
    pub args: Vec<String>,

    /// Restrict the run to these case names (all cases when empty)
    #[serde(default)]
    pub cases: Vec<String>,
}

impl RunConfig {
    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(Error::Yaml)
    }

    /// Load `conforma.yaml` from a fixture directory, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(Error::Io)?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("Invalid {}: {}", path.display(), e)))?;
        Ok(Some(config))
    }

    /// Whether a case is selected by the `cases` filter
    pub fn selects(&self, case: &str) -> bool {
        self.cases.is_empty() || self.cases.iter().any(|c| c == case)
    }
}
