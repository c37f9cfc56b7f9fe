//! YAML-backed module reader.

use super::{ModuleReader, ModuleSchema};
use crate::error::{BlueprintError, Result};
use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Module schemas described in a YAML file, keyed by module source.
///
/// ```yaml
/// modules/network/vpc:
///   kind: terraform
///   inputs:
///     project_id: { required: true }
///     region: {}
///   outputs: [network_name, subnetwork_name]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleManifest {
    modules: BTreeMap<String, ManifestEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ManifestEntry {
    /// Restricts the entry to one module kind when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,

    #[serde(flatten)]
    schema: ModuleSchema,
}

impl ModuleManifest {
    /// Load a manifest from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| BlueprintError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a manifest from a YAML string. An empty document is an empty manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let modules: Option<BTreeMap<String, ManifestEntry>> =
            serde_yaml::from_str(yaml).map_err(BlueprintError::from_yaml)?;
        Ok(Self {
            modules: modules.unwrap_or_default(),
        })
    }

    /// Register a schema for `source`.
    pub fn insert(&mut self, source: &str, schema: ModuleSchema) -> &mut Self {
        self.modules.insert(
            source.to_string(),
            ManifestEntry { kind: None, schema },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleReader for ModuleManifest {
    fn get_module_info(&self, source: &str, kind: &str) -> anyhow::Result<ModuleSchema> {
        let entry = self
            .modules
            .get(source)
            .ok_or_else(|| anyhow!("module source '{}' is not described in the module manifest", source))?;

        if let Some(expected) = &entry.kind
            && expected != kind
        {
            bail!(
                "module source '{}' is described as kind '{}', not '{}'",
                source,
                expected,
                kind
            );
        }

        Ok(entry.schema.clone())
    }
}
