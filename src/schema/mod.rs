//! Module schemas: the inputs and outputs a module declares.
//!
//! Reading module source code is the job of a [`ModuleReader`]. The crate
//! ships [`ModuleManifest`], a reader backed by a YAML file that describes
//! each module source, and [`SchemaTable`], a per-run cache keyed by
//! (group, source) so every schema is fetched once.

mod manifest;


use crate::blueprint::Module;
use crate::error::{BlueprintError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub use manifest::ModuleManifest;

/// Metadata for one declared module input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    #[serde(default)]
    pub required: bool,
}

/// The interface a module declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSchema {
    pub inputs: BTreeMap<String, InputInfo>,
    pub outputs: BTreeSet<String>,
}

impl ModuleSchema {
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.contains(name)
    }

    /// Add an input.
    pub fn with_input(mut self, name: &str, required: bool) -> Self {
        self.inputs.insert(name.to_string(), InputInfo { required });
        self
    }

    /// Add an output.
    pub fn with_output(mut self, name: &str) -> Self {
        self.outputs.insert(name.to_string());
        self
    }
}

/// Looks up the schema of a module by its source.
///
/// Implementations must fail with a descriptive error (keeping the original
/// cause) when the source cannot be read or parsed.
pub trait ModuleReader {
    fn get_module_info(&self, source: &str, kind: &str) -> anyhow::Result<ModuleSchema>;
}

/// Per-run cache of module schemas keyed by (group, source).
pub struct SchemaTable<'a> {
    reader: &'a dyn ModuleReader,
    cache: BTreeMap<(String, String), ModuleSchema>,
}

impl<'a> SchemaTable<'a> {
    pub fn new(reader: &'a dyn ModuleReader) -> Self {
        Self {
            reader,
            cache: BTreeMap::new(),
        }
    }

    /// Schema for `module` as deployed in `group`, fetching it on first use.
    pub fn get(&mut self, group: &str, module: &Module) -> Result<&ModuleSchema> {
        let key = (group.to_string(), module.source.clone());

        if !self.cache.contains_key(&key) {
            let schema = self
                .reader
                .get_module_info(&module.source, &module.kind)
                .map_err(|cause| BlueprintError::ModuleInfo {
                    module_source: module.source.clone(),
                    cause,
                })?;
            debug!(group, source = %module.source, "module schema loaded");
            self.cache.insert(key.clone(), schema);
        }

        Ok(&self.cache[&key])
    }
}
