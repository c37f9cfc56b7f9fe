//! Blueprint loading, serialization, and derived views.

use super::model::{Blueprint, DeploymentGroup, Module, ValidatorConfig};
use crate::error::{BlueprintError, Result};
use crate::validate::ValidatorName;
use crate::value::Dict;
use std::path::Path;

impl Blueprint {
    /// Load a blueprint from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| BlueprintError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a blueprint from a YAML string.
    ///
    /// Only decodes; run [`crate::validate::Pipeline`] to validate. An empty
    /// document is an empty blueprint.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let blueprint: Option<Self> = serde_yaml::from_str(yaml).map_err(BlueprintError::from_yaml)?;
        Ok(blueprint.unwrap_or_default())
    }

    /// Serialize the blueprint to canonical YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| BlueprintError::Marshal {
            key: "blueprint".to_string(),
            reason: e.to_string(),
        })
    }

    /// The validators that will run.
    ///
    /// Explicitly declared validators are returned as-is. When none are
    /// declared, the defaults depend on which of `project_id`, `region` and
    /// `zone` are set in `vars`.
    pub fn effective_validators(&self) -> Vec<ValidatorConfig> {
        if let Some(validators) = &self.validators {
            return validators.clone();
        }

        let has_project = self.vars.has("project_id");
        let has_region = self.vars.has("region");
        let has_zone = self.vars.has("zone");

        let project_ref = "((var.project_id))";
        let region_ref = "((var.region))";
        let zone_ref = "((var.zone))";

        let mut defaults = Vec::new();
        if !has_project {
            return defaults;
        }

        defaults.push(
            ValidatorConfig::new(ValidatorName::TestProjectExists.as_str())
                .with_input("project_id", project_ref),
        );
        if has_region {
            defaults.push(
                ValidatorConfig::new(ValidatorName::TestRegionExists.as_str())
                    .with_input("project_id", project_ref)
                    .with_input("region", region_ref),
            );
        }
        if has_zone {
            defaults.push(
                ValidatorConfig::new(ValidatorName::TestZoneExists.as_str())
                    .with_input("project_id", project_ref)
                    .with_input("zone", zone_ref),
            );
        }
        if has_region && has_zone {
            defaults.push(
                ValidatorConfig::new(ValidatorName::TestZoneInRegion.as_str())
                    .with_input("project_id", project_ref)
                    .with_input("region", region_ref)
                    .with_input("zone", zone_ref),
            );
        }
        defaults
    }

    /// Every module paired with its group, in document order.
    pub fn modules(&self) -> impl Iterator<Item = (&DeploymentGroup, &Module)> {
        self.deployment_groups
            .iter()
            .flat_map(|group| group.modules.iter().map(move |module| (group, module)))
    }
}

impl Module {
    /// Canonical YAML rendering used in diagnostics.
    ///
    /// Settings that cannot be marshalled (`.inf`, `.nan`) are left out and
    /// replaced by a trailing comment naming the failure.
    pub fn dump(&self) -> String {
        match serde_yaml::to_string(self) {
            Ok(yaml) => yaml,
            Err(e) => {
                let identity = Module {
                    settings: Dict::new(),
                    ..self.clone()
                };
                let yaml = serde_yaml::to_string(&identity).unwrap_or_default();
                format!("{}# settings omitted: {}\n", yaml, e)
            }
        }
    }
}
