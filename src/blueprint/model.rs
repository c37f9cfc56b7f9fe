//! Blueprint struct definitions.

use super::types::*;
use crate::value::Dict;
use serde::{Deserialize, Serialize};

/// A deployment blueprint.
///
/// Unknown top-level fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Blueprint {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub blueprint_name: String,

    /// How validator failures surface (default: ERROR).
    #[serde(default)]
    pub validation_level: ValidationLevel,

    /// Pre-flight validators.
    ///
    /// `None` (key absent) selects the default validator set derived from
    /// `vars`; an explicit empty list disables validators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Vec<ValidatorConfig>>,

    /// Deployment-wide variables.
    #[serde(default)]
    pub vars: Dict,

    /// Module groups, in deployment order.
    #[serde(default)]
    pub deployment_groups: Vec<DeploymentGroup>,
}

/// An ordered collection of modules deployed together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentGroup {
    #[serde(rename = "group", default)]
    pub name: String,

    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A unit of infrastructure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    /// Identifier, unique across the blueprint.
    #[serde(default)]
    pub id: String,

    /// Where the module comes from (local path or remote address).
    #[serde(default)]
    pub source: String,

    /// Module kind (default: terraform).
    #[serde(default = "default_kind")]
    pub kind: String,

    /// IDs of earlier modules whose outputs this module consumes.
    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,

    /// Outputs requested from the module.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,

    /// User-supplied input values.
    #[serde(default, skip_serializing_if = "Dict::is_empty")]
    pub settings: Dict,
}

/// A validator declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Registered validator name, e.g. `test_project_exists`.
    pub validator: String,

    /// Named inputs; values are usually `((var.name))` references.
    #[serde(default)]
    pub inputs: Dict,
}

impl ValidatorConfig {
    pub fn new(validator: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            inputs: Dict::new(),
        }
    }

    /// Add an input value.
    pub fn with_input(mut self, name: &str, value: impl Into<crate::value::TypedValue>) -> Self {
        self.inputs.set(name, value);
        self
    }
}
