//! Structural validation of variables and modules.
//!
//! These checks are fail-fast: the first problem aborts the run.

use crate::blueprint::{Blueprint, Module, is_valid_kind};
use crate::error::{BlueprintError, Result};
use crate::schema::{ModuleSchema, SchemaTable};
use crate::value::Dict;
use std::collections::BTreeSet;
use tracing::warn;

/// Check deployment variables for viable types.
///
/// A missing `project_id` is only a warning. `labels`, when set, must be an
/// object, and no variable may be null.
pub fn validate_vars(vars: &Dict) -> Result<()> {
    if !vars.has("project_id") {
        warn!("No project_id in deployment variables");
    }

    if let Some(labels) = vars.get("labels")
        && !labels.is_object()
    {
        return Err(BlueprintError::Type(format!(
            "vars.labels must be a map, found {}",
            labels.type_name()
        )));
    }

    if let Some((name, _)) = vars.iter().find(|(_, value)| value.is_null()) {
        return Err(BlueprintError::NilVariable {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Check module identity: ID, source, and kind.
pub fn validate_module(module: &Module) -> Result<()> {
    if module.id.is_empty() {
        return Err(BlueprintError::EmptyId {
            dump: module.dump(),
        });
    }
    if module.source.is_empty() {
        return Err(BlueprintError::EmptySource {
            dump: module.dump(),
        });
    }
    if !is_valid_kind(&module.kind) {
        return Err(BlueprintError::InvalidKind {
            kind: module.kind.clone(),
            dump: module.dump(),
        });
    }
    Ok(())
}

/// Every requested output must be declared by the module.
pub fn validate_outputs(module: &Module, schema: &ModuleSchema) -> Result<()> {
    for output in &module.outputs {
        if !schema.has_output(output) {
            return Err(BlueprintError::UnknownOutput {
                module_id: module.id.clone(),
                output: output.clone(),
            });
        }
    }
    Ok(())
}

/// Every setting must correspond to a declared input.
///
/// Absent required inputs are not reported here.
pub fn validate_settings(module: &Module, schema: &ModuleSchema) -> Result<()> {
    for setting in module.settings.keys() {
        if !schema.has_input(setting) {
            return Err(BlueprintError::ExtraSetting {
                module_id: module.id.clone(),
                setting: setting.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate identity, wiring, and outputs of every module in document order.
pub fn validate_modules(blueprint: &Blueprint, schemas: &mut SchemaTable<'_>) -> Result<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for (group, module) in blueprint.modules() {
        validate_module(module)?;

        // `use` may only point backwards.
        for used in &module.uses {
            if !seen.contains(used.as_str()) {
                return Err(BlueprintError::UnknownUse {
                    module_id: module.id.clone(),
                    used: used.clone(),
                });
            }
        }

        if !seen.insert(module.id.as_str()) {
            return Err(BlueprintError::DuplicateModuleId {
                id: module.id.clone(),
            });
        }

        let schema = schemas.get(&group.name, module)?;
        validate_outputs(module, schema)?;
    }
    Ok(())
}

/// Verify no module sets a value without a matching input.
pub fn validate_module_settings(
    blueprint: &Blueprint,
    schemas: &mut SchemaTable<'_>,
) -> Result<()> {
    for (group, module) in blueprint.modules() {
        let schema = schemas.get(&group.name, module)?;
        validate_settings(module, schema).map_err(|e| BlueprintError::Settings {
            module_source: module.source.clone(),
            inner: Box::new(e),
        })?;
    }
    Ok(())
}
