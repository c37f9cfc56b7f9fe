//! Built-in pre-flight validators.
//!
//! Each validator requires an exact set of input names, resolves every input
//! to a string through `((var.name))` references, and makes exactly one call
//! to the [`RemoteValidator`].

use super::remote::RemoteValidator;
use crate::blueprint::ValidatorConfig;
use crate::error::{BlueprintError, Result};
use crate::reference::get_string_value;
use crate::value::Dict;
use std::fmt;

/// Signature of an executable validator check.
pub type CheckFn = fn(&ValidatorConfig, &Dict, &dyn RemoteValidator) -> Result<()>;

/// Names of the built-in validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidatorName {
    TestProjectExists,
    TestRegionExists,
    TestZoneExists,
    TestZoneInRegion,
}

impl ValidatorName {
    pub const ALL: [ValidatorName; 4] = [
        ValidatorName::TestProjectExists,
        ValidatorName::TestRegionExists,
        ValidatorName::TestZoneExists,
        ValidatorName::TestZoneInRegion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorName::TestProjectExists => "test_project_exists",
            ValidatorName::TestRegionExists => "test_region_exists",
            ValidatorName::TestZoneExists => "test_zone_exists",
            ValidatorName::TestZoneInRegion => "test_zone_in_region",
        }
    }

    /// Parse a validator name from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == s)
    }

    /// The exact set of input names this validator accepts.
    pub fn required_inputs(&self) -> &'static [&'static str] {
        match self {
            ValidatorName::TestProjectExists => &["project_id"],
            ValidatorName::TestRegionExists => &["project_id", "region"],
            ValidatorName::TestZoneExists => &["project_id", "zone"],
            ValidatorName::TestZoneInRegion => &["project_id", "region", "zone"],
        }
    }

    /// The check implementing this validator.
    pub fn check_fn(&self) -> CheckFn {
        match self {
            ValidatorName::TestProjectExists => test_project_exists,
            ValidatorName::TestRegionExists => test_region_exists,
            ValidatorName::TestZoneExists => test_zone_exists,
            ValidatorName::TestZoneInRegion => test_zone_in_region,
        }
    }
}

impl fmt::Display for ValidatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that the provided input names equal `required` as sets.
pub fn test_input_list(validator: &str, inputs: &Dict, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !inputs.has(name))
        .collect();
    if !missing.is_empty() {
        return Err(BlueprintError::InputMismatch {
            validator: validator.to_string(),
            message: format!(
                "required inputs {:?} were not provided to {}",
                missing, validator
            ),
        });
    }

    let extra: Vec<&str> = inputs.keys().filter(|k| !required.contains(k)).collect();
    if !extra.is_empty() {
        return Err(BlueprintError::InputMismatch {
            validator: validator.to_string(),
            message: format!(
                "only {} inputs {:?} should be provided to {}, found unexpected {:?}",
                required.len(),
                required,
                validator,
                extra
            ),
        });
    }

    Ok(())
}

/// Guard against registry misconfiguration, then enforce the input set.
fn check_invocation(name: ValidatorName, config: &ValidatorConfig) -> Result<()> {
    if config.validator != name.as_str() {
        return Err(BlueprintError::WrongValidator {
            expected: name.as_str().to_string(),
            got: config.validator.clone(),
        });
    }
    test_input_list(&config.validator, &config.inputs, name.required_inputs())
}

fn resolve_input(config: &ValidatorConfig, input: &str, vars: &Dict) -> Result<String> {
    // `check_invocation` has already enforced the input set; `None` only
    // occurs for callers that skip it.
    match config.inputs.get(input) {
        Some(value) => get_string_value(value, vars),
        None => Err(BlueprintError::InputMismatch {
            validator: config.validator.clone(),
            message: format!("input {} was not provided to {}", input, config.validator),
        }),
    }
}

fn remote_failure(name: ValidatorName) -> impl FnOnce(anyhow::Error) -> BlueprintError {
    move |cause| BlueprintError::RemoteCheck {
        validator: name.as_str().to_string(),
        cause,
    }
}

pub fn test_project_exists(
    config: &ValidatorConfig,
    vars: &Dict,
    remote: &dyn RemoteValidator,
) -> Result<()> {
    let name = ValidatorName::TestProjectExists;
    check_invocation(name, config)?;

    let project_id = resolve_input(config, "project_id", vars)?;

    remote
        .test_project_exists(&project_id)
        .map_err(remote_failure(name))
}

pub fn test_region_exists(
    config: &ValidatorConfig,
    vars: &Dict,
    remote: &dyn RemoteValidator,
) -> Result<()> {
    let name = ValidatorName::TestRegionExists;
    check_invocation(name, config)?;

    let project_id = resolve_input(config, "project_id", vars)?;
    let region = resolve_input(config, "region", vars)?;

    remote
        .test_region_exists(&project_id, &region)
        .map_err(remote_failure(name))
}

pub fn test_zone_exists(
    config: &ValidatorConfig,
    vars: &Dict,
    remote: &dyn RemoteValidator,
) -> Result<()> {
    let name = ValidatorName::TestZoneExists;
    check_invocation(name, config)?;

    let project_id = resolve_input(config, "project_id", vars)?;
    let zone = resolve_input(config, "zone", vars)?;

    remote
        .test_zone_exists(&project_id, &zone)
        .map_err(remote_failure(name))
}

pub fn test_zone_in_region(
    config: &ValidatorConfig,
    vars: &Dict,
    remote: &dyn RemoteValidator,
) -> Result<()> {
    let name = ValidatorName::TestZoneInRegion;
    check_invocation(name, config)?;

    let project_id = resolve_input(config, "project_id", vars)?;
    let zone = resolve_input(config, "zone", vars)?;
    let region = resolve_input(config, "region", vars)?;

    remote
        .test_zone_in_region(&project_id, &zone, &region)
        .map_err(remote_failure(name))
}
