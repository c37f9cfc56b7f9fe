//! The four-stage validation pipeline.
//!
//! Stages run strictly in order:
//!
//! 1. Global variables
//! 2. Validators (aggregated, see [`super::runner`])
//! 3. Module identity, wiring, and outputs
//! 4. Module settings
//!
//! Any failure stops the run; the stage reached stays observable through
//! [`Pipeline::stage`].

use super::remote::RemoteValidator;
use super::runner::{ValidatorRegistry, ValidatorReport, execute_validators};
use super::structure::{validate_module_settings, validate_modules, validate_vars};
use crate::blueprint::{Blueprint, ValidationLevel};
use crate::error::Result;
use crate::schema::{ModuleReader, SchemaTable};
use std::fmt;
use tracing::{debug, info};

/// Last stage the pipeline completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationStage {
    Unvalidated,
    VarsChecked,
    ValidatorsRun,
    ModulesChecked,
    SettingsChecked,
    Validated,
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationStage::Unvalidated => "unvalidated",
            ValidationStage::VarsChecked => "vars checked",
            ValidationStage::ValidatorsRun => "validators run",
            ValidationStage::ModulesChecked => "modules checked",
            ValidationStage::SettingsChecked => "settings checked",
            ValidationStage::Validated => "validated",
        };
        f.write_str(name)
    }
}

/// Validates one blueprint against its collaborators.
pub struct Pipeline<'a> {
    blueprint: &'a Blueprint,
    reader: &'a dyn ModuleReader,
    remote: &'a dyn RemoteValidator,
    registry: ValidatorRegistry,
    level: ValidationLevel,
    stage: ValidationStage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        blueprint: &'a Blueprint,
        reader: &'a dyn ModuleReader,
        remote: &'a dyn RemoteValidator,
    ) -> Self {
        Self {
            blueprint,
            reader,
            remote,
            registry: ValidatorRegistry::builtin(),
            level: blueprint.validation_level,
            stage: ValidationStage::Unvalidated,
        }
    }

    /// Override the blueprint's validation level.
    pub fn with_validation_level(mut self, level: ValidationLevel) -> Self {
        self.level = level;
        self
    }

    pub fn validation_level(&self) -> ValidationLevel {
        self.level
    }

    pub fn stage(&self) -> ValidationStage {
        self.stage
    }

    fn advance(&mut self, stage: ValidationStage) {
        debug!(stage = %stage, "validation stage complete");
        self.stage = stage;
    }

    /// Run every stage.
    ///
    /// Returns the validator report on success so WARNING outcomes stay
    /// visible. Fails with the first structural error, or once with
    /// `ValidationAggregate` when any validator failed at ERROR severity.
    pub fn run(&mut self) -> Result<ValidatorReport> {
        let blueprint = self.blueprint;

        validate_vars(&blueprint.vars)?;
        self.advance(ValidationStage::VarsChecked);

        let validators = blueprint.effective_validators();
        let report = execute_validators(
            &validators,
            self.level,
            &blueprint.vars,
            &self.registry,
            self.remote,
        );
        report.check()?;
        self.advance(ValidationStage::ValidatorsRun);

        let mut schemas = SchemaTable::new(self.reader);
        validate_modules(blueprint, &mut schemas)?;
        self.advance(ValidationStage::ModulesChecked);

        validate_module_settings(blueprint, &mut schemas)?;
        self.advance(ValidationStage::SettingsChecked);

        self.advance(ValidationStage::Validated);
        info!(
            modules = blueprint.modules().count(),
            validators = report.ran,
            warnings = report.warning_count(),
            "blueprint validated"
        );
        Ok(report)
    }
}

/// Run the full pipeline with the blueprint's own validation level.
pub fn validate(
    blueprint: &Blueprint,
    reader: &dyn ModuleReader,
    remote: &dyn RemoteValidator,
) -> Result<ValidatorReport> {
    Pipeline::new(blueprint, reader, remote).run()
}
