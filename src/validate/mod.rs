//! Validation module for bpcheck.
//!
//! - Structural checks: variables, module identity, outputs, settings (fail fast)
//! - Validators: severity-aware pre-flight checks against the environment (aggregated)
//! - Pipeline: runs both in a fixed order

pub mod builtin;
pub mod pipeline;
pub mod remote;
pub mod runner;
pub mod structure;


pub use builtin::{CheckFn, ValidatorName, test_input_list};
pub use pipeline::{Pipeline, ValidationStage, validate};
pub use remote::{RemoteValidator, StaticInventory};
pub use runner::{
    Outcome, REMEDIATION, Severity, ValidatorRegistry, ValidatorReport, execute_validators,
};
pub use structure::{
    validate_module, validate_module_settings, validate_modules, validate_outputs,
    validate_settings, validate_vars,
};
