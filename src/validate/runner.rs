//! Severity-aware validator execution.
//!
//! Unlike structural checks, validators never stop early: every declared
//! validator runs and failures are collected into a [`ValidatorReport`]. Only
//! after the full pass does [`ValidatorReport::check`] decide whether the
//! pipeline aborts.

use super::builtin::{CheckFn, ValidatorName};
use super::remote::RemoteValidator;
use crate::blueprint::{ValidationLevel, ValidatorConfig};
use crate::error::{BlueprintError, Result};
use crate::value::Dict;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, error, warn};

/// Guidance printed once after validator failures.
pub const REMEDIATION: &str = "validator failures can indicate a credentials problem.
validation can be configured:
- treat failures as warnings with \"--validation-level WARNING\"
  or `validation_level: WARNING` in the blueprint
- disable validators entirely with \"--validation-level IGNORE\"
- run a custom set of validators by listing them under `validators:`
  in the blueprint (an empty list runs none)";

/// Severity of a validator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A failed validator.
#[derive(Debug)]
pub struct Outcome {
    pub validator: String,
    pub severity: Severity,
    pub cause: BlueprintError,
}

/// Result of running the validator pass.
#[derive(Debug, Default)]
pub struct ValidatorReport {
    /// Number of registered validators that were invoked.
    pub ran: usize,
    /// Failures, in declaration order.
    pub outcomes: Vec<Outcome>,
}

impl ValidatorReport {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.severity == severity)
            .count()
    }

    /// Guidance to show after the validator pass, present only when at least
    /// one validator failed.
    pub fn remediation(&self) -> Option<&'static str> {
        (!self.is_clean()).then_some(REMEDIATION)
    }

    /// Fails once, with [`BlueprintError::ValidationAggregate`], if any
    /// outcome has ERROR severity.
    pub fn check(&self) -> Result<()> {
        if self.has_errors() {
            return Err(BlueprintError::ValidationAggregate {
                errors: self.error_count(),
                warnings: self.warning_count(),
            });
        }
        Ok(())
    }
}

/// Immutable mapping from validator name to check, built once per run.
pub struct ValidatorRegistry {
    checks: BTreeMap<&'static str, CheckFn>,
}

impl ValidatorRegistry {
    /// Registry holding every built-in validator.
    pub fn builtin() -> Self {
        Self {
            checks: ValidatorName::ALL
                .into_iter()
                .map(|name| (name.as_str(), name.check_fn()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<CheckFn> {
        self.checks.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.keys().copied()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Run every validator in declaration order.
///
/// Under [`ValidationLevel::Ignore`] nothing runs. A name missing from the
/// registry is always an ERROR outcome. A failing check is an ERROR outcome
/// under [`ValidationLevel::Error`] and a WARNING outcome under
/// [`ValidationLevel::Warning`].
pub fn execute_validators(
    validators: &[ValidatorConfig],
    level: ValidationLevel,
    vars: &Dict,
    registry: &ValidatorRegistry,
    remote: &dyn RemoteValidator,
) -> ValidatorReport {
    let mut report = ValidatorReport::default();

    if level == ValidationLevel::Ignore {
        debug!("validation level is IGNORE, skipping validators");
        return report;
    }

    for config in validators {
        let Some(check) = registry.get(&config.validator) else {
            let cause = BlueprintError::ValidatorNotImplemented {
                name: config.validator.clone(),
            };
            error!("error: {}", cause);
            report.outcomes.push(Outcome {
                validator: config.validator.clone(),
                severity: Severity::Error,
                cause,
            });
            continue;
        };

        report.ran += 1;
        debug!(validator = %config.validator, "running validator");

        if let Err(cause) = check(config, vars, remote) {
            let severity = match level {
                ValidationLevel::Warning => Severity::Warning,
                _ => Severity::Error,
            };
            match severity {
                Severity::Warning => warn!("warning: {}", cause),
                Severity::Error => error!("error: {}", cause),
            }
            report.outcomes.push(Outcome {
                validator: config.validator.clone(),
                severity,
                cause,
            });
        }
    }

    if let Some(guidance) = report.remediation() {
        warn!("{}", guidance);
    }

    report
}
