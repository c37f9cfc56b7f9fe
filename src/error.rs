//! Error types for bpcheck.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Structural failures carry the offending module ID and field; module identity
//! failures embed a canonical YAML dump of the module.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for blueprint decoding and validation.
#[derive(Error, Debug)]
pub enum BlueprintError {
    /// A file could not be read.
    #[error("failed to read '{path}': {reason}")]
    Io { path: String, reason: String },

    /// YAML could not be decoded into the value model.
    #[error("failed to decode YAML: {reason}")]
    Decode { line: Option<usize>, reason: String },

    /// A value could not be converted to its JSON-compatible form.
    #[error("failed to marshal value for key '{key}': {reason}")]
    Marshal { key: String, reason: String },

    /// A value has the wrong kind for where it is used.
    #[error("{0}")]
    Type(String),

    /// A referenced deployment variable exists but is not a string.
    #[error("the deployment variable {reference} is not a string")]
    TypeMismatch { reference: String },

    /// A value is not a `((var.name))` reference to a defined variable.
    #[error("the value {reference} is not a deployment variable or was not defined")]
    UnresolvedReference { reference: String },

    /// A deployment variable was declared without a value.
    #[error("deployment variable {name} was not set")]
    NilVariable { name: String },

    #[error("a module id cannot be empty\n{dump}")]
    EmptyId { dump: String },

    #[error("a module source cannot be empty\n{dump}")]
    EmptySource { dump: String },

    #[error("a module kind is invalid: '{kind}'\n{dump}")]
    InvalidKind { kind: String, dump: String },

    #[error("module id '{id}' is used more than once")]
    DuplicateModuleId { id: String },

    #[error("module '{module_id}' uses '{used}', which is not defined earlier in the blueprint")]
    UnknownUse { module_id: String, used: String },

    #[error("requested output was not found in the module, module: {module_id} output: {output}")]
    UnknownOutput { module_id: String, output: String },

    #[error("a setting was added that is not found in the module: Module ID: {module_id} Setting: {setting}")]
    ExtraSetting { module_id: String, setting: String },

    /// The module reader could not produce a schema.
    #[error("failed to get info for module at {module_source}: {cause:#}")]
    ModuleInfo {
        module_source: String,
        cause: anyhow::Error,
    },

    #[error("found an issue while validating settings for module at {module_source}: {inner}")]
    Settings {
        module_source: String,
        #[source]
        inner: Box<BlueprintError>,
    },

    /// Provided validator inputs differ from the required set.
    #[error("{message}")]
    InputMismatch { validator: String, message: String },

    #[error("passed wrong validator '{got}' to {expected} implementation")]
    WrongValidator { expected: String, got: String },

    #[error("{name} is not an implemented validator")]
    ValidatorNotImplemented { name: String },

    /// The remote environment check rejected the inputs.
    #[error("validator {validator} failed: {cause:#}")]
    RemoteCheck {
        validator: String,
        cause: anyhow::Error,
    },

    /// One or more validators failed at ERROR severity.
    #[error("validation failed due to the issues listed above")]
    ValidationAggregate { errors: usize, warnings: usize },

    /// Invalid arguments or configuration supplied by the user.
    #[error("{0}")]
    Config(String),
}

impl BlueprintError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BlueprintError::Io { .. }
            | BlueprintError::Decode { .. }
            | BlueprintError::Marshal { .. }
            | BlueprintError::Config(_) => exit_codes::USER_ERROR,
            _ => exit_codes::VALIDATION_FAILURE,
        }
    }

    pub(crate) fn from_yaml(err: serde_yaml::Error) -> Self {
        BlueprintError::Decode {
            line: err.location().map(|loc| loc.line()),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for bpcheck operations.
pub type Result<T> = std::result::Result<T, BlueprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_has_user_exit_code() {
        let err = BlueprintError::Decode {
            line: Some(3),
            reason: "bad".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn structural_errors_have_validation_exit_code() {
        let err = BlueprintError::UnknownOutput {
            module_id: "net".to_string(),
            output: "foo".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);

        let err = BlueprintError::ValidationAggregate {
            errors: 1,
            warnings: 0,
        };
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = BlueprintError::ExtraSetting {
            module_id: "vpc".to_string(),
            setting: "colour".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "a setting was added that is not found in the module: Module ID: vpc Setting: colour"
        );

        let err = BlueprintError::ValidatorNotImplemented {
            name: "test_made_up".to_string(),
        };
        assert_eq!(err.to_string(), "test_made_up is not an implemented validator");
    }

    #[test]
    fn module_info_keeps_cause_chain() {
        let cause = anyhow::anyhow!("no such file").context("reading manifest");
        let err = BlueprintError::ModuleInfo {
            module_source: "modules/network/vpc".to_string(),
            cause,
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to get info for module at modules/network/vpc"));
        assert!(msg.contains("reading manifest"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn settings_error_exposes_inner_source() {
        use std::error::Error as _;

        let err = BlueprintError::Settings {
            module_source: "modules/vpc".to_string(),
            inner: Box::new(BlueprintError::ExtraSetting {
                module_id: "vpc".to_string(),
                setting: "x".to_string(),
            }),
        };
        assert!(err.source().is_some());
    }
}
