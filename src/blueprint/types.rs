//! Blueprint enums and default value functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Blueprint-wide policy for how validator failures surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationLevel {
    /// Validator failures abort the pipeline (default).
    #[default]
    Error,
    /// Validator failures are reported but do not abort.
    Warning,
    /// Validators are not run at all.
    Ignore,
}

impl ValidationLevel {
    /// Parse a validation level from a string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Some(Self::Error),
            "WARNING" => Some(Self::Warning),
            "IGNORE" => Some(Self::Ignore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Ignore => "IGNORE",
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognised module kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Terraform,
    Packer,
}

impl ModuleKind {
    /// Parse a module kind from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "terraform" => Some(Self::Terraform),
            "packer" => Some(Self::Packer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terraform => "terraform",
            Self::Packer => "packer",
        }
    }
}

/// Returns true if `kind` names a recognised module kind.
pub fn is_valid_kind(kind: &str) -> bool {
    ModuleKind::from_str(kind).is_some()
}

// Default value functions for serde
pub(crate) fn default_kind() -> String {
    ModuleKind::Terraform.as_str().to_string()
}
