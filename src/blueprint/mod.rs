//! Blueprint data model.
//!
//! A blueprint declares deployment-wide variables, ordered groups of modules,
//! and the pre-flight validators to run. Parsing is forward compatible
//! (unknown top-level fields are ignored) and performs no validation; see
//! [`crate::validate`] for that.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{Blueprint, DeploymentGroup, Module, ValidatorConfig};
pub use types::{ModuleKind, ValidationLevel, is_valid_kind};
