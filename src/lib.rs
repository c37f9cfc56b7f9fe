//! bpcheck: decode and validate deployment blueprints.
//!
//! A blueprint is a YAML document declaring deployment variables, optional
//! pre-flight validators, and groups of infrastructure modules. This crate
//! decodes it into strongly-typed values and runs a staged validation
//! pipeline over it before anything is deployed.

pub mod blueprint;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod reference;
pub mod schema;
pub mod validate;
pub mod value;

pub use blueprint::Blueprint;
pub use error::{BlueprintError, Result};
