//! CLI argument parsing for bpcheck.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use bpcheck::blueprint::ValidationLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bpcheck: decode and validate deployment blueprints.
///
/// Validation runs in a fixed order:
/// - Deployment variables
/// - Pre-flight validators (project, region, zone existence)
/// - Module identity, wiring, and outputs
/// - Module settings
#[derive(Parser, Debug)]
#[command(name = "bpcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for bpcheck.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a blueprint.
    ///
    /// Decodes the blueprint, runs its validators against an inventory,
    /// and checks every module against the module manifest.
    Validate(ValidateArgs),

    /// Print a blueprint in canonical form.
    ///
    /// Decodes the blueprint and re-encodes it as YAML without validating.
    Show(ShowArgs),
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the blueprint YAML file.
    pub blueprint: PathBuf,

    /// Module manifest describing each module's inputs and outputs.
    #[arg(short, long)]
    pub modules: Option<PathBuf>,

    /// Inventory of projects, regions, and zones for validators.
    #[arg(short, long)]
    pub inventory: Option<PathBuf>,

    /// Override the blueprint's validation level (ERROR, WARNING, IGNORE).
    #[arg(short = 'l', long, value_parser = parse_validation_level)]
    pub validation_level: Option<ValidationLevel>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the blueprint YAML file.
    pub blueprint: PathBuf,
}

fn parse_validation_level(s: &str) -> Result<ValidationLevel, String> {
    ValidationLevel::from_str(s)
        .ok_or_else(|| format!("invalid validation level '{}' (expected ERROR, WARNING or IGNORE)", s))
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_minimal() {
        let cli = Cli::try_parse_from(["bpcheck", "validate", "hpc.yaml"]).unwrap();
        assert!(!cli.verbose);
        if let Command::Validate(args) = cli.command {
            assert_eq!(args.blueprint, PathBuf::from("hpc.yaml"));
            assert!(args.modules.is_none());
            assert!(args.inventory.is_none());
            assert!(args.validation_level.is_none());
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn parse_validate_full() {
        let cli = Cli::try_parse_from([
            "bpcheck",
            "validate",
            "hpc.yaml",
            "--modules",
            "modules.yaml",
            "--inventory",
            "inventory.yaml",
            "--validation-level",
            "warning",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        if let Command::Validate(args) = cli.command {
            assert_eq!(args.modules, Some(PathBuf::from("modules.yaml")));
            assert_eq!(args.inventory, Some(PathBuf::from("inventory.yaml")));
            assert_eq!(args.validation_level, Some(ValidationLevel::Warning));
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn parse_validate_rejects_unknown_level() {
        let result = Cli::try_parse_from([
            "bpcheck",
            "validate",
            "hpc.yaml",
            "--validation-level",
            "LOUD",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["bpcheck", "show", "hpc.yaml"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.blueprint, PathBuf::from("hpc.yaml"));
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["bpcheck"]).is_err());
    }
}
