//! Implementation of the `bpcheck validate` command.
//!
//! Loads the blueprint and its collaborators from disk, runs the pipeline,
//! and prints a summary. Validator failures have already been logged by the
//! runner by the time the summary is printed.

use crate::cli::ValidateArgs;
use bpcheck::Blueprint;
use bpcheck::blueprint::ValidationLevel;
use bpcheck::error::{BlueprintError, Result};
use bpcheck::schema::ModuleManifest;
use bpcheck::validate::{Pipeline, StaticInventory, ValidatorReport};
use std::path::Path;
use tracing::debug;

/// Execute the `bpcheck validate` command.
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let blueprint = Blueprint::load(&args.blueprint)?;
    let level = args.validation_level.unwrap_or(blueprint.validation_level);

    let manifest = match &args.modules {
        Some(path) => ModuleManifest::load(path)?,
        None => ModuleManifest::default(),
    };
    let inventory = load_inventory(&blueprint, level, args.inventory.as_deref())?;

    debug!(
        blueprint = %args.blueprint.display(),
        level = %level,
        modules = manifest.len(),
        "validating blueprint"
    );

    let report = Pipeline::new(&blueprint, &manifest, &inventory)
        .with_validation_level(level)
        .run()?;

    print_summary(&blueprint, &args.blueprint, &report);
    Ok(())
}

/// Load the inventory, or fall back to an empty one when no validator
/// would consult it.
fn load_inventory(
    blueprint: &Blueprint,
    level: ValidationLevel,
    path: Option<&Path>,
) -> Result<StaticInventory> {
    if let Some(path) = path {
        return StaticInventory::load(path);
    }

    if level != ValidationLevel::Ignore && !blueprint.effective_validators().is_empty() {
        return Err(BlueprintError::Config(
            "validators need an inventory.\n\n\
             Pass --inventory <FILE>, or skip validators with --validation-level IGNORE."
                .to_string(),
        ));
    }

    Ok(StaticInventory::default())
}

fn print_summary(blueprint: &Blueprint, path: &Path, report: &ValidatorReport) {
    let name = if blueprint.blueprint_name.is_empty() {
        path.display().to_string()
    } else {
        blueprint.blueprint_name.clone()
    };

    println!("Validated blueprint: {}", name);
    println!("  Groups:     {}", blueprint.deployment_groups.len());
    println!("  Modules:    {}", blueprint.modules().count());
    println!("  Validators: {}", report.ran);

    if report.warning_count() > 0 {
        println!();
        println!("Warnings ({}):", report.warning_count());
        for outcome in &report.outcomes {
            println!("  - {}: {}", outcome.validator, outcome.cause);
        }
    }
}
