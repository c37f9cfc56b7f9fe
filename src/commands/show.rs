//! Implementation of the `bpcheck show` command.

use crate::cli::ShowArgs;
use bpcheck::Blueprint;
use bpcheck::error::Result;

/// Decode a blueprint and print its canonical YAML form.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let blueprint = Blueprint::load(&args.blueprint)?;
    print!("{}", blueprint.to_yaml()?);
    Ok(())
}
