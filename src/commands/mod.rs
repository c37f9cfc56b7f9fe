//! Command implementations for bpcheck.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod show;
mod validate;

use crate::cli::Command;
use bpcheck::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => validate::cmd_validate(args),
        Command::Show(args) => show::cmd_show(args),
    }
}
