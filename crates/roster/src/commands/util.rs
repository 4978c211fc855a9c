//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use roster_core::{Employee, EmployeeId, ViewController};

use crate::error::CliError;

/// Resolve an id argument against the current snapshot.
pub fn resolve_employee(view: &ViewController, identifier: &str) -> Result<Arc<Employee>, CliError> {
    let id: EmployeeId = EmployeeId::from(identifier);
    view.store()
        .get(&id)
        .ok_or_else(|| CliError::NotFound {
            identifier: identifier.into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused rather than
/// silently approved.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
