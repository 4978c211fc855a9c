//! Command dispatch.

pub mod config_cmd;
pub mod employees;
pub mod util;

use roster_core::ViewController;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route an employee command to its handler.
///
/// Config and completions never reach here; they run without a store.
pub async fn dispatch(
    cmd: Command,
    view: &mut ViewController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List => employees::list(view, global).await,
        Command::Get { id } => employees::get(view, &id, global).await,
        Command::Add(args) => employees::add(view, args, global).await,
        Command::Edit(args) => employees::edit(view, args, global).await,
        Command::Delete { id } => employees::delete(view, &id, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not use the employee store".into(),
        )),
    }
}
