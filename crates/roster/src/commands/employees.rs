//! Employee command handlers.
//!
//! Every handler drives the view controller the way the interactive UI
//! does: load the list, open the form, save. The controller guarantees a
//! fresh fetch after each change.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;

use roster_core::{Employee, EmployeeFields, ViewController};

use crate::cli::{AddArgs, EditArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "First Name")]
    first_name: String,
    #[tabled(rename = "Last Name")]
    last_name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Arc<Employee>> for EmployeeRow {
    fn from(e: &Arc<Employee>) -> Self {
        Self {
            first_name: e.fields.first_name.clone(),
            last_name: e.fields.last_name.clone(),
            email: e.fields.email.clone(),
            id: e.id.to_string(),
        }
    }
}

fn detail(e: &Arc<Employee>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:         {}", e.id);
    let _ = writeln!(out, "First Name: {}", e.fields.first_name);
    let _ = writeln!(out, "Last Name:  {}", e.fields.last_name);
    let _ = write!(out, "Email:      {}", e.fields.email);
    out
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(view: &mut ViewController, global: &GlobalOpts) -> Result<(), CliError> {
    view.start().await?;
    let snap = view.store().snapshot();
    let out = output::render_list(
        global.format(),
        snap.as_slice(),
        |e| EmployeeRow::from(e),
        |e| e.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn get(
    view: &mut ViewController,
    identifier: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    view.start().await?;
    let employee = util::resolve_employee(view, identifier)?;
    let out = output::render_single(global.format(), &employee, detail, |e| e.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn add(
    view: &mut ViewController,
    args: AddArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let fields = EmployeeFields::new(args.first_name, args.last_name, args.email);
    let name = format!("{} {}", fields.first_name, fields.last_name);

    view.add()?;
    view.save(fields).await?;

    output::success(&format!("Added {name}"), global.colored(), global.quiet);
    Ok(())
}

pub async fn edit(
    view: &mut ViewController,
    args: EditArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    view.start().await?;
    let current = util::resolve_employee(view, &args.id)?;

    view.edit(&current)?;
    let mut fields = current.fields.clone();
    if let Some(first_name) = args.first_name {
        fields.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        fields.last_name = last_name;
    }
    if let Some(email) = args.email {
        fields.email = email;
    }

    if fields == current.fields {
        view.cancel()?;
        output::notice("Nothing to change", global.colored(), global.quiet);
        return Ok(());
    }

    view.save(fields).await?;
    output::success(
        &format!("Updated employee {}", current.id),
        global.colored(),
        global.quiet,
    );
    Ok(())
}

pub async fn delete(
    view: &mut ViewController,
    identifier: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    view.start().await?;
    let employee = util::resolve_employee(view, identifier)?;

    let prompt = format!("Delete {} ({})?", employee.display_name(), employee.id);
    if !util::confirm(&prompt, "delete", global.yes)? {
        output::notice("Aborted", global.colored(), global.quiet);
        return Ok(());
    }

    view.delete(&employee.id).await?;
    output::success(
        &format!("Deleted {}", employee.display_name()),
        global.colored(),
        global.quiet,
    );
    Ok(())
}
