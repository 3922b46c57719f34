//! Command execution against the core services.

use crate::{CatalogCommand, Cli, Command, EmployeeArgs, EmployeeCommand, SkillArgs};
use anyhow::{bail, Context, Result};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use staffing_core::db::{clear_all_data, open_db};
use staffing_core::{
    added_message, core_version, default_log_level, deleted_message, init_logging, ping,
    ActionOutcome, AssignmentLedger, EmployeeDraft, EmployeeRepository, HistoryService,
    LedgerResult, MatchService, Process, ProcessCatalog, SqliteAssignmentStore,
    SqliteEmployeeRepository, SqliteProcessCatalog,
};
use std::process::ExitCode;

pub fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    if let Command::Ping = cli.command {
        println!("staffing_core ping={}", ping());
        println!("staffing_core version={}", core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Command::Ping => Ok(ExitCode::SUCCESS),
        Command::Catalog { command } => run_catalog(&SqliteProcessCatalog::new(&conn), command),
        Command::Match(skills) => {
            let service = MatchService::new(SqliteProcessCatalog::new(&conn));
            let best = service.find_best_match(skills.potential, skills.communication)?;
            print_json(&best)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Suggest(skills) => {
            let service = MatchService::new(SqliteProcessCatalog::new(&conn));
            print_json(&service.rank_suggestions(skills.potential, skills.communication)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Employee { command } => run_employee(&conn, command),
        Command::Orphans => {
            let history = HistoryService::new(SqliteEmployeeRepository::new(&conn));
            print_json(&history.orphaned_assignments()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::History => {
            let history = HistoryService::new(SqliteEmployeeRepository::new(&conn));
            print_json(&history.assignment_history()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to reset without --yes");
            }
            let cleared = clear_all_data(&conn)?;
            println!(
                "ok: removed {} processes and {} employees",
                cleared.processes, cleared.employees
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_catalog(catalog: &SqliteProcessCatalog<'_>, command: CatalogCommand) -> Result<ExitCode> {
    match command {
        CatalogCommand::Load { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read `{}`", file.display()))?;
            let processes: Vec<Process> = serde_json::from_str(&raw)
                .with_context(|| format!("`{}` is not a JSON process list", file.display()))?;
            match catalog.replace_all(&processes) {
                Ok(report) => {
                    println!("ok: installed {} processes", report.installed);
                    for id in report.orphaned_assignments {
                        println!("orphaned: {id}");
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    println!("error: {err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        CatalogCommand::List => {
            print_json(&catalog.list_processes()?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_employee(conn: &Connection, command: EmployeeCommand) -> Result<ExitCode> {
    let ledger = AssignmentLedger::new(SqliteAssignmentStore::new(conn));
    let outcome = match command {
        EmployeeCommand::Add { fields, auto } => {
            let draft = to_draft(fields);
            let result = if auto {
                ledger.add_employee_best_match(&draft)
            } else {
                ledger.add_employee(&draft)
            };
            to_outcome(result, |employee| {
                ActionOutcome::success(added_message(employee), employee.id)
            })
        }
        EmployeeCommand::Update { id, fields } => {
            to_outcome(ledger.update_employee(id, &to_draft(fields)), |updated| {
                ActionOutcome::success("Employee updated successfully", updated.employee.id)
            })
        }
        EmployeeCommand::Delete { id } => to_outcome(ledger.delete_employee(id), |deleted| {
            ActionOutcome::success(deleted_message(deleted), deleted.employee.id)
        }),
        EmployeeCommand::Show { email } => {
            let repo = SqliteEmployeeRepository::new(conn);
            return match repo.find_by_email(&email)? {
                Some(employee) => {
                    print_json(&employee)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("error: No employee found with email: {email}");
                    Ok(ExitCode::FAILURE)
                }
            };
        }
        EmployeeCommand::List => {
            print_json(&SqliteEmployeeRepository::new(conn).list_employees()?)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    if outcome.ok {
        match outcome.employee_id.as_deref() {
            Some(id) => println!("ok: {} (id={id})", outcome.message),
            None => println!("ok: {}", outcome.message),
        }
        Ok(ExitCode::SUCCESS)
    } else {
        println!("error: {}", outcome.message);
        Ok(ExitCode::FAILURE)
    }
}

fn to_outcome<T>(
    result: LedgerResult<T>,
    on_success: impl FnOnce(&T) -> ActionOutcome,
) -> ActionOutcome {
    match result {
        Ok(value) => on_success(&value),
        Err(err) => ActionOutcome::failure(&err),
    }
}

fn to_draft(fields: EmployeeArgs) -> EmployeeDraft {
    let SkillArgs {
        potential,
        communication,
    } = fields.skills;
    let mut draft = EmployeeDraft::new(fields.name, fields.email, potential, communication);
    draft.process_name = fields.process;
    draft
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Ping => "ping",
        Command::Catalog { .. } => "catalog",
        Command::Match(_) => "match",
        Command::Suggest(_) => "suggest",
        Command::Employee { .. } => "employee",
        Command::Orphans => "orphans",
        Command::History => "history",
        Command::Reset { .. } => "reset",
    }
}
