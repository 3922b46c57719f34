//! `staffing` command-line front end.
//!
//! # Responsibility
//! - Parse operator commands and forward them to `staffing_core` services.
//! - Render mutation outcomes as `ok:`/`error:` lines and reads as JSON.

mod commands;

use clap::{Args, Parser, Subcommand};
use staffing_core::{Communication, EmployeeId, Potential};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "staffing",
    about = "Match employees to staffing processes while tracking vacancy",
    version
)]
pub struct Cli {
    /// SQLite database file. Created and migrated on first use.
    #[arg(long, env = "STAFFING_DB", default_value = "staffing.sqlite3", global = true)]
    pub db: PathBuf,
    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "STAFFING_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "STAFFING_LOG_DIR", global = true)]
    pub log_dir: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print core linkage and version
    Ping,
    /// Manage the process catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Show the best process for a skill profile
    Match(SkillArgs),
    /// Rank partially matching processes for a skill profile
    Suggest(SkillArgs),
    /// Create, edit, delete and inspect employees
    Employee {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// List employees bound to processes missing from the catalog
    Orphans,
    /// Per-day assignment counts
    History,
    /// Delete every process and employee
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Replace the whole catalog with a JSON array of processes
    Load { file: PathBuf },
    /// Print the catalog
    List,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    /// Add an employee, optionally assigned to a process
    Add {
        #[command(flatten)]
        fields: EmployeeArgs,
        /// Assign to the best matching process instead of `--process`
        #[arg(long, conflicts_with = "process")]
        auto: bool,
    },
    /// Replace an employee's fields and process binding
    Update {
        id: EmployeeId,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    /// Delete an employee and release its slot
    Delete { id: EmployeeId },
    /// Find one employee by email
    Show { email: String },
    /// List employees, most recent first
    List,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct SkillArgs {
    #[arg(long)]
    pub potential: Potential,
    #[arg(long)]
    pub communication: Communication,
}

#[derive(Args, Debug, Clone)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[command(flatten)]
    pub skills: SkillArgs,
    /// Process to bind; omit for an unassigned employee
    #[arg(long)]
    pub process: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
