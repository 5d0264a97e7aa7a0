//! Command-line presentation adapter for `staffbook_core`.
//!
//! # Responsibility
//! - Translate command-line gestures into record store calls.
//! - Render records, filtered views and errors for a terminal user.
//!
//! # Invariants
//! - Every command opens the store, runs one use-case, and re-renders from
//!   the store afterwards; the core never prints.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::error;
use staffbook_core::db::open_db;
use staffbook_core::{
    default_log_level, init_logging, Department, Employee, EmployeeFilter, EmployeeId, EmployeeInput,
    EmploymentStatus, KeyValueStore, RecordStore, SqliteKeyValueStore, StoreConfig, StoreError,
};
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "staffbook", version, about = "Local employee record manager")]
struct Cli {
    /// SQLite file holding the employee collection
    #[arg(long, env = "STAFFBOOK_DB", default_value = "staffbook.sqlite3")]
    db: PathBuf,
    /// Key the collection is stored under
    #[arg(long, env = "STAFFBOOK_STORAGE_KEY")]
    storage_key: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "STAFFBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "STAFFBOOK_LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List employees, optionally filtered
    List(FilterArgs),
    /// Search by name, email, position or phone
    Search {
        text: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Add a new employee
    Add(EmployeeArgs),
    /// Replace every editable field of an employee
    Update {
        id: EmployeeId,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    /// Delete an employee after confirmation
    Delete {
        id: EmployeeId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write all employees as comma-separated text
    Export {
        /// Output file; defaults to employees.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show collection totals
    Stats,
}

#[derive(Debug, Args)]
struct FilterArgs {
    #[arg(long, value_parser = Department::parse)]
    department: Option<Department>,
    #[arg(long, value_parser = EmploymentStatus::parse)]
    status: Option<EmploymentStatus>,
}

#[derive(Debug, Args)]
struct EmployeeArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    position: String,
    #[arg(long, value_parser = Department::parse)]
    department: Department,
    #[arg(long, allow_negative_numbers = true)]
    salary: f64,
    /// YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    hire_date: NaiveDate,
    #[arg(long, value_parser = EmploymentStatus::parse, default_value = "Active")]
    status: EmploymentStatus,
}

impl From<EmployeeArgs> for EmployeeInput {
    fn from(value: EmployeeArgs) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            position: value.position,
            department: value.department,
            salary: value.salary,
            hire_date: value.hire_date,
            status: value.status,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&cli.db)?;
    let storage = SqliteKeyValueStore::try_new(&conn)?;
    let mut config = StoreConfig::default();
    if let Some(key) = cli.storage_key {
        config = config.with_storage_key(key);
    }
    let mut store = RecordStore::open_with_config(storage, config)?;

    match cli.command {
        Command::List(filter) => render_table(&store.query(&filter.into_filter(String::new()))),
        Command::Search { text, filter } => render_table(&store.query(&filter.into_filter(text))),
        Command::Add(fields) => {
            let created = store.submit(fields.into())?;
            println!("Employee added successfully (id {}).", created.id);
            render_table(&store.list().iter().collect::<Vec<_>>());
        }
        Command::Update { id, fields } => {
            store.begin_edit(id)?;
            let updated = store.submit(fields.into())?;
            println!("Employee {} updated successfully.", updated.id);
            render_table(&store.list().iter().collect::<Vec<_>>());
        }
        Command::Delete { id, yes } => delete_with_confirmation(&mut store, id, yes)?,
        Command::Export { output } => {
            let document = match store.export_delimited() {
                Ok(document) => document,
                Err(StoreError::EmptyCollection) => {
                    println!("No employees to export.");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };
            let path = output.unwrap_or_else(|| PathBuf::from(&store.config().export_file_name));
            std::fs::write(&path, document)?;
            println!("Exported {} employees to {}.", store.len(), path.display());
        }
        Command::Stats => println!("Total Employees: {}", store.stats().total_employees),
    }

    Ok(())
}

fn delete_with_confirmation<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    id: EmployeeId,
    yes: bool,
) -> Result<(), Box<dyn Error>> {
    store.request_delete(id);
    if !yes && !confirm(&format!("Delete employee {id}? [y/N] "))? {
        store.cancel_delete();
        println!("Deletion cancelled.");
        return Ok(());
    }

    if store.confirm_delete()? {
        println!("Employee deleted successfully.");
    } else {
        println!("No employee with id {id}.");
    }
    Ok(())
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    let mut stdout = std::io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn render_table(employees: &[&Employee]) {
    if employees.is_empty() {
        println!("No employees found");
        return;
    }

    println!(
        "{:<5} {:<24} {:<28} {:<18} {:<20} {:<12} {:>12} {:<10} {}",
        "ID", "Name", "Email", "Phone", "Position", "Department", "Salary", "Hire Date", "Status"
    );
    for employee in employees {
        println!(
            "{:<5} {:<24} {:<28} {:<18} {:<20} {:<12} {:>12.2} {:<10} {}",
            employee.id,
            employee.full_name(),
            employee.email,
            employee.phone,
            employee.position,
            employee.department,
            employee.salary,
            employee.hire_date,
            employee.status
        );
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
}

impl FilterArgs {
    fn into_filter(self, search_text: String) -> EmployeeFilter {
        EmployeeFilter {
            search_text,
            department: self.department,
            status: self.status,
        }
    }
}
