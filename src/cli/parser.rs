use crate::db::employees::EmployeeSort;
use crate::export::ExportFormat;
use crate::models::employee_status::EmployeeStatus;
use crate::models::pay_group::GroupBy;
use crate::models::search_field::SearchField;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for hrledger
/// CLI application to keep employee records and pay reports in SQLite
#[derive(Parser)]
#[command(
    name = "hrledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee records, bulk salary adjustments and pay reports backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", value_name = "N", help = "Only the N most recent rows")]
        last: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Employee directory: add, edit, show, list, delete
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Search employees by name, identity number or id
    Search {
        /// Text to look for
        term: String,

        #[arg(long = "by", value_enum, help = "Field to match (default from config)")]
        by: Option<SearchField>,
    },

    /// Raise salaries in [min, max) by a percentage
    Adjust {
        #[arg(long = "percent", allow_negative_numbers = true, help = "Raise in percent (0-100)")]
        percent: f64,

        #[arg(long = "min", allow_negative_numbers = true, help = "Lower salary bound (inclusive)")]
        min: f64,

        #[arg(long = "max", allow_negative_numbers = true, help = "Upper salary bound (exclusive)")]
        max: f64,

        #[arg(long = "dry-run", help = "Show what would change without writing")]
        dry_run: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Monthly pay totals grouped by job title or division
    Report {
        #[arg(long, short, value_name = "YYYY-MM", help = "Month to report (default: current)")]
        month: Option<String>,

        #[arg(long = "by", value_enum, help = "Grouping key (default from config)")]
        by: Option<GroupBy>,

        #[arg(long = "statements", help = "List every statement with group subtotals")]
        statements: bool,
    },

    /// Pay statements
    Pay {
        #[command(subcommand)]
        action: PayAction,
    },

    /// Seed employees or pay statements from CSV files
    Import {
        #[command(subcommand)]
        what: ImportTarget,
    },

    /// Export a report or the employee list
    Export {
        #[command(subcommand)]
        what: ExportTarget,
    },
}

/// Employee fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct EmployeeFields {
    #[arg(long = "first")]
    pub first_name: Option<String>,

    #[arg(long = "last")]
    pub last_name: Option<String>,

    #[arg(long)]
    pub ssn: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, help = "Phone number (empty string clears it)")]
    pub phone: Option<String>,

    #[arg(long = "hired", value_name = "YYYY-MM-DD")]
    pub hire_date: Option<String>,

    #[arg(long = "title")]
    pub job_title: Option<String>,

    #[arg(long)]
    pub division: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub salary: Option<f64>,

    #[arg(long, value_enum)]
    pub status: Option<EmployeeStatus>,
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Create a new employee record
    Add {
        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// Update some fields of an employee
    Edit {
        id: i64,

        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// Show one employee
    Show { id: i64 },

    /// List employees
    List {
        #[arg(long, value_enum)]
        status: Option<EmployeeStatus>,

        #[arg(long)]
        division: Option<String>,

        #[arg(long = "title")]
        job_title: Option<String>,

        #[arg(long, value_enum, default_value = "name")]
        sort: EmployeeSort,
    },

    /// Delete an employee and their pay statements
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PayAction {
    /// List pay statements
    List {
        #[arg(long = "employee", value_name = "ID")]
        employee: Option<i64>,

        #[arg(long, short, value_name = "YYYY-MM")]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ImportTarget {
    /// CSV with first_name,last_name,ssn,email,phone,hire_date,job_title,division,salary,status
    Employees { file: String },

    /// CSV with employee_id,period_start,period_end,gross_pay,deductions,net_pay
    Pay { file: String },
}

#[derive(Subcommand)]
pub enum ExportTarget {
    /// Export the grouped pay report of a month
    Report {
        #[arg(long, short, value_name = "YYYY-MM")]
        month: Option<String>,

        #[arg(long = "by", value_enum)]
        by: Option<GroupBy>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the employee directory
    Employees {
        #[arg(long, value_enum)]
        status: Option<EmployeeStatus>,

        #[arg(long)]
        division: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
