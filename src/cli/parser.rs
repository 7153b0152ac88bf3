use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rGeoAttend
/// CLI application for geofenced attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rgeoattend",
    version = env!("CARGO_PKG_VERSION"),
    about = "Geofenced attendance CLI: check in/out with GPS coordinates, office geofences and auto-checkout",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Employee the caller is linked to
    #[arg(global = true, long = "employee", short = 'e')]
    pub employee: Option<i64>,

    /// Act with administrative privilege (bypasses location checks)
    #[arg(global = true, long = "admin")]
    pub admin: bool,

    /// Company scope (defaults to `company_id` from the config file)
    #[arg(global = true, long = "company")]
    pub company: Option<i64>,

    /// Display timezone (IANA name, e.g. Europe/Rome)
    #[arg(global = true, long = "tz")]
    pub tz: Option<String>,

    /// Override the clock (RFC 3339), used by tests and replays
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employees
    #[command(subcommand)]
    Employee(EmployeeCmd),

    /// Manage geofence locations
    #[command(subcommand)]
    Location(LocationCmd),

    /// Check in at the current position
    Checkin {
        #[arg(long = "lat", allow_hyphen_values = true, help = "Latitude in decimal degrees")]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true, help = "Longitude in decimal degrees")]
        lon: Option<f64>,
    },

    /// Check out at the current position
    Checkout {
        #[arg(long = "lat", allow_hyphen_values = true, help = "Latitude in decimal degrees")]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true, help = "Longitude in decimal degrees")]
        lon: Option<f64>,
    },

    /// Show the current attendance status
    Status {
        #[arg(long = "json", help = "Print the status as JSON")]
        json: bool,
    },

    /// Auto-checkout every open session past office hours (run from cron)
    Sweep,

    /// List attendance records
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "open", help = "Only sessions without check-out")]
        open: bool,

        #[arg(long = "all", help = "All employees (ignores --employee)")]
        all: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export attendance records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Register an employee
    Add {
        #[arg(long)]
        name: String,

        #[arg(long = "timezone", help = "IANA timezone, e.g. Asia/Kolkata")]
        timezone: Option<String>,
    },

    /// List employees
    List,

    /// Set or clear an employee's timezone
    Tz {
        id: i64,

        #[arg(help = "IANA timezone; omit to clear")]
        timezone: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LocationCmd {
    /// Create a geofence location
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long = "radius", help = "Allowed radius in km (default from config)")]
        radius_km: Option<f64>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long = "start", help = "Office start hour, e.g. 9 or 9.5")]
        office_start: Option<f64>,

        #[arg(long = "end", help = "Office end hour, e.g. 18 or 17.5")]
        office_end: Option<f64>,
    },

    /// Edit a location (only the given fields change)
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long = "radius")]
        radius_km: Option<f64>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long = "start")]
        office_start: Option<f64>,

        #[arg(long = "end")]
        office_end: Option<f64>,

        #[arg(long = "clear-address", help = "Remove the address")]
        clear_address: bool,

        #[arg(
            long = "clear-office-hours",
            help = "Remove office hours (auto-checkout uses the configured default)"
        )]
        clear_office_hours: bool,
    },

    /// List locations
    List {
        #[arg(long = "all", help = "Include inactive locations")]
        all: bool,
    },

    /// Restrict a location to an employee
    Assign {
        location: i64,
        employee: i64,
    },

    /// Remove an employee from a location
    Unassign {
        location: i64,
        employee: i64,
    },

    /// Re-enable a location
    Activate { id: i64 },

    /// Disable a location without deleting it
    Deactivate { id: i64 },
}
