use crate::export::{ExportFormat, ReportKind};
use crate::models::{SortOrder, StaffSortKey, StaffStatus, WorkStatus};
use clap::{Parser, Subcommand};

/// Command-line interface definition for wastedesk
/// Administrative console for garbage-overflow detections and collection staff
#[derive(Parser)]
#[command(
    name = "wastedesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Municipal waste-management desk: detections, staff roster, assignments and reports",
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, value_name = "N", help = "Only the newest N rows")]
        limit: Option<usize>,
    },

    /// Load raw detection documents from a JSON file
    Import {
        /// JSON array of documents, or an object with a "documents" array
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// List garbage detections, newest first
    Detections {
        #[arg(long, value_name = "N", help = "Show at most N detections (default: page_size)")]
        limit: Option<usize>,

        #[arg(long, conflicts_with = "limit", help = "Show every detection")]
        all: bool,

        #[arg(long, help = "Only detections not assigned to any staff member")]
        unassigned: bool,
    },

    /// Manage the staff roster
    Staff {
        #[command(subcommand)]
        action: StaffCommand,
    },

    /// Assign a detection to a staff member (work starts as pending)
    Assign {
        /// Detection id
        detection: String,
        /// Staff id
        staff: String,
    },

    /// Inspect and update assigned work
    Work {
        #[command(subcommand)]
        action: WorkCommand,
    },

    /// Detection and assignment statistics
    Stats,

    /// Detections grouped by area
    Areas {
        #[arg(long, value_name = "N", help = "Show only the N busiest areas")]
        limit: Option<usize>,
    },

    /// Heatmap data points and summary
    Heatmap {
        #[arg(long, value_name = "N", default_value_t = 20, help = "Points to list")]
        limit: usize,

        #[arg(long, help = "Print points as JSON (lat, lng, weight 0-1)")]
        json: bool,
    },

    /// Dashboard overview
    Dashboard {
        #[arg(long, help = "Refresh every refresh_interval_secs")]
        watch: bool,

        #[arg(
            long,
            requires = "watch",
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Stop after N refreshes"
        )]
        ticks: Option<u64>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite without confirmation")]
        force: bool,
    },

    /// Export a report
    Export {
        #[arg(long, value_enum, default_value = "detections")]
        report: ReportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Period filter on detection / assignment timestamps.
        ///
        /// YYYY, YYYY-MM, YYYY-MM-DD or start:end in the same format; "all" for everything.
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum StaffCommand {
    /// Add a staff member
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long = "area", default_value = "")]
        working_area: String,

        #[arg(long, value_enum, default_value = "active")]
        status: StaffStatus,

        #[arg(long = "join-date", value_name = "YYYY-MM-DD", help = "Defaults to today")]
        join_date: Option<String>,

        #[arg(long = "collections", default_value_t = 0)]
        total_collections: u64,

        #[arg(long, help = "0 to 5 (default: default_rating)")]
        rating: Option<f64>,
    },

    /// List staff members
    List {
        #[arg(long, help = "Match name, id or working area")]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StaffStatus>,

        #[arg(long, value_enum, default_value = "name")]
        sort: StaffSortKey,

        #[arg(long, value_enum, default_value = "asc")]
        order: SortOrder,

        #[arg(long, help = "Include assigned work counts")]
        workload: bool,
    },

    /// Show one staff member and their assigned work
    Show { id: String },

    /// Update fields of a staff member; omitted fields keep their value
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long = "area")]
        working_area: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StaffStatus>,

        #[arg(long = "join-date", value_name = "YYYY-MM-DD")]
        join_date: Option<String>,

        #[arg(long = "collections")]
        total_collections: Option<u64>,

        #[arg(long)]
        rating: Option<f64>,
    },

    /// Delete a staff member
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkCommand {
    /// Work assigned to a staff member, newest first
    List { staff: String },

    /// Set the work status of an assigned detection
    Status {
        detection: String,
        #[arg(value_enum)]
        status: WorkStatus,
    },

    /// Assignments made in the last hours
    Recent {
        #[arg(long, help = "Window in hours (default: recent_hours)")]
        hours: Option<i64>,
    },
}
