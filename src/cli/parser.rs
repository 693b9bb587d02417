use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for eldlog
/// CLI application to record, edit and certify daily duty-status logs
#[derive(Parser)]
#[command(
    name = "eldlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A driver's daily log (ELD) editor: 24-hour duty-status grid, undo/redo, certification",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Override the record backend (sqlite or http)
    #[arg(global = true, long = "backend")]
    pub backend: Option<String>,

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

    /// Manage trips (local records)
    Trip {
        #[command(subcommand)]
        action: TripAction,
    },

    /// Generate one daily log per trip day
    Generate {
        #[arg(long = "trip", help = "Trip id")]
        trip: i64,

        #[arg(long = "start", help = "First day of the trip (YYYY-MM-DD or 'today')")]
        start: String,

        #[arg(long = "vehicle", help = "Vehicle number")]
        vehicle: Option<String>,

        #[arg(long = "trailer", help = "Trailer number")]
        trailer: Option<String>,

        #[arg(
            long = "template",
            help = "Seed new days with the planned duty timeline"
        )]
        template: bool,
    },

    /// List daily logs
    List {
        #[arg(long = "trip", help = "Only logs of this trip")]
        trip: Option<i64>,

        #[arg(long = "status", help = "Filter by status: generated, certified, submitted")]
        status: Option<String>,
    },

    /// Show the grid of one daily log
    Show {
        /// Log id
        id: i64,
    },

    /// Edit a daily log interactively (commands are read from stdin)
    Edit {
        /// Log id
        id: i64,
    },

    /// Certify a daily log (it can no longer be edited afterwards)
    Certify {
        /// Log id
        id: i64,
    },

    /// Delete a daily log
    Del {
        /// Log id
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export daily logs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "trip", help = "Only logs of this trip")]
        trip: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum TripAction {
    /// Add a trip
    Add {
        /// Trip name
        name: String,

        #[arg(long = "from", default_value = "", help = "Current location")]
        current: String,

        #[arg(long = "pickup", default_value = "", help = "Pickup location")]
        pickup: String,

        #[arg(long = "dropoff", default_value = "", help = "Dropoff location")]
        dropoff: String,

        #[arg(long = "hours", help = "Planned total trip time in hours")]
        hours: Option<f64>,
    },

    /// List trips
    List,
}
