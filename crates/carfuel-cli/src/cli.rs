//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use carfuel_types::FuelType;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "carfuel")]
#[command(author, version, about = "Track fuel purchases and fuel economy", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Database file path (defaults to the platform data directory)
    #[arg(long, global = true, env = "CARFUEL_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    /// Record a fuel purchase
    Add(AddArgs),

    /// List fuel records
    List(ListArgs),

    /// Show fuel economy statistics
    Stats(StatsArgs),

    /// Export the whole database as a JSON backup
    Export {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the database contents with a JSON backup
    Import {
        /// Backup file to restore
        input: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Accept backups from a newer schema version
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum VehicleAction {
    /// Register a new vehicle (the first one becomes active)
    Add {
        /// Display name
        nickname: String,

        /// Model description
        #[arg(short, long)]
        model: String,

        /// Model year
        #[arg(short, long)]
        year: i32,

        /// Color
        #[arg(short, long, default_value = "")]
        color: String,

        /// Fuel type (gasoline, ethanol, flex, diesel)
        #[arg(short, long, default_value = "flex")]
        fuel_type: FuelType,

        /// Tank capacity in liters
        #[arg(short, long)]
        tank_capacity: f64,
    },

    /// List registered vehicles
    List,

    /// Make a vehicle the active one
    Use {
        /// Vehicle id or nickname
        vehicle: String,
    },

    /// Remove a vehicle and all of its fuel records
    Remove {
        /// Vehicle id or nickname
        vehicle: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Arguments for recording a fuel purchase.
///
/// At least two of price, liters and total must be given; the third is
/// derived.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Vehicle id or nickname (defaults to the active vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Odometer reading in km
    #[arg(short, long)]
    pub odometer: f64,

    /// Price per liter
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Liters purchased
    #[arg(short, long)]
    pub liters: Option<f64>,

    /// Total amount paid
    #[arg(short, long)]
    pub total: Option<f64>,

    /// Purchase date/time, RFC3339 or YYYY-MM-DD (defaults to now)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Fuel type of this purchase (defaults to the vehicle's)
    #[arg(short, long)]
    pub fuel_type: Option<FuelType>,

    /// The tank was not filled completely
    #[arg(long)]
    pub partial: bool,

    /// Station name
    #[arg(long)]
    pub station: Option<String>,

    /// Free-text note
    #[arg(long)]
    pub notes: Option<String>,

    /// Tire pressure was checked
    #[arg(long)]
    pub tires: bool,

    /// Oil level was checked
    #[arg(long)]
    pub oil: bool,

    /// A fuel additive was used
    #[arg(long)]
    pub additive: bool,

    /// Save even when validation warnings are raised
    #[arg(long)]
    pub force: bool,
}

/// Arguments for listing fuel records.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Vehicle id or nickname (defaults to the active vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Only records at or after this date (RFC3339 or YYYY-MM-DD)
    #[arg(short, long)]
    pub since: Option<String>,

    /// Only records at or before this date (RFC3339 or YYYY-MM-DD)
    #[arg(short, long)]
    pub until: Option<String>,

    /// Maximum number of records (0 for all)
    #[arg(short = 'n', long, default_value = "0")]
    pub limit: u32,

    /// Only full-tank records
    #[arg(long)]
    pub full_tank: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the stats command.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Vehicle id or nickname (defaults to the active vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Only statistics over records at or after this date
    #[arg(short, long)]
    pub since: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_color_is_global() {
        let cli =
            Cli::try_parse_from(["carfuel", "vehicle", "list", "--no-color"]).unwrap();
        assert!(cli.no_color);
    }

    #[test]
    fn test_add_requires_odometer() {
        let result = Cli::try_parse_from(["carfuel", "add", "--price", "5.89"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_parses_fill_amounts() {
        let cli = Cli::try_parse_from([
            "carfuel", "add", "-o", "45230.5", "-p", "5.89", "-l", "40", "--partial",
        ])
        .unwrap();

        let Commands::Add(args) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(args.odometer, 45230.5);
        assert_eq!(args.price, Some(5.89));
        assert_eq!(args.liters, Some(40.0));
        assert_eq!(args.total, None);
        assert!(args.partial);
        assert!(!args.force);
    }

    #[test]
    fn test_vehicle_add_parses_fuel_type() {
        let cli = Cli::try_parse_from([
            "carfuel", "vehicle", "add", "Daily", "-m", "Fiat Argo 1.0", "-y", "2022", "-f",
            "ethanol", "-t", "48",
        ])
        .unwrap();

        let Commands::Vehicle {
            action: VehicleAction::Add { fuel_type, .. },
        } = cli.command
        else {
            panic!("expected vehicle add");
        };
        assert_eq!(fuel_type, FuelType::Ethanol);
    }

    #[test]
    fn test_unknown_fuel_type_rejected() {
        let result = Cli::try_parse_from([
            "carfuel", "vehicle", "add", "Daily", "-m", "X", "-y", "2022", "-f", "kerosene", "-t",
            "48",
        ]);
        assert!(result.is_err());
    }
}
