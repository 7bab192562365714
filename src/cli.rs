use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::category::Category;
use crate::config::{DEFAULT_DATABASE, DEFAULT_WORKBOOK};

#[derive(Parser, Debug)]
#[command(name = "hydro-survey-to-sqlite")]
#[command(version, about = "Import a hydrological station survey workbook into SQLite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the database from the survey workbook
    Import {
        /// Survey workbook (.xls, .xlsx, .ods)
        #[arg(short, long, default_value = DEFAULT_WORKBOOK)]
        workbook: PathBuf,

        /// Output SQLite database path (replaced if it exists)
        #[arg(short, long, default_value = DEFAULT_DATABASE)]
        output_db: PathBuf,

        /// Only include these tables (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        include: Option<Vec<String>>,

        /// Exclude these tables (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Show a full-screen dashboard instead of log lines
        #[arg(long)]
        tui: bool,
    },

    /// List the sheet names of a workbook
    ListSheets {
        #[arg(short, long, default_value = DEFAULT_WORKBOOK)]
        workbook: PathBuf,
    },

    /// Print the merged header key of every column of a sheet
    ListHeaders {
        /// Exact sheet name
        sheet: String,

        #[arg(short, long, default_value = DEFAULT_WORKBOOK)]
        workbook: PathBuf,
    },

    /// List all table names in dependency order
    ListTables,

    /// Station type flags with their labels
    StationTypes,

    /// Basins in an imported database
    Basins {
        #[arg(long, default_value = DEFAULT_DATABASE)]
        db: PathBuf,
    },

    /// River systems of a basin with station counts
    Systems {
        basin_code: String,

        #[arg(long, default_value = DEFAULT_DATABASE)]
        db: PathBuf,
    },

    /// Stations, optionally narrowed to a river system or a basin's unassigned stations
    Stations {
        /// River-system code
        #[arg(long, conflicts_with = "no_system")]
        system: Option<String>,

        /// Basin code whose stations have no river system
        #[arg(long, value_name = "BASIN_CODE")]
        no_system: Option<String>,

        #[arg(long, default_value = DEFAULT_DATABASE)]
        db: PathBuf,
    },

    /// One station by id
    Station {
        id: i64,

        #[arg(long, default_value = DEFAULT_DATABASE)]
        db: PathBuf,
    },

    /// Category detail of a station
    Detail {
        /// hydrology, water-level, rainfall, evaporation, water-quality or soil-moisture
        category: Category,

        station_id: i64,

        #[arg(long, default_value = DEFAULT_DATABASE)]
        db: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_defaults() {
        let cli = Cli::try_parse_from(["hydro-survey-to-sqlite", "import"]).unwrap();
        match cli.command {
            Commands::Import {
                workbook,
                output_db,
                include,
                tui,
                ..
            } => {
                assert_eq!(workbook, PathBuf::from(DEFAULT_WORKBOOK));
                assert_eq!(output_db, PathBuf::from(DEFAULT_DATABASE));
                assert!(include.is_none());
                assert!(!tui);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_detail_parses_category() {
        let cli =
            Cli::try_parse_from(["hydro-survey-to-sqlite", "detail", "water-level", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Detail {
                category: Category::WaterLevel,
                station_id: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_stations_filters_conflict() {
        assert!(Cli::try_parse_from([
            "hydro-survey-to-sqlite",
            "stations",
            "--system",
            "0101",
            "--no-system",
            "01"
        ])
        .is_err());
    }
}
