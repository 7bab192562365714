use anyhow::{bail, Context, Result};
use hydro_survey_to_sqlite::{
    category::station_types,
    cli::{Cli, Commands},
    config::ImportConfig,
    filter::resolve_tables,
    header::MergedHeader,
    import::{import_workbook, stages::CATEGORY_HEADER_ROWS},
    schema::{table_names, TableSchema},
    sheet::{header_region, ExcelWorkbook, Workbook},
    store::{self, Store},
    ui::{ConsoleUi, Ui, UiApp},
};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging(tui: bool) {
    let default_filter = if tui { "off" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run_import(config: ImportConfig, tables: Vec<&'static TableSchema>, tui: bool) -> Result<()> {
    let start = Instant::now();

    if tui {
        let mut ui = UiApp::new()?;
        let report = import_workbook(&config, &tables, &mut ui)?;
        ui.finish(&format!(
            "{}\nCreated {:?} ({} rows) in {:.1}s",
            report.summary(),
            config.db_path,
            report.rows_written(),
            start.elapsed().as_secs_f64()
        ))?;
    } else {
        let mut ui = ConsoleUi::new();
        let report = import_workbook(&config, &tables, &mut ui)?;
        ui.log(format!(
            "Created {:?} ({} rows) in {:.1}s",
            config.db_path,
            report.rows_written(),
            start.elapsed().as_secs_f64()
        ));
    }

    Ok(())
}

fn open_workbook(path: &Path) -> Result<ExcelWorkbook> {
    ExcelWorkbook::open(path).with_context(|| format!("Cannot read workbook {:?}", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let tui = matches!(cli.command, Commands::Import { tui: true, .. });
    init_logging(tui);

    match cli.command {
        Commands::Import {
            workbook,
            output_db,
            include,
            exclude,
            tui,
        } => {
            let tables = resolve_tables(include, exclude)?;
            let config = ImportConfig {
                workbook_path: workbook,
                db_path: output_db,
                ..ImportConfig::default()
            };
            run_import(config, tables, tui)?;
        }

        Commands::ListSheets { workbook } => {
            let workbook = open_workbook(&workbook)?;
            for name in workbook.sheet_names() {
                println!("{:?}", name);
            }
        }

        Commands::ListHeaders { sheet, workbook } => {
            let mut workbook = open_workbook(&workbook)?;
            let grid = workbook.grid(&sheet)?;
            let header = MergedHeader::from_rows(&header_region(&grid, CATEGORY_HEADER_ROWS))?;
            for (col, label) in header.labels().iter().enumerate() {
                println!("{:>3}  {}", col + 1, label);
            }
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }

        Commands::StationTypes => print_json(&station_types())?,

        Commands::Basins { db } => print_json(&store::basins(&Store::open(&db)?)?)?,

        Commands::Systems { basin_code, db } => {
            print_json(&store::systems_of_basin(&Store::open(&db)?, &basin_code)?)?
        }

        Commands::Stations {
            system,
            no_system,
            db,
        } => {
            let db = Store::open(&db)?;
            let stations = match (system, no_system) {
                (Some(code), _) => store::stations_by_system(&db, &code)?,
                (None, Some(basin_code)) => store::stations_without_system(&db, &basin_code)?,
                (None, None) => store::all_stations(&db)?,
            };
            print_json(&stations)?;
        }

        Commands::Station { id, db } => match store::station(&Store::open(&db)?, id)? {
            Some(station) => print_json(&station)?,
            None => bail!("Station {} not found", id),
        },

        Commands::Detail {
            category,
            station_id,
            db,
        } => match store::category_detail(&Store::open(&db)?, category, station_id)? {
            Some(detail) => print_json(&detail)?,
            None => bail!("No {} detail for station {}", category, station_id),
        },
    }

    Ok(())
}
