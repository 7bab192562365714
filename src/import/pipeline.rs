//! The ordered import stages
//!
//! Stages run strictly one after another, each reading what earlier stages
//! wrote: the registry fills `systems`, then every category sheet reconciles
//! its stations into the shared `stations` table. Category stages consume the
//! [`SystemRegistry`] the registry stage hands out.

use anyhow::Result;
use log::info;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use super::importer::import_category;
use super::report::{ImportReport, StageOutcome, StageReport};
use super::stages::CategoryStage;
use crate::category::Category;
use crate::config::{ImportConfig, SheetNames};
use crate::error::ImportError;
use crate::registry::{build_registry, SystemRegistry, REGISTRY_HEADER_ROWS};
use crate::schema::TableSchema;
use crate::sheet::{raw_rows, ExcelWorkbook, ReadOptions, Workbook};
use crate::store::Store;
use crate::ui::{Phase, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Registry,
    Category(Category),
}

/// Pipeline order; a stage may read rows written by any stage before it
pub const STAGES: [Stage; 7] = [
    Stage::Registry,
    Stage::Category(Category::Hydrology),
    Stage::Category(Category::WaterLevel),
    Stage::Category(Category::Rainfall),
    Stage::Category(Category::Evaporation),
    Stage::Category(Category::WaterQuality),
    Stage::Category(Category::SoilMoisture),
];

impl Stage {
    /// Table the stage fills; the stage runs only if it was selected
    pub fn target_table(self) -> &'static str {
        match self {
            Stage::Registry => "systems",
            Stage::Category(category) => category.detail_table().name,
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            Stage::Registry => Phase::BuildingRegistry,
            Stage::Category(category) => Phase::Importing(category),
        }
    }

    pub fn sheet(self, sheets: &SheetNames) -> &str {
        match self {
            Stage::Registry => &sheets.registry,
            Stage::Category(category) => sheets.category(category),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Registry => write!(f, "registry"),
            Stage::Category(category) => write!(f, "{}", category),
        }
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stages whose target table is among `tables`, in pipeline order
pub fn selected_stages(tables: &[&TableSchema]) -> Vec<Stage> {
    let selected: HashSet<&str> = tables.iter().map(|t| t.name).collect();
    STAGES
        .into_iter()
        .filter(|stage| selected.contains(stage.target_table()))
        .collect()
}

fn run_registry<W: Workbook, U: Ui>(
    store: &Store,
    workbook: &mut W,
    sheet: &str,
    ui: &mut U,
) -> (StageReport, SystemRegistry) {
    let report = StageReport::new(Stage::Registry, sheet);

    let grid = match workbook.grid(sheet) {
        Ok(grid) => grid,
        Err(ImportError::SheetNotFound(_)) => {
            ui.warn(format!("registry: sheet {:?} not found, systems left empty", sheet));
            return (
                report.with_outcome(StageOutcome::SheetMissing),
                SystemRegistry::empty(),
            );
        }
        Err(e) => {
            ui.warn(format!("registry: {}", e));
            return (
                report.with_outcome(StageOutcome::Skipped(e.to_string())),
                SystemRegistry::empty(),
            );
        }
    };

    let rows = raw_rows(&grid, ReadOptions::from_row(REGISTRY_HEADER_ROWS));
    ui.set_info(format!("{}: {} code rows", sheet, rows.len()));

    match build_registry(store, &rows) {
        Ok(registry) => {
            let mut report = report;
            report.rows_written = registry.basins_inserted() + registry.systems_inserted();
            (report, registry)
        }
        Err(e) => {
            ui.error(format!("registry: {}", e));
            (
                report.with_outcome(StageOutcome::Aborted(e.to_string())),
                SystemRegistry::empty(),
            )
        }
    }
}

/// Run every selected stage against an already created store
pub fn run_pipeline<W: Workbook, U: Ui>(
    store: &Store,
    workbook: &mut W,
    tables: &[&TableSchema],
    sheets: &SheetNames,
    ui: &mut U,
) -> ImportReport {
    let mut report = ImportReport::default();
    let mut registry: Option<SystemRegistry> = None;

    for stage in selected_stages(tables) {
        ui.set_phase(stage.phase());
        let sheet = stage.sheet(sheets);

        let stage_report = match stage {
            Stage::Registry => {
                let (stage_report, token) = run_registry(store, workbook, sheet, ui);
                registry = Some(token);
                stage_report
            }
            Stage::Category(category) => match &registry {
                Some(token) => import_category(
                    store,
                    workbook,
                    sheet,
                    CategoryStage::of(category),
                    token,
                    ui,
                ),
                None => StageReport::new(stage, sheet).with_outcome(StageOutcome::Skipped(
                    "system registry stage was not selected".to_string(),
                )),
            },
        };

        info!("{}", stage_report);
        ui.log(stage_report.to_string());
        report.stages.push(stage_report);
    }

    report
}

/// Create the store at `config.db_path` and import the workbook into it.
///
/// Only failing to create the store is an error. An unreadable workbook
/// leaves every selected table empty and is reported per stage.
pub fn import_workbook<U: Ui>(
    config: &ImportConfig,
    tables: &[&TableSchema],
    ui: &mut U,
) -> Result<ImportReport> {
    ui.set_phase(Phase::OpeningWorkbook);
    ui.set_info(format!(
        "{} -> {}",
        config.workbook_path.display(),
        config.db_path.display()
    ));

    let store = Store::create(&config.db_path)?;
    store.create_tables(tables)?;

    let report = match ExcelWorkbook::open(&config.workbook_path) {
        Ok(mut workbook) => run_pipeline(&store, &mut workbook, tables, &config.sheets, ui),
        Err(e) => {
            ui.error(e.to_string());
            let reason = e.to_string();
            ImportReport {
                stages: selected_stages(tables)
                    .into_iter()
                    .map(|stage| {
                        StageReport::new(stage, stage.sheet(&config.sheets))
                            .with_outcome(StageOutcome::Skipped(reason.clone()))
                    })
                    .collect(),
            }
        }
    };

    store.finalize()?;
    Ok(report)
}
