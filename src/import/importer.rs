use log::debug;

use super::pipeline::Stage;
use super::report::{StageOutcome, StageReport};
use super::stages::{CategoryStage, CATEGORY_HEADER_ROWS};
use crate::error::ImportError;
use crate::header::MergedHeader;
use crate::parser::parse_record;
use crate::reconcile::reconcile;
use crate::registry::SystemRegistry;
use crate::sheet::{header_region, objects, raw_rows, ReadOptions, Workbook};
use crate::store::Store;
use crate::ui::Ui;

/// Import one category sheet: reconcile each row's station, then replace its
/// detail row.
///
/// Rows without a station name or code are skipped. A store failure stops
/// this sheet only; rows written before it stay. The registry token is only
/// required so that system lookups cannot run before `systems` is filled.
pub fn import_category<W: Workbook, U: Ui>(
    store: &Store,
    workbook: &mut W,
    sheet: &str,
    stage: &CategoryStage,
    _registry: &SystemRegistry,
    ui: &mut U,
) -> StageReport {
    let category = stage.category;
    let schema = category.detail_table();
    let report = StageReport::new(Stage::Category(category), sheet);

    let grid = match workbook.grid(sheet) {
        Ok(grid) => grid,
        Err(ImportError::SheetNotFound(_)) => {
            ui.warn(format!("{}: sheet {:?} not found, skipped", category, sheet));
            return report.with_outcome(StageOutcome::SheetMissing);
        }
        Err(e) => {
            ui.warn(format!("{}: {}, skipped", category, e));
            return report.with_outcome(StageOutcome::Skipped(e.to_string()));
        }
    };

    let header = match MergedHeader::from_rows(&header_region(&grid, CATEGORY_HEADER_ROWS)) {
        Ok(header) => header,
        Err(e) => {
            ui.warn(format!("{}: {}, skipped", category, e));
            return report.with_outcome(StageOutcome::Skipped(e.to_string()));
        }
    };
    debug!("{} header: {:?}", category, header.labels());

    let rows = objects(&header, raw_rows(&grid, ReadOptions::from_row(CATEGORY_HEADER_ROWS)));
    let total = rows.len() as u64;
    let mut report = report;

    for (idx, row) in rows.iter().enumerate() {
        ui.set_progress(idx as u64 + 1, total, category.label());

        let station = match reconcile(store, category, row, &stage.coordinates, &stage.lookup) {
            Ok(station) => station,
            Err(e @ ImportError::RowMissingKey { .. }) => {
                ui.warn(format!("{}: {}, skipped", category, e));
                report.rows_skipped += 1;
                continue;
            }
            Err(e) => {
                ui.error(format!("{}: row {}: {}", category, row.number(), e));
                return report.with_outcome(StageOutcome::Aborted(e.to_string()));
            }
        };

        let parsed = parse_record(row, schema, &station.context());
        report.malformed_numbers += parsed.malformed_numbers;

        if let Err(e) = store.replace_detail(schema, &parsed) {
            ui.error(format!("{}: row {}: {}", category, row.number(), e));
            return report.with_outcome(StageOutcome::Aborted(e.to_string()));
        }
        report.rows_written += 1;
    }

    ui.clear_progress();
    report
}
