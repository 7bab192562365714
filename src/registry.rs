//! Basin / river-system reference table built from the code sheet

use log::{debug, info};
use std::collections::HashSet;

use crate::error::ImportError;
use crate::sheet::{cell_text, SourceRow};
use crate::store::{NewSystem, Store};

/// Header rows at the top of the code sheet
pub const REGISTRY_HEADER_ROWS: usize = 2;

const BASIN_NAME: usize = 0;
const BASIN_CODE: usize = 1;
const RIVER_SYSTEM_NAME: usize = 2;
const RIVER_SYSTEM_CODE: usize = 3;

/// Proof that the registry stage has run.
///
/// Station stages take one of these so they cannot run before it. Outside
/// this crate only [`build_registry`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRegistry {
    basins_inserted: usize,
    systems_inserted: usize,
}

impl SystemRegistry {
    /// Anchor rows inserted by this build
    pub fn basins_inserted(&self) -> usize {
        self.basins_inserted
    }

    /// River-system rows inserted by this build
    pub fn systems_inserted(&self) -> usize {
        self.systems_inserted
    }

    /// Token for a run whose code sheet could not be read; lookups then
    /// find nothing.
    pub(crate) fn empty() -> Self {
        Self {
            basins_inserted: 0,
            systems_inserted: 0,
        }
    }
}

fn text(row: &SourceRow, col: usize) -> Option<String> {
    row.get(col).and_then(cell_text)
}

/// Populate `systems` from the code sheet's data rows in two passes.
///
/// Every basin gets its anchor row before any river system is inserted.
/// Basin cells are only filled on a basin's first row; later rows inherit
/// the most recent basin. Duplicates are ignored.
pub fn build_registry(store: &Store, rows: &[SourceRow]) -> Result<SystemRegistry, ImportError> {
    let mut registry = SystemRegistry::empty();

    let mut seen = HashSet::new();
    for row in rows {
        let (Some(name), Some(code)) = (text(row, BASIN_NAME), text(row, BASIN_CODE)) else {
            continue;
        };
        if !seen.insert(code.clone()) {
            continue;
        }
        let inserted = store.insert_system(&NewSystem {
            basin_name: &name,
            basin_code: &code,
            river_system: None,
        })?;
        if inserted {
            registry.basins_inserted += 1;
        }
    }

    let mut current: Option<(String, String)> = None;
    for row in rows {
        if let (Some(name), Some(code)) = (text(row, BASIN_NAME), text(row, BASIN_CODE)) {
            current = Some((name, code));
        }

        let (Some(river_name), Some(river_code)) =
            (text(row, RIVER_SYSTEM_NAME), text(row, RIVER_SYSTEM_CODE))
        else {
            continue;
        };

        let Some((basin_name, basin_code)) = &current else {
            debug!(
                "Row {}: river system {} precedes any basin, skipped",
                row.number(),
                river_code
            );
            continue;
        };

        let inserted = store.insert_system(&NewSystem {
            basin_name,
            basin_code,
            river_system: Some((river_name.as_str(), river_code.as_str())),
        })?;
        if inserted {
            registry.systems_inserted += 1;
        }
    }

    info!(
        "System registry: {} basins, {} river systems inserted",
        registry.basins_inserted, registry.systems_inserted
    );

    Ok(registry)
}
