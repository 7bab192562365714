//! Station identity reconciliation across category sheets
//!
//! Every category sheet names its stations by (name, code). The code is the
//! identity: all categories that mention a code share one `stations` row,
//! each setting its own flag on it.

use crate::category::Category;
use crate::coordinate::{Coordinate, CoordinateColumns};
use crate::error::ImportError;
use crate::header::HeaderRef;
use crate::parser::StationContext;
use crate::sheet::{cell_text, RowObject};
use crate::store::{StationUpsert, Store};

pub const STATION_NAME: HeaderRef = HeaderRef::spanning("测站名称");
pub const STATION_CODE: HeaderRef = HeaderRef::spanning("测站编码");

/// How a category's rows find their basin / river-system link
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SystemLookup {
    /// The row carries a river-system code unique across basins
    RiverSystemCode(HeaderRef),
    /// Exact (basin, river system) pair, falling back to the basin's anchor
    BasinAndRiver {
        basin: HeaderRef,
        river_system: HeaderRef,
    },
    /// The basin's anchor row
    BasinOnly(HeaderRef),
}

impl SystemLookup {
    /// First match wins; no match leaves the station unlinked
    pub fn resolve(&self, store: &Store, row: &RowObject) -> Result<Option<i64>, ImportError> {
        let text = |key: &HeaderRef| row.get(key).and_then(cell_text);

        match self {
            SystemLookup::RiverSystemCode(column) => match text(column) {
                Some(code) => store.system_by_river_code(&code),
                None => Ok(None),
            },
            SystemLookup::BasinAndRiver {
                basin,
                river_system,
            } => {
                let Some(basin_code) = text(basin) else {
                    return Ok(None);
                };
                if let Some(river_code) = text(river_system) {
                    if let Some(id) = store.system_by_pair(&basin_code, &river_code)? {
                        return Ok(Some(id));
                    }
                }
                store.basin_anchor(&basin_code)
            }
            SystemLookup::BasinOnly(basin) => match text(basin) {
                Some(code) => store.basin_anchor(&code),
                None => Ok(None),
            },
        }
    }
}

/// A station's natural key as written in a sheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationKey {
    pub name: String,
    pub code: String,
}

impl StationKey {
    pub fn from_row(row: &RowObject) -> Result<Self, ImportError> {
        let field = |key: &HeaderRef, label: &'static str| {
            row.get(key)
                .and_then(cell_text)
                .ok_or_else(|| ImportError::RowMissingKey {
                    row: row.number(),
                    field: label,
                })
        };

        Ok(Self {
            name: field(&STATION_NAME, "name")?,
            code: field(&STATION_CODE, "code")?,
        })
    }
}

/// The canonical station a row was reconciled to
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledStation {
    pub id: i64,
    pub key: StationKey,
    pub coordinate: Coordinate,
}

impl ReconciledStation {
    pub fn context(&self) -> StationContext<'_> {
        StationContext {
            station_id: self.id,
            name: &self.key.name,
            code: &self.key.code,
            coordinate: self.coordinate,
        }
    }
}

/// Resolve a row's station key, coordinates and system link, then upsert
/// the shared station row with this category's flag set.
pub fn reconcile(
    store: &Store,
    category: Category,
    row: &RowObject,
    coordinates: &CoordinateColumns,
    lookup: &SystemLookup,
) -> Result<ReconciledStation, ImportError> {
    let key = StationKey::from_row(row)?;
    let coordinate = coordinates.resolve(row);
    let system_id = lookup.resolve(store, row)?;

    let id = store.upsert_station(
        category,
        &StationUpsert {
            name: &key.name,
            code: &key.code,
            coordinate,
            system_id,
        },
    )?;

    Ok(ReconciledStation {
        id,
        key,
        coordinate,
    })
}
