//! Read queries over an imported database, shaped for JSON output

use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{params, Row};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::sqlite::Store;
use crate::category::Category;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Basin {
    pub basin_name: String,
    pub basin_code: String,
}

/// A river system of a basin; the anchor row has no name or code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    pub id: i64,
    pub river_system_name: Option<String>,
    pub river_system_code: Option<String>,
    pub stations_count: i64,
}

/// A canonical station with the basin and river system it is linked to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub id: i64,
    pub station_name: String,
    pub station_code: String,
    pub system_id: Option<i64>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub is_hydrology_station: bool,
    pub is_water_level_station: bool,
    pub is_rainfall_station: bool,
    pub is_evaporation_station: bool,
    pub is_water_quality_station: bool,
    pub is_soil_moisture_station: bool,
    pub has_changed: bool,
    pub basin_name: Option<String>,
    pub basin_code: Option<String>,
    pub river_system_name: Option<String>,
    pub river_system_code: Option<String>,
}

const STATION_SELECT: &str = "SELECT s.id, s.station_name, s.station_code, s.system_id,
        s.longitude, s.latitude,
        s.is_hydrology_station, s.is_water_level_station, s.is_rainfall_station,
        s.is_evaporation_station, s.is_water_quality_station, s.is_soil_moisture_station,
        s.has_changed,
        sys.basin_name, sys.basin_code, sys.river_system_name, sys.river_system_code
    FROM stations s
    LEFT JOIN systems sys ON s.system_id = sys.id";

impl StationRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let flag = |idx: usize| -> rusqlite::Result<bool> {
            Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or(0) != 0)
        };

        Ok(Self {
            id: row.get(0)?,
            station_name: row.get(1)?,
            station_code: row.get(2)?,
            system_id: row.get(3)?,
            longitude: row.get(4)?,
            latitude: row.get(5)?,
            is_hydrology_station: flag(6)?,
            is_water_level_station: flag(7)?,
            is_rainfall_station: flag(8)?,
            is_evaporation_station: flag(9)?,
            is_water_quality_station: flag(10)?,
            is_soil_moisture_station: flag(11)?,
            has_changed: flag(12)?,
            basin_name: row.get(13)?,
            basin_code: row.get(14)?,
            river_system_name: row.get(15)?,
            river_system_code: row.get(16)?,
        })
    }
}

/// Distinct basins ordered by code
pub fn basins(store: &Store) -> Result<Vec<Basin>> {
    let mut stmt = store
        .connection()
        .prepare("SELECT DISTINCT basin_name, basin_code FROM systems ORDER BY basin_code")?;
    let rows = stmt.query_map([], |row| {
        Ok(Basin {
            basin_name: row.get(0)?,
            basin_code: row.get(1)?,
        })
    })?;

    rows.collect::<rusqlite::Result<_>>()
        .context("Failed to query basins")
}

/// River systems of a basin with the number of stations linked to each
pub fn systems_of_basin(store: &Store, basin_code: &str) -> Result<Vec<SystemSummary>> {
    let mut stmt = store.connection().prepare(
        "SELECT s.id, s.river_system_name, s.river_system_code, COUNT(st.id) AS stations_count
         FROM systems s
         LEFT JOIN stations st ON st.system_id = s.id
         WHERE s.basin_code = ?1
         GROUP BY s.id
         ORDER BY s.river_system_code",
    )?;
    let rows = stmt.query_map(params![basin_code], |row| {
        Ok(SystemSummary {
            id: row.get(0)?,
            river_system_name: row.get(1)?,
            river_system_code: row.get(2)?,
            stations_count: row.get(3)?,
        })
    })?;

    rows.collect::<rusqlite::Result<_>>()
        .with_context(|| format!("Failed to query systems of basin {}", basin_code))
}

fn query_stations(store: &Store, filter: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<StationRecord>> {
    let sql = format!("{STATION_SELECT} {filter} ORDER BY s.station_code");
    let mut stmt = store.connection().prepare(&sql)?;
    let rows = stmt.query_map(args, StationRecord::from_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn stations_by_system(store: &Store, river_system_code: &str) -> Result<Vec<StationRecord>> {
    query_stations(store, "WHERE sys.river_system_code = ?1", &[&river_system_code])
        .with_context(|| format!("Failed to query stations of system {}", river_system_code))
}

/// Stations linked to the basin itself rather than one of its river systems
pub fn stations_without_system(store: &Store, basin_code: &str) -> Result<Vec<StationRecord>> {
    query_stations(
        store,
        "WHERE sys.basin_code = ?1 AND sys.river_system_code IS NULL",
        &[&basin_code],
    )
    .with_context(|| format!("Failed to query unassigned stations of basin {}", basin_code))
}

pub fn all_stations(store: &Store) -> Result<Vec<StationRecord>> {
    query_stations(store, "", &[]).context("Failed to query stations")
}

pub fn station(store: &Store, id: i64) -> Result<Option<StationRecord>> {
    let mut stations = query_stations(store, "WHERE s.id = ?1", &[&id])
        .with_context(|| format!("Failed to query station {}", id))?;
    Ok(stations.pop())
}

/// Detail row of a category for a station, with the station's canonical
/// code and coordinates and its basin / river system names.
///
/// Joined values only replace a detail column when they are not NULL.
pub fn category_detail(
    store: &Store,
    category: Category,
    station_id: i64,
) -> Result<Option<Map<String, Value>>> {
    let table = category.detail_table().name;
    let sql = format!(
        "SELECT d.*, s.station_code, s.longitude, s.latitude,
                sys.basin_name, sys.river_system_name
         FROM {table} d
         LEFT JOIN stations s ON d.station_id = s.id
         LEFT JOIN systems sys ON s.system_id = sys.id
         WHERE d.station_id = ?1"
    );

    let mut stmt = store.connection().prepare(&sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query(params![station_id])?;

    let Some(row) = rows.next()? else {
        return Ok(None);
    };

    let mut object = Map::new();
    for (idx, name) in names.iter().enumerate() {
        let value = json_value(row.get_ref(idx)?);
        if value.is_null() && object.contains_key(name) {
            continue;
        }
        object.insert(name.clone(), value);
    }

    Ok(Some(object))
}

fn json_value(value: ValueRef) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::parser::{ParsedRow, SqlValue};
    use crate::schema::ALL_TABLES;
    use crate::store::{NewSystem, StationUpsert};
    use std::collections::HashMap;

    fn seeded() -> (Store, i64) {
        let store = Store::in_memory().unwrap();
        store.create_tables(ALL_TABLES).unwrap();

        store
            .insert_system(&NewSystem { basin_name: "长江", basin_code: "01", river_system: None })
            .unwrap();
        store
            .insert_system(&NewSystem {
                basin_name: "长江",
                basin_code: "01",
                river_system: Some(("长江干流", "0101")),
            })
            .unwrap();
        store
            .insert_system(&NewSystem { basin_name: "黄河", basin_code: "02", river_system: None })
            .unwrap();

        let river = store.system_by_pair("01", "0101").unwrap();
        let anchor = store.basin_anchor("01").unwrap();
        let id = store
            .upsert_station(
                Category::Hydrology,
                &StationUpsert {
                    name: "甲站",
                    code: "H001",
                    coordinate: Coordinate::new(Some(110.5), Some(30.25)),
                    system_id: river,
                },
            )
            .unwrap();
        store
            .upsert_station(
                Category::Evaporation,
                &StationUpsert {
                    name: "乙站",
                    code: "E001",
                    coordinate: Coordinate::default(),
                    system_id: anchor,
                },
            )
            .unwrap();

        (store, id)
    }

    #[test]
    fn test_basins_and_systems() {
        let (store, _) = seeded();

        let basins = basins(&store).unwrap();
        assert_eq!(
            basins.iter().map(|b| b.basin_code.as_str()).collect::<Vec<_>>(),
            vec!["01", "02"]
        );

        let systems = systems_of_basin(&store, "01").unwrap();
        assert_eq!(systems.len(), 2);
        // NULL code (anchor) sorts first
        assert_eq!(systems[0].river_system_code, None);
        assert_eq!(systems[0].stations_count, 1);
        assert_eq!(systems[1].river_system_code.as_deref(), Some("0101"));
        assert_eq!(systems[1].stations_count, 1);
    }

    #[test]
    fn test_station_lists() {
        let (store, id) = seeded();

        let by_system = stations_by_system(&store, "0101").unwrap();
        assert_eq!(by_system.len(), 1);
        assert_eq!(by_system[0].id, id);
        assert!(by_system[0].is_hydrology_station);
        assert_eq!(by_system[0].basin_name.as_deref(), Some("长江"));

        let unassigned = stations_without_system(&store, "01").unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].station_code, "E001");

        assert_eq!(all_stations(&store).unwrap().len(), 2);
        assert_eq!(station(&store, id).unwrap().unwrap().station_code, "H001");
        assert!(station(&store, 999).unwrap().is_none());
    }

    #[test]
    fn test_category_detail_joins_station() {
        let (store, id) = seeded();

        let mut values = HashMap::new();
        values.insert("station_id".to_string(), SqlValue::Integer(id));
        values.insert("catchment_area".to_string(), SqlValue::Real(1200.0));
        store
            .replace_detail(
                Category::Hydrology.detail_table(),
                &ParsedRow { values, malformed_numbers: 0 },
            )
            .unwrap();

        let detail = category_detail(&store, Category::Hydrology, id).unwrap().unwrap();
        assert_eq!(detail["catchment_area"], Value::from(1200.0));
        assert_eq!(detail["station_code"], Value::from("H001"));
        assert_eq!(detail["longitude"], Value::from(110.5));
        assert_eq!(detail["river_system_name"], Value::from("长江干流"));

        assert!(category_detail(&store, Category::Rainfall, id).unwrap().is_none());
    }
}
