use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::schema_gen::{generate_create_table, generate_indexes};
use crate::category::Category;
use crate::coordinate::Coordinate;
use crate::error::ImportError;
use crate::parser::{ParsedRow, SqlValue};
use crate::schema::TableSchema;

/// A basin / river-system reference row to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSystem<'a> {
    pub basin_name: &'a str,
    pub basin_code: &'a str,
    /// (name, code); `None` for the basin's anchor row
    pub river_system: Option<(&'a str, &'a str)>,
}

/// Canonical station values written by one category importer
#[derive(Debug, Clone)]
pub struct StationUpsert<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub coordinate: Coordinate,
    pub system_id: Option<i64>,
}

/// `<db_path><suffix>`, where SQLite keeps its journal files
fn sidecar_path(db_path: &Path, suffix: &str) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// SQLite database holding the reference, station and detail tables
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Create a fresh database, replacing any previous file at `db_path`
    pub fn create(db_path: &Path) -> Result<Self> {
        if db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
            info!("Removed existing database {:?}", db_path);
        }
        // A WAL left by an interrupted run would be replayed into the new file
        for sidecar in ["-wal", "-shm"].map(|suffix| sidecar_path(db_path, suffix)) {
            if sidecar.exists() {
                std::fs::remove_file(&sidecar)
                    .with_context(|| format!("Failed to remove {:?}", sidecar))?;
                debug!("Removed stale {:?}", sidecar);
            }
        }

        let conn = Connection::open(db_path).context("Failed to create database")?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Private in-memory database, one per call
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Open an existing database for reading
    pub fn open(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            anyhow::bail!("Database not found: {:?} (run `import` first)", db_path);
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create all tables for the given schemas
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        info!("Creating {} tables...", schemas.len());

        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Insert a reference row unless one with the same key exists.
    /// Returns whether a row was inserted.
    pub fn insert_system(&self, system: &NewSystem) -> Result<bool, ImportError> {
        let (river_name, river_code) = system.river_system.unzip();
        let inserted = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO systems (basin_name, basin_code, river_system_name, river_system_code)
             VALUES (?1, ?2, ?3, ?4)",
        )?
        .execute(params![system.basin_name, system.basin_code, river_name, river_code])?;

        Ok(inserted > 0)
    }

    pub fn system_by_pair(
        &self,
        basin_code: &str,
        river_system_code: &str,
    ) -> Result<Option<i64>, ImportError> {
        let id = self
            .conn
            .prepare_cached(
                "SELECT id FROM systems WHERE basin_code = ?1 AND river_system_code = ?2",
            )?
            .query_row(params![basin_code, river_system_code], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    /// The basin's "no river system" row
    pub fn basin_anchor(&self, basin_code: &str) -> Result<Option<i64>, ImportError> {
        let id = self
            .conn
            .prepare_cached(
                "SELECT id FROM systems WHERE basin_code = ?1 AND river_system_code IS NULL",
            )?
            .query_row(params![basin_code], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    pub fn system_by_river_code(&self, river_system_code: &str) -> Result<Option<i64>, ImportError> {
        let id = self
            .conn
            .prepare_cached("SELECT id FROM systems WHERE river_system_code = ?1")?
            .query_row(params![river_system_code], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    /// Insert or update the canonical station for `code` and return its id.
    ///
    /// On an existing row the category flag is set, a complete new coordinate
    /// pair replaces the stored one, a lone axis only fills a NULL, and the
    /// system link is only filled while still NULL.
    pub fn upsert_station(
        &self,
        category: Category,
        station: &StationUpsert,
    ) -> Result<i64, ImportError> {
        let flag = category.flag_column();
        let sql = format!(
            "INSERT INTO stations (station_name, station_code, system_id, longitude, latitude, {flag})
             VALUES (?1, ?2, ?3, ?4, ?5, 1)
             ON CONFLICT(station_code) DO UPDATE SET
                 {flag} = 1,
                 longitude = CASE
                     WHEN excluded.longitude IS NOT NULL AND excluded.latitude IS NOT NULL THEN excluded.longitude
                     ELSE COALESCE(stations.longitude, excluded.longitude)
                 END,
                 latitude = CASE
                     WHEN excluded.longitude IS NOT NULL AND excluded.latitude IS NOT NULL THEN excluded.latitude
                     ELSE COALESCE(stations.latitude, excluded.latitude)
                 END,
                 system_id = COALESCE(stations.system_id, excluded.system_id)
             RETURNING id"
        );

        let id = self.conn.prepare_cached(&sql)?.query_row(
            params![
                station.name,
                station.code,
                station.system_id,
                station.coordinate.longitude,
                station.coordinate.latitude
            ],
            |row| row.get(0),
        )?;

        debug!("{} station {} -> id {}", category, station.code, id);
        Ok(id)
    }

    /// Write a detail row, replacing any previous row for the same station
    pub fn replace_detail(&self, schema: &TableSchema, row: &ParsedRow) -> Result<(), ImportError> {
        let columns: Vec<&str> = schema.insert_columns().map(|c| c.name).collect();
        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
            schema.name,
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut stmt = self.conn.prepare_cached(&sql)?;
        for (idx, col_name) in columns.iter().enumerate() {
            let value = row.values.get(*col_name).unwrap_or(&SqlValue::Null);
            value.bind_to(idx + 1, &mut stmt)?;
        }
        stmt.raw_execute()?;

        Ok(())
    }

    /// Number of rows in a table
    pub fn count(&self, table: &str) -> Result<i64, ImportError> {
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Finalize the database
    pub fn finalize(self) -> Result<()> {
        info!("Finalizing database...");
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ALL_TABLES;

    fn store() -> Store {
        let store = Store::in_memory().unwrap();
        store.create_tables(ALL_TABLES).unwrap();
        store
    }

    fn station<'a>(code: &'a str, coordinate: Coordinate, system_id: Option<i64>) -> StationUpsert<'a> {
        StationUpsert {
            name: "测站",
            code,
            coordinate,
            system_id,
        }
    }

    fn anchor<'a>(code: &'a str) -> NewSystem<'a> {
        NewSystem {
            basin_name: "长江",
            basin_code: code,
            river_system: None,
        }
    }

    #[test]
    fn test_create_discards_stale_journal_files() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("river_data.db");
        let wal = sidecar_path(&db_path, "-wal");
        let shm = sidecar_path(&db_path, "-shm");
        assert_eq!(wal.file_name().unwrap(), "river_data.db-wal");

        std::fs::write(&db_path, b"previous run").unwrap();
        std::fs::write(&wal, b"stale log").unwrap();
        std::fs::write(&shm, b"stale index").unwrap();

        let store = Store::create(&db_path).unwrap();
        for (path, stale) in [(&wal, &b"stale log"[..]), (&shm, &b"stale index"[..])] {
            if let Ok(bytes) = std::fs::read(path) {
                assert_ne!(bytes, stale);
            }
        }

        store.create_tables(ALL_TABLES).unwrap();
        assert_eq!(store.count("stations").unwrap(), 0);
    }

    #[test]
    fn test_anchor_rows_are_idempotent() {
        let store = store();
        assert!(store.insert_system(&anchor("01")).unwrap());
        assert!(!store.insert_system(&anchor("01")).unwrap());
        assert!(store.insert_system(&anchor("02")).unwrap());
        assert_eq!(store.count("systems").unwrap(), 2);
    }

    #[test]
    fn test_system_lookups() {
        let store = store();
        store.insert_system(&anchor("01")).unwrap();
        store
            .insert_system(&NewSystem {
                basin_name: "长江",
                basin_code: "01",
                river_system: Some(("长江干流", "0101")),
            })
            .unwrap();

        let anchor_id = store.basin_anchor("01").unwrap().unwrap();
        let river_id = store.system_by_pair("01", "0101").unwrap().unwrap();
        assert_ne!(anchor_id, river_id);
        assert_eq!(store.system_by_river_code("0101").unwrap(), Some(river_id));
        assert_eq!(store.system_by_pair("02", "0101").unwrap(), None);
        assert_eq!(store.basin_anchor("02").unwrap(), None);
    }

    #[test]
    fn test_upsert_returns_same_id_and_accumulates_flags() {
        let store = store();
        let first = store
            .upsert_station(Category::Hydrology, &station("H001", Coordinate::default(), None))
            .unwrap();
        let second = store
            .upsert_station(Category::WaterLevel, &station("H001", Coordinate::default(), None))
            .unwrap();
        assert_eq!(first, second);

        let (hydrology, water_level, rainfall): (i64, i64, i64) = store
            .connection()
            .query_row(
                "SELECT is_hydrology_station, is_water_level_station, is_rainfall_station FROM stations WHERE id = ?1",
                [first],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((hydrology, water_level, rainfall), (1, 1, 0));
        assert_eq!(store.count("stations").unwrap(), 1);
    }

    #[test]
    fn test_upsert_coordinate_and_system_policy() {
        let store = store();
        store.insert_system(&anchor("01")).unwrap();
        store.insert_system(&anchor("02")).unwrap();
        let first_system = store.basin_anchor("01").unwrap();
        let other_system = store.basin_anchor("02").unwrap();

        let read = |store: &Store| -> (Option<f64>, Option<f64>, Option<i64>) {
            store
                .connection()
                .query_row(
                    "SELECT longitude, latitude, system_id FROM stations WHERE station_code = 'S1'",
                    [],
                    |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
                )
                .unwrap()
        };

        // Only longitude known, no system yet
        store
            .upsert_station(Category::Rainfall, &station("S1", Coordinate::new(Some(110.0), None), None))
            .unwrap();
        assert_eq!(read(&store), (Some(110.0), None, None));

        // Lone latitude fills the gap; system filled while NULL
        store
            .upsert_station(Category::Evaporation, &station("S1", Coordinate::new(None, Some(30.0)), first_system))
            .unwrap();
        assert_eq!(read(&store), (Some(110.0), Some(30.0), first_system));

        // A complete pair wins; the system link is never overwritten
        store
            .upsert_station(
                Category::WaterQuality,
                &station("S1", Coordinate::new(Some(111.0), Some(31.0)), other_system),
            )
            .unwrap();
        assert_eq!(read(&store), (Some(111.0), Some(31.0), first_system));

        // Absent coordinates keep what is stored
        store
            .upsert_station(Category::SoilMoisture, &station("S1", Coordinate::default(), None))
            .unwrap();
        assert_eq!(read(&store), (Some(111.0), Some(31.0), first_system));
    }

    #[test]
    fn test_replace_detail_overwrites() {
        let store = store();
        let id = store
            .upsert_station(Category::Rainfall, &station("R1", Coordinate::default(), None))
            .unwrap();

        let mut values = std::collections::HashMap::new();
        values.insert("station_id".to_string(), SqlValue::Integer(id));
        values.insert("remark".to_string(), SqlValue::Text("first".into()));
        let schema = Category::Rainfall.detail_table();
        store
            .replace_detail(schema, &ParsedRow { values: values.clone(), malformed_numbers: 0 })
            .unwrap();

        values.insert("remark".to_string(), SqlValue::Text("second".into()));
        store
            .replace_detail(schema, &ParsedRow { values, malformed_numbers: 0 })
            .unwrap();

        assert_eq!(store.count("rainfall_stations").unwrap(), 1);
        let remark: String = store
            .connection()
            .query_row("SELECT remark FROM rainfall_stations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remark, "second");
    }
}
