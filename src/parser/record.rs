use calamine::Data;
use std::collections::HashMap;

use crate::coordinate::Coordinate;
use crate::schema::{ColumnType, FieldSource, TableSchema};
use crate::sheet::{cell_number, cell_text, Numeric, RowObject};

/// A parsed row ready for insertion
pub struct ParsedRow {
    pub values: HashMap<String, SqlValue>,
    /// Numeric cells that could not be read and were stored as NULL
    pub malformed_numbers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

/// Canonical station values a detail row may reference
#[derive(Debug, Clone)]
pub struct StationContext<'a> {
    pub station_id: i64,
    pub name: &'a str,
    pub code: &'a str,
    pub coordinate: Coordinate,
}

/// Parse a sheet row into a row for the given detail schema
pub fn parse_record(row: &RowObject, schema: &TableSchema, station: &StationContext) -> ParsedRow {
    let mut values = HashMap::new();
    let mut malformed_numbers = 0;

    for col in schema.insert_columns() {
        let value = match col.source {
            None => SqlValue::Null,
            Some(FieldSource::StationId) => SqlValue::Integer(station.station_id),
            Some(FieldSource::StationName) => SqlValue::Text(station.name.to_string()),
            Some(FieldSource::StationCode) => SqlValue::Text(station.code.to_string()),
            Some(FieldSource::Longitude) => real_or_null(station.coordinate.longitude),
            Some(FieldSource::Latitude) => real_or_null(station.coordinate.latitude),
            Some(FieldSource::Header(ref key)) => {
                convert(row.get(key), &col.col_type, &mut malformed_numbers)
            }
            Some(FieldSource::HeaderContaining(needle)) => {
                convert(row.get_containing(needle), &col.col_type, &mut malformed_numbers)
            }
            Some(FieldSource::FirstOf(keys)) => {
                let cell = keys
                    .iter()
                    .filter_map(|key| row.get(key))
                    .find(|cell| cell_text(cell).is_some());
                convert(cell, &col.col_type, &mut malformed_numbers)
            }
        };
        values.insert(col.name.to_string(), value);
    }

    ParsedRow {
        values,
        malformed_numbers,
    }
}

fn real_or_null(value: Option<f64>) -> SqlValue {
    value.map(SqlValue::Real).unwrap_or(SqlValue::Null)
}

fn convert(cell: Option<&Data>, col_type: &ColumnType, malformed: &mut usize) -> SqlValue {
    let Some(cell) = cell else {
        return SqlValue::Null;
    };

    match col_type {
        ColumnType::Text => cell_text(cell).map(SqlValue::Text).unwrap_or(SqlValue::Null),
        ColumnType::Real => match cell_number(cell) {
            Numeric::Value(v) => SqlValue::Real(v),
            Numeric::Blank => SqlValue::Null,
            Numeric::Malformed => {
                *malformed += 1;
                SqlValue::Null
            }
        },
        ColumnType::Integer => match cell_number(cell) {
            Numeric::Value(v) if v.fract() == 0.0 => SqlValue::Integer(v as i64),
            Numeric::Blank => SqlValue::Null,
            _ => {
                *malformed += 1;
                SqlValue::Null
            }
        },
        ColumnType::Boolean => match parse_flag(cell) {
            Some(b) => SqlValue::Integer(i64::from(b)),
            None if cell_text(cell).is_none() => SqlValue::Null,
            None => {
                *malformed += 1;
                SqlValue::Null
            }
        },
    }
}

fn parse_flag(cell: &Data) -> Option<bool> {
    if let Data::Bool(b) = cell {
        return Some(*b);
    }
    if let Numeric::Value(v) = cell_number(cell) {
        return Some(v != 0.0);
    }

    match cell_text(cell)?.to_lowercase().as_str() {
        "是" | "true" | "yes" | "y" => Some(true),
        "否" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MergedHeader;
    use crate::schema::RAINFALL_STATIONS;
    use crate::sheet::SourceRow;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn rainfall_header() -> MergedHeader {
        MergedHeader::from_rows(&[
            vec![s("流域/区域"), s("器口高度\n（m）"), s("特征值"), s("特征值"), s("特征值"), s("备注")],
            vec![
                s("流域/区域"),
                s("器口高度\n（m）"),
                s("多年平均降雨量（mm）"),
                s("实测年最大降雨量"),
                s("实测年最大降雨量"),
                s("备注"),
            ],
            vec![
                s("流域/区域"),
                s("器口高度\n（m）"),
                s("多年平均降雨量（mm）"),
                s("降雨量（mm）"),
                s("出现年份"),
                s("备注"),
            ],
        ])
        .unwrap()
    }

    fn station() -> StationContext<'static> {
        StationContext {
            station_id: 7,
            name: "雨量站甲",
            code: "R001",
            coordinate: Coordinate::new(Some(112.5), None),
        }
    }

    #[test]
    fn test_parse_record_maps_fields() {
        let header = rainfall_header();
        let row = RowObject::new(
            &header,
            SourceRow {
                index: 3,
                cells: vec![s("01"), Data::Float(0.7), s("1200.5"), Data::Float(310.2), Data::Float(1998.0), s(" 备 ")],
            },
        );

        let parsed = parse_record(&row, &RAINFALL_STATIONS, &station());
        let get = |name: &str| parsed.values.get(name).cloned().unwrap();

        assert_eq!(get("station_id"), SqlValue::Integer(7));
        assert_eq!(get("station_code"), SqlValue::Text("R001".into()));
        assert_eq!(get("basin_name"), SqlValue::Text("01".into()));
        assert_eq!(get("longitude"), SqlValue::Real(112.5));
        assert_eq!(get("latitude"), SqlValue::Null);
        assert_eq!(get("orifice_height"), SqlValue::Real(0.7));
        assert_eq!(get("avg_rainfall"), SqlValue::Real(1200.5));
        assert_eq!(get("max_rainfall"), SqlValue::Real(310.2));
        assert_eq!(get("max_rainfall_year"), SqlValue::Integer(1998));
        assert_eq!(get("management_unit"), SqlValue::Null);
        assert_eq!(get("remark"), SqlValue::Text("备".into()));
        assert!(!parsed.values.contains_key("id"));
        assert_eq!(parsed.malformed_numbers, 0);
    }

    #[test]
    fn test_malformed_numbers_become_null() {
        let header = rainfall_header();
        let row = RowObject::new(
            &header,
            SourceRow {
                index: 4,
                cells: vec![s("01"), s("约0.7"), Data::Empty, Data::Float(310.2), Data::Float(1998.5)],
            },
        );

        let parsed = parse_record(&row, &RAINFALL_STATIONS, &station());

        assert_eq!(parsed.values["orifice_height"], SqlValue::Null);
        assert_eq!(parsed.values["avg_rainfall"], SqlValue::Null);
        assert_eq!(parsed.values["max_rainfall_year"], SqlValue::Null);
        assert_eq!(parsed.values["remark"], SqlValue::Null);
        assert_eq!(parsed.malformed_numbers, 2);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(&s("是")), Some(true));
        assert_eq!(parse_flag(&s("否")), Some(false));
        assert_eq!(parse_flag(&Data::Float(0.0)), Some(false));
        assert_eq!(parse_flag(&s("也许")), None);
    }
}
