//! Degrees/minutes/seconds to decimal coordinates

use calamine::Data;

use crate::header::HeaderRef;
use crate::sheet::{cell_number, Numeric, RowObject};

/// Convert a DMS triple to decimal degrees.
///
/// Absent components count as zero. The result is `None` when it is not
/// finite or exactly zero: a zero coordinate never occurs in this survey's
/// geography and always means "not provided".
pub fn dms_to_decimal(
    degrees: Option<f64>,
    minutes: Option<f64>,
    seconds: Option<f64>,
) -> Option<f64> {
    let value =
        degrees.unwrap_or(0.0) + minutes.unwrap_or(0.0) / 60.0 + seconds.unwrap_or(0.0) / 3600.0;

    if !value.is_finite() || value == 0.0 {
        None
    } else {
        Some(value)
    }
}

/// One DMS component read from a cell: blank is absent, malformed is NaN
fn component(cell: Option<&Data>) -> Option<f64> {
    match cell.map(cell_number) {
        None | Some(Numeric::Blank) => None,
        Some(Numeric::Value(v)) => Some(v),
        Some(Numeric::Malformed) => Some(f64::NAN),
    }
}

/// Header columns holding one axis as degrees, minutes, seconds
#[derive(Debug, Clone, Copy)]
pub struct DmsColumns {
    pub degrees: HeaderRef,
    pub minutes: HeaderRef,
    pub seconds: HeaderRef,
}

impl DmsColumns {
    pub fn resolve(&self, row: &RowObject) -> Option<f64> {
        dms_to_decimal(
            component(row.get(&self.degrees)),
            component(row.get(&self.minutes)),
            component(row.get(&self.seconds)),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoordinateColumns {
    pub longitude: DmsColumns,
    pub latitude: DmsColumns,
}

impl CoordinateColumns {
    pub fn resolve(&self, row: &RowObject) -> Coordinate {
        Coordinate {
            longitude: self.longitude.resolve(row),
            latitude: self.latitude.resolve(row),
        }
    }
}

/// A resolved position; either axis may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl Coordinate {
    pub fn new(longitude: Option<f64>, latitude: Option<f64>) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}
