use calamine::Data;
use chrono::NaiveDateTime;

/// A cell read as a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Blank,
    Value(f64),
    Malformed,
}

/// Trimmed text of a cell, `None` when the cell is blank
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            // Excel serials carry the time of day in the fractional part
            Some(value) => format_datetime(value, dt.as_f64().fract() != 0.0),
            None => format_float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Read a cell as a number; text is parsed after trimming
pub fn cell_number(cell: &Data) -> Numeric {
    match cell {
        Data::Empty => Numeric::Blank,
        Data::Int(i) => Numeric::Value(*i as f64),
        Data::Float(f) if f.is_finite() => Numeric::Value(*f),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Numeric::Blank
            } else {
                match s.parse::<f64>() {
                    Ok(v) if v.is_finite() => Numeric::Value(v),
                    _ => Numeric::Malformed,
                }
            }
        }
        _ => Numeric::Malformed,
    }
}

/// True when a cell carries no visible value
pub fn is_blank(cell: &Data) -> bool {
    cell_text(cell).is_none()
}

/// `YYYY-MM-DD`, with ` HH:MM` when the serial carries a time of day
fn format_datetime(value: NaiveDateTime, with_time: bool) -> String {
    if with_time {
        value.format("%Y-%m-%d %H:%M").to_string()
    } else {
        value.format("%Y-%m-%d").to_string()
    }
}

/// Avoid a trailing ".0" for whole numbers so numeric codes read like their text form
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_trims_and_drops_blank() {
        assert_eq!(cell_text(&Data::String("  H001 ".into())), Some("H001".into()));
        assert_eq!(cell_text(&Data::String("   ".into())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn test_cell_text_formats_whole_floats_as_integers() {
        assert_eq!(cell_text(&Data::Float(101.0)), Some("101".into()));
        assert_eq!(cell_text(&Data::Float(12.5)), Some("12.5".into()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".into()));
    }

    #[test]
    fn test_cell_text_formats_dates() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let date = Data::DateTime(ExcelDateTime::new(45000.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_text(&date), Some("2023-03-15".into()));

        let noon = Data::DateTime(ExcelDateTime::new(45000.5, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_text(&noon), Some("2023-03-15 12:00".into()));
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number(&Data::Float(3.5)), Numeric::Value(3.5));
        assert_eq!(cell_number(&Data::Int(2)), Numeric::Value(2.0));
        assert_eq!(cell_number(&Data::String(" 15 ".into())), Numeric::Value(15.0));
        assert_eq!(cell_number(&Data::String("".into())), Numeric::Blank);
        assert_eq!(cell_number(&Data::Empty), Numeric::Blank);
        assert_eq!(cell_number(&Data::String("约15".into())), Numeric::Malformed);
        assert_eq!(cell_number(&Data::Bool(true)), Numeric::Malformed);
    }
}
