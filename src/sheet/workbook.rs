use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ImportError;

/// A sheet's cells, row-major, with absolute positions (row 0 is the first
/// row of the sheet even when it is empty)
pub type Grid = Vec<Vec<Data>>;

/// Read access to the sheets of a workbook
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;

    /// Load a sheet's cell grid, failing with `SheetNotFound` if the exact
    /// name is absent
    fn grid(&mut self, sheet: &str) -> Result<Grid, ImportError>;
}

/// Spreadsheet file on disk (.xls, .xlsx, .xlsb, .ods)
pub struct ExcelWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl ExcelWorkbook {
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let sheets = open_workbook_auto(path).map_err(|e| ImportError::WorkbookOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self { sheets })
    }
}

impl Workbook for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn grid(&mut self, sheet: &str) -> Result<Grid, ImportError> {
        if !self.sheets.sheet_names().iter().any(|name| name == sheet) {
            return Err(ImportError::SheetNotFound(sheet.to_string()));
        }

        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| ImportError::SheetRead {
                sheet: sheet.to_string(),
                message: e.to_string(),
            })?;

        Ok(range_to_grid(&range))
    }
}

/// calamine ranges start at the first used cell; pad so indices are absolute
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (first_row, first_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Vec::new(),
    };

    let mut grid: Grid = vec![Vec::new(); first_row];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; first_col];
        cells.extend(row.iter().cloned());
        grid.push(cells);
    }

    grid
}

/// Workbook held in memory, used to feed the pipeline without a file
#[derive(Debug, Default, Clone)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, Grid>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.sheets.insert(name.into(), grid);
        self
    }

    pub fn insert_sheet(&mut self, name: impl Into<String>, grid: Grid) {
        self.sheets.insert(name.into(), grid);
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn grid(&mut self, sheet: &str) -> Result<Grid, ImportError> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| ImportError::SheetNotFound(sheet.to_string()))
    }
}
