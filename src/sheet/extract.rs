use calamine::Data;

use super::cell::is_blank;
use super::workbook::Grid;
use crate::header::{HeaderRef, MergedHeader};

/// Which slice of a grid to read
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// First sheet row (0-based) to yield
    pub start_row: usize,
    /// Omit rows whose cells are all blank
    pub skip_blank_rows: bool,
}

impl ReadOptions {
    pub const fn from_row(start_row: usize) -> Self {
        Self {
            start_row,
            skip_blank_rows: true,
        }
    }

    /// Literal rows, blank ones included, as used for header regions
    pub const fn literal(start_row: usize) -> Self {
        Self {
            start_row,
            skip_blank_rows: false,
        }
    }
}

/// One sheet row with its 0-based position in the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub index: usize,
    pub cells: Vec<Data>,
}

impl SourceRow {
    /// 1-based row number as a spreadsheet shows it
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn get(&self, col: usize) -> Option<&Data> {
        self.cells.get(col)
    }
}

/// Raw-rows read mode
pub fn raw_rows(grid: &Grid, options: ReadOptions) -> Vec<SourceRow> {
    grid.iter()
        .enumerate()
        .skip(options.start_row)
        .filter(|(_, cells)| !(options.skip_blank_rows && cells.iter().all(is_blank)))
        .map(|(index, cells)| SourceRow {
            index,
            cells: cells.clone(),
        })
        .collect()
}

/// First `count` rows of the sheet, positions preserved (missing rows are empty)
pub fn header_region(grid: &Grid, count: usize) -> Vec<Vec<Data>> {
    (0..count)
        .map(|idx| grid.get(idx).cloned().unwrap_or_default())
        .collect()
}

/// A data row zipped against a merged header
#[derive(Debug, Clone)]
pub struct RowObject<'h> {
    header: &'h MergedHeader,
    row: SourceRow,
}

impl<'h> RowObject<'h> {
    pub fn new(header: &'h MergedHeader, row: SourceRow) -> Self {
        Self { header, row }
    }

    pub fn number(&self) -> usize {
        self.row.number()
    }

    pub fn get(&self, reference: &HeaderRef) -> Option<&Data> {
        self.header
            .position(reference)
            .and_then(|col| self.row.get(col))
    }

    pub fn get_containing(&self, needle: &str) -> Option<&Data> {
        self.header
            .position_containing(needle)
            .and_then(|col| self.row.get(col))
    }

    /// Keyed fields of this row; columns without a header key are dropped
    pub fn fields(&self) -> impl Iterator<Item = (String, &Data)> {
        self.header
            .keys()
            .filter_map(|(col, key)| self.row.get(col).map(|cell| (key.to_string(), cell)))
    }
}

/// Objects read mode
pub fn objects(header: &MergedHeader, rows: Vec<SourceRow>) -> Vec<RowObject<'_>> {
    rows.into_iter().map(|row| RowObject::new(header, row)).collect()
}
