use std::collections::HashSet;

use crate::header::HeaderRef;

/// Column data type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    /// Stored as INTEGER 0/1
    Boolean,
}

/// Where a column's value comes from when a sheet row is imported
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSource {
    /// Exact merged header key
    Header(HeaderRef),
    /// First column whose joined header label contains the text
    HeaderContaining(&'static str),
    /// First of several header keys that is present with a value
    FirstOf(&'static [HeaderRef]),
    /// Canonical station fields resolved by the reconciler
    StationId,
    StationName,
    StationCode,
    Longitude,
    Latitude,
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    /// SQL literal used as DEFAULT
    pub default: Option<&'static str>,
    /// Import source; columns without one are written NULL
    pub source: Option<FieldSource>,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: true,
            unique: false,
            default: None,
            source: None,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            nullable: false,
            ..Self::new(name, col_type)
        }
    }

    pub const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    pub const fn default_value(self, literal: &'static str) -> Self {
        Self {
            default: Some(literal),
            ..self
        }
    }

    pub const fn source(self, source: FieldSource) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    /// Source is the column spanning all three header rows with this label
    pub const fn spanning(self, label: &'static str) -> Self {
        self.source(FieldSource::Header(HeaderRef::spanning(label)))
    }

    /// Source is the exact (category, subcategory, leaf) header key
    pub const fn header(
        self,
        category: &'static str,
        subcategory: &'static str,
        leaf: &'static str,
    ) -> Self {
        self.source(FieldSource::Header(HeaderRef(category, subcategory, leaf)))
    }

    pub fn is_primary_key(&self) -> bool {
        self.name == "id"
    }
}

/// Foreign key reference
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

impl ForeignKey {
    pub const fn new(column: &'static str, references_table: &'static str) -> Self {
        Self {
            column,
            references_table,
            references_column: "id",
        }
    }
}

/// Index definition
#[derive(Debug, Clone)]
pub struct Index {
    pub columns: &'static [&'static str],
    pub unique: bool,
    /// Partial index condition
    pub filter: Option<&'static str>,
}

impl Index {
    /// Create a non-unique index
    pub const fn on(columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            unique: false,
            filter: None,
        }
    }

    /// Create a unique index
    pub const fn unique(columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            unique: true,
            filter: None,
        }
    }

    /// Restrict the index to rows matching a condition
    pub const fn filter(self, condition: &'static str) -> Self {
        Self {
            filter: Some(condition),
            ..self
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub foreign_keys: &'static [ForeignKey],
    /// Explicit index definitions
    pub indexes: &'static [Index],
}

impl TableSchema {
    /// Get all tables this table depends on (FK parents)
    pub fn dependencies(&self) -> HashSet<&'static str> {
        self.foreign_keys
            .iter()
            .map(|fk| fk.references_table)
            .collect()
    }

    /// Columns written on import (everything except the generated key)
    pub fn insert_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_primary_key())
    }
}
