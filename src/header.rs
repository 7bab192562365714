//! Stacked header merging
//!
//! Category sheets describe each column with up to three header rows
//! (category, subcategory, leaf). Leaf labels repeat across columns
//! ("度" under both 经度 and 纬度), so a column is only identified by the
//! whole triple. Internally that triple stays structured as a [`HeaderKey`];
//! the joined `a-b-c` form exists for display and for the string-level
//! [`merge_header_labels`].

use calamine::Data;
use std::collections::HashMap;
use std::fmt;

use crate::error::ImportError;
use crate::sheet::cell_text;

/// Separator used when a key is rendered as a single label
pub const KEY_SEPARATOR: &str = "-";

/// Structured key of one column: (category, subcategory, leaf)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderKey {
    segments: [Option<String>; 3],
}

impl HeaderKey {
    /// Build a key from raw segments; blank segments are dropped. Returns
    /// `None` when all three are blank.
    pub fn new(category: &str, subcategory: &str, leaf: &str) -> Option<Self> {
        let segment = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        let segments = [segment(category), segment(subcategory), segment(leaf)];

        if segments.iter().all(Option::is_none) {
            None
        } else {
            Some(Self { segments })
        }
    }

    fn from_cells(cells: [Option<&Data>; 3]) -> Option<Self> {
        let text = |cell: Option<&Data>| cell.and_then(cell_text).unwrap_or_default();
        Self::new(&text(cells[0]), &text(cells[1]), &text(cells[2]))
    }

    /// Whether this key is the column a static reference names
    pub fn matches(&self, reference: &HeaderRef) -> bool {
        let wanted = [reference.0, reference.1, reference.2];
        self.segments
            .iter()
            .zip(wanted)
            .all(|(have, want)| have.as_deref().unwrap_or("") == want.trim())
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.segments.iter().flatten().map(String::as_str).collect();
        write!(f, "{}", parts.join(KEY_SEPARATOR))
    }
}

/// Static reference to a header column, `""` standing for a blank segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRef(pub &'static str, pub &'static str, pub &'static str);

impl HeaderRef {
    /// Column whose label spans all three header rows
    pub const fn spanning(label: &'static str) -> Self {
        Self(label, label, label)
    }
}

impl fmt::Display for HeaderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [self.0, self.1, self.2]
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        write!(f, "{}", parts.join(KEY_SEPARATOR))
    }
}

/// Per-column keys of a sheet; wholly blank columns have no key
#[derive(Debug, Clone, Default)]
pub struct MergedHeader {
    columns: Vec<Option<HeaderKey>>,
}

impl MergedHeader {
    /// Merge up to three stacked header rows. Rows may differ in length;
    /// missing cells count as blank. Two columns with the same structured
    /// key are rejected.
    pub fn from_rows(rows: &[Vec<Data>]) -> Result<Self, ImportError> {
        let width = rows.iter().take(3).map(Vec::len).max().unwrap_or(0);
        let cell = |row: usize, col: usize| rows.get(row).and_then(|r| r.get(col));

        let columns = (0..width)
            .map(|col| HeaderKey::from_cells([cell(0, col), cell(1, col), cell(2, col)]))
            .collect();

        Self::from_keys(columns)
    }

    pub fn from_keys(columns: Vec<Option<HeaderKey>>) -> Result<Self, ImportError> {
        let mut seen: HashMap<&HeaderKey, usize> = HashMap::new();
        for (idx, key) in columns.iter().enumerate() {
            if let Some(key) = key {
                if let Some(first) = seen.insert(key, idx) {
                    return Err(ImportError::DuplicateHeader {
                        key: key.to_string(),
                        first: first + 1,
                        second: idx + 1,
                    });
                }
            }
        }

        Ok(Self { columns })
    }

    /// Keyed columns with their index
    pub fn keys(&self) -> impl Iterator<Item = (usize, &HeaderKey)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(idx, key)| key.as_ref().map(|k| (idx, k)))
    }

    pub fn position(&self, reference: &HeaderRef) -> Option<usize> {
        self.keys()
            .find(|(_, key)| key.matches(reference))
            .map(|(idx, _)| idx)
    }

    /// First column whose joined label contains `needle`
    pub fn position_containing(&self, needle: &str) -> Option<usize> {
        self.keys()
            .find(|(_, key)| key.to_string().contains(needle))
            .map(|(idx, _)| idx)
    }

    /// Joined labels, one per column (`""` for unkeyed columns)
    pub fn labels(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|key| key.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect()
    }
}

/// Merge three header rows of labels into one joined label per column.
///
/// Segments are trimmed and blank ones dropped before joining with `-`. The
/// result is as long as `category`; a column whose segments are all blank
/// yields `""`, which callers must not use as a mapping key.
pub fn merge_header_labels<S: AsRef<str>>(
    category: &[S],
    subcategory: &[S],
    leaf: &[S],
) -> Vec<String> {
    fn at<S: AsRef<str>>(row: &[S], idx: usize) -> &str {
        row.get(idx).map(|s| s.as_ref()).unwrap_or("")
    }

    (0..category.len())
        .map(|idx| {
            HeaderKey::new(at(category, idx), at(subcategory, idx), at(leaf, idx))
                .map(|key| key.to_string())
                .unwrap_or_default()
        })
        .collect()
}
