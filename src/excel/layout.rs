//! Table layout detection
//!
//! Translation sheets are loosely structured: a few title rows, then a
//! header row. The first non-empty cell after the skipped rows is the key
//! column header. Relative to it:
//!
//! ```text
//!   key | note | source | DE-de | FR-fr | ...
//! ```

use crate::error::{XlifferError, XlifferResult};
use crate::excel::workbook::Sheet;

/// Offset of the note column from the key column
pub const NOTE_OFFSET: usize = 1;
/// Offset of the source column from the key column
pub const SOURCE_OFFSET: usize = 2;
/// Offset of the first target column from the key column
pub const TARGET_OFFSET: usize = 3;

/// Find the header: first non-empty cell at or below `skip_rows`.
///
/// Returns `(header_row, key_column)`, or `None` when every scanned cell is
/// empty.
pub fn detect_header(sheet: &Sheet, skip_rows: usize) -> Option<(usize, usize)> {
    (skip_rows..sheet.row_count()).find_map(|row| {
        (0..sheet.row_len(row))
            .find(|&col| !sheet.text(row, col).trim().is_empty())
            .map(|col| (row, col))
    })
}

/// Language code from a `REGION-language` label: `"DE-de"` → `"de"`.
///
/// Anything but exactly two segments gives "".
pub fn language_from_label(label: &str) -> String {
    let parts: Vec<&str> = label.trim().split('-').collect();
    match parts.as_slice() {
        [_, language] => language.to_string(),
        _ => String::new(),
    }
}

/// Explicit 0-based column positions that replace the detected ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub key: Option<usize>,
    pub note: Option<usize>,
    pub source: Option<usize>,
    pub target: Option<usize>,
}

/// Resolved column roles of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub header_row: usize,
    pub key_col: usize,
    pub note_col: usize,
    pub source_col: usize,
    /// First column scanned for target languages
    pub target_start: usize,
}

/// A header cell that names a target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetColumn {
    pub index: usize,
    pub label: String,
    /// Language from the label, "" when it does not follow `REGION-language`
    pub language: String,
}

impl TableLayout {
    /// Resolve column roles around a known header cell.
    ///
    /// Without a target override the scan starts at the source column, so
    /// a sheet holding only source text exports as "translated into the
    /// source language".
    pub fn resolve(header_row: usize, key_col: usize, overrides: &ColumnOverrides) -> Self {
        let key_col = overrides.key.unwrap_or(key_col);
        let source_col = overrides.source.unwrap_or(key_col + SOURCE_OFFSET);
        Self {
            header_row,
            key_col,
            note_col: overrides.note.unwrap_or(key_col + NOTE_OFFSET),
            source_col,
            target_start: overrides.target.unwrap_or(source_col),
        }
    }

    /// Detect the header and resolve column roles
    pub fn detect(
        sheet: &Sheet,
        skip_rows: usize,
        overrides: &ColumnOverrides,
    ) -> XlifferResult<Self> {
        let (header_row, key_col) =
            detect_header(sheet, skip_rows).ok_or_else(|| XlifferError::LayoutNotFound {
                sheet: sheet.name.clone(),
                skip_rows,
            })?;
        let layout = Self::resolve(header_row, key_col, overrides);
        tracing::debug!(
            "sheet '{}': header row {}, key column {}, source column {}",
            sheet.name,
            layout.header_row,
            layout.key_col,
            layout.source_col
        );
        Ok(layout)
    }

    /// Language of the source column header, "" if it carries none
    pub fn source_language(&self, sheet: &Sheet) -> String {
        language_from_label(sheet.text(self.header_row, self.source_col))
    }

    /// Every labelled header cell from `target_start` on
    pub fn target_columns(&self, sheet: &Sheet) -> Vec<TargetColumn> {
        let mut columns = Vec::new();
        for index in self.target_start..sheet.row_len(self.header_row) {
            let label = sheet.text(self.header_row, index).trim();
            if label.is_empty() {
                if index < sheet.populated_width(self.header_row) {
                    tracing::warn!(
                        "sheet '{}': column {} has no header, skipping",
                        sheet.name,
                        index
                    );
                }
                continue;
            }
            columns.push(TargetColumn {
                index,
                label: label.to_string(),
                language: language_from_label(label),
            });
        }
        columns
    }
}
