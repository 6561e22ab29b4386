//! Excel importer implementation - Excel (.xlsx) → Workbook grid

use crate::error::{XlifferError, XlifferResult};
use crate::excel::workbook::{Sheet, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Reads every sheet of an .xlsx file as text cells
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the workbook. Styles are not read; every cell gets the default.
    pub fn import(&self) -> XlifferResult<Workbook> {
        let mut workbook: Xlsx<_> =
            open_workbook(&self.path).map_err(|e| XlifferError::missing(&self.path, e))?;

        let mut book = Workbook::new();
        let sheet_names = workbook.sheet_names().to_vec();

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                XlifferError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            book.add_sheet(sheet_from_range(&sheet_name, &range));
        }

        tracing::debug!(
            "imported {} sheets from {}",
            book.sheets.len(),
            self.path.display()
        );
        Ok(book)
    }
}

/// Copy a calamine range into a sheet at its absolute position.
///
/// Ranges do not have to start at A1; leading empty rows and columns are
/// kept so row/column indices match what the user sees in Excel.
pub fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let Some((row0, col0)) = range.start() else {
        return sheet;
    };

    for (r, row) in range.rows().enumerate() {
        let abs_row = row0 as usize + r;
        sheet.ensure_row(abs_row);
        for (c, cell) in row.iter().enumerate() {
            let text = cell_text(cell);
            if !text.is_empty() {
                sheet.set_text(abs_row, col0 as usize + c, text);
            }
        }
    }

    sheet
}

/// Display text of a cell; numbers and booleans as Excel shows them
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}
