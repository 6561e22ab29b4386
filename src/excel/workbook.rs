//! In-memory workbook: named sheets of string cells
//!
//! calamine only reads and rust_xlsxwriter only writes, so an append run
//! loads the whole workbook into this grid, edits it, and writes it back.
//! Rows and columns are 0-based. Indices are positions, not handles: a row
//! index taken before rows were appended above it is stale.

/// Excel's default font size
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Longest sheet name Excel accepts
pub const MAX_SHEET_NAME: usize = 31;

/// Visual style of a cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<f64>,
}

impl CellStyle {
    /// Bold, double-size marker used for provenance annotations
    pub fn banner() -> Self {
        Self {
            bold: true,
            font_size: Some(2.0 * DEFAULT_FONT_SIZE),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Build a sheet from rows of text, mostly for tests and fixtures
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut sheet = Self::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            sheet.ensure_row(r);
            for (c, text) in row.into_iter().enumerate() {
                let text: String = text.into();
                if !text.is_empty() {
                    sheet.set_text(r, c, text);
                }
            }
        }
        sheet
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells stored in a row, empty ones included
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map(Vec::len).unwrap_or(0)
    }

    /// Index past the last non-blank cell of a row
    pub fn populated_width(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .and_then(|cells| cells.iter().rposition(|c| !c.text.trim().is_empty()))
            .map(|last| last + 1)
            .unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Cell text, "" outside the populated area
    pub fn text(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map(|c| c.text.as_str()).unwrap_or("")
    }

    pub fn style(&self, row: usize, col: usize) -> CellStyle {
        self.cell(row, col).map(|c| c.style).unwrap_or_default()
    }

    /// Mutable cell, growing the grid as needed
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        self.ensure_row(row);
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        &mut cells[col]
    }

    pub fn set_text(&mut self, row: usize, col: usize, text: impl Into<String>) {
        self.cell_mut(row, col).text = text.into();
    }

    pub fn set_style(&mut self, row: usize, col: usize, style: CellStyle) {
        self.cell_mut(row, col).style = style;
    }

    pub fn ensure_row(&mut self, row: usize) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
    }

    /// Non-default cells with their coordinates, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.text.is_empty() || !cell.style.is_default())
                .map(move |(c, cell)| (r, c, cell))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet and return its index
    pub fn add_sheet(&mut self, sheet: Sheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }
}

/// Turn an arbitrary label (usually a file name) into a valid sheet name
pub fn sheet_name_for(label: &str) -> String {
    let name: String = label
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let name = name.trim_matches('\'').to_string();
    if name.is_empty() {
        "Sheet1".to_string()
    } else {
        name
    }
}
