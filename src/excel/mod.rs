//! Spreadsheet side of the converter
//!
//! - Import: .xlsx → [`Workbook`] grid (calamine)
//! - Export: [`Workbook`] grid → .xlsx (rust_xlsxwriter)
//! - Table → units per target column ([`extract_units`])
//! - Document → existing table ([`merge_document`])

mod exporter;
pub mod extractor;
mod importer;
pub mod layout;
pub mod merger;
pub mod workbook;

pub use exporter::ExcelExporter;
pub use extractor::{extract_units, ColumnUnits, SheetLayoutOptions, TableUnit};
pub use importer::ExcelImporter;
pub use layout::{detect_header, ColumnOverrides, TableLayout, TargetColumn};
pub use merger::{merge_document, MergeOptions, MergeReport};
pub use workbook::{sheet_name_for, CellStyle, Sheet, Workbook};
