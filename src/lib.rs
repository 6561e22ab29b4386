//! xliffer - XLIFF 1.2 converter
//!
//! Moves translations between XLIFF documents, spreadsheet tables and flat
//! JSON mappings.
//!
//! # Features
//!
//! - XLIFF 1.2 document model with mixed-content target text
//! - Document transforms (blank, copy, swap, set languages, merge)
//! - Table layout detection: one document per target-language column
//! - Incremental merge of a document into an existing .xlsx table
//!
//! # Example
//!
//! ```no_run
//! use xliffer::excel::{extract_units, ExcelImporter, SheetLayoutOptions};
//! use xliffer::writer::to_xliff;
//!
//! let book = ExcelImporter::new("texts.xlsx").import()?;
//! let options = SheetLayoutOptions {
//!     source_lang: "en".to_string(),
//!     ..SheetLayoutOptions::default()
//! };
//!
//! for column in extract_units(&book.sheets[0], &options)? {
//!     let doc = column.to_document("texts.xlsx");
//!     println!("{}", to_xliff(&doc)?);
//! }
//! # Ok::<(), xliffer::error::XlifferError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{XlifferError, XlifferResult};
pub use types::{Document, File, TextNode, Unit};
