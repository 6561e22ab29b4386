use std::path::PathBuf;
use thiserror::Error;

pub type XlifferResult<T> = Result<T, XlifferError>;

#[derive(Error, Debug)]
pub enum XlifferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a well-formed XLIFF document
    #[error("XLIFF error: {0}")]
    Xml(String),

    #[error("Cannot open {}: {reason}", path.display())]
    MissingResource { path: PathBuf, reason: String },

    #[error("Sheet {sheet} not found in {}", path.display())]
    SheetNotFound { sheet: String, path: PathBuf },

    #[error("No header found in sheet '{sheet}' (skipped {skip_rows} rows)")]
    LayoutNotFound { sheet: String, skip_rows: usize },

    #[error("Invalid key pattern: {0}")]
    KeyRewrite(#[from] regex::Error),

    #[error("Excel import error: {0}")]
    Import(String),

    #[error("Excel export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl XlifferError {
    /// Wrap a failed open of `path` as a missing resource
    pub fn missing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        XlifferError::MissingResource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
