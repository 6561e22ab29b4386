//! Sheet → translation units, one collection per target column

use crate::error::XlifferResult;
use crate::excel::layout::{ColumnOverrides, TableLayout, TargetColumn};
use crate::excel::workbook::Sheet;
use crate::types::{Document, TextNode, Unit};
use crate::writer::mapping::{insert_warn, Mapping};
use std::collections::HashSet;

/// How to find the table inside a sheet
#[derive(Debug, Clone, Default)]
pub struct SheetLayoutOptions {
    /// Rows ignored before looking for the header
    pub skip_rows: usize,
    pub overrides: ColumnOverrides,
    /// Used when the source header has no `REGION-language` label
    pub source_lang: String,
    /// Used when a target header has no `REGION-language` label
    pub target_lang: String,
}

/// One complete row of the table, seen through one target column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableUnit {
    pub id: String,
    pub note: String,
    pub source: String,
    pub target: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// The units found for a single target column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnUnits {
    pub column: TargetColumn,
    pub source_lang: String,
    pub target_lang: String,
    pub units: Vec<TableUnit>,
}

impl ColumnUnits {
    /// XLIFF document with one file holding every unit of this column
    pub fn to_document(&self, original: &str) -> Document {
        let mut doc = Document::new(original, self.source_lang.as_str());
        let file = &mut doc.files[0];
        file.target_lang = self.target_lang.clone();

        for unit in &self.units {
            file.add_unit(
                Unit::new(
                    unit.id.as_str(),
                    TextNode::preserved(unit.source_lang.as_str(), unit.source.as_str()),
                )
                .with_target(TextNode::preserved(
                    unit.target_lang.as_str(),
                    unit.target.as_str(),
                ))
                .with_note(unit.note.as_str()),
            );
        }
        doc
    }

    /// Flat key → target mapping of this column
    pub fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        for unit in &self.units {
            insert_warn(&mut mapping, unit.id.clone(), &unit.target);
        }
        mapping
    }
}

/// Extract units for every target column of a sheet.
///
/// A row yields a unit for a column only if its key, its source and its
/// value in that column are all non-blank. Incomplete rows are skipped
/// silently, per column: a row missing its German text still counts for
/// French.
pub fn extract_units(
    sheet: &Sheet,
    options: &SheetLayoutOptions,
) -> XlifferResult<Vec<ColumnUnits>> {
    let layout = TableLayout::detect(sheet, options.skip_rows, &options.overrides)?;

    let source_lang = or_default(layout.source_language(sheet), &options.source_lang);

    let columns = layout
        .target_columns(sheet)
        .into_iter()
        .map(|column| {
            let target_lang = or_default(column.language.clone(), &options.target_lang);
            let units = column_units(sheet, &layout, column.index, &source_lang, &target_lang);
            ColumnUnits {
                column,
                source_lang: source_lang.clone(),
                target_lang,
                units,
            }
        })
        .collect();

    Ok(columns)
}

fn column_units(
    sheet: &Sheet,
    layout: &TableLayout,
    target_col: usize,
    source_lang: &str,
    target_lang: &str,
) -> Vec<TableUnit> {
    let mut units = Vec::new();
    let mut seen = HashSet::new();

    for row in (layout.header_row + 1)..sheet.row_count() {
        let key = sheet.text(row, layout.key_col);
        let source = sheet.text(row, layout.source_col);
        let target = sheet.text(row, target_col);
        if is_blank(key) || is_blank(source) || is_blank(target) {
            continue;
        }

        let id = key.trim().to_string();
        if !seen.insert(id.clone()) {
            tracing::warn!(
                "sheet '{}': duplicate key {:?} in row {}",
                sheet.name,
                id,
                row + 1
            );
        }

        units.push(TableUnit {
            id,
            note: sheet.text(row, layout.note_col).to_string(),
            source: source.to_string(),
            target: target.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        });
    }

    units
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
