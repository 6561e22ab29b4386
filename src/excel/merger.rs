//! Incremental merge of a document into an existing translation table
//!
//! Runs in two phases. Phase A overwrites the target cell of every row whose
//! key is already known and collects the rest into an [`Appendix`]. Phase B
//! consumes the appendix and writes those entries below the table, under a
//! provenance marker. Row indices from the key index are only valid until
//! Phase B starts appending.

use crate::core::KeyRewrite;
use crate::excel::layout::{NOTE_OFFSET, SOURCE_OFFSET, TARGET_OFFSET};
use crate::excel::workbook::{CellStyle, Sheet};
use crate::types::Document;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Where and how to merge
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// 0-based row holding the header
    pub head_row: usize,
    /// 0-based column holding the keys
    pub key_col: usize,
    /// Explicit 0-based target column
    pub target_col: Option<usize>,
    pub key_rewrite: KeyRewrite,
    /// Input path as given by the user, used for the header and the marker
    pub input_name: String,
}

impl MergeOptions {
    fn note_col(&self) -> usize {
        self.key_col + NOTE_OFFSET
    }

    fn source_col(&self) -> usize {
        self.key_col + SOURCE_OFFSET
    }

    /// Final path component of the input, the target column's header
    pub fn input_base_name(&self) -> String {
        Path::new(&self.input_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_name.clone())
    }
}

/// What a merge did to the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub target_col: usize,
    /// Target cells overwritten in existing rows
    pub updated: usize,
    /// Rows appended below the table
    pub appended: usize,
    /// Incoming units that repeated an earlier key
    pub duplicates: usize,
}

/// One row waiting to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendEntry {
    pub key: String,
    pub note: String,
    pub source: String,
    pub target: String,
}

/// Entries whose keys were not in the table, in first-seen order
#[derive(Debug, Default)]
pub struct Appendix {
    entries: Vec<AppendEntry>,
    positions: HashMap<String, usize>,
}

impl Appendix {
    /// Queue an entry; a key queued before is replaced in place
    fn push(&mut self, entry: AppendEntry) {
        match self.positions.get(&entry.key) {
            Some(&index) => self.entries[index] = entry,
            None => {
                self.positions.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AppendEntry] {
        &self.entries
    }
}

/// Map trimmed keys of the body rows to their row index.
///
/// The first occurrence of a key wins; later ones are reported and ignored.
pub fn build_key_index(sheet: &Sheet, head_row: usize, key_col: usize) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for row in (head_row + 1)..sheet.row_count() {
        let key = sheet.text(row, key_col).trim();
        if key.is_empty() {
            continue;
        }
        if index.contains_key(key) {
            tracing::warn!(
                "sheet '{}': duplicate key {:?} in row {}, ignoring",
                sheet.name,
                key,
                row + 1
            );
            continue;
        }
        index.insert(key.to_string(), row);
    }
    index
}

/// Column receiving the merged translations
pub fn target_column(sheet: &Sheet, options: &MergeOptions) -> usize {
    options.target_col.unwrap_or_else(|| {
        sheet
            .populated_width(options.head_row)
            .max(options.key_col + TARGET_OFFSET)
    })
}

/// Fill in missing header labels and name the target column after the input
pub fn write_header(sheet: &mut Sheet, options: &MergeOptions, target_col: usize) {
    let row = options.head_row;
    let key_style = sheet.style(row, options.key_col);

    for (col, label) in [
        (options.key_col, "key"),
        (options.note_col(), "note"),
        (options.source_col(), "source"),
    ] {
        if sheet.text(row, col).is_empty() {
            sheet.set_text(row, col, label);
        }
    }

    sheet.set_text(row, target_col, options.input_base_name());
    sheet.set_style(row, target_col, key_style);
}

/// Outcome of Phase A
#[derive(Debug, Default)]
pub struct Updates {
    /// Target cells overwritten in existing rows
    pub updated: usize,
    /// Incoming units whose key was already seen in this document
    pub duplicates: usize,
    pub appendix: Appendix,
}

/// Phase A: update known rows, queue everything else.
///
/// Keys are rewritten, then trimmed, the same way the key index trims the
/// table's keys. A key repeated in `doc` is reported and the later unit wins.
pub fn update_existing(
    sheet: &mut Sheet,
    doc: &Document,
    index: &HashMap<String, usize>,
    target_col: usize,
    rewrite: &KeyRewrite,
) -> Updates {
    let mut updates = Updates::default();
    let mut seen = HashSet::new();

    for unit in doc.units() {
        let key = rewrite.apply(&unit.id).trim().to_string();
        if !seen.insert(key.clone()) {
            tracing::warn!("duplicate unit key {:?} in input, later unit wins", key);
            updates.duplicates += 1;
        }

        match index.get(&key) {
            Some(&row) => {
                sheet.set_text(row, target_col, unit.target_text());
                updates.updated += 1;
            }
            None => updates.appendix.push(AppendEntry {
                key,
                note: unit.note_text().to_string(),
                source: unit.source.content.clone(),
                target: unit.target_text().to_string(),
            }),
        }
    }

    updates
}

/// Phase B: append queued entries below the table under a provenance marker
pub fn append_new(
    sheet: &mut Sheet,
    appendix: Appendix,
    options: &MergeOptions,
    target_col: usize,
) -> usize {
    if appendix.is_empty() {
        return 0;
    }

    let marker_row = sheet.row_count() + 1;
    sheet.set_text(
        marker_row,
        options.note_col(),
        format!("added from {}", options.input_name),
    );
    sheet.set_style(marker_row, options.note_col(), CellStyle::banner());

    let appended = appendix.len();
    for entry in appendix.entries {
        let row = sheet.row_count();
        sheet.set_text(row, options.key_col, entry.key);
        sheet.set_text(row, options.note_col(), entry.note);
        sheet.set_text(row, options.source_col(), entry.source);
        sheet.set_text(row, target_col, entry.target);
    }
    appended
}

/// Merge every unit of `doc` into `sheet`
pub fn merge_document(
    sheet: &mut Sheet,
    doc: &Document,
    options: &MergeOptions,
) -> MergeReport {
    sheet.ensure_row(options.head_row);

    let target_col = target_column(sheet, options);
    let index = build_key_index(sheet, options.head_row, options.key_col);
    write_header(sheet, options, target_col);

    let Updates {
        updated,
        duplicates,
        appendix,
    } = update_existing(sheet, doc, &index, target_col, &options.key_rewrite);
    let appended = append_new(sheet, appendix, options, target_col);

    tracing::info!(
        "sheet '{}': {} rows updated, {} rows appended in column {}",
        sheet.name,
        updated,
        appended,
        target_col
    );

    MergeReport {
        target_col,
        updated,
        appended,
        duplicates,
    }
}
