use crate::core::{self, KeyRewrite};
use crate::error::{XlifferError, XlifferResult};
use crate::excel::{
    extract_units, merge_document, sheet_name_for, ExcelExporter, ExcelImporter, MergeOptions,
    Sheet, SheetLayoutOptions, Workbook,
};
use crate::parser;
use crate::types::Document;
use crate::writer::{self, mapping};
use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output path meaning "standard output"
pub const STDOUT: &str = "-";

/// Artifact format of `from-xlsx`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Xliff,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xliff => "xliff",
            OutputFormat::Json => "json",
        }
    }
}

/// Write the finished artifact to a file, or to stdout for "-"
pub fn write_output(output: &Path, bytes: &[u8]) -> XlifferResult<()> {
    if output.as_os_str() == STDOUT {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(bytes)?;
        handle.flush()?;
        return Ok(());
    }
    fs::write(output, bytes)?;
    Ok(())
}

fn describe(output: &Path) -> String {
    if output.as_os_str() == STDOUT {
        "<stdout>".to_string()
    } else {
        output.display().to_string()
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse, apply an in-place transform, write indented XLIFF
fn rewrite_document<F>(title: &str, input: &Path, output: &Path, transform: F) -> XlifferResult<()>
where
    F: FnOnce(&mut Document),
{
    eprintln!("{}", format!("xliffer - {}", title).bold().green());
    eprintln!("   Input:  {}", input.display());

    let mut doc = parser::parse_file(input)?;
    transform(&mut doc);
    let xml = writer::to_xliff(&doc)?;
    write_output(output, xml.as_bytes())?;

    eprintln!("{} {} units → {}", "✅".green(), doc.unit_count(), describe(output));
    Ok(())
}

/// Execute the blank-target command
pub fn blank_target(input: PathBuf, output: PathBuf) -> XlifferResult<()> {
    rewrite_document("Blank target", &input, &output, core::blank_target)
}

/// Execute the copy command
pub fn copy(input: PathBuf, output: PathBuf) -> XlifferResult<()> {
    rewrite_document("Copy source to target", &input, &output, core::copy_source_to_target)
}

/// Execute the swap-source-target command
pub fn swap_source_target(input: PathBuf, output: PathBuf) -> XlifferResult<()> {
    rewrite_document("Swap source and target", &input, &output, core::swap_source_target)
}

/// Execute the set-lang command
pub fn set_lang(
    input: PathBuf,
    source: String,
    target: String,
    output: PathBuf,
) -> XlifferResult<()> {
    tracing::debug!("setting languages: source={:?} target={:?}", source, target);
    rewrite_document("Set languages", &input, &output, |doc| {
        core::set_languages(doc, &source, &target)
    })
}

/// Execute the merge command
pub fn merge(a: PathBuf, b: PathBuf, output: PathBuf) -> XlifferResult<()> {
    eprintln!("{}", "xliffer - Merge".bold().green());
    eprintln!("   A: {}", a.display());
    eprintln!("   B: {}", b.display());

    let first = parser::parse_file(&a)?;
    let second = parser::parse_file(&b)?;
    let merged = core::merge(first, second);

    let xml = writer::to_xliff(&merged)?;
    write_output(&output, xml.as_bytes())?;

    eprintln!(
        "{} {} files, {} units → {}",
        "✅".green(),
        merged.files.len(),
        merged.unit_count(),
        describe(&output)
    );
    Ok(())
}

/// Human-readable listing of every unit
pub fn dump_text(doc: &Document) -> String {
    let mut out = String::new();
    for unit in doc.units() {
        out.push_str(&format!("unit {}\n", unit.id));
        out.push_str(&format!(" source: {}\n", unit.source.content));
        out.push_str(&format!(" target: {}\n", unit.target_text()));
        if let Some(note) = &unit.note {
            out.push_str(&format!(" note: {}\n", note));
        }
    }
    out
}

/// Execute the dump command
pub fn dump(input: PathBuf, json: bool, output: PathBuf) -> XlifferResult<()> {
    let doc = parser::parse_file(&input)?;
    let bytes = if json {
        let mut bytes = serde_json::to_vec_pretty(&doc)?;
        bytes.push(b'\n');
        bytes
    } else {
        dump_text(&doc).into_bytes()
    };
    write_output(&output, &bytes)
}

/// Execute the to-json command
pub fn to_json(
    input: PathBuf,
    key_match: Option<String>,
    key_to: Option<String>,
    pretty: bool,
    output: PathBuf,
) -> XlifferResult<()> {
    eprintln!("{}", "xliffer - XLIFF to JSON".bold().green());
    eprintln!("   Input:  {}", input.display());

    let rewrite = KeyRewrite::from_options(key_match.as_deref(), key_to.as_deref())?;
    let doc = parser::parse_file(&input)?;
    let mapping = mapping::document_mapping(&doc, &rewrite);

    let mut bytes = mapping::to_json(&mapping, pretty)?;
    bytes.push(b'\n');
    write_output(&output, &bytes)?;

    eprintln!("{} {} keys → {}", "✅".green(), mapping.len(), describe(&output));
    Ok(())
}

/// Options of the to-xlsx command
#[derive(Debug, Clone, Default)]
pub struct ToXlsxOptions {
    pub input: PathBuf,
    /// Existing workbook to merge into
    pub append: Option<PathBuf>,
    /// Sheet of the appended workbook, first sheet if absent
    pub sheet: Option<String>,
    pub head_row: usize,
    pub key_column: usize,
    pub target_column: Option<usize>,
    pub key_match: Option<String>,
    pub key_to: Option<String>,
}

/// Load the workbook to write into and pick the sheet.
///
/// An appended workbook is read completely here, before any output exists,
/// so the output path may name the same file.
pub fn open_target_workbook(options: &ToXlsxOptions) -> XlifferResult<(Workbook, usize)> {
    let Some(path) = &options.append else {
        let mut book = Workbook::new();
        let index = book.add_sheet(Sheet::new(sheet_name_for(&base_name(&options.input))));
        return Ok((book, index));
    };

    let mut book = ExcelImporter::new(path).import()?;
    let index = match &options.sheet {
        Some(name) => book
            .sheet_index(name)
            .ok_or_else(|| XlifferError::SheetNotFound {
                sheet: name.clone(),
                path: path.clone(),
            })?,
        None if book.sheets.is_empty() => {
            book.add_sheet(Sheet::new(sheet_name_for(&base_name(&options.input))))
        }
        None => 0,
    };
    Ok((book, index))
}

/// Execute the to-xlsx command
pub fn to_xlsx(options: ToXlsxOptions, output: PathBuf) -> XlifferResult<()> {
    eprintln!("{}", "xliffer - XLIFF to Excel".bold().green());
    eprintln!("   Input:  {}", options.input.display());
    if let Some(append) = &options.append {
        eprintln!("   Append: {}", append.display());
    }

    let key_rewrite =
        KeyRewrite::from_options(options.key_match.as_deref(), options.key_to.as_deref())?;
    let (mut book, index) = open_target_workbook(&options)?;
    let doc = parser::parse_file(&options.input)?;

    let merge_options = MergeOptions {
        head_row: options.head_row,
        key_col: options.key_column,
        target_col: options.target_column,
        key_rewrite,
        input_name: options.input.display().to_string(),
    };

    let sheet = book.sheet_mut(index).ok_or_else(|| XlifferError::SheetNotFound {
        sheet: index.to_string(),
        path: options.append.clone().unwrap_or_default(),
    })?;
    let report = merge_document(sheet, &doc, &merge_options);
    let sheet_name = sheet.name.clone();

    let bytes = ExcelExporter::new(&book).to_buffer()?;
    write_output(&output, &bytes)?;

    eprintln!(
        "{} sheet '{}': {} updated, {} appended, {} duplicate keys (column {}) → {}",
        "✅".green(),
        sheet_name.bright_blue(),
        report.updated,
        report.appended,
        report.duplicates,
        report.target_col,
        describe(&output)
    );
    Ok(())
}

/// Options of the from-xlsx command
#[derive(Debug, Clone)]
pub struct FromXlsxOptions {
    pub input: PathBuf,
    /// 1-based sheet number
    pub sheet: usize,
    pub layout: SheetLayoutOptions,
    pub format: OutputFormat,
    pub out_dir: PathBuf,
    pub pretty: bool,
}

/// File name for a target column header
pub fn artifact_file_name(label: &str, format: OutputFormat) -> String {
    let stem: String = label
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}.{}", stem, format.extension())
}

/// Artifact name for a target column, unique among `taken`.
///
/// A repeated header label gets the column index before the extension.
fn unique_artifact_name(
    label: &str,
    index: usize,
    format: OutputFormat,
    taken: &mut HashSet<String>,
) -> String {
    let name = artifact_file_name(label, format);
    if taken.insert(name.clone()) {
        return name;
    }
    let extension = format.extension();
    let stem = name
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(&name);
    let renamed = format!("{}.{}.{}", stem, index, extension);
    tracing::warn!(
        "column {} repeats header '{}', writing {} instead of {}",
        index,
        label.trim(),
        renamed,
        name
    );
    taken.insert(renamed.clone());
    renamed
}

/// Render one artifact per non-empty target column, in memory
pub fn render_columns(
    sheet: &Sheet,
    original: &str,
    options: &FromXlsxOptions,
) -> XlifferResult<Vec<(String, Vec<u8>)>> {
    let mut artifacts = Vec::new();
    let mut taken = HashSet::new();

    for column in extract_units(sheet, &options.layout)? {
        if column.units.is_empty() {
            tracing::warn!(
                "column '{}' has no complete rows, skipping",
                column.column.label
            );
            continue;
        }

        let bytes = match options.format {
            OutputFormat::Xliff => {
                let doc = column.to_document(original);
                let xml = if options.pretty {
                    writer::to_xliff(&doc)?
                } else {
                    writer::to_xliff_compact(&doc)?
                };
                xml.into_bytes()
            }
            OutputFormat::Json => {
                let mut bytes = mapping::to_json(&column.to_mapping(), options.pretty)?;
                bytes.push(b'\n');
                bytes
            }
        };
        let name = unique_artifact_name(
            &column.column.label,
            column.column.index,
            options.format,
            &mut taken,
        );
        artifacts.push((name, bytes));
    }

    Ok(artifacts)
}

/// Execute the from-xlsx command
pub fn from_xlsx(options: FromXlsxOptions) -> XlifferResult<()> {
    eprintln!("{}", "xliffer - Excel to XLIFF".bold().green());
    eprintln!("   Input:  {}", options.input.display());
    eprintln!("   Output: {}", options.out_dir.display());

    let book = ExcelImporter::new(&options.input).import()?;
    let sheet = options
        .sheet
        .checked_sub(1)
        .and_then(|index| book.sheet(index))
        .ok_or_else(|| XlifferError::SheetNotFound {
            sheet: options.sheet.to_string(),
            path: options.input.clone(),
        })?;

    let artifacts = render_columns(sheet, &base_name(&options.input), &options)?;

    fs::create_dir_all(&options.out_dir)?;
    for (name, bytes) in &artifacts {
        let path = options.out_dir.join(name);
        fs::write(&path, bytes)?;
        eprintln!("   📄 {}", path.display());
    }

    eprintln!(
        "{} {} files written from sheet '{}'",
        "✅".green(),
        artifacts.len(),
        sheet.name.bright_blue()
    );
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
