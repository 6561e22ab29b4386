use super::*;
use crate::excel::ColumnOverrides;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const MENU_XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file original="menu" source-language="en" target-language="de" datatype="html">
    <body>
      <trans-unit id="menu.open">
        <source xml:lang="en">Open</source>
        <target xml:lang="de">Öffnen</target>
        <note>File menu</note>
      </trans-unit>
      <trans-unit id="menu.close">
        <source xml:lang="en">Close</source>
        <target xml:lang="de"><g id="1">Schließen</g></target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn layout_options() -> SheetLayoutOptions {
    SheetLayoutOptions {
        skip_rows: 0,
        overrides: ColumnOverrides::default(),
        source_lang: "en".to_string(),
        target_lang: String::new(),
    }
}

// =========================================================================
// Output helpers
// =========================================================================

#[test]
fn test_write_output_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.txt");
    write_output(&path, b"hello").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
}

#[test]
fn test_describe_stdout() {
    assert_eq!(describe(Path::new("-")), "<stdout>");
    assert_eq!(describe(Path::new("a.xliff")), "a.xliff");
}

#[test]
fn test_artifact_file_name() {
    assert_eq!(artifact_file_name("DE-de", OutputFormat::Xliff), "DE-de.xliff");
    assert_eq!(artifact_file_name(" FR-fr ", OutputFormat::Json), "FR-fr.json");
    assert_eq!(artifact_file_name("a/b\\c", OutputFormat::Json), "a_b_c.json");
}

// =========================================================================
// XLIFF commands
// =========================================================================

#[test]
fn test_dump_text() {
    let doc = parser::parse_str(MENU_XLIFF).unwrap();
    assert_eq!(
        dump_text(&doc),
        "unit menu.open\n source: Open\n target: Öffnen\n note: File menu\n\
         unit menu.close\n source: Close\n target: Schließen\n"
    );
}

#[test]
fn test_blank_target_writes_file() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "menu.xliff", MENU_XLIFF);
    let output = dir.path().join("blank.xliff");

    blank_target(input, output.clone()).unwrap();

    let doc = parser::parse_file(&output).unwrap();
    assert_eq!(doc.files[0].target_lang, "");
    assert!(doc.units().all(|u| u.target_text().is_empty()));
}

#[test]
fn test_set_lang_keeps_source() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "menu.xliff", MENU_XLIFF);
    let output = dir.path().join("fr.xliff");

    set_lang(input, "keep".to_string(), "fr".to_string(), output.clone()).unwrap();

    let doc = parser::parse_file(&output).unwrap();
    assert_eq!(doc.files[0].source_lang, "en");
    assert_eq!(doc.files[0].target_lang, "fr");
}

#[test]
fn test_merge_concatenates_files() {
    let dir = TempDir::new().unwrap();
    let a = write_fixture(&dir, "a.xliff", MENU_XLIFF);
    let b = write_fixture(&dir, "b.xliff", MENU_XLIFF);
    let output = dir.path().join("merged.xliff");

    merge(a, b, output.clone()).unwrap();

    let doc = parser::parse_file(&output).unwrap();
    assert_eq!(doc.files.len(), 2);
    assert_eq!(doc.unit_count(), 4);
}

#[test]
fn test_to_json_with_key_rewrite() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "menu.xliff", MENU_XLIFF);
    let output = dir.path().join("menu.json");

    to_json(
        input,
        Some(r"\.".to_string()),
        Some("_".to_string()),
        false,
        output.clone(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\"menu_close\":\"Schließen\",\"menu_open\":\"Öffnen\"}\n"
    );
}

#[test]
fn test_to_json_invalid_pattern() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "menu.xliff", MENU_XLIFF);
    let output = dir.path().join("menu.json");

    let err = to_json(input, Some("(".to_string()), None, false, output.clone()).unwrap_err();
    assert!(matches!(err, XlifferError::KeyRewrite(_)));
    assert!(!output.exists());
}

// =========================================================================
// to-xlsx
// =========================================================================

#[test]
fn test_open_target_workbook_new() {
    let options = ToXlsxOptions {
        input: PathBuf::from("dir/menu.de.xliff"),
        ..ToXlsxOptions::default()
    };
    let (book, index) = open_target_workbook(&options).unwrap();
    assert_eq!(index, 0);
    assert_eq!(book.sheets[0].name, "menu.de.xliff");
}

#[test]
fn test_open_target_workbook_missing_sheet() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("book.xlsx");
    let mut book = Workbook::new();
    book.add_sheet(Sheet::from_rows("texts", vec![vec!["key"]]));
    ExcelExporter::new(&book).export(&xlsx).unwrap();

    let options = ToXlsxOptions {
        input: PathBuf::from("menu.xliff"),
        append: Some(xlsx),
        sheet: Some("nope".to_string()),
        ..ToXlsxOptions::default()
    };
    let err = open_target_workbook(&options).unwrap_err();
    assert!(matches!(err, XlifferError::SheetNotFound { .. }));
}

#[test]
fn test_to_xlsx_append_into_same_file() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "de.xliff", MENU_XLIFF);
    let xlsx = dir.path().join("book.xlsx");

    let mut book = Workbook::new();
    book.add_sheet(Sheet::from_rows(
        "texts",
        vec![
            vec!["key", "note", "source", "FR-fr"],
            vec!["menu.open", "", "Open", "Ouvrir"],
        ],
    ));
    ExcelExporter::new(&book).export(&xlsx).unwrap();

    let options = ToXlsxOptions {
        input: input.clone(),
        append: Some(xlsx.clone()),
        sheet: Some("texts".to_string()),
        ..ToXlsxOptions::default()
    };
    to_xlsx(options, xlsx.clone()).unwrap();

    let book = ExcelImporter::new(&xlsx).import().unwrap();
    let sheet = &book.sheets[0];
    assert_eq!(sheet.text(0, 4), "de.xliff");
    assert_eq!(sheet.text(1, 3), "Ouvrir");
    assert_eq!(sheet.text(1, 4), "Öffnen");
    assert_eq!(sheet.text(3, 1), format!("added from {}", input.display()));
    assert_eq!(sheet.text(4, 0), "menu.close");
    assert_eq!(sheet.text(4, 2), "Close");
    assert_eq!(sheet.text(4, 4), "Schließen");
}

// =========================================================================
// from-xlsx
// =========================================================================

#[test]
fn test_render_columns_skips_empty_columns() {
    let sheet = Sheet::from_rows(
        "s",
        vec![
            vec!["key", "note", "EN-en", "DE-de", "FR-fr"],
            vec!["a", "", "hi", "hallo", ""],
        ],
    );
    let options = FromXlsxOptions {
        input: PathBuf::from("book.xlsx"),
        sheet: 1,
        layout: layout_options(),
        format: OutputFormat::Json,
        out_dir: PathBuf::from("."),
        pretty: false,
    };
    let artifacts = render_columns(&sheet, "book.xlsx", &options).unwrap();
    let names: Vec<&str> = artifacts.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["EN-en.json", "DE-de.json"]);
    assert_eq!(artifacts[1].1, b"{\"a\":\"hallo\"}\n".to_vec());
}

#[test]
fn test_render_columns_repeated_label_gets_column_index() {
    let sheet = Sheet::from_rows(
        "s",
        vec![
            vec!["key", "note", "EN-en", "DE-de", "DE-de"],
            vec!["a", "", "hi", "hallo", "servus"],
        ],
    );
    let options = FromXlsxOptions {
        input: PathBuf::from("book.xlsx"),
        sheet: 1,
        layout: layout_options(),
        format: OutputFormat::Json,
        out_dir: PathBuf::from("."),
        pretty: false,
    };
    let artifacts = render_columns(&sheet, "book.xlsx", &options).unwrap();
    let names: Vec<&str> = artifacts.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["EN-en.json", "DE-de.json", "DE-de.4.json"]);
    assert_eq!(artifacts[1].1, b"{\"a\":\"hallo\"}\n".to_vec());
    assert_eq!(artifacts[2].1, b"{\"a\":\"servus\"}\n".to_vec());
}

#[test]
fn test_from_xlsx_writes_one_file_per_column() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("book.xlsx");
    let mut book = Workbook::new();
    book.add_sheet(Sheet::from_rows(
        "texts",
        vec![
            vec!["Product texts"],
            vec![],
            vec!["key", "note", "EN-en", "DE-de"],
            vec!["menu.open", "File menu", "Open", "Öffnen"],
        ],
    ));
    ExcelExporter::new(&book).export(&xlsx).unwrap();

    let out_dir = dir.path().join("out");
    let options = FromXlsxOptions {
        input: xlsx,
        sheet: 1,
        layout: SheetLayoutOptions {
            skip_rows: 2,
            ..layout_options()
        },
        format: OutputFormat::Xliff,
        out_dir: out_dir.clone(),
        pretty: true,
    };
    from_xlsx(options).unwrap();

    let doc = parser::parse_file(&out_dir.join("DE-de.xliff")).unwrap();
    assert_eq!(doc.files[0].original, "book.xlsx");
    assert_eq!(doc.files[0].source_lang, "en");
    assert_eq!(doc.files[0].target_lang, "de");
    let unit = &doc.files[0].units[0];
    assert_eq!(unit.id, "menu.open");
    assert_eq!(unit.target_text(), "Öffnen");
    assert_eq!(unit.note_text(), "File menu");
    assert!(out_dir.join("EN-en.xliff").exists());
}

#[test]
fn test_from_xlsx_sheet_zero_not_found() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("book.xlsx");
    let mut book = Workbook::new();
    book.add_sheet(Sheet::from_rows("texts", vec![vec!["key"]]));
    ExcelExporter::new(&book).export(&xlsx).unwrap();

    for sheet in [0, 2] {
        let options = FromXlsxOptions {
            input: xlsx.clone(),
            sheet,
            layout: layout_options(),
            format: OutputFormat::Xliff,
            out_dir: dir.path().to_path_buf(),
            pretty: false,
        };
        let err = from_xlsx(options).unwrap_err();
        assert!(matches!(err, XlifferError::SheetNotFound { .. }));
    }
}
