//! XLIFF 1.2 reader
//!
//! Builds a [`Document`] from bytes in one pass: either the complete tree
//! materializes or an error is returned, never a partial document.

pub mod tree;

use crate::error::{XlifferError, XlifferResult};
use crate::types::{Document, File, TextNode, Unit, XLIFF_NAMESPACE, XLIFF_VERSION};
use std::path::Path;
use tree::Element;

/// Read and parse an XLIFF file.
///
/// # Arguments
/// * `path` - Path to the `.xliff` / `.xlf` file
///
/// # Returns
/// * `Ok(Document)` - All files and units in document order
/// * `Err(XlifferError::MissingResource)` - The file cannot be read
/// * `Err(XlifferError::Xml)` - The content is not a well-formed XLIFF document
///
/// # Example
/// ```no_run
/// use xliffer::parser::parse_file;
/// use std::path::Path;
///
/// let doc = parse_file(Path::new("menu.de.xliff"))?;
/// println!("Units: {}", doc.unit_count());
/// # Ok::<(), xliffer::error::XlifferError>(())
/// ```
pub fn parse_file(path: &Path) -> XlifferResult<Document> {
    let bytes = std::fs::read(path).map_err(|e| XlifferError::missing(path, e))?;
    parse_document(&bytes).map_err(|e| match e {
        XlifferError::Xml(msg) => XlifferError::Xml(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Parse an XLIFF document from memory
pub fn parse_document(bytes: &[u8]) -> XlifferResult<Document> {
    let root = tree::read_tree(bytes)?;
    document_from_tree(&root)
}

pub fn parse_str(content: &str) -> XlifferResult<Document> {
    parse_document(content.as_bytes())
}

fn document_from_tree(root: &Element) -> XlifferResult<Document> {
    if root.name != "xliff" {
        return Err(XlifferError::Xml(format!(
            "expected <xliff> root element, found <{}>",
            root.name
        )));
    }

    let mut doc = Document {
        version: root.attr("version").unwrap_or(XLIFF_VERSION).to_string(),
        xmlns: root.attr("xmlns").unwrap_or(XLIFF_NAMESPACE).to_string(),
        files: Vec::new(),
    };

    for file in root.children_named("file") {
        doc.add_file(file_from_element(file));
    }

    if doc.files.is_empty() {
        return Err(XlifferError::Xml(
            "document contains no <file> element".to_string(),
        ));
    }

    Ok(doc)
}

fn file_from_element(element: &Element) -> File {
    let mut file = File {
        original: element.attr_or_empty("original"),
        source_lang: element.attr_or_empty("source-language"),
        target_lang: element.attr_or_empty("target-language"),
        datatype: element.attr_or_empty("datatype"),
        units: Vec::new(),
    };

    // groups are not supported: only direct <body><trans-unit> children count
    if let Some(body) = element.child("body") {
        for unit in body.children_named("trans-unit") {
            file.add_unit(unit_from_element(unit));
        }
    }

    file
}

fn unit_from_element(element: &Element) -> Unit {
    let source = element
        .child("source")
        .map(|e| text_node(e, e.direct_text()))
        .unwrap_or_default();

    // translation tools leave <mrk> and friends inside <target>, so its
    // text is collected from every depth
    let target = element
        .child("target")
        .map(|e| text_node(e, e.flatten_text()));

    let note = element
        .child("note")
        .map(|e| e.direct_text())
        .filter(|n| !n.is_empty());

    Unit {
        id: element.attr_or_empty("id"),
        source,
        target,
        note,
    }
}

fn text_node(element: &Element, content: String) -> TextNode {
    TextNode {
        lang: element.attr_or_empty("lang"),
        space: element.attr_or_empty("space"),
        state: element.attr_or_empty("state"),
        content,
    }
}
