//! XLIFF 1.2 writer

pub mod mapping;

use crate::error::{XlifferError, XlifferResult};
use crate::types::{Document, File, TextNode, Unit};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Standard XML declaration, written before every document
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serialize a document indented by two spaces
pub fn to_xliff(doc: &Document) -> XlifferResult<String> {
    let mut writer = Writer::new_with_indent(header_buffer(), b' ', 2);
    write_document(&mut writer, doc)?;
    finish(writer)
}

/// Serialize a document without any indentation
pub fn to_xliff_compact(doc: &Document) -> XlifferResult<String> {
    let mut writer = Writer::new(header_buffer());
    write_document(&mut writer, doc)?;
    finish(writer)
}

fn header_buffer() -> Vec<u8> {
    XML_HEADER.as_bytes().to_vec()
}

fn finish(writer: Writer<Vec<u8>>) -> XlifferResult<String> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| XlifferError::Xml(format!("invalid UTF-8 output: {}", e)))
}

fn write_document<W: Write>(writer: &mut Writer<W>, doc: &Document) -> XlifferResult<()> {
    write_events(writer, doc).map_err(|e| XlifferError::Xml(format!("write failed: {}", e)))
}

fn write_events<W: Write>(writer: &mut Writer<W>, doc: &Document) -> quick_xml::Result<()> {
    let mut root = BytesStart::new("xliff");
    root.push_attribute(("version", doc.version.as_str()));
    root.push_attribute(("xmlns", doc.xmlns.as_str()));
    writer.write_event(Event::Start(root))?;

    for file in &doc.files {
        write_file(writer, file)?;
    }

    writer.write_event(Event::End(BytesEnd::new("xliff")))?;
    Ok(())
}

fn write_file<W: Write>(writer: &mut Writer<W>, file: &File) -> quick_xml::Result<()> {
    let mut start = BytesStart::new("file");
    start.push_attribute(("original", file.original.as_str()));
    push_non_empty(&mut start, "source-language", &file.source_lang);
    push_non_empty(&mut start, "target-language", &file.target_lang);
    push_non_empty(&mut start, "datatype", &file.datatype);
    writer.write_event(Event::Start(start))?;

    if file.units.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("body")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("body")))?;
        for unit in &file.units {
            write_unit(writer, unit)?;
        }
        writer.write_event(Event::End(BytesEnd::new("body")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("file")))?;
    Ok(())
}

fn write_unit<W: Write>(writer: &mut Writer<W>, unit: &Unit) -> quick_xml::Result<()> {
    let mut start = BytesStart::new("trans-unit");
    start.push_attribute(("id", unit.id.as_str()));
    writer.write_event(Event::Start(start))?;

    write_text_node(writer, "source", &unit.source)?;
    if let Some(target) = &unit.target {
        write_text_node(writer, "target", target)?;
    }
    if let Some(note) = unit.note.as_deref().filter(|n| !n.is_empty()) {
        write_text(writer, BytesStart::new("note"), note)?;
    }

    writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
    Ok(())
}

fn write_text_node<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    node: &TextNode,
) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("lang", node.lang.as_str()));
    push_non_empty(&mut start, "space", &node.space);
    push_non_empty(&mut start, "state", &node.state);
    write_text(writer, start, &node.content)
}

/// Empty elements are self-closing: an indented `<a>\n  </a>` would read
/// back as whitespace content.
fn write_text<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart,
    text: &str,
) -> quick_xml::Result<()> {
    if text.is_empty() {
        return writer.write_event(Event::Empty(start));
    }
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))
}

fn push_non_empty(start: &mut BytesStart, key: &str, value: &str) {
    if !value.is_empty() {
        start.push_attribute((key, value));
    }
}
