//! Generic XML element tree
//!
//! XLIFF producers wrap translated words in inline markup (`<mrk>`, `<g>`,
//! revision markers ...). The document reader first materializes the whole
//! input as a plain element tree and then picks text out of it, so the
//! flattening rule for `<target>` lives in one place: [`Element::flatten_text`].

use crate::error::{XlifferError, XlifferResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;

/// A child of an element: either a nested element or character data
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Local name, namespace prefix stripped
    pub name: String,
    /// Attributes by local name, in document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn from_start(start: &BytesStart) -> XlifferResult<Self> {
        let mut element = Element::new(String::from_utf8_lossy(start.local_name().as_ref()));

        for attr in start.attributes() {
            let attr = attr.map_err(|e| XlifferError::Xml(format!("bad attribute: {}", e)))?;
            // prefixed namespace declarations would shadow real attributes by local name
            if attr.key.as_ref().starts_with(b"xmlns:") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| XlifferError::Xml(format!("bad value for '{}': {}", key, e)))?;
            element.attributes.push((key, value.into_owned()));
        }

        Ok(element)
    }

    /// Attribute value by local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value by local name, empty when absent
    pub fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    /// First direct child element with the given local name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// All direct child elements with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |e| e.name == name)
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Character data directly inside this element, nested elements ignored
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// All character data at any depth, in document order.
    ///
    /// Markup is dropped, its text kept: `<mrk>Hallo</mrk> <mrk>Du!</mrk>`
    /// flattens to `Hallo Du!`. Markup without any text yields "".
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

fn xml_error(reader: &Reader<&[u8]>, err: impl Display) -> XlifferError {
    XlifferError::Xml(format!("at byte {}: {}", reader.buffer_position(), err))
}

/// Read a complete document into its root element.
///
/// Declarations, comments, processing instructions and doctypes are
/// skipped. Whitespace is kept as-is.
pub fn read_tree(bytes: &[u8]) -> XlifferResult<Element> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stack.push(Element::from_start(&e)?),
            Ok(Event::Empty(e)) => {
                let element = Element::from_start(&e)?;
                attach(&mut stack, &mut root, element).map_err(|e| xml_error(&reader, e))?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error(&reader, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, element).map_err(|e| xml_error(&reader, e))?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| xml_error(&reader, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => return Err(xml_error(&reader, "text outside of the root element")),
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(&reader, e)),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(
            &reader,
            format!("unexpected end of document inside <{}>", open.name),
        ));
    }

    root.ok_or_else(|| XlifferError::Xml("document has no root element".to_string()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), &'static str> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err("more than one root element");
    }
    *root = Some(element);
    Ok(())
}
