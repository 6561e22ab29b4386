//! Flat key → text mapping (JSON)

use crate::core::KeyRewrite;
use crate::error::XlifferResult;
use crate::types::Document;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key → translated text. Keys are kept sorted so output is stable.
pub type Mapping = BTreeMap<String, String>;

/// Collect every unit's target text under its (rewritten) key.
///
/// Groups are not supported. A key seen twice is logged and the later
/// unit wins.
pub fn document_mapping(doc: &Document, rewrite: &KeyRewrite) -> Mapping {
    let mut mapping = Mapping::new();
    for unit in doc.units() {
        insert_warn(&mut mapping, rewrite.apply(&unit.id).into_owned(), unit.target_text());
    }
    mapping
}

/// Insert, warning when the key already has a value
pub fn insert_warn(mapping: &mut Mapping, key: String, value: &str) {
    if mapping.contains_key(&key) {
        tracing::warn!("double entry for key {:?}", key);
    }
    mapping.insert(key, value.to_string());
}

/// Render a mapping as JSON; `pretty` indents with tabs
pub fn to_json(mapping: &Mapping, pretty: bool) -> XlifferResult<Vec<u8>> {
    if !pretty {
        return Ok(serde_json::to_vec(mapping)?);
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    mapping.serialize(&mut serializer)?;
    Ok(buf)
}
