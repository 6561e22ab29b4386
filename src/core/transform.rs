//! In-place document transforms behind the XLIFF → XLIFF converters

use crate::types::{Document, TextNode};

/// Language value that leaves the existing language untouched
pub const KEEP: &str = "keep";

/// Clear every target, turning a translated document into a template for
/// another language. Target elements stay present, only emptied.
pub fn blank_target(doc: &mut Document) {
    for file in &mut doc.files {
        file.target_lang.clear();
        for unit in &mut file.units {
            if let Some(target) = unit.target.as_mut() {
                target.lang.clear();
                target.content.clear();
            }
        }
    }
}

/// Replace every target with a copy of its source
pub fn copy_source_to_target(doc: &mut Document) {
    for file in &mut doc.files {
        file.target_lang = file.source_lang.clone();
        for unit in &mut file.units {
            unit.target = Some(unit.source.clone());
        }
    }
}

/// Exchange source and target text of every unit.
///
/// Only the text moves: language, whitespace and state attributes stay on
/// their side. A missing target counts as empty and is created. The file
/// target language is cleared.
pub fn swap_source_target(doc: &mut Document) {
    for file in &mut doc.files {
        file.target_lang.clear();
        for unit in &mut file.units {
            let target = unit.target.get_or_insert_with(TextNode::default);
            std::mem::swap(&mut unit.source.content, &mut target.content);
        }
    }
}

/// Set source/target languages on files and units; [`KEEP`] skips a side
pub fn set_languages(doc: &mut Document, source: &str, target: &str) {
    for file in &mut doc.files {
        set_or_keep(&mut file.source_lang, source);
        set_or_keep(&mut file.target_lang, target);
        for unit in &mut file.units {
            set_or_keep(&mut unit.source.lang, source);
            if let Some(t) = unit.target.as_mut() {
                set_or_keep(&mut t.lang, target);
            }
        }
    }
}

fn set_or_keep(to: &mut String, from: &str) {
    if from != KEEP {
        *to = from.to_string();
    }
}

/// Append the files of `b` to `a`.
///
/// Unit ids are not checked across the two inputs.
pub fn merge(mut a: Document, b: Document) -> Document {
    a.files.extend(b.files);
    a
}
