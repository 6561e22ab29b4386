use serde::{Deserialize, Serialize};

//==============================================================================
// XLIFF 1.2 Document Model
//==============================================================================

/// XLIFF version written on every document
pub const XLIFF_VERSION: &str = "1.2";

/// XLIFF 1.2 namespace URN
pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

/// Datatype label for programmatically created files
pub const DEFAULT_DATATYPE: &str = "html";

/// Whitespace flag used for text taken from spreadsheets
pub const SPACE_PRESERVE: &str = "preserve";

/// An XLIFF document: an ordered list of files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: String,
    pub xmlns: String,
    pub files: Vec<File>,
}

impl Document {
    /// Create an empty document (no files)
    pub fn empty() -> Self {
        Self {
            version: XLIFF_VERSION.to_string(),
            xmlns: XLIFF_NAMESPACE.to_string(),
            files: Vec::new(),
        }
    }

    /// Create a document holding a single empty file
    pub fn new(original: impl Into<String>, source_lang: impl Into<String>) -> Self {
        let mut doc = Self::empty();
        doc.add_file(File::new(original, source_lang));
        doc
    }

    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// Iterate all units of all files in document order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.files.iter().flat_map(|f| f.units.iter())
    }

    pub fn unit_count(&self) -> usize {
        self.files.iter().map(|f| f.units.len()).sum()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// A `<file>` element with its translation units
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct File {
    /// Provenance label (`original` attribute)
    pub original: String,
    pub source_lang: String,
    pub target_lang: String,
    pub datatype: String,
    pub units: Vec<Unit>,
}

impl File {
    pub fn new(original: impl Into<String>, source_lang: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            source_lang: source_lang.into(),
            target_lang: String::new(),
            datatype: DEFAULT_DATATYPE.to_string(),
            units: Vec::new(),
        }
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }
}

/// A `<trans-unit>`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub source: TextNode,
    /// Absent in templates that were never translated
    pub target: Option<TextNode>,
    pub note: Option<String>,
}

impl Unit {
    pub fn new(id: impl Into<String>, source: TextNode) -> Self {
        Self {
            id: id.into(),
            source,
            target: None,
            note: None,
        }
    }

    pub fn with_target(mut self, target: TextNode) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.is_empty() { None } else { Some(note) };
        self
    }

    /// Target text, empty when the unit has no target
    pub fn target_text(&self) -> &str {
        self.target.as_ref().map(|t| t.content.as_str()).unwrap_or("")
    }

    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

/// Content of a `<source>` or `<target>` element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextNode {
    pub lang: String,
    /// `space` attribute, e.g. "preserve"
    pub space: String,
    pub state: String,
    pub content: String,
}

impl TextNode {
    pub fn new(lang: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            space: String::new(),
            state: String::new(),
            content: content.into(),
        }
    }

    /// Text node with `space="preserve"`, as produced from sheet cells
    pub fn preserved(lang: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            space: SPACE_PRESERVE.to_string(),
            ..Self::new(lang, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_fixed_header() {
        let doc = Document::new("menu.xlsx", "en");
        assert_eq!(doc.version, "1.2");
        assert_eq!(doc.xmlns, XLIFF_NAMESPACE);
        assert_eq!(doc.files.len(), 1);
        assert_eq!(doc.files[0].datatype, "html");
        assert_eq!(doc.files[0].source_lang, "en");
        assert!(doc.files[0].units.is_empty());
    }

    #[test]
    fn test_empty_document_has_no_files() {
        assert!(Document::empty().files.is_empty());
        assert_eq!(Document::default().unit_count(), 0);
    }

    #[test]
    fn test_units_iterates_across_files() {
        let mut doc = Document::empty();
        let mut a = File::new("a", "en");
        a.add_unit(Unit::new("a.1", TextNode::new("en", "one")));
        let mut b = File::new("b", "en");
        b.add_unit(Unit::new("b.1", TextNode::new("en", "two")));
        b.add_unit(Unit::new("b.2", TextNode::new("en", "three")));
        doc.add_file(a);
        doc.add_file(b);

        let ids: Vec<&str> = doc.units().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a.1", "b.1", "b.2"]);
        assert_eq!(doc.unit_count(), 3);
    }

    #[test]
    fn test_target_text_of_template_is_empty() {
        let unit = Unit::new("k", TextNode::new("en", "hi"));
        assert_eq!(unit.target_text(), "");
        assert_eq!(unit.note_text(), "");
    }

    #[test]
    fn test_with_note_ignores_empty() {
        let unit = Unit::new("k", TextNode::default()).with_note("");
        assert!(unit.note.is_none());
        let unit = unit.with_note("menu entry");
        assert_eq!(unit.note_text(), "menu entry");
    }

    #[test]
    fn test_preserved_sets_space() {
        let node = TextNode::preserved("de", "Hallo");
        assert_eq!(node.space, "preserve");
        assert_eq!(node.lang, "de");
        assert!(node.state.is_empty());
    }
}
