//! The document root.
//!
//! A [`Document`] owns its sections in insertion order and is the entry point
//! for loading and saving INI text.
//!
//! ## Loading
//!
//! ```rust
//! use inidoc::Document;
//!
//! let doc = Document::load_from_string("[db]\nhost = localhost\nport = 5432\n").unwrap();
//! assert_eq!(doc.get_key("db", "port").unwrap().to_u16().unwrap(), 5432);
//! ```
//!
//! ## Building and saving
//!
//! ```rust
//! use inidoc::{Document, Key};
//!
//! let mut doc = Document::new();
//! doc.add_key("db", Key::new("host", "localhost"), true, false).unwrap();
//! assert_eq!(doc.serialize(), "[db]\nhost = localhost\n\n");
//! ```

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::source::{split_lines, strip_bom, strip_path_quotes, FsLineSource, LineSource};
use crate::{Error, IniOptions, Key, Parser, Result, Section, SectionMut};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// An ordered collection of uniquely-named sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document {
            sections: IndexMap::new(),
        }
    }

    /// Parses INI text with default options, reporting to [`TracingSink`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for empty or whitespace-only text, and the
    /// first parse error otherwise.
    pub fn load_from_string(text: &str) -> Result<Self> {
        Self::load_from_string_with(text, &IniOptions::default(), &TracingSink)
    }

    /// Parses INI text with explicit options and diagnostic sink.
    ///
    /// `\r\n` and bare `\r` line endings are treated as `\n`. A leading byte
    /// order mark is ignored.
    ///
    /// # Errors
    ///
    /// See [`Document::load_from_string`].
    pub fn load_from_string_with(
        text: &str,
        options: &IniOptions,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self> {
        let text = strip_bom(text);
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        Parser::new(options, sink).parse(split_lines(text))
    }

    /// Parses already-split lines with default options.
    ///
    /// # Errors
    ///
    /// Returns the first parse error, or [`Error::EmptyInput`] if no section
    /// header appears.
    pub fn load_from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::load_from_lines_with(lines, &IniOptions::default(), &TracingSink)
    }

    /// Parses already-split lines with explicit options and diagnostic sink.
    ///
    /// # Errors
    ///
    /// See [`Document::load_from_lines`].
    pub fn load_from_lines_with<I, S>(
        lines: I,
        options: &IniOptions,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Parser::new(options, sink).parse(lines)
    }

    /// Loads a file from disk.
    ///
    /// One pair of quotes around `path` is stripped first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, and any parse error.
    pub fn load_from_file(path: &str) -> Result<Self> {
        Self::load_from_file_with(path, &FsLineSource, &IniOptions::default(), &TracingSink)
    }

    /// Loads a file through the given line source.
    ///
    /// # Errors
    ///
    /// See [`Document::load_from_file`].
    pub fn load_from_file_with(
        path: &str,
        source: &dyn LineSource,
        options: &IniOptions,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self> {
        let lines = source.read_lines(Path::new(strip_path_quotes(path)))?;
        Self::load_from_lines_with(lines, options, sink)
    }

    /// Writes the serialized document to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let path = strip_path_quotes(path);
        fs::write(path, self.serialize()).map_err(|e| Error::io(&format!("{}: {}", path, e)))
    }

    /// Writes the serialized document to a writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.serialize().as_bytes())?;
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    #[must_use]
    pub fn contains_key(&self, section: &str, key: &str) -> bool {
        self.get(section).is_some_and(|s| s.contains(key))
    }

    #[must_use]
    pub fn get(&self, section: &str) -> Option<&Section> {
        self.sections.get(section)
    }

    /// Returns a handle for editing the keys of a section.
    ///
    /// Sections are renamed by removing and re-adding them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Document;
    ///
    /// let mut doc = Document::load_from_string("[A]\nx = 1").unwrap();
    /// doc.get_mut("A").unwrap().set_value("x", "2");
    /// assert_eq!(doc.serialize(), "[A]\nx = 2\n\n");
    /// ```
    pub fn get_mut(&mut self, section: &str) -> Option<SectionMut<'_>> {
        self.sections.get_mut(section).map(SectionMut::new)
    }

    #[must_use]
    pub fn get_key(&self, section: &str, key: &str) -> Option<&Key> {
        self.get(section).and_then(|s| s.get(key))
    }

    /// Adds a section.
    ///
    /// With `replace`, an existing section of the same name is overwritten in
    /// its original position. Otherwise the section is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for an unnamed section and
    /// [`Error::DuplicateName`] if the name is taken and `replace` is false.
    pub fn add(&mut self, section: Section, replace: bool) -> Result<()> {
        let Some(name) = section.name().map(str::to_string) else {
            return Err(Error::invalid_identifier(""));
        };
        if let Some(existing) = self.sections.get_mut(&name) {
            if !replace {
                return Err(Error::duplicate(&name));
            }
            *existing = section;
            return Ok(());
        }
        self.sections.insert(name, section);
        Ok(())
    }

    /// Adds a key to the named section.
    ///
    /// If the section does not exist and `create` is true, an empty section is
    /// appended first. `replace` behaves as in [`Section::add`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIdentifier`] if a section must be created under an
    ///   invalid name, or the key's name is invalid
    /// - [`Error::MissingSection`] if the section is absent and `create` is false
    /// - [`Error::DuplicateName`] if the key exists and `replace` is false
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{Document, Error, Key};
    ///
    /// let mut doc = Document::new();
    /// assert_eq!(
    ///     doc.add_key("A", Key::new("k", "v"), false, false),
    ///     Err(Error::MissingSection("A".to_string()))
    /// );
    /// doc.add_key("A", Key::new("k", "v"), true, false).unwrap();
    /// assert!(doc.contains_key("A", "k"));
    /// ```
    pub fn add_key(&mut self, section: &str, key: Key, create: bool, replace: bool) -> Result<()> {
        if let Some(existing) = self.sections.get_mut(section) {
            return existing.add(key, replace);
        }
        if !create {
            return Err(Error::MissingSection(section.to_string()));
        }

        let mut created = Section::default();
        created.set_name(section)?;
        created.add(key, replace)?;
        self.sections.insert(section.to_string(), created);
        Ok(())
    }

    /// Removes a section, keeping the order of the remaining ones.
    ///
    /// Returns `true` if the section was present.
    pub fn remove(&mut self, section: &str) -> bool {
        self.sections.shift_remove(section).is_some()
    }

    /// Removes a key from a section.
    ///
    /// Returns `true` if both the section and the key were present.
    pub fn remove_key(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .get_mut(section)
            .is_some_and(|s| s.remove(key))
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns an iterator over the sections in insertion order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Section> {
        self.sections.values()
    }

    /// Returns an iterator over the section names in insertion order.
    pub fn section_names(&self) -> indexmap::map::Keys<'_, String, Section> {
        self.sections.keys()
    }

    /// Renders every section followed by a blank line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Document;
    ///
    /// let doc = Document::load_from_string("[A]\nx=1\n[B]\ny=2").unwrap();
    /// assert_eq!(doc.serialize(), "[A]\nx = 1\n\n[B]\ny = 2\n\n");
    /// ```
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut output = String::new();
        for (name, section) in &self.sections {
            output.push_str(&section.serialize_as(name));
            output.push_str("\n\n");
        }
        output
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::load_from_string(s)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = indexmap::map::Values<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.values()
    }
}

impl IntoIterator for Document {
    type Item = Section;
    type IntoIter = indexmap::map::IntoValues<String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_values()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of section names to key/value maps")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut document = Document::new();
                while let Some((name, mut section)) = map.next_entry::<String, Section>()? {
                    section.set_name(&name).map_err(de::Error::custom)?;
                    document.add(section, false).map_err(de::Error::custom)?;
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;

    fn sample() -> Document {
        Document::load_from_string("[A]\nx = 1\ny = 2\n\n[B]\nz = 3\n").unwrap()
    }

    #[test]
    fn test_load_rejects_blank_text() {
        assert_eq!(Document::load_from_string(""), Err(Error::EmptyInput));
        assert_eq!(Document::load_from_string(" \r\n\t\n"), Err(Error::EmptyInput));
    }

    #[test]
    fn test_load_mixed_line_endings() {
        let doc = Document::load_from_string("[A]\r\nx = 1\ry = 2\n").unwrap();
        assert_eq!(doc.get_key("A", "y").unwrap().value(), "2");
    }

    #[test]
    fn test_lookups() {
        let doc = sample();
        assert!(doc.contains("A"));
        assert!(!doc.contains("C"));
        assert!(doc.contains_key("B", "z"));
        assert!(!doc.contains_key("B", "x"));
        assert!(!doc.contains_key("C", "x"));
        assert!(doc.get("NoSuchSection").is_none());
        assert!(doc.get_key("A", "NoSuchKey").is_none());
        assert!(doc.get_key("NoSuchSection", "x").is_none());
    }

    #[test]
    fn test_add_rejects_unnamed_section() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.add(Section::new("bad name"), false),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_add_duplicate_and_replace_in_place() {
        let mut doc = sample();
        assert_eq!(doc.add(Section::new("A"), false), Err(Error::duplicate("A")));

        let mut replacement = Section::new("A");
        replacement.add(Key::new("w", "0"), false).unwrap();
        doc.add(replacement, true).unwrap();

        let names: Vec<_> = doc.section_names().cloned().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(doc.contains_key("A", "w"));
        assert!(!doc.contains_key("A", "x"));
    }

    #[test]
    fn test_add_key_to_existing_section() {
        let mut doc = sample();
        doc.add_key("B", Key::new("q", "4"), false, false).unwrap();
        assert_eq!(doc.get("B").unwrap().len(), 2);
        assert_eq!(
            doc.add_key("B", Key::new("q", "5"), false, false),
            Err(Error::duplicate("q"))
        );
        doc.add_key("B", Key::new("q", "5"), false, true).unwrap();
        assert_eq!(doc.get_key("B", "q").unwrap().value(), "5");
    }

    #[test]
    fn test_add_key_create_validates_names() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.add_key("no good", Key::new("k", "v"), true, false),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(matches!(
            doc.add_key("Fine", Key::new("no good", "v"), true, false),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut doc = sample();
        assert!(doc.remove_key("A", "x"));
        assert!(!doc.remove_key("A", "x"));
        assert!(!doc.remove_key("C", "x"));
        assert!(doc.remove("A"));
        assert!(!doc.remove("A"));
        assert_eq!(doc.len(), 1);
        doc.clear();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let doc = sample();
        assert_eq!(doc.serialize(), doc.serialize());
        assert_eq!(doc.serialize(), doc.to_string());
        assert_eq!(doc.serialize(), "[A]\nx = 1\ny = 2\n\n[B]\nz = 3\n\n");
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        let again = Document::load_from_string(&doc.serialize()).unwrap();
        assert_eq!(doc, again);
        assert!(doc.section_names().eq(again.section_names()));
        for (ours, theirs) in doc.iter().zip(again.iter()) {
            assert!(ours.key_names().eq(theirs.key_names()));
        }
        assert_eq!(doc.serialize(), again.serialize());
    }

    #[test]
    fn test_equality_ignores_order_but_text_does_not() {
        let forward = Document::load_from_string("[A]\nx = 1\ny = 2").unwrap();
        let backward = Document::load_from_string("[A]\ny = 2\nx = 1").unwrap();
        assert_eq!(forward, backward);
        assert_ne!(forward.serialize(), backward.serialize());
    }

    #[test]
    fn test_get_mut_edits_keep_document_parseable() {
        let mut doc = Document::load_from_string("[A]\nx = 1\n[B]\ny = 2").unwrap();
        {
            let mut a = doc.get_mut("A").unwrap();
            assert!(a.set_value("x", "10"));
            a.add(Key::new("w", "0"), false).unwrap();
            assert!(a.remove("w"));
        }
        assert!(doc.get_mut("C").is_none());

        assert_eq!(doc.get("A").unwrap().name(), Some("A"));
        assert_eq!(doc.get_key("A", "x").unwrap().name(), "x");
        let text = doc.serialize();
        assert_eq!(text, "[A]\nx = 10\n\n[B]\ny = 2\n\n");
        assert_eq!(Document::load_from_string(&text).unwrap(), doc);
    }

    #[test]
    fn test_from_str_trait() {
        let doc: Document = "[A]\nk = v".parse().unwrap();
        assert!(doc.contains("A"));
    }

    #[test]
    fn test_load_with_custom_options() {
        let options = IniOptions::new().with_comment_prefixes(['#']);
        let result = Document::load_from_string_with("[A]\n; not a comment\n", &options, &NullSink);
        assert!(matches!(result, Err(Error::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        sample().write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), sample().serialize());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"A":{"x":"1","y":"2"},"B":{"z":"3"}}"#);

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_serde_rejects_invalid_names() {
        assert!(serde_json::from_str::<Document>(r#"{"bad name":{"k":"v"}}"#).is_err());
        assert!(serde_json::from_str::<Document>(r#"{"A":{"bad key":"v"}}"#).is_err());
    }
}
