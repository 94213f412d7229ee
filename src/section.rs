//! Named, ordered collections of keys.
//!
//! A [`Section`] keeps its keys in an [`IndexMap`] so that iteration and
//! serialization follow insertion order, and replacing a key keeps it where it
//! was.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{Key, Section};
//!
//! let mut section = Section::new("server");
//! section.add(Key::new("host", "localhost"), false).unwrap();
//! section.add(Key::new("port", "8080"), false).unwrap();
//!
//! assert_eq!(section.serialize(), "[server]\nhost = localhost\nport = 8080");
//! ```

use crate::{is_valid_identifier, Error, IniOptions, Key, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named group of uniquely-named keys.
///
/// The name is optional: a section built with an invalid name stays unnamed
/// until [`Section::set_name`] succeeds, and a [`Document`](crate::Document)
/// refuses unnamed sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    name: Option<String>,
    keys: IndexMap<String, Key>,
}

impl Section {
    /// Creates an empty section, unnamed if `name` is not a valid identifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Section;
    ///
    /// assert_eq!(Section::new("General").name(), Some("General"));
    /// assert_eq!(Section::new("not valid").name(), None);
    /// ```
    #[must_use]
    pub fn new(name: &str) -> Self {
        Section {
            name: is_valid_identifier(name).then(|| name.to_string()),
            keys: IndexMap::new(),
        }
    }

    /// Parses a header line such as `[General]` into a new, empty section.
    ///
    /// Returns `None` if the line is not a valid header.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Section;
    ///
    /// assert_eq!(Section::from_line("  [ General ]  ").unwrap().name(), Some("General"));
    /// assert!(Section::from_line("key = value").is_none());
    /// ```
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        Self::from_line_with(line, &IniOptions::default())
    }

    pub(crate) fn from_line_with(line: &str, options: &IniOptions) -> Option<Self> {
        let mut section = Section::default();
        section.parse_name_line_with(line, options).ok()?;
        Some(section)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Renames the section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] and leaves the section untouched if
    /// `name` is not a valid identifier.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if !is_valid_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, key_name: &str) -> bool {
        self.keys.contains_key(key_name)
    }

    #[must_use]
    pub fn get(&self, key_name: &str) -> Option<&Key> {
        self.keys.get(key_name)
    }

    /// Replaces the value of an existing key, keeping its position.
    ///
    /// Returns `false` if no key has that name. Keys are renamed by removing
    /// and re-adding them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{Key, Section};
    ///
    /// let mut section = Section::new("S");
    /// section.add(Key::new("a", "1"), false).unwrap();
    /// assert!(section.set_value("a", "2"));
    /// assert!(!section.set_value("b", "2"));
    /// assert_eq!(section.get("a").unwrap().value(), "2");
    /// ```
    pub fn set_value(&mut self, key_name: &str, value: impl Into<String>) -> bool {
        match self.keys.get_mut(key_name) {
            Some(key) => {
                key.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Adds a key.
    ///
    /// With `replace`, an existing key of the same name is overwritten in its
    /// original position. Otherwise the key is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the key has no valid name, and
    /// [`Error::DuplicateName`] if the name is taken and `replace` is false.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{Key, Section};
    ///
    /// let mut section = Section::new("S");
    /// section.add(Key::new("a", "1"), false).unwrap();
    /// assert!(section.add(Key::new("a", "2"), false).is_err());
    /// section.add(Key::new("a", "2"), true).unwrap();
    /// assert_eq!(section.get("a").unwrap().value(), "2");
    /// ```
    pub fn add(&mut self, key: Key, replace: bool) -> Result<()> {
        if !is_valid_identifier(key.name()) {
            return Err(Error::invalid_identifier(key.name()));
        }
        if let Some(existing) = self.keys.get_mut(key.name()) {
            if !replace {
                return Err(Error::duplicate(key.name()));
            }
            *existing = key;
            return Ok(());
        }
        self.keys.insert(key.name().to_string(), key);
        Ok(())
    }

    /// Removes a key, keeping the order of the remaining ones.
    ///
    /// Returns `true` if the key was present.
    pub fn remove(&mut self, key_name: &str) -> bool {
        self.keys.shift_remove(key_name).is_some()
    }

    /// Takes the name from a header line such as `[General]`.
    ///
    /// The trimmed line must be at least three characters long, start with `[`,
    /// and end with `]`. The text between the brackets is trimmed before use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the line is not shaped like a header and
    /// [`Error::InvalidIdentifier`] if the bracketed name is invalid.
    pub fn parse_name_line(&mut self, line: &str) -> Result<()> {
        self.parse_name_line_with(line, &IniOptions::default())
    }

    /// Like [`Section::parse_name_line`], honoring
    /// [`IniOptions::strict_headers`].
    ///
    /// # Errors
    ///
    /// See [`Section::parse_name_line`].
    pub fn parse_name_line_with(&mut self, line: &str, options: &IniOptions) -> Result<()> {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        let shaped = trimmed.chars().count() >= 3
            && chars.next() == Some('[')
            && (!options.strict_headers || trimmed.ends_with(']'));
        if !shaped {
            return Err(Error::syntax(0, "expected `[name]`", line));
        }

        // Drop the last character whatever it is; in strict mode it is `]`.
        chars.next_back();
        self.set_name(chars.as_str().trim())
    }

    /// Parses a `name = value` line and adds the key.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Key::parse_line`] and [`Section::add`].
    pub fn parse_key_line(&mut self, line: &str, replace: bool) -> Result<()> {
        let key = Key::parse_line(line)?;
        self.add(key, replace)
    }

    /// Renders the header followed by one `name = value` line per key.
    ///
    /// No trailing newline is written.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.serialize_as(self.name.as_deref().unwrap_or_default())
    }

    /// Renders the section under the name it is filed as.
    pub(crate) fn serialize_as(&self, name: &str) -> String {
        let mut output = String::with_capacity(16 + self.keys.len() * 24);
        output.push('[');
        output.push_str(name);
        output.push(']');
        for (name, key) in &self.keys {
            output.push('\n');
            output.push_str(name);
            output.push_str(" = ");
            output.push_str(key.value());
        }
        output
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Key> {
        self.keys.values()
    }

    /// Returns an iterator over the key names in insertion order.
    pub fn key_names(&self) -> indexmap::map::Keys<'_, String, Key> {
        self.keys.keys()
    }
}

/// Mutable access to a section stored in a [`Document`](crate::Document).
///
/// Keys can be added, removed and updated, but the section cannot be renamed
/// while it is filed under its current name.
#[derive(Debug)]
pub struct SectionMut<'a> {
    section: &'a mut Section,
}

impl<'a> SectionMut<'a> {
    pub(crate) fn new(section: &'a mut Section) -> Self {
        SectionMut { section }
    }

    /// See [`Section::add`].
    ///
    /// # Errors
    ///
    /// See [`Section::add`].
    pub fn add(&mut self, key: Key, replace: bool) -> Result<()> {
        self.section.add(key, replace)
    }

    /// See [`Section::remove`].
    pub fn remove(&mut self, key_name: &str) -> bool {
        self.section.remove(key_name)
    }

    /// See [`Section::set_value`].
    pub fn set_value(&mut self, key_name: &str, value: impl Into<String>) -> bool {
        self.section.set_value(key_name, value)
    }

    /// See [`Section::parse_key_line`].
    ///
    /// # Errors
    ///
    /// See [`Section::parse_key_line`].
    pub fn parse_key_line(&mut self, line: &str, replace: bool) -> Result<()> {
        self.section.parse_key_line(line, replace)
    }
}

impl std::ops::Deref for SectionMut<'_> {
    type Target = Section;

    fn deref(&self) -> &Section {
        self.section
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Key;
    type IntoIter = indexmap::map::Values<'a, String, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.values()
    }
}

impl IntoIterator for Section {
    type Item = Key;
    type IntoIter = indexmap::map::IntoValues<String, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_values()
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for (name, key) in &self.keys {
            map.serialize_entry(name, key.value())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct SectionVisitor;

        impl<'de> Visitor<'de> for SectionVisitor {
            type Value = Section;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of key names to string values")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut section = Section::default();
                while let Some((name, value)) = map.next_entry::<String, String>()? {
                    let mut key = Key::default();
                    key.set_name(&name).map_err(de::Error::custom)?;
                    key.set_value(value);
                    section.add(key, false).map_err(de::Error::custom)?;
                }
                Ok(section)
            }
        }

        deserializer.deserialize_map(SectionVisitor)
    }
}
