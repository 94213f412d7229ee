//! # inidoc
//!
//! An order-preserving document model for INI-style configuration files, with a
//! strict line parser and a round-trip serializer.
//!
//! ## The Format
//!
//! ```text
//! # comments start with `#` or `;`
//! [server]
//! host = localhost
//! port = 8080
//!
//! [features]
//! beta = true
//! ```
//!
//! - A section header is an identifier in brackets; whitespace inside the
//!   brackets is ignored.
//! - A key line is `name = value`. Both sides are trimmed and the value may be
//!   empty. Only the first `=` separates; later ones belong to the value.
//! - Identifiers start with a letter or `_` and continue with letters, digits,
//!   or `_`.
//! - Blank lines and comment lines are skipped anywhere. Comments are not kept.
//! - Every section except the last must have at least one key, and names are
//!   unique: a repeated section or key name is an error, not a merge.
//!
//! ## Key Features
//!
//! - **Order-preserving**: sections and keys serialize in insertion order, and
//!   replacing an entry keeps its position
//! - **All-or-nothing parsing**: the first malformed line fails the whole load,
//!   with its line number in the error
//! - **Typed reads**: values are stored as text and read as integers, floats, or
//!   booleans on demand, with format and range errors kept apart
//! - **Injected diagnostics**: the parser reports to a caller-supplied
//!   [`DiagnosticSink`]; the default forwards to `tracing`
//! - **Serde support**: a [`Document`] serializes as a map of maps
//!
//! ## Quick Start
//!
//! ```rust
//! use inidoc::{from_str, to_string, Key};
//!
//! let mut doc = from_str("[server]\nhost = localhost\nport = 8080\n").unwrap();
//!
//! let port = doc.get_key("server", "port").unwrap().to_u16().unwrap();
//! assert_eq!(port, 8080);
//!
//! doc.add_key("server", Key::new("port", "9090"), false, true).unwrap();
//! doc.add_key("client", Key::new("retries", "3"), true, false).unwrap();
//!
//! assert_eq!(
//!     to_string(&doc),
//!     "[server]\nhost = localhost\nport = 9090\n\n[client]\nretries = 3\n\n"
//! );
//! ```
//!
//! ## Building Documents with `ini!`
//!
//! ```rust
//! use inidoc::ini;
//!
//! let doc = ini! {
//!     "window" => { "width" => 800, "height" => 600 },
//! }
//! .unwrap();
//! assert_eq!(doc.get_key("window", "width").unwrap().value(), "800");
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: O(n) in the input size, one pass, one line at a time
//! - **Lookup**: O(1) average by section and key name
//! - **Serialization**: O(n) in the number of keys

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod ident;
pub mod key;
pub mod macros;
pub mod options;
pub mod parser;
pub mod section;
pub mod source;

pub use diagnostics::{DiagnosticSink, Level, NullSink, TracingSink};
pub use document::Document;
pub use error::{Error, Result};
pub use ident::is_valid_identifier;
pub use key::{FromKeyValue, Key};
pub use options::IniOptions;
pub use parser::Parser;
pub use section::{Section, SectionMut};
pub use source::{strip_path_quotes, FsLineSource, LineSource};

use std::io;

/// Parses a document from INI text.
///
/// # Examples
///
/// ```rust
/// use inidoc::from_str;
///
/// let doc = from_str("[A]\nk = v").unwrap();
/// assert_eq!(doc.get_key("A", "k").unwrap().value(), "v");
/// ```
///
/// # Errors
///
/// Returns an error if the text is empty or any line is malformed. The error
/// carries the number of the offending line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    Document::load_from_string(s)
}

/// Parses a document from a sequence of lines.
///
/// # Examples
///
/// ```rust
/// use inidoc::from_lines;
///
/// let doc = from_lines(["[A]", "k = v"]).unwrap();
/// assert!(doc.contains_key("A", "k"));
/// ```
///
/// # Errors
///
/// Returns the first parse error, or [`Error::EmptyInput`] if no section header
/// appears.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_lines<I, S>(lines: I) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Document::load_from_lines(lines)
}

/// Parses a document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use inidoc::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"[A]\nk = v\n")).unwrap();
/// assert!(doc.contains("A"));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the stream is not UTF-8, or the text does
/// not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Parses a document from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or the text does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Loads a document from a file, stripping one pair of quotes around the path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, and any parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file(path: &str) -> Result<Document> {
    Document::load_from_file(path)
}

/// Serializes a document to INI text.
#[must_use]
pub fn to_string(document: &Document) -> String {
    document.serialize()
}

/// Serializes a document to a writer.
///
/// # Examples
///
/// ```rust
/// use inidoc::{from_str, to_writer};
///
/// let doc = from_str("[A]\nk = v").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"[A]\nk = v\n\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    document.write_to(writer)
}

/// Writes a document to a file, replacing any existing content.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_file(path: &str, document: &Document) -> Result<()> {
    document.save_to_file(path)
}
