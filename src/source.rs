//! Where lines come from.
//!
//! The parser never touches the filesystem itself. File loading goes through a
//! [`LineSource`], which turns a path into lines; [`FsLineSource`] is the
//! standard implementation.

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Reads a file as a sequence of lines.
pub trait LineSource {
    /// Returns the lines of the file at `path`, without line terminators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path does not exist or cannot be read.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads lines from the local filesystem.
///
/// The file must be UTF-8. A leading byte order mark is skipped, and `\r\n`,
/// `\r`, and `\n` all end a line.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLineSource;

impl LineSource for FsLineSource {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(Error::io(&format!("{}: no such file", path.display())));
        }
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
        Ok(split_lines(strip_bom(&text)).map(str::to_string).collect())
    }
}

/// Removes one pair of matching surrounding quotes from a path.
///
/// Paths pasted from shells and file managers often arrive as `"C:\My Files\a.ini"`.
///
/// # Examples
///
/// ```rust
/// use inidoc::strip_path_quotes;
///
/// assert_eq!(strip_path_quotes("\"my file.ini\""), "my file.ini");
/// assert_eq!(strip_path_quotes("'a.ini'"), "a.ini");
/// assert_eq!(strip_path_quotes("\"unbalanced.ini"), "\"unbalanced.ini");
/// assert_eq!(strip_path_quotes("\"\"x.ini\"\""), "\"x.ini\"");
/// ```
#[must_use]
pub fn strip_path_quotes(path: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = path
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    path
}

pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Splits text into lines, treating `\r\n`, bare `\r`, and `\n` alike.
///
/// A trailing line break does not produce an extra empty line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text).filter(|t| !t.is_empty());
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(end) => {
                let skip = if current[end..].starts_with("\r\n") { 2 } else { 1 };
                let tail = &current[end + skip..];
                rest = Some(tail).filter(|t| !t.is_empty());
                Some(&current[..end])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}
