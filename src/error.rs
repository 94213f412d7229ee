//! Error types for INI parsing, mutation, and typed value conversion.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the single [`Error`] enum defined here.
//!
//! ## Error Categories
//!
//! - **Naming**: a section or key name failed identifier validation
//! - **Structure**: a line matched no grammar, a section had no keys, or a
//!   name collided with an existing one
//! - **Conversion**: a stored value could not be read as the requested type
//! - **I/O**: a line source could not be read or a document could not be written
//!
//! Errors produced while parsing carry the 1-based number of the offending line.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{from_str, Error};
//!
//! let err = from_str("[A]\nx=1\nx=2\n").unwrap_err();
//! assert!(matches!(err, Error::DuplicateName { line: Some(3), .. }));
//! assert!(err.to_string().contains("line 3"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A section or key name is not a valid identifier
    #[error("Invalid identifier `{0}`: expected a letter or `_` followed by letters, digits, or `_`")]
    InvalidIdentifier(String),

    /// A line matched neither the section header nor the key grammar
    #[error("Syntax error{}: {msg}\n  {context}", at_line_suffix(.line))]
    Syntax {
        line: usize,
        msg: String,
        context: String,
    },

    /// A section header was reached while the open section had no keys
    #[error("Empty section `{section}`{}: a section needs at least one key before the next header", at_line_suffix(.line))]
    EmptySection { line: usize, section: String },

    /// Insertion without replacement onto a name that already exists
    #[error("Duplicate name `{name}`{}", maybe_line_suffix(.line))]
    DuplicateName { name: String, line: Option<usize> },

    /// A key was added to a section that does not exist and may not be created
    #[error("No section named `{0}`")]
    MissingSection(String),

    /// The input held no section at all
    #[error("Input contains no sections")]
    EmptyInput,

    /// A value could not be parsed as the requested type
    #[error("Cannot read `{value}` as {target}: malformed text")]
    Format { value: String, target: &'static str },

    /// A value parsed but does not fit the requested type
    #[error("Cannot read `{value}` as {target}: out of range")]
    Range { value: String, target: &'static str },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn at_line_suffix(line: &usize) -> String {
    maybe_line_suffix(&Some(*line))
}

fn maybe_line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(0) | None => String::new(),
        Some(line) => format!(" at line {}", line),
    }
}

impl Error {
    /// Creates a syntax error for the given line.
    ///
    /// `context` is the offending line as it appeared in the input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Error;
    ///
    /// let err = Error::syntax(4, "expected a section header", "key = value");
    /// assert!(err.to_string().contains("line 4"));
    /// ```
    pub fn syntax(line: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(name: &str) -> Self {
        Error::InvalidIdentifier(name.to_string())
    }

    /// Creates a duplicate name error with no line information.
    pub fn duplicate(name: &str) -> Self {
        Error::DuplicateName {
            name: name.to_string(),
            line: None,
        }
    }

    /// Creates an empty section error.
    pub fn empty_section(line: usize, section: &str) -> Self {
        Error::EmptySection {
            line,
            section: section.to_string(),
        }
    }

    /// Creates a conversion error for malformed text.
    pub fn format(value: &str, target: &'static str) -> Self {
        Error::Format {
            value: value.to_string(),
            target,
        }
    }

    /// Creates a conversion error for an out-of-range value.
    pub fn range(value: &str, target: &'static str) -> Self {
        Error::Range {
            value: value.to_string(),
            target,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Attaches a line number to errors raised below the parser.
    ///
    /// Syntax errors created outside the parser carry line `0`; duplicate names
    /// carry no line at all. Other variants pass through unchanged.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Error::Syntax { msg, context, .. } => Error::Syntax { line, msg, context },
            Error::DuplicateName { name, .. } => Error::DuplicateName {
                name,
                line: Some(line),
            },
            other => other,
        }
    }

    /// Returns the 1-based input line this error refers to, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } | Error::EmptySection { line, .. } if *line > 0 => {
                Some(*line)
            }
            Error::DuplicateName { line, .. } => *line,
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_fills_in_location() {
        let err = Error::syntax(0, "missing `=`", "oops").at_line(7);
        assert_eq!(err.line(), Some(7));
        assert!(err.to_string().contains("line 7"));

        let err = Error::duplicate("x").at_line(3);
        assert_eq!(
            err,
            Error::DuplicateName {
                name: "x".to_string(),
                line: Some(3)
            }
        );
    }

    #[test]
    fn test_line_is_absent_outside_parser() {
        assert_eq!(Error::syntax(0, "missing `=`", "oops").line(), None);
        assert_eq!(Error::duplicate("x").line(), None);
        assert_eq!(Error::EmptyInput.line(), None);
        assert!(!Error::duplicate("x").to_string().contains("line"));
    }

    #[test]
    fn test_conversion_messages() {
        let err = Error::format("abc", "i32");
        assert_eq!(err.to_string(), "Cannot read `abc` as i32: malformed text");
        let err = Error::range("300", "u8");
        assert_eq!(err.to_string(), "Cannot read `300` as u8: out of range");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(ref msg) if msg.contains("no such file")));
    }
}
