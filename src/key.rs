//! Named values within a section.
//!
//! A [`Key`] is a `name = value` pair. Values are always stored as text; the
//! typed readers ([`Key::to_i32`], [`Key::to_bool`], ...) interpret that text on
//! demand and report malformed or out-of-range input as errors instead of
//! substituting a default.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::Key;
//!
//! let key = Key::parse_line("port = 8080").unwrap();
//! assert_eq!(key.name(), "port");
//! assert_eq!(key.to_u16().unwrap(), 8080);
//! assert_eq!(key.serialize(), "port = 8080");
//! ```

use crate::{is_valid_identifier, Error, Result};
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};

/// A single `name = value` entry.
///
/// The name is either a valid identifier or empty. An empty name only arises
/// from [`Key::new`] with an invalid name or from [`Key::default`]; such a key is
/// rejected when added to a [`Section`](crate::Section).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Key {
    name: String,
    value: String,
}

impl Key {
    /// Creates a key, leaving the name empty when `name` is not a valid identifier.
    ///
    /// Construction never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Key;
    ///
    /// assert_eq!(Key::new("timeout", "30").name(), "timeout");
    /// assert_eq!(Key::new("not valid", "30").name(), "");
    /// ```
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        let name = if is_valid_identifier(name) {
            name.to_string()
        } else {
            String::new()
        };
        Key {
            name,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renames the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] and leaves the key untouched if `name`
    /// is not a valid identifier.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if !is_valid_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Consumes the key, returning its value.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Parses a `name = value` line.
    ///
    /// The line is split on its first `=`. Both halves are trimmed; an empty right
    /// half yields an empty value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the line has no `=`, and
    /// [`Error::InvalidIdentifier`] if the left half is not a valid name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Key;
    ///
    /// let key = Key::parse_line("  url = http://host/?a=b  ").unwrap();
    /// assert_eq!(key.value(), "http://host/?a=b");
    ///
    /// assert!(Key::parse_line("no separator").is_err());
    /// assert!(Key::parse_line("bad name = 1").is_err());
    /// ```
    pub fn parse_line(line: &str) -> Result<Self> {
        let Some((name, value)) = line.trim().split_once('=') else {
            return Err(Error::syntax(0, "expected `name = value`", line));
        };

        let mut key = Key::default();
        key.set_name(name.trim())?;
        key.value = value.trim().to_string();
        Ok(key)
    }

    /// Renders the key as `name = value`.
    ///
    /// The value field is always written, even when empty.
    #[must_use]
    pub fn serialize(&self) -> String {
        format!("{} = {}", self.name, self.value)
    }

    /// Reads the value as any type implementing [`FromKeyValue`].
    ///
    /// # Errors
    ///
    /// Propagates the conversion error of the target type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Key;
    ///
    /// let key = Key::new("ratio", "0.75");
    /// let ratio: f64 = key.parse().unwrap();
    /// assert_eq!(ratio, 0.75);
    /// ```
    pub fn parse<T: FromKeyValue>(&self) -> Result<T> {
        T::from_key_value(&self.value)
    }

    /// Reads the value as a boolean.
    ///
    /// `true` and `false` are matched case-insensitively. Any other text is read
    /// as an `i32`, where non-zero means `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the value is neither a boolean word nor an
    /// `i32`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Key;
    ///
    /// assert!(Key::new("a", "TRUE").to_bool().unwrap());
    /// assert!(Key::new("a", "1").to_bool().unwrap());
    /// assert!(!Key::new("a", "0").to_bool().unwrap());
    /// assert!(Key::new("a", "nope").to_bool().is_err());
    /// ```
    pub fn to_bool(&self) -> Result<bool> {
        self.parse()
    }
}

macro_rules! typed_readers {
    ($($method:ident => $ty:ty),* $(,)?) => {
        impl Key {
            $(
                #[doc = concat!("Reads the value as `", stringify!($ty), "`.")]
                ///
                /// # Errors
                ///
                /// Returns [`Error::Format`] for malformed text and
                /// [`Error::Range`] when the number does not fit.
                pub fn $method(&self) -> Result<$ty> {
                    self.parse()
                }
            )*
        }
    };
}

typed_readers! {
    to_i64 => i64,
    to_u64 => u64,
    to_i32 => i32,
    to_u32 => u32,
    to_i16 => i16,
    to_u16 => u16,
    to_i8 => i8,
    to_u8 => u8,
    to_f32 => f32,
    to_f64 => f64,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Conversion from a stored value's text into a typed value.
///
/// Implemented for the primitive integer and float types and for `bool`.
pub trait FromKeyValue: Sized {
    /// Parses `text`, which is the raw stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] or [`Error::Range`].
    fn from_key_value(text: &str) -> Result<Self>;
}

fn int_error(value: &str, target: &'static str, err: &ParseIntError) -> Error {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::range(value, target),
        // `-1` read as unsigned is out of range, not malformed.
        IntErrorKind::InvalidDigit if is_negative_integer(value.trim()) => {
            Error::range(value, target)
        }
        _ => Error::format(value, target),
    }
}

fn is_negative_integer(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_negative_zero(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b == b'0'))
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! int_from_key_value {
    ($($ty:ty),*) => {
        $(
            impl FromKeyValue for $ty {
                fn from_key_value(text: &str) -> Result<Self> {
                    let trimmed = text.trim();
                    trimmed.parse::<$ty>().or_else(|e| {
                        // Unsigned parsers reject any sign, but `-0` is still zero.
                        if is_negative_zero(trimmed) {
                            Ok(0)
                        } else {
                            Err(int_error(text, stringify!($ty), &e))
                        }
                    })
                }
            }
        )*
    };
}

macro_rules! float_from_key_value {
    ($($ty:ty),*) => {
        $(
            impl FromKeyValue for $ty {
                fn from_key_value(text: &str) -> Result<Self> {
                    let trimmed = text.trim();
                    let parsed = trimmed
                        .parse::<$ty>()
                        .map_err(|_| Error::format(text, stringify!($ty)))?;
                    if parsed.is_infinite() && !names_infinity(trimmed) {
                        return Err(Error::range(text, stringify!($ty)));
                    }
                    Ok(parsed)
                }
            }
        )*
    };
}

int_from_key_value!(i8, i16, i32, i64, u8, u16, u32, u64);
float_from_key_value!(f32, f64);

impl FromKeyValue for bool {
    fn from_key_value(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Ok(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Ok(false);
        }
        trimmed
            .parse::<i32>()
            .map(|n| n != 0)
            .map_err(|_| Error::format(text, "bool"))
    }
}

impl FromKeyValue for String {
    fn from_key_value(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}
