//! Configuration options for INI parsing.
//!
//! [`IniOptions`] controls which lines count as comments and how strictly
//! section headers are checked. The defaults match the format accepted by
//! [`from_str`](crate::from_str).
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{Document, IniOptions, NullSink};
//!
//! // Only `#` starts a comment
//! let options = IniOptions::new().with_comment_prefixes(['#']);
//! let doc = Document::load_from_string_with("# note\n[A]\nk = v\n", &options, &NullSink).unwrap();
//! assert!(doc.contains("A"));
//!
//! // Accept headers that lack their closing bracket
//! let options = IniOptions::permissive_headers();
//! let doc = Document::load_from_string_with("[Loose\nk = v\n", &options, &NullSink).unwrap();
//! assert!(doc.contains("Loos"));
//! ```

/// Parser configuration.
///
/// # Examples
///
/// ```rust
/// use inidoc::IniOptions;
///
/// let options = IniOptions::new();
/// assert_eq!(options.comment_prefixes, vec!['#', ';']);
/// assert!(options.strict_headers);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniOptions {
    /// Characters that start a comment line once leading whitespace is trimmed.
    pub comment_prefixes: Vec<char>,
    /// Require a section header to end with `]`.
    ///
    /// When disabled, any trimmed line of three or more characters that starts
    /// with `[` is a header and its last character is dropped, whatever it is.
    pub strict_headers: bool,
}

impl Default for IniOptions {
    fn default() -> Self {
        IniOptions {
            comment_prefixes: vec!['#', ';'],
            strict_headers: true,
        }
    }
}

impl IniOptions {
    /// Creates default options (`#` and `;` comments, strict headers).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that accept headers without a closing bracket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::IniOptions;
    ///
    /// assert!(!IniOptions::permissive_headers().strict_headers);
    /// ```
    #[must_use]
    pub fn permissive_headers() -> Self {
        IniOptions {
            strict_headers: false,
            ..Default::default()
        }
    }

    /// Replaces the set of comment prefix characters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::IniOptions;
    ///
    /// let options = IniOptions::new().with_comment_prefixes(['!']);
    /// assert!(options.is_comment("! hello"));
    /// assert!(!options.is_comment("# hello"));
    /// ```
    #[must_use]
    pub fn with_comment_prefixes(mut self, prefixes: impl IntoIterator<Item = char>) -> Self {
        self.comment_prefixes = prefixes.into_iter().collect();
        self
    }

    /// Sets whether section headers must end with `]`.
    #[must_use]
    pub fn with_strict_headers(mut self, strict: bool) -> Self {
        self.strict_headers = strict;
        self
    }

    /// Returns `true` if `line` is blank or a comment under these options.
    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        match line.trim().chars().next() {
            None => true,
            Some(first) => self.comment_prefixes.contains(&first),
        }
    }
}
