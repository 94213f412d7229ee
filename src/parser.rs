//! Line-driven INI parsing.
//!
//! The [`Parser`] consumes one line at a time and is in one of two states:
//! waiting for the first section header, or filling an open section. An open
//! section lives in the parser until the next header (or the end of input)
//! closes it, and only then is committed to the [`Document`]. The first error
//! aborts the whole parse.
//!
//! Most callers go through [`Document::load_from_string`] or
//! [`from_str`](crate::from_str) rather than using the parser directly.

use crate::diagnostics::{DiagnosticSink, Level};
use crate::{Document, Error, IniOptions, Key, Result, Section};

enum State {
    AwaitingSection,
    InSection(Section),
}

/// Builds a [`Document`] from a sequence of lines.
///
/// # Examples
///
/// ```rust
/// use inidoc::{IniOptions, NullSink, Parser};
///
/// let options = IniOptions::default();
/// let mut parser = Parser::new(&options, &NullSink);
/// parser.feed("[A]").unwrap();
/// parser.feed("k = v").unwrap();
/// let doc = parser.finish().unwrap();
/// assert_eq!(doc.get_key("A", "k").unwrap().value(), "v");
/// ```
pub struct Parser<'a> {
    options: &'a IniOptions,
    sink: &'a dyn DiagnosticSink,
    document: Document,
    state: State,
    line: usize,
    failed: Option<Error>,
}

impl<'a> Parser<'a> {
    pub fn new(options: &'a IniOptions, sink: &'a dyn DiagnosticSink) -> Self {
        Parser {
            options,
            sink,
            document: Document::new(),
            state: State::AwaitingSection,
            line: 0,
            failed: None,
        }
    }

    /// Parses every line and returns the finished document.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Parser::feed`] or [`Parser::finish`].
    pub fn parse<I, S>(mut self, lines: I) -> Result<Document>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed(line.as_ref())?;
        }
        self.finish()
    }

    /// Processes the next line of input.
    ///
    /// Once a line fails, every later call to `feed` or [`Parser::finish`]
    /// returns that same error.
    ///
    /// # Errors
    ///
    /// - [`Error::Syntax`] if the line is neither a header, a key, nor a comment
    ///   where one of those is expected
    /// - [`Error::DuplicateName`] if a key repeats within its section, or a
    ///   closed section's name is already in the document
    /// - [`Error::EmptySection`] if a header closes a section with no keys
    pub fn feed(&mut self, line: &str) -> Result<()> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        self.line += 1;
        let result = self.step(line);
        if let Err(err) = &result {
            self.sink.notify(Level::Error, &err.to_string());
            self.failed = Some(err.clone());
        }
        result
    }

    /// Commits the open section and returns the document.
    ///
    /// # Errors
    ///
    /// Returns the error of an earlier failed [`Parser::feed`],
    /// [`Error::EmptyInput`] if no header was ever seen, and
    /// [`Error::DuplicateName`] if the last section's name is already taken.
    pub fn finish(mut self) -> Result<Document> {
        if let Some(err) = self.failed.take() {
            return Err(err);
        }
        let result = match std::mem::replace(&mut self.state, State::AwaitingSection) {
            State::AwaitingSection => Err(Error::EmptyInput),
            State::InSection(section) => self.commit(section),
        };
        match result {
            Ok(()) => {
                self.sink.notify(
                    Level::Debug,
                    &format!(
                        "parsed {} section(s) from {} line(s)",
                        self.document.len(),
                        self.line
                    ),
                );
                Ok(self.document)
            }
            Err(err) => {
                self.sink.notify(Level::Error, &err.to_string());
                Err(err)
            }
        }
    }

    fn step(&mut self, line: &str) -> Result<()> {
        if self.options.is_comment(line) {
            self.sink
                .notify(Level::Trace, &format!("line {}: skipped", self.line));
            return Ok(());
        }

        match std::mem::replace(&mut self.state, State::AwaitingSection) {
            State::AwaitingSection => {
                let Some(section) = Section::from_line_with(line, self.options) else {
                    return Err(Error::syntax(self.line, "expected a section header", line));
                };
                self.open(section);
                Ok(())
            }
            State::InSection(mut current) => {
                if let Ok(key) = Key::parse_line(line) {
                    current.add(key, false).map_err(|e| e.at_line(self.line))?;
                    self.state = State::InSection(current);
                    return Ok(());
                }

                let Some(next) = Section::from_line_with(line, self.options) else {
                    return Err(Error::syntax(
                        self.line,
                        "expected a key or a section header",
                        line,
                    ));
                };
                if current.is_empty() {
                    return Err(Error::empty_section(
                        self.line,
                        current.name().unwrap_or_default(),
                    ));
                }
                self.commit(current)?;
                self.open(next);
                Ok(())
            }
        }
    }

    fn open(&mut self, section: Section) {
        self.sink.notify(
            Level::Trace,
            &format!(
                "line {}: opened section `{}`",
                self.line,
                section.name().unwrap_or_default()
            ),
        );
        self.state = State::InSection(section);
    }

    fn commit(&mut self, section: Section) -> Result<()> {
        self.document
            .add(section, false)
            .map_err(|e| e.at_line(self.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;
    use std::cell::RefCell;

    fn parse(lines: &[&str]) -> Result<Document> {
        Parser::new(&IniOptions::default(), &NullSink).parse(lines.iter().copied())
    }

    #[test]
    fn test_single_section() {
        let doc = parse(&["[A]", "x = 1", "y = 2"]).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("A").unwrap().len(), 2);
    }

    #[test]
    fn test_first_line_must_be_header() {
        let err = parse(&["x = 1", "[A]"]).unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_comments_before_first_header() {
        let doc = parse(&["", "# one", "; two", "  ", "[A]", "k = v"]).unwrap();
        assert!(doc.contains_key("A", "k"));
    }

    #[test]
    fn test_no_lines_is_empty_input() {
        assert_eq!(parse(&[]).unwrap_err(), Error::EmptyInput);
        assert_eq!(parse(&["# only", ""]).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_trailing_empty_section_is_committed() {
        let doc = parse(&["[A]", "k = v", "[B]"]).unwrap();
        assert!(doc.contains("B"));
        assert!(doc.get("B").unwrap().is_empty());
    }

    #[test]
    fn test_empty_section_before_header() {
        let err = parse(&["[A]", "[B]", "k = 1"]).unwrap_err();
        assert_eq!(err, Error::empty_section(2, "A"));
    }

    #[test]
    fn test_duplicate_key_reports_line() {
        let err = parse(&["[A]", "x=1", "x=2"]).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateName {
                name: "x".to_string(),
                line: Some(3)
            }
        );
    }

    #[test]
    fn test_duplicate_section_midway_and_at_end() {
        let err = parse(&["[A]", "x=1", "[A]", "y=2", "[B]", "z=3"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { line: Some(5), .. }));

        let err = parse(&["[A]", "x=1", "[A]", "y=2"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_garbage_inside_section() {
        let err = parse(&["[A]", "x=1", "what is this"]).unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 3, .. }));

        let err = parse(&["[A]", "bad name = 1"]).unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_key_takes_precedence_over_header() {
        let doc = parse(&["[A]", "k = [x]", "[x]", "y = 1"]).unwrap();
        assert_eq!(doc.get_key("A", "k").unwrap().value(), "[x]");
        assert!(doc.contains_key("x", "y"));
    }

    #[test]
    fn test_feed_after_error_stays_failed() {
        let options = IniOptions::default();
        let mut parser = Parser::new(&options, &NullSink);
        parser.feed("[A]").unwrap();
        parser.feed("k = 1").unwrap();
        let err = parser.feed("garbage line").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 3, .. }));

        assert_eq!(parser.feed("[B]"), Err(err.clone()));
        assert_eq!(parser.feed("z = 9"), Err(err.clone()));
        assert_eq!(parser.finish(), Err(err));
    }

    #[test]
    fn test_finish_after_error_on_header() {
        let options = IniOptions::default();
        let mut parser = Parser::new(&options, &NullSink);
        parser.feed("[A]").unwrap();
        assert!(parser.feed("[B]").is_err());
        assert_eq!(parser.finish(), Err(Error::empty_section(2, "A")));
    }

    #[test]
    fn test_sink_sees_skips_and_failure() {
        let seen = RefCell::new(Vec::new());
        let sink = |level: Level, message: &str| seen.borrow_mut().push((level, message.to_string()));
        let options = IniOptions::default();

        let result = Parser::new(&options, &sink).parse(["; c", "[A]", "nonsense"]);
        assert!(result.is_err());

        let seen = seen.borrow();
        assert!(seen.iter().any(|(l, m)| *l == Level::Trace && m.contains("line 1")));
        let (level, message) = seen.last().unwrap();
        assert_eq!(*level, Level::Error);
        assert!(message.contains("line 3"));
    }

    #[test]
    fn test_sink_does_not_change_outcome() {
        let options = IniOptions::default();
        let lines = ["[A]", "k = v", "[B]", "z = 9"];
        let quiet = Parser::new(&options, &NullSink).parse(lines).unwrap();
        let noisy = Parser::new(&options, &crate::TracingSink).parse(lines).unwrap();
        assert_eq!(quiet, noisy);
    }
}
