// Manifest Stream - streaming Cargo manifest metadata parser
//
// Copyright (c) 2025 the manifest-stream contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Streaming parser implementation.
//!
//! The parser processes a manifest one line at a time, holding only the
//! current line and the active table name in memory. It understands exactly
//! two line shapes, matching the subset of TOML that Cargo build wrappers
//! need to read:
//!
//! - `[table]` headers, which set the prefix for subsequent keys;
//! - `key = "value"` / `key = 'value'` pairs, whose values must be quoted.
//!
//! Any other non-blank line terminates the parse. That includes comments:
//! the first `#` line ends the stream rather than being skipped. This
//! terminate-on-first-unrecognized-line behavior is the documented contract
//! of the format, and consumers rely on it to stop at the first section
//! they do not understand.
//!
//! Values receive no escape processing; the value is the text strictly
//! between the first and last occurrence of the matching quote, so an
//! embedded quote of the same kind extends rather than ends the value.
//!
//! # Basic usage
//!
//! ```rust
//! use manifest_stream::ManifestParser;
//!
//! let input = r#"
//! [package]
//! name = "hello-rust"
//! version = "0.1.0"
//! "#;
//!
//! let mut parser = ManifestParser::from_text(input);
//! (&mut parser)
//!     .for_each(|entry| println!("{} = {}", entry.key, entry.value))
//!     .unwrap();
//! ```

use crate::error::{ParseError, ParseResult};
use crate::event::{Entry, ManifestEvent};
use crate::reader::LineSource;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Streaming manifest parser.
///
/// Owns its line source exclusively and releases it exactly once, either on
/// [`close()`](Self::close) or on drop. One instance is single-threaded and
/// synchronous; each call blocks until a line is available or the source is
/// exhausted.
///
/// # State machine
///
/// ```text
/// Ready(table) --[header]------> Ready(table')   TableHeader yielded
/// Ready(table) --[quoted pair]-> Ready(table)    Pair yielded
/// Ready(table) --[other/EOF]---> Terminated      table cleared, End yielded
/// Terminated   --[any call]----> Terminated      End yielded again
/// ```
///
/// `Terminated` is absorbing: calling [`read()`](Self::read) after the
/// sentinel keeps yielding [`ManifestEvent::End`] without touching the
/// source. Malformed-entry and I/O errors are fatal to the instance and
/// move it to `Terminated` as well.
///
/// # Iterator interface
///
/// `ManifestParser` implements `Iterator<Item = ParseResult<Entry>>`,
/// yielding only the pairs:
///
/// ```rust
/// use manifest_stream::ManifestParser;
///
/// let parser = ManifestParser::from_text("[t]\nb = 'v2'");
/// let keys: Vec<_> = parser
///     .filter_map(|e| e.ok())
///     .map(|entry| entry.key)
///     .collect();
/// assert_eq!(keys, vec!["t.b"]);
/// ```
pub struct ManifestParser<R: Read> {
    /// `None` once the source has been released by `close()`.
    source: Option<LineSource<R>>,
    table: Option<String>,
    finished: bool,
}

impl<R: Read> ManifestParser<R> {
    /// Create a parser over any `Read` source.
    pub fn new(reader: R) -> Self {
        Self {
            source: Some(LineSource::new(reader)),
            table: None,
            finished: false,
        }
    }

    /// Create a parser with a specific read buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            source: Some(LineSource::with_capacity(reader, capacity)),
            table: None,
            finished: false,
        }
    }

    /// The active table name, if a header has been seen and the stream has
    /// not terminated.
    #[inline]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Parse the next event from the stream.
    ///
    /// This is the lowest-level operation: it yields one event per line,
    /// including [`ManifestEvent::TableHeader`] for header lines. Most
    /// callers want [`read()`](Self::read) or [`for_each()`](Self::for_each)
    /// instead.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Closed`] if [`close()`](Self::close) was called;
    /// - [`ParseError::Io`] if the underlying read fails;
    /// - [`ParseError::Malformed`] for a header without `]`, an
    ///   unterminated quoted string, or a quoted value with no `=`
    ///   separator.
    ///
    /// After an `Io` or `Malformed` error the instance is terminated and
    /// subsequent calls yield `End`.
    pub fn next_event(&mut self) -> ParseResult<ManifestEvent> {
        if self.source.is_none() {
            return Err(ParseError::Closed);
        }
        if self.finished {
            return Ok(ManifestEvent::End);
        }

        match self.step() {
            Ok(event) => Ok(event),
            Err(e) => {
                // Errors are fatal for this instance; no retry.
                self.terminate();
                Err(e)
            }
        }
    }

    /// Return the next entry, skipping table headers.
    ///
    /// Yields [`ManifestEvent::Pair`] or the [`ManifestEvent::End`]
    /// sentinel, never `TableHeader`. A hard I/O failure is an explicit
    /// `Err`, distinct from normal termination.
    pub fn read(&mut self) -> ParseResult<ManifestEvent> {
        loop {
            match self.next_event()? {
                ManifestEvent::TableHeader { .. } => continue,
                event => return Ok(event),
            }
        }
    }

    /// Invoke `visit` on every remaining entry until the stream ends.
    ///
    /// The sentinel itself is never passed to `visit`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use manifest_stream::ManifestParser;
    ///
    /// let mut parser = ManifestParser::from_text("[package]\nname = \"demo\"");
    /// let mut entries = Vec::new();
    /// (&mut parser).for_each(|entry| entries.push(entry)).unwrap();
    ///
    /// assert_eq!(entries.len(), 1);
    /// assert_eq!(entries[0].key, "package.name");
    /// ```
    pub fn for_each<F>(&mut self, mut visit: F) -> ParseResult<()>
    where
        F: FnMut(Entry),
    {
        loop {
            match self.read()? {
                ManifestEvent::Pair(entry) => visit(entry),
                _ => return Ok(()),
            }
        }
    }

    /// Release the underlying source.
    ///
    /// Idempotent. Any parsing call after `close()` fails with
    /// [`ParseError::Closed`]. Dropping the parser releases the source as
    /// well, so calling this is only needed to free the resource early.
    pub fn close(&mut self) {
        self.source = None;
        self.table = None;
    }

    fn step(&mut self) -> ParseResult<ManifestEvent> {
        let source = self.source.as_mut().ok_or(ParseError::Closed)?;

        let (line_num, line) = match source.next_line()? {
            Some(next) => next,
            None => return Ok(self.terminate()),
        };

        // A line starting with '[' is a table header; the name is the text
        // up to the first ']', with no further validation.
        if let Some(rest) = line.strip_prefix('[') {
            let end = rest
                .find(']')
                .ok_or_else(|| ParseError::malformed(line_num, "table header is missing ']'"))?;
            let name = rest[..end].to_string();
            self.table = Some(name.clone());
            return Ok(ManifestEvent::TableHeader {
                name,
                line: line_num,
            });
        }

        self.parse_pair(line_num, &line)
    }

    fn parse_pair(&mut self, line_num: usize, line: &str) -> ParseResult<ManifestEvent> {
        let sep = line.find('=');

        // A leading '=' was never a pair in the original format.
        if sep == Some(0) {
            return Ok(self.terminate());
        }

        // Inherited index arithmetic: with no separator present the whole
        // line is examined as the candidate value.
        let candidate = match sep {
            Some(pos) => line[pos + 1..].trim(),
            None => line,
        };

        let quote = if candidate.starts_with('"') {
            '"'
        } else if candidate.starts_with('\'') {
            '\''
        } else {
            // Not a quoted pair. Unrecognized lines terminate the whole
            // parse; they do not get skipped.
            return Ok(self.terminate());
        };

        let sep = sep.ok_or_else(|| {
            ParseError::malformed(line_num, "quoted value is missing the '=' separator")
        })?;

        // Value is strictly between the first and last occurrence of the
        // matching quote. No escape handling.
        let close = match candidate.rfind(quote) {
            Some(pos) if pos > 0 => pos,
            _ => {
                return Err(ParseError::malformed(
                    line_num,
                    format!("unterminated {quote}-quoted string"),
                ));
            }
        };
        let value = candidate[1..close].to_string();

        let name = line[..sep].trim();
        let key = match &self.table {
            Some(table) => format!("{table}.{name}"),
            None => name.to_string(),
        };

        Ok(ManifestEvent::Pair(Entry {
            key,
            value,
            line: line_num,
        }))
    }

    fn terminate(&mut self) -> ManifestEvent {
        self.table = None;
        self.finished = true;
        ManifestEvent::End
    }
}

impl ManifestParser<File> {
    /// Open a manifest file for parsing.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use manifest_stream::ManifestParser;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut parser = ManifestParser::open("Cargo.toml")?;
    /// (&mut parser).for_each(|entry| println!("{}", entry.key))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> ParseResult<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl ManifestParser<Cursor<String>> {
    /// Create a parser over literal manifest text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Cursor::new(text.into()))
    }
}

impl<R: Read> Iterator for ManifestParser<R> {
    type Item = ParseResult<Entry>;

    /// Yields the remaining entries; table headers are skipped. Ends after
    /// the sentinel, after one yielded error, or immediately on a closed
    /// parser.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read() {
            Ok(ManifestEvent::Pair(entry)) => Some(Ok(entry)),
            Ok(_) => None,
            Err(ParseError::Closed) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_entries(input: &str) -> Vec<(String, String)> {
        let mut parser = ManifestParser::from_text(input);
        let mut out = Vec::new();
        (&mut parser)
            .for_each(|entry| out.push((entry.key, entry.value)))
            .unwrap();
        out
    }

    // ==================== Pair recognition tests ====================

    #[test]
    fn test_single_double_quoted_pair() {
        let entries = collect_entries("a = \"v1\"\n");
        assert_eq!(entries, vec![("a".to_string(), "v1".to_string())]);
    }

    #[test]
    fn test_single_quoted_pair_with_table() {
        let entries = collect_entries("[t]\nb = 'v2'");
        assert_eq!(entries, vec![("t.b".to_string(), "v2".to_string())]);
    }

    #[test]
    fn test_two_tables() {
        let entries = collect_entries("[t]\nb = \"v2\"\n[u]\nc = \"v3\"");
        assert_eq!(
            entries,
            vec![
                ("t.b".to_string(), "v2".to_string()),
                ("u.c".to_string(), "v3".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_before_any_table_is_unqualified() {
        let entries = collect_entries("a = \"1\"\n[t]\nb = \"2\"");
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), "1".to_string()),
                ("t.b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_and_value_whitespace_trimmed() {
        let entries = collect_entries("  spaced   =   \"v\"  ");
        assert_eq!(entries, vec![("spaced".to_string(), "v".to_string())]);
    }

    #[test]
    fn test_other_quote_kind_embedded() {
        let entries = collect_entries("a = \"it's fine\"");
        assert_eq!(entries[0].1, "it's fine");
    }

    #[test]
    fn test_value_spans_to_last_quote() {
        // No escape handling: the value runs to the LAST matching quote.
        let entries = collect_entries("a = \"v\" trailing \"x\"");
        assert_eq!(entries[0].1, "v\" trailing \"x");
    }

    #[test]
    fn test_blank_lines_do_not_reset_table() {
        let entries = collect_entries("[t]\n\n\n   \nb = \"v\"");
        assert_eq!(entries, vec![("t.b".to_string(), "v".to_string())]);
    }

    #[test]
    fn test_entry_line_numbers() {
        let mut parser = ManifestParser::from_text("\n[t]\n\nb = \"v\"");
        let event = parser.read().unwrap();
        let entry = event.as_pair().unwrap();
        assert_eq!(entry.line, 4);
    }

    // ==================== Table header tests ====================

    #[test]
    fn test_table_header_event() {
        let mut parser = ManifestParser::from_text("[dependencies]\nserde = \"1\"");
        match parser.next_event().unwrap() {
            ManifestEvent::TableHeader { name, line } => {
                assert_eq!(name, "dependencies");
                assert_eq!(line, 1);
            }
            other => panic!("expected TableHeader, got {:?}", other),
        }
        assert_eq!(parser.table(), Some("dependencies"));
    }

    #[test]
    fn test_header_name_stops_at_first_bracket() {
        let mut parser = ManifestParser::from_text("[a]b]\nk = \"v\"");
        match parser.next_event().unwrap() {
            ManifestEvent::TableHeader { name, .. } => assert_eq!(name, "a"),
            other => panic!("expected TableHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_header_does_not_emit_entry_from_read() {
        let mut parser = ManifestParser::from_text("[t]\nb = \"v\"");
        // read() skips the header and goes straight to the pair.
        let event = parser.read().unwrap();
        assert_eq!(event.as_pair().unwrap().key, "t.b");
    }

    #[test]
    fn test_empty_table_name() {
        let entries = collect_entries("[]\nk = \"v\"");
        assert_eq!(entries, vec![(".k".to_string(), "v".to_string())]);
    }

    // ==================== Termination tests ====================

    #[test]
    fn test_comment_line_terminates() {
        // Regression test: the first unrecognized line (here a comment)
        // ends the whole parse instead of being skipped.
        let entries = collect_entries("a = \"v1\"\n# a comment\nb = \"v2\"");
        assert_eq!(entries, vec![("a".to_string(), "v1".to_string())]);
    }

    #[test]
    fn test_unquoted_value_terminates() {
        let entries = collect_entries("a = \"v\"\nn = 42\nb = \"w\"");
        assert_eq!(entries, vec![("a".to_string(), "v".to_string())]);
    }

    #[test]
    fn test_array_value_terminates() {
        let entries = collect_entries("crate-type = [\"cdylib\"]");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_leading_equals_terminates() {
        let entries = collect_entries("= \"v\"");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_line_without_separator_terminates() {
        let entries = collect_entries("no separator here");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_input_yields_end() {
        let mut parser = ManifestParser::from_text("");
        assert!(parser.read().unwrap().is_end());
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut parser = ManifestParser::from_text("a = \"v\"");
        assert!(parser.read().unwrap().is_pair());
        assert!(parser.read().unwrap().is_end());
        assert!(parser.read().unwrap().is_end());
        assert!(parser.next_event().unwrap().is_end());
    }

    #[test]
    fn test_table_cleared_on_termination() {
        let mut parser = ManifestParser::from_text("[t]\nb = \"v\"");
        while !parser.read().unwrap().is_end() {}
        assert_eq!(parser.table(), None);
    }

    // ==================== Malformed entry tests ====================

    #[test]
    fn test_header_missing_bracket() {
        let mut parser = ManifestParser::from_text("[broken\nk = \"v\"");
        let err = parser.next_event().unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 1, .. }));
        // Fatal: the instance is terminated afterwards.
        assert!(parser.next_event().unwrap().is_end());
    }

    #[test]
    fn test_unterminated_double_quote() {
        let mut parser = ManifestParser::from_text("a = \"oops");
        let err = parser.read().unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 1, .. }));
        assert!(format!("{}", err).contains("unterminated"));
        assert!(parser.read().unwrap().is_end());
    }

    #[test]
    fn test_unterminated_single_quote() {
        let mut parser = ManifestParser::from_text("[t]\na = 'oops");
        let err = parser.read().unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(parser.table(), None);
    }

    #[test]
    fn test_quoted_line_without_separator() {
        // The original implementation sliced out of range here; we report
        // a malformed entry instead.
        let mut parser = ManifestParser::from_text("\"orphan\"");
        let err = parser.read().unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
        assert!(parser.read().unwrap().is_end());
    }

    #[test]
    fn test_malformed_error_line_number_counts_blanks() {
        let mut parser = ManifestParser::from_text("a = \"v\"\n\n\na = \"oops");
        assert!(parser.read().unwrap().is_pair());
        let err = parser.read().unwrap_err();
        assert_eq!(err.line(), Some(4));
    }

    // ==================== Close tests ====================

    #[test]
    fn test_read_after_close_fails() {
        let mut parser = ManifestParser::from_text("a = \"v\"");
        parser.close();
        assert!(matches!(parser.read(), Err(ParseError::Closed)));
        assert!(matches!(parser.next_event(), Err(ParseError::Closed)));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut parser = ManifestParser::from_text("a = \"v\"");
        parser.close();
        parser.close();
        assert!(matches!(parser.read(), Err(ParseError::Closed)));
    }

    #[test]
    fn test_close_after_end() {
        let mut parser = ManifestParser::from_text("");
        assert!(parser.read().unwrap().is_end());
        parser.close();
        assert!(matches!(parser.read(), Err(ParseError::Closed)));
    }

    // ==================== Iterator tests ====================

    #[test]
    fn test_iterator_yields_pairs_only() {
        let parser = ManifestParser::from_text("[t]\na = \"1\"\nb = \"2\"");
        let entries: Vec<_> = parser.collect::<ParseResult<Vec<_>>>().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "t.a");
        assert_eq!(entries[1].key, "t.b");
    }

    #[test]
    fn test_iterator_ends_after_error() {
        let mut parser = ManifestParser::from_text("a = \"oops");
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_iterator_on_closed_parser() {
        let mut parser = ManifestParser::from_text("a = \"v\"");
        parser.close();
        assert!(parser.next().is_none());
    }
}
