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

//! Line source for the manifest parser.
//!
//! Provides buffered line-by-line reading with line number tracking. Blank
//! and whitespace-only lines are skipped transparently, and every yielded
//! line is already trimmed; the parser never sees surrounding whitespace.
//!
//! This module is primarily an internal implementation detail of
//! [`ManifestParser`](crate::ManifestParser), but is exposed for callers
//! that want the same line discipline over other formats.

use crate::error::{ParseError, ParseResult};
use std::io::{BufRead, BufReader, Read};

/// Buffered source of trimmed, non-blank lines.
///
/// Line numbers count every physical line, including the skipped blank
/// ones, so diagnostics point at the real location in the file. Handles
/// both LF and CRLF endings.
///
/// # Examples
///
/// ```rust
/// use manifest_stream::LineSource;
/// use std::io::Cursor;
///
/// let input = "first\n\n   \n  second  ";
/// let mut source = LineSource::new(Cursor::new(input));
///
/// assert_eq!(source.next_line().unwrap(), Some((1, "first".to_string())));
/// assert_eq!(source.next_line().unwrap(), Some((4, "second".to_string())));
/// assert_eq!(source.next_line().unwrap(), None);
/// ```
pub struct LineSource<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl<R: Read> LineSource<R> {
    /// Create a new line source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Get the number of the last physical line read.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next trimmed, non-blank line.
    ///
    /// Keeps reading until a non-blank line is found or the stream is
    /// exhausted. Returns `Ok(None)` at end of input; I/O failures
    /// propagate as [`ParseError::Io`] and are not retried.
    pub fn next_line(&mut self) -> ParseResult<Option<(usize, String)>> {
        loop {
            self.buffer.clear();

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return Ok(None), // EOF
                Ok(_) => {
                    self.line_number += 1;

                    let trimmed = self.buffer.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    return Ok(Some((self.line_number, trimmed.to_string())));
                }
                Err(e) => return Err(ParseError::Io(e)),
            }
        }
    }
}

impl<R: Read> Iterator for LineSource<R> {
    type Item = ParseResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
