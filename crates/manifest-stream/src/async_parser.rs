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

//! Async streaming parser (feature = "async").
//!
//! Mirrors [`ManifestParser`](crate::ManifestParser) over tokio's
//! non-blocking I/O: the same line classification, the same
//! terminate-on-first-unrecognized-line contract, the same absorbing `End`
//! state. Use it when the manifest arrives over a pipe or network stream
//! inside an async runtime; for local files the synchronous parser is
//! simpler and just as fast.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use manifest_stream::AsyncManifestParser;
//! use std::io::Cursor;
//!
//! let input = "[package]\nname = \"demo\"";
//! let mut parser = AsyncManifestParser::new(Cursor::new(input));
//!
//! loop {
//!     let event = parser.read().await?;
//!     match event.as_pair() {
//!         Some(entry) => println!("{} = {}", entry.key, entry.value),
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::async_reader::AsyncLineSource;
use crate::error::{ParseError, ParseResult};
use crate::event::{Entry, ManifestEvent};
use std::path::Path;
use tokio::io::AsyncRead;

/// Async manifest parser.
///
/// Identical semantics to the synchronous parser; each operation yields to
/// the runtime while waiting for I/O instead of blocking the thread.
pub struct AsyncManifestParser<R: AsyncRead + Unpin> {
    /// `None` once the source has been released by `close()`.
    source: Option<AsyncLineSource<R>>,
    table: Option<String>,
    finished: bool,
}

impl<R: AsyncRead + Unpin> AsyncManifestParser<R> {
    /// Create a parser over any `AsyncRead` source.
    pub fn new(reader: R) -> Self {
        Self {
            source: Some(AsyncLineSource::new(reader)),
            table: None,
            finished: false,
        }
    }

    /// Create a parser with a specific read buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            source: Some(AsyncLineSource::with_capacity(reader, capacity)),
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
    /// Errors and termination behave exactly as in
    /// [`ManifestParser::next_event`](crate::ManifestParser::next_event).
    pub async fn next_event(&mut self) -> ParseResult<ManifestEvent> {
        if self.source.is_none() {
            return Err(ParseError::Closed);
        }
        if self.finished {
            return Ok(ManifestEvent::End);
        }

        match self.step().await {
            Ok(event) => Ok(event),
            Err(e) => {
                // Errors are fatal for this instance; no retry.
                self.terminate();
                Err(e)
            }
        }
    }

    /// Return the next entry, skipping table headers.
    pub async fn read(&mut self) -> ParseResult<ManifestEvent> {
        loop {
            match self.next_event().await? {
                ManifestEvent::TableHeader { .. } => continue,
                event => return Ok(event),
            }
        }
    }

    /// Invoke `visit` on every remaining entry until the stream ends.
    pub async fn for_each<F>(&mut self, mut visit: F) -> ParseResult<()>
    where
        F: FnMut(Entry),
    {
        loop {
            match self.read().await? {
                ManifestEvent::Pair(entry) => visit(entry),
                _ => return Ok(()),
            }
        }
    }

    /// Release the underlying source. Idempotent; parsing afterwards fails
    /// with [`ParseError::Closed`].
    pub fn close(&mut self) {
        self.source = None;
        self.table = None;
    }

    async fn step(&mut self) -> ParseResult<ManifestEvent> {
        let source = self.source.as_mut().ok_or(ParseError::Closed)?;

        let (line_num, line) = match source.next_line().await? {
            Some(next) => next,
            None => return Ok(self.terminate()),
        };

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

        if sep == Some(0) {
            return Ok(self.terminate());
        }

        let candidate = match sep {
            Some(pos) => line[pos + 1..].trim(),
            None => line,
        };

        let quote = if candidate.starts_with('"') {
            '"'
        } else if candidate.starts_with('\'') {
            '\''
        } else {
            return Ok(self.terminate());
        };

        let sep = sep.ok_or_else(|| {
            ParseError::malformed(line_num, "quoted value is missing the '=' separator")
        })?;

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

impl AsyncManifestParser<tokio::fs::File> {
    /// Open a manifest file for async parsing.
    pub async fn open(path: impl AsRef<Path>) -> ParseResult<Self> {
        Ok(Self::new(tokio::fs::File::open(path).await?))
    }
}
