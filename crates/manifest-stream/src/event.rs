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

//! Event types yielded by the manifest parser.
//!
//! Each line of input produces at most one event:
//!
//! - [`ManifestEvent::TableHeader`] for a `[table]` line (no entry is
//!   produced; the table name becomes the prefix for subsequent keys),
//! - [`ManifestEvent::Pair`] for a `key = "value"` line,
//! - [`ManifestEvent::End`] when the stream terminates.
//!
//! `End` is the stream's sentinel. It is a dedicated variant, detected with
//! [`is_end()`](ManifestEvent::is_end), never a magic key/value pair. It is
//! absorbing: once yielded, every further call yields it again.
//!
//! # Example event sequence
//!
//! For this manifest fragment:
//!
//! ```text
//! name = "hello"
//! [lib]
//! crate-type = "cdylib"
//! ```
//!
//! [`next_event()`](crate::ManifestParser::next_event) yields:
//!
//! ```text
//! Pair(Entry { key: "name", value: "hello", line: 1 })
//! TableHeader { name: "lib", line: 2 }
//! Pair(Entry { key: "lib.crate-type", value: "cdylib", line: 3 })
//! End
//! ```

/// One parsed key/value entry.
///
/// The key is fully qualified: when a table is active it is
/// `table + "." + name`, otherwise just `name`. Values are the raw text
/// between the outermost quotes with no escape processing.
///
/// # Examples
///
/// ```rust
/// use manifest_stream::ManifestParser;
///
/// let mut parser = ManifestParser::from_text("[package]\nname = \"demo\"");
/// let entry = parser.next().unwrap().unwrap();
/// assert_eq!(entry.key, "package.name");
/// assert_eq!(entry.value, "demo");
/// assert_eq!(entry.line, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Qualified key, dotted with the active table name if any.
    pub key: String,
    /// Raw string value, quotes stripped.
    pub value: String,
    /// Line number in the source.
    pub line: usize,
}

impl Entry {
    /// Create a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>, line: usize) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line,
        }
    }
}

/// Event emitted by the manifest parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEvent {
    /// A qualified key/value pair was parsed.
    Pair(Entry),

    /// A table header line switched the active table context.
    TableHeader {
        /// Table name, the text between `[` and the first `]`.
        name: String,
        /// Line number in the source.
        line: usize,
    },

    /// End of stream: the source is exhausted or an unrecognized line was
    /// seen. Absorbing.
    End,
}

impl ManifestEvent {
    /// Check whether this is the terminal sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Check whether this is a key/value pair.
    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair(_))
    }

    /// Get the entry if this is a pair event.
    #[inline]
    pub fn as_pair(&self) -> Option<&Entry> {
        match self {
            Self::Pair(entry) => Some(entry),
            _ => None,
        }
    }

    /// Get the source line number for this event.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Pair(entry) => Some(entry.line),
            Self::TableHeader { line, .. } => Some(*line),
            Self::End => None,
        }
    }
}
