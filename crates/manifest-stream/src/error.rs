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

//! Error types for the manifest parser.
//!
//! Errors fall into three groups:
//!
//! - **I/O failures**: the underlying read failed; fatal for the parser
//!   instance, never retried.
//! - **Malformed entries**: a line was recognized as a table header or
//!   quoted pair but could not be sliced safely (unterminated string,
//!   header without a closing bracket). These carry the source line number.
//! - **Use after close**: any parsing call on a parser whose source has
//!   already been released.
//!
//! Unrecognized lines are deliberately *not* errors; they terminate the
//! stream instead (see [`ManifestParser`](crate::ManifestParser)).
//!
//! # Examples
//!
//! ```rust
//! use manifest_stream::ParseError;
//!
//! let err = ParseError::malformed(7, "unterminated string");
//! assert_eq!(err.line(), Some(7));
//! assert!(format!("{}", err).contains("line 7"));
//! ```

use thiserror::Error;

/// Errors that can occur while parsing a manifest stream.
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line looked like a header or quoted pair but could not be parsed.
    #[error("Malformed entry at line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// A parsing operation was invoked after `close()`.
    #[error("parser used after close")]
    Closed,
}

impl ParseError {
    /// Create a malformed-entry error.
    #[inline]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Get the source line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
