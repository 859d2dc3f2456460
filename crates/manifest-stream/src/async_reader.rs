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

//! Async line source for the manifest parser.
//!
//! Same line discipline as [`LineSource`](crate::LineSource) - trimmed,
//! non-blank lines with physical line numbers - over tokio's non-blocking
//! I/O.

use crate::error::{ParseError, ParseResult};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Buffered async source of trimmed, non-blank lines.
pub struct AsyncLineSource<R: AsyncRead + Unpin> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl<R: AsyncRead + Unpin> AsyncLineSource<R> {
    /// Create a new async line source.
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
    /// exhausted. Returns `Ok(None)` at end of input.
    pub async fn next_line(&mut self) -> ParseResult<Option<(usize, String)>> {
        loop {
            self.buffer.clear();

            match self.reader.read_line(&mut self.buffer).await {
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
