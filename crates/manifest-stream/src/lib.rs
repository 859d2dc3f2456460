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

//! Streaming parser for a restricted subset of TOML.
//!
//! This crate reads the two line shapes a Cargo build wrapper needs from a
//! manifest - `[table]` headers and `key = "value"` quoted pairs - one line
//! at a time, without loading the file into memory. It is deliberately NOT
//! a TOML implementation: arrays, inline tables, numbers, booleans, dates,
//! multi-line strings, and comments are all unsupported, and the first line
//! the parser does not recognize terminates the stream.
//!
//! # Features
//!
//! - **Streaming**: one line of state plus the active table name
//! - **Pull or push**: `read()` / `Iterator`, or a `for_each` callback
//! - **Tagged events**: termination is an explicit [`ManifestEvent::End`]
//!   variant, never a magic entry value
//! - **Async support**: non-blocking I/O with tokio (optional)
//!
//! # Quick start
//!
//! ```rust
//! use manifest_stream::{ManifestParser, ManifestEvent};
//!
//! let input = r#"
//! [package]
//! name = "hello-rust"
//! version = "0.1.0"
//! "#;
//!
//! let mut parser = ManifestParser::from_text(input);
//!
//! loop {
//!     match parser.read().unwrap() {
//!         ManifestEvent::Pair(entry) => {
//!             println!("{} = {}", entry.key, entry.value);
//!         }
//!         _ => break,
//!     }
//! }
//! ```
//!
//! Keys are qualified with the active table name, so the example above
//! yields `package.name` and `package.version`.
//!
//! # Termination contract
//!
//! Encountering the first unrecognized line - including a comment or an
//! unquoted value - ends the whole parse; it is not skipped. Malformed
//! headers and unterminated strings are reported as
//! [`ParseError::Malformed`] with a line number instead of slicing out of
//! range. Both conditions are fatal for the parser instance.

mod error;
mod event;
mod parser;
mod reader;

#[cfg(feature = "async")]
mod async_parser;
#[cfg(feature = "async")]
mod async_reader;

pub use error::{ParseError, ParseResult};
pub use event::{Entry, ManifestEvent};
pub use parser::ManifestParser;
pub use reader::LineSource;

#[cfg(feature = "async")]
pub use async_parser::AsyncManifestParser;
#[cfg(feature = "async")]
pub use async_reader::AsyncLineSource;
