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

//! Error types for metadata extraction.

use manifest_stream::ParseError;
use thiserror::Error;

/// Errors from loading build metadata out of a manifest.
#[derive(Error, Debug)]
pub enum MetaError {
    /// The underlying parse failed (I/O or malformed entry).
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The manifest parsed cleanly but a required field never appeared.
    #[error("manifest is missing required field '{0}'")]
    MissingField(String),
}

/// Result type for metadata operations.
pub type MetaResult<T> = Result<T, MetaError>;
