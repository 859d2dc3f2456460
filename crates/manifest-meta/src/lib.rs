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

//! Typed Cargo build metadata on top of [`manifest_stream`].
//!
//! Build wrappers that embed a Rust library need a handful of facts from
//! `Cargo.toml`: the package name and version, and the library target name
//! and crate type. This crate collects the entries yielded by the streaming
//! parser into a [`CargoMetadata`] value with typed accessors for exactly
//! those fields.
//!
//! ```rust
//! use manifest_meta::CargoMetadata;
//!
//! let meta = CargoMetadata::from_text(
//!     "[package]\nname = \"hello-rust\"\nversion = \"0.1.0\"",
//! ).unwrap();
//!
//! assert_eq!(meta.package_name().unwrap(), "hello-rust");
//! assert_eq!(meta.lib_name().unwrap(), "hello_rust");
//! ```

mod error;
mod metadata;

pub use error::{MetaError, MetaResult};
pub use metadata::CargoMetadata;

/// Re-export parser types for convenience.
pub use manifest_stream::{Entry, ManifestParser, ParseError};
