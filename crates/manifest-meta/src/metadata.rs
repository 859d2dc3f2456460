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

//! Typed view over the entries of one manifest.

use crate::error::{MetaError, MetaResult};
use manifest_stream::ManifestParser;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Build metadata collected from a Cargo manifest.
///
/// Drives a [`ManifestParser`] to completion, collecting every qualified
/// entry into an ordered map, and exposes typed accessors for the fields a
/// build wrapper needs. Later duplicates of a key overwrite earlier ones.
///
/// Because the underlying parser stops at the first unsupported line, the
/// fields of interest should sit at the top of the manifest; that is the
/// layout `cargo new` produces.
///
/// # Examples
///
/// ```rust
/// use manifest_meta::CargoMetadata;
///
/// let manifest = r#"
/// [package]
/// name = "hello-rust"
/// version = "0.1.0"
/// "#;
///
/// let meta = CargoMetadata::from_text(manifest).unwrap();
/// assert_eq!(meta.package_name().unwrap(), "hello-rust");
/// assert_eq!(meta.package_version().unwrap(), "0.1.0");
/// assert_eq!(meta.lib_name().unwrap(), "hello_rust");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CargoMetadata {
    entries: BTreeMap<String, String>,
}

impl CargoMetadata {
    /// Collect metadata from any `Read` source.
    pub fn from_reader(reader: impl Read) -> MetaResult<Self> {
        let mut parser = ManifestParser::new(reader);
        let mut entries = BTreeMap::new();
        (&mut parser).for_each(|entry| {
            entries.insert(entry.key, entry.value);
        })?;
        Ok(Self { entries })
    }

    /// Collect metadata from a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> MetaResult<Self> {
        let mut parser = ManifestParser::open(path)?;
        let mut entries = BTreeMap::new();
        (&mut parser).for_each(|entry| {
            entries.insert(entry.key, entry.value);
        })?;
        Ok(Self { entries })
    }

    /// Collect metadata from literal manifest text.
    pub fn from_text(text: impl Into<String>) -> MetaResult<Self> {
        let mut parser = ManifestParser::from_text(text);
        let mut entries = BTreeMap::new();
        (&mut parser).for_each(|entry| {
            entries.insert(entry.key, entry.value);
        })?;
        Ok(Self { entries })
    }

    /// Look up any entry by qualified key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All collected entries, in key order.
    #[inline]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// The `package.name` field. Required.
    pub fn package_name(&self) -> MetaResult<&str> {
        self.require("package.name")
    }

    /// The `package.version` field. Required.
    pub fn package_version(&self) -> MetaResult<&str> {
        self.require("package.version")
    }

    /// The `lib.crate-type` field, when declared as a single quoted string.
    #[inline]
    pub fn crate_type(&self) -> Option<&str> {
        self.get("lib.crate-type")
    }

    /// The library target name.
    ///
    /// Follows Cargo's rule: an explicit `lib.name` wins, otherwise the
    /// package name with every `-` replaced by `_`.
    pub fn lib_name(&self) -> MetaResult<String> {
        if let Some(name) = self.get("lib.name") {
            return Ok(name.to_string());
        }
        Ok(self.package_name()?.replace('-', "_"))
    }

    fn require(&self, field: &str) -> MetaResult<&str> {
        self.get(field)
            .ok_or_else(|| MetaError::MissingField(field.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[package]
name = "hello-rust"
version = "0.1.0"
edition = "2021"

[lib]
crate-type = "cdylib"
"#;

    #[test]
    fn test_package_fields() {
        let meta = CargoMetadata::from_text(MANIFEST).unwrap();
        assert_eq!(meta.package_name().unwrap(), "hello-rust");
        assert_eq!(meta.package_version().unwrap(), "0.1.0");
        assert_eq!(meta.get("package.edition"), Some("2021"));
    }

    #[test]
    fn test_crate_type() {
        let meta = CargoMetadata::from_text(MANIFEST).unwrap();
        assert_eq!(meta.crate_type(), Some("cdylib"));
    }

    #[test]
    fn test_lib_name_fallback_underscores() {
        let meta = CargoMetadata::from_text(MANIFEST).unwrap();
        assert_eq!(meta.lib_name().unwrap(), "hello_rust");
    }

    #[test]
    fn test_explicit_lib_name_wins() {
        let input = "[package]\nname = \"pkg\"\n[lib]\nname = \"custom\"";
        let meta = CargoMetadata::from_text(input).unwrap();
        assert_eq!(meta.lib_name().unwrap(), "custom");
    }

    #[test]
    fn test_missing_required_field() {
        let meta = CargoMetadata::from_text("[package]\nname = \"only-name\"").unwrap();
        let err = meta.package_version().unwrap_err();
        assert!(matches!(err, MetaError::MissingField(_)));
        assert!(format!("{}", err).contains("package.version"));
    }

    #[test]
    fn test_collection_stops_at_unsupported_line() {
        // Everything below the array line is invisible to the collector.
        let input = "[package]\nname = \"pkg\"\nauthors = [\"a\"]\nversion = \"1.0.0\"";
        let meta = CargoMetadata::from_text(input).unwrap();
        assert_eq!(meta.package_name().unwrap(), "pkg");
        assert!(meta.package_version().is_err());
    }

    #[test]
    fn test_malformed_manifest_is_an_error() {
        let result = CargoMetadata::from_text("[package]\nname = \"unclosed");
        assert!(matches!(result, Err(MetaError::Parse(_))));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let input = "[t]\nk = \"first\"\nk = \"second\"";
        let meta = CargoMetadata::from_text(input).unwrap();
        assert_eq!(meta.get("t.k"), Some("second"));
    }

    #[test]
    fn test_entries_ordered_by_key() {
        let meta = CargoMetadata::from_text(MANIFEST).unwrap();
        let keys: Vec<_> = meta.entries().keys().cloned().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
