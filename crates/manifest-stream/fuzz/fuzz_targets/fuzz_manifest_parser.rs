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

#![no_main]

use libfuzzer_sys::fuzz_target;
use manifest_stream::ManifestParser;
use std::io::Cursor;

/// Fuzz target for the manifest parser.
///
/// Feeds arbitrary bytes to the parser and drives it to termination. The
/// parser must never panic or slice out of range: every input ends in the
/// `End` sentinel or a reported `ParseError` (invalid UTF-8 surfaces as an
/// I/O error from the line source).
///
/// ```bash
/// cargo install cargo-fuzz
/// cd crates/manifest-stream
/// cargo fuzz run fuzz_manifest_parser
/// ```
fuzz_target!(|data: &[u8]| {
    let mut parser = ManifestParser::new(Cursor::new(data.to_vec()));
    loop {
        match parser.next_event() {
            Ok(event) if event.is_end() => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
});
