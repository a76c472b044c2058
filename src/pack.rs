// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language-pack file format and parser.
//!
//! A pack file is UTF-8 text built from two literal markers:
//!
//! ```text
//! <Label>Mes0
//! <List>Test
//! <List>テスト
//! ```
//!
//! Line breaks are cosmetic and are stripped before parsing; the grammar is
//! driven solely by `<Label>` and `<List>`. Each `<Label>` opens an entry
//! whose key runs up to the next marker, and each following `<List>` adds
//! one variant to that entry, indexed from 0 in language order.

use serde::Serialize;
use std::collections::HashMap;

/// Marker opening a label entry.
pub const LABEL_MARKER: &str = "<Label>";
/// Marker opening one variant inside a label entry.
pub const LIST_MARKER: &str = "<List>";

/// The parsed contents of one language-pack file.
///
/// A label's variant list may be shorter than the number of languages the
/// host supports; indices past the end are simply unresolved in this pack.
#[derive(Debug, Clone, Serialize)]
pub struct Pack {
    /// Packs loaded at startup stay registered across context changes;
    /// packs loaded for a context are dropped on the next change.
    pub persistent: bool,
    pub labels: HashMap<String, Vec<String>>,
}

impl Pack {
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Widest variant list in the pack, i.e. how many language slots the
    /// file actually fills somewhere.
    pub fn max_variants(&self) -> usize {
        self.labels.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Parse raw pack text into a [`Pack`] tagged with `persistent`.
///
/// CR and LF are deleted up front, then the text is cut on `<Label>`. Text
/// before the first marker is not addressable and is dropped. Within each
/// label block the first `<List>`-delimited piece is the key, taken exactly
/// as written (no trimming); the rest are its variants in order. A block
/// with no `<List>` still registers the key, with an empty variant list.
/// When a key repeats within one file the later block replaces the earlier
/// one wholesale.
///
/// The `<n>` escape inside a variant is kept verbatim here; it becomes a
/// real line break at resolution time.
///
/// Input with no `<Label>` marker at all is legal and yields an empty map.
pub fn parse(text: &str, persistent: bool) -> Pack {
    let flat: String = text.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    let mut labels = HashMap::new();
    for block in flat.split(LABEL_MARKER).skip(1) {
        let mut pieces = block.split(LIST_MARKER);
        // split always yields at least one piece, even for an empty block
        let key = pieces.next().unwrap_or_default().to_string();
        let variants: Vec<String> = pieces.map(str::to_string).collect();
        labels.insert(key, variants);
    }

    Pack { persistent, labels }
}
