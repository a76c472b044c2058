// SPDX-License-Identifier: PMPL-1.0-or-later

//! Label lookup across the registry.
//!
//! Priority is purely load order: the first pack defining a label owns it.
//! If that pack's variant list is too short for the requested language
//! index the lookup fails outright — later packs are never consulted, even
//! when one of them could have answered. Content authors rely on this
//! ordering contract to shadow labels from persistent packs, so it must
//! not be softened into a fallback.

use crate::registry::Registry;

/// In-variant escape that expands to a line break at lookup time.
pub const NEWLINE_ESCAPE: &str = "<n>";

#[cfg(windows)]
pub const LINE_BREAK: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_BREAK: &str = "\n";

/// Resolve `label` at `language_index` against the loaded packs.
///
/// Returns `None` when no pack defines the label, or when the owning pack
/// defines it but has no variant at that index. The returned string has
/// every `<n>` expanded to the platform line break.
pub fn resolve(registry: &Registry, label: &str, language_index: usize) -> Option<String> {
    let pack = registry.iter().find(|pack| pack.labels.contains_key(label))?;
    pack.labels[label]
        .get(language_index)
        .map(|variant| expand_escapes(variant))
}

/// Empty-string-sentinel form of [`resolve`], matching what hosts that
/// treat "no text" and "empty text" alike expect.
pub fn get_string(registry: &Registry, label: &str, language_index: usize) -> String {
    resolve(registry, label, language_index).unwrap_or_default()
}

fn expand_escapes(variant: &str) -> String {
    variant.replace(NEWLINE_ESCAPE, LINE_BREAK)
}
