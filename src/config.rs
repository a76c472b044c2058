// SPDX-License-Identifier: PMPL-1.0-or-later

//! Declarative pack configuration.
//!
//! The host declares which files to load in a YAML or JSON document:
//!
//! ```yaml
//! language: 0
//! persistent:
//!   - packs/common.lang
//! contexts:
//!   - name: Title
//!     files:
//!       - packs/title.lang
//!   - name: Battle
//!     files:
//!       - packs/battle.lang
//!       - packs/battle_help.lang
//! ```
//!
//! `persistent` files are loaded once at startup and survive every context
//! change; each context's files are loaded fresh when that context becomes
//! active. File order within a list is lookup priority order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct PackConfig {
    /// Default language index; the host may change it at runtime.
    #[serde(default)]
    pub language: usize,
    #[serde(default)]
    pub persistent: Vec<PathBuf>,
    #[serde(default)]
    pub contexts: Vec<ContextBinding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextBinding {
    pub name: String,
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl PackConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading pack config {}", path.display()))?;
        let ext = path.extension().and_then(|s| s.to_str());
        let config: PackConfig = if ext == Some("yaml") || ext == Some("yml") {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml pack config {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing json pack config {}", path.display()))?
        };
        Ok(config)
    }

    /// Files declared for `context_id`, in declared order. A context may
    /// appear in more than one binding; all of its bindings contribute.
    /// Unknown contexts simply declare nothing.
    pub fn context_files(&self, context_id: &str) -> Vec<&Path> {
        self.contexts
            .iter()
            .filter(|binding| binding.name == context_id)
            .flat_map(|binding| binding.files.iter().map(PathBuf::as_path))
            .collect()
    }

    /// Every file the config mentions, persistent first, then each context
    /// in declared order. Used by the check and scan tooling.
    pub fn all_files(&self) -> Vec<&Path> {
        self.persistent
            .iter()
            .map(PathBuf::as_path)
            .chain(
                self.contexts
                    .iter()
                    .flat_map(|binding| binding.files.iter().map(PathBuf::as_path)),
            )
            .collect()
    }
}
