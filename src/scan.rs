// SPDX-License-Identifier: PMPL-1.0-or-later

//! Scan: batch validation of pack files under a directory.
//!
//! Walks a directory tree, parses every file with a matching extension,
//! and produces a summary report sorted by label count (highest first).
//! Meant for content authors keeping a folder of hand-written pack files
//! honest before shipping them.

use crate::pack;
use crate::source::{FsSource, PackSource};
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "lang";

/// Configuration for a scan run
pub struct ScanConfig {
    /// Directory to walk for pack files
    pub directory: PathBuf,
    /// Pack file extension to match (without the dot)
    pub extension: String,
    /// Only show files with problems
    pub problems_only: bool,
}

/// Results from parsing a single pack file
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub label_count: usize,
    pub max_variants: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn has_problem(&self) -> bool {
        self.error.is_some() || self.label_count == 0
    }
}

/// Complete scan report
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub created_at: String,
    pub directory: PathBuf,
    pub files_scanned: usize,
    pub files_with_problems: usize,
    pub total_labels: usize,
    pub results: Vec<FileResult>,
}

/// Find all pack files under the given directory
fn discover_packs(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut packs = Vec::new();
    walk(directory, extension, &mut packs)?;
    packs.sort();
    Ok(packs)
}

fn walk(dir: &Path, extension: &str, packs: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !name.starts_with('.') {
                walk(&path, extension, packs)?;
            }
        } else if path.is_file() {
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(extension))
                .unwrap_or(false);
            if matches {
                packs.push(path);
            }
        }
    }
    Ok(())
}

/// Run a scan across all pack files in a directory
pub fn run(config: &ScanConfig) -> Result<ScanReport> {
    let files = discover_packs(&config.directory, &config.extension)?;
    let mut results: Vec<FileResult> = Vec::new();

    for path in &files {
        match FsSource.read_text(path) {
            Ok(text) => {
                let parsed = pack::parse(&text, false);
                results.push(FileResult {
                    path: path.clone(),
                    label_count: parsed.label_count(),
                    max_variants: parsed.max_variants(),
                    error: None,
                });
            }
            Err(err) => {
                results.push(FileResult {
                    path: path.clone(),
                    label_count: 0,
                    max_variants: 0,
                    error: Some(format!("{:#}", err)),
                });
            }
        }
    }

    results.sort_by(|a, b| b.label_count.cmp(&a.label_count));

    let files_scanned = results.len();
    let files_with_problems = results.iter().filter(|r| r.has_problem()).count();
    let total_labels = results.iter().map(|r| r.label_count).sum();

    if config.problems_only {
        results.retain(FileResult::has_problem);
    }

    Ok(ScanReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        directory: config.directory.clone(),
        files_scanned,
        files_with_problems,
        total_labels,
        results,
    })
}
