// SPDX-License-Identifier: PMPL-1.0-or-later

//! Load diagnostics and the `check` self-diagnostics run.
//!
//! A failed pack load never aborts startup or a context switch; it is
//! reported to a [`DiagnosticSink`] and the load moves on. The console
//! sink is the default; tests plug in a recording sink instead.

use crate::config::PackConfig;
use crate::pack;
use crate::source::PackSource;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use colored::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One skipped pack load.
#[derive(Debug, Clone)]
pub struct LoadDiagnostic {
    pub path: PathBuf,
    pub detail: String,
    pub at: DateTime<Utc>,
}

impl LoadDiagnostic {
    pub fn new(path: &Path, detail: String) -> Self {
        Self {
            path: path.to_path_buf(),
            detail,
            at: Utc::now(),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: LoadDiagnostic);
}

/// Default sink: one tagged warning line per skipped file.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, diagnostic: LoadDiagnostic) {
        eprintln!(
            "  [{}] {:22} {}",
            "WARN".yellow(),
            diagnostic.path.display(),
            diagnostic.detail
        );
    }
}

/// Recording sink for tests: keeps every diagnostic, shared through a
/// cloneable handle so callers can inspect what the controller reported.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<LoadDiagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LoadDiagnostic> {
        self.records.borrow().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&mut self, diagnostic: LoadDiagnostic) {
        self.records.borrow_mut().push(diagnostic);
    }
}

// ─── Config self-diagnostics ────────────────────────────────────────

/// Verify that every file a config declares exists, decodes, and parses.
/// Prints one tagged line per check and errors out if any check failed,
/// so `langpack check` can gate a content pipeline.
pub fn run_check(config: &PackConfig, source: &dyn PackSource) -> Result<()> {
    println!("langpack self-diagnostics");

    let mut checks = Vec::new();
    checks.push(Check::ok(
        "version".to_string(),
        format!("langpack {}", env!("CARGO_PKG_VERSION")),
    ));
    checks.push(Check::ok(
        "config".to_string(),
        format!(
            "{} persistent file(s), {} context binding(s)",
            config.persistent.len(),
            config.contexts.len()
        ),
    ));

    for path in config.all_files() {
        checks.push(check_pack_file(path, source));
    }

    println!();
    for check in &checks {
        check.print();
    }

    if checks.iter().any(|check| matches!(check.level, Level::Error)) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

fn check_pack_file(path: &Path, source: &dyn PackSource) -> Check {
    let label = path.display().to_string();
    match source.read_text(path) {
        Ok(text) => {
            let parsed = pack::parse(&text, false);
            if parsed.labels.is_empty() {
                Check::warning(label, "parses but defines no labels".to_string())
            } else {
                Check::ok(
                    label,
                    format!(
                        "{} label(s), up to {} variant(s)",
                        parsed.label_count(),
                        parsed.max_variants()
                    ),
                )
            }
        }
        Err(err) => Check::error(label, format!("{:#}", err)),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> ColoredString {
        match self {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red(),
        }
    }
}

struct Check {
    label: String,
    level: Level,
    detail: String,
}

impl Check {
    fn ok(label: String, detail: String) -> Self {
        Self {
            label,
            level: Level::Ok,
            detail,
        }
    }

    fn warning(label: String, detail: String) -> Self {
        Self {
            label,
            level: Level::Warn,
            detail,
        }
    }

    fn error(label: String, detail: String) -> Self {
        Self {
            label,
            level: Level::Error,
            detail,
        }
    }

    fn print(&self) {
        println!("  [{}] {:28} {}", self.level.tag(), self.label, self.detail);
    }
}
