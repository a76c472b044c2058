// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lifecycle controller: owns the registry and drives loading.
//!
//! The host calls [`PackManager::start`] once, then
//! [`PackManager::on_context_changed`] whenever its active scene/screen
//! changes. Both are synchronous and must be serialized by the host; the
//! manager holds no locks and is not reentrant.
//!
//! A file that fails to load is reported to the diagnostic sink and
//! skipped. The rest of the declared files still load, and packs already
//! in the registry are never rolled back.

use crate::config::PackConfig;
use crate::diagnostics::{ConsoleSink, DiagnosticSink, LoadDiagnostic};
use crate::pack;
use crate::registry::Registry;
use crate::resolver;
use crate::source::{FsSource, PackSource};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Ready,
}

/// What one load pass (startup or context switch) did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub attempted: usize,
    pub loaded: usize,
    pub skipped: usize,
}

pub struct PackManager {
    config: PackConfig,
    registry: Registry,
    source: Box<dyn PackSource>,
    sink: Box<dyn DiagnosticSink>,
    language: usize,
    state: State,
}

impl PackManager {
    /// Manager backed by the local filesystem and console diagnostics.
    pub fn new(config: PackConfig) -> Self {
        Self::with_parts(config, Box::new(FsSource), Box::new(ConsoleSink))
    }

    pub fn with_parts(
        config: PackConfig,
        source: Box<dyn PackSource>,
        sink: Box<dyn DiagnosticSink>,
    ) -> Self {
        let language = config.language;
        Self {
            config,
            registry: Registry::new(),
            source,
            sink,
            language,
            state: State::Uninitialized,
        }
    }

    /// One-time initialization: load every persistent pack in declared
    /// order. Calling it again is host misuse, not a load error.
    pub fn start(&mut self) -> Result<LoadOutcome> {
        if self.state == State::Ready {
            bail!("start() called twice");
        }

        let paths: Vec<PathBuf> = self.config.persistent.clone();
        let outcome = self.load_all(&paths, true);
        self.state = State::Ready;
        Ok(outcome)
    }

    /// Switch to `context_id`: drop every transient pack, then load the
    /// files bound to the new context in declared order. A context with
    /// no binding simply ends up with no transient packs.
    pub fn on_context_changed(&mut self, context_id: &str) -> Result<LoadOutcome> {
        if self.state == State::Uninitialized {
            bail!("on_context_changed() before start()");
        }

        self.registry.discard_transient();

        let paths: Vec<PathBuf> = self
            .config
            .context_files(context_id)
            .into_iter()
            .map(Path::to_path_buf)
            .collect();
        Ok(self.load_all(&paths, false))
    }

    fn load_all(&mut self, paths: &[PathBuf], persistent: bool) -> LoadOutcome {
        let mut outcome = LoadOutcome {
            attempted: paths.len(),
            ..LoadOutcome::default()
        };
        for path in paths {
            if self.load_file(path, persistent) {
                outcome.loaded += 1;
            } else {
                outcome.skipped += 1;
            }
        }
        outcome
    }

    fn load_file(&mut self, path: &Path, persistent: bool) -> bool {
        match self.source.read_text(path) {
            Ok(text) => {
                self.registry.add(pack::parse(&text, persistent));
                true
            }
            Err(err) => {
                self.sink
                    .report(LoadDiagnostic::new(path, format!("{:#}", err)));
                false
            }
        }
    }

    /// Resolve a label at an explicit language index.
    pub fn resolve(&self, label: &str, language_index: usize) -> Option<String> {
        resolver::resolve(&self.registry, label, language_index)
    }

    /// Resolve a label at the active language, empty string when
    /// unresolved. This is the call sites' everyday lookup.
    pub fn get_string(&self, label: &str) -> String {
        resolver::get_string(&self.registry, label, self.language)
    }

    /// Active language index. Not validated against how many variants any
    /// pack actually defines; short lists just fail to resolve.
    pub fn language(&self) -> usize {
        self.language
    }

    pub fn set_language(&mut self, language_index: usize) {
        self.language = language_index;
    }

    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
