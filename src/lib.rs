// SPDX-License-Identifier: PMPL-1.0-or-later

//! Langpack — layered language-pack loading and label resolution.
//!
//! Applications resolve localized text by symbolic label and a language
//! index instead of hard-coding strings. The text lives in plain-text
//! pack files using `<Label>` / `<List>` markers, and packs are loaded
//! in two tiers: persistent packs that survive context changes and
//! transient packs scoped to the active context (a scene, screen, or
//! similar host-defined unit).
//!
//! ENGINE PILLARS:
//! 1. **Pack**: the two-marker text grammar and its parser.
//! 2. **Registry**: the ordered store of loaded packs; load order is
//!    lookup priority.
//! 3. **Resolver**: first-pack-wins label lookup with `<n>` line-break
//!    expansion.
//! 4. **Lifecycle**: startup and context-change loading driven by a
//!    declarative config, with per-file failure diagnostics.

pub mod config;
pub mod diagnostics;
pub mod lifecycle;
pub mod pack;
pub mod registry;
pub mod resolver;
pub mod scan;
pub mod source;
