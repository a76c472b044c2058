// SPDX-License-Identifier: PMPL-1.0-or-later

//! Ordered store of loaded packs.
//!
//! Order is load order and it is load-bearing: lookup walks the registry
//! front to back and the first pack defining a label decides the result.
//! Persistent packs are loaded at startup and therefore always sit ahead
//! of whatever the active context loaded after them.

use crate::pack::Pack;

#[derive(Debug, Default)]
pub struct Registry {
    packs: Vec<Pack>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pack at the end of the lookup order.
    pub fn add(&mut self, pack: Pack) {
        self.packs.push(pack);
    }

    /// Drop every non-persistent pack, keeping the survivors' relative
    /// order. Persistent packs are untouched; nothing is re-parsed.
    pub fn discard_transient(&mut self) {
        self.packs.retain(|pack| pack.persistent);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pack> {
        self.packs.iter()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
