// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame change collection.
//!
//! Evaluation drains each change channel once:
//!
//! 1. **STACKING**: Drained into a single `restacked` flag; the stacking
//!    sequence itself is always current.
//! 2. **GEOMETRY**: Drained into the list of moved views.
//! 3. **MAPPING**: Drained and split by the current mapped flag.
//! 4. **ACTIVATION**: Drained into the list of views whose activated
//!    indicator flipped.
//!
//! [`ViewChanges`] uses raw slot indices (`u32`) rather than [`ViewId`]
//! handles so the frame driver can index straight into the store via the
//! `*_at()` accessors. Removed slots only ever appear in
//! [`removed`](ViewChanges::removed).
//!
//! [`ViewId`]: super::ViewId

use alloc::vec::Vec;

use super::store::ViewStore;
use crate::damage;

/// The set of changes produced by a single [`ViewStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct ViewChanges {
    /// Views whose layout position changed.
    pub moved: Vec<u32>,
    /// Views that became mapped.
    pub mapped: Vec<u32>,
    /// Views that became unmapped.
    pub unmapped: Vec<u32>,
    /// Views whose activated indicator changed.
    pub activation: Vec<u32>,
    /// Views created since the last evaluate.
    pub added: Vec<u32>,
    /// Views destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the stacking order changed.
    pub restacked: bool,
}

impl ViewChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.moved.clear();
        self.mapped.clear();
        self.unmapped.clear();
        self.activation.clear();
        self.added.clear();
        self.removed.clear();
        self.restacked = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.restacked
            && self.moved.is_empty()
            && self.mapped.is_empty()
            && self.unmapped.is_empty()
            && self.activation.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }

    /// Total number of per-view change records.
    #[must_use]
    pub fn count(&self) -> usize {
        self.moved.len()
            + self.mapped.len()
            + self.unmapped.len()
            + self.activation.len()
            + self.added.len()
            + self.removed.len()
    }
}

impl ViewStore {
    /// Drains all change channels and returns what changed since the last
    /// call.
    pub fn evaluate(&mut self) -> ViewChanges {
        let mut changes = ViewChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut ViewChanges) {
        changes.clear();

        let restacked: Vec<u32> = self
            .dirty
            .drain(damage::STACKING)
            .deterministic()
            .run()
            .collect();
        changes.restacked = !restacked.is_empty();

        changes.moved = self
            .dirty
            .drain(damage::GEOMETRY)
            .deterministic()
            .run()
            .filter(|idx| !self.free_list.contains(idx))
            .collect();

        let mapping: Vec<u32> = self
            .dirty
            .drain(damage::MAPPING)
            .deterministic()
            .run()
            .collect();
        for idx in mapping {
            if self.free_list.contains(&idx) {
                continue;
            }
            if self.mapped[idx as usize] {
                changes.mapped.push(idx);
            } else {
                changes.unmapped.push(idx);
            }
        }

        changes.activation = self
            .dirty
            .drain(damage::ACTIVATION)
            .deterministic()
            .run()
            .filter(|idx| !self.free_list.contains(idx))
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}
