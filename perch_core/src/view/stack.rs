// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking-order traversal.

use super::id::{INVALID, ViewId};
use super::store::ViewStore;

/// An iterator over live views in stacking order.
///
/// Forward iteration runs front (topmost) to back; [`Iterator::rev`] runs
/// back to front. Created by [`ViewStore::iter_front_to_back`].
#[derive(Debug, Clone)]
pub struct Stack<'a> {
    store: &'a ViewStore,
    front: u32,
    back: u32,
    remaining: u32,
}

impl<'a> Stack<'a> {
    pub(crate) fn new(store: &'a ViewStore) -> Self {
        Self {
            store,
            front: store.front,
            back: store.back,
            remaining: store.count,
        }
    }

    fn handle(&self, idx: u32) -> ViewId {
        ViewId {
            idx,
            generation: self.store.generation[idx as usize],
        }
    }
}

impl Iterator for Stack<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        if self.remaining == 0 || self.front == INVALID {
            return None;
        }
        let idx = self.front;
        self.front = self.store.below[idx as usize];
        self.remaining -= 1;
        Some(self.handle(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl DoubleEndedIterator for Stack<'_> {
    fn next_back(&mut self) -> Option<ViewId> {
        if self.remaining == 0 || self.back == INVALID {
            return None;
        }
        let idx = self.back;
        self.back = self.store.above[idx as usize];
        self.remaining -= 1;
        Some(self.handle(idx))
    }
}

impl ExactSizeIterator for Stack<'_> {}

impl core::iter::FusedIterator for Stack<'_> {}
