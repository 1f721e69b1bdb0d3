// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays view storage with allocation, stacking, and state management.

use alloc::vec::Vec;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{INVALID, SurfaceHandle, ViewId};
use super::stack::Stack;
use crate::damage;

/// Struct-of-arrays storage for all views, plus their stacking order.
///
/// Views are addressed by [`ViewId`] handles. Internally, each view occupies
/// a slot in parallel arrays. Destroyed views are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Every live view is a member of a single doubly-linked stacking sequence.
/// The front of the sequence is the topmost view; raising and lowering are
/// O(1) relinks that preserve the relative order of every other view.
#[derive(Debug)]
pub struct ViewStore {
    // -- Identity --
    pub(crate) surface: Vec<SurfaceHandle>,

    // -- Stacking links --
    /// Neighbour towards the front (topmost), or `INVALID` for the front view.
    pub(crate) above: Vec<u32>,
    /// Neighbour towards the back, or `INVALID` for the back view.
    pub(crate) below: Vec<u32>,
    pub(crate) front: u32,
    pub(crate) back: u32,
    pub(crate) count: u32,

    // -- State --
    pub(crate) position: Vec<Point>,
    pub(crate) mapped: Vec<bool>,
    pub(crate) activated: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Change tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    /// Creates an empty view store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: Vec::new(),
            above: Vec::new(),
            below: Vec::new(),
            front: INVALID,
            back: INVALID,
            count: 0,
            position: Vec::new(),
            mapped: Vec::new(),
            activated: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a view for `surface` and inserts it at the front of the stack.
    ///
    /// The view starts unmapped, deactivated, at the layout origin.
    pub fn create_view(&mut self, surface: SurfaceHandle) -> ViewId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.surface[idx as usize] = surface;
            self.above[idx as usize] = INVALID;
            self.below[idx as usize] = INVALID;
            self.position[idx as usize] = Point::ZERO;
            self.mapped[idx as usize] = false;
            self.activated[idx as usize] = false;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.surface.push(surface);
            self.above.push(INVALID);
            self.below.push(INVALID);
            self.position.push(Point::ZERO);
            self.mapped.push(false);
            self.activated.push(false);
            self.generation.push(0);
            idx
        };

        self.link_front(idx);
        self.count += 1;
        self.pending_added.push(idx);
        self.dirty.mark(idx, damage::STACKING);

        ViewId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a view, unlinking it from the stack and freeing its slot.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.validate(id);
        let idx = id.idx;

        self.unlink(idx);
        self.count -= 1;

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, damage::STACKING);
    }

    /// Returns whether the given handle refers to a live view.
    #[must_use]
    pub fn is_alive(&self, id: ViewId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Returns `true` if no views are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    // -- Stacking API --

    /// Moves `id` to the front of the stack.
    ///
    /// A no-op if the view is already in front.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn raise(&mut self, id: ViewId) {
        self.validate(id);
        if self.front == id.idx {
            return;
        }
        self.unlink(id.idx);
        self.link_front(id.idx);
        self.dirty.mark(id.idx, damage::STACKING);
    }

    /// Moves `id` to the back of the stack.
    ///
    /// A no-op if the view is already at the back.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn lower(&mut self, id: ViewId) {
        self.validate(id);
        if self.back == id.idx {
            return;
        }
        self.unlink(id.idx);
        self.link_back(id.idx);
        self.dirty.mark(id.idx, damage::STACKING);
    }

    /// Returns the topmost view, if any.
    #[must_use]
    pub fn front(&self) -> Option<ViewId> {
        self.handle_at(self.front)
    }

    /// Returns the bottommost view, if any.
    #[must_use]
    pub fn back(&self) -> Option<ViewId> {
        self.handle_at(self.back)
    }

    /// Returns an iterator over all live views from front (topmost) to back.
    ///
    /// Reverse it with [`Iterator::rev`] (or use
    /// [`iter_back_to_front`](Self::iter_back_to_front)) for painter's order.
    #[must_use]
    pub fn iter_front_to_back(&self) -> Stack<'_> {
        Stack::new(self)
    }

    /// Returns an iterator over all live views from back to front.
    #[must_use]
    pub fn iter_back_to_front(&self) -> core::iter::Rev<Stack<'_>> {
        Stack::new(self).rev()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the surface backing a view.
    #[must_use]
    pub fn surface(&self, id: ViewId) -> SurfaceHandle {
        self.validate(id);
        self.surface[id.idx as usize]
    }

    /// Returns the layout position of a view.
    #[must_use]
    pub fn position(&self, id: ViewId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns whether a view is mapped.
    #[must_use]
    pub fn is_mapped(&self, id: ViewId) -> bool {
        self.validate(id);
        self.mapped[id.idx as usize]
    }

    /// Returns whether a view carries the activated indicator.
    #[must_use]
    pub fn is_activated(&self, id: ViewId) -> bool {
        self.validate(id);
        self.activated[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the layout position of a view.
    pub fn set_position(&mut self, id: ViewId, position: Point) {
        self.validate(id);
        if self.position[id.idx as usize] != position {
            self.position[id.idx as usize] = position;
            self.dirty.mark(id.idx, damage::GEOMETRY);
        }
    }

    /// Sets the mapped flag of a view.
    pub fn set_mapped(&mut self, id: ViewId, mapped: bool) {
        self.validate(id);
        if self.mapped[id.idx as usize] != mapped {
            self.mapped[id.idx as usize] = mapped;
            self.dirty.mark(id.idx, damage::MAPPING);
        }
    }

    /// Sets the activated indicator of a view.
    pub fn set_activated(&mut self, id: ViewId, activated: bool) {
        self.validate(id);
        if self.activated[id.idx as usize] != activated {
            self.activated[id.idx as usize] = activated;
            self.dirty.mark(id.idx, damage::ACTIVATION);
        }
    }

    // -- Raw-index accessors for the frame driver --
    //
    // These accept raw slot indices (as found in `ViewChanges`) rather than
    // `ViewId` handles, skipping generation validation.

    /// Returns the surface at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn surface_at(&self, idx: u32) -> SurfaceHandle {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.surface[idx as usize]
    }

    /// Returns the layout position at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn position_at(&self, idx: u32) -> Point {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.position[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ViewId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ViewId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn handle_at(&self, idx: u32) -> Option<ViewId> {
        if idx == INVALID {
            None
        } else {
            Some(ViewId {
                idx,
                generation: self.generation[idx as usize],
            })
        }
    }

    /// Links a detached slot in front of the current front view.
    fn link_front(&mut self, idx: u32) {
        self.above[idx as usize] = INVALID;
        self.below[idx as usize] = self.front;
        if self.front != INVALID {
            self.above[self.front as usize] = idx;
        } else {
            self.back = idx;
        }
        self.front = idx;
    }

    /// Links a detached slot behind the current back view.
    fn link_back(&mut self, idx: u32) {
        self.below[idx as usize] = INVALID;
        self.above[idx as usize] = self.back;
        if self.back != INVALID {
            self.below[self.back as usize] = idx;
        } else {
            self.front = idx;
        }
        self.back = idx;
    }

    /// Removes `idx` from the stacking sequence without touching dirty state.
    fn unlink(&mut self, idx: u32) {
        let above = self.above[idx as usize];
        let below = self.below[idx as usize];

        if above != INVALID {
            self.below[above as usize] = below;
        } else {
            // Was the front view.
            self.front = below;
        }

        if below != INVALID {
            self.above[below as usize] = above;
        } else {
            // Was the back view.
            self.back = above;
        }

        self.above[idx as usize] = INVALID;
        self.below[idx as usize] = INVALID;
    }
}
