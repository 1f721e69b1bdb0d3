// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View registry data model.
//!
//! A *view* is one top-level application window. Each view has:
//!
//! - An identity ([`ViewId`]), a generational handle that becomes stale when
//!   the view is destroyed, so use-after-destroy bugs surface as panics at
//!   the API level instead of touching a recycled slot.
//! - A non-owning [`SurfaceHandle`] naming the substrate surface behind it.
//! - A layout [`position`](ViewStore::position), a
//!   [`mapped`](ViewStore::is_mapped) flag, and an
//!   [`activated`](ViewStore::is_activated) indicator.
//! - Membership in one stacking sequence. The front of the sequence is the
//!   topmost view; there is no separate z-index.
//!
//! Views are stored in struct-of-arrays layout with index-based handles and
//! intrusive doubly-linked stacking indices, so moving a view to the front or
//! the back is O(1).
//!
//! # Change tracking
//!
//! Mutations mark the matching channel in [`damage`](crate::damage).
//! [`ViewStore::evaluate`] drains them into a [`ViewChanges`] record.

mod evaluate;
mod id;
mod stack;
mod store;

pub use evaluate::ViewChanges;
pub use id::{ClientId, INVALID, SurfaceHandle, ViewId};
pub use stack::Stack;
pub use store::ViewStore;
