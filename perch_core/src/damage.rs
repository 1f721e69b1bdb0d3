// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change-tracking channel constants.
//!
//! The view registry records every mutation in one of several independent
//! channels (via [`understory_dirty`]). All channels are local-only: views do
//! not form a hierarchy, so nothing propagates between keys.
//!
//! - [`STACKING`] is marked on structural changes: a view is created,
//!   destroyed, raised, or lowered.
//! - [`GEOMETRY`] is marked when a view's layout position changes.
//! - [`MAPPING`] is marked when a view is mapped or unmapped.
//! - [`ACTIVATION`] is marked when a view's activated indicator flips.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`ViewStore::evaluate`](crate::view::ViewStore::evaluate) call drains all
//! channels and surfaces the result as
//! [`ViewChanges`](crate::view::ViewChanges), which the frame driver uses to
//! decide what needs to be redrawn.

use understory_dirty::Channel;

/// Stacking order changed (create, destroy, raise, lower).
pub const STACKING: Channel = Channel::new(0);

/// Layout position changed.
pub const GEOMETRY: Channel = Channel::new(1);

/// Mapped flag changed.
pub const MAPPING: Channel = Channel::new(2);

/// Activated indicator changed.
pub const ACTIVATION: Channel = Channel::new(3);
