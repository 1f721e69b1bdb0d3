// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive move/resize state machine.
//!
//! ```text
//!            move action ──► Moving ───┐
//!   Idle ──┤                            ├── button release ──► Idle
//!            resize action ─► Resizing ─┘
//! ```
//!
//! [`Grab`] holds the state and the anchors captured when the grab started.
//! It does not touch the registry: [`Grab::update`] turns a pointer position
//! into a [`GrabUpdate`] and the shell applies it. Guards (pointer focus,
//! edge inference, cursor warping) live in the shell, which owns the inputs
//! they need.

use kurbo::{Point, Rect, Size, Vec2};

use crate::input::Edges;
use crate::view::ViewId;

/// Smallest size, per axis, a resize may request.
pub const MIN_SIZE: f64 = 1.0;

/// Kind of interactive grab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrabMode {
    /// Interactive move.
    Move,
    /// Interactive resize along the given edges.
    Resize(Edges),
}

/// Current grab state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Grab {
    /// No grab in progress.
    #[default]
    Idle,
    /// The view follows the pointer.
    Moving {
        /// Grabbed view.
        view: ViewId,
        /// Pointer position minus view position at grab start.
        anchor: Vec2,
    },
    /// The view is resized along `edges`.
    Resizing {
        /// Grabbed view.
        view: ViewId,
        /// Edges that follow the pointer.
        edges: Edges,
        /// Pointer position at grab start.
        anchor: Point,
        /// View position at grab start.
        origin: Point,
        /// Window geometry size at grab start.
        size: Size,
    },
}

/// Result of feeding a pointer position to an active grab.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrabUpdate {
    /// Grabbed view.
    pub view: ViewId,
    /// New layout position of the view.
    pub position: Point,
    /// Size to request from the client, for resize grabs.
    pub size: Option<Size>,
}

impl Grab {
    /// Starts a move grab.
    #[must_use]
    pub fn moving(view: ViewId, pointer: Point, position: Point) -> Self {
        Self::Moving {
            view,
            anchor: pointer - position,
        }
    }

    /// Starts a resize grab.
    #[must_use]
    pub fn resizing(view: ViewId, edges: Edges, pointer: Point, position: Point, size: Size) -> Self {
        Self::Resizing {
            view,
            edges,
            anchor: pointer,
            origin: position,
            size,
        }
    }

    /// Returns `true` unless the state is [`Grab::Idle`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns the grabbed view.
    #[must_use]
    pub fn target(&self) -> Option<ViewId> {
        match *self {
            Self::Idle => None,
            Self::Moving { view, .. } | Self::Resizing { view, .. } => Some(view),
        }
    }

    /// Returns the kind of grab in progress.
    #[must_use]
    pub fn mode(&self) -> Option<GrabMode> {
        match *self {
            Self::Idle => None,
            Self::Moving { .. } => Some(GrabMode::Move),
            Self::Resizing { edges, .. } => Some(GrabMode::Resize(edges)),
        }
    }

    /// Returns to [`Grab::Idle`], yielding the previous state.
    pub fn end(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Computes where the grabbed view goes for a pointer at `pointer`.
    ///
    /// Returns `None` when idle.
    #[must_use]
    pub fn update(&self, pointer: Point) -> Option<GrabUpdate> {
        match *self {
            Self::Idle => None,
            Self::Moving { view, anchor } => Some(GrabUpdate {
                view,
                position: pointer - anchor,
                size: None,
            }),
            Self::Resizing {
                view,
                edges,
                anchor,
                origin,
                size,
            } => {
                let delta = pointer - anchor;
                let (x, width) = resize_axis(
                    origin.x,
                    size.width,
                    delta.x,
                    edges.contains(Edges::LEFT),
                    edges.contains(Edges::RIGHT),
                );
                let (y, height) = resize_axis(
                    origin.y,
                    size.height,
                    delta.y,
                    edges.contains(Edges::TOP),
                    edges.contains(Edges::BOTTOM),
                );
                Some(GrabUpdate {
                    view,
                    position: Point::new(x, y),
                    size: Some(Size::new(width, height)),
                })
            }
        }
    }
}

/// Applies a pointer delta to one axis.
///
/// `near` is the top or left edge, `far` the bottom or right edge. When both
/// are set the near edge wins. The extent never drops below [`MIN_SIZE`]; at
/// the floor the far edge stays where it was.
fn resize_axis(start: f64, extent: f64, delta: f64, near: bool, far: bool) -> (f64, f64) {
    if near {
        let new_extent = extent - delta;
        if new_extent < MIN_SIZE {
            (start + extent - MIN_SIZE, MIN_SIZE)
        } else {
            (start + delta, new_extent)
        }
    } else if far {
        (start, (extent + delta).max(MIN_SIZE))
    } else {
        (start, extent)
    }
}

/// Picks the edges nearest to `pointer` inside `geometry`.
///
/// The geometry box is split into quadrants around its center; the pointer's
/// quadrant names one horizontal and one vertical edge.
#[must_use]
pub fn nearest_edges(geometry: Rect, pointer: Point) -> Edges {
    let center = geometry.center();
    let horizontal = if pointer.x < center.x {
        Edges::LEFT
    } else {
        Edges::RIGHT
    };
    let vertical = if pointer.y < center.y {
        Edges::TOP
    } else {
        Edges::BOTTOM
    };
    horizontal | vertical
}
