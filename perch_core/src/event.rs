// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events delivered by the substrate.
//!
//! One sum type per category, each with its own ingress function on
//! [`Shell`](crate::shell::Shell). Surfaces are named by their
//! [`SurfaceHandle`]; events for surfaces the shell does not know are
//! ignored.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::input::{Axis, Button, Edges, Keysym, Modifiers, PressState};
use crate::view::{ClientId, SurfaceHandle};

/// Toplevel lifecycle and client requests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// A new toplevel was created. It starts unmapped.
    Created(SurfaceHandle),
    /// The toplevel committed its first buffer and is ready to show.
    Mapped(SurfaceHandle),
    /// The toplevel lost its buffer.
    Unmapped(SurfaceHandle),
    /// The toplevel was destroyed.
    Destroyed(SurfaceHandle),
    /// The client asked for an interactive move.
    RequestMove(SurfaceHandle),
    /// The client asked for an interactive resize along `edges`.
    RequestResize {
        /// Toplevel to resize.
        surface: SurfaceHandle,
        /// Edges the client wants to drag.
        edges: Edges,
    },
}

/// Keyboard input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyboardEvent {
    /// A key changed state.
    Key {
        /// Event timestamp in milliseconds.
        time: u32,
        /// Raw keycode, forwarded to clients untouched.
        keycode: u32,
        /// Keysyms the keycode produced under the current keymap state.
        keysyms: Vec<Keysym>,
        /// Press or release.
        state: PressState,
    },
    /// The effective modifier mask changed.
    Modifiers(Modifiers),
}

/// Pointer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Relative motion.
    Motion {
        /// Event timestamp in milliseconds.
        time: u32,
        /// Displacement in layout units.
        delta: Vec2,
    },
    /// Absolute motion, already mapped into layout coordinates.
    MotionAbsolute {
        /// Event timestamp in milliseconds.
        time: u32,
        /// New pointer position.
        position: Point,
    },
    /// A button changed state.
    Button {
        /// Event timestamp in milliseconds.
        time: u32,
        /// Button code.
        button: Button,
        /// Press or release.
        state: PressState,
    },
    /// Scroll.
    Axis {
        /// Event timestamp in milliseconds.
        time: u32,
        /// Scroll axis.
        axis: Axis,
        /// Scroll amount.
        delta: f64,
    },
    /// End of a group of pointer events.
    Frame,
    /// A client asked to set the cursor image.
    CursorRequest {
        /// Requesting client.
        client: ClientId,
        /// Cursor surface, or `None` to hide the cursor.
        surface: Option<SurfaceHandle>,
        /// Hotspot in cursor-surface coordinates.
        hotspot: Point,
    },
}
