// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the shell core and the display-server substrate.
//!
//! Perch splits the work of a window manager in two. The substrate is
//! everything protocol-facing: client connections, the surface tree, seat
//! and keymap handling, GPU buffers, output mode-setting. The core owns the
//! view registry and the interaction policy on top of it. The seam between
//! them is made of three traits:
//!
//! - **[`SurfaceAdapter`]** answers geometric questions about a view's
//!   surface tree (hit-testing, window geometry, sub-surface enumeration)
//!   and maps a surface to its owning client.
//! - **[`Substrate`]** receives everything the core decides: activation,
//!   focus changes, forwarded input, size requests, cursor images, and
//!   session-level commands.
//! - **[`SurfaceRenderer`]** draws one surface into a destination rectangle
//!   during the render pass.
//!
//! All calls are synchronous and happen on the substrate's event thread.
//! Nothing here blocks or awaits a reply; in particular
//! [`Substrate::request_size`] is a request the client may honour later.

use kurbo::{Point, Rect, Size, Vec2};

use crate::binding::Command;
use crate::input::{Axis, Button, Modifiers, PressState};
use crate::view::{ClientId, SurfaceHandle};

/// Cursor image selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CursorImage {
    /// A named image from the cursor theme.
    Named(&'static str),
    /// A client-provided surface, with its hotspot in surface coordinates.
    Client {
        /// Surface to show, or `None` to hide the cursor.
        surface: Option<SurfaceHandle>,
        /// Hotspot offset inside the surface.
        hotspot: Point,
    },
}

impl CursorImage {
    /// The theme's default arrow.
    pub const DEFAULT: Self = Self::Named("left_ptr");
}

/// Geometric queries on a view's surface tree.
///
/// Coordinates passed in and out are *view-local*: the origin is the top-left
/// corner of the view's root surface, which the core places at the view's
/// layout position.
pub trait SurfaceAdapter {
    /// Returns the surface under `local` and the point in that surface's
    /// coordinates, or `None` if the point misses every sub-surface.
    fn surface_at(&self, root: SurfaceHandle, local: Point) -> Option<(SurfaceHandle, Point)>;

    /// Returns the window geometry box of `root`.
    ///
    /// The origin is the offset of the visible window inside the root surface
    /// (client-side decorations and shadows live outside it).
    fn geometry(&self, root: SurfaceHandle) -> Rect;

    /// Calls `f` for each renderable surface of `root`, back to front, with
    /// its offset from the root and its size.
    fn for_each_surface(&self, root: SurfaceHandle, f: &mut dyn FnMut(SurfaceHandle, Vec2, Size));

    /// Returns the client owning `surface`.
    fn client_of(&self, surface: SurfaceHandle) -> ClientId;
}

/// Receives the decisions of the shell core.
pub trait Substrate: SurfaceAdapter {
    /// Sets or clears the activated (focused-looking) state of a toplevel.
    fn set_activated(&mut self, root: SurfaceHandle, activated: bool);

    /// Gives keyboard focus to `surface`, sending the current modifiers.
    fn keyboard_enter(&mut self, surface: SurfaceHandle, modifiers: Modifiers);

    /// Removes keyboard focus from every surface.
    fn keyboard_clear_focus(&mut self);

    /// Forwards a key event to the keyboard-focused client.
    fn forward_key(&mut self, time: u32, keycode: u32, state: PressState);

    /// Forwards a modifier update to the keyboard-focused client.
    fn forward_modifiers(&mut self, modifiers: Modifiers);

    /// Forwards a button event to the pointer-focused client.
    fn forward_button(&mut self, time: u32, button: Button, state: PressState);

    /// Forwards a scroll event to the pointer-focused client.
    fn forward_axis(&mut self, time: u32, axis: Axis, delta: f64);

    /// Forwards a pointer frame boundary to the pointer-focused client.
    fn forward_frame(&mut self);

    /// Gives pointer focus to `surface` at surface-local `local`.
    fn pointer_enter(&mut self, surface: SurfaceHandle, local: Point);

    /// Sends motion to the pointer-focused surface.
    fn pointer_motion(&mut self, time: u32, local: Point);

    /// Removes pointer focus from every surface.
    fn pointer_clear_focus(&mut self);

    /// Asks the client behind `root` to resize its window geometry.
    fn request_size(&mut self, root: SurfaceHandle, size: Size);

    /// Changes the cursor image.
    fn set_cursor_image(&mut self, image: CursorImage);

    /// Moves the hardware cursor to a layout position.
    fn warp_cursor(&mut self, position: Point);

    /// Launches a program.
    fn spawn(&mut self, command: &Command);

    /// Ends the session.
    fn terminate(&mut self);

    /// Switches to virtual terminal `vt`.
    fn change_vt(&mut self, vt: u32);
}

/// Draws surfaces during the render pass.
pub trait SurfaceRenderer {
    /// Draws `surface` into `dest`, given in output-local pixels.
    fn render_surface(&mut self, surface: SurfaceHandle, dest: Rect);
}
