// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording substrate for unit tests.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};

use crate::binding::Command;
use crate::input::{Axis, Button, Modifiers, PressState};
use crate::substrate::{CursorImage, Substrate, SurfaceAdapter, SurfaceRenderer};
use crate::view::{ClientId, SurfaceHandle};

/// One output call made by the shell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    SetActivated(SurfaceHandle, bool),
    KeyboardEnter(SurfaceHandle, Modifiers),
    KeyboardClearFocus,
    ForwardKey(u32, PressState),
    ForwardModifiers(Modifiers),
    ForwardButton(Button, PressState),
    ForwardAxis(Axis, f64),
    ForwardFrame,
    PointerEnter(SurfaceHandle, Point),
    PointerMotion(Point),
    PointerClearFocus,
    RequestSize(SurfaceHandle, Size),
    SetCursor(CursorImage),
    Warp(Point),
    Spawn(Command),
    Terminate,
    ChangeVt(u32),
}

/// A toplevel with an optional stack of child surfaces.
#[derive(Clone, Debug)]
pub(crate) struct MockSurface {
    pub(crate) size: Size,
    pub(crate) geometry: Rect,
    pub(crate) client: ClientId,
    /// Children in back-to-front order, with their offset from the root.
    pub(crate) children: Vec<(SurfaceHandle, Vec2, Size)>,
}

#[derive(Debug, Default)]
pub(crate) struct MockSubstrate {
    pub(crate) surfaces: HashMap<SurfaceHandle, MockSurface>,
    pub(crate) owners: HashMap<SurfaceHandle, ClientId>,
    pub(crate) calls: Vec<Call>,
}

impl MockSubstrate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a toplevel whose window geometry covers the whole root surface.
    pub(crate) fn add(&mut self, root: SurfaceHandle, size: Size) {
        self.add_owned(root, size, ClientId(u32::try_from(root.0).unwrap_or(u32::MAX)));
    }

    pub(crate) fn add_owned(&mut self, root: SurfaceHandle, size: Size, client: ClientId) {
        self.owners.insert(root, client);
        self.surfaces.insert(
            root,
            MockSurface {
                size,
                geometry: Rect::from_origin_size(Point::ZERO, size),
                client,
                children: Vec::new(),
            },
        );
    }

    pub(crate) fn add_child(&mut self, root: SurfaceHandle, child: SurfaceHandle, offset: Vec2, size: Size) {
        let parent = self.surfaces.get_mut(&root).unwrap();
        parent.children.push((child, offset, size));
        let client = parent.client;
        self.owners.insert(child, client);
    }

    pub(crate) fn take_calls(&mut self) -> Vec<Call> {
        core::mem::take(&mut self.calls)
    }
}

impl SurfaceAdapter for MockSubstrate {
    fn surface_at(&self, root: SurfaceHandle, local: Point) -> Option<(SurfaceHandle, Point)> {
        let surface = self.surfaces.get(&root)?;
        for &(child, offset, size) in surface.children.iter().rev() {
            let rect = Rect::from_origin_size(Point::ZERO + offset, size);
            if rect.contains(local) {
                return Some((child, local - offset));
            }
        }
        Rect::from_origin_size(Point::ZERO, surface.size)
            .contains(local)
            .then_some((root, local))
    }

    fn geometry(&self, root: SurfaceHandle) -> Rect {
        self.surfaces
            .get(&root)
            .map_or(Rect::ZERO, |surface| surface.geometry)
    }

    fn for_each_surface(&self, root: SurfaceHandle, f: &mut dyn FnMut(SurfaceHandle, Vec2, Size)) {
        if let Some(surface) = self.surfaces.get(&root) {
            f(root, Vec2::ZERO, surface.size);
            for &(child, offset, size) in &surface.children {
                f(child, offset, size);
            }
        }
    }

    fn client_of(&self, surface: SurfaceHandle) -> ClientId {
        self.owners.get(&surface).copied().unwrap_or(ClientId(u32::MAX))
    }
}

impl Substrate for MockSubstrate {
    fn set_activated(&mut self, root: SurfaceHandle, activated: bool) {
        self.calls.push(Call::SetActivated(root, activated));
    }

    fn keyboard_enter(&mut self, surface: SurfaceHandle, modifiers: Modifiers) {
        self.calls.push(Call::KeyboardEnter(surface, modifiers));
    }

    fn keyboard_clear_focus(&mut self) {
        self.calls.push(Call::KeyboardClearFocus);
    }

    fn forward_key(&mut self, _time: u32, keycode: u32, state: PressState) {
        self.calls.push(Call::ForwardKey(keycode, state));
    }

    fn forward_modifiers(&mut self, modifiers: Modifiers) {
        self.calls.push(Call::ForwardModifiers(modifiers));
    }

    fn forward_button(&mut self, _time: u32, button: Button, state: PressState) {
        self.calls.push(Call::ForwardButton(button, state));
    }

    fn forward_axis(&mut self, _time: u32, axis: Axis, delta: f64) {
        self.calls.push(Call::ForwardAxis(axis, delta));
    }

    fn forward_frame(&mut self) {
        self.calls.push(Call::ForwardFrame);
    }

    fn pointer_enter(&mut self, surface: SurfaceHandle, local: Point) {
        self.calls.push(Call::PointerEnter(surface, local));
    }

    fn pointer_motion(&mut self, _time: u32, local: Point) {
        self.calls.push(Call::PointerMotion(local));
    }

    fn pointer_clear_focus(&mut self) {
        self.calls.push(Call::PointerClearFocus);
    }

    fn request_size(&mut self, root: SurfaceHandle, size: Size) {
        self.calls.push(Call::RequestSize(root, size));
    }

    fn set_cursor_image(&mut self, image: CursorImage) {
        self.calls.push(Call::SetCursor(image));
    }

    fn warp_cursor(&mut self, position: Point) {
        self.calls.push(Call::Warp(position));
    }

    fn spawn(&mut self, command: &Command) {
        self.calls.push(Call::Spawn(command.clone()));
    }

    fn terminate(&mut self) {
        self.calls.push(Call::Terminate);
    }

    fn change_vt(&mut self, vt: u32) {
        self.calls.push(Call::ChangeVt(vt));
    }
}

/// Renderer that records every draw call.
#[derive(Debug, Default)]
pub(crate) struct MockRenderer {
    pub(crate) draws: Vec<(SurfaceHandle, Rect)>,
}

impl SurfaceRenderer for MockRenderer {
    fn render_surface(&mut self, surface: SurfaceHandle, dest: Rect) {
        self.draws.push((surface, dest));
    }
}
