// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shell context and its event ingress.
//!
//! [`Shell`] owns every piece of interaction state: the view registry, the
//! surface lookup table, keyboard and pointer focus, the current grab, the
//! modifier mask, and the validated bindings. There are no globals; the
//! substrate drives the shell by calling one ingress function per event
//! category:
//!
//! - [`handle_surface`](Shell::handle_surface) for toplevel lifecycle and
//!   client move/resize requests,
//! - [`handle_keyboard`](Shell::handle_keyboard) for keys and modifiers,
//! - [`handle_pointer`](Shell::handle_pointer) for motion, buttons, scroll
//!   and cursor requests,
//!
//! and once per output refresh, [`render_frame`](Shell::render_frame).
//!
//! Every ingress function takes the substrate as `&mut dyn Substrate` and a
//! [`Tracer`] for diagnostics.
//!
//! # Input routing
//!
//! Keys and buttons are routed asymmetrically. A key press is offered to the
//! key bindings first and only reaches the focused client if no binding
//! fired; releases always reach the client. A button event always reaches
//! the pointer-focused client first, and a press is then offered to the
//! button bindings as well.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::binding::{Action, Bindings};
use crate::compose::{self, Hit, RenderStats};
use crate::config::{Config, ConfigError};
use crate::event::{KeyboardEvent, PointerEvent, SurfaceEvent};
use crate::grab::{self, Grab, GrabMode, GrabUpdate};
use crate::input::{Edges, Modifiers, PressState};
use crate::output::OutputInfo;
use crate::substrate::{CursorImage, Substrate, SurfaceAdapter, SurfaceRenderer};
use crate::trace::{
    BindingEvent, FrameEvent, GrabEvent, GrabPhase, Tracer, Trigger, ViewEvent, ViewEventKind,
};
use crate::view::{SurfaceHandle, ViewChanges, ViewId, ViewStore};

/// The surface holding pointer focus and the view it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerFocus {
    /// View owning the surface.
    pub view: ViewId,
    /// Root surface or sub-surface under the pointer.
    pub surface: SurfaceHandle,
}

/// Interaction state of the shell.
#[derive(Debug)]
pub struct Shell {
    pub(crate) views: ViewStore,
    pub(crate) surfaces: HashMap<SurfaceHandle, ViewId>,
    pub(crate) focused: Option<ViewId>,
    pub(crate) pointer: Point,
    pub(crate) pointer_focus: Option<PointerFocus>,
    pub(crate) grab: Grab,
    pub(crate) modifiers: Modifiers,
    pub(crate) bindings: Bindings,
    pub(crate) sloppy_focus: bool,
    pub(crate) changes: ViewChanges,
    pub(crate) frame_index: u64,
}

impl Shell {
    /// Creates a shell dispatching from `bindings`.
    #[must_use]
    pub fn new(bindings: Bindings) -> Self {
        Self {
            views: ViewStore::new(),
            surfaces: HashMap::new(),
            focused: None,
            pointer: Point::ZERO,
            pointer_focus: None,
            grab: Grab::Idle,
            modifiers: Modifiers::empty(),
            bindings,
            sloppy_focus: false,
            changes: ViewChanges::default(),
            frame_index: 0,
        }
    }

    /// Validates `config` and creates a shell from it.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut shell = Self::new(config.validate()?);
        shell.sloppy_focus = config.sloppy_focus;
        Ok(shell)
    }

    // -- Accessors --

    /// Returns the view registry.
    #[must_use]
    pub fn views(&self) -> &ViewStore {
        &self.views
    }

    /// Returns the view created for `surface`, if any.
    #[must_use]
    pub fn view_for(&self, surface: SurfaceHandle) -> Option<ViewId> {
        self.surfaces.get(&surface).copied()
    }

    /// Returns the view holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    /// Returns the pointer position in layout coordinates.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Returns the surface holding pointer focus.
    #[must_use]
    pub fn pointer_focus(&self) -> Option<PointerFocus> {
        self.pointer_focus
    }

    /// Returns the grab state.
    #[must_use]
    pub fn grab(&self) -> &Grab {
        &self.grab
    }

    /// Returns the last modifier mask reported by the substrate.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns the bindings in use.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Enables or disables focus-follows-pointer.
    pub fn set_sloppy_focus(&mut self, enabled: bool) {
        self.sloppy_focus = enabled;
    }

    /// Returns the registry changes drained by the last
    /// [`render_frame`](Self::render_frame).
    #[must_use]
    pub fn last_changes(&self) -> &ViewChanges {
        &self.changes
    }

    /// Finds the topmost mapped view under a layout point.
    #[must_use]
    pub fn hit_test(&self, adapter: &dyn SurfaceAdapter, point: Point) -> Option<Hit> {
        compose::hit_test(&self.views, adapter, point)
    }

    // -- Ingress --

    /// Handles a toplevel lifecycle event or client request.
    pub fn handle_surface(
        &mut self,
        event: SurfaceEvent,
        substrate: &mut dyn Substrate,
        tracer: &mut Tracer<'_>,
    ) {
        match event {
            SurfaceEvent::Created(surface) => {
                if self.surfaces.contains_key(&surface) {
                    return;
                }
                let view = self.views.create_view(surface);
                self.surfaces.insert(surface, view);
                tracer.view(&ViewEvent {
                    view,
                    surface,
                    kind: ViewEventKind::Created,
                });
            }
            SurfaceEvent::Mapped(surface) => {
                let Some(view) = self.view_for(surface) else {
                    return;
                };
                self.views.set_mapped(view, true);
                tracer.view(&ViewEvent {
                    view,
                    surface,
                    kind: ViewEventKind::Mapped,
                });
                self.focus(Some(view), substrate, tracer);
            }
            SurfaceEvent::Unmapped(surface) => {
                let Some(view) = self.view_for(surface) else {
                    return;
                };
                if self.views.is_mapped(view) {
                    self.unmap(view, substrate, tracer);
                }
            }
            SurfaceEvent::Destroyed(surface) => {
                let Some(view) = self.surfaces.remove(&surface) else {
                    return;
                };
                if self.views.is_mapped(view) {
                    self.unmap(view, substrate, tracer);
                } else {
                    self.release(view, substrate, tracer);
                }
                self.views.destroy_view(view);
                tracer.view(&ViewEvent {
                    view,
                    surface,
                    kind: ViewEventKind::Destroyed,
                });
            }
            SurfaceEvent::RequestMove(surface) => {
                let view = self.view_for(surface);
                self.begin_move(view, tracer);
            }
            SurfaceEvent::RequestResize { surface, edges } => {
                let view = self.view_for(surface);
                self.begin_resize(view, Some(edges), substrate, tracer);
            }
        }
    }

    /// Handles a key or modifier event.
    pub fn handle_keyboard(
        &mut self,
        event: KeyboardEvent,
        substrate: &mut dyn Substrate,
        tracer: &mut Tracer<'_>,
    ) {
        match event {
            KeyboardEvent::Key {
                time,
                keycode,
                keysyms,
                state,
            } => {
                let mut handled = false;
                if state == PressState::Pressed {
                    let modifiers = self.normalized_modifiers();
                    let mut fired = Vec::new();
                    for keysym in keysyms {
                        fired.clear();
                        handled |= self
                            .bindings
                            .dispatch_key(self.modifiers, keysym, |a| fired.push(a));
                        for &action in &fired {
                            tracer.binding(&BindingEvent {
                                trigger: Trigger::Key(keysym),
                                modifiers,
                                action,
                            });
                            self.run_action(action, substrate, tracer);
                        }
                    }
                }
                if !handled {
                    substrate.forward_key(time, keycode, state);
                }
            }
            KeyboardEvent::Modifiers(modifiers) => {
                self.modifiers = modifiers;
                substrate.forward_modifiers(modifiers);
            }
        }
    }

    /// Handles a pointer event.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        substrate: &mut dyn Substrate,
        tracer: &mut Tracer<'_>,
    ) {
        match event {
            PointerEvent::Motion { time, delta } => {
                self.pointer += delta;
                self.pointer_moved(time, substrate, tracer);
            }
            PointerEvent::MotionAbsolute { time, position } => {
                self.pointer = position;
                self.pointer_moved(time, substrate, tracer);
            }
            PointerEvent::Button {
                time,
                button,
                state,
            } => {
                substrate.forward_button(time, button, state);
                match state {
                    PressState::Released => self.end_grab(tracer),
                    PressState::Pressed => {
                        let hit = compose::hit_test(&self.views, &*substrate, self.pointer);
                        self.focus(hit.map(|h| h.view), substrate, tracer);

                        let modifiers = self.normalized_modifiers();
                        let mut fired = Vec::new();
                        self.bindings
                            .dispatch_button(self.modifiers, button, |a| fired.push(a));
                        for action in fired {
                            tracer.binding(&BindingEvent {
                                trigger: Trigger::Button(button),
                                modifiers,
                                action,
                            });
                            self.run_action(action, substrate, tracer);
                        }
                    }
                }
            }
            PointerEvent::Axis { time, axis, delta } => {
                substrate.forward_axis(time, axis, delta);
            }
            PointerEvent::Frame => substrate.forward_frame(),
            PointerEvent::CursorRequest {
                client,
                surface,
                hotspot,
            } => {
                let allowed = self
                    .pointer_focus
                    .is_some_and(|focus| substrate.client_of(focus.surface) == client);
                if allowed {
                    substrate.set_cursor_image(CursorImage::Client { surface, hotspot });
                }
            }
        }
    }

    /// Moves the pointer to `position` and tells the substrate to follow.
    ///
    /// Does not generate motion; the next pointer event sees the new
    /// position.
    pub fn warp_pointer(&mut self, position: Point, substrate: &mut dyn Substrate) {
        self.pointer = position;
        substrate.warp_cursor(position);
    }

    // -- Frame --

    /// Drains registry changes and renders every mapped view onto `output`.
    pub fn render_frame(
        &mut self,
        adapter: &dyn SurfaceAdapter,
        output: &OutputInfo,
        renderer: &mut dyn SurfaceRenderer,
        tracer: &mut Tracer<'_>,
    ) -> RenderStats {
        self.views.evaluate_into(&mut self.changes);
        let stats = compose::render_output(&self.views, adapter, output, renderer);
        tracer.frame(&FrameEvent {
            frame_index: self.frame_index,
            output: output.id,
            views_drawn: stats.views,
            surfaces_drawn: stats.surfaces,
            changes: u32::try_from(self.changes.count()).unwrap_or(u32::MAX),
            restacked: self.changes.restacked,
        });
        self.frame_index += 1;
        stats
    }

    // -- Actions --

    /// Runs one bound action.
    pub fn run_action(
        &mut self,
        action: Action,
        substrate: &mut dyn Substrate,
        tracer: &mut Tracer<'_>,
    ) {
        match action {
            Action::Spawn(id) => {
                if let Some(command) = self.bindings.command(id) {
                    substrate.spawn(command);
                }
            }
            Action::FocusNext => self.focus_next(substrate, tracer),
            Action::FocusStack(dir) => self.focus_stack(dir, substrate, tracer),
            Action::Move => {
                let view = self.hit_test(&*substrate, self.pointer).map(|hit| hit.view);
                self.begin_move(view, tracer);
            }
            Action::Resize => {
                let view = self.hit_test(&*substrate, self.pointer).map(|hit| hit.view);
                self.begin_resize(view, None, substrate, tracer);
            }
            Action::Quit => substrate.terminate(),
            Action::ChangeVt(vt) => substrate.change_vt(vt),
        }
    }

    // -- Grabs --

    /// Starts an interactive move of `view`.
    ///
    /// Refused unless `view` is mapped, no grab is active, and the view's
    /// root surface holds pointer focus.
    pub fn begin_move(&mut self, view: Option<ViewId>, tracer: &mut Tracer<'_>) {
        let Some(view) = self.grab_candidate(view, GrabMode::Move, tracer) else {
            return;
        };
        self.grab = Grab::moving(view, self.pointer, self.views.position(view));
        self.trace_grab(GrabPhase::Begin, GrabMode::Move, Some(view), tracer);
    }

    /// Starts an interactive resize of `view`.
    ///
    /// With `edges` of `None` the pointer is first warped to the bottom-right
    /// corner of the window geometry and the edges nearest to it are used,
    /// so the drag always grows or shrinks the bottom and right edges. The
    /// guard is the same as for [`begin_move`](Self::begin_move).
    pub fn begin_resize(
        &mut self,
        view: Option<ViewId>,
        edges: Option<Edges>,
        substrate: &mut dyn Substrate,
        tracer: &mut Tracer<'_>,
    ) {
        let requested = GrabMode::Resize(edges.unwrap_or(Edges::empty()));
        let Some(view) = self.grab_candidate(view, requested, tracer) else {
            return;
        };
        let position = self.views.position(view);
        let geometry = self.view_geometry(view, substrate);
        let edges = match edges {
            Some(edges) => edges,
            None => {
                self.warp_pointer(Point::new(geometry.x1, geometry.y1), substrate);
                grab::nearest_edges(geometry, self.pointer)
            }
        };
        self.grab = Grab::resizing(view, edges, self.pointer, position, geometry.size());
        self.trace_grab(GrabPhase::Begin, GrabMode::Resize(edges), Some(view), tracer);
    }

    /// Returns the grab to idle, if a grab is active.
    pub fn end_grab(&mut self, tracer: &mut Tracer<'_>) {
        let previous = self.grab.end();
        if let Some(mode) = previous.mode() {
            self.trace_grab(GrabPhase::End, mode, previous.target(), tracer);
        }
    }

    fn grab_candidate(
        &self,
        view: Option<ViewId>,
        mode: GrabMode,
        tracer: &mut Tracer<'_>,
    ) -> Option<ViewId> {
        let accepted = view.filter(|&view| {
            !self.grab.is_active()
                && self.views.is_mapped(view)
                && self
                    .pointer_focus
                    .is_some_and(|focus| focus.surface == self.views.surface(view))
        });
        if accepted.is_none() {
            self.trace_grab(GrabPhase::Refused, mode, view, tracer);
        }
        accepted
    }

    /// Window geometry of `view` in layout coordinates.
    fn view_geometry(&self, view: ViewId, adapter: &dyn SurfaceAdapter) -> Rect {
        adapter.geometry(self.views.surface(view)) + self.views.position(view).to_vec2()
    }

    fn apply_grab(&mut self, update: GrabUpdate, substrate: &mut dyn Substrate) {
        self.views.set_position(update.view, update.position);
        if let Some(size) = update.size {
            substrate.request_size(self.views.surface(update.view), size);
        }
    }

    fn trace_grab(
        &self,
        phase: GrabPhase,
        mode: GrabMode,
        view: Option<ViewId>,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.grab(&GrabEvent {
            phase,
            mode,
            view,
            pointer: self.pointer,
        });
    }

    // -- Pointer --

    fn pointer_moved(&mut self, time: u32, substrate: &mut dyn Substrate, tracer: &mut Tracer<'_>) {
        if let Some(update) = self.grab.update(self.pointer) {
            self.apply_grab(update, substrate);
            return;
        }

        match compose::hit_test(&self.views, &*substrate, self.pointer) {
            Some(hit) => {
                if self.sloppy_focus {
                    self.focus(Some(hit.view), substrate, tracer);
                }
                let entered = self.pointer_focus.map(|focus| focus.surface) != Some(hit.surface);
                if entered {
                    self.pointer_focus = Some(PointerFocus {
                        view: hit.view,
                        surface: hit.surface,
                    });
                    substrate.pointer_enter(hit.surface, hit.local);
                } else {
                    substrate.pointer_motion(time, hit.local);
                }
            }
            None => {
                substrate.set_cursor_image(CursorImage::DEFAULT);
                if self.pointer_focus.take().is_some() {
                    substrate.pointer_clear_focus();
                }
            }
        }
    }

    // -- Teardown --

    fn unmap(&mut self, view: ViewId, substrate: &mut dyn Substrate, tracer: &mut Tracer<'_>) {
        self.views.set_mapped(view, false);
        tracer.view(&ViewEvent {
            view,
            surface: self.views.surface(view),
            kind: ViewEventKind::Unmapped,
        });
        self.release(view, substrate, tracer);
    }

    /// Drops every reference to `view` outside the registry.
    fn release(&mut self, view: ViewId, substrate: &mut dyn Substrate, tracer: &mut Tracer<'_>) {
        if self.grab.target() == Some(view) {
            self.end_grab(tracer);
        }
        if self.pointer_focus.is_some_and(|focus| focus.view == view) {
            self.pointer_focus = None;
            substrate.pointer_clear_focus();
        }
        if self.focused == Some(view) {
            self.unfocus(substrate, tracer);
            let next = self.front_mapped();
            self.focus(next, substrate, tracer);
        }
    }

    fn normalized_modifiers(&self) -> Modifiers {
        self.modifiers.normalized(self.bindings.ignored_modifiers)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Size, Vec2};

    use super::*;
    use crate::binding::CommandId;
    use crate::config::{ActionKind, Arg, KeyBinding, TERMINAL};
    use crate::input::{Axis, Button, Keysym};
    use crate::output::OutputId;
    use crate::testing::{Call, MockRenderer, MockSubstrate};
    use crate::view::ClientId;

    struct Fixture {
        shell: Shell,
        sub: MockSubstrate,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_config(&Config::default())
        }

        fn with_config(config: &Config) -> Self {
            Self {
                shell: Shell::from_config(config).unwrap(),
                sub: MockSubstrate::new(),
            }
        }

        /// Creates and maps a 100x100 toplevel at `position`.
        fn open(&mut self, id: u64, position: Point) -> ViewId {
            self.open_sized(id, position, Size::new(100.0, 100.0))
        }

        fn open_sized(&mut self, id: u64, position: Point, size: Size) -> ViewId {
            let surface = SurfaceHandle(id);
            self.sub.add(surface, size);
            self.surface(SurfaceEvent::Created(surface));
            let view = self.shell.view_for(surface).unwrap();
            self.shell.views.set_position(view, position);
            self.surface(SurfaceEvent::Mapped(surface));
            view
        }

        fn surface(&mut self, event: SurfaceEvent) {
            self.shell
                .handle_surface(event, &mut self.sub, &mut Tracer::none());
        }

        fn key(&mut self, keysym: Keysym, state: PressState) {
            self.shell.handle_keyboard(
                KeyboardEvent::Key {
                    time: 0,
                    keycode: 42,
                    keysyms: vec![keysym],
                    state,
                },
                &mut self.sub,
                &mut Tracer::none(),
            );
        }

        fn mods(&mut self, modifiers: Modifiers) {
            self.shell.handle_keyboard(
                KeyboardEvent::Modifiers(modifiers),
                &mut self.sub,
                &mut Tracer::none(),
            );
        }

        fn pointer(&mut self, event: PointerEvent) {
            self.shell
                .handle_pointer(event, &mut self.sub, &mut Tracer::none());
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.pointer(PointerEvent::MotionAbsolute {
                time: 0,
                position: Point::new(x, y),
            });
        }

        fn button(&mut self, button: Button, state: PressState) {
            self.pointer(PointerEvent::Button {
                time: 0,
                button,
                state,
            });
        }

        fn order(&self) -> Vec<ViewId> {
            self.shell.views.iter_front_to_back().collect()
        }
    }

    fn stacked_config() -> Config {
        let mut config = Config::default();
        let chord = |action, arg| KeyBinding {
            modifiers: Modifiers::LOGO,
            keysym: Keysym::from_char('x'),
            action,
            arg,
        };
        config.keys = vec![
            chord(ActionKind::Spawn, Arg::Opaque(TERMINAL)),
            chord(ActionKind::ChangeVt, Arg::UInt(2)),
        ];
        config
    }

    #[test]
    fn focus_moves_target_to_front_and_swaps_activation() {
        let mut f = Fixture::new();
        let c = f.open(3, Point::ZERO);
        let b = f.open(2, Point::ZERO);
        let a = f.open(1, Point::ZERO);
        assert_eq!(f.order(), [a, b, c]);
        assert_eq!(f.shell.focused(), Some(a));
        f.mods(Modifiers::SHIFT);
        f.sub.take_calls();

        f.shell.focus(Some(c), &mut f.sub, &mut Tracer::none());
        assert_eq!(f.order(), [c, a, b]);
        assert_eq!(f.shell.focused(), Some(c));
        assert!(!f.shell.views.is_activated(a));
        assert!(f.shell.views.is_activated(c));
        assert_eq!(
            f.sub.take_calls(),
            [
                Call::SetActivated(SurfaceHandle(1), false),
                Call::SetActivated(SurfaceHandle(3), true),
                Call::KeyboardEnter(SurfaceHandle(3), Modifiers::SHIFT),
            ]
        );
    }

    #[test]
    fn move_grab_follows_pointer_with_offset() {
        let mut f = Fixture::new();
        let v = f.open(1, Point::new(100.0, 100.0));
        f.move_to(110.0, 115.0);
        f.mods(Modifiers::ALT);
        f.button(Button::LEFT, PressState::Pressed);
        assert_eq!(f.shell.grab().mode(), Some(GrabMode::Move));

        f.sub.take_calls();
        f.move_to(150.0, 160.0);
        assert_eq!(f.shell.views.position(v), Point::new(140.0, 145.0));
        assert!(f.sub.take_calls().is_empty(), "grab motion is not forwarded");

        f.button(Button::LEFT, PressState::Released);
        assert!(!f.shell.grab().is_active());
        f.move_to(10.0, 10.0);
        assert_eq!(f.shell.views.position(v), Point::new(140.0, 145.0));
    }

    #[test]
    fn client_requested_top_left_resize() {
        let mut f = Fixture::new();
        let v = f.open_sized(1, Point::new(50.0, 50.0), Size::new(200.0, 100.0));
        f.move_to(50.0, 50.0);
        f.surface(SurfaceEvent::RequestResize {
            surface: SurfaceHandle(1),
            edges: Edges::TOP | Edges::LEFT,
        });
        assert_eq!(
            f.shell.grab().mode(),
            Some(GrabMode::Resize(Edges::TOP | Edges::LEFT))
        );

        f.sub.take_calls();
        f.move_to(20.0, 40.0);
        assert_eq!(f.shell.views.position(v), Point::new(20.0, 40.0));
        assert_eq!(
            f.sub.take_calls(),
            [Call::RequestSize(SurfaceHandle(1), Size::new(230.0, 110.0))]
        );
    }

    #[test]
    fn stacked_key_bindings_all_fire_and_consume_the_press() {
        let mut f = Fixture::with_config(&stacked_config());
        f.mods(Modifiers::LOGO | Modifiers::CAPS);
        f.sub.take_calls();

        f.key(Keysym::from_char('x'), PressState::Pressed);
        assert_eq!(
            f.sub.take_calls(),
            [
                Call::Spawn(f.shell.bindings().command(TERMINAL).unwrap().clone()),
                Call::ChangeVt(2),
            ]
        );

        f.key(Keysym::from_char('x'), PressState::Released);
        assert_eq!(
            f.sub.take_calls(),
            [Call::ForwardKey(42, PressState::Released)]
        );
    }

    #[test]
    fn unbound_keys_reach_the_client() {
        let mut f = Fixture::new();
        f.mods(Modifiers::ALT);
        f.sub.take_calls();
        f.key(Keysym::from_char('z'), PressState::Pressed);
        assert_eq!(f.sub.take_calls(), [Call::ForwardKey(42, PressState::Pressed)]);
    }

    #[test]
    fn any_keysym_of_a_press_can_fire() {
        let mut f = Fixture::new();
        f.mods(Modifiers::ALT | Modifiers::SHIFT);
        f.sub.take_calls();
        f.shell.handle_keyboard(
            KeyboardEvent::Key {
                time: 0,
                keycode: 24,
                keysyms: vec![Keysym::from_char('z'), Keysym::from_char('Q')],
                state: PressState::Pressed,
            },
            &mut f.sub,
            &mut Tracer::none(),
        );
        assert_eq!(f.sub.take_calls(), [Call::Terminate]);
    }

    #[test]
    fn modifiers_are_stored_and_forwarded() {
        let mut f = Fixture::new();
        f.mods(Modifiers::CTRL);
        assert_eq!(f.shell.modifiers(), Modifiers::CTRL);
        assert_eq!(f.sub.take_calls(), [Call::ForwardModifiers(Modifiers::CTRL)]);
    }

    #[test]
    fn buttons_are_forwarded_before_bindings_run() {
        let mut f = Fixture::new();
        f.open(1, Point::ZERO);
        f.move_to(10.0, 10.0);
        f.mods(Modifiers::ALT);
        f.sub.take_calls();

        f.button(Button::LEFT, PressState::Pressed);
        let calls = f.sub.take_calls();
        assert_eq!(calls[0], Call::ForwardButton(Button::LEFT, PressState::Pressed));
        assert!(f.shell.grab().is_active());

        f.button(Button::RIGHT, PressState::Released);
        assert_eq!(
            f.sub.take_calls(),
            [Call::ForwardButton(Button::RIGHT, PressState::Released)]
        );
        assert!(!f.shell.grab().is_active(), "any release ends the grab");
    }

    #[test]
    fn button_press_focuses_the_view_under_the_pointer() {
        let mut f = Fixture::new();
        let a = f.open(1, Point::ZERO);
        let b = f.open(2, Point::new(300.0, 0.0));
        assert_eq!(f.shell.focused(), Some(b));
        f.move_to(10.0, 10.0);
        f.button(Button::LEFT, PressState::Pressed);
        assert_eq!(f.shell.focused(), Some(a));
        assert_eq!(f.order()[0], a);
        assert!(!f.shell.grab().is_active(), "no modifier, no grab");
    }

    #[test]
    fn grab_is_refused_without_pointer_focus() {
        let mut f = Fixture::new();
        let v = f.open(1, Point::ZERO);
        // Pointer focus is still empty: no motion has happened.
        f.shell.pointer = Point::new(10.0, 10.0);
        f.shell.begin_move(Some(v), &mut Tracer::none());
        assert!(!f.shell.grab().is_active());

        // A client cannot start a grab on a view the pointer is not over.
        let w = f.open(2, Point::new(500.0, 500.0));
        f.move_to(10.0, 10.0);
        f.surface(SurfaceEvent::RequestMove(SurfaceHandle(2)));
        assert!(!f.shell.grab().is_active());
        assert_eq!(f.shell.views.position(w), Point::new(500.0, 500.0));

        f.surface(SurfaceEvent::RequestMove(SurfaceHandle(1)));
        assert_eq!(f.shell.grab().target(), Some(v));
    }

    #[test]
    fn grab_is_refused_on_sub_surface_focus() {
        let mut f = Fixture::new();
        let v = f.open(1, Point::ZERO);
        f.sub
            .add_child(SurfaceHandle(1), SurfaceHandle(10), Vec2::new(0.0, 0.0), Size::new(20.0, 20.0));
        f.move_to(5.0, 5.0);
        assert_eq!(f.shell.pointer_focus().unwrap().surface, SurfaceHandle(10));
        f.shell.begin_move(Some(v), &mut Tracer::none());
        assert!(!f.shell.grab().is_active());
    }

    #[test]
    fn resize_action_infers_edges_and_warps_to_the_corner() {
        let mut f = Fixture::new();
        let v = f.open_sized(1, Point::new(50.0, 50.0), Size::new(200.0, 100.0));
        f.move_to(60.0, 60.0);
        f.mods(Modifiers::ALT);
        f.sub.take_calls();
        f.button(Button::RIGHT, PressState::Pressed);
        assert_eq!(
            f.shell.grab().mode(),
            Some(GrabMode::Resize(Edges::BOTTOM | Edges::RIGHT))
        );
        assert_eq!(f.shell.pointer(), Point::new(250.0, 150.0));
        assert!(f.sub.take_calls().contains(&Call::Warp(Point::new(250.0, 150.0))));

        // Dragging the corner outward grows the window in place.
        f.move_to(290.0, 180.0);
        assert_eq!(f.shell.views.position(v), Point::new(50.0, 50.0));
        assert_eq!(
            f.sub.take_calls(),
            [Call::RequestSize(SurfaceHandle(1), Size::new(240.0, 130.0))]
        );
    }

    #[test]
    fn resize_grab_ends_on_a_single_release() {
        let mut f = Fixture::new();
        let v = f.open_sized(1, Point::new(50.0, 50.0), Size::new(200.0, 100.0));
        f.move_to(60.0, 60.0);
        f.mods(Modifiers::ALT);
        f.button(Button::RIGHT, PressState::Pressed);
        for (x, y) in [(260.0, 160.0), (300.0, 170.0), (280.0, 200.0)] {
            f.move_to(x, y);
        }
        assert!(matches!(f.shell.grab(), Grab::Resizing { .. }));
        assert_eq!(
            f.sub.take_calls().last(),
            Some(&Call::RequestSize(SurfaceHandle(1), Size::new(230.0, 150.0)))
        );

        f.button(Button::RIGHT, PressState::Released);
        assert_eq!(*f.shell.grab(), Grab::Idle);

        f.sub.take_calls();
        f.move_to(400.0, 400.0);
        f.move_to(100.0, 100.0);
        assert_eq!(f.shell.views.position(v), Point::new(50.0, 50.0));
        assert!(
            !f.sub
                .take_calls()
                .iter()
                .any(|call| matches!(call, Call::RequestSize(..))),
            "no size requests after the release"
        );
    }

    #[test]
    fn pointer_focus_enter_motion_and_clear() {
        let mut f = Fixture::new();
        f.open(1, Point::ZERO);
        f.sub.take_calls();

        f.move_to(10.0, 20.0);
        assert_eq!(
            f.sub.take_calls(),
            [Call::PointerEnter(SurfaceHandle(1), Point::new(10.0, 20.0))]
        );
        f.pointer(PointerEvent::Motion {
            time: 0,
            delta: Vec2::new(5.0, 5.0),
        });
        assert_eq!(f.sub.take_calls(), [Call::PointerMotion(Point::new(15.0, 25.0))]);

        f.move_to(500.0, 500.0);
        assert_eq!(
            f.sub.take_calls(),
            [Call::SetCursor(CursorImage::DEFAULT), Call::PointerClearFocus]
        );
        assert_eq!(f.shell.pointer_focus(), None);
    }

    #[test]
    fn cursor_requests_need_pointer_focus() {
        let mut f = Fixture::new();
        f.open(1, Point::ZERO);
        f.move_to(10.0, 10.0);
        f.sub.take_calls();

        let request = |client| PointerEvent::CursorRequest {
            client,
            surface: Some(SurfaceHandle(77)),
            hotspot: Point::new(1.0, 2.0),
        };
        f.pointer(request(ClientId(2)));
        assert!(f.sub.take_calls().is_empty());
        f.pointer(request(ClientId(1)));
        assert_eq!(
            f.sub.take_calls(),
            [Call::SetCursor(CursorImage::Client {
                surface: Some(SurfaceHandle(77)),
                hotspot: Point::new(1.0, 2.0),
            })]
        );

        // A second client owns the surface under the pointer now.
        f.sub
            .add_owned(SurfaceHandle(2), Size::new(100.0, 100.0), ClientId(7));
        f.surface(SurfaceEvent::Created(SurfaceHandle(2)));
        let other = f.shell.view_for(SurfaceHandle(2)).unwrap();
        f.shell.views.set_position(other, Point::new(200.0, 0.0));
        f.surface(SurfaceEvent::Mapped(SurfaceHandle(2)));
        f.move_to(210.0, 10.0);
        f.sub.take_calls();

        f.pointer(request(ClientId(1)));
        assert!(f.sub.take_calls().is_empty());
        f.pointer(request(ClientId(7)));
        assert_eq!(f.sub.take_calls().len(), 1);
    }

    #[test]
    fn axis_and_frame_are_forwarded() {
        let mut f = Fixture::new();
        f.pointer(PointerEvent::Axis {
            time: 0,
            axis: Axis::Vertical,
            delta: 15.0,
        });
        f.pointer(PointerEvent::Frame);
        assert_eq!(
            f.sub.take_calls(),
            [Call::ForwardAxis(Axis::Vertical, 15.0), Call::ForwardFrame]
        );
    }

    #[test]
    fn sloppy_focus_follows_the_pointer() {
        let mut f = Fixture::new();
        let a = f.open(1, Point::ZERO);
        let b = f.open(2, Point::new(300.0, 0.0));
        f.move_to(10.0, 10.0);
        assert_eq!(f.shell.focused(), Some(b), "off by default");

        f.shell.set_sloppy_focus(true);
        f.move_to(12.0, 12.0);
        assert_eq!(f.shell.focused(), Some(a));
    }

    #[test]
    fn unmapped_views_are_skipped_by_pointer_routing() {
        let mut f = Fixture::new();
        let a = f.open(1, Point::ZERO);
        f.open(2, Point::ZERO);
        f.surface(SurfaceEvent::Unmapped(SurfaceHandle(2)));
        f.move_to(5.0, 5.0);
        assert_eq!(f.shell.pointer_focus().unwrap().view, a);
    }

    #[test]
    fn unmapping_the_focused_view_refocuses() {
        let mut f = Fixture::new();
        let a = f.open(1, Point::ZERO);
        let b = f.open(2, Point::ZERO);
        f.sub.take_calls();

        f.surface(SurfaceEvent::Unmapped(SurfaceHandle(2)));
        assert_eq!(f.shell.focused(), Some(a));
        assert!(!f.shell.views.is_activated(b));
        assert_eq!(
            f.sub.take_calls(),
            [
                Call::SetActivated(SurfaceHandle(2), false),
                Call::KeyboardClearFocus,
                Call::SetActivated(SurfaceHandle(1), true),
                Call::KeyboardEnter(SurfaceHandle(1), Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn destroy_removes_every_reference() {
        let mut f = Fixture::new();
        let a = f.open(1, Point::ZERO);
        let b = f.open(2, Point::ZERO);
        f.move_to(10.0, 10.0);
        f.surface(SurfaceEvent::RequestMove(SurfaceHandle(2)));
        assert_eq!(f.shell.grab().target(), Some(b));

        f.surface(SurfaceEvent::Destroyed(SurfaceHandle(2)));
        assert!(!f.shell.views.is_alive(b));
        assert_eq!(f.shell.view_for(SurfaceHandle(2)), None);
        assert!(!f.shell.grab().is_active());
        assert_eq!(f.shell.pointer_focus(), None);
        assert_eq!(f.shell.focused(), Some(a));
        assert_eq!(f.order(), [a]);

        // Late events for the dead surface are ignored.
        f.surface(SurfaceEvent::Mapped(SurfaceHandle(2)));
        f.surface(SurfaceEvent::Destroyed(SurfaceHandle(2)));
        assert_eq!(f.shell.views.len(), 1);
    }

    #[test]
    fn spawn_resolves_the_command_table() {
        let mut f = Fixture::new();
        f.mods(Modifiers::ALT);
        f.sub.take_calls();
        f.key(Keysym::from_char('p'), PressState::Pressed);
        let calls = f.sub.take_calls();
        assert_eq!(calls.len(), 1);
        let Call::Spawn(command) = &calls[0] else {
            panic!("expected a spawn, got {calls:?}");
        };
        assert_eq!(command.argv, ["wmenu-run"]);
        f.shell
            .run_action(Action::Spawn(CommandId(9)), &mut f.sub, &mut Tracer::none());
        assert!(f.sub.take_calls().is_empty(), "unknown commands are ignored");
    }

    #[test]
    fn render_frame_drains_changes() {
        let mut f = Fixture::new();
        f.open(1, Point::ZERO);
        f.open(2, Point::new(50.0, 0.0));
        let mut renderer = MockRenderer::default();
        let output = OutputInfo::new(OutputId(0));

        let stats = f
            .shell
            .render_frame(&f.sub, &output, &mut renderer, &mut Tracer::none());
        assert_eq!(stats, RenderStats { views: 2, surfaces: 2 });
        assert_eq!(f.shell.last_changes().added.len(), 2);
        assert_eq!(renderer.draws[0].0, SurfaceHandle(1));

        f.shell
            .render_frame(&f.sub, &output, &mut renderer, &mut Tracer::none());
        assert!(f.shell.last_changes().is_empty());
    }
}
