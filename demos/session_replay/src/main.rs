// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted shell session against an in-process desk.
//!
//! Drives a [`Shell`] through window creation, focus cycling, an
//! interactive move and resize, a refused client move request, VT switching
//! and finally the quit binding. Trace events go to both a
//! [`PrettyPrintSink`](perch_debug::pretty::PrettyPrintSink) on stdout and a
//! [`RecorderSink`](perch_debug::recorder::RecorderSink), and the recorded
//! session is exported as `session.json`.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Rect, Size, Vec2};

use perch_core::binding::Command;
use perch_core::config::Config;
use perch_core::event::{KeyboardEvent, PointerEvent, SurfaceEvent};
use perch_core::input::{Axis, Button, Edges, Keysym, Modifiers, PressState};
use perch_core::output::{OutputId, OutputInfo};
use perch_core::shell::Shell;
use perch_core::substrate::{CursorImage, Substrate, SurfaceAdapter, SurfaceRenderer};
use perch_core::trace::Tracer;
use perch_core::view::{ClientId, SurfaceHandle};

use perch_debug::Fanout;
use perch_debug::pretty::PrettyPrintSink;
use perch_debug::recorder::RecorderSink;

const TERMINAL: SurfaceHandle = SurfaceHandle(1);
const EDITOR: SurfaceHandle = SurfaceHandle(2);
const EDITOR_MENU: SurfaceHandle = SurfaceHandle(20);

// ---------------------------------------------------------------------------
// Desk: a pretend display server
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Window {
    size: Size,
    client: ClientId,
    /// Child surfaces, back to front, with their offset from the root.
    children: Vec<(SurfaceHandle, Vec2, Size)>,
}

/// Keeps window sizes and prints every call the shell makes.
#[derive(Debug, Default)]
struct Desk {
    windows: HashMap<SurfaceHandle, Window>,
    owners: HashMap<SurfaceHandle, ClientId>,
    running: bool,
    time: u32,
}

impl Desk {
    fn new() -> Self {
        Self {
            running: true,
            ..Self::default()
        }
    }

    fn open(&mut self, root: SurfaceHandle, client: ClientId, size: Size) {
        self.owners.insert(root, client);
        self.windows.insert(
            root,
            Window {
                size,
                client,
                children: Vec::new(),
            },
        );
    }

    fn attach(&mut self, root: SurfaceHandle, child: SurfaceHandle, offset: Vec2, size: Size) {
        if let Some(window) = self.windows.get_mut(&root) {
            window.children.push((child, offset, size));
            self.owners.insert(child, window.client);
        }
    }

    fn close(&mut self, root: SurfaceHandle) {
        if let Some(window) = self.windows.remove(&root) {
            for (child, ..) in window.children {
                self.owners.remove(&child);
            }
        }
        self.owners.remove(&root);
    }

    fn tick(&mut self) -> u32 {
        self.time += 8;
        self.time
    }

    fn log(&self, what: std::fmt::Arguments<'_>) {
        println!("    desk: {what}");
    }
}

impl SurfaceAdapter for Desk {
    fn surface_at(&self, root: SurfaceHandle, local: Point) -> Option<(SurfaceHandle, Point)> {
        let window = self.windows.get(&root)?;
        for &(child, offset, size) in window.children.iter().rev() {
            if Rect::from_origin_size(offset.to_point(), size).contains(local) {
                return Some((child, local - offset));
            }
        }
        Rect::from_origin_size(Point::ZERO, window.size)
            .contains(local)
            .then_some((root, local))
    }

    fn geometry(&self, root: SurfaceHandle) -> Rect {
        self.windows
            .get(&root)
            .map_or(Rect::ZERO, |w| Rect::from_origin_size(Point::ZERO, w.size))
    }

    fn for_each_surface(&self, root: SurfaceHandle, f: &mut dyn FnMut(SurfaceHandle, Vec2, Size)) {
        if let Some(window) = self.windows.get(&root) {
            f(root, Vec2::ZERO, window.size);
            for &(child, offset, size) in &window.children {
                f(child, offset, size);
            }
        }
    }

    fn client_of(&self, surface: SurfaceHandle) -> ClientId {
        self.owners.get(&surface).copied().unwrap_or(ClientId(0))
    }
}

impl Substrate for Desk {
    fn set_activated(&mut self, root: SurfaceHandle, activated: bool) {
        self.log(format_args!("activated {} = {activated}", root.0));
    }

    fn keyboard_enter(&mut self, surface: SurfaceHandle, modifiers: Modifiers) {
        self.log(format_args!("keyboard enter {} mods={:#x}", surface.0, modifiers.bits()));
    }

    fn keyboard_clear_focus(&mut self) {
        self.log(format_args!("keyboard focus cleared"));
    }

    fn forward_key(&mut self, _time: u32, keycode: u32, state: PressState) {
        self.log(format_args!("key {keycode} {state:?} -> client"));
    }

    fn forward_modifiers(&mut self, modifiers: Modifiers) {
        self.log(format_args!("modifiers {:#x} -> client", modifiers.bits()));
    }

    fn forward_button(&mut self, _time: u32, button: Button, state: PressState) {
        self.log(format_args!("{button:?} {state:?} -> client"));
    }

    fn forward_axis(&mut self, _time: u32, axis: Axis, delta: f64) {
        self.log(format_args!("scroll {axis:?} {delta} -> client"));
    }

    fn forward_frame(&mut self) {}

    fn pointer_enter(&mut self, surface: SurfaceHandle, local: Point) {
        self.log(format_args!("pointer enter {} at ({}, {})", surface.0, local.x, local.y));
    }

    fn pointer_motion(&mut self, _time: u32, _local: Point) {}

    fn pointer_clear_focus(&mut self) {
        self.log(format_args!("pointer focus cleared"));
    }

    fn request_size(&mut self, root: SurfaceHandle, size: Size) {
        self.log(format_args!("resize {} to {}x{}", root.0, size.width, size.height));
        if let Some(window) = self.windows.get_mut(&root) {
            // Clients in this desk always comply right away.
            window.size = size;
        }
    }

    fn set_cursor_image(&mut self, image: CursorImage) {
        self.log(format_args!("cursor {image:?}"));
    }

    fn warp_cursor(&mut self, position: Point) {
        self.log(format_args!("warp to ({}, {})", position.x, position.y));
    }

    fn spawn(&mut self, command: &Command) {
        self.log(format_args!("spawn {:?}", command.argv));
    }

    fn terminate(&mut self) {
        self.log(format_args!("terminate"));
        self.running = false;
    }

    fn change_vt(&mut self, vt: u32) {
        self.log(format_args!("switch to VT {vt}"));
    }
}

/// Counts draw calls.
#[derive(Debug, Default)]
struct DrawCounter {
    draws: usize,
}

impl SurfaceRenderer for DrawCounter {
    fn render_surface(&mut self, _surface: SurfaceHandle, _dest: Rect) {
        self.draws += 1;
    }
}

// ---------------------------------------------------------------------------
// Script helpers
// ---------------------------------------------------------------------------

struct Session<'a, 't> {
    shell: Shell,
    desk: Desk,
    output: OutputInfo,
    renderer: DrawCounter,
    tracer: &'a mut Tracer<'t>,
}

impl Session<'_, '_> {
    fn step(&self, title: &str) {
        println!("-- {title}");
    }

    fn open(&mut self, surface: SurfaceHandle, client: ClientId, size: Size) {
        self.desk.open(surface, client, size);
        self.surface(SurfaceEvent::Created(surface));
        self.surface(SurfaceEvent::Mapped(surface));
    }

    fn surface(&mut self, event: SurfaceEvent) {
        self.shell.handle_surface(event, &mut self.desk, self.tracer);
    }

    fn modifiers(&mut self, modifiers: Modifiers) {
        self.shell
            .handle_keyboard(KeyboardEvent::Modifiers(modifiers), &mut self.desk, self.tracer);
    }

    fn tap(&mut self, keycode: u32, keysym: Keysym) {
        for state in [PressState::Pressed, PressState::Released] {
            let time = self.desk.tick();
            self.shell.handle_keyboard(
                KeyboardEvent::Key {
                    time,
                    keycode,
                    keysyms: vec![keysym],
                    state,
                },
                &mut self.desk,
                self.tracer,
            );
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.shell.handle_pointer(event, &mut self.desk, self.tracer);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let time = self.desk.tick();
        self.pointer(PointerEvent::MotionAbsolute {
            time,
            position: Point::new(x, y),
        });
    }

    fn drag(&mut self, delta: Vec2, steps: u32) {
        let step = delta / f64::from(steps);
        for _ in 0..steps {
            let time = self.desk.tick();
            self.pointer(PointerEvent::Motion { time, delta: step });
            self.pointer(PointerEvent::Frame);
        }
    }

    fn button(&mut self, button: Button, state: PressState) {
        let time = self.desk.tick();
        self.pointer(PointerEvent::Button {
            time,
            button,
            state,
        });
    }

    fn frame(&mut self) {
        self.shell
            .render_frame(&self.desk, &self.output, &mut self.renderer, self.tracer);
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let mut sink = Fanout(
        PrettyPrintSink::new(Box::new(std::io::stdout())),
        RecorderSink::new(),
    );

    {
        let mut tracer = Tracer::new(&mut sink);
        let shell = Shell::from_config(&Config::default()).expect("default config is valid");
        let mut s = Session {
            shell,
            desk: Desk::new(),
            output: OutputInfo::new(OutputId(0)),
            renderer: DrawCounter::default(),
            tracer: &mut tracer,
        };
        run(&mut s);
        println!("{} surfaces drawn in total", s.renderer.draws);
    }

    let Fanout(_, recorder) = sink;
    let path = "session.json";
    let file = File::create(path).expect("failed to create session.json");
    let mut writer = BufWriter::new(file);
    perch_debug::json::export(recorder.events(), &mut writer).expect("failed to write session log");

    println!("Wrote {path} ({} events)", recorder.len());
}

fn run(s: &mut Session<'_, '_>) {
    let alt = Modifiers::ALT;

    s.step("open a terminal and an editor with a menu");
    s.open(TERMINAL, ClientId(1), Size::new(640.0, 400.0));
    s.open(EDITOR, ClientId(2), Size::new(800.0, 600.0));
    s.desk
        .attach(EDITOR, EDITOR_MENU, Vec2::new(40.0, 40.0), Size::new(200.0, 100.0));
    s.frame();

    s.step("hover the menu; its client sets a cursor");
    s.move_to(100.0, 100.0);
    s.pointer(PointerEvent::CursorRequest {
        client: ClientId(2),
        surface: None,
        hotspot: Point::ZERO,
    });
    s.pointer(PointerEvent::CursorRequest {
        client: ClientId(1),
        surface: None,
        hotspot: Point::ZERO,
    });
    let time = s.desk.tick();
    s.pointer(PointerEvent::Axis {
        time,
        axis: Axis::Vertical,
        delta: 15.0,
    });

    s.step("the menu asks for a move, which is refused");
    s.surface(SurfaceEvent::RequestMove(EDITOR));

    s.step("alt-drag the editor out of the way");
    s.move_to(700.0, 500.0);
    s.modifiers(alt);
    s.button(Button::LEFT, PressState::Pressed);
    s.drag(Vec2::new(150.0, 80.0), 4);
    s.button(Button::LEFT, PressState::Released);
    s.modifiers(Modifiers::empty());
    s.frame();

    s.step("alt-resize the terminal; the pointer snaps to its bottom-right corner");
    s.move_to(50.0, 50.0);
    s.modifiers(alt);
    s.button(Button::RIGHT, PressState::Pressed);
    s.drag(Vec2::new(-120.0, -100.0), 2);
    s.button(Button::RIGHT, PressState::Released);
    s.frame();

    s.step("cycle focus forward and back");
    s.tap(44, Keysym::from_char('j'));
    s.tap(45, Keysym::from_char('k'));
    s.modifiers(Modifiers::empty());

    s.step("the terminal asks for a resize from its bottom edge");
    s.move_to(100.0, 200.0);
    s.surface(SurfaceEvent::RequestResize {
        surface: TERMINAL,
        edges: Edges::BOTTOM,
    });
    s.drag(Vec2::new(0.0, 40.0), 1);
    s.button(Button::LEFT, PressState::Released);

    s.step("unbound keys reach the client");
    s.tap(30, Keysym::from_char('a'));

    s.step("spawn a launcher and visit VT 2");
    s.modifiers(alt);
    s.tap(33, Keysym::from_char('p'));
    s.modifiers(Modifiers::CTRL | alt);
    s.tap(60, Keysym::function(2));
    s.modifiers(Modifiers::empty());

    s.step("close the editor");
    s.surface(SurfaceEvent::Unmapped(EDITOR));
    s.surface(SurfaceEvent::Destroyed(EDITOR));
    s.desk.close(EDITOR);
    s.frame();

    s.step("quit");
    s.modifiers(alt | Modifiers::SHIFT);
    s.tap(24, Keysym::from_char('Q'));
    if s.desk.running {
        println!("session is still running");
    }
}
