// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). View handles
//! print as `index@generation`.

use std::fmt;
use std::io::Write;

use perch_core::grab::GrabMode;
use perch_core::trace::{
    BindingEvent, FocusEvent, FrameEvent, GrabEvent, GrabPhase, TraceSink, Trigger, ViewEvent,
    ViewEventKind,
};
use perch_core::view::ViewId;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// `Display` adapter for an optional view handle.
struct ShowView(Option<ViewId>);

impl fmt::Display for ShowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(view) => write!(f, "{}@{}", view.index(), view.generation()),
            None => f.write_str("-"),
        }
    }
}

fn kind_name(kind: ViewEventKind) -> &'static str {
    match kind {
        ViewEventKind::Created => "created",
        ViewEventKind::Mapped => "mapped",
        ViewEventKind::Unmapped => "unmapped",
        ViewEventKind::Destroyed => "destroyed",
    }
}

fn phase_name(phase: GrabPhase) -> &'static str {
    match phase {
        GrabPhase::Begin => "begin",
        GrabPhase::Refused => "refused",
        GrabPhase::End => "end",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_view(&mut self, e: &ViewEvent) {
        let _ = writeln!(
            self.writer,
            "[view:{}] view={} surface={}",
            kind_name(e.kind),
            ShowView(Some(e.view)),
            e.surface.0,
        );
    }

    fn on_focus(&mut self, e: &FocusEvent) {
        let _ = writeln!(
            self.writer,
            "[focus] {} -> {}",
            ShowView(e.previous),
            ShowView(e.current),
        );
    }

    fn on_binding(&mut self, e: &BindingEvent) {
        let trigger = match e.trigger {
            Trigger::Key(keysym) => format!("key={:#x}", keysym.0),
            Trigger::Button(button) => format!("button={:#x}", button.0),
        };
        let _ = writeln!(
            self.writer,
            "[binding] {trigger} mods={:#x} action={:?}",
            e.modifiers.bits(),
            e.action,
        );
    }

    fn on_grab(&mut self, e: &GrabEvent) {
        let mode = match e.mode {
            GrabMode::Move => "move".to_owned(),
            GrabMode::Resize(edges) => format!("resize(edges={:#x})", edges.bits()),
        };
        let _ = writeln!(
            self.writer,
            "[grab:{}] {mode} view={} pointer=({:.1}, {:.1})",
            phase_name(e.phase),
            ShowView(e.view),
            e.pointer.x,
            e.pointer.y,
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] frame={} output={} views={} surfaces={} changes={}{}",
            e.frame_index,
            e.output.0,
            e.views_drawn,
            e.surfaces_drawn,
            e.changes,
            if e.restacked { " restacked" } else { "" },
        );
    }
}
