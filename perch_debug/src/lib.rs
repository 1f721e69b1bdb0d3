// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON session export for perch
//! diagnostics.
//!
//! This crate provides [`TraceSink`](perch_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory event log, in emission order.
//! - [`json::export`]: writes a recorded session as a JSON array.
//!
//! Sinks compose with [`Fanout`], which forwards every event to two sinks.

pub mod json;
pub mod pretty;
pub mod recorder;

use perch_core::trace::{BindingEvent, FocusEvent, FrameEvent, GrabEvent, TraceSink, ViewEvent};

/// Forwards every event to two sinks, first `A` then `B`.
#[derive(Debug)]
pub struct Fanout<A, B>(pub A, pub B);

impl<A: TraceSink, B: TraceSink> TraceSink for Fanout<A, B> {
    fn on_view(&mut self, e: &ViewEvent) {
        self.0.on_view(e);
        self.1.on_view(e);
    }

    fn on_focus(&mut self, e: &FocusEvent) {
        self.0.on_focus(e);
        self.1.on_focus(e);
    }

    fn on_binding(&mut self, e: &BindingEvent) {
        self.0.on_binding(e);
        self.1.on_binding(e);
    }

    fn on_grab(&mut self, e: &GrabEvent) {
        self.0.on_grab(e);
        self.1.on_grab(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.0.on_frame(e);
        self.1.on_frame(e);
    }
}
