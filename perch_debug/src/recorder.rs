// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in emission order, as a [`RecordedEvent`]. The log can be
//! inspected directly or handed to [`json::export`](crate::json::export).

use perch_core::trace::{BindingEvent, FocusEvent, FrameEvent, GrabEvent, TraceSink, ViewEvent};

/// One recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`ViewEvent`].
    View(ViewEvent),
    /// A [`FocusEvent`].
    Focus(FocusEvent),
    /// A [`BindingEvent`].
    Binding(BindingEvent),
    /// A [`GrabEvent`].
    Grab(GrabEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
}

impl RecordedEvent {
    /// Short category name, shared by the pretty printer and the exporter.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::View(_) => "view",
            Self::Focus(_) => "focus",
            Self::Binding(_) => "binding",
            Self::Grab(_) => "grab",
            Self::Frame(_) => "frame",
        }
    }
}

/// A [`TraceSink`] that appends every event to a `Vec`.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Consumes the recorder and returns the log.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl TraceSink for RecorderSink {
    fn on_view(&mut self, e: &ViewEvent) {
        self.events.push(RecordedEvent::View(*e));
    }

    fn on_focus(&mut self, e: &FocusEvent) {
        self.events.push(RecordedEvent::Focus(*e));
    }

    fn on_binding(&mut self, e: &BindingEvent) {
        self.events.push(RecordedEvent::Binding(*e));
    }

    fn on_grab(&mut self, e: &GrabEvent) {
        self.events.push(RecordedEvent::Grab(*e));
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.events.push(RecordedEvent::Frame(*e));
    }
}
