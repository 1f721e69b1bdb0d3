// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the shell.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! shell calls whenever it makes a decision worth reporting: view lifecycle,
//! focus changes, fired bindings, grab transitions (including refused grabs),
//! and completed render passes. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use kurbo::Point;

use crate::binding::Action;
use crate::grab::GrabMode;
use crate::input::{Button, Keysym, Modifiers};
use crate::output::OutputId;
use crate::view::{SurfaceHandle, ViewId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle transition of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewEventKind {
    /// The view was added to the registry.
    Created,
    /// The view became visible.
    Mapped,
    /// The view was hidden.
    Unmapped,
    /// The view was removed from the registry.
    Destroyed,
}

/// What triggered a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A key press.
    Key(Keysym),
    /// A button press.
    Button(Button),
}

/// Grab transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrabPhase {
    /// The grab started.
    Begin,
    /// The grab was requested but its guard failed.
    Refused,
    /// The grab ended.
    End,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted on every view lifecycle transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewEvent {
    /// View handle. For `Destroyed` this handle is already stale.
    pub view: ViewId,
    /// Root surface of the view.
    pub surface: SurfaceHandle,
    /// Which transition happened.
    pub kind: ViewEventKind,
}

/// Emitted when keyboard focus moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusEvent {
    /// View that lost focus.
    pub previous: Option<ViewId>,
    /// View that gained focus.
    pub current: Option<ViewId>,
}

/// Emitted for every binding that fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindingEvent {
    /// Key or button that matched.
    pub trigger: Trigger,
    /// Normalised modifier mask at the time of the match.
    pub modifiers: Modifiers,
    /// Action about to run.
    pub action: Action,
}

/// Emitted on grab transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrabEvent {
    /// Transition.
    pub phase: GrabPhase,
    /// Move or resize.
    pub mode: GrabMode,
    /// Target view, if there was a candidate.
    pub view: Option<ViewId>,
    /// Pointer position in layout coordinates.
    pub pointer: Point,
}

/// Emitted after each render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Output that was rendered.
    pub output: OutputId,
    /// Mapped views drawn.
    pub views_drawn: u32,
    /// Surfaces handed to the renderer.
    pub surfaces_drawn: u32,
    /// Registry change records drained since the previous frame.
    pub changes: u32,
    /// Whether stacking changed since the previous frame.
    pub restacked: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the shell.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called on a view lifecycle transition.
    fn on_view(&mut self, e: &ViewEvent) {
        _ = e;
    }

    /// Called when keyboard focus moves.
    fn on_focus(&mut self, e: &FocusEvent) {
        _ = e;
    }

    /// Called for each binding that fires.
    fn on_binding(&mut self, e: &BindingEvent) {
        _ = e;
    }

    /// Called on grab transitions.
    fn on_grab(&mut self, e: &GrabEvent) {
        _ = e;
    }

    /// Called after each render pass.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ViewEvent`].
    #[inline]
    pub fn view(&mut self, e: &ViewEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_view(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FocusEvent`].
    #[inline]
    pub fn focus(&mut self, e: &FocusEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_focus(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BindingEvent`].
    #[inline]
    pub fn binding(&mut self, e: &BindingEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_binding(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GrabEvent`].
    #[inline]
    pub fn grab(&mut self, e: &GrabEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_grab(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
