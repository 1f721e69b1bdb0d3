// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction core for a minimalist windowing shell.
//!
//! `perch_core` decides which toplevel has focus, how keyboard and pointer
//! input map to actions, how an interactive move or resize progresses, and
//! in which order views are hit-tested and drawn. Everything protocol-facing
//! (client connections, buffers, mode-setting, input devices) belongs to a
//! *substrate* the core talks to through traits. The crate is `no_std`
//! compatible (with `alloc`) and keeps views in struct-of-arrays storage
//! addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   Substrate events
//!       │
//!       ▼
//!   Shell::handle_{surface,keyboard,pointer}
//!       │            │                 │
//!       ▼            ▼                 ▼
//!   ViewStore    Bindings::dispatch   Grab::update
//!       │            │                 │
//!       └────────────┴──────┬──────────┘
//!                           ▼
//!              Substrate (activation, focus, forwarding, size requests)
//!
//!   Output refresh ──► Shell::render_frame()
//!                           │
//!                           ▼
//!              ViewStore::evaluate() ──► render_output() ──► SurfaceRenderer
//! ```
//!
//! **[`view`]**: struct-of-arrays view registry with generational handles
//! and an intrusive stacking sequence. The front of the sequence is the
//! topmost view.
//!
//! **[`damage`]**: change channels marked by registry mutations and drained
//! once per frame.
//!
//! **[`shell`]**: the [`Shell`](shell::Shell) context and its ingress
//! functions. Focus transitions live alongside it.
//!
//! **[`binding`]** and **[`config`]**: static key and button tables,
//! validated once into typed [`Bindings`](binding::Bindings).
//!
//! **[`grab`]**: the interactive move/resize state machine.
//!
//! **[`compose`]**: hit-testing (front to back) and render order (back to
//! front).
//!
//! **[`substrate`]**: the traits a display-server integration implements.
//!
//! **[`event`]**, **[`input`]** and **[`output`]**: the vocabulary shared
//! with the substrate.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! shell instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod binding;
pub mod compose;
pub mod config;
pub mod damage;
pub mod event;
mod focus;
pub mod grab;
pub mod input;
pub mod output;
pub mod shell;
pub mod substrate;
pub mod trace;
pub mod view;

#[cfg(test)]
mod testing;
