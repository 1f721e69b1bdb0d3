// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON session export.
//!
//! [`export`] writes a recorded session as a JSON array with one object per
//! event. Every object carries a `seq` number (emission order) and a `type`
//! tag; the remaining keys depend on the event. View handles are encoded as
//! `{"index", "generation"}` objects, absent handles as `null`.

use std::io::{self, Write};

use serde_json::{Value, json};

use perch_core::grab::GrabMode;
use perch_core::trace::{GrabPhase, Trigger, ViewEventKind};
use perch_core::view::ViewId;

use crate::recorder::RecordedEvent;

fn view(view: Option<ViewId>) -> Value {
    view.map_or(Value::Null, |v| {
        json!({ "index": v.index(), "generation": v.generation() })
    })
}

fn event_to_json(seq: usize, event: &RecordedEvent) -> Value {
    let mut value = match event {
        RecordedEvent::View(e) => json!({
            "view": view(Some(e.view)),
            "surface": e.surface.0,
            "kind": match e.kind {
                ViewEventKind::Created => "created",
                ViewEventKind::Mapped => "mapped",
                ViewEventKind::Unmapped => "unmapped",
                ViewEventKind::Destroyed => "destroyed",
            },
        }),
        RecordedEvent::Focus(e) => json!({
            "previous": view(e.previous),
            "current": view(e.current),
        }),
        RecordedEvent::Binding(e) => {
            let (trigger, code) = match e.trigger {
                Trigger::Key(keysym) => ("key", keysym.0),
                Trigger::Button(button) => ("button", button.0),
            };
            json!({
                "trigger": trigger,
                "code": code,
                "modifiers": e.modifiers.bits(),
                "action": format!("{:?}", e.action),
            })
        }
        RecordedEvent::Grab(e) => {
            let (mode, edges) = match e.mode {
                GrabMode::Move => ("move", 0),
                GrabMode::Resize(edges) => ("resize", edges.bits()),
            };
            json!({
                "phase": match e.phase {
                    GrabPhase::Begin => "begin",
                    GrabPhase::Refused => "refused",
                    GrabPhase::End => "end",
                },
                "mode": mode,
                "edges": edges,
                "view": view(e.view),
                "pointer": [e.pointer.x, e.pointer.y],
            })
        }
        RecordedEvent::Frame(e) => json!({
            "frame_index": e.frame_index,
            "output": e.output.0,
            "views_drawn": e.views_drawn,
            "surfaces_drawn": e.surfaces_drawn,
            "changes": e.changes,
            "restacked": e.restacked,
        }),
    };
    if let Value::Object(map) = &mut value {
        map.insert("seq".to_owned(), json!(seq));
        map.insert("type".to_owned(), json!(event.name()));
    }
    value
}

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(seq, event)| event_to_json(seq, event))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &values)?;
    writeln!(writer)?;
    Ok(())
}
