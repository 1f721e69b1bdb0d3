// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding tables and dispatch.
//!
//! [`Bindings`] is the validated, read-only form of the key and button
//! tables in a [`Config`](crate::config::Config). Every entry carries a
//! fully-typed [`Action`], so dispatch never has to reinterpret an argument.
//!
//! Dispatch normalises the incoming modifier mask (Caps Lock and any
//! configured ignored modifiers are cleared), then scans the table in
//! declaration order and fires **every** exact match. Stacked bindings on the
//! same chord are therefore all executed.

use alloc::string::String;
use alloc::vec::Vec;

use crate::input::{Button, Keysym, Modifiers};

/// Index into the command table of a [`Config`](crate::config::Config).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandId(pub u32);

/// A program to launch, as an argument vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments.
    pub argv: Vec<String>,
}

impl Command {
    /// Builds a command from string slices.
    #[must_use]
    pub fn new(argv: &[&str]) -> Self {
        Self {
            argv: argv.iter().map(|s| String::from(*s)).collect(),
        }
    }

    /// Builds a command that runs `line` through `/bin/sh -c`.
    #[must_use]
    pub fn shell(line: &str) -> Self {
        Self::new(&["/bin/sh", "-c", line])
    }
}

/// A validated action, with its argument already decoded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Launch a command from the command table.
    Spawn(CommandId),
    /// Focus the next mapped view and send the previous one to the back.
    FocusNext,
    /// Rotate focus through the stack; positive is forward, negative backward.
    FocusStack(i32),
    /// Start an interactive move of the view under the pointer.
    Move,
    /// Start an interactive resize of the view under the pointer.
    Resize,
    /// Ask the substrate to terminate the session.
    Quit,
    /// Switch to virtual terminal `n`.
    ChangeVt(u32),
}

/// One validated table entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binding<T> {
    /// Required modifier mask, already normalised.
    pub modifiers: Modifiers,
    /// Keysym or button that triggers the binding.
    pub trigger: T,
    /// Action fired on a match.
    pub action: Action,
}

/// Validated key and button tables.
///
/// Produced by [`Config::validate`](crate::config::Config::validate).
#[derive(Clone, Debug)]
pub struct Bindings {
    pub(crate) keys: Vec<Binding<Keysym>>,
    pub(crate) buttons: Vec<Binding<Button>>,
    pub(crate) commands: Vec<Command>,
    pub(crate) ignored_modifiers: Modifiers,
}

impl Bindings {
    /// Returns an empty table set (nothing is ever handled).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keys: Vec::new(),
            buttons: Vec::new(),
            commands: Vec::new(),
            ignored_modifiers: Modifiers::empty(),
        }
    }

    /// Returns the key table in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[Binding<Keysym>] {
        &self.keys
    }

    /// Returns the button table in declaration order.
    #[must_use]
    pub fn buttons(&self) -> &[Binding<Button>] {
        &self.buttons
    }

    /// Returns a command from the command table.
    ///
    /// Validation guarantees every [`Action::Spawn`] in the tables resolves.
    #[must_use]
    pub fn command(&self, id: CommandId) -> Option<&Command> {
        self.commands.get(id.0 as usize)
    }

    /// Fires every key binding matching `(modifiers, keysym)`.
    ///
    /// Returns `true` if at least one binding fired.
    pub fn dispatch_key(
        &self,
        modifiers: Modifiers,
        keysym: Keysym,
        fire: impl FnMut(Action),
    ) -> bool {
        dispatch(
            &self.keys,
            modifiers.normalized(self.ignored_modifiers),
            keysym,
            fire,
        )
    }

    /// Fires every button binding matching `(modifiers, button)`.
    ///
    /// Returns `true` if at least one binding fired.
    pub fn dispatch_button(
        &self,
        modifiers: Modifiers,
        button: Button,
        fire: impl FnMut(Action),
    ) -> bool {
        dispatch(
            &self.buttons,
            modifiers.normalized(self.ignored_modifiers),
            button,
            fire,
        )
    }
}

fn dispatch<T: PartialEq + Copy>(
    table: &[Binding<T>],
    modifiers: Modifiers,
    trigger: T,
    mut fire: impl FnMut(Action),
) -> bool {
    let mut handled = false;
    for binding in table {
        if binding.trigger == trigger && binding.modifiers == modifiers {
            fire(binding.action);
            handled = true;
        }
    }
    handled
}
