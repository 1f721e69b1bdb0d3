// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static shell configuration.
//!
//! A [`Config`] is plain data: key and button tables whose entries carry an
//! [`ActionKind`] and a loosely-typed [`Arg`], a command table, and the
//! modifier policy. [`Config::validate`] checks every argument against its
//! action and produces the immutable [`Bindings`] the shell dispatches from.
//!
//! [`Config::default`] reproduces the stock tables:
//!
//! | Chord | Action |
//! |---|---|
//! | Alt+Shift+Return | spawn terminal |
//! | Alt+p | spawn launcher |
//! | Alt+j / Alt+k | focus stack +1 / -1 |
//! | Alt+Shift+Q | quit |
//! | Ctrl+Alt+BackSpace | quit |
//! | Ctrl+Alt+F1 .. F12 | change VT |
//! | Alt+left button | interactive move |
//! | Alt+right button | interactive resize |

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::binding::{Action, Binding, Bindings, Command, CommandId};
use crate::input::{Button, Keysym, Modifiers};

/// Action selector in a configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Expects [`Arg::Opaque`].
    Spawn,
    /// Expects [`Arg::None`].
    FocusNext,
    /// Expects [`Arg::Int`].
    FocusStack,
    /// Expects [`Arg::UInt`] of [`Arg::MOVE`] or [`Arg::RESIZE`].
    MoveResize,
    /// Expects [`Arg::None`].
    Quit,
    /// Expects [`Arg::UInt`] of at least 1.
    ChangeVt,
}

impl ActionKind {
    /// Returns the argument variant this action accepts.
    #[must_use]
    pub const fn expected(self) -> ArgKind {
        match self {
            Self::Spawn => ArgKind::Opaque,
            Self::FocusNext | Self::Quit => ArgKind::None,
            Self::FocusStack => ArgKind::Int,
            Self::MoveResize | Self::ChangeVt => ArgKind::UInt,
        }
    }
}

/// Tagged binding argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg {
    /// No argument.
    None,
    /// Signed integer.
    Int(i32),
    /// Unsigned integer.
    UInt(u32),
    /// Floating point.
    Float(f32),
    /// Reference into the command table.
    Opaque(CommandId),
}

impl Arg {
    /// Cursor mode argument for an interactive move.
    pub const MOVE: Self = Self::UInt(1);
    /// Cursor mode argument for an interactive resize.
    pub const RESIZE: Self = Self::UInt(2);

    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::None => ArgKind::None,
            Self::Int(_) => ArgKind::Int,
            Self::UInt(_) => ArgKind::UInt,
            Self::Float(_) => ArgKind::Float,
            Self::Opaque(_) => ArgKind::Opaque,
        }
    }
}

/// Variant tag of an [`Arg`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// [`Arg::None`].
    None,
    /// [`Arg::Int`].
    Int,
    /// [`Arg::UInt`].
    UInt,
    /// [`Arg::Float`].
    Float,
    /// [`Arg::Opaque`].
    Opaque,
}

/// Unvalidated key binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyBinding {
    /// Required modifiers.
    pub modifiers: Modifiers,
    /// Triggering keysym.
    pub keysym: Keysym,
    /// Action to run.
    pub action: ActionKind,
    /// Argument passed to the action.
    pub arg: Arg,
}

/// Unvalidated button binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonBinding {
    /// Required modifiers.
    pub modifiers: Modifiers,
    /// Triggering button.
    pub button: Button,
    /// Action to run.
    pub action: ActionKind,
    /// Argument passed to the action.
    pub arg: Arg,
}

/// Identifies the table entry an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingSlot {
    /// Index into [`Config::keys`].
    Key(usize),
    /// Index into [`Config::buttons`].
    Button(usize),
}

impl fmt::Display for BindingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(i) => write!(f, "key binding {i}"),
            Self::Button(i) => write!(f, "button binding {i}"),
        }
    }
}

/// Errors from [`Config::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The argument variant does not match what the action expects.
    ArgumentMismatch {
        /// Offending entry.
        slot: BindingSlot,
        /// Action of the entry.
        action: ActionKind,
        /// Variant the action accepts.
        expected: ArgKind,
        /// Variant found in the table.
        found: ArgKind,
    },
    /// A spawn binding names a command that is not in the command table.
    UnknownCommand {
        /// Offending entry.
        slot: BindingSlot,
        /// The missing command.
        command: CommandId,
    },
    /// A command in the command table has an empty argument vector.
    EmptyCommand {
        /// The empty command.
        command: CommandId,
    },
    /// A move/resize binding carries a cursor mode other than move or resize.
    InvalidCursorMode {
        /// Offending entry.
        slot: BindingSlot,
        /// The rejected value.
        value: u32,
    },
    /// A VT switch binding targets VT 0.
    InvalidVt {
        /// Offending entry.
        slot: BindingSlot,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentMismatch {
                slot,
                action,
                expected,
                found,
            } => write!(
                f,
                "{slot}: {action:?} expects a {expected:?} argument, found {found:?}"
            ),
            Self::UnknownCommand { slot, command } => {
                write!(f, "{slot}: command {} is not defined", command.0)
            }
            Self::EmptyCommand { command } => {
                write!(f, "command {} has an empty argument vector", command.0)
            }
            Self::InvalidCursorMode { slot, value } => {
                write!(f, "{slot}: cursor mode {value} is neither move nor resize")
            }
            Self::InvalidVt { slot } => write!(f, "{slot}: virtual terminals start at 1"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Static shell configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Key table, scanned in declaration order.
    pub keys: Vec<KeyBinding>,
    /// Button table, scanned in declaration order.
    pub buttons: Vec<ButtonBinding>,
    /// Commands referenced by [`Arg::Opaque`].
    pub commands: Vec<Command>,
    /// The modifier the default tables were built on.
    ///
    /// Informational once the tables exist; rebinding means editing
    /// [`keys`](Self::keys) and [`buttons`](Self::buttons), or starting from
    /// [`with_primary`](Self::with_primary).
    pub primary_modifier: Modifiers,
    /// Modifiers cleared before matching, in addition to Caps Lock.
    pub ignored_modifiers: Modifiers,
    /// Focus follows the pointer outside of grabs.
    pub sloppy_focus: bool,
}

/// Index of the terminal command in the default command table.
pub const TERMINAL: CommandId = CommandId(0);
/// Index of the launcher command in the default command table.
pub const LAUNCHER: CommandId = CommandId(1);

impl Default for Config {
    /// The stock tables on [`Modifiers::ALT`].
    fn default() -> Self {
        Self::with_primary(Modifiers::ALT)
    }
}

impl Config {
    /// Builds the stock tables with `primary` as the primary modifier.
    ///
    /// Virtual terminal switching stays on Ctrl+Alt regardless.
    #[must_use]
    pub fn with_primary(primary: Modifiers) -> Self {
        let key = |modifiers, keysym, action, arg| KeyBinding {
            modifiers,
            keysym,
            action,
            arg,
        };

        let mut keys = vec![
            key(
                primary | Modifiers::SHIFT,
                Keysym::RETURN,
                ActionKind::Spawn,
                Arg::Opaque(TERMINAL),
            ),
            key(
                primary,
                Keysym::from_char('p'),
                ActionKind::Spawn,
                Arg::Opaque(LAUNCHER),
            ),
            key(
                primary,
                Keysym::from_char('j'),
                ActionKind::FocusStack,
                Arg::Int(1),
            ),
            key(
                primary,
                Keysym::from_char('k'),
                ActionKind::FocusStack,
                Arg::Int(-1),
            ),
            key(
                primary | Modifiers::SHIFT,
                Keysym::from_char('Q'),
                ActionKind::Quit,
                Arg::None,
            ),
            key(
                Modifiers::CTRL | Modifiers::ALT,
                Keysym::BACKSPACE,
                ActionKind::Quit,
                Arg::None,
            ),
        ];
        keys.extend((1..=12).map(|n| {
            key(
                Modifiers::CTRL | Modifiers::ALT,
                Keysym::function(n),
                ActionKind::ChangeVt,
                Arg::UInt(n),
            )
        }));

        let buttons = vec![
            ButtonBinding {
                modifiers: primary,
                button: Button::LEFT,
                action: ActionKind::MoveResize,
                arg: Arg::MOVE,
            },
            ButtonBinding {
                modifiers: primary,
                button: Button::RIGHT,
                action: ActionKind::MoveResize,
                arg: Arg::RESIZE,
            },
        ];

        Self {
            keys,
            buttons,
            commands: vec![Command::new(&["foot"]), Command::new(&["wmenu-run"])],
            primary_modifier: primary,
            ignored_modifiers: Modifiers::empty(),
            sloppy_focus: false,
        }
    }

    /// Checks every table entry and produces dispatch-ready [`Bindings`].
    ///
    /// Binding modifier masks are normalised with the same policy applied to
    /// incoming events, so a binding that names Caps Lock still matches.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "command tables are tiny; indices always fit in u32"
    )]
    pub fn validate(&self) -> Result<Bindings, ConfigError> {
        for (i, command) in self.commands.iter().enumerate() {
            if command.argv.is_empty() {
                return Err(ConfigError::EmptyCommand {
                    command: CommandId(i as u32),
                });
            }
        }

        let keys = self
            .keys
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let action = self.decode(BindingSlot::Key(i), b.action, b.arg)?;
                Ok(Binding {
                    modifiers: b.modifiers.normalized(self.ignored_modifiers),
                    trigger: b.keysym,
                    action,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let buttons = self
            .buttons
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let action = self.decode(BindingSlot::Button(i), b.action, b.arg)?;
                Ok(Binding {
                    modifiers: b.modifiers.normalized(self.ignored_modifiers),
                    trigger: b.button,
                    action,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Bindings {
            keys,
            buttons,
            commands: self.commands.clone(),
            ignored_modifiers: self.ignored_modifiers,
        })
    }

    fn decode(&self, slot: BindingSlot, kind: ActionKind, arg: Arg) -> Result<Action, ConfigError> {
        let action = match (kind, arg) {
            (ActionKind::Spawn, Arg::Opaque(command)) => {
                if command.0 as usize >= self.commands.len() {
                    return Err(ConfigError::UnknownCommand { slot, command });
                }
                Action::Spawn(command)
            }
            (ActionKind::FocusNext, Arg::None) => Action::FocusNext,
            (ActionKind::FocusStack, Arg::Int(dir)) => Action::FocusStack(dir),
            (ActionKind::MoveResize, Arg::UInt(1)) => Action::Move,
            (ActionKind::MoveResize, Arg::UInt(2)) => Action::Resize,
            (ActionKind::MoveResize, Arg::UInt(value)) => {
                return Err(ConfigError::InvalidCursorMode { slot, value });
            }
            (ActionKind::Quit, Arg::None) => Action::Quit,
            (ActionKind::ChangeVt, Arg::UInt(0)) => {
                return Err(ConfigError::InvalidVt { slot });
            }
            (ActionKind::ChangeVt, Arg::UInt(vt)) => Action::ChangeVt(vt),
            (action, arg) => {
                return Err(ConfigError::ArgumentMismatch {
                    slot,
                    action,
                    expected: action.expected(),
                    found: arg.kind(),
                });
            }
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn default_tables_validate() {
        let config = Config::default();
        let bindings = config.validate().unwrap();
        assert_eq!(bindings.keys().len(), 6 + 12);
        assert_eq!(bindings.buttons().len(), 2);
        assert_eq!(bindings.buttons()[0].action, Action::Move);
        assert_eq!(bindings.buttons()[1].action, Action::Resize);
        assert_eq!(bindings.command(TERMINAL).unwrap().argv, ["foot"]);
    }

    #[test]
    fn default_vt_switch_bindings() {
        let bindings = Config::default().validate().unwrap();
        let mut fired = Vec::new();
        bindings.dispatch_key(
            Modifiers::CTRL | Modifiers::ALT,
            Keysym::function(3),
            |a| fired.push(a),
        );
        assert_eq!(fired, [Action::ChangeVt(3)]);
    }

    #[test]
    fn stock_tables_follow_the_primary_modifier() {
        let config = Config::with_primary(Modifiers::LOGO);
        assert_eq!(config.primary_modifier, Modifiers::LOGO);
        let bindings = config.validate().unwrap();

        let mut fired = Vec::new();
        bindings.dispatch_key(Modifiers::LOGO, Keysym::from_char('j'), |a| fired.push(a));
        assert_eq!(fired, [Action::FocusStack(1)]);
        assert!(!bindings.dispatch_key(Modifiers::ALT, Keysym::from_char('j'), |_| {}));
        assert!(bindings.buttons().iter().all(|b| b.modifiers == Modifiers::LOGO));

        fired.clear();
        bindings.dispatch_key(
            Modifiers::CTRL | Modifiers::ALT,
            Keysym::function(1),
            |a| fired.push(a),
        );
        assert_eq!(fired, [Action::ChangeVt(1)]);
    }

    #[test]
    fn float_argument_is_rejected() {
        let mut config = Config::default();
        config.keys[2].arg = Arg::Float(1.0);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::ArgumentMismatch {
                slot: BindingSlot::Key(2),
                action: ActionKind::FocusStack,
                expected: ArgKind::Int,
                found: ArgKind::Float,
            }
        );
        assert_eq!(
            err.to_string(),
            "key binding 2: FocusStack expects a Int argument, found Float"
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let mut config = Config::default();
        config.commands.truncate(1);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnknownCommand {
                slot: BindingSlot::Key(1),
                command: LAUNCHER,
            }
        );
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut config = Config::default();
        config.commands[0].argv.clear();
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::EmptyCommand { command: TERMINAL }
        );
    }

    #[test]
    fn cursor_mode_and_vt_ranges() {
        let mut config = Config::default();
        config.buttons[1].arg = Arg::UInt(0);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidCursorMode {
                slot: BindingSlot::Button(1),
                value: 0,
            }
        );

        let mut config = Config::default();
        let last = config.keys.len() - 1;
        config.keys[last].arg = Arg::UInt(0);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidVt {
                slot: BindingSlot::Key(last),
            }
        );
    }

    #[test]
    fn binding_masks_are_normalised_at_load() {
        let config = Config {
            keys: vec![KeyBinding {
                modifiers: Modifiers::LOGO | Modifiers::CAPS | Modifiers::MOD2,
                keysym: Keysym::from_char('x'),
                action: ActionKind::Quit,
                arg: Arg::None,
            }],
            buttons: Vec::new(),
            commands: Vec::new(),
            primary_modifier: Modifiers::LOGO,
            ignored_modifiers: Modifiers::MOD2,
            sloppy_focus: false,
        };
        let bindings = config.validate().unwrap();
        assert_eq!(bindings.keys()[0].modifiers, Modifiers::LOGO);
        assert!(bindings.dispatch_key(Modifiers::LOGO, Keysym::from_char('x'), |_| {}));
    }
}
