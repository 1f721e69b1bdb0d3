// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary: modifiers, keysyms, buttons, and edges.
//!
//! Values follow the conventions of the Linux input stack so that a
//! substrate can pass them through unchanged: modifier bits match the seat
//! modifier mask, keysyms are XKB keysyms, and button codes are evdev codes.

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier mask.
    ///
    /// Combine with `|`. Bindings compare masks after
    /// [`normalized`](Self::normalized) has removed Caps Lock.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Caps Lock. Never participates in a binding match.
        const CAPS = 1 << 1;
        /// Control.
        const CTRL = 1 << 2;
        /// Alt (Mod1).
        const ALT = 1 << 3;
        /// Num Lock (Mod2).
        const MOD2 = 1 << 4;
        /// Mod3.
        const MOD3 = 1 << 5;
        /// Super / logo key (Mod4).
        const LOGO = 1 << 6;
        /// Mod5 (usually AltGr).
        const MOD5 = 1 << 7;
    }
}

impl Modifiers {
    /// Returns the mask with Caps Lock and any `ignored` bits cleared.
    #[inline]
    #[must_use]
    pub fn normalized(self, ignored: Self) -> Self {
        self.difference(ignored | Self::CAPS)
    }
}

bitflags! {
    /// Window edges taking part in an interactive resize.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Edges: u32 {
        /// Top edge.
        const TOP = 1 << 0;
        /// Bottom edge.
        const BOTTOM = 1 << 1;
        /// Left edge.
        const LEFT = 1 << 2;
        /// Right edge.
        const RIGHT = 1 << 3;
    }
}

/// An XKB keysym.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keysym(pub u32);

impl Keysym {
    /// `Return`.
    pub const RETURN: Self = Self(0xff0d);
    /// `Tab`.
    pub const TAB: Self = Self(0xff09);
    /// `BackSpace`.
    pub const BACKSPACE: Self = Self(0xff08);
    /// `Escape`.
    pub const ESCAPE: Self = Self(0xff1b);
    /// `space`.
    pub const SPACE: Self = Self(0x0020);

    /// Returns the keysym for an ASCII printable character.
    ///
    /// Latin-1 keysyms share their code points with the characters they
    /// produce, so `from_char('q')` and `from_char('Q')` are distinct.
    ///
    /// # Panics
    ///
    /// Panics if `c` is not printable ASCII.
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        assert!(c.is_ascii_graphic(), "keysym must be printable ASCII");
        Self(c as u32)
    }

    /// Returns the keysym for function key `F<n>`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= n <= 35`.
    #[must_use]
    pub const fn function(n: u32) -> Self {
        assert!(n >= 1 && n <= 35, "function keys run from F1 to F35");
        Self(0xffbe + n - 1)
    }
}

impl fmt::Debug for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keysym({:#06x})", self.0)
    }
}

/// An evdev pointer button code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Button(pub u32);

impl Button {
    /// `BTN_LEFT`.
    pub const LEFT: Self = Self(0x110);
    /// `BTN_RIGHT`.
    pub const RIGHT: Self = Self(0x111);
    /// `BTN_MIDDLE`.
    pub const MIDDLE: Self = Self(0x112);
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LEFT => f.write_str("Button(LEFT)"),
            Self::RIGHT => f.write_str("Button(RIGHT)"),
            Self::MIDDLE => f.write_str("Button(MIDDLE)"),
            Self(code) => write!(f, "Button({code:#x})"),
        }
    }
}

/// Whether a key or button went down or up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PressState {
    /// The key or button was pressed.
    Pressed,
    /// The key or button was released.
    Released,
}

/// Scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Vertical scrolling.
    Vertical,
    /// Horizontal scrolling.
    Horizontal,
}
