// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus transitions.
//!
//! At most one view holds keyboard focus. Focusing a view raises it to the
//! front of the registry, so right after any focus change the focused view is
//! the topmost one. The previous view is always deactivated before the new
//! one is activated, so no two views ever carry the activated indicator.

use crate::shell::Shell;
use crate::substrate::Substrate;
use crate::trace::{FocusEvent, Tracer};
use crate::view::ViewId;

impl Shell {
    /// Gives keyboard focus to `view`.
    ///
    /// A no-op for `None` and for the view that already has focus.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn focus(
        &mut self,
        view: Option<ViewId>,
        substrate: &mut dyn Substrate,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(view) = view else {
            return;
        };
        if self.focused == Some(view) {
            return;
        }
        let previous = self.focused;
        if let Some(previous) = previous {
            self.views.set_activated(previous, false);
            substrate.set_activated(self.views.surface(previous), false);
        }

        self.views.raise(view);
        self.views.set_activated(view, true);
        let surface = self.views.surface(view);
        substrate.set_activated(surface, true);
        substrate.keyboard_enter(surface, self.modifiers);
        self.focused = Some(view);

        tracer.focus(&FocusEvent {
            previous,
            current: Some(view),
        });
    }

    /// Focuses the second mapped view and sends the front one to the back.
    ///
    /// Repeated calls cycle through every mapped view. With fewer than two
    /// mapped views this does nothing.
    pub fn focus_next(&mut self, substrate: &mut dyn Substrate, tracer: &mut Tracer<'_>) {
        let mut mapped = self
            .views
            .iter_front_to_back()
            .filter(|&view| self.views.is_mapped(view));
        let (Some(current), Some(next)) = (mapped.next(), mapped.next()) else {
            return;
        };
        self.focus(Some(next), substrate, tracer);
        self.views.lower(current);
    }

    /// Rotates focus through the stack.
    ///
    /// A positive `dir` behaves like [`focus_next`](Self::focus_next). A
    /// negative `dir` focuses the back-most mapped view, undoing one
    /// `focus_next`. Zero does nothing.
    pub fn focus_stack(&mut self, dir: i32, substrate: &mut dyn Substrate, tracer: &mut Tracer<'_>) {
        if dir > 0 {
            self.focus_next(substrate, tracer);
        } else if dir < 0 {
            let back = self
                .views
                .iter_back_to_front()
                .find(|&view| self.views.is_mapped(view));
            self.focus(back, substrate, tracer);
        }
    }

    /// Drops keyboard focus without focusing anything else.
    pub(crate) fn unfocus(&mut self, substrate: &mut dyn Substrate, tracer: &mut Tracer<'_>) {
        let Some(previous) = self.focused.take() else {
            return;
        };
        self.views.set_activated(previous, false);
        substrate.set_activated(self.views.surface(previous), false);
        substrate.keyboard_clear_focus();
        tracer.focus(&FocusEvent {
            previous: Some(previous),
            current: None,
        });
    }

    /// Returns the topmost mapped view.
    pub(crate) fn front_mapped(&self) -> Option<ViewId> {
        self.views
            .iter_front_to_back()
            .find(|&view| self.views.is_mapped(view))
    }
}
