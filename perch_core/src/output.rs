// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display output identification.
//!
//! [`OutputId`] is a lightweight handle identifying one output. Substrates
//! assign these; the core treats them as opaque. [`OutputInfo`] carries the
//! placement data the render pass needs to convert layout coordinates into
//! output-local pixels.

use core::fmt;

use kurbo::{Point, Rect, Vec2};

/// Identifies a specific display output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OutputId(pub u32);

impl fmt::Debug for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutputId({})", self.0)
    }
}

/// Placement of an output within the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputInfo {
    /// Output identity.
    pub id: OutputId,
    /// Top-left corner of the output in layout coordinates.
    pub origin: Point,
    /// Pixels per layout unit.
    pub scale: f64,
}

impl OutputInfo {
    /// Creates an output at the layout origin with scale 1.
    #[must_use]
    pub const fn new(id: OutputId) -> Self {
        Self {
            id,
            origin: Point::ZERO,
            scale: 1.0,
        }
    }

    /// Converts a layout-space rectangle into output-local pixels.
    #[must_use]
    pub fn to_output(&self, layout: Rect) -> Rect {
        let local = layout - Vec2::new(self.origin.x, self.origin.y);
        Rect::new(
            local.x0 * self.scale,
            local.y0 * self.scale,
            local.x1 * self.scale,
            local.y1 * self.scale,
        )
    }
}
