// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-testing and render order.
//!
//! Both walks read the stacking sequence directly, so registry order is the
//! only z-order there is. Hit-testing runs front to back and stops at the
//! first hit; rendering runs back to front (painter's order). Unmapped views
//! take part in neither.

use kurbo::{Point, Rect};

use crate::output::OutputInfo;
use crate::substrate::{SurfaceAdapter, SurfaceRenderer};
use crate::view::{SurfaceHandle, ViewId, ViewStore};

/// A successful hit test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Topmost mapped view under the point.
    pub view: ViewId,
    /// Surface of that view under the point (root or sub-surface).
    pub surface: SurfaceHandle,
    /// Point in `surface` coordinates.
    pub local: Point,
}

/// Counts from one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Mapped views visited.
    pub views: u32,
    /// Surfaces handed to the renderer.
    pub surfaces: u32,
}

/// Finds the topmost mapped view with a surface under `point`.
#[must_use]
pub fn hit_test(store: &ViewStore, adapter: &dyn SurfaceAdapter, point: Point) -> Option<Hit> {
    store
        .iter_front_to_back()
        .filter(|&view| store.is_mapped(view))
        .find_map(|view| {
            let root = store.surface(view);
            let local = (point - store.position(view)).to_point();
            adapter
                .surface_at(root, local)
                .map(|(surface, local)| Hit {
                    view,
                    surface,
                    local,
                })
        })
}

/// Draws every mapped view onto `output`, back to front.
///
/// Each surface lands at the view position plus the surface's offset inside
/// the view, translated to output-local coordinates and scaled.
pub fn render_output(
    store: &ViewStore,
    adapter: &dyn SurfaceAdapter,
    output: &OutputInfo,
    renderer: &mut dyn SurfaceRenderer,
) -> RenderStats {
    let mut stats = RenderStats::default();
    for view in store.iter_back_to_front() {
        if !store.is_mapped(view) {
            continue;
        }
        stats.views += 1;
        let position = store.position(view);
        adapter.for_each_surface(store.surface(view), &mut |surface, offset, size| {
            let layout = Rect::from_origin_size(position + offset, size);
            renderer.render_surface(surface, output.to_output(layout));
            stats.surfaces += 1;
        });
    }
    stats
}
