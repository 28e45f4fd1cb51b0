//! Selection rectangle model with bounded mutations.
//!
//! Every operation computes the complete next [`RectGeometry`] and assigns it in one step,
//! so the rectangle is never observable in a half-updated state.

use crate::geometry::{clamp_axis, CanvasBounds, Point, RectGeometry, SelectionBounds};

/// Geometry proposed by the host after a corner or edge drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeProposal {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ResizeProposal {
    pub const fn new(left: f64, top: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            left,
            top,
            scale_x,
            scale_y,
        }
    }
}

impl From<RectGeometry> for ResizeProposal {
    fn from(geometry: RectGeometry) -> Self {
        Self::new(
            geometry.left,
            geometry.top,
            geometry.scale_x,
            geometry.scale_y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeOutcome {
    pub rejected_x: bool,
    pub rejected_y: bool,
}

impl ResizeOutcome {
    pub const fn is_accepted(&self) -> bool {
        !self.rejected_x && !self.rejected_y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRect {
    geometry: RectGeometry,
    last_scale: (f64, f64),
}

impl Default for SelectionRect {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionRect {
    /// Zero-size rectangle at the origin.
    pub const fn new() -> Self {
        Self {
            geometry: RectGeometry::new(0.0, 0.0, 0.0, 0.0),
            last_scale: (1.0, 1.0),
        }
    }

    /// Rectangle at `initial`, shrunk and shifted as needed to lie inside `canvas`.
    pub fn fitted(initial: SelectionBounds, canvas: CanvasBounds) -> Self {
        let width = clamp_axis(initial.width, canvas.width);
        let height = clamp_axis(initial.height, canvas.height);
        let left = fit_start(initial.left, width, canvas.width);
        let top = fit_start(initial.top, height, canvas.height);
        Self {
            geometry: RectGeometry::new(left, top, width, height),
            last_scale: (1.0, 1.0),
        }
    }

    pub fn geometry(&self) -> RectGeometry {
        self.geometry
    }

    pub fn bounds(&self) -> SelectionBounds {
        self.geometry.bounds()
    }

    /// Scale factors a rejected resize falls back to.
    pub fn last_accepted_scale(&self) -> (f64, f64) {
        self.last_scale
    }

    /// Collapses the rectangle to zero size in place and drops any scaling.
    pub fn reset(&mut self) {
        self.geometry = RectGeometry::new(self.geometry.left, self.geometry.top, 0.0, 0.0);
        self.last_scale = (1.0, 1.0);
    }

    /// Spans the rectangle between the fixed `anchor` and the live pointer, in any direction,
    /// clipped to the canvas.
    pub fn set_from_drag(&mut self, anchor: Point, current: Point, canvas: CanvasBounds) {
        let left = clamp_axis(anchor.x.min(current.x), canvas.width);
        let top = clamp_axis(anchor.y.min(current.y), canvas.height);
        let right = clamp_axis(anchor.x.max(current.x), canvas.width);
        let bottom = clamp_axis(anchor.y.max(current.y), canvas.height);
        self.geometry = RectGeometry::new(
            left,
            top,
            fit_extent(left, right - left, right),
            fit_extent(top, bottom - top, bottom),
        );
    }

    /// Moves the rectangle by its body. Size is kept; the position saturates so the whole
    /// rectangle stays on the canvas.
    pub fn clamp_move(&mut self, proposed_left: f64, proposed_top: f64, canvas: CanvasBounds) {
        let current = self.geometry;
        self.geometry = RectGeometry {
            left: fit_start(proposed_left, current.scaled_width(), canvas.width),
            top: fit_start(proposed_top, current.scaled_height(), canvas.height),
            ..current
        };
    }

    /// Applies a host-proposed resize.
    ///
    /// An axis whose proposal leaves the canvas is rejected as a whole: its scale reverts to
    /// the last accepted value instead of being clipped. Edges landing exactly on the canvas
    /// border are accepted. Once the scales are settled the position is clamped back inside.
    pub fn clamp_resize(&mut self, proposal: ResizeProposal, canvas: CanvasBounds) -> ResizeOutcome {
        let current = self.geometry;
        let proposed = RectGeometry {
            left: proposal.left,
            top: proposal.top,
            scale_x: proposal.scale_x,
            scale_y: proposal.scale_y,
            ..current
        };

        let rejected_x = !axis_fits(
            proposed.left,
            proposed.scaled_width(),
            proposed.scale_x,
            canvas.width,
        );
        let rejected_y = !axis_fits(
            proposed.top,
            proposed.scaled_height(),
            proposed.scale_y,
            canvas.height,
        );

        let mut next = proposed;
        if rejected_x {
            next.scale_x = self.last_scale.0;
        }
        if rejected_y {
            next.scale_y = self.last_scale.1;
        }
        next.left = fit_start(next.left, next.scaled_width(), canvas.width);
        next.top = fit_start(next.top, next.scaled_height(), canvas.height);

        self.geometry = next;
        self.last_scale = (next.scale_x, next.scale_y);
        ResizeOutcome {
            rejected_x,
            rejected_y,
        }
    }
}

/// Clamps `start` into `[0, limit - extent]` so that `start + extent <= limit` holds in f64
/// arithmetic too. `(limit - extent) + extent` can round one ulp past `limit`.
fn fit_start(start: f64, extent: f64, limit: f64) -> f64 {
    let mut start = clamp_axis(start, limit - extent);
    while start > 0.0 && start + extent > limit {
        start = start.next_down().max(0.0);
    }
    start
}

/// Shrinks `extent` until `start + extent <= end`.
fn fit_extent(start: f64, extent: f64, end: f64) -> f64 {
    let mut extent = extent.max(0.0);
    while extent > 0.0 && start + extent > end {
        extent = extent.next_down().max(0.0);
    }
    extent
}

fn axis_fits(start: f64, extent: f64, scale: f64, limit: f64) -> bool {
    scale.is_finite() && scale > 0.0 && start >= 0.0 && start + extent <= limit
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasBounds = CanvasBounds {
        width: 500.0,
        height: 300.0,
    };

    fn rect_at(left: f64, top: f64, width: f64, height: f64) -> SelectionRect {
        SelectionRect::fitted(SelectionBounds::new(left, top, width, height), CANVAS)
    }

    #[test]
    fn drag_stays_inside_canvas_in_every_direction() {
        let anchor = Point::new(250.0, 150.0);
        let pointers = [
            Point::new(480.0, 20.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 280.0),
            Point::new(480.0, 280.0),
            Point::new(900.0, -40.0),
            Point::new(-60.0, 700.0),
        ];
        for pointer in pointers {
            let mut selection = SelectionRect::new();
            selection.set_from_drag(anchor, pointer, CANVAS);
            let bounds = selection.bounds();
            assert!(bounds.is_within(CANVAS), "{pointer:?} produced {bounds:?}");
            assert!(bounds.contains_point(Point::new(
                pointer.x.clamp(0.0, 500.0),
                pointer.y.clamp(0.0, 300.0)
            )));
        }
    }

    #[test]
    fn drag_past_bottom_right_is_clipped() {
        let mut selection = SelectionRect::new();
        selection.set_from_drag(Point::new(450.0, 50.0), Point::new(600.0, 400.0), CANVAS);
        assert_eq!(
            selection.bounds(),
            SelectionBounds::new(450.0, 50.0, 50.0, 250.0)
        );
    }

    #[test]
    fn drag_up_and_left_uses_pointer_as_top_left() {
        let mut selection = SelectionRect::new();
        selection.set_from_drag(Point::new(300.0, 200.0), Point::new(100.0, 50.0), CANVAS);
        assert_eq!(
            selection.bounds(),
            SelectionBounds::new(100.0, 50.0, 200.0, 150.0)
        );
    }

    #[test]
    fn zero_size_drag_is_valid() {
        let mut selection = SelectionRect::new();
        selection.set_from_drag(Point::new(40.0, 40.0), Point::new(40.0, 40.0), CANVAS);
        assert_eq!(selection.bounds(), SelectionBounds::new(40.0, 40.0, 0.0, 0.0));
    }

    #[test]
    fn reset_collapses_size_and_scale() {
        let mut selection = rect_at(10.0, 10.0, 100.0, 100.0);
        selection.clamp_resize(ResizeProposal::new(10.0, 10.0, 2.0, 1.5), CANVAS);
        selection.reset();
        let geometry = selection.geometry();
        assert_eq!(geometry.width, 0.0);
        assert_eq!(geometry.height, 0.0);
        assert_eq!((geometry.scale_x, geometry.scale_y), (1.0, 1.0));
        assert_eq!(selection.last_accepted_scale(), (1.0, 1.0));
    }

    #[test]
    fn move_clamps_each_axis_independently() {
        let mut selection = rect_at(0.0, 0.0, 100.0, 100.0);
        selection.clamp_move(-20.0, 250.0, CANVAS);
        let bounds = selection.bounds();
        assert_eq!((bounds.left, bounds.top), (0.0, 200.0));
        assert_eq!((bounds.width, bounds.height), (100.0, 100.0));
    }

    #[test]
    fn move_is_idempotent_for_valid_proposals() {
        let mut once = rect_at(0.0, 0.0, 100.0, 100.0);
        once.clamp_move(120.0, 80.0, CANVAS);
        let mut twice = once.clone();
        twice.clamp_move(120.0, 80.0, CANVAS);
        assert_eq!(once, twice);
        assert_eq!(
            twice.bounds(),
            SelectionBounds::new(120.0, 80.0, 100.0, 100.0)
        );
    }

    #[test]
    fn move_accounts_for_scaled_extent() {
        let mut selection = rect_at(0.0, 0.0, 100.0, 100.0);
        selection.clamp_resize(ResizeProposal::new(0.0, 0.0, 2.0, 1.0), CANVAS);
        selection.clamp_move(400.0, 0.0, CANVAS);
        assert_eq!(selection.bounds().left, 300.0);
    }

    #[test]
    fn resize_exactly_to_canvas_edge_is_accepted() {
        let mut selection = rect_at(100.0, 100.0, 100.0, 100.0);
        let outcome = selection.clamp_resize(ResizeProposal::new(100.0, 100.0, 4.0, 2.0), CANVAS);
        assert!(outcome.is_accepted());
        assert_eq!(
            selection.bounds(),
            SelectionBounds::new(100.0, 100.0, 400.0, 200.0)
        );
        assert_eq!(selection.last_accepted_scale(), (4.0, 2.0));
    }

    #[test]
    fn resize_past_right_edge_restores_last_scale_exactly() {
        let mut selection = rect_at(100.0, 50.0, 30.0, 30.0);
        let accepted_scale = 1.0 / 3.0 + 1.0;
        selection.clamp_resize(
            ResizeProposal::new(100.0, 50.0, accepted_scale, 1.0),
            CANVAS,
        );

        let outcome = selection.clamp_resize(ResizeProposal::new(100.0, 50.0, 20.0, 1.0), CANVAS);
        assert!(outcome.rejected_x);
        assert!(!outcome.rejected_y);
        let geometry = selection.geometry();
        assert_eq!(geometry.scale_x.to_bits(), accepted_scale.to_bits());
        assert_eq!(geometry.scale_y, 1.0);
        assert_eq!(selection.last_accepted_scale().0.to_bits(), accepted_scale.to_bits());
    }

    #[test]
    fn rejected_resize_clamps_negative_position_to_zero() {
        let mut selection = rect_at(10.0, 10.0, 50.0, 50.0);
        let outcome = selection.clamp_resize(ResizeProposal::new(-15.0, -5.0, 1.5, 1.2), CANVAS);
        assert!(outcome.rejected_x);
        assert!(outcome.rejected_y);
        let geometry = selection.geometry();
        assert_eq!((geometry.left, geometry.top), (0.0, 0.0));
        assert_eq!((geometry.scale_x, geometry.scale_y), (1.0, 1.0));
    }

    #[test]
    fn resize_rejection_only_affects_the_overflowing_axis() {
        let mut selection = rect_at(0.0, 200.0, 100.0, 50.0);
        let outcome = selection.clamp_resize(ResizeProposal::new(0.0, 200.0, 2.0, 3.0), CANVAS);
        assert!(!outcome.rejected_x);
        assert!(outcome.rejected_y);
        assert_eq!(
            selection.bounds(),
            SelectionBounds::new(0.0, 200.0, 200.0, 50.0)
        );
    }

    #[test]
    fn non_finite_or_non_positive_scales_are_rejected() {
        let mut selection = rect_at(10.0, 10.0, 50.0, 50.0);
        let outcome =
            selection.clamp_resize(ResizeProposal::new(10.0, 10.0, f64::NAN, -1.0), CANVAS);
        assert!(outcome.rejected_x && outcome.rejected_y);
        assert_eq!(selection.bounds(), SelectionBounds::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn move_to_far_edge_survives_rounding() {
        let canvas = CanvasBounds::new(333.3, 200.0);
        let mut selection =
            SelectionRect::fitted(SelectionBounds::new(0.0, 0.0, 64.1, 100.0), canvas);
        selection.clamp_move(1000.0, 0.0, canvas);
        let bounds = selection.bounds();
        assert!(bounds.is_within(canvas), "{bounds:?} leaves {canvas:?}");
        assert!(canvas.width - bounds.right() < 1e-9);

        let geometry = selection.geometry();
        let outcome = selection.clamp_resize(
            ResizeProposal::new(geometry.left, geometry.top, 1.0, 1.5),
            canvas,
        );
        assert!(!outcome.rejected_x);
        assert!(!outcome.rejected_y);
        assert!(selection.bounds().is_within(canvas));
    }

    #[test]
    fn drag_to_far_edge_survives_rounding() {
        let canvas = CanvasBounds::new(45.1, 30.0);
        let mut selection = SelectionRect::new();
        selection.set_from_drag(Point::new(12.7, 5.0), Point::new(100.0, 20.0), canvas);
        let bounds = selection.bounds();
        assert_eq!(bounds.left, 12.7);
        assert!(bounds.is_within(canvas), "{bounds:?} leaves {canvas:?}");
        assert!(canvas.width - bounds.right() < 1e-9);
    }

    #[test]
    fn fitted_shrinks_default_geometry_on_small_canvas() {
        let small = CanvasBounds::new(300.0, 80.0);
        let selection =
            SelectionRect::fitted(SelectionBounds::new(100.0, 50.0, 400.0, 50.0), small);
        let bounds = selection.bounds();
        assert!(bounds.is_within(small));
        assert_eq!(bounds, SelectionBounds::new(0.0, 30.0, 300.0, 50.0));
    }
}
