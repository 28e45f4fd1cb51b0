//! Inverse mask outline: one closed path covering the canvas except the selection.
//!
//! The outer loop runs clockwise around the canvas from the origin, a seam leads to the
//! selection's bottom-left corner, the selection is traced with the opposite winding and the
//! seam is walked back. Filled with either the non-zero or the even-odd rule, the selection's
//! interior stays uncovered.

use std::fmt::Write as _;

use serde::Serialize;

use crate::geometry::{CanvasBounds, Point, SelectionBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskPath {
    vertices: Vec<Point>,
}

/// Builds the mask outline for `selection` on `canvas`. Pure; call again after every change.
pub fn build_mask_path(canvas: CanvasBounds, selection: SelectionBounds) -> MaskPath {
    let (width, height) = (canvas.width, canvas.height);
    let (x0, y0) = (selection.left, selection.top);
    let (x1, y1) = (selection.right(), selection.bottom());

    MaskPath {
        vertices: vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
            Point::new(x0, y1),
            Point::new(x1, y1),
            Point::new(x1, y0),
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(0.0, height),
            Point::new(0.0, 0.0),
        ],
    }
}

impl MaskPath {
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub const fn fill_rule(&self) -> FillRule {
        FillRule::EvenOdd
    }

    /// SVG path data, `M x y L x y ... Z`.
    pub fn svg_data(&self) -> String {
        let mut data = String::new();
        for (index, vertex) in self.vertices.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            let _ = write!(data, "{command} {} {} ", vertex.x, vertex.y);
        }
        data.push('Z');
        data
    }

    /// Shoelace area with sign; positive for the clockwise outer loop in screen coordinates.
    pub fn signed_area(&self) -> f64 {
        let sum: f64 = self
            .edges()
            .map(|(from, to)| from.x * to.y - to.x * from.y)
            .sum();
        sum / 2.0
    }

    /// Area painted when the path is filled.
    pub fn covered_area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Point test under the path's own fill rule. Points on an edge may land on either side.
    pub fn contains(&self, point: Point) -> bool {
        self.covers(point, self.fill_rule())
    }

    /// Point test under `rule`.
    pub fn covers(&self, point: Point, rule: FillRule) -> bool {
        match rule {
            FillRule::EvenOdd => self.crossings(point) % 2 == 1,
            FillRule::NonZero => self.winding_number(point) != 0,
        }
    }

    fn crossings(&self, point: Point) -> usize {
        self.edges()
            .filter(|(from, to)| {
                (from.y > point.y) != (to.y > point.y)
                    && point.x
                        < from.x + (to.x - from.x) * (point.y - from.y) / (to.y - from.y)
            })
            .count()
    }

    fn winding_number(&self, point: Point) -> i32 {
        let side = |from: Point, to: Point| {
            (to.x - from.x) * (point.y - from.y) - (point.x - from.x) * (to.y - from.y)
        };
        self.edges().fold(0, |winding, (from, to)| {
            if from.y <= point.y && to.y > point.y && side(from, to) > 0.0 {
                winding + 1
            } else if from.y > point.y && to.y <= point.y && side(from, to) < 0.0 {
                winding - 1
            } else {
                winding
            }
        })
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = self
            .vertices
            .last()
            .copied()
            .zip(self.vertices.first().copied());
        self.vertices
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }
}
