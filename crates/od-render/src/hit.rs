//! Hit testing: point → shape geometry checks.
//!
//! Surfaces use these to answer "which items overlap this point". A shape
//! covers its interior plus half its outline on either side of the edge.

use kurbo::{Point, Rect};
use od_core::model::{self, Bounds, ShapeKind};

/// Whether `point` lies on or inside a shape of `kind` drawn in `bounds`.
pub fn shape_contains(kind: ShapeKind, bounds: Bounds, outline_width: f64, point: model::Point) -> bool {
    let half = outline_width.max(0.0) / 2.0;
    let rect = Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1)
        .abs()
        .inflate(half, half);
    let pt = Point::new(point.x, point.y);

    match kind {
        ShapeKind::Oval => ellipse_contains(rect, pt),
    }
}

/// Inclusive test against the ellipse inscribed in `rect`. A zero radius
/// never contains anything.
fn ellipse_contains(rect: Rect, pt: Point) -> bool {
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let d = pt - rect.center();
    (d.x / rx).powi(2) + (d.y / ry).powi(2) <= 1.0
}
