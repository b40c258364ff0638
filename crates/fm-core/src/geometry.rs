//! Geometry inputs for floating-menu placement.
//!
//! All coordinates live in one shared space (usually viewport pixels) with the
//! origin at the top-left. The boundary types here mirror what the rendering
//! layer measures every frame; internally everything is converted to `kurbo`
//! rectangles.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// The element a menu is attached to: a selected shape, or a point such as a
/// connector midpoint when the extent is absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorRect {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl AnchorRect {
    /// A zero-size anchor at `(x, y)`.
    pub const fn point(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Width, treating absent or negative extents as 0.
    pub fn width_or_zero(&self) -> f64 {
        self.width.unwrap_or(0.0).max(0.0)
    }

    /// Height, treating absent or negative extents as 0.
    pub fn height_or_zero(&self) -> f64 {
        self.height.unwrap_or(0.0).max(0.0)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.x, self.y),
            Size::new(self.width_or_zero(), self.height_or_zero()),
        )
    }
}

/// Measured size of the floating menu element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuSize {
    pub width: f64,
    pub height: f64,
}

impl MenuSize {
    pub const ZERO: MenuSize = MenuSize {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_size(&self) -> Size {
        Size::new(self.width.max(0.0), self.height.max(0.0))
    }
}

/// The screen area a menu must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `false` until the container has been measured. An unmeasured viewport
    /// imposes no constraint on placement.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Strict AABB overlap. Rectangles that only share an edge do not overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Strict point containment. A point on the boundary is outside.
pub fn strictly_contains(rect: Rect, p: Point) -> bool {
    p.x > rect.x0 && p.x < rect.x1 && p.y > rect.y0 && p.y < rect.y1
}

/// `true` when any of the anchor's position or extent changed by more than
/// `epsilon`.
pub fn anchor_moved(prev: &AnchorRect, next: &AnchorRect, epsilon: f64) -> bool {
    (prev.x - next.x).abs() > epsilon
        || (prev.y - next.y).abs() > epsilon
        || (prev.width_or_zero() - next.width_or_zero()).abs() > epsilon
        || (prev.height_or_zero() - next.height_or_zero()).abs() > epsilon
}

/// Clamp a menu origin so a menu of `size` keeps `margin` from every viewport
/// edge. When the menu cannot fit on an axis it is pinned to `margin`.
///
/// Returns the clamped origin and whether both axes fit.
pub fn clamp_to_viewport(origin: Point, size: Size, viewport: Viewport, margin: f64) -> (Point, bool) {
    let (x, fits_x) = clamp_axis(origin.x, size.width, viewport.width, margin);
    let (y, fits_y) = clamp_axis(origin.y, size.height, viewport.height, margin);
    (Point::new(x, y), fits_x && fits_y)
}

fn clamp_axis(pos: f64, extent: f64, available: f64, margin: f64) -> (f64, bool) {
    let min = margin;
    let max = available - margin - extent;
    if max < min {
        (min, false)
    } else {
        (pos.clamp(min, max), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_extent_is_a_point() {
        let r = AnchorRect::point(40.0, 60.0).to_rect();
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
        assert_eq!(r.origin(), Point::new(40.0, 60.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!overlaps(a, b));
        assert!(overlaps(a, Rect::new(9.0, 9.0, 12.0, 12.0)));
    }

    #[test]
    fn boundary_point_is_outside() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(strictly_contains(r, Point::new(5.0, 5.0)));
        assert!(!strictly_contains(r, Point::new(10.0, 5.0)));
    }

    #[test]
    fn clamp_pins_to_margin_when_too_large() {
        let (p, fits) = clamp_to_viewport(
            Point::new(50.0, 50.0),
            Size::new(100.0, 10.0),
            Viewport::new(80.0, 200.0),
            12.0,
        );
        assert!(!fits);
        assert_eq!(p, Point::new(12.0, 50.0));
    }

    #[test]
    fn anchor_moved_respects_epsilon() {
        let a = AnchorRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(!anchor_moved(&a, &AnchorRect::new(10.4, 10.0, 20.0, 20.0), 0.5));
        assert!(anchor_moved(&a, &AnchorRect::new(10.0, 10.0, 21.0, 20.0), 0.5));
    }

    #[test]
    fn unmeasured_viewport() {
        assert!(!Viewport::default().is_measured());
        assert!(!Viewport::new(0.0, 300.0).is_measured());
        assert!(Viewport::new(1.0, 1.0).is_measured());
    }
}
