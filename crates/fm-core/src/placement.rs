//! Floating-menu placement solver.
//!
//! Given an anchor, the menu's measured size, the viewport and an optional
//! pointer, picks the first side of the anchor (top, bottom, left, right)
//! where the menu:
//!
//! 1. stays `margin` away from every viewport edge,
//! 2. does not overlap the anchor,
//! 3. does not cover the pointer (expanded by `pointer_padding`).
//!
//! Each side goes through viewport fit, then anchor separation, then pointer
//! avoidance. The first side that survives all of them wins.
//! There is no scoring across sides. When none survives, the first rejected
//! candidate is clamped into the viewport and reported as `Top`.
//!
//! The solver is total: any input, however degenerate, yields a finite
//! placement.

use crate::geometry::{
    AnchorRect, MenuSize, Viewport, clamp_to_viewport, overlaps, strictly_contains,
};
use crate::options::PlacementOptions;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which side of the anchor the menu sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Orientation {
    /// Fixed try order. Not adapted to where the anchor sits on screen.
    pub const PRIORITY: [Orientation; 4] = [
        Orientation::Top,
        Orientation::Bottom,
        Orientation::Left,
        Orientation::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Top => "top",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
            Orientation::Right => "right",
        }
    }

    /// Unit vector pointing from the anchor towards the menu.
    fn outward(self) -> Vec2 {
        match self {
            Orientation::Top => Vec2::new(0.0, -1.0),
            Orientation::Bottom => Vec2::new(0.0, 1.0),
            Orientation::Left => Vec2::new(-1.0, 0.0),
            Orientation::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Top-left corner of the menu and the side it was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub position: Point,
    pub orientation: Orientation,
}

impl PlacementResult {
    pub fn new(position: Point, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// The menu rectangle this placement produces for `size`.
    pub fn rect(&self, size: MenuSize) -> Rect {
        Rect::from_origin_size(self.position, size.to_size())
    }
}

/// Why a side was rejected (or that it was taken).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Placed,
    /// The menu cannot fit between the viewport margins.
    OutOfViewport,
    /// Still overlapping the anchor after being pushed away.
    OverlapsAnchor,
    /// Covers the pointer and could not be pushed clear of it.
    CoversPointer,
}

/// One side the solver tried, with the rectangle it ended on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    pub orientation: Orientation,
    pub rect: Rect,
    pub outcome: AttemptOutcome,
}

/// Full solver output: the placement plus every side tried, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementReport {
    pub result: PlacementResult,
    pub attempts: SmallVec<[Attempt; 4]>,
    /// `true` when no side passed and the clamped fallback was used.
    pub fell_back: bool,
}

/// Compute where to put a floating menu.
pub fn compute_placement(
    anchor: &AnchorRect,
    size: Option<MenuSize>,
    viewport: Viewport,
    pointer: Option<Point>,
    options: &PlacementOptions,
) -> PlacementResult {
    explain_placement(anchor, size, viewport, pointer, options).result
}

/// Like [`compute_placement`], but also reports every side that was tried.
/// Used by debug overlays and tests.
pub fn explain_placement(
    anchor: &AnchorRect,
    size: Option<MenuSize>,
    viewport: Viewport,
    pointer: Option<Point>,
    options: &PlacementOptions,
) -> PlacementReport {
    let solver = Solver {
        anchor: anchor.to_rect(),
        size: size.unwrap_or(MenuSize::ZERO).to_size(),
        viewport,
        pointer,
        options,
    };
    let mut attempts = SmallVec::new();

    // Not measured yet: nothing to fit against.
    if !viewport.is_measured() {
        let rect = solver.candidate(Orientation::Top);
        attempts.push(Attempt {
            orientation: Orientation::Top,
            rect,
            outcome: AttemptOutcome::Placed,
        });
        return PlacementReport {
            result: PlacementResult::new(rect.origin(), Orientation::Top),
            attempts,
            fell_back: false,
        };
    }

    let mut fallback: Option<Rect> = None;
    for orientation in Orientation::PRIORITY {
        match solver.try_side(orientation) {
            Ok(rect) => {
                attempts.push(Attempt {
                    orientation,
                    rect,
                    outcome: AttemptOutcome::Placed,
                });
                return PlacementReport {
                    result: PlacementResult::new(rect.origin(), orientation),
                    attempts,
                    fell_back: false,
                };
            }
            Err((rect, outcome)) => {
                log::trace!(
                    "menu placement: {} rejected ({outcome:?}) at ({:.1}, {:.1})",
                    orientation.as_str(),
                    rect.x0,
                    rect.y0
                );
                attempts.push(Attempt {
                    orientation,
                    rect,
                    outcome,
                });
                fallback.get_or_insert(rect);
            }
        }
    }

    let base = fallback.unwrap_or_else(|| solver.candidate(Orientation::Top));
    let (origin, _) = clamp_to_viewport(base.origin(), solver.size, viewport, options.margin);
    log::trace!(
        "menu placement: no side fits, clamped fallback at ({:.1}, {:.1})",
        origin.x,
        origin.y
    );
    PlacementReport {
        result: PlacementResult::new(origin, Orientation::Top),
        attempts,
        fell_back: true,
    }
}

// ─── Solver passes ───────────────────────────────────────────────────────

type Rejection = (Rect, AttemptOutcome);

struct Solver<'a> {
    anchor: Rect,
    size: Size,
    viewport: Viewport,
    pointer: Option<Point>,
    options: &'a PlacementOptions,
}

impl Solver<'_> {
    /// Menu centred on the anchor's cross axis, `gap` away on the main axis.
    fn candidate(&self, orientation: Orientation) -> Rect {
        let a = self.anchor;
        let (w, h) = (self.size.width, self.size.height);
        let gap = self.options.gap;
        let c = a.center();
        let origin = match orientation {
            Orientation::Top => Point::new(c.x - w / 2.0, a.y0 - gap - h),
            Orientation::Bottom => Point::new(c.x - w / 2.0, a.y1 + gap),
            Orientation::Left => Point::new(a.x0 - gap - w, c.y - h / 2.0),
            Orientation::Right => Point::new(a.x1 + gap, c.y - h / 2.0),
        };
        self.at(origin)
    }

    fn at(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.size)
    }

    fn try_side(&self, orientation: Orientation) -> Result<Rect, Rejection> {
        let rect = self.fit(self.candidate(orientation))?;
        let rect = self.separate(rect, orientation)?;

        let Some(pointer) = self.pointer else {
            return Ok(rect);
        };
        if !self.covers(rect, pointer) {
            return Ok(rect);
        }

        let pushed = self.avoid_pointer(rect, pointer)?;
        let rect = self.fit(pushed)?;
        let rect = self.separate(rect, orientation)?;
        if self.covers(rect, pointer) {
            return Err((rect, AttemptOutcome::CoversPointer));
        }
        Ok(rect)
    }

    /// Viewport-fit pass.
    fn fit(&self, rect: Rect) -> Result<Rect, Rejection> {
        let (origin, fits) =
            clamp_to_viewport(rect.origin(), self.size, self.viewport, self.options.margin);
        let rect = self.at(origin);
        if fits {
            Ok(rect)
        } else {
            Err((rect, AttemptOutcome::OutOfViewport))
        }
    }

    /// Anchor-overlap pass: push outward by the overlap plus `gap`, then
    /// re-fit.
    fn separate(&self, rect: Rect, orientation: Orientation) -> Result<Rect, Rejection> {
        if !overlaps(rect, self.anchor) {
            return Ok(rect);
        }
        let a = self.anchor;
        let overlap = match orientation {
            Orientation::Top => rect.y1 - a.y0,
            Orientation::Bottom => a.y1 - rect.y0,
            Orientation::Left => rect.x1 - a.x0,
            Orientation::Right => a.x1 - rect.x0,
        };
        let shift = orientation.outward() * (overlap + self.options.gap);
        let rect = self.fit(self.at(rect.origin() + shift))?;
        if overlaps(rect, self.anchor) {
            return Err((rect, AttemptOutcome::OverlapsAnchor));
        }
        Ok(rect)
    }

    fn covers(&self, rect: Rect, pointer: Point) -> bool {
        let pad = self.options.pointer_padding;
        strictly_contains(rect.inflate(pad, pad), pointer)
    }

    /// Pointer-avoidance pass.
    ///
    /// Moves along the axis that best matches the anchor-centre → pointer
    /// direction, to the side of the pointer facing away from the anchor
    /// centre. Only when that side has no room does it go the other way.
    fn avoid_pointer(&self, rect: Rect, pointer: Point) -> Result<Rect, Rejection> {
        let toward = pointer - self.anchor.center();
        let pad = self.options.pointer_padding;
        let margin = self.options.margin;

        let horizontal = toward.x.abs() > toward.y.abs();
        let (p, extent, available, away_positive) = if horizontal {
            (pointer.x, self.size.width, self.viewport.width, toward.x >= 0.0)
        } else {
            (pointer.y, self.size.height, self.viewport.height, toward.y >= 0.0)
        };

        // Menu ends `pad` before the pointer, or starts `pad` after it.
        let before = p - pad - extent;
        let after = p + pad;
        let room_before = before - margin;
        let room_after = (available - margin) - (after + extent);

        if room_before < 0.0 && room_after < 0.0 {
            return Err((rect, AttemptOutcome::CoversPointer));
        }
        let away_room = if away_positive { room_after } else { room_before };
        let go_after = if away_room >= 0.0 {
            away_positive
        } else {
            !away_positive
        };
        let pos = if go_after { after } else { before };

        let origin = if horizontal {
            Point::new(pos, rect.y0)
        } else {
            Point::new(rect.x0, pos)
        };
        Ok(self.at(origin))
    }
}
