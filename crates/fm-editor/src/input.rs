//! Input abstraction for floating-menu interaction.
//!
//! The rendering layer translates DOM pointer and keyboard events into
//! `MenuInput` values consumed by the menu controller.

use fm_core::{Point, Vec2};

/// A pointer sample from any device, tagged with its pointer id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// `PointerEvent.pointerId`. Only one id may drag a menu at a time.
    pub pointer_id: i32,
    pub x: f64,
    pub y: f64,
}

impl PointerInput {
    pub const fn new(pointer_id: i32, x: f64, y: f64) -> Self {
        Self { pointer_id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Arrow-key nudge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    /// Map a `KeyboardEvent.key` value. Returns `None` for non-arrow keys.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn delta(self, step: f64) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -step),
            Self::Down => Vec2::new(0.0, step),
            Self::Left => Vec2::new(-step, 0.0),
            Self::Right => Vec2::new(step, 0.0),
        }
    }
}

/// A normalized interaction with one floating menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuInput {
    /// Pointer pressed on the menu's drag handle.
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    /// Browser cancelled the pointer (touch interrupted, capture lost).
    PointerCancel(PointerInput),
    Nudge {
        direction: NudgeDirection,
        /// Shift held: move by the large step.
        large: bool,
    },
    /// Snap the menu back to its anchor.
    ResetToAnchor,
}
