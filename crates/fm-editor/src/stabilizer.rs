//! Placement stabilizer: keeps a floating menu still while its anchor moves.
//!
//! Without it, a toolbar attached to a shape would jump to a new spot on every
//! intermediate frame of a drag. The stabilizer watches the anchor between
//! frames and, once it moves by more than an epsilon, freezes the last good
//! placement until the menu is attached to a different target.
//!
//! ```text
//!             anchor moved > ε, last good exists
//!   Unfrozen ─────────────────────────────────────▶ Frozen(last good)
//!      ▲                                                │
//!      └──── identity changed / hidden / free mode ─────┘
//! ```
//!
//! Free mode (the user dragged the menu) bypasses the solver entirely.

use fm_core::geometry::anchor_moved;
use fm_core::{
    AnchorRect, MenuSize, Orientation, PlacementOptions, PlacementResult, Point, TargetId,
    Viewport, compute_placement,
};
use serde::{Deserialize, Serialize};

use crate::store::MenuPlacement;

/// Everything the rendering layer measured for one menu this frame.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuFrame {
    #[serde(default)]
    pub anchor: AnchorRect,
    /// `None` until the menu element has been measured.
    #[serde(default)]
    pub size: Option<MenuSize>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub pointer: Option<Point>,
    /// Overrides the menu's configured options for this frame.
    #[serde(default)]
    pub options: Option<PlacementOptions>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Logical target the menu slot represents right now.
    #[serde(default)]
    pub identity: Option<TargetId>,
}

fn default_visible() -> bool {
    true
}

impl MenuFrame {
    pub fn new(anchor: AnchorRect, size: Option<MenuSize>, viewport: Viewport) -> Self {
        Self {
            anchor,
            size,
            viewport,
            pointer: None,
            options: None,
            visible: true,
            identity: None,
        }
    }

    /// A frame for a menu that is not shown.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::new(AnchorRect::default(), None, Viewport::default())
        }
    }

    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn with_identity(mut self, identity: TargetId) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_options(mut self, options: PlacementOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Freeze state of one menu.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Stability {
    #[default]
    Unfrozen,
    Frozen(PlacementResult),
}

/// Where a reported placement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Fresh solver output.
    Live,
    /// Held placement while the anchor is in motion.
    Frozen,
    /// Position the user dragged the menu to.
    Free,
}

/// Final placement handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilizedPlacement {
    pub position: Point,
    pub orientation: Orientation,
    pub mode: PlacementMode,
}

impl StabilizedPlacement {
    fn from_result(result: PlacementResult, mode: PlacementMode) -> Self {
        Self {
            position: result.position,
            orientation: result.orientation,
            mode,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlacementStabilizer {
    epsilon: f64,
    options: PlacementOptions,
    state: Stability,
    prev_anchor: Option<AnchorRect>,
    prev_identity: Option<TargetId>,
    /// Last live placement reported while unfrozen.
    last_good: Option<PlacementResult>,
    /// Most recent solver output, frozen or not.
    live: Option<PlacementResult>,
}

impl PlacementStabilizer {
    pub fn new(epsilon: f64, options: PlacementOptions) -> Self {
        Self {
            epsilon,
            options,
            state: Stability::Unfrozen,
            prev_anchor: None,
            prev_identity: None,
            last_good: None,
            live: None,
        }
    }

    pub fn state(&self) -> Stability {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, Stability::Frozen(_))
    }

    /// Identity seen on the last visible frame.
    pub fn identity(&self) -> Option<TargetId> {
        self.prev_identity
    }

    pub fn last_good(&self) -> Option<PlacementResult> {
        self.last_good
    }

    /// Advance one frame. Returns `None` while the menu is hidden.
    pub fn update(
        &mut self,
        frame: &MenuFrame,
        placement: MenuPlacement,
    ) -> Option<StabilizedPlacement> {
        if !frame.visible {
            self.clear();
            return None;
        }

        let identity_changed = frame.identity != self.prev_identity;
        if identity_changed {
            if self.is_frozen() {
                log::debug!(
                    "identity {:?} -> {:?}: releasing frozen placement",
                    self.prev_identity,
                    frame.identity
                );
            }
            self.state = Stability::Unfrozen;
            self.last_good = None;
            self.prev_identity = frame.identity;
        }

        if let MenuPlacement::Free(position) = placement {
            let orientation = self
                .frozen()
                .or(self.last_good)
                .or(self.live)
                .map(|p| p.orientation)
                .unwrap_or_default();
            self.state = Stability::Unfrozen;
            self.prev_anchor = Some(frame.anchor);
            return Some(StabilizedPlacement {
                position,
                orientation,
                mode: PlacementMode::Free,
            });
        }

        let moved = !identity_changed
            && self
                .prev_anchor
                .is_some_and(|prev| anchor_moved(&prev, &frame.anchor, self.epsilon));
        self.prev_anchor = Some(frame.anchor);

        let options = frame.options.unwrap_or(self.options);
        let live = compute_placement(
            &frame.anchor,
            frame.size,
            frame.viewport,
            frame.pointer,
            &options,
        );
        self.live = Some(live);

        if moved
            && !self.is_frozen()
            && let Some(good) = self.last_good
        {
            log::debug!(
                "anchor moved beyond {}: freezing at ({:.1}, {:.1})",
                self.epsilon,
                good.position.x,
                good.position.y
            );
            self.state = Stability::Frozen(good);
        }

        match self.state {
            Stability::Frozen(held) => Some(StabilizedPlacement::from_result(
                held,
                PlacementMode::Frozen,
            )),
            Stability::Unfrozen => {
                self.last_good = Some(live);
                Some(StabilizedPlacement::from_result(live, PlacementMode::Live))
            }
        }
    }

    fn frozen(&self) -> Option<PlacementResult> {
        match self.state {
            Stability::Frozen(p) => Some(p),
            Stability::Unfrozen => None,
        }
    }

    /// Forget everything; the next visible frame starts from scratch.
    fn clear(&mut self) {
        self.state = Stability::Unfrozen;
        self.prev_anchor = None;
        self.prev_identity = None;
        self.last_good = None;
        self.live = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn stabilizer() -> PlacementStabilizer {
        PlacementStabilizer::new(0.5, PlacementOptions::default())
    }

    fn frame(x: f64, y: f64) -> MenuFrame {
        MenuFrame::new(
            AnchorRect::new(x, y, 60.0, 40.0),
            Some(MenuSize::new(120.0, 36.0)),
            VIEWPORT,
        )
    }

    #[test]
    fn first_frame_is_live() {
        let mut s = stabilizer();
        let out = s.update(&frame(200.0, 200.0), MenuPlacement::Anchored).unwrap();
        assert_eq!(out.mode, PlacementMode::Live);
        assert_eq!(out.orientation, Orientation::Top);
        assert_eq!(s.last_good().map(|p| p.position), Some(out.position));
    }

    #[test]
    fn hidden_frame_clears_state() {
        let mut s = stabilizer();
        s.update(&frame(200.0, 200.0), MenuPlacement::Anchored);
        s.update(&frame(260.0, 200.0), MenuPlacement::Anchored);
        assert!(s.is_frozen());

        assert_eq!(s.update(&MenuFrame::hidden(), MenuPlacement::Anchored), None);
        assert!(!s.is_frozen());
        assert_eq!(s.last_good(), None);

        // Reappearing elsewhere does not freeze: there is no previous anchor.
        let out = s.update(&frame(400.0, 300.0), MenuPlacement::Anchored).unwrap();
        assert_eq!(out.mode, PlacementMode::Live);
    }

    #[test]
    fn free_mode_bypasses_solver_and_keeps_orientation() {
        let mut s = stabilizer();
        s.update(&frame(200.0, 10.0), MenuPlacement::Anchored);
        let out = s
            .update(
                &frame(200.0, 10.0),
                MenuPlacement::Free(Point::new(5.0, 6.0)),
            )
            .unwrap();
        assert_eq!(out.mode, PlacementMode::Free);
        assert_eq!(out.position, Point::new(5.0, 6.0));
        // Anchor near the top edge: last good placement went below it.
        assert_eq!(out.orientation, Orientation::Bottom);
    }

    #[test]
    fn free_mode_without_history_reports_top() {
        let mut s = stabilizer();
        let out = s
            .update(&frame(200.0, 10.0), MenuPlacement::Free(Point::ZERO))
            .unwrap();
        assert_eq!(out.orientation, Orientation::Top);
    }

    #[test]
    fn free_mode_releases_freeze() {
        let mut s = stabilizer();
        s.update(&frame(200.0, 200.0), MenuPlacement::Anchored);
        s.update(&frame(300.0, 200.0), MenuPlacement::Anchored);
        assert!(s.is_frozen());
        s.update(&frame(300.0, 200.0), MenuPlacement::Free(Point::ZERO));
        assert!(!s.is_frozen());
    }

    #[test]
    fn frame_json_defaults() {
        let f: MenuFrame = serde_json::from_str(
            r#"{"anchor": {"x": 10, "y": 20}, "viewport": {"width": 800, "height": 600}}"#,
        )
        .unwrap();
        assert!(f.visible);
        assert_eq!(f.size, None);
        assert_eq!(f.anchor, AnchorRect::point(10.0, 20.0));
    }
}
