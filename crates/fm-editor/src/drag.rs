//! Manual repositioning of a floating menu.
//!
//! Pointer-down on the menu's handle captures one pointer id. Moves compute
//! the new top-left corner (keeping the grab offset), clamp it to the viewport
//! margins and hand it to a [`FrameCoalescer`] so the store is written at most
//! once per animation frame. Pointer-up flushes whatever is pending; pointer
//! cancel drops it.
//!
//! Arrow-key nudges and reset-to-anchor write the store directly.

use fm_core::geometry::clamp_to_viewport;
use fm_core::{MenuKey, MenuSize, Point, Vec2, Viewport};

use crate::coalesce::FrameCoalescer;
use crate::input::{NudgeDirection, PointerInput};
use crate::store::PlacementStore;

/// Where the menu is drawn right now and the box it must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGeometry {
    /// Current top-left corner of the menu as displayed.
    pub origin: Point,
    pub size: MenuSize,
    pub viewport: Viewport,
    pub margin: f64,
}

impl DragGeometry {
    /// Clamp a prospective origin to the viewport margins. An unmeasured
    /// viewport leaves it untouched.
    pub fn clamp(&self, origin: Point) -> Point {
        if !self.viewport.is_measured() {
            return origin;
        }
        clamp_to_viewport(origin, self.size.to_size(), self.viewport, self.margin).0
    }
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    pointer_id: i32,
    /// Pointer position minus menu origin at pointer-down.
    grab: Vec2,
}

/// Drag session for one menu.
#[derive(Debug, Clone, Default)]
pub struct MenuDrag {
    capture: Option<Capture>,
    pending: FrameCoalescer<Point>,
}

impl MenuDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    /// Pointer id currently captured, if any.
    pub fn captured_pointer(&self) -> Option<i32> {
        self.capture.map(|c| c.pointer_id)
    }

    /// Begin a drag. Returns `false` if another pointer already owns it.
    pub fn pointer_down(&mut self, input: PointerInput, geometry: &DragGeometry) -> bool {
        if let Some(capture) = self.capture {
            if capture.pointer_id != input.pointer_id {
                log::debug!(
                    "pointer {} ignored: drag owned by pointer {}",
                    input.pointer_id,
                    capture.pointer_id
                );
            }
            return false;
        }
        self.capture = Some(Capture {
            pointer_id: input.pointer_id,
            grab: input.position() - geometry.origin,
        });
        true
    }

    /// Track a move. Returns `true` when the caller must request a frame tick.
    pub fn pointer_move(&mut self, input: PointerInput, geometry: &DragGeometry) -> bool {
        let Some(capture) = self.owned_by(input.pointer_id) else {
            return false;
        };
        let target = geometry.clamp(input.position() - capture.grab);
        self.pending.schedule(target)
    }

    /// Frame tick: commit the coalesced position. Returns `true` if the store
    /// changed.
    pub fn on_frame(&mut self, store: &mut PlacementStore, key: MenuKey) -> bool {
        match self.pending.on_tick() {
            Some(position) => {
                store.set_free(key, position);
                true
            }
            None => false,
        }
    }

    /// End the drag, committing any pending position immediately.
    pub fn pointer_up(
        &mut self,
        input: PointerInput,
        store: &mut PlacementStore,
        key: MenuKey,
    ) -> bool {
        if self.owned_by(input.pointer_id).is_none() {
            return false;
        }
        self.capture = None;
        match self.pending.flush_now() {
            Some(position) => {
                store.set_free(key, position);
                true
            }
            None => false,
        }
    }

    /// Abort the drag without committing further movement.
    pub fn pointer_cancel(&mut self, input: PointerInput) -> bool {
        if self.owned_by(input.pointer_id).is_none() {
            return false;
        }
        self.release();
        true
    }

    /// Move by one arrow-key step from the current origin. Ignored mid-drag.
    pub fn nudge(
        &mut self,
        direction: NudgeDirection,
        step: f64,
        geometry: &DragGeometry,
        store: &mut PlacementStore,
        key: MenuKey,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let target = geometry.clamp(geometry.origin + direction.delta(step));
        store.set_free(key, target);
        true
    }

    /// Drop capture and anything pending.
    pub fn release(&mut self) {
        self.capture = None;
        self.pending.cancel();
    }

    /// Snap the menu back to automatic placement.
    pub fn reset_to_anchor(&mut self, store: &mut PlacementStore, key: MenuKey) -> bool {
        self.release();
        let was_free = store.is_free(key);
        store.reset(key);
        was_free
    }

    fn owned_by(&self, pointer_id: i32) -> Option<Capture> {
        self.capture.filter(|c| c.pointer_id == pointer_id)
    }
}
