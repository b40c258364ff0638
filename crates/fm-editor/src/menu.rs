//! Per-menu controller.
//!
//! `FloatingMenu` is what the rendering layer talks to for one menu slot. It
//! owns the stabilizer and drag session for that slot and applies the
//! lifecycle rules of the shared [`PlacementStore`]: the slot's entry goes
//! back to automatic placement whenever the menu hides or is attached to a
//! different target.

use fm_core::{EngineConfig, MenuKey, MenuSize, PlacementOptions};
use serde::Serialize;

use crate::drag::{DragGeometry, MenuDrag};
use crate::input::MenuInput;
use crate::stabilizer::{MenuFrame, PlacementStabilizer, StabilizedPlacement};
use crate::store::{MenuPlacement, PlacementStore};

/// What an input did, for the host's render scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    /// The store changed: re-run `update` and repaint.
    pub changed: bool,
    /// Request an animation frame and call `on_frame` from it.
    pub request_frame: bool,
}

impl MenuResponse {
    const NONE: MenuResponse = MenuResponse {
        changed: false,
        request_frame: false,
    };

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            request_frame: false,
        }
    }
}

pub struct FloatingMenu {
    key: MenuKey,
    options: PlacementOptions,
    nudge_step: f64,
    nudge_step_large: f64,
    stabilizer: PlacementStabilizer,
    drag: MenuDrag,
    /// Visible on the previous `update`.
    visible: bool,
    last: Option<StabilizedPlacement>,
    geometry: Option<DragGeometry>,
}

impl FloatingMenu {
    pub fn new(key: MenuKey, config: &EngineConfig) -> Self {
        let options = config.options_for(key);
        Self {
            key,
            options,
            nudge_step: config.nudge_step,
            nudge_step_large: config.nudge_step_large,
            stabilizer: PlacementStabilizer::new(config.freeze_epsilon, options),
            drag: MenuDrag::new(),
            visible: false,
            last: None,
            geometry: None,
        }
    }

    pub fn key(&self) -> MenuKey {
        self.key
    }

    /// Placement reported by the last `update`.
    pub fn placement(&self) -> Option<StabilizedPlacement> {
        self.last
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn stabilizer(&self) -> &PlacementStabilizer {
        &self.stabilizer
    }

    /// Run one render frame for this menu.
    pub fn update(
        &mut self,
        store: &mut PlacementStore,
        frame: &MenuFrame,
    ) -> Option<StabilizedPlacement> {
        if !frame.visible {
            if self.visible {
                log::debug!("menu {}: hidden", self.key);
            }
            store.reset(self.key);
            self.drag.release();
            self.visible = false;
            self.last = None;
            self.geometry = None;
            return self.stabilizer.update(frame, MenuPlacement::Anchored);
        }

        if self.visible && frame.identity != self.stabilizer.identity() {
            log::debug!(
                "menu {}: target changed to {:?}",
                self.key,
                frame.identity
            );
            store.reset(self.key);
            self.drag.release();
        }
        self.visible = true;

        let placement = *store.entry(self.key);
        let out = self.stabilizer.update(frame, placement);
        let margin = frame.options.unwrap_or(self.options).margin;
        self.geometry = out.map(|p| DragGeometry {
            origin: p.position,
            size: frame.size.unwrap_or(MenuSize::ZERO),
            viewport: frame.viewport,
            margin,
        });
        self.last = out;
        out
    }

    /// Handle pointer, keyboard, and reset input. Inputs arriving before
    /// the first visible frame are ignored.
    pub fn handle(&mut self, store: &mut PlacementStore, input: MenuInput) -> MenuResponse {
        if let MenuInput::ResetToAnchor = input {
            return MenuResponse::changed(self.drag.reset_to_anchor(store, self.key));
        }
        let Some(geometry) = self.geometry else {
            return MenuResponse::NONE;
        };

        match input {
            MenuInput::PointerDown(p) => {
                self.drag.pointer_down(p, &geometry);
                MenuResponse::NONE
            }
            MenuInput::PointerMove(p) => MenuResponse {
                changed: false,
                request_frame: self.drag.pointer_move(p, &geometry),
            },
            MenuInput::PointerUp(p) => {
                MenuResponse::changed(self.drag.pointer_up(p, store, self.key))
            }
            MenuInput::PointerCancel(p) => {
                self.drag.pointer_cancel(p);
                MenuResponse::NONE
            }
            MenuInput::Nudge { direction, large } => {
                let step = if large {
                    self.nudge_step_large
                } else {
                    self.nudge_step
                };
                MenuResponse::changed(
                    self.drag
                        .nudge(direction, step, &geometry, store, self.key),
                )
            }
            MenuInput::ResetToAnchor => MenuResponse::NONE,
        }
    }

    /// Animation-frame callback. Returns `true` if the store changed.
    pub fn on_frame(&mut self, store: &mut PlacementStore) -> bool {
        self.drag.on_frame(store, self.key)
    }
}
