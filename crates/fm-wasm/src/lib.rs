//! WASM bridge for FM: exposes floating-menu placement to JavaScript.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the diagram
//! editor's webview. The React layer measures anchors, menu sizes and the
//! viewport, calls `update` once per render, and wires the drag handle's
//! pointer events and arrow keys to the methods below.

use fm_core::placement::{AttemptOutcome, explain_placement};
use fm_core::{AnchorRect, EngineConfig, MenuKey, MenuSize, PlacementOptions, Point, Viewport};
use fm_editor::input::{MenuInput, NudgeDirection, PointerInput};
use fm_editor::store::FloatingMenuPlacement;
use fm_editor::{FloatingMenu, MenuFrame, MenuResponse, PlacementStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

/// The WASM-facing controller for every floating menu in one editor.
///
/// Owns the shared placement store and one `FloatingMenu` per menu key.
#[wasm_bindgen]
pub struct FmMenus {
    config: EngineConfig,
    store: PlacementStore,
    menus: HashMap<MenuKey, FloatingMenu>,
    /// Container size, used when a frame arrives without a measured viewport.
    viewport: Viewport,
}

#[wasm_bindgen]
impl FmMenus {
    /// Create the controller from a JSON config. An empty string uses the
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<FmMenus, JsValue> {
        console_error_panic_hook_setup();
        Self::from_config_json(config_json).map_err(|e| JsValue::from_str(&e))
    }

    /// Record the container size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    /// Run one render frame for `key`. Returns JSON:
    /// `{"ok":true,"placement":{"position":{x,y},"orientation":"top","mode":"live"}|null}`
    /// or `{"ok":false,"error":"..."}`.
    pub fn update(&mut self, key: &str, frame_json: &str) -> String {
        let mut frame: MenuFrame = match serde_json::from_str(frame_json) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("menu {key}: bad frame: {e}");
                return error_json(&format!("invalid frame: {e}"));
            }
        };
        if !frame.viewport.is_measured() {
            frame.viewport = self.viewport;
        }
        let key = MenuKey::intern(key);
        let config = &self.config;
        let menu = self
            .menus
            .entry(key)
            .or_insert_with(|| FloatingMenu::new(key, config));
        let placement = menu.update(&mut self.store, &frame);
        to_json(&serde_json::json!({ "ok": true, "placement": placement }))
    }

    /// Current menu position as `[x, y]`, or an empty array when hidden.
    /// Cheap path for applying the transform without JSON.
    pub fn position(&self, key: &str) -> js_sys::Float64Array {
        let coords: Vec<f64> = self
            .menus
            .get(&MenuKey::intern(key))
            .and_then(|m| m.placement())
            .map(|p| vec![p.position.x, p.position.y])
            .unwrap_or_default();
        js_sys::Float64Array::from(coords.as_slice())
    }

    /// Handle pointer down on the drag handle. Returns a response JSON:
    /// `{"changed":bool,"requestFrame":bool}`.
    pub fn pointer_down(&mut self, key: &str, pointer_id: i32, x: f64, y: f64) -> String {
        let input = MenuInput::PointerDown(PointerInput::new(pointer_id, x, y));
        self.dispatch(key, input)
    }

    /// Handle pointer move. When `requestFrame` is true, call
    /// `on_animation_frame` from the next `requestAnimationFrame`.
    pub fn pointer_move(&mut self, key: &str, pointer_id: i32, x: f64, y: f64) -> String {
        let input = MenuInput::PointerMove(PointerInput::new(pointer_id, x, y));
        self.dispatch(key, input)
    }

    pub fn pointer_up(&mut self, key: &str, pointer_id: i32, x: f64, y: f64) -> String {
        let input = MenuInput::PointerUp(PointerInput::new(pointer_id, x, y));
        self.dispatch(key, input)
    }

    pub fn pointer_cancel(&mut self, key: &str, pointer_id: i32, x: f64, y: f64) -> String {
        let input = MenuInput::PointerCancel(PointerInput::new(pointer_id, x, y));
        self.dispatch(key, input)
    }

    /// Handle a keyboard event on the focused menu. Arrow keys nudge; Shift
    /// selects the large step. Other keys are ignored.
    pub fn handle_key(&mut self, key: &str, key_name: &str, shift: bool) -> String {
        match NudgeDirection::from_key(key_name) {
            Some(direction) => self.dispatch(
                key,
                MenuInput::Nudge {
                    direction,
                    large: shift,
                },
            ),
            None => to_json(&MenuResponse::default()),
        }
    }

    /// Put the menu back next to its anchor.
    pub fn reset(&mut self, key: &str) -> String {
        self.dispatch(key, MenuInput::ResetToAnchor)
    }

    /// Animation-frame callback: commit coalesced drag moves for every menu.
    /// Returns `true` if any placement changed.
    pub fn on_animation_frame(&mut self) -> bool {
        let mut changed = false;
        for menu in self.menus.values_mut() {
            changed |= menu.on_frame(&mut self.store);
        }
        changed
    }

    /// Stored placement for `key` as `{"isFree":bool,"position":{x,y}|null}`.
    pub fn placement_state(&self, key: &str) -> String {
        let state = FloatingMenuPlacement::from(self.store.get(MenuKey::intern(key)));
        to_json(&state)
    }
}

impl FmMenus {
    fn from_config_json(config_json: &str) -> Result<Self, String> {
        let config = if config_json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(config_json)?
        };
        Ok(Self {
            config,
            store: PlacementStore::new(),
            menus: HashMap::new(),
            viewport: Viewport::default(),
        })
    }

    fn dispatch(&mut self, key: &str, input: MenuInput) -> String {
        let response = match self.menus.get_mut(&MenuKey::intern(key)) {
            Some(menu) => menu.handle(&mut self.store, input),
            None => MenuResponse::default(),
        };
        to_json(&response)
    }
}

// ─── Standalone solver (no controller needed) ────────────────────────────

/// Input of [`compute_placement_json`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveRequest {
    anchor: AnchorRect,
    #[serde(default)]
    size: Option<MenuSize>,
    #[serde(default)]
    viewport: Viewport,
    #[serde(default)]
    pointer: Option<Point>,
    #[serde(default)]
    options: PlacementOptions,
}

#[derive(Debug, Serialize)]
struct AttemptJson {
    orientation: &'static str,
    outcome: &'static str,
}

/// Run the solver once. Returns JSON
/// `{"ok":true,"placement":{...},"fellBack":bool,"attempts":[...]}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn compute_placement_json(input: &str) -> String {
    let req: SolveRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return error_json(&format!("invalid request: {e}")),
    };
    if let Err(e) = req.options.validate() {
        return error_json(&format!("invalid options: {e}"));
    }
    let report = explain_placement(
        &req.anchor,
        req.size,
        req.viewport,
        req.pointer,
        &req.options,
    );
    let attempts: Vec<AttemptJson> = report
        .attempts
        .iter()
        .map(|a| AttemptJson {
            orientation: a.orientation.as_str(),
            outcome: outcome_name(a.outcome),
        })
        .collect();
    to_json(&serde_json::json!({
        "ok": true,
        "placement": report.result,
        "fellBack": report.fell_back,
        "attempts": attempts,
    }))
}

fn outcome_name(outcome: AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::Placed => "placed",
        AttemptOutcome::OutOfViewport => "outOfViewport",
        AttemptOutcome::OverlapsAnchor => "overlapsAnchor",
        AttemptOutcome::CoversPointer => "coversPointer",
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| error_json(&format!("Serialization error: {e}")))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("FM WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
