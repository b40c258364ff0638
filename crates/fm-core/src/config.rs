//! Engine configuration: per-menu options plus stabilizer and nudge tuning.
//!
//! Loaded once by the host (usually from a JSON blob shipped with the
//! webview) and shared read-only by every menu controller.

use crate::id::MenuKey;
use crate::options::PlacementOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for the floating-menu engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Options used for menu keys without an entry in `menus`.
    pub defaults: PlacementOptions,

    /// Static options per menu type, keyed by menu key string.
    pub menus: HashMap<String, PlacementOptions>,

    /// Anchor movement (in pixels) that counts as "moved" for the
    /// stabilizer. Default: **0.5**.
    pub freeze_epsilon: f64,

    /// Keyboard nudge distance. Default: **1**.
    pub nudge_step: f64,

    /// Keyboard nudge distance with the large modifier held. Default: **10**.
    pub nudge_step_large: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defaults: PlacementOptions::default(),
            menus: HashMap::new(),
            freeze_epsilon: 0.5,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns the `serde_json` message for malformed input, or a description
    /// of the first negative / non-finite number.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: EngineConfig =
            serde_json::from_str(text).map_err(|e| format!("invalid config: {e}"))?;
        config.validate()?;
        log::debug!(
            "loaded engine config: {} menu profile(s), epsilon {}",
            config.menus.len(),
            config.freeze_epsilon
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.defaults.validate()?;
        for (key, opts) in &self.menus {
            opts.validate().map_err(|e| format!("menus.{key}: {e}"))?;
        }
        for (name, value) in [
            ("freezeEpsilon", self.freeze_epsilon),
            ("nudgeStep", self.nudge_step),
            ("nudgeStepLarge", self.nudge_step_large),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }

    /// Options for `key`, falling back to `defaults`.
    pub fn options_for(&self, key: MenuKey) -> PlacementOptions {
        self.menus
            .get(key.as_str())
            .copied()
            .unwrap_or(self.defaults)
    }

    /// Register options for one menu type.
    pub fn with_menu(mut self, key: &str, options: PlacementOptions) -> Self {
        self.menus.insert(key.to_string(), options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn menu_profiles_override_defaults() {
        let config = EngineConfig::from_json(
            r#"{"menus": {"connector-toolbar": {"gap": 6, "margin": 8}}, "nudgeStep": 2}"#,
        )
        .unwrap();
        let opts = config.options_for(MenuKey::intern("connector-toolbar"));
        assert_eq!(opts.gap, 6.0);
        assert_eq!(opts.margin, 8.0);
        assert_eq!(opts.pointer_padding, 12.0);
        assert_eq!(config.nudge_step, 2.0);

        let other = config.options_for(MenuKey::intern("shape-toolbar"));
        assert_eq!(other, PlacementOptions::default());
    }

    #[test]
    fn malformed_json_reports_error() {
        let err = EngineConfig::from_json("{ nope").unwrap_err();
        assert!(err.starts_with("invalid config"), "got {err}");
    }

    #[test]
    fn negative_epsilon_rejected() {
        let err = EngineConfig::from_json(r#"{"freezeEpsilon": -1}"#).unwrap_err();
        assert!(err.contains("freezeEpsilon"), "got {err}");
    }

    #[test]
    fn bad_menu_profile_names_its_key() {
        let err = EngineConfig::from_json(r#"{"menus": {"x": {"gap": -3}}}"#).unwrap_err();
        assert!(err.starts_with("menus.x"), "got {err}");
    }
}
