//! Per-menu placement tuning.

use serde::{Deserialize, Serialize};

/// Spacing rules for one menu type.
///
/// Every field is optional on input; missing ones take the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementOptions {
    /// Distance between the anchor and the menu. Default: **10**.
    pub gap: f64,
    /// Minimum distance from every viewport edge. Default: **12**.
    pub margin: f64,
    /// Padding added around the pointer when testing whether the menu
    /// covers it. Default: **12**.
    pub pointer_padding: f64,
}

impl PlacementOptions {
    pub const DEFAULT_GAP: f64 = 10.0;
    pub const DEFAULT_MARGIN: f64 = 12.0;
    pub const DEFAULT_POINTER_PADDING: f64 = 12.0;

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_pointer_padding(mut self, padding: f64) -> Self {
        self.pointer_padding = padding;
        self
    }

    /// Reject negative or non-finite values.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("gap", self.gap),
            ("margin", self.margin),
            ("pointerPadding", self.pointer_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            gap: Self::DEFAULT_GAP,
            margin: Self::DEFAULT_MARGIN,
            pointer_padding: Self::DEFAULT_POINTER_PADDING,
        }
    }
}
