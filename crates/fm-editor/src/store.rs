//! Keyed store of per-menu placement state.
//!
//! One `PlacementStore` is owned by the host context and passed by `&mut` to
//! every menu controller and drag handler. Each menu key maps to either
//! automatic placement (`Anchored`) or a position the user dragged it to
//! (`Free`). Entries are created on first use and reset when the menu hides
//! or switches target.

use fm_core::{MenuKey, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placement state of one menu.
///
/// `Free` always carries its position, and while it is set the solver is not
/// consulted at all.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "FloatingMenuPlacement", try_from = "FloatingMenuPlacement")]
pub enum MenuPlacement {
    #[default]
    Anchored,
    Free(Point),
}

impl MenuPlacement {
    pub fn is_free(&self) -> bool {
        matches!(self, MenuPlacement::Free(_))
    }

    pub fn free_position(&self) -> Option<Point> {
        match self {
            MenuPlacement::Free(p) => Some(*p),
            MenuPlacement::Anchored => None,
        }
    }
}

/// Wire form of [`MenuPlacement`]: `{"isFree": bool, "position": {x, y} | null}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingMenuPlacement {
    pub is_free: bool,
    pub position: Option<Point>,
}

impl From<MenuPlacement> for FloatingMenuPlacement {
    fn from(placement: MenuPlacement) -> Self {
        Self {
            is_free: placement.is_free(),
            position: placement.free_position(),
        }
    }
}

impl TryFrom<FloatingMenuPlacement> for MenuPlacement {
    type Error = String;

    fn try_from(wire: FloatingMenuPlacement) -> Result<Self, Self::Error> {
        match (wire.is_free, wire.position) {
            (true, Some(p)) => Ok(MenuPlacement::Free(p)),
            (true, None) => Err("free placement requires a position".to_string()),
            (false, None) => Ok(MenuPlacement::Anchored),
            (false, Some(_)) => Err("anchored placement must not carry a position".to_string()),
        }
    }
}

/// Map from menu key to placement state.
#[derive(Debug, Clone, Default)]
pub struct PlacementStore {
    entries: HashMap<MenuKey, MenuPlacement>,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current placement for `key`; `Anchored` if the menu was never seen.
    pub fn get(&self, key: MenuKey) -> MenuPlacement {
        self.entries.get(&key).copied().unwrap_or_default()
    }

    /// Placement for `key`, creating the default entry on first use.
    pub fn entry(&mut self, key: MenuKey) -> &mut MenuPlacement {
        self.entries.entry(key).or_default()
    }

    pub fn set_free(&mut self, key: MenuKey, position: Point) {
        *self.entry(key) = MenuPlacement::Free(position);
    }

    /// Return `key` to automatic placement.
    pub fn reset(&mut self, key: MenuKey) {
        if let Some(placement) = self.entries.get_mut(&key)
            && placement.is_free()
        {
            log::debug!("menu {key}: placement reset to anchored");
            *placement = MenuPlacement::Anchored;
        }
    }

    pub fn is_free(&self, key: MenuKey) -> bool {
        self.get(key).is_free()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MenuKey, MenuPlacement)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}
