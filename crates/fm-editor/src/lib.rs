//! Interaction layer for floating menus: the keyed placement store, the
//! placement stabilizer, and drag / nudge handling, glued together per menu
//! by [`menu::FloatingMenu`].

pub mod coalesce;
pub mod drag;
pub mod input;
pub mod menu;
pub mod stabilizer;
pub mod store;

pub use menu::{FloatingMenu, MenuResponse};
pub use stabilizer::{MenuFrame, PlacementMode, PlacementStabilizer, StabilizedPlacement};
pub use store::{MenuPlacement, PlacementStore};
