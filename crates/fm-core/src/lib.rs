pub mod config;
pub mod geometry;
pub mod id;
pub mod options;
pub mod placement;

pub use config::EngineConfig;
pub use geometry::{AnchorRect, MenuSize, Viewport};
pub use id::{MenuKey, TargetId};
pub use options::PlacementOptions;
pub use placement::{Orientation, PlacementResult, compute_placement, explain_placement};

// Re-export kurbo types so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Size, Vec2};
