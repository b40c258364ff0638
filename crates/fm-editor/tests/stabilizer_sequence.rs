//! Integration tests: stabilizer freeze / release across frame sequences.
//!
//! Drives `PlacementStabilizer` with the anchor sequences a selection drag
//! produces and checks which placement the rendering layer would see.

use fm_core::{
    AnchorRect, MenuSize, PlacementOptions, Point, TargetId, Viewport, compute_placement,
};
use fm_editor::stabilizer::{MenuFrame, PlacementMode, PlacementStabilizer};
use fm_editor::store::MenuPlacement;
use pretty_assertions::assert_eq;

const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);
const SIZE: MenuSize = MenuSize::new(120.0, 36.0);

fn anchor(x: f64, y: f64) -> AnchorRect {
    AnchorRect::new(x, y, 60.0, 40.0)
}

fn frame(a: AnchorRect, identity: &str) -> MenuFrame {
    MenuFrame::new(a, Some(SIZE), VIEWPORT).with_identity(TargetId::intern(identity))
}

fn stabilizer() -> PlacementStabilizer {
    PlacementStabilizer::new(0.5, PlacementOptions::default())
}

// ─── Freeze ─────────────────────────────────────────────────────────────

#[test]
fn jitter_stays_live_and_jump_freezes() {
    let mut s = stabilizer();
    let a1 = anchor(200.0, 200.0);
    let a2 = anchor(200.3, 200.0);
    let a3 = anchor(240.0, 200.0);

    let p1 = s.update(&frame(a1, "edge_1"), MenuPlacement::Anchored).unwrap();
    assert_eq!(p1.mode, PlacementMode::Live);

    let p2 = s.update(&frame(a2, "edge_1"), MenuPlacement::Anchored).unwrap();
    assert_eq!(p2.mode, PlacementMode::Live);
    assert!((p2.position.x - p1.position.x).abs() < 0.5);

    let p3 = s.update(&frame(a3, "edge_1"), MenuPlacement::Anchored).unwrap();
    assert_eq!(p3.mode, PlacementMode::Frozen);
    assert_eq!(p3.position, p2.position);
    assert!((p3.position.x - p1.position.x).abs() < 0.5);
}

#[test]
fn freeze_holds_through_further_motion() {
    let mut s = stabilizer();
    let start = s
        .update(&frame(anchor(200.0, 200.0), "n"), MenuPlacement::Anchored)
        .unwrap();
    for step in 1..20 {
        let a = anchor(200.0 + step as f64 * 7.0, 200.0 + step as f64 * 3.0);
        let p = s.update(&frame(a, "n"), MenuPlacement::Anchored).unwrap();
        assert_eq!(p.mode, PlacementMode::Frozen);
        assert_eq!(p.position, start.position);
    }
    // Settling does not release the freeze: only a new target does.
    let settled = anchor(200.0 + 19.0 * 7.0, 200.0 + 19.0 * 3.0);
    let p = s.update(&frame(settled, "n"), MenuPlacement::Anchored).unwrap();
    assert_eq!(p.mode, PlacementMode::Frozen);
}

#[test]
fn resize_counts_as_motion() {
    let mut s = stabilizer();
    s.update(&frame(anchor(200.0, 200.0), "n"), MenuPlacement::Anchored);
    let grown = AnchorRect::new(200.0, 200.0, 90.0, 40.0);
    let p = s.update(&frame(grown, "n"), MenuPlacement::Anchored).unwrap();
    assert_eq!(p.mode, PlacementMode::Frozen);
}

// ─── Identity reset ─────────────────────────────────────────────────────

#[test]
fn identity_change_recomputes_with_identical_anchor() {
    let mut s = stabilizer();
    let moved = anchor(380.0, 260.0);
    s.update(&frame(anchor(200.0, 200.0), "edge_1"), MenuPlacement::Anchored);
    let frozen = s.update(&frame(moved, "edge_1"), MenuPlacement::Anchored).unwrap();
    assert_eq!(frozen.mode, PlacementMode::Frozen);

    let fresh = s.update(&frame(moved, "edge_2"), MenuPlacement::Anchored).unwrap();
    assert_eq!(fresh.mode, PlacementMode::Live);
    let expected = compute_placement(
        &moved,
        Some(SIZE),
        VIEWPORT,
        None,
        &PlacementOptions::default(),
    );
    assert_eq!(fresh.position, expected.position);
    assert_eq!(fresh.orientation, expected.orientation);
    assert!(!s.is_frozen());
}

#[test]
fn identity_change_with_moved_anchor_does_not_freeze() {
    let mut s = stabilizer();
    s.update(&frame(anchor(100.0, 100.0), "shape_a"), MenuPlacement::Anchored);
    let p = s
        .update(&frame(anchor(500.0, 400.0), "shape_b"), MenuPlacement::Anchored)
        .unwrap();
    assert_eq!(p.mode, PlacementMode::Live);
}

// ─── Free mode ──────────────────────────────────────────────────────────

#[test]
fn free_mode_reports_frozen_orientation() {
    let mut s = stabilizer();
    // Near the top edge the live placement goes below the anchor.
    s.update(&frame(anchor(300.0, 10.0), "n"), MenuPlacement::Anchored);
    s.update(&frame(anchor(340.0, 10.0), "n"), MenuPlacement::Anchored);
    assert!(s.is_frozen());

    let free = s
        .update(
            &frame(anchor(340.0, 10.0), "n"),
            MenuPlacement::Free(Point::new(50.0, 400.0)),
        )
        .unwrap();
    assert_eq!(free.mode, PlacementMode::Free);
    assert_eq!(free.position, Point::new(50.0, 400.0));
    assert_eq!(free.orientation, fm_core::Orientation::Bottom);
    assert!(!s.is_frozen());
}
