// Host-side tests for pure pointer-gesture functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn buttons_map_to_drag_modes() {
    assert_eq!(drag_mode_for(0, false, false, false), Some(DragMode::Rotate));
    assert_eq!(drag_mode_for(0, true, false, false), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(0, false, true, false), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(0, false, false, true), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(2, false, false, false), Some(DragMode::Pan));
    // middle button would dolly, and zoom is off
    assert_eq!(drag_mode_for(1, false, false, false), None);
    assert_eq!(drag_mode_for(3, false, false, false), None);
}

#[test]
fn moves_report_deltas_between_samples() {
    let mut p = PointerState::default();
    assert_eq!(p.move_to(1, Vec2::new(5.0, 5.0)), None);

    p.begin(1, 0, Vec2::new(10.0, 10.0), DragMode::Rotate);
    assert_eq!(
        p.move_to(1, Vec2::new(15.0, 8.0)),
        Some((DragMode::Rotate, Vec2::new(5.0, -2.0)))
    );
    assert_eq!(
        p.move_to(1, Vec2::new(15.0, 20.0)),
        Some((DragMode::Rotate, Vec2::new(0.0, 12.0)))
    );
    assert_eq!(p.down_at, Vec2::new(10.0, 10.0));
}

#[test]
fn other_pointers_are_ignored() {
    let mut p = PointerState::default();
    p.begin(7, 2, Vec2::ZERO, DragMode::Pan);
    assert_eq!(p.move_to(8, Vec2::new(50.0, 0.0)), None);
    assert_eq!(p.end(8, Vec2::new(50.0, 0.0)), None);
    assert_eq!(p.active, Some(DragMode::Pan));
}

#[test]
fn release_ends_the_drag_once() {
    let mut p = PointerState::default();
    p.begin(1, 0, Vec2::new(100.0, 100.0), DragMode::Rotate);
    let release = p.end(1, Vec2::new(101.0, 102.0)).unwrap();
    assert_eq!(release.mode, DragMode::Rotate);
    assert_eq!(release.down_at, Vec2::new(100.0, 100.0));
    assert!(release.is_primary_click());
    assert_eq!(p.active, None);
    assert_eq!(p.end(1, Vec2::new(101.0, 102.0)), None);
    assert_eq!(p.move_to(1, Vec2::new(120.0, 100.0)), None);
}

#[test]
fn drags_and_secondary_presses_are_not_clicks() {
    let mut p = PointerState::default();
    p.begin(1, 0, Vec2::ZERO, DragMode::Rotate);
    assert!(!p.end(1, Vec2::new(4.0, 0.0)).unwrap().is_primary_click());

    p.begin(1, 2, Vec2::ZERO, DragMode::Pan);
    assert!(!p.end(1, Vec2::ZERO).unwrap().is_primary_click());

    // modifier pans still count as clicks when they stay put
    p.begin(1, 0, Vec2::ZERO, DragMode::Pan);
    assert!(p.end(1, Vec2::new(0.0, 3.0)).unwrap().is_primary_click());
}
