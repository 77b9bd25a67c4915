// Host-side integration tests for routing, picking and teardown of a mounted
// carousel.

use glam::Vec2;
use hero_core::*;
use rand::prelude::*;
use std::time::Duration;

const VIEWPORT: Viewport = Viewport {
    width: 1600.0,
    height: 900.0,
};

fn centre() -> Vec2 {
    Vec2::new(VIEWPORT.width * 0.5, VIEWPORT.height * 0.5)
}

fn make_carousel(ids: &[&str]) -> Carousel {
    let panels = ids
        .iter()
        .map(|id| PanelDescriptor::new(id, id, "", "#00FF00"))
        .collect();
    Carousel::new(&CarouselConfig::with_panels(panels)).unwrap()
}

fn hovered(c: &Carousel) -> Vec<bool> {
    c.scene().panels().iter().map(Panel::is_hovered).collect()
}

#[test]
fn activation_calls_back_once_without_touching_hover() {
    let mut carousel = make_carousel(&["a", "b", "c", "d"]);
    let mut selected = Vec::new();
    let mut sink = |id: &str| selected.push(id.to_string());
    carousel.dispatch(&PanelEvent::Enter("a".into()), &mut sink);
    let before = hovered(&carousel);

    let routed = carousel.dispatch(&PanelEvent::Activate("c".into()), &mut sink);

    assert_eq!(routed, Routed::Applied);
    assert_eq!(hovered(&carousel), before);
    drop(sink);
    assert_eq!(selected, vec!["c".to_string()]);
}

#[test]
fn at_most_one_panel_is_hovered_under_random_events() {
    let ids = ["a", "b", "c", "d"];
    let mut carousel = make_carousel(&ids);
    let mut sink = |_: &str| {};
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5000 {
        let id = ids[rng.gen_range(0..ids.len())].to_string();
        let ev = match rng.gen_range(0..3) {
            0 => PanelEvent::Leave(id),
            1 => PanelEvent::Activate(id),
            _ => PanelEvent::Enter(id),
        };
        carousel.dispatch(&ev, &mut sink);
        let lit = hovered(&carousel).iter().filter(|h| **h).count();
        assert!(lit <= 1, "{lit} panels hovered after {ev:?}");
    }
}

#[test]
fn enter_without_leave_moves_the_hover() {
    let mut carousel = make_carousel(&["a", "b", "c"]);
    let mut sink = |_: &str| {};
    carousel.dispatch(&PanelEvent::Enter("a".into()), &mut sink);
    carousel.dispatch(&PanelEvent::Enter("c".into()), &mut sink);
    assert_eq!(hovered(&carousel), vec![false, false, true]);
    carousel.dispatch(&PanelEvent::Leave("c".into()), &mut sink);
    assert_eq!(hovered(&carousel), vec![false, false, false]);
}

#[test]
fn events_for_unknown_panels_are_ignored() {
    let mut carousel = make_carousel(&["a", "b"]);
    let mut calls = 0;
    let mut sink = |_: &str| calls += 1;
    assert_eq!(
        carousel.dispatch(&PanelEvent::Enter("zzz".into()), &mut sink),
        Routed::Ignored
    );
    assert_eq!(
        carousel.dispatch(&PanelEvent::Activate("zzz".into()), &mut sink),
        Routed::Ignored
    );
    drop(sink);
    assert_eq!(calls, 0);
    assert_eq!(hovered(&carousel), vec![false, false]);
}

#[test]
fn centre_ray_picks_the_panel_facing_the_camera() {
    let carousel = make_carousel(&["east", "south", "west", "north"]);
    // slot 1 sits at +Z, between the initial camera and the origin
    assert_eq!(carousel.pick(centre(), VIEWPORT), Some(1));
    assert_eq!(carousel.pick(Vec2::ZERO, VIEWPORT), None);
}

#[test]
fn pointer_motion_drives_hover() {
    let mut carousel = make_carousel(&["east", "south", "west", "north"]);
    carousel.pointer_move(centre(), VIEWPORT);
    assert_eq!(carousel.scene().hovered_index(), Some(1));
    carousel.pointer_move(Vec2::new(5.0, 5.0), VIEWPORT);
    assert_eq!(carousel.scene().hovered_index(), None);
    carousel.pointer_move(centre(), VIEWPORT);
    carousel.pointer_leave();
    assert_eq!(carousel.scene().hovered_index(), None);
}

#[test]
fn host_dispatched_hover_is_cleared_by_pointer_motion() {
    let mut carousel = make_carousel(&["east", "south", "west", "north"]);
    let mut sink = |_: &str| {};
    carousel.pointer_move(centre(), VIEWPORT);
    assert_eq!(carousel.scene().hovered_index(), Some(1));
    carousel.dispatch(&PanelEvent::Enter("east".into()), &mut sink);
    assert_eq!(carousel.scene().hovered_index(), Some(0));
    carousel.pointer_move(Vec2::new(5.0, 5.0), VIEWPORT);
    assert_eq!(carousel.scene().hovered_index(), None);

    carousel.dispatch(&PanelEvent::Enter("west".into()), &mut sink);
    carousel.pointer_leave();
    assert_eq!(carousel.scene().hovered_index(), None);

    // a host leave followed by motion back onto the same panel lights it again
    carousel.pointer_move(centre(), VIEWPORT);
    carousel.dispatch(&PanelEvent::Leave("south".into()), &mut sink);
    carousel.pointer_move(centre(), VIEWPORT);
    assert_eq!(carousel.scene().hovered_index(), Some(1));
}

#[test]
fn click_on_panel_selects_it() {
    let mut carousel = make_carousel(&["east", "south", "west", "north"]);
    let mut selected = Vec::new();
    let mut sink = |id: &str| selected.push(id.to_string());
    carousel.pointer_down(centre(), VIEWPORT);
    carousel.pointer_up(centre(), VIEWPORT, &mut sink);
    drop(sink);
    assert_eq!(selected, vec!["south".to_string()]);
}

#[test]
fn drag_across_panel_orbits_instead_of_selecting() {
    let mut carousel = make_carousel(&["east", "south", "west", "north"]);
    let mut selected = Vec::new();
    let mut sink = |id: &str| selected.push(id.to_string());
    let azimuth = carousel.orbit().azimuth();
    carousel.pointer_down(centre(), VIEWPORT);
    carousel.pointer_move(centre() + Vec2::new(30.0, 0.0), VIEWPORT);
    assert!(carousel.orbit().is_dragging());
    carousel.pointer_move(centre(), VIEWPORT);
    carousel.pointer_up(centre(), VIEWPORT, &mut sink);
    drop(sink);
    assert!(selected.is_empty());
    assert!(!carousel.orbit().is_dragging());
    // out and back again: net rotation is zero
    let d = (carousel.orbit().azimuth() - azimuth).rem_euclid(std::f32::consts::TAU);
    assert!(d < 1e-5 || std::f32::consts::TAU - d < 1e-5, "net drift {d}");
}

#[test]
fn tick_advances_group_spin_and_camera() {
    let mut carousel = make_carousel(&["a", "b"]);
    let eye = carousel.orbit().eye();
    assert!(carousel.tick(Duration::from_millis(500)));
    let scene = carousel.scene();
    assert!((scene.group_rotation_y() - GROUP_RATE_PER_SEC * 0.5).abs() < 1e-5);
    assert!((scene.panel_spin_y() - PANEL_SPIN_RATE_PER_SEC * 0.5).abs() < 1e-5);
    assert_ne!(carousel.orbit().eye(), eye);
}

#[test]
fn pinch_apart_zooms_in() {
    let mut carousel = make_carousel(&["a"]);
    carousel.pinch(1.25);
    assert!(carousel.orbit().target_radius() < INITIAL_DISTANCE);
    carousel.pinch(f32::NAN);
    carousel.pinch(0.0);
    assert!(carousel.orbit().target_radius() >= MIN_DISTANCE);
}

#[test]
fn nothing_changes_after_dispose() {
    let mut carousel = make_carousel(&["a", "b", "c", "d"]);
    carousel.tick(Duration::from_millis(16));
    carousel.pointer_move(centre(), VIEWPORT);
    carousel.tick(Duration::from_millis(16));
    carousel.dispose();

    let snapshot = (
        carousel.scene().group_rotation_y(),
        carousel.scene().panel_spin_y(),
        hovered(&carousel),
        carousel.orbit().eye(),
    );
    let mut calls = 0;
    let mut sink = |_: &str| calls += 1;
    for _ in 0..10 {
        assert!(!carousel.tick(Duration::from_millis(16)));
        carousel.pointer_move(Vec2::ZERO, VIEWPORT);
        carousel.pointer_down(centre(), VIEWPORT);
        carousel.pointer_up(centre(), VIEWPORT, &mut sink);
        carousel.wheel(500.0);
        carousel.pointer_leave();
        carousel.dispatch(&PanelEvent::Enter("d".into()), &mut sink);
    }
    drop(sink);

    assert_eq!(calls, 0);
    assert!(carousel.frame(VIEWPORT).is_none());
    assert_eq!(
        (
            carousel.scene().group_rotation_y(),
            carousel.scene().panel_spin_y(),
            hovered(&carousel),
            carousel.orbit().eye(),
        ),
        snapshot
    );
}

#[test]
fn clock_steps_are_clamped() {
    let mut clock = AnimationClock::new(Duration::from_millis(100));
    let t0 = instant::Instant::now();
    assert_eq!(clock.step(t0), Duration::ZERO);
    assert_eq!(
        clock.step(t0 + Duration::from_millis(16)),
        Duration::from_millis(16)
    );
    assert_eq!(
        clock.step(t0 + Duration::from_secs(10)),
        Duration::from_millis(100)
    );
    clock.reset();
    assert_eq!(clock.step(t0 + Duration::from_secs(11)), Duration::ZERO);
}
