// Host-side integration tests for panel placement, visuals and construction.

use hero_core::*;
use std::f32::consts::{PI, TAU};

fn descriptors(ids: &[&str]) -> Vec<PanelDescriptor> {
    ids.iter()
        .map(|id| PanelDescriptor::new(id, &id.to_uppercase(), "", "#00FFFF"))
        .collect()
}

#[test]
fn slot_angles_are_evenly_spaced() {
    for n in 1..=12usize {
        let ids: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let scene = SceneGraph::new(&descriptors(&refs), RING_RADIUS).unwrap();
        for (i, panel) in scene.panels().iter().enumerate() {
            let expected = i as f32 * TAU / n as f32;
            assert!(
                (panel.slot().angle - expected).abs() < 1e-5,
                "n={n} i={i} angle={}",
                panel.slot().angle
            );
            let pos = panel.slot().position;
            let measured = wrap_angle(pos.z.atan2(pos.x));
            let diff = (measured - wrap_angle(expected)).abs();
            assert!(diff < 1e-4 || (TAU - diff) < 1e-4, "n={n} i={i}");
            assert!((pos.length() - RING_RADIUS).abs() < 1e-4);
        }
    }
}

#[test]
fn panels_face_outward() {
    let scene = SceneGraph::new(&descriptors(&["a", "b", "c", "d", "e"]), 4.0).unwrap();
    for draw in scene.draws() {
        let slot = scene.panel(draw.index).unwrap().slot();
        let outward = slot.position.normalize();
        assert!(
            draw.facing.dot(outward) > 0.999,
            "panel {} faces {:?}",
            draw.index,
            draw.facing
        );
    }
}

#[test]
fn derived_visuals_follow_hover_exactly() {
    let mut scene = SceneGraph::new(&descriptors(&["a"]), 4.0).unwrap();
    let idle = PanelVisuals {
        scale: 1.0,
        opacity: 0.6,
        emissive_intensity: 0.1,
    };
    let hot = PanelVisuals {
        scale: 1.1,
        opacity: 0.8,
        emissive_intensity: 0.3,
    };
    assert_eq!(scene.panel(0).unwrap().visuals(), idle);
    for _ in 0..3 {
        let panel = scene.panel_mut(0).unwrap();
        panel.set_hovered(true);
        assert_eq!(panel.visuals(), hot);
        panel.set_hovered(false);
        assert_eq!(panel.visuals(), idle);
    }
}

#[test]
fn set_hovered_is_idempotent() {
    let mut scene = SceneGraph::new(&descriptors(&["a"]), 4.0).unwrap();
    let panel = scene.panel_mut(0).unwrap();
    assert!(panel.set_hovered(true));
    assert!(!panel.set_hovered(true));
    assert!(panel.is_hovered());
}

#[test]
fn draw_applies_hover_scale_but_not_to_text_anchors() {
    let mut scene = SceneGraph::new(&descriptors(&["a"]), 4.0).unwrap();
    let before = scene.draws().remove(0);
    scene.panel_mut(0).unwrap().set_hovered(true);
    let after = scene.draws().remove(0);
    let sx_before = before.model.x_axis.truncate().length();
    let sx_after = after.model.x_axis.truncate().length();
    assert!((sx_before - 1.0).abs() < 1e-5);
    assert!((sx_after - 1.1).abs() < 1e-5);
    assert_eq!(before.label_anchor, after.label_anchor);
    assert_eq!(after.opacity, 0.8);
    assert_eq!(after.emissive_intensity, 0.3);
}

#[test]
fn tick_accumulates_and_wraps_group_rotation() {
    let mut scene = SceneGraph::new(&descriptors(&["a", "b"]), 4.0).unwrap();
    scene.tick(1.0);
    scene.tick(0.5);
    assert!((scene.group_rotation_y() - 1.5).abs() < 1e-6);
    for _ in 0..10 {
        scene.tick(PI);
    }
    assert!(scene.group_rotation_y() >= 0.0 && scene.group_rotation_y() < TAU);
    assert!((scene.group_rotation_y() - 1.5).abs() < 1e-4);
}

#[test]
fn group_rotation_moves_panels_but_not_slots() {
    let mut scene = SceneGraph::new(&descriptors(&["a", "b", "c", "d"]), 4.0).unwrap();
    let slot_before = *scene.panel(0).unwrap().slot();
    scene.tick(PI / 2.0);
    let draw = scene.draws().remove(0);
    let centre = draw.model.w_axis.truncate();
    // rotating +X by a quarter turn about Y lands on -Z
    assert!((centre - glam::Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
    assert_eq!(*scene.panel(0).unwrap().slot(), slot_before);
}

#[test]
fn empty_panel_set_is_rejected() {
    assert_eq!(
        SceneGraph::new(&[], 4.0).err(),
        Some(SceneError::EmptyPanelSet)
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = SceneGraph::new(&descriptors(&["a", "b", "a"]), 4.0).err();
    assert_eq!(err, Some(SceneError::DuplicatePanelId("a".into())));
}

#[test]
fn bad_accent_color_is_rejected() {
    let descs = vec![PanelDescriptor::new("a", "A", "", "cyan")];
    assert!(matches!(
        SceneGraph::new(&descs, 4.0),
        Err(SceneError::InvalidColor { .. })
    ));
}

#[test]
fn default_config_has_four_categories() {
    let config = CarouselConfig::default();
    let ids: Vec<&str> = config.panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "ethical-hacking",
            "pentesting",
            "cloud-security",
            "digital-forensics"
        ]
    );
    assert!(Carousel::new(&config).is_ok());
}

#[test]
fn json_config_fills_missing_fields_with_defaults() {
    let config = CarouselConfig::from_json(
        r##"{"panels":[{"id":"x","label":"X","accentColor":"#f00"}],"camera":{"maxDistance":20}}"##,
    )
    .unwrap();
    assert_eq!(config.panels.len(), 1);
    assert_eq!(config.panels[0].subtitle, "");
    assert_eq!(config.camera.max_distance, 20.0);
    assert_eq!(config.camera.min_distance, MIN_DISTANCE);
    assert_eq!(config.scene, SceneConfig::default());
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        CarouselConfig::from_json("{\"panels\": 3}"),
        Err(SceneError::Config(_))
    ));
}

#[test]
fn inverted_camera_bounds_are_rejected() {
    let mut config = CarouselConfig::default();
    config.camera.min_distance = 20.0;
    assert!(matches!(
        Carousel::new(&config),
        Err(SceneError::InvalidCamera(_))
    ));
    config.camera.min_distance = 0.0;
    assert!(matches!(
        Carousel::new(&config),
        Err(SceneError::InvalidCamera(_))
    ));
}

#[test]
fn non_positive_zoom_damping_is_rejected() {
    for damping in [0.0, -3.0] {
        let mut config = CarouselConfig::default();
        config.camera.zoom_damping = damping;
        assert!(matches!(
            config.camera.validate(),
            Err(SceneError::InvalidCamera(_))
        ));
        assert!(matches!(
            Carousel::new(&config),
            Err(SceneError::InvalidCamera(_))
        ));
    }
    assert!(CameraConfig::default().validate().is_ok());
}

#[test]
fn panel_shader_exposes_pipeline_entry_points() {
    assert!(PANEL_WGSL.contains("fn vs_panel"));
    assert!(PANEL_WGSL.contains("fn fs_panel"));
    assert!(PANEL_WGSL.contains("array<Light, 2>"));
}
