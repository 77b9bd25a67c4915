//! Scene graph: the rotating group of panels plus its lights.

use crate::constants::{
    AMBIENT_INTENSITY, KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION, RIM_LIGHT_COLOR,
    RIM_LIGHT_INTENSITY, RIM_LIGHT_POSITION,
};
use crate::error::SceneError;
use crate::panel::{FrameTransform, Panel, PanelDescriptor, PanelDraw, SlotTransform};
use glam::Vec3;
use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lights {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub points: [PointLight; 2],
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: AMBIENT_INTENSITY,
            points: [
                PointLight {
                    position: KEY_LIGHT_POSITION,
                    color: [1.0, 1.0, 1.0],
                    intensity: KEY_LIGHT_INTENSITY,
                },
                PointLight {
                    position: RIM_LIGHT_POSITION,
                    color: RIM_LIGHT_COLOR,
                    intensity: RIM_LIGHT_INTENSITY,
                },
            ],
        }
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if w >= TAU {
        0.0
    } else {
        w
    }
}

/// Angle of slot `index` when `count` slots share the ring evenly.
#[inline]
pub fn slot_angle(index: usize, count: usize) -> f32 {
    TAU * index as f32 / count.max(1) as f32
}

/// Place slot `index` on a ring of `radius`, rotated so its +Z face points
/// away from the ring centre.
pub fn slot_transform(index: usize, count: usize, radius: f32) -> SlotTransform {
    let angle = slot_angle(index, count);
    SlotTransform {
        position: Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin()),
        rotation: Vec3::new(0.0, FRAC_PI_2 - angle, 0.0),
        angle,
    }
}

pub struct SceneGraph {
    panels: Vec<Panel>,
    group_rotation_y: f32,
    panel_spin_y: f32,
    lights: Lights,
}

impl SceneGraph {
    /// Build the panel set. Descriptor order is placement order.
    pub fn new(descriptors: &[PanelDescriptor], ring_radius: f32) -> Result<Self, SceneError> {
        if descriptors.is_empty() {
            return Err(SceneError::EmptyPanelSet);
        }
        let mut seen = HashSet::with_capacity(descriptors.len());
        let count = descriptors.len();
        let mut panels = Vec::with_capacity(count);
        for (i, desc) in descriptors.iter().enumerate() {
            let panel = Panel::from_descriptor(desc, slot_transform(i, count, ring_radius), i)?;
            if !seen.insert(panel.id().to_string()) {
                return Err(SceneError::DuplicatePanelId(panel.id().to_string()));
            }
            panels.push(panel);
        }
        log::info!("[scene] built {} panels on ring r={:.2}", count, ring_radius);
        Ok(Self {
            panels,
            group_rotation_y: 0.0,
            panel_spin_y: 0.0,
            lights: Lights::default(),
        })
    }

    /// Advance the group rotation. Called once per animation frame.
    pub fn tick(&mut self, delta_angle: f32) {
        self.group_rotation_y = wrap_angle(self.group_rotation_y + delta_angle);
    }

    /// Advance every panel's spin about its own vertical axis.
    pub fn spin_panels(&mut self, delta_angle: f32) {
        self.panel_spin_y = wrap_angle(self.panel_spin_y + delta_angle);
    }

    pub fn group_rotation_y(&self) -> f32 {
        self.group_rotation_y
    }

    pub fn panel_spin_y(&self) -> f32 {
        self.panel_spin_y
    }

    pub fn frame_transform(&self) -> FrameTransform {
        FrameTransform {
            group_rotation_y: self.group_rotation_y,
            panel_spin_y: self.panel_spin_y,
        }
    }

    pub fn lights(&self) -> &Lights {
        &self.lights
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn panel_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.panels.iter().position(Panel::is_hovered)
    }

    /// Draw state for every panel in placement order.
    pub fn draws(&self) -> Vec<PanelDraw> {
        let frame = self.frame_transform();
        self.panels
            .iter()
            .enumerate()
            .map(|(i, p)| p.draw(i, &frame))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_range() {
        assert_eq!(wrap_angle(TAU), 0.0);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-6);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn four_slots_match_cardinal_points() {
        let expected = [
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(-4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
        ];
        for (i, e) in expected.iter().enumerate() {
            let slot = slot_transform(i, 4, 4.0);
            assert!((slot.position - *e).length() < 1e-5, "slot {i}");
        }
    }
}
