//! Panel model: static identity, fixed slot placement and hover state.
//!
//! Visual parameters (scale, opacity, emissive intensity) are never stored on
//! the panel; they are recomputed from `hovered` whenever a frame is drawn.

use crate::constants::{
    HOVER_EMISSIVE, HOVER_OPACITY, HOVER_SCALE, IDLE_EMISSIVE, IDLE_OPACITY, IDLE_SCALE,
    LABEL_OFFSET, SUBTITLE_OFFSET,
};
use crate::error::SceneError;
use glam::{Mat4, Vec3};
use serde::Deserialize;

/// Linear RGB color in the \[0, 1\] range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |v: u8| v as f32 / 255.0;
        match hex.len() {
            6 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::new(
                    channel((v >> 16) as u8),
                    channel((v >> 8) as u8),
                    channel(v as u8),
                ))
            }
            3 => {
                let v = u16::from_str_radix(hex, 16).ok()?;
                let expand = |n: u16| channel(((n & 0xF) * 17) as u8);
                Some(Self::new(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            _ => None,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// CSS `#rrggbb` form, used by the DOM label overlay.
    pub fn to_css(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }
}

/// Host-supplied description of one panel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub subtitle: String,
    pub accent_color: String,
}

impl PanelDescriptor {
    pub fn new(id: &str, label: &str, subtitle: &str, accent_color: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            subtitle: subtitle.to_string(),
            accent_color: accent_color.to_string(),
        }
    }
}

/// Fixed placement of a panel inside the rotating group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotTransform {
    pub position: Vec3,
    /// Euler angles in radians; slots only ever use the Y component.
    pub rotation: Vec3,
    /// Angular position on the ring, measured from +X toward +Z.
    pub angle: f32,
}

impl SlotTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_z(self.rotation.z)
    }
}

/// Per-frame visual parameters derived from the hover flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelVisuals {
    pub scale: f32,
    pub opacity: f32,
    pub emissive_intensity: f32,
}

impl PanelVisuals {
    pub const fn for_hover(hovered: bool) -> Self {
        if hovered {
            Self {
                scale: HOVER_SCALE,
                opacity: HOVER_OPACITY,
                emissive_intensity: HOVER_EMISSIVE,
            }
        } else {
            Self {
                scale: IDLE_SCALE,
                opacity: IDLE_OPACITY,
                emissive_intensity: IDLE_EMISSIVE,
            }
        }
    }
}

/// Scene-level rotation state a panel is composed with when drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTransform {
    pub group_rotation_y: f32,
    pub panel_spin_y: f32,
}

/// Everything the renderer and label overlay need for one panel in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelDraw {
    pub index: usize,
    pub model: Mat4,
    pub color: [f32; 3],
    pub opacity: f32,
    pub emissive_intensity: f32,
    pub hovered: bool,
    pub label_anchor: Vec3,
    pub subtitle_anchor: Vec3,
    /// World-space outward normal of the slot (ignores the mesh spin).
    pub facing: Vec3,
}

/// Receives panel activations. The host decides what selection means.
pub trait SelectionSink {
    fn panel_selected(&mut self, id: &str);
}

impl<F: FnMut(&str)> SelectionSink for F {
    fn panel_selected(&mut self, id: &str) {
        self(id)
    }
}

#[derive(Clone, Debug)]
pub struct Panel {
    id: String,
    label: String,
    subtitle: String,
    accent: Rgb,
    slot: SlotTransform,
    hovered: bool,
}

impl Panel {
    pub fn from_descriptor(
        desc: &PanelDescriptor,
        slot: SlotTransform,
        slot_index: usize,
    ) -> Result<Self, SceneError> {
        if desc.id.trim().is_empty() {
            return Err(SceneError::EmptyPanelId(slot_index));
        }
        let accent = Rgb::parse_hex(&desc.accent_color).ok_or_else(|| SceneError::InvalidColor {
            id: desc.id.clone(),
            color: desc.accent_color.clone(),
        })?;
        Ok(Self {
            id: desc.id.clone(),
            label: desc.label.clone(),
            subtitle: desc.subtitle.clone(),
            accent,
            slot,
            hovered: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn accent(&self) -> Rgb {
        self.accent
    }

    pub fn slot(&self) -> &SlotTransform {
        &self.slot
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Returns whether the flag actually changed.
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    pub fn visuals(&self) -> PanelVisuals {
        PanelVisuals::for_hover(self.hovered)
    }

    /// Forward an activation to the selection sink. Hover is left untouched.
    pub fn activate(&self, sink: &mut dyn SelectionSink) {
        sink.panel_selected(&self.id);
    }

    pub fn draw(&self, index: usize, frame: &FrameTransform) -> PanelDraw {
        let visuals = self.visuals();
        let anchor = Mat4::from_rotation_y(frame.group_rotation_y) * self.slot.matrix();
        let model = anchor
            * Mat4::from_rotation_y(frame.panel_spin_y)
            * Mat4::from_scale(Vec3::splat(visuals.scale));
        PanelDraw {
            index,
            model,
            color: self.accent.to_array(),
            opacity: visuals.opacity,
            emissive_intensity: visuals.emissive_intensity,
            hovered: self.hovered,
            label_anchor: anchor.transform_point3(Vec3::from(LABEL_OFFSET)),
            subtitle_anchor: anchor.transform_point3(Vec3::from(SUBTITLE_OFFSET)),
            facing: anchor.transform_vector3(Vec3::Z).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::parse_hex("#00FFFF"), Some(Rgb::new(0.0, 1.0, 1.0)));
        assert_eq!(Rgb::parse_hex("f09"), Some(Rgb::new(1.0, 0.0, 0.6)));
        assert_eq!(Rgb::parse_hex("#12345"), None);
        assert_eq!(Rgb::parse_hex("#GG0000"), None);
    }

    #[test]
    fn css_round_trips_hex() {
        let c = Rgb::parse_hex("#6600FF").unwrap();
        assert_eq!(c.to_css(), "#6600ff");
    }

    #[test]
    fn empty_id_is_rejected() {
        let desc = PanelDescriptor::new("  ", "x", "", "#fff");
        let slot = SlotTransform {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angle: 0.0,
        };
        assert_eq!(
            Panel::from_descriptor(&desc, slot, 2).unwrap_err(),
            SceneError::EmptyPanelId(2)
        );
    }
}
