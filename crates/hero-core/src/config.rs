//! Runtime configuration for one carousel mount.
//!
//! Every field has a default, so the host may pass a partial JSON object (or
//! nothing at all) to get the stock four-category hero scene.

use crate::constants::*;
use crate::error::SceneError;
use crate::panel::PanelDescriptor;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    pub initial_distance: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub zoom_damping: f32,
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            initial_distance: INITIAL_DISTANCE,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            rotate_sensitivity: ROTATE_SENSITIVITY,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            zoom_damping: ZOOM_DAMPING_PER_SEC,
            fov_degrees: FOV_Y_DEGREES,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        let finite = [
            self.min_distance,
            self.max_distance,
            self.initial_distance,
            self.auto_rotate_speed,
            self.rotate_sensitivity,
            self.zoom_sensitivity,
            self.zoom_damping,
            self.fov_degrees,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SceneError::InvalidCamera("non-finite parameter".into()));
        }
        if self.min_distance <= 0.0 {
            return Err(SceneError::InvalidCamera(format!(
                "minDistance must be positive, got {}",
                self.min_distance
            )));
        }
        if self.min_distance > self.max_distance {
            return Err(SceneError::InvalidCamera(format!(
                "minDistance {} exceeds maxDistance {}",
                self.min_distance, self.max_distance
            )));
        }
        if self.zoom_damping <= 0.0 {
            return Err(SceneError::InvalidCamera(format!(
                "zoomDamping must be positive, got {}",
                self.zoom_damping
            )));
        }
        if !(1.0..179.0).contains(&self.fov_degrees) {
            return Err(SceneError::InvalidCamera(format!(
                "fovDegrees out of range: {}",
                self.fov_degrees
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub ring_radius: f32,
    /// Group rotation in radians per second.
    pub group_rate: f32,
    /// Per-panel spin in radians per second.
    pub panel_spin_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ring_radius: RING_RADIUS,
            group_rate: GROUP_RATE_PER_SEC,
            panel_spin_rate: PANEL_SPIN_RATE_PER_SEC,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    pub panels: Vec<PanelDescriptor>,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            panels: default_panels(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl CarouselConfig {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::Config(e.to_string()))
    }

    pub fn with_panels(panels: Vec<PanelDescriptor>) -> Self {
        Self {
            panels,
            ..Self::default()
        }
    }
}

/// The four training categories shown on the landing page.
pub fn default_panels() -> Vec<PanelDescriptor> {
    vec![
        PanelDescriptor::new(
            "ethical-hacking",
            "Ethical Hacking",
            "Master the art of ethical penetration testing",
            "#00FFFF",
        ),
        PanelDescriptor::new(
            "pentesting",
            "PenTesting",
            "Real-world vulnerability assessment",
            "#00FF00",
        ),
        PanelDescriptor::new(
            "cloud-security",
            "Cloud Security",
            "Secure AWS, Azure, and GCP environments",
            "#6600FF",
        ),
        PanelDescriptor::new(
            "digital-forensics",
            "Digital Forensics",
            "Investigate cybercrimes and recover evidence",
            "#FF0099",
        ),
    ]
}
