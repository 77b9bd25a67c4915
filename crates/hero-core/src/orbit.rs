//! Orbit camera controller.
//!
//! The camera lives on a sphere around the scene origin, parameterised by
//! azimuth (around +Y, 0 looking down -Z from +Z), polar angle (from +Y) and
//! radius. The pose is rebuilt from those three values every frame.
//!
//! Two states: `Idle` auto-rotates, `Dragging` follows the pointer. A press
//! alone does not start a drag; the first movement while pressed does.

use crate::config::CameraConfig;
use crate::constants::{POLAR_EPSILON, Z_FAR, Z_NEAR};
use crate::scene::wrap_angle;
use crate::state::Camera;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitState {
    Idle,
    Dragging,
}

pub struct OrbitController {
    azimuth: f32,
    polar: f32,
    radius: f32,
    target_radius: f32,
    state: OrbitState,
    // last pointer position while a button is held
    pressed_at: Option<Vec2>,
    params: CameraConfig,
}

impl OrbitController {
    pub fn new(params: CameraConfig) -> Self {
        let radius = params
            .initial_distance
            .max(params.min_distance)
            .min(params.max_distance);
        Self {
            azimuth: 0.0,
            polar: FRAC_PI_2,
            radius,
            target_radius: radius,
            state: OrbitState::Idle,
            pressed_at: None,
            params,
        }
    }

    pub fn state(&self) -> OrbitState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == OrbitState::Dragging
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target_radius(&self) -> f32 {
        self.target_radius
    }

    pub fn params(&self) -> &CameraConfig {
        &self.params
    }

    #[inline]
    pub fn clamp_radius(&self, r: f32) -> f32 {
        // max/min rather than clamp: unvalidated bounds must not panic
        r.max(self.params.min_distance).min(self.params.max_distance)
    }

    #[inline]
    pub fn clamp_polar(p: f32) -> f32 {
        p.clamp(POLAR_EPSILON, PI - POLAR_EPSILON)
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pressed_at = Some(pos);
    }

    /// Returns true when the move rotated the camera.
    pub fn pointer_move(&mut self, pos: Vec2) -> bool {
        let Some(last) = self.pressed_at else {
            return false;
        };
        let delta = pos - last;
        self.pressed_at = Some(pos);
        if delta == Vec2::ZERO {
            return false;
        }
        if self.state == OrbitState::Idle {
            log::debug!("[orbit] drag start");
            self.state = OrbitState::Dragging;
        }
        self.rotate_by_pixels(delta);
        true
    }

    pub fn pointer_up(&mut self) {
        self.release();
    }

    pub fn pointer_cancel(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.state == OrbitState::Dragging {
            log::debug!("[orbit] drag end");
        }
        self.pressed_at = None;
        self.state = OrbitState::Idle;
    }

    /// Grab-style rotation: dragging right swings the camera to the left of
    /// the scene (azimuth decreases), dragging down lowers the polar angle.
    pub fn rotate_by_pixels(&mut self, delta: Vec2) {
        let s = self.params.rotate_sensitivity;
        self.azimuth = wrap_angle(self.azimuth - delta.x * s);
        self.polar = Self::clamp_polar(self.polar - delta.y * s);
    }

    /// Wheel input. Positive `delta_y` (scrolling down) moves the camera out.
    pub fn zoom_wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.zoom_by_factor((delta_y * self.params.zoom_sensitivity).exp());
    }

    /// Multiply the target radius, e.g. by the inverse pinch ratio.
    pub fn zoom_by_factor(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.target_radius = self.clamp_radius(self.target_radius * factor);
    }

    /// Per-frame update: idle auto-rotation and radius easing.
    pub fn update(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        if self.state == OrbitState::Idle && self.params.auto_rotate {
            self.azimuth = wrap_angle(self.azimuth + self.idle_rate() * dt);
        }
        let alpha = 1.0 - (-self.params.zoom_damping.max(0.0) * dt).exp();
        let eased = self.radius + (self.target_radius - self.radius) * alpha;
        self.radius = self.clamp_radius(eased);
    }

    /// Idle azimuth rate in radians per second.
    pub fn idle_rate(&self) -> f32 {
        TAU / 60.0 * self.params.auto_rotate_speed.max(0.0)
    }

    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * sp * sa,
            self.radius * cp,
            self.radius * sp * ca,
        )
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: self.params.fov_degrees.to_radians(),
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_positive_z() {
        let orbit = OrbitController::new(CameraConfig::default());
        let eye = orbit.eye();
        assert!((eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn press_without_move_stays_idle() {
        let mut orbit = OrbitController::new(CameraConfig::default());
        orbit.pointer_down(Vec2::new(10.0, 10.0));
        assert!(!orbit.pointer_move(Vec2::new(10.0, 10.0)));
        assert_eq!(orbit.state(), OrbitState::Idle);
    }

    #[test]
    fn polar_never_reaches_poles() {
        let mut orbit = OrbitController::new(CameraConfig::default());
        orbit.rotate_by_pixels(Vec2::new(0.0, 1.0e6));
        assert!(orbit.polar() >= POLAR_EPSILON);
        orbit.rotate_by_pixels(Vec2::new(0.0, -1.0e6));
        assert!(orbit.polar() <= PI - POLAR_EPSILON);
    }
}
