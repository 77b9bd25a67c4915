//! Camera and viewport types shared with the web frontend.
//!
//! These types avoid platform-specific APIs so picking and label projection
//! can be exercised on the host. The web frontend consumes them to build the
//! view-projection uniform and to convert pointer positions into rays.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Drawable surface size in backing-store pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a pixel of the viewport.
    pub fn screen_ray(&self, px: Vec2, viewport: Viewport) -> Ray {
        let ndc_x = (2.0 * px.x / viewport.width) - 1.0;
        let ndc_y = 1.0 - (2.0 * px.y / viewport.height);
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }

    /// Project a world point to viewport pixels. `None` when the point is
    /// behind the camera.
    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 2.0,
            fovy_radians: 50f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let vp = Viewport::new(800.0, 400.0);
        let p = camera().project(Vec3::ZERO, vp).unwrap();
        assert!((p - Vec2::new(400.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn points_behind_the_eye_do_not_project() {
        let vp = Viewport::new(800.0, 400.0);
        assert!(camera().project(Vec3::new(0.0, 0.0, 20.0), vp).is_none());
    }

    #[test]
    fn screen_ray_passes_back_through_projected_point() {
        let vp = Viewport::new(800.0, 400.0);
        let cam = camera();
        let world = Vec3::new(1.5, -0.7, 2.0);
        let px = cam.project(world, vp).unwrap();
        let ray = cam.screen_ray(px, vp);
        let expected = (world - cam.eye).normalize();
        assert!(ray.dir.dot(expected) > 0.9999);
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let vp = Viewport::new(0.0, -5.0);
        assert_eq!(vp.width, 1.0);
        assert_eq!(vp.aspect(), 1.0);
    }
}
