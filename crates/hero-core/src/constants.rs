use glam::Vec3;

// Shared scene/camera tuning constants used by the core and the web frontend.
// Rates that the hero scene historically applied per 60 Hz frame are stored
// here per second so the clock can scale them by elapsed time.

// Scene layout
pub const RING_RADIUS: f32 = 4.0; // distance of each panel slot from the group origin
pub const GROUP_RATE_PER_SEC: f32 = 0.3; // 0.005 rad per frame
pub const PANEL_SPIN_RATE_PER_SEC: f32 = 0.6; // 0.01 rad per frame, about each panel's own Y

// Panel geometry (width, height, depth) and text anchors in panel-local space
pub const PANEL_SIZE: [f32; 3] = [2.0, 3.0, 0.2];
pub const LABEL_OFFSET: [f32; 3] = [0.0, 0.5, 0.15];
pub const SUBTITLE_OFFSET: [f32; 3] = [0.0, -0.5, 0.15];

// Hover-driven visuals
pub const IDLE_SCALE: f32 = 1.0;
pub const HOVER_SCALE: f32 = 1.1;
pub const IDLE_OPACITY: f32 = 0.6;
pub const HOVER_OPACITY: f32 = 0.8;
pub const IDLE_EMISSIVE: f32 = 0.1;
pub const HOVER_EMISSIVE: f32 = 0.3;

// Orbit camera
pub const MIN_DISTANCE: f32 = 8.0;
pub const MAX_DISTANCE: f32 = 15.0;
pub const INITIAL_DISTANCE: f32 = 10.0; // camera starts at (0, 0, 10)
pub const FOV_Y_DEGREES: f32 = 50.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.5; // one orbit per 60 s at speed 1.0
pub const ROTATE_SENSITIVITY: f32 = 0.008; // radians per pixel of drag
pub const ZOOM_SENSITIVITY: f32 = 0.001; // log-radius per wheel delta unit
pub const ZOOM_DAMPING_PER_SEC: f32 = 10.0; // radius easing toward its target
pub const POLAR_EPSILON: f32 = 1e-3; // keeps the camera off the poles

// Clock
pub const MAX_FRAME_STEP_SEC: f32 = 0.1; // longest step a single tick may apply

// Interaction
pub const CLICK_SLOP_PX: f32 = 4.0; // pointer travel beyond this turns a press into a drag

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.2;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const KEY_LIGHT_INTENSITY: f32 = 1.0;
pub const RIM_LIGHT_POSITION: Vec3 = Vec3::new(-10.0, -10.0, -10.0);
pub const RIM_LIGHT_INTENSITY: f32 = 0.5;
pub const RIM_LIGHT_COLOR: [f32; 3] = [0.0, 1.0, 1.0]; // #00FFFF

#[inline]
pub fn panel_half_extents() -> Vec3 {
    Vec3::from(PANEL_SIZE) * 0.5
}
