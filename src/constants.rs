/// Web front-end tuning: DOM hooks, label styling and renderer limits.
///
/// Scene and camera constants live in `hero_core::constants`; these only
/// concern how the scene is presented in a browser page.
// Canvas auto-mounted by the start entry when present
pub const DEFAULT_CANVAS_ID: &str = "hero-canvas";

// Label overlay
pub const LABEL_LAYER_CLASS: &str = "hero-labels";
pub const LABEL_CLASS: &str = "hero-label";
pub const TITLE_COLOR: &str = "#00FFFF";
pub const SUBTITLE_COLOR: &str = "#FFFFFF";
pub const LABEL_FONT: &str = "600 1em system-ui, sans-serif";
pub const TITLE_WORLD_HEIGHT: f32 = 0.3; // world units, scaled by perspective
pub const SUBTITLE_WORLD_HEIGHT: f32 = 0.15;
pub const SUBTITLE_WORLD_WIDTH: f32 = 1.8; // wrap width, inside the 2.0-wide panel
pub const LABEL_MIN_FONT_PX: f32 = 6.0;

// Wheel deltas reported in lines or pages are converted to pixels
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Renderer
pub const INITIAL_INSTANCE_CAPACITY: usize = 16;
pub const EDGE_GLOW_WIDTH: f32 = 0.06; // local units from a face edge
pub const EDGE_GLOW_GAIN: f32 = 0.6;
pub const SPECULAR_POWER: f32 = 32.0;
