//! One mounted hero scene: scene graph, orbit camera and pointer routing
//! behind a single owner, with an explicit disposed state.
//!
//! The web frontend holds a `Carousel` for as long as the hero view is
//! visible. Once [`Carousel::dispose`] has run, ticks and pointer input are
//! no-ops, so a late animation frame or event cannot touch torn-down state.

use crate::config::{CarouselConfig, SceneConfig};
use crate::error::SceneError;
use crate::orbit::OrbitController;
use crate::panel::{PanelDraw, SelectionSink};
use crate::pick::pick_panel;
use crate::router::{ClickTracker, HoverTracker, InteractionRouter, PanelEvent, Routed};
use crate::scene::{Lights, SceneGraph};
use crate::state::{Camera, Viewport};
use glam::Vec2;
use std::time::Duration;

/// Everything needed to present one frame.
#[derive(Clone, Debug)]
pub struct FrameState {
    pub camera: Camera,
    pub panels: Vec<PanelDraw>,
    pub lights: Lights,
}

pub struct Carousel {
    scene: SceneGraph,
    orbit: OrbitController,
    router: InteractionRouter,
    hover: HoverTracker,
    click: ClickTracker,
    rates: SceneConfig,
    disposed: bool,
}

impl Carousel {
    pub fn new(config: &CarouselConfig) -> Result<Self, SceneError> {
        config.camera.validate()?;
        let rates = config.scene.clone();
        if !(rates.ring_radius.is_finite() && rates.ring_radius > 0.0) {
            return Err(SceneError::Config(format!(
                "ringRadius must be positive, got {}",
                rates.ring_radius
            )));
        }
        if !(rates.group_rate.is_finite() && rates.panel_spin_rate.is_finite()) {
            return Err(SceneError::Config("non-finite rotation rate".into()));
        }
        let scene = SceneGraph::new(&config.panels, rates.ring_radius)?;
        let router = InteractionRouter::new(&scene);
        Ok(Self {
            scene,
            orbit: OrbitController::new(config.camera.clone()),
            router,
            hover: HoverTracker::default(),
            click: ClickTracker::default(),
            rates,
            disposed: false,
        })
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Stop accepting ticks and input. Idempotent.
    pub fn dispose(&mut self) {
        if !self.disposed {
            log::info!("[scene] disposed");
        }
        self.disposed = true;
        self.click.cancel();
    }

    /// Advance one animation frame. Returns false once disposed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.disposed {
            return false;
        }
        let dt_sec = dt.as_secs_f32();
        self.scene.tick(self.rates.group_rate * dt_sec);
        self.scene.spin_panels(self.rates.panel_spin_rate * dt_sec);
        self.orbit.update(dt_sec);
        true
    }

    pub fn frame(&self, viewport: Viewport) -> Option<FrameState> {
        if self.disposed {
            return None;
        }
        Some(FrameState {
            camera: self.orbit.camera(viewport.aspect()),
            panels: self.scene.draws(),
            lights: self.scene.lights().clone(),
        })
    }

    /// Index of the nearest panel under a viewport pixel.
    pub fn pick(&self, pos: Vec2, viewport: Viewport) -> Option<usize> {
        let camera = self.orbit.camera(viewport.aspect());
        let ray = camera.screen_ray(pos, viewport);
        pick_panel(ray, &self.scene.draws())
    }

    fn hit_id(&self, pos: Vec2, viewport: Viewport) -> Option<String> {
        self.pick(pos, viewport)
            .and_then(|i| self.scene.panel(i))
            .map(|p| p.id().to_string())
    }

    pub fn dispatch(&mut self, event: &PanelEvent, sink: &mut dyn SelectionSink) -> Routed {
        if self.disposed {
            return Routed::Ignored;
        }
        let routed = self.router.dispatch(&mut self.scene, event, sink);
        if routed == Routed::Applied {
            let lit = self
                .scene
                .hovered_index()
                .and_then(|i| self.scene.panel(i))
                .map(|p| p.id().to_string());
            self.hover.sync(lit.as_deref());
        }
        routed
    }

    fn dispatch_hover(&mut self, events: &[PanelEvent]) {
        let mut no_selection = |_: &str| {};
        for ev in events {
            self.router.dispatch(&mut self.scene, ev, &mut no_selection);
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2, viewport: Viewport) {
        if self.disposed {
            return;
        }
        let hit = self.hit_id(pos, viewport);
        self.click.press(hit.as_deref(), pos);
        self.orbit.pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.click.moved(pos);
        self.orbit.pointer_move(pos);
        let hit = self.hit_id(pos, viewport);
        let events = self.hover.update(hit.as_deref());
        self.dispatch_hover(&events);
    }

    pub fn pointer_up(&mut self, pos: Vec2, viewport: Viewport, sink: &mut dyn SelectionSink) {
        if self.disposed {
            return;
        }
        self.orbit.pointer_up();
        let hit = self.hit_id(pos, viewport);
        if let Some(ev) = self.click.release(hit.as_deref(), pos) {
            self.router.dispatch(&mut self.scene, &ev, sink);
        }
    }

    pub fn pointer_cancel(&mut self) {
        if self.disposed {
            return;
        }
        self.orbit.pointer_cancel();
        self.click.cancel();
    }

    pub fn pointer_leave(&mut self) {
        if self.disposed {
            return;
        }
        let events = self.hover.clear();
        self.dispatch_hover(&events);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if self.disposed {
            return;
        }
        self.orbit.zoom_wheel(delta_y);
    }

    /// Pinch gesture: `ratio` is current finger distance over previous.
    pub fn pinch(&mut self, ratio: f32) {
        if self.disposed || !(ratio.is_finite() && ratio > 0.0) {
            return;
        }
        self.orbit.zoom_by_factor(1.0 / ratio);
    }
}
