use crate::overlay::LabelOverlay;
use crate::render;
use hero_core::{AnimationClock, Carousel, Viewport};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub carousel: Rc<RefCell<Carousel>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub overlay: LabelOverlay,
    pub clock: AnimationClock,
}

#[inline]
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    Viewport::new(canvas.width() as f32, canvas.height() as f32)
}

impl<'a> FrameContext<'a> {
    /// Advance the scene by the elapsed time and present it.
    /// Returns false once the carousel has been disposed.
    pub fn frame(&mut self) -> bool {
        let dt = self.clock.step(Instant::now());
        let viewport = canvas_viewport(&self.canvas);
        let state = {
            let mut carousel = self.carousel.borrow_mut();
            if !carousel.tick(dt) {
                return false;
            }
            match carousel.frame(viewport) {
                Some(s) => s,
                None => return false,
            }
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&state) {
                log::error!("[gpu] render error: {:?}", e);
            }
        }
        self.overlay.update(&state, &self.canvas, viewport);
        true
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owned handle to a running animation-frame loop. Dropping it without
/// calling [`LoopHandle::stop`] leaves the loop running.
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    tick: TickClosure,
}

impl LoopHandle {
    /// Cancel the pending frame. Returns the loop closure so the caller can
    /// free it once no callback can be on the stack.
    pub fn stop(self) -> Option<Closure<dyn FnMut()>> {
        self.running.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        log::info!("[loop] stopped");
        self.tick.borrow_mut().take()
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("[loop] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let running = Rc::new(Cell::new(true));

    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    let running_tick = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id_tick.set(None);
        if !running_tick.get() {
            return;
        }
        let alive = match frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.frame(),
            Err(_) => true,
        };
        if !alive {
            running_tick.set(false);
            log::info!("[loop] carousel disposed; not rescheduling");
            return;
        }
        request_frame(&tick_clone, &raf_id_tick);
    }) as Box<dyn FnMut()>));

    request_frame(&tick, &raf_id);
    log::info!("[loop] started");
    LoopHandle {
        raf_id,
        running,
        tick,
    }
}
