#![cfg(target_arch = "wasm32")]
use hero_core::{Carousel, CarouselConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::DEFAULT_CANVAS_ID;

struct Mounted {
    carousel: Rc<RefCell<Carousel>>,
    frame_ctx: Rc<RefCell<frame::FrameContext<'static>>>,
    frame_loop: frame::LoopHandle,
    listeners: dom::ListenerSet,
}

/// A hero carousel mounted on a canvas element.
#[wasm_bindgen]
pub struct HeroView {
    mounted: Option<Mounted>,
}

fn parse_config(config_json: Option<String>) -> anyhow::Result<CarouselConfig> {
    match config_json {
        Some(json) if !json.trim().is_empty() => Ok(CarouselConfig::from_json(&json)?),
        _ => Ok(CarouselConfig::default()),
    }
}

fn find_canvas(document: &web::Document, canvas_id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas_el = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?;
    canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

async fn init(
    canvas_id: &str,
    config_json: Option<String>,
    on_select: events::SelectionCallback,
) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = find_canvas(&document, canvas_id)?;

    let config = parse_config(config_json)?;
    let carousel = Carousel::new(&config)?;
    log::info!(
        "[scene] mounting {} panels on #{}",
        carousel.scene().len(),
        canvas_id
    );

    // Browser panning and pinch-zoom would otherwise steal touch gestures
    _ = canvas.style().set_property("touch-action", "none");

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let mut listeners = dom::ListenerSet::default();
    events::wire_canvas_resize(&canvas, &mut listeners);

    let overlay = overlay::LabelOverlay::new(&document, &canvas, carousel.scene().panels())
        .map_err(|e| anyhow::anyhow!("label overlay: {:?}", e))?;
    let gpu = frame::init_gpu(&canvas).await;

    let carousel = Rc::new(RefCell::new(carousel));
    events::wire_input_handlers(
        events::InputWiring {
            canvas: canvas.clone(),
            carousel: carousel.clone(),
            pointers: Rc::new(RefCell::new(input::ActivePointers::default())),
            on_select,
        },
        &mut listeners,
    );
    log::info!("[pointer] {} listeners attached", listeners.len());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        carousel: carousel.clone(),
        canvas,
        gpu,
        overlay,
        clock: hero_core::AnimationClock::default(),
    }));
    let frame_loop = frame::start_loop(frame_ctx.clone());

    Ok(Mounted {
        carousel,
        frame_ctx,
        frame_loop,
        listeners,
    })
}

impl Mounted {
    /// Dispose the scene, cancel the frame loop, detach listeners and remove
    /// the labels in one step. Closures are freed on a later microtask so a
    /// listener may unmount the view it belongs to.
    fn teardown(self) {
        let Mounted {
            carousel,
            frame_ctx,
            frame_loop,
            listeners,
        } = self;
        if let Ok(mut c) = carousel.try_borrow_mut() {
            c.dispose();
        }
        let tick = frame_loop.stop();
        listeners.detach_all();
        match frame_ctx.try_borrow() {
            Ok(ctx) => ctx.overlay.remove(),
            Err(_) => log::warn!("[scene] frame in progress; labels left in place"),
        }
        spawn_local(async move {
            drop(tick);
            drop(listeners);
            drop(frame_ctx);
        });
    }
}

#[wasm_bindgen]
impl HeroView {
    /// Mount on the canvas with id `canvas_id`. `config_json` overrides the
    /// default panels and tuning; `on_panel_selected` receives the id of
    /// each clicked panel.
    pub async fn mount(
        canvas_id: String,
        config_json: Option<String>,
        on_panel_selected: Option<js_sys::Function>,
    ) -> Result<HeroView, JsValue> {
        let on_select = events::SelectionCallback::new(on_panel_selected);
        match init(&canvas_id, config_json, on_select).await {
            Ok(m) => Ok(HeroView { mounted: Some(m) }),
            Err(e) => {
                log::error!("init error: {:?}", e);
                Err(JsValue::from_str(&format!("{:#}", e)))
            }
        }
    }

    /// Tear the view down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.teardown();
            log::info!("[scene] unmounted");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mounted.is_some()
    }
}

impl Drop for HeroView {
    fn drop(&mut self) {
        self.unmount();
    }
}

thread_local! {
    static AUTO_VIEW: RefCell<Option<HeroView>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    let has_canvas = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
        .is_some();
    if !has_canvas {
        return Ok(());
    }
    spawn_local(async move {
        match HeroView::mount(DEFAULT_CANVAS_ID.to_string(), None, None).await {
            Ok(view) => AUTO_VIEW.with(|v| *v.borrow_mut() = Some(view)),
            Err(e) => log::error!("auto-mount failed: {:?}", e),
        }
    });
    Ok(())
}
