use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// An event listener that stays attached until it is detached or dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    /// Attach `handler` for `event`. Events that are not an `E` are skipped.
    pub fn new<E, F>(target: &web::EventTarget, event: &'static str, handler: F) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::with_passive(target, event, true, handler)
    }

    /// Like [`Listener::new`] but lets the handler call `prevent_default`
    /// on events browsers register as passive by default (wheel, touch).
    pub fn active<E, F>(target: &web::EventTarget, event: &'static str, handler: F) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::with_passive(target, event, false, handler)
    }

    fn with_passive<E, F>(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        mut handler: F,
    ) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[dom] addEventListener({}) failed: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    pub fn detach(&self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Listeners released together when the hero view unmounts.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn push(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Remove every listener from its target. The closures stay alive until
    /// the set is dropped, so a handler may trigger its own teardown.
    pub fn detach_all(&self) {
        for l in &self.listeners {
            l.detach();
        }
    }
}
