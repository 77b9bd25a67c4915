use crate::dom::{self, Listener, ListenerSet};
use crate::frame::canvas_viewport;
use crate::input::{self, ActivePointers};
use hero_core::Carousel;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Host callback for panel activation. Without one, selections are logged.
#[derive(Clone, Default)]
pub struct SelectionCallback(Option<js_sys::Function>);

impl SelectionCallback {
    pub fn new(callback: Option<js_sys::Function>) -> Self {
        Self(callback)
    }

    pub fn notify(&self, id: &str) {
        match &self.0 {
            Some(f) => {
                if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_str(id)) {
                    log::error!("[click] onPanelSelected threw: {:?}", e);
                }
            }
            None => log::info!("Clicked panel: {}", id),
        }
    }
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub carousel: Rc<RefCell<Carousel>>,
    pub pointers: Rc<RefCell<ActivePointers>>,
    pub on_select: SelectionCallback,
}

pub fn wire_input_handlers(w: InputWiring, listeners: &mut ListenerSet) {
    listeners.push(wire_pointerdown(&w));
    listeners.push(wire_pointermove(&w));
    listeners.push(wire_pointerup(&w));
    listeners.push(wire_pointercancel(&w));
    listeners.push(wire_pointerleave(&w));
    listeners.push(wire_wheel(&w));
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, listeners: &mut ListenerSet) {
    dom::sync_canvas_backing_size(canvas);
    let Some(window) = web::window() else {
        return;
    };
    let canvas_resize = canvas.clone();
    listeners.push(Listener::new(&window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas_resize);
    }));
}

fn wire_pointerdown(w: &InputWiring) -> Listener {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointerdown", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let viewport = canvas_viewport(&w.canvas);
        let count = w.pointers.borrow_mut().press(ev.pointer_id(), pos);
        {
            let mut carousel = w.carousel.borrow_mut();
            if count == 1 {
                carousel.pointer_down(pos, viewport);
            } else {
                // a second finger turns the gesture into a pinch
                carousel.pointer_cancel();
            }
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    })
}

fn wire_pointermove(w: &InputWiring) -> Listener {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let viewport = canvas_viewport(&w.canvas);
        let (count, ratio) = {
            let mut pointers = w.pointers.borrow_mut();
            let ratio = pointers.moved(ev.pointer_id(), pos);
            (pointers.len(), ratio)
        };
        let mut carousel = w.carousel.borrow_mut();
        if count >= 2 {
            if let Some(r) = ratio {
                carousel.pinch(r);
            }
        } else {
            carousel.pointer_move(pos, viewport);
        }
    })
}

fn wire_pointerup(w: &InputWiring) -> Listener {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointerup", move |ev: web::PointerEvent| {
        let id = ev.pointer_id();
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let viewport = canvas_viewport(&w.canvas);
        let was_single = {
            let pointers = w.pointers.borrow();
            pointers.len() == 1 && pointers.contains(id)
        };
        w.pointers.borrow_mut().release(id);

        // The host callback runs after the carousel borrow ends, so it may
        // unmount the view.
        let mut selected: SmallVec<[String; 1]> = SmallVec::new();
        if was_single {
            let mut sink = |panel_id: &str| selected.push(panel_id.to_string());
            w.carousel.borrow_mut().pointer_up(pos, viewport, &mut sink);
        }
        _ = w.canvas.release_pointer_capture(id);
        for panel_id in &selected {
            w.on_select.notify(panel_id);
        }
    })
}

fn wire_pointercancel(w: &InputWiring) -> Listener {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointercancel", move |ev: web::PointerEvent| {
        w.pointers.borrow_mut().release(ev.pointer_id());
        w.carousel.borrow_mut().pointer_cancel();
        log::debug!("[pointer] cancel {}", ev.pointer_id());
    })
}

fn wire_pointerleave(w: &InputWiring) -> Listener {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointerleave", move |_: web::PointerEvent| {
        w.carousel.borrow_mut().pointer_leave();
    })
}

fn wire_wheel(w: &InputWiring) -> Listener {
    let w = w.clone();
    Listener::active(&w.canvas.clone(), "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        w.carousel.borrow_mut().wheel(dy);
    })
}
