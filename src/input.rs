use crate::constants::{WHEEL_LINE_PX, WHEEL_PAGE_PX};
use glam::Vec2;
use smallvec::SmallVec;
use web_sys as web;

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return Vec2::new(x_css, y_css);
    }
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Normalise a wheel delta to pixels. `delta_mode` follows `WheelEvent`:
/// 0 pixels, 1 lines, 2 pages.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let dy = delta_y as f32;
    match delta_mode {
        1 => dy * WHEEL_LINE_PX,
        2 => dy * WHEEL_PAGE_PX,
        _ => dy,
    }
}

/// Pointers currently pressed on the canvas, in press order.
///
/// One pointer drives orbit and clicks; two form a pinch. Extra fingers are
/// tracked so their release is recognised but take no part in the gesture.
#[derive(Default, Clone, Debug)]
pub struct ActivePointers {
    pointers: SmallVec<[(i32, Vec2); 4]>,
}

impl ActivePointers {
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.pointers.iter().any(|(p, _)| *p == id)
    }

    /// Record a press; returns the number of pointers now down.
    pub fn press(&mut self, id: i32, pos: Vec2) -> usize {
        match self.pointers.iter_mut().find(|(p, _)| *p == id) {
            Some(entry) => entry.1 = pos,
            None => self.pointers.push((id, pos)),
        }
        self.pointers.len()
    }

    /// Update a pointer's position. When it is one of the first two pointers
    /// of a pinch, returns the ratio of the new finger spread to the old one.
    pub fn moved(&mut self, id: i32, pos: Vec2) -> Option<f32> {
        let slot = self.pointers.iter().position(|(p, _)| *p == id)?;
        let before = self.spread();
        self.pointers[slot].1 = pos;
        if slot > 1 {
            return None;
        }
        let after = self.spread()?;
        let before = before?;
        if before <= f32::EPSILON {
            return None;
        }
        Some(after / before)
    }

    /// Forget a pointer; returns the number still down.
    pub fn release(&mut self, id: i32) -> usize {
        self.pointers.retain(|(p, _)| *p != id);
        self.pointers.len()
    }

    fn spread(&self) -> Option<f32> {
        match self.pointers.as_slice() {
            [(_, a), (_, b), ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}
