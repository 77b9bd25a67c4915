//! Pointer interaction routing.
//!
//! The browser hands raw canvas events to the frontend; after picking, they
//! become panel-tagged [`PanelEvent`]s. [`HoverTracker`] and [`ClickTracker`]
//! turn successive hit-test results into enter/leave/activate events, and
//! [`InteractionRouter`] applies them to the scene through an id lookup
//! table. The router never owns panels.

use crate::constants::CLICK_SLOP_PX;
use crate::panel::SelectionSink;
use crate::scene::SceneGraph;
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    Enter(String),
    Leave(String),
    Activate(String),
}

impl PanelEvent {
    pub fn panel_id(&self) -> &str {
        match self {
            PanelEvent::Enter(id) | PanelEvent::Leave(id) | PanelEvent::Activate(id) => id,
        }
    }
}

pub type PanelEvents = SmallVec<[PanelEvent; 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routed {
    Applied,
    /// The event named a panel that is not part of the scene.
    Ignored,
}

pub struct InteractionRouter {
    table: FnvHashMap<String, usize>,
}

impl InteractionRouter {
    pub fn new(scene: &SceneGraph) -> Self {
        let table = scene
            .panels()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id().to_string(), i))
            .collect();
        Self { table }
    }

    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.table.get(id).copied()
    }

    pub fn dispatch(
        &self,
        scene: &mut SceneGraph,
        event: &PanelEvent,
        sink: &mut dyn SelectionSink,
    ) -> Routed {
        let Some(index) = self.lookup(event.panel_id()) else {
            log::debug!("[router] ignoring {:?}: unknown panel", event);
            return Routed::Ignored;
        };
        if scene.panel(index).is_none() {
            log::debug!("[router] ignoring {:?}: slot {} gone", event, index);
            return Routed::Ignored;
        }
        match event {
            PanelEvent::Enter(_) => {
                // an enter without a matching leave must not leave a second panel lit
                for i in 0..scene.len() {
                    if i != index {
                        if let Some(p) = scene.panel_mut(i) {
                            p.set_hovered(false);
                        }
                    }
                }
                if let Some(p) = scene.panel_mut(index) {
                    p.set_hovered(true);
                }
            }
            PanelEvent::Leave(_) => {
                if let Some(p) = scene.panel_mut(index) {
                    p.set_hovered(false);
                }
            }
            PanelEvent::Activate(id) => {
                log::info!("[click] panel {}", id);
                if let Some(p) = scene.panel(index) {
                    p.activate(sink);
                }
            }
        }
        Routed::Applied
    }
}

/// Converts "which panel is under the pointer" samples into leave/enter pairs.
#[derive(Clone, Debug, Default)]
pub struct HoverTracker {
    current: Option<String>,
}

impl HoverTracker {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn update(&mut self, hit: Option<&str>) -> PanelEvents {
        if self.current.as_deref() == hit {
            return SmallVec::new();
        }
        let mut events = PanelEvents::new();
        if let Some(prev) = self.current.take() {
            events.push(PanelEvent::Leave(prev));
        }
        if let Some(id) = hit {
            events.push(PanelEvent::Enter(id.to_string()));
            self.current = Some(id.to_string());
        }
        events
    }

    /// Adopt whatever the scene has lit after an event routed from outside
    /// the pointer path. Emits nothing.
    pub fn sync(&mut self, lit: Option<&str>) {
        self.current = lit.map(str::to_string);
    }

    /// The pointer left the viewport.
    pub fn clear(&mut self) -> PanelEvents {
        match self.current.take() {
            Some(prev) => smallvec![PanelEvent::Leave(prev)],
            None => SmallVec::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct Press {
    panel: Option<String>,
    last: Vec2,
    travel: f32,
}

/// Detects clicks: press and release over the same panel with little travel.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    press: Option<Press>,
    slop: f32,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(CLICK_SLOP_PX)
    }
}

impl ClickTracker {
    pub fn new(slop: f32) -> Self {
        Self { press: None, slop }
    }

    pub fn press(&mut self, hit: Option<&str>, pos: Vec2) {
        self.press = Some(Press {
            panel: hit.map(str::to_string),
            last: pos,
            travel: 0.0,
        });
    }

    pub fn moved(&mut self, pos: Vec2) {
        if let Some(p) = &mut self.press {
            p.travel += (pos - p.last).length();
            p.last = pos;
        }
    }

    pub fn release(&mut self, hit: Option<&str>, pos: Vec2) -> Option<PanelEvent> {
        self.moved(pos);
        let press = self.press.take()?;
        if press.travel > self.slop {
            return None;
        }
        match (press.panel, hit) {
            (Some(down), Some(up)) if down == up => Some(PanelEvent::Activate(down)),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_moves_emit_leave_then_enter() {
        let mut h = HoverTracker::default();
        assert_eq!(
            h.update(Some("a")).into_vec(),
            vec![PanelEvent::Enter("a".into())]
        );
        assert!(h.update(Some("a")).is_empty());
        assert_eq!(
            h.update(Some("b")).into_vec(),
            vec![PanelEvent::Leave("a".into()), PanelEvent::Enter("b".into())]
        );
        assert_eq!(h.clear().into_vec(), vec![PanelEvent::Leave("b".into())]);
        assert!(h.current().is_none());
    }

    #[test]
    fn drag_past_slop_is_not_a_click() {
        let mut c = ClickTracker::new(4.0);
        c.press(Some("a"), Vec2::ZERO);
        c.moved(Vec2::new(10.0, 0.0));
        assert_eq!(c.release(Some("a"), Vec2::ZERO), None);
    }

    #[test]
    fn release_over_other_panel_is_not_a_click() {
        let mut c = ClickTracker::default();
        c.press(Some("a"), Vec2::ZERO);
        assert_eq!(c.release(Some("b"), Vec2::ZERO), None);
        c.press(Some("a"), Vec2::ZERO);
        assert_eq!(
            c.release(Some("a"), Vec2::new(1.0, 1.0)),
            Some(PanelEvent::Activate("a".into()))
        );
    }
}
