//! DOM labels drawn over the canvas, one title and subtitle per panel.

use crate::constants::*;
use glam::Vec3;
use hero_core::{Camera, FrameState, Panel, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct PanelLabel {
    root: web::HtmlElement,
    title: web::HtmlElement,
    subtitle: Option<web::HtmlElement>,
    visible: bool,
}

pub struct LabelOverlay {
    layer: web::HtmlElement,
    labels: Vec<PanelLabel>,
}

fn create_div(document: &web::Document, class: &str) -> Result<web::HtmlElement, JsValue> {
    let el = document
        .create_element("div")?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| JsValue::from_str("div is not an HtmlElement"))?;
    el.set_class_name(class);
    Ok(el)
}

fn set_styles(el: &web::HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (k, v) in styles {
        _ = style.set_property(k, v);
    }
}

impl LabelOverlay {
    /// Build the label layer as a sibling of the canvas, covering it.
    pub fn new(
        document: &web::Document,
        canvas: &web::HtmlCanvasElement,
        panels: &[Panel],
    ) -> Result<Self, JsValue> {
        let layer = create_div(document, LABEL_LAYER_CLASS)?;
        set_styles(
            &layer,
            &[
                ("position", "absolute"),
                ("pointer-events", "none"),
                ("overflow", "hidden"),
            ],
        );
        cover_canvas(&layer, canvas);

        let mut labels = Vec::with_capacity(panels.len());
        for panel in panels {
            let root = create_div(document, LABEL_CLASS)?;
            set_styles(
                &root,
                &[
                    ("position", "absolute"),
                    ("left", "0"),
                    ("top", "0"),
                    ("display", "none"),
                    ("text-align", "center"),
                    ("white-space", "nowrap"),
                    ("font", LABEL_FONT),
                ],
            );
            _ = root.set_attribute("data-panel-id", panel.id());

            let title = create_div(document, "hero-label-title")?;
            title.set_text_content(Some(panel.label()));
            set_styles(&title, &[("color", TITLE_COLOR)]);
            root.append_child(&title)?;

            let subtitle = if panel.subtitle().is_empty() {
                None
            } else {
                let sub = create_div(document, "hero-label-subtitle")?;
                sub.set_text_content(Some(panel.subtitle()));
                set_styles(
                    &sub,
                    &[
                        ("color", SUBTITLE_COLOR),
                        ("position", "absolute"),
                        ("white-space", "normal"),
                        ("font-weight", "400"),
                        ("transform", "translateY(-50%)"),
                    ],
                );
                root.append_child(&sub)?;
                Some(sub)
            };

            layer.append_child(&root)?;
            labels.push(PanelLabel {
                root,
                title,
                subtitle,
                visible: false,
            });
        }

        match canvas.parent_node() {
            Some(parent) => {
                parent.insert_before(&layer, canvas.next_sibling().as_ref())?;
            }
            None => {
                return Err(JsValue::from_str("canvas is not attached to the document"));
            }
        }
        log::info!("[overlay] {} labels", labels.len());
        Ok(Self { layer, labels })
    }

    /// Position every label at its panel's projected text anchor. Labels of
    /// panels turned away from the camera, or behind it, are hidden.
    pub fn update(
        &mut self,
        frame: &FrameState,
        canvas: &web::HtmlCanvasElement,
        viewport: Viewport,
    ) {
        let css_w = canvas.offset_width() as f32;
        let css_scale = if viewport.width > 0.0 {
            css_w / viewport.width
        } else {
            1.0
        };
        cover_canvas(&self.layer, canvas);

        let camera = &frame.camera;
        for draw in &frame.panels {
            let Some(label) = self.labels.get_mut(draw.index) else {
                continue;
            };
            let to_eye = camera.eye - draw.label_anchor;
            let facing = draw.facing.dot(to_eye) > 0.0;
            let placed = if facing {
                project_label(camera, viewport, draw.label_anchor, TITLE_WORLD_HEIGHT)
            } else {
                None
            };
            let Some((pos, title_px)) = placed else {
                if label.visible {
                    _ = label.root.style().set_property("display", "none");
                    label.visible = false;
                }
                continue;
            };
            if !label.visible {
                _ = label.root.style().set_property("display", "block");
                label.visible = true;
            }

            let depth = to_eye.length();
            let root_style = label.root.style();
            _ = root_style.set_property(
                "transform",
                &format!(
                    "translate({:.1}px, {:.1}px) translate(-50%, -50%)",
                    pos.x * css_scale,
                    pos.y * css_scale
                ),
            );
            _ = root_style.set_property("z-index", &format!("{}", (1000.0 - depth * 10.0) as i32));
            _ = label
                .title
                .style()
                .set_property("font-size", &format!("{:.1}px", title_px * css_scale));

            if let Some(sub) = &label.subtitle {
                let sub_style = sub.style();
                let sub_pos =
                    project_label(camera, viewport, draw.subtitle_anchor, SUBTITLE_WORLD_HEIGHT);
                if let Some((sp, sub_px)) = sub_pos {
                    let width_px = sub_px / SUBTITLE_WORLD_HEIGHT * SUBTITLE_WORLD_WIDTH;
                    _ = sub_style.set_property("display", "block");
                    _ = sub_style.set_property("font-size", &format!("{:.1}px", sub_px * css_scale));
                    _ = sub_style.set_property("width", &format!("{:.1}px", width_px * css_scale));
                    _ = sub_style.set_property(
                        "left",
                        &format!("calc(50% - {:.1}px)", width_px * css_scale * 0.5),
                    );
                    _ = sub_style.set_property(
                        "top",
                        &format!("calc(50% + {:.1}px)", (sp.y - pos.y) * css_scale),
                    );
                } else {
                    _ = sub_style.set_property("display", "none");
                }
            }
        }
    }

    pub fn remove(&self) {
        self.layer.remove();
    }
}

fn cover_canvas(layer: &web::HtmlElement, canvas: &web::HtmlCanvasElement) {
    let style = layer.style();
    _ = style.set_property("left", &format!("{}px", canvas.offset_left()));
    _ = style.set_property("top", &format!("{}px", canvas.offset_top()));
    _ = style.set_property("width", &format!("{}px", canvas.offset_width()));
    _ = style.set_property("height", &format!("{}px", canvas.offset_height()));
}

/// Projected anchor position and the on-screen height of `world_height`
/// at that depth, both in backing pixels.
fn project_label(
    camera: &Camera,
    viewport: Viewport,
    anchor: Vec3,
    world_height: f32,
) -> Option<(glam::Vec2, f32)> {
    let pos = camera.project(anchor, viewport)?;
    let top = camera.project(anchor + camera.up * world_height, viewport)?;
    let px = (top.y - pos.y).abs().max(LABEL_MIN_FONT_PX);
    Some((pos, px))
}
