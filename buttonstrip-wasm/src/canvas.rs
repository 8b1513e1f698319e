use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::{Rc, Weak};

use buttonstrip_core::color::DARK_TEXT;
use buttonstrip_core::enums::{Alignment, IconPlacement};
use buttonstrip_core::settings::{CONTENT_ALIGNMENT, EFFECT, ICON, TEXT, TILE_FILL, TILE_STROKE};
use buttonstrip_core::{Color, DrawingSurface, Rect, RenderFrame, RenderTile, TileStyle};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Window};

use crate::constants::LIGHTING_SHARE;
use crate::geometry::{Outline, inset, outline, place_content};
use crate::utils::sync_canvas_size;

// Non-deprecated helpers to set canvas styles via property assignment.
fn set_style(ctx: &CanvasRenderingContext2d, property: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str(property), value);
}

pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    set_style(ctx, "fillStyle", &JsValue::from_str(color));
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    set_style(ctx, "strokeStyle", &JsValue::from_str(color));
}

fn set_fill_gradient(ctx: &CanvasRenderingContext2d, gradient: &CanvasGradient) {
    set_style(ctx, "fillStyle", gradient.as_ref());
}

/// CSS colour for a stored colour and a 0..100 transparency.
pub fn rgba(color: Color, transparency: f64) -> String {
    let alpha = 1.0 - transparency.clamp(0.0, 100.0) / 100.0;
    format!("rgba({}, {}, {}, {alpha})", color.r, color.g, color.b)
}

fn style_rgba(style: &TileStyle, object: &str, color: &str, transparency: &str) -> Option<String> {
    let c = style.color(object, color)?;
    Some(rgba(c, style.num(object, transparency).unwrap_or(0.0)))
}

fn alignment(style: &TileStyle) -> Alignment {
    match style.str(CONTENT_ALIGNMENT, "alignment") {
        Some("left") => Alignment::Left,
        Some("right") => Alignment::Right,
        _ => Alignment::Center,
    }
}

fn icon_placement(style: &TileStyle) -> IconPlacement {
    match style.str(ICON, "placement") {
        Some("above") => IconPlacement::Above,
        _ => IconPlacement::Left,
    }
}

/// Draws frames onto a 2D canvas. Images load asynchronously; the last
/// frame is repainted whenever one arrives.
pub struct CanvasSurface {
    painter: Rc<RefCell<Painter>>,
}

struct Painter {
    this: Weak<RefCell<Painter>>,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
    last: Option<RenderFrame>,
}

impl CanvasSurface {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let painter = Rc::new_cyclic(|this| {
            RefCell::new(Painter {
                this: this.clone(),
                window,
                canvas,
                ctx,
                images: HashMap::new(),
                last: None,
            })
        });
        Ok(Self { painter })
    }
}

impl DrawingSurface for CanvasSurface {
    fn render(&mut self, frame: &RenderFrame) {
        let mut painter = self.painter.borrow_mut();
        painter.last = Some(frame.clone());
        painter.repaint();
    }
}

impl Painter {
    fn repaint(&mut self) {
        let Some(frame) = self.last.take() else {
            return;
        };
        if let Err(err) = self.paint(&frame) {
            tracing::warn!(?err, "canvas paint failed");
        }
        self.last = Some(frame);
    }

    fn paint(&mut self, frame: &RenderFrame) -> Result<(), JsValue> {
        let dpr = sync_canvas_size(&self.window, &self.canvas);
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64 / dpr,
            self.canvas.height() as f64 / dpr,
        );
        for tile in &frame.tiles {
            self.draw_tile(frame, tile)?;
        }
        Ok(())
    }

    /// Loaded image for `url`, starting the load on first request.
    fn image(&mut self, url: &str) -> Option<HtmlImageElement> {
        if let Some(img) = self.images.get(url) {
            return (img.complete() && img.natural_width() > 0).then(|| img.clone());
        }
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                tracing::warn!(?err, "could not create image element");
                return None;
            }
        };
        let this = self.this.clone();
        let onload = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(painter) = this.upgrade()
                && let Ok(mut painter) = painter.try_borrow_mut()
            {
                painter.repaint();
            }
        }));
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
        img.set_cross_origin(Some("anonymous"));
        img.set_src(url);
        self.images.insert(url.to_string(), img);
        None
    }

    fn trace(&self, shape: &Outline) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        match shape {
            Outline::RoundedRect { rect, radius } => {
                let (x, y, w, h, r) = (rect.x, rect.y, rect.width, rect.height, *radius);
                ctx.move_to(x + r, y);
                ctx.arc_to(x + w, y, x + w, y + h, r)?;
                ctx.arc_to(x + w, y + h, x, y + h, r)?;
                ctx.arc_to(x, y + h, x, y, r)?;
                ctx.arc_to(x, y, x + w, y, r)?;
            }
            Outline::Ellipse { cx, cy, rx, ry } => {
                ctx.ellipse(*cx, *cy, rx.max(0.0), ry.max(0.0), 0.0, 0.0, 2.0 * PI)?;
            }
            Outline::Polygon(points) => {
                if let Some((&(x0, y0), rest)) = points.split_first() {
                    ctx.move_to(x0, y0);
                    for &(x, y) in rest {
                        ctx.line_to(x, y);
                    }
                }
            }
        }
        ctx.close_path();
        Ok(())
    }

    fn draw_tile(&mut self, frame: &RenderFrame, tile: &RenderTile) -> Result<(), JsValue> {
        let style = &tile.style;
        let weight = style.num(TILE_STROKE, "weight").unwrap_or(0.0).max(0.0);
        let radius = style.num(EFFECT, "shapeRoundedCornerRadius").unwrap_or(0.0);
        let rect = inset(tile.frame, weight / 2.0);
        let shape = outline(frame.shape, rect, frame.shape_parameter, radius);

        // body with shadow or glow
        self.ctx.save();
        if style.flag(EFFECT, "shadow") {
            let distance = style.num(EFFECT, "shadowDistance").unwrap_or(0.0);
            self.ctx.set_shadow_color(
                &style_rgba(style, EFFECT, "shadowColor", "shadowTransparency").unwrap_or_default(),
            );
            self.ctx.set_shadow_blur(style.num(EFFECT, "shadowStrength").unwrap_or(0.0));
            self.ctx.set_shadow_offset_x(distance);
            self.ctx.set_shadow_offset_y(distance);
        } else if style.flag(EFFECT, "glow") {
            self.ctx.set_shadow_color(
                &style_rgba(style, EFFECT, "glowColor", "glowTransparency").unwrap_or_default(),
            );
            self.ctx.set_shadow_blur(style.num(EFFECT, "glowStrength").unwrap_or(0.0));
        }
        self.trace(&shape)?;
        self.fill_body(style, rect)?;
        self.ctx.restore();

        // clipped overlays
        let background = tile
            .record
            .background_image_url
            .as_deref()
            .and_then(|url| self.image(url));
        let lighting = style.flag(EFFECT, "lighting");
        if background.is_some() || lighting {
            self.ctx.save();
            self.trace(&shape)?;
            self.ctx.clip();
            if let Some(img) = background {
                self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &img,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                )?;
            }
            if lighting
                && let Some(light) =
                    style_rgba(style, EFFECT, "lightingColor", "lightingTransparency")
            {
                set_fill_style(&self.ctx, &light);
                self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height * LIGHTING_SHARE);
            }
            self.ctx.restore();
        }

        if weight > 0.0
            && let Some(stroke) = style_rgba(style, TILE_STROKE, "color", "transparency")
        {
            self.trace(&shape)?;
            self.ctx.set_line_width(weight);
            set_stroke_style(&self.ctx, &stroke);
            self.ctx.stroke();
        }

        self.draw_content(tile, rect)
    }

    fn fill_body(&self, style: &TileStyle, rect: Rect) -> Result<(), JsValue> {
        let transparency = style.num(TILE_FILL, "transparency").unwrap_or(0.0);
        let Some(fill) = style.color(TILE_FILL, "color") else {
            return Ok(());
        };
        if style.flag(EFFECT, "gradient") {
            let other = style.color(EFFECT, "gradientColor").unwrap_or(fill);
            let (top, bottom) = if style.flag(EFFECT, "reverseGradient") {
                (other, fill)
            } else {
                (fill, other)
            };
            let gradient = self
                .ctx
                .create_linear_gradient(rect.x, rect.y, rect.x, rect.y + rect.height);
            gradient.add_color_stop(0.0, &rgba(top, transparency))?;
            gradient.add_color_stop(1.0, &rgba(bottom, transparency))?;
            set_fill_gradient(&self.ctx, &gradient);
        } else {
            set_fill_style(&self.ctx, &rgba(fill, transparency));
        }
        self.ctx.fill();
        Ok(())
    }

    fn draw_content(&mut self, tile: &RenderTile, rect: Rect) -> Result<(), JsValue> {
        let style = &tile.style;
        let format = tile.record.content_format;
        let text = tile
            .record
            .text
            .as_deref()
            .filter(|t| format.has_text() && !t.is_empty());
        let icon = tile
            .record
            .icon_url
            .as_deref()
            .filter(|_| format.has_icon())
            .and_then(|url| self.image(url));

        let font_size = style.num(TEXT, "fontSize").unwrap_or(14.0);
        let family = style.str(TEXT, "fontFamily").unwrap_or("sans-serif");
        self.ctx.set_font(&format!("{font_size}px {family}"));
        let text_size = match text {
            Some(t) => Some((self.ctx.measure_text(t)?.width(), font_size)),
            None => None,
        };
        let icon_size = icon.as_ref().map(|_| {
            (
                style.num(ICON, "width").unwrap_or(0.0).max(0.0),
                style.num(ICON, "padding").unwrap_or(0.0).max(0.0),
            )
        });
        let placed = place_content(rect, alignment(style), icon_placement(style), icon_size, text_size);

        if let (Some(img), Some(r)) = (icon, placed.icon) {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(&img, r.x, r.y, r.width, r.height)?;
        }
        if let (Some(t), Some((x, y))) = (text, placed.text) {
            let color = style_rgba(style, TEXT, "color", "transparency")
                .unwrap_or_else(|| rgba(DARK_TEXT, 0.0));
            set_fill_style(&self.ctx, &color);
            self.ctx.set_text_align("left");
            self.ctx.set_text_baseline("middle");
            self.ctx.fill_text(t, x, y)?;
        }
        Ok(())
    }
}
