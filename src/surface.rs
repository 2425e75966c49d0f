use crate::css::{self, StyleHost};
use fx_core::{
    CursorGlow, ElementBox, FieldRing, GridLayer, MarkerShape, OverlayFrame, Rgba, StylePatch,
    Surface, TrailMarker,
};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Selector for elements opted into the proximity field.
pub const DESIGNATED_SELECTOR: &str = ".proximity-responsive";

/// Inline style of an HTML or SVG element; other elements have none.
fn inline_style(element: &web::Element) -> Option<web::CssStyleDeclaration> {
    match css::style_host(element.namespace_uri().as_deref())? {
        StyleHost::Html => element.dyn_ref::<web::HtmlElement>().map(|e| e.style()),
        StyleHost::Svg => element.dyn_ref::<web::SvgElement>().map(|e| e.style()),
    }
}

/// DOM-backed surface: designated elements are looked up on every query and
/// the overlay is drawn on a 2D canvas in CSS pixels.
pub struct DomSurface {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl DomSurface {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
    ) -> Self {
        Self {
            document,
            canvas,
            ctx,
        }
    }

    fn begin(&self) {
        let dpr = web::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn draw_ring(&self, ring: &FieldRing, filled: bool) {
        let ctx = &self.ctx;
        let (cx, cy) = (ring.center.x as f64, ring.center.y as f64);
        let radius = (ring.diameter * ring.scale * 0.5) as f64;
        ctx.begin_path();
        _ = ctx.arc(cx, cy, radius, 0.0, TAU);
        let color = css::rgba(Rgba {
            alpha: ring.color.alpha * ring.opacity,
            ..ring.color
        });
        if filled {
            match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) {
                Ok(gradient) => {
                    _ = gradient.add_color_stop(0.0, &color);
                    _ = gradient.add_color_stop(0.7, &css::rgba_with(ring.color.rgb, 0.0));
                    ctx.set_fill_style_canvas_gradient(&gradient);
                }
                Err(_) => ctx.set_fill_style_str(&color),
            }
            ctx.fill();
        } else {
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(&color);
            ctx.stroke();
        }
    }

    fn draw_grid(&self, grid: &GridLayer) {
        let ctx = &self.ctx;
        let w = self.canvas.client_width() as f64;
        let h = self.canvas.client_height() as f64;
        let cell = grid.cell as f64;
        if cell <= 0.0 {
            return;
        }
        ctx.save();
        ctx.set_global_alpha(grid.layer_alpha as f64);
        _ = ctx.translate(grid.offset.x as f64, grid.offset.y as f64);
        ctx.set_line_width(grid.line_width as f64);
        ctx.set_stroke_style_str(&css::rgba(grid.stroke));
        ctx.begin_path();
        let mut x = -cell;
        while x <= w + cell {
            ctx.move_to(x, -cell);
            ctx.line_to(x, h + cell);
            x += cell;
        }
        let mut y = -cell;
        while y <= h + cell {
            ctx.move_to(-cell, y);
            ctx.line_to(w + cell, y);
            y += cell;
        }
        ctx.stroke();
        ctx.restore();
    }

    fn draw_guides(&self, x: f64, y: f64) {
        let ctx = &self.ctx;
        let w = self.canvas.client_width() as f64;
        let h = self.canvas.client_height() as f64;
        let dash = js_sys::Array::of2(&5.0.into(), &5.0.into());
        _ = ctx.set_line_dash(&dash);
        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str(&css::rgba_with(fx_core::constants::MAGNETIC_RGB, 0.15));
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        ctx.stroke();
        _ = ctx.set_line_dash(&js_sys::Array::new());
    }

    fn draw_trail(&self, marker: &TrailMarker) {
        let ctx = &self.ctx;
        let m = &marker.motion;
        ctx.save();
        ctx.set_global_alpha((marker.opacity * m.opacity) as f64);
        ctx.set_filter(&css::blur_filter(m.blur_px));
        _ = ctx.translate(
            marker.position.x as f64,
            (marker.position.y + m.offset_y) as f64,
        );
        _ = ctx.rotate(((marker.rotate_deg + m.rotate_deg) as f64).to_radians());
        let scale = (marker.scale * m.scale) as f64;
        _ = ctx.scale(scale, scale);
        ctx.set_fill_style_str(&css::rgba(marker.color));
        let half = (marker.size * 0.5) as f64;
        match marker.shape {
            MarkerShape::Square => ctx.fill_rect(-half, -half, half * 2.0, half * 2.0),
            MarkerShape::Round => {
                ctx.begin_path();
                _ = ctx.arc(0.0, 0.0, half, 0.0, TAU);
                ctx.fill();
            }
        }
        ctx.restore();
    }

    fn draw_cursor(&self, c: &CursorGlow) {
        let ctx = &self.ctx;
        let radius = (c.size * 0.5) as f64;
        ctx.save();
        _ = ctx.translate(c.position.x as f64, c.position.y as f64);
        _ = ctx.rotate((c.spin_deg as f64).to_radians());
        _ = ctx.scale(c.scale as f64, c.scale as f64);
        ctx.set_filter(&css::blur_filter(c.blur_px));
        ctx.set_shadow_blur(c.shadow_blur as f64);
        ctx.set_shadow_color(&css::rgba_with(
            fx_core::constants::MAGNETIC_RGB,
            c.shadow_alpha,
        ));
        match ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, radius) {
            Ok(gradient) => {
                for stop in &c.gradient {
                    _ = gradient.add_color_stop(stop.offset, &css::rgba(stop.color));
                }
                ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Err(_) => {
                ctx.set_fill_style_str(&css::rgba_with(fx_core::constants::MAGNETIC_RGB, c.alpha))
            }
        }
        ctx.begin_path();
        _ = ctx.arc(0.0, 0.0, radius, 0.0, TAU);
        ctx.fill();
        ctx.restore();
    }
}

impl Surface for DomSurface {
    type Element = web::Element;

    fn designated(&self) -> Vec<web::Element> {
        let Ok(list) = self.document.query_selector_all(DESIGNATED_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<web::Element>().ok())
            .collect()
    }

    fn bounds(&self, element: &web::Element) -> ElementBox {
        let r = element.get_bounding_client_rect();
        ElementBox::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        )
    }

    fn apply(&self, element: &web::Element, patch: &StylePatch) {
        let Some(style) = inline_style(element) else {
            return;
        };
        let (transform, filter) = css::patch_css(patch);
        _ = style.set_property("transform", &transform);
        _ = style.set_property("filter", &filter);
    }

    fn paint(&mut self, frame: &OverlayFrame) {
        self.begin();
        self.draw_grid(&frame.grid);
        self.draw_ring(&frame.thermal_halo, true);
        self.draw_ring(&frame.magnetic_ring, false);
        self.draw_guides(frame.guides.x as f64, frame.guides.y as f64);
        for marker in &frame.trails {
            self.draw_trail(marker);
        }
        self.draw_cursor(&frame.cursor);
    }

    fn clear(&mut self) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}
