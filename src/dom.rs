use fx_core::EffectConfig;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const OVERLAY_CANVAS_ID: &str = "field-fx-overlay";
const OVERLAY_STYLE: &str =
    "position:fixed;inset:0;width:100vw;height:100vh;pointer-events:none;z-index:50";
const ATTRIBUTE_KEYS: [&str; 4] = ["magnetic-radius", "thermal-radius", "max-particles", "enabled"];

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Whether the user prefers reduced motion. Unsupported queries read as no.
pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    matches!(
        window.match_media(REDUCED_MOTION_QUERY),
        Ok(Some(list)) if list.matches()
    )
}

/// Apply `data-fx-*` overrides found on `<body>`. Bad values are logged and
/// skipped.
pub fn apply_body_overrides(document: &web::Document, config: &mut EffectConfig) {
    let Some(body) = document.body() else {
        return;
    };
    for key in ATTRIBUTE_KEYS {
        if let Some(value) = body.get_attribute(&format!("data-fx-{key}")) {
            if let Err(e) = config.apply_attribute(key, &value) {
                log::warn!("[config] ignoring data-fx-{}: {}", key, e);
            }
        }
    }
}

/// Create (or reuse) the full-viewport overlay canvas the trails are painted on.
pub fn overlay_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(existing) = document.get_element_by_id(OVERLAY_CANVAS_ID) {
        return existing
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", OVERLAY_CANVAS_ID, e));
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(OVERLAY_CANVAS_ID);
    _ = canvas.set_attribute("style", OVERLAY_STYLE);
    _ = canvas.set_attribute("aria-hidden", "true");
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
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
