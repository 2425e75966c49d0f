#![cfg(target_arch = "wasm32")]
use fx_core::EffectConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod css;
mod dom;
mod scheduler;
mod surface;

use scheduler::{Clock, WebController, WebScheduler};
use surface::DomSurface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web loaded");
    Ok(())
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

#[allow(deprecated)]
fn parse_options(options: &JsValue) -> anyhow::Result<EffectConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(EffectConfig::default());
    }
    options
        .into_serde::<EffectConfig>()
        .map_err(|e| anyhow::anyhow!("invalid options: {e}"))
}

/// Handle returned to the page. Dropping it (or calling `free()` from JS)
/// unmounts the effect.
#[wasm_bindgen]
pub struct FieldEffect {
    controller: Rc<RefCell<WebController>>,
    canvas: web::HtmlCanvasElement,
    resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl FieldEffect {
    /// Mount the effect on the current document. `options` may be `undefined`
    /// or an object with `magneticRadius`, `thermalRadius`, `maxParticles`
    /// and `enabled`; `data-fx-*` attributes on `<body>` override it.
    pub fn mount(options: JsValue) -> Result<FieldEffect, JsValue> {
        mount_inner(&options).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: bool) {
        let mut c = self.controller.borrow_mut();
        if c.is_closed() {
            log::warn!("[fx] setEnabled after unmount ignored");
            return;
        }
        if enabled {
            c.enable();
        } else {
            c.disable();
        }
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, options: JsValue) -> Result<(), JsValue> {
        let config = parse_options(&options).map_err(to_js)?;
        let mut c = self.controller.borrow_mut();
        if c.is_closed() {
            return Err(JsValue::from_str("effect is unmounted"));
        }
        c.set_config(config);
        Ok(())
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.controller.borrow().is_enabled()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.controller.borrow().engine().particle_count()
    }

    /// Detach every listener, stop the frame loop and remove the overlay.
    /// Later `setEnabled(true)` / `setConfig` calls are ignored.
    pub fn unmount(&mut self) {
        if let Ok(mut c) = self.controller.try_borrow_mut() {
            c.shutdown();
        }
        if let Some(resize) = self.resize.take() {
            if let Some(w) = web::window() {
                _ = w.remove_event_listener_with_callback(
                    "resize",
                    resize.as_ref().unchecked_ref(),
                );
            }
            self.canvas.remove();
            log::info!("[fx] unmounted");
        }
    }
}

impl Drop for FieldEffect {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn mount_inner(options: &JsValue) -> anyhow::Result<FieldEffect> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut config = parse_options(options)?;
    dom::apply_body_overrides(&document, &mut config);
    let config = config
        .validated()
        .respecting_reduced_motion(dom::prefers_reduced_motion(&window));

    let canvas = dom::overlay_canvas(&document)?;
    let ctx = dom::context_2d(&canvas)?;
    dom::sync_canvas_backing_size(&canvas);

    let canvas_resize = canvas.clone();
    let resize = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());

    let clock = Clock::start();
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let surface = DomSurface::new(document.clone(), canvas.clone(), ctx);
    let enabled = config.enabled;
    let controller = Rc::new_cyclic(|weak| {
        let scheduler = WebScheduler::new(window.clone(), &document, weak.clone(), clock);
        RefCell::new(WebController::new(config, scheduler, surface, seed))
    });
    if enabled {
        controller.borrow_mut().enable();
    }
    log::info!(
        "[fx] mounted magnetic={} thermal={} max_particles={} enabled={}",
        controller.borrow().engine().config.magnetic_radius,
        controller.borrow().engine().config.thermal_radius,
        controller.borrow().engine().config.max_particles,
        enabled
    );

    Ok(FieldEffect {
        controller,
        canvas,
        resize: Some(resize),
    })
}
