use crate::surface::DomSurface;
use fnv::FnvHashMap;
use fx_core::{
    EffectController, FrameHandle, ListenerId, PointerEventKind, PointerInput, Scheduler,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebController = EffectController<WebScheduler, DomSurface>;
type PointerClosure = Closure<dyn FnMut(web::PointerEvent)>;

/// Monotonic millisecond clock shared by the pointer handlers and the frame
/// loop, so particle ages are measured on one time base.
#[derive(Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Browser scheduler: document-level pointer listeners plus a
/// `requestAnimationFrame` callback. Closures hold only a weak reference to
/// the controller, so dropping the controller frees them.
pub struct WebScheduler {
    window: web::Window,
    target: web::EventTarget,
    handlers: FnvHashMap<PointerEventKind, PointerClosure>,
    attached: FnvHashMap<ListenerId, PointerEventKind>,
    frame_cb: Closure<dyn FnMut(f64)>,
    next_listener: u32,
}

impl WebScheduler {
    pub fn new(
        window: web::Window,
        document: &web::Document,
        controller: Weak<RefCell<WebController>>,
        clock: Clock,
    ) -> Self {
        let handlers = PointerEventKind::ALL
            .iter()
            .map(|kind| (*kind, pointer_closure(*kind, controller.clone(), clock)))
            .collect();

        let frame_ctrl = controller;
        let frame_cb = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(ctrl) = frame_ctrl.upgrade() {
                if let Ok(mut c) = ctrl.try_borrow_mut() {
                    c.on_frame(clock.now_ms());
                }
            }
        }) as Box<dyn FnMut(f64)>);

        Self {
            window,
            target: document.clone().unchecked_into(),
            handlers,
            attached: FnvHashMap::default(),
            frame_cb,
            next_listener: 0,
        }
    }
}

fn pointer_closure(
    kind: PointerEventKind,
    controller: Weak<RefCell<WebController>>,
    clock: Clock,
) -> PointerClosure {
    Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(ctrl) = controller.upgrade() else {
            return;
        };
        // Re-entrant dispatch (e.g. an event raised while disabling) is dropped.
        let Ok(mut c) = ctrl.try_borrow_mut() else {
            return;
        };
        let input = PointerInput {
            kind,
            x: ev.client_x() as f32,
            y: ev.client_y() as f32,
            primary: ev.is_primary(),
        };
        c.on_pointer_event(input, clock.now_ms());
    }) as Box<dyn FnMut(_)>)
}

impl Scheduler for WebScheduler {
    fn listen(&mut self, kind: PointerEventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        if let Some(handler) = self.handlers.get(&kind) {
            _ = self.target.add_event_listener_with_callback(
                kind.dom_name(),
                handler.as_ref().unchecked_ref(),
            );
            self.attached.insert(id, kind);
        }
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(kind) = self.attached.remove(&id) else {
            return;
        };
        if let Some(handler) = self.handlers.get(&kind) {
            _ = self.target.remove_event_listener_with_callback(
                kind.dom_name(),
                handler.as_ref().unchecked_ref(),
            );
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.frame_cb.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                // Ids are positive; cancelling 0 is a no-op.
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }
}
