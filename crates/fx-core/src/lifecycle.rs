//! Enable/disable lifecycle of the effect.
//!
//! The controller owns the engine together with two host seams: a
//! [`Scheduler`] that attaches pointer listeners and schedules frame
//! callbacks, and a [`Surface`] that exposes designated elements and a paint
//! target. Disabling cancels the pending frame and detaches every listener
//! before returning, so no tick outlives the effect.

use crate::config::EffectConfig;
use crate::engine::EffectEngine;
use crate::field::{ElementBox, StylePatch};
use crate::overlay::OverlayFrame;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 3] = [
        PointerEventKind::Move,
        PointerEventKind::Down,
        PointerEventKind::Up,
    ];

    pub fn dom_name(self) -> &'static str {
        match self {
            PointerEventKind::Move => "pointermove",
            PointerEventKind::Down => "pointerdown",
            PointerEventKind::Up => "pointerup",
        }
    }
}

/// One raw pointer event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    /// `false` for the second and later fingers of a multi-touch gesture.
    pub primary: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait Scheduler {
    fn listen(&mut self, kind: PointerEventKind) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
    /// Ask for `on_frame` to run once on the next frame.
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Surface {
    type Element;

    /// Elements currently opted into the proximity field, queried fresh.
    fn designated(&self) -> Vec<Self::Element>;
    fn bounds(&self, element: &Self::Element) -> ElementBox;
    fn apply(&self, element: &Self::Element, patch: &StylePatch);
    fn paint(&mut self, frame: &OverlayFrame);
    fn clear(&mut self);
}

#[derive(Debug, PartialEq)]
enum Phase {
    Disabled,
    /// Shut down for good; `enable` is a no-op.
    Closed,
    Enabled {
        listeners: SmallVec<[ListenerId; 3]>,
        frame: Option<FrameHandle>,
    },
}

pub struct EffectController<S: Scheduler, R: Surface> {
    engine: EffectEngine,
    scheduler: S,
    surface: R,
    phase: Phase,
    seed: u64,
}

impl<S: Scheduler, R: Surface> EffectController<S, R> {
    /// Build a disabled controller. Call [`enable`](Self::enable) (or
    /// [`set_config`](Self::set_config)) to start it.
    pub fn new(config: EffectConfig, scheduler: S, surface: R, seed: u64) -> Self {
        Self {
            engine: EffectEngine::new(config, seed),
            scheduler,
            surface,
            phase: Phase::Disabled,
            seed,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.phase, Phase::Enabled { .. })
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn enable(&mut self) {
        if self.phase != Phase::Disabled {
            return;
        }
        self.seed = self.seed.wrapping_add(1);
        self.engine.reset(self.seed);
        let listeners = PointerEventKind::ALL
            .iter()
            .map(|kind| self.scheduler.listen(*kind))
            .collect();
        let frame = Some(self.scheduler.request_frame());
        self.phase = Phase::Enabled { listeners, frame };
        log::info!("[fx] enabled");
    }

    pub fn disable(&mut self) {
        if self.is_enabled() {
            self.stop(Phase::Disabled);
        }
    }

    /// Disable and refuse any later `enable`. Used when the host surface goes
    /// away (the overlay canvas is detached).
    pub fn shutdown(&mut self) {
        match self.phase {
            Phase::Closed => {}
            Phase::Disabled => self.phase = Phase::Closed,
            Phase::Enabled { .. } => self.stop(Phase::Closed),
        }
    }

    fn stop(&mut self, next: Phase) {
        let Phase::Enabled { listeners, frame } = std::mem::replace(&mut self.phase, next)
        else {
            return;
        };
        if let Some(handle) = frame {
            self.scheduler.cancel_frame(handle);
        }
        for id in listeners {
            self.scheduler.unlisten(id);
        }
        for element in self.surface.designated() {
            self.surface.apply(&element, &StylePatch::Neutral);
        }
        self.surface.clear();
        self.engine.reset(self.seed);
        log::info!("[fx] disabled");
    }

    /// Replace the configuration, toggling the lifecycle to match `enabled`.
    pub fn set_config(&mut self, config: EffectConfig) {
        let enabled = config.enabled;
        self.engine.config = config.validated();
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Frame callback: sweep, repaint, reschedule. Stale callbacks delivered
    /// after disable are dropped without rescheduling.
    pub fn on_frame(&mut self, now_ms: f64) {
        if !self.is_enabled() {
            return;
        }
        self.engine.sweep(now_ms);
        let frame = self.engine.overlay(now_ms);
        self.surface.paint(&frame);
        let next = self.scheduler.request_frame();
        if let Phase::Enabled { frame, .. } = &mut self.phase {
            *frame = Some(next);
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        if !self.is_enabled() {
            return;
        }
        self.engine.pointer_move(x, y, now_ms);
        for element in self.surface.designated() {
            let bounds = self.surface.bounds(&element);
            let patch = self.engine.patch_for(&bounds, now_ms);
            self.surface.apply(&element, &patch);
        }
    }

    /// Dispatch a host pointer event. Only the primary pointer drives the
    /// effect, so a second finger neither bursts nor reads as a jump.
    pub fn on_pointer_event(&mut self, input: PointerInput, now_ms: f64) {
        if !input.primary {
            return;
        }
        match input.kind {
            PointerEventKind::Move => self.on_pointer_move(input.x, input.y, now_ms),
            PointerEventKind::Down => self.on_pointer_down(input.x, input.y, now_ms),
            PointerEventKind::Up => self.on_pointer_up(),
        }
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32, now_ms: f64) {
        if self.is_enabled() {
            self.engine.pointer_down(x, y, now_ms);
        }
    }

    pub fn on_pointer_up(&mut self) {
        if self.is_enabled() {
            self.engine.pointer_up();
        }
    }

    pub fn engine(&self) -> &EffectEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }
}

impl<S: Scheduler, R: Surface> Drop for EffectController<S, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
