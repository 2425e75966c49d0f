// Host-side tests for the enable/disable lifecycle using recording fakes for
// the scheduler and the surface.

use fx_core::{
    EffectConfig, EffectController, ElementBox, FrameHandle, ListenerId, OverlayFrame,
    PointerEventKind, PointerInput, Scheduler, StylePatch, Surface,
};
use fx_core::constants::BURST_SIZE;
use glam::Vec2;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Default)]
struct Ledger {
    listeners: HashMap<ListenerId, PointerEventKind>,
    frames: HashSet<FrameHandle>,
    next_id: u32,
    frames_requested: usize,
}

#[derive(Clone, Default)]
struct FakeScheduler(Rc<RefCell<Ledger>>);

impl FakeScheduler {
    fn live_listeners(&self) -> usize {
        self.0.borrow().listeners.len()
    }
    fn pending_frames(&self) -> usize {
        self.0.borrow().frames.len()
    }
    /// Deliver the pending frame, as the host would on the next vsync.
    fn take_frame(&self) -> Option<FrameHandle> {
        let mut l = self.0.borrow_mut();
        let h = l.frames.iter().next().copied();
        if let Some(h) = h {
            l.frames.remove(&h);
        }
        h
    }
}

impl Scheduler for FakeScheduler {
    fn listen(&mut self, kind: PointerEventKind) -> ListenerId {
        let mut l = self.0.borrow_mut();
        l.next_id += 1;
        let id = ListenerId(l.next_id);
        l.listeners.insert(id, kind);
        id
    }
    fn unlisten(&mut self, id: ListenerId) {
        self.0.borrow_mut().listeners.remove(&id);
    }
    fn request_frame(&mut self) -> FrameHandle {
        let mut l = self.0.borrow_mut();
        l.next_id += 1;
        l.frames_requested += 1;
        let h = FrameHandle(l.next_id as i32);
        l.frames.insert(h);
        h
    }
    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().frames.remove(&handle);
    }
}

#[derive(Default)]
struct Page {
    elements: Vec<ElementBox>,
    styles: RefCell<HashMap<usize, StylePatch>>,
    painted: usize,
    cleared: usize,
    last_trails: usize,
}

#[derive(Clone, Default)]
struct FakeSurface(Rc<RefCell<Page>>);

impl Surface for FakeSurface {
    type Element = usize;

    fn designated(&self) -> Vec<usize> {
        (0..self.0.borrow().elements.len()).collect()
    }
    fn bounds(&self, element: &usize) -> ElementBox {
        self.0.borrow().elements[*element]
    }
    fn apply(&self, element: &usize, patch: &StylePatch) {
        self.0.borrow().styles.borrow_mut().insert(*element, *patch);
    }
    fn paint(&mut self, frame: &OverlayFrame) {
        let mut p = self.0.borrow_mut();
        p.painted += 1;
        p.last_trails = frame.trails.len();
    }
    fn clear(&mut self) {
        self.0.borrow_mut().cleared += 1;
    }
}

type Controller = EffectController<FakeScheduler, FakeSurface>;

fn make(config: EffectConfig) -> (Controller, FakeScheduler, FakeSurface) {
    let scheduler = FakeScheduler::default();
    let surface = FakeSurface::default();
    surface.0.borrow_mut().elements = vec![
        ElementBox::new(90.0, 90.0, 20.0, 20.0),
        ElementBox::new(900.0, 900.0, 20.0, 20.0),
    ];
    let controller = Controller::new(config, scheduler.clone(), surface.clone(), 1);
    (controller, scheduler, surface)
}

fn style_of(surface: &FakeSurface, i: usize) -> Option<StylePatch> {
    surface.0.borrow().styles.borrow().get(&i).copied()
}

#[test]
fn starts_disabled_with_nothing_attached() {
    let (c, sched, _) = make(EffectConfig::default());
    assert!(!c.is_enabled());
    assert_eq!(sched.live_listeners(), 0);
    assert_eq!(sched.pending_frames(), 0);
}

#[test]
fn enable_attaches_three_listeners_and_one_frame() {
    let (mut c, sched, _) = make(EffectConfig::default());
    c.enable();
    c.enable();
    assert_eq!(sched.live_listeners(), 3);
    assert_eq!(sched.pending_frames(), 1);
    let kinds: HashSet<_> = sched.0.borrow().listeners.values().copied().collect();
    assert_eq!(kinds, PointerEventKind::ALL.into_iter().collect::<HashSet<_>>());
}

#[test]
fn frame_loop_reschedules_itself_once_per_tick() {
    let (mut c, sched, surface) = make(EffectConfig::default());
    c.enable();
    for i in 1..=5 {
        assert!(sched.take_frame().is_some());
        c.on_frame(i as f64 * 16.0);
        assert_eq!(sched.pending_frames(), 1);
    }
    assert_eq!(surface.0.borrow().painted, 5);
}

#[test]
fn fast_scenario_then_disable_leaves_no_listeners_or_ticks() {
    let (mut c, sched, surface) = make(EffectConfig::default());
    c.enable();

    // 100 high-velocity moves over two seconds, with frames in between.
    for i in 0..100 {
        let now = i as f64 * 20.0;
        let x = if i % 2 == 0 { 0.0 } else { 400.0 };
        c.on_pointer_move(x, 100.0, now);
        if i % 10 == 5 {
            c.on_pointer_down(x, 100.0, now);
            c.on_pointer_up();
        }
        if sched.take_frame().is_some() {
            c.on_frame(now);
        }
        assert!(c.engine().particle_count() <= 12 + 8);
    }
    assert!(c.engine().particle_count() > 0);

    c.disable();
    assert!(!c.is_enabled());
    assert_eq!(sched.live_listeners(), 0);
    assert_eq!(sched.pending_frames(), 0);
    assert_eq!(c.engine().particle_count(), 0);
    assert_eq!(surface.0.borrow().cleared, 1);

    // A stale callback that slipped through must not restart the loop.
    c.on_frame(2016.0);
    assert_eq!(sched.pending_frames(), 0);
}

#[test]
fn disabled_controller_ignores_input() {
    let (mut c, sched, surface) = make(EffectConfig::default());
    c.on_pointer_move(100.0, 100.0, 0.0);
    c.on_pointer_down(100.0, 100.0, 0.0);
    c.on_frame(16.0);
    assert_eq!(c.engine().particle_count(), 0);
    assert_eq!(sched.0.borrow().frames_requested, 0);
    assert_eq!(style_of(&surface, 0), None);
}

#[test]
fn moves_patch_every_designated_element() {
    let (mut c, _, surface) = make(EffectConfig::default());
    c.enable();
    c.on_pointer_move(100.0, 100.0, 0.0);
    assert!(matches!(style_of(&surface, 0), Some(StylePatch::Active { .. })));
    assert_eq!(style_of(&surface, 1), Some(StylePatch::Neutral));

    // Moving away clears the near element on the next pass.
    c.on_pointer_move(600.0, 100.0, 16.0);
    assert_eq!(style_of(&surface, 0), Some(StylePatch::Neutral));
}

#[test]
fn vanished_elements_are_skipped() {
    let (mut c, _, surface) = make(EffectConfig::default());
    c.enable();
    surface.0.borrow_mut().elements.truncate(1);
    c.on_pointer_move(100.0, 100.0, 0.0);
    assert_eq!(style_of(&surface, 1), None);
}

#[test]
fn disable_resets_elements_to_neutral() {
    let (mut c, _, surface) = make(EffectConfig::default());
    c.enable();
    c.on_pointer_move(100.0, 100.0, 0.0);
    c.disable();
    assert_eq!(style_of(&surface, 0), Some(StylePatch::Neutral));
    c.disable();
    assert_eq!(surface.0.borrow().cleared, 1);
}

#[test]
fn reenable_starts_fresh() {
    let (mut c, sched, _) = make(EffectConfig::default());
    c.enable();
    c.on_pointer_down(10.0, 10.0, 0.0);
    c.disable();
    c.enable();
    assert_eq!(c.engine().particle_count(), 0);
    assert_eq!(c.engine().press_intensity(), 0.0);
    assert_eq!(sched.live_listeners(), 3);
    assert_eq!(sched.pending_frames(), 1);
    c.on_pointer_move(5.0, 5.0, 0.0);
    assert_eq!(c.engine().particles().next().map(|p| p.id), Some(0));
}

#[test]
fn set_config_toggles_lifecycle() {
    let (mut c, sched, _) = make(EffectConfig::default());
    c.set_config(EffectConfig::default());
    assert!(c.is_enabled());
    c.set_config(EffectConfig {
        enabled: false,
        magnetic_radius: 300.0,
        ..EffectConfig::default()
    });
    assert!(!c.is_enabled());
    assert_eq!(c.engine().config.magnetic_radius, 300.0);
    assert_eq!(sched.live_listeners(), 0);
    assert_eq!(sched.pending_frames(), 0);
}

#[test]
fn sweep_restores_capacity_on_next_frame() {
    let (mut c, sched, surface) = make(EffectConfig::default());
    c.enable();
    for i in 0..20 {
        c.on_pointer_move(i as f32 * 80.0, 0.0, i as f64 * 10.0);
    }
    c.on_pointer_down(0.0, 0.0, 200.0);
    assert_eq!(c.engine().particle_count(), 20);
    sched.take_frame();
    c.on_frame(216.0);
    assert_eq!(c.engine().particle_count(), 12);
    assert_eq!(surface.0.borrow().last_trails, 12);
}

#[test]
fn dropping_an_enabled_controller_releases_everything() {
    let (mut c, sched, _) = make(EffectConfig::default());
    c.enable();
    drop(c);
    assert_eq!(sched.live_listeners(), 0);
    assert_eq!(sched.pending_frames(), 0);
}

fn event(kind: PointerEventKind, x: f32, y: f32, primary: bool) -> PointerInput {
    PointerInput {
        kind,
        x,
        y,
        primary,
    }
}

#[test]
fn second_finger_press_does_not_burst_again() {
    let (mut c, _, _) = make(EffectConfig::default());
    c.enable();
    // Fill the store with slow primary moves, then put two fingers down in
    // the same frame.
    for i in 0..30 {
        let x = 100.0 + i as f32 * 3.0;
        c.on_pointer_event(event(PointerEventKind::Move, x, 100.0, true), i as f64 * 60.0);
    }
    let max = c.engine().config.max_particles;
    assert_eq!(c.engine().particle_count(), max);
    c.on_pointer_event(event(PointerEventKind::Down, 187.0, 100.0, true), 1800.0);
    c.on_pointer_event(event(PointerEventKind::Down, 400.0, 100.0, false), 1800.0);
    assert_eq!(c.engine().particle_count(), max + BURST_SIZE);
    assert_eq!(c.engine().pointer().position(), Vec2::new(187.0, 100.0));
}

#[test]
fn second_finger_move_is_not_a_pointer_jump() {
    let (mut c, _, _) = make(EffectConfig::default());
    c.enable();
    c.on_pointer_event(event(PointerEventKind::Move, 100.0, 100.0, true), 0.0);
    c.on_pointer_event(event(PointerEventKind::Move, 102.0, 100.0, true), 100.0);
    let velocity = c.engine().pointer().velocity();
    let count = c.engine().particle_count();

    c.on_pointer_event(event(PointerEventKind::Move, 700.0, 100.0, false), 200.0);
    assert_eq!(c.engine().pointer().velocity(), velocity);
    assert_eq!(c.engine().pointer().position(), Vec2::new(102.0, 100.0));
    assert_eq!(c.engine().particle_count(), count);
}

#[test]
fn second_finger_release_keeps_the_press() {
    let (mut c, _, _) = make(EffectConfig::default());
    c.enable();
    c.on_pointer_event(event(PointerEventKind::Down, 100.0, 100.0, true), 0.0);
    c.on_pointer_event(event(PointerEventKind::Up, 400.0, 100.0, false), 10.0);
    assert!(c.engine().pointer().pressed());
    c.on_pointer_event(event(PointerEventKind::Up, 100.0, 100.0, true), 20.0);
    assert!(!c.engine().pointer().pressed());
}

#[test]
fn shutdown_refuses_later_enable() {
    let (mut c, sched, surface) = make(EffectConfig::default());
    c.enable();
    c.shutdown();
    assert!(c.is_closed());
    assert_eq!(sched.live_listeners(), 0);
    assert_eq!(sched.pending_frames(), 0);
    let cleared = surface.0.borrow().cleared;

    c.enable();
    c.set_config(EffectConfig::default());
    assert!(!c.is_enabled());
    assert_eq!(sched.live_listeners(), 0);
    assert_eq!(sched.pending_frames(), 0);
    c.on_pointer_event(event(PointerEventKind::Down, 100.0, 100.0, true), 0.0);
    assert_eq!(c.engine().particle_count(), 0);
    assert_eq!(surface.0.borrow().cleared, cleared);
}

#[test]
fn shutdown_from_disabled_also_closes() {
    let (mut c, sched, _) = make(EffectConfig::default());
    c.shutdown();
    c.shutdown();
    c.enable();
    assert!(c.is_closed());
    assert!(!c.is_enabled());
    assert_eq!(sched.0.borrow().frames_requested, 0);
}
