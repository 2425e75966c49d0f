use crate::constants::POINTER_HISTORY_LEN;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub time_ms: f64,
}

/// Tracks the pointer position and an event-to-event velocity signal.
///
/// Velocity is the Euclidean distance between consecutive samples, with no
/// time normalization. It is only used as a relative signal for thresholds.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    position: Vec2,
    velocity: f32,
    pressed: bool,
    history: SmallVec<[PointerSample; POINTER_HISTORY_LEN]>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move and return the velocity against the previous position.
    pub fn record(&mut self, x: f32, y: f32, time_ms: f64) -> f32 {
        let next = Vec2::new(x, y);
        self.velocity = velocity_between(self.position, next);
        self.position = next;
        if self.history.len() == POINTER_HISTORY_LEN {
            self.history.remove(0);
        }
        self.history.push(PointerSample {
            position: next,
            time_ms,
        });
        self.velocity
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Most recent samples, oldest first.
    pub fn history(&self) -> &[PointerSample] {
        &self.history
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[inline]
pub fn velocity_between(prev: Vec2, next: Vec2) -> f32 {
    prev.distance(next)
}
