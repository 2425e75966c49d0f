use crate::config::EffectConfig;
use crate::constants::*;
use crate::field::{field_patch, ElementBox, StylePatch};
use crate::overlay::OverlayFrame;
use crate::particle::{emission_threshold_ms, trail_intensity, Particle, ParticleKind};
use crate::pointer::PointerTracker;
use crate::trail::TrailStore;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Result of one sweep pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub trimmed: usize,
}

/// Pointer-driven effect state: tracker, trail store, press intensity and the
/// particle id counter. All state is owned here and reset on enable.
pub struct EffectEngine {
    pub config: EffectConfig,
    tracker: PointerTracker,
    trails: TrailStore,
    press_intensity: f32,
    next_id: u64,
    last_emit_ms: f64,
    rng: StdRng,
}

impl EffectEngine {
    pub fn new(config: EffectConfig, seed: u64) -> Self {
        Self {
            config: config.validated(),
            tracker: PointerTracker::new(),
            trails: TrailStore::new(),
            press_intensity: 0.0,
            next_id: 0,
            last_emit_ms: f64::NEG_INFINITY,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Drop all transient state. The id counter restarts at zero.
    pub fn reset(&mut self, seed: u64) {
        self.tracker.reset();
        self.trails.clear();
        self.press_intensity = 0.0;
        self.next_id = 0;
        self.last_emit_ms = f64::NEG_INFINITY;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Track a pointer move and emit a trail particle when the speed-dependent
    /// cadence allows. Returns the event-to-event velocity.
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> f32 {
        let velocity = self.tracker.record(x, y, now_ms);
        if now_ms - self.last_emit_ms > emission_threshold_ms(velocity) {
            let particle = Particle {
                id: self.take_id(),
                position: self.tracker.position(),
                spawned_at_ms: now_ms,
                kind: ParticleKind::classify(velocity, self.tracker.pressed()),
                intensity: trail_intensity(velocity),
            };
            self.trails.push_bounded(particle, self.config.max_particles);
            self.last_emit_ms = now_ms;
        }
        velocity
    }

    /// Press at `(x, y)`: raise the press intensity and emit a ring of sparks
    /// around the press position. Returns the ids of the burst.
    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) -> Vec<u64> {
        self.tracker.record(x, y, now_ms);
        self.tracker.set_pressed(true);
        self.press_intensity = 1.0;
        let center = self.tracker.position();
        let burst: Vec<Particle> = (0..BURST_SIZE)
            .map(|i| {
                let angle = i as f32 / BURST_SIZE as f32 * TAU;
                let radius = self.rng.gen_range(BURST_RADIUS_MIN..BURST_RADIUS_MAX);
                Particle {
                    id: self.take_id(),
                    position: center + Vec2::from_angle(angle) * radius,
                    spawned_at_ms: now_ms,
                    kind: ParticleKind::Sparks,
                    intensity: self
                        .rng
                        .gen_range(BURST_INTENSITY_MIN..=BURST_INTENSITY_MAX),
                }
            })
            .collect();
        let ids = burst.iter().map(|p| p.id).collect();
        self.trails.extend_unbounded(burst);
        ids
    }

    pub fn pointer_up(&mut self) {
        self.tracker.set_pressed(false);
        self.press_intensity = 0.0;
    }

    /// Age out expired particles, restore the capacity bound and decay the
    /// press intensity. Running it twice at the same instant is a no-op the
    /// second time apart from the decay.
    pub fn sweep(&mut self, now_ms: f64) -> SweepReport {
        let expired = self.trails.retain_live(now_ms);
        let trimmed = self.trails.trim_to(self.config.max_particles);
        self.press_intensity *= PRESS_DECAY_PER_TICK;
        if self.press_intensity < PRESS_SNAP_TO_ZERO {
            self.press_intensity = 0.0;
        }
        SweepReport { expired, trimmed }
    }

    /// Patch for one designated element at the current pointer position.
    pub fn patch_for(&self, bounds: &ElementBox, now_ms: f64) -> StylePatch {
        field_patch(self.tracker.position(), bounds, now_ms, &self.config)
    }

    pub fn overlay(&self, now_ms: f64) -> OverlayFrame {
        OverlayFrame::build(
            self.tracker.position(),
            self.press_intensity,
            self.config.magnetic_radius,
            self.config.thermal_radius,
            self.trails.iter().copied(),
            now_ms,
        )
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.trails.iter()
    }

    pub fn particle_count(&self) -> usize {
        self.trails.len()
    }

    pub fn press_intensity(&self) -> f32 {
        self.press_intensity
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.tracker
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
