//! Trail particles: short-lived decorative markers left behind the pointer.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Magnetic,
    Thermal,
    Debris,
    Sparks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Round,
    Square,
}

impl ParticleKind {
    /// Category for a move-emitted particle. First match wins: sparks, debris,
    /// thermal (button held), magnetic.
    pub fn classify(velocity: f32, pressed: bool) -> Self {
        if velocity > SPARKS_VELOCITY {
            ParticleKind::Sparks
        } else if velocity > DEBRIS_VELOCITY {
            ParticleKind::Debris
        } else if pressed {
            ParticleKind::Thermal
        } else {
            ParticleKind::Magnetic
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            ParticleKind::Magnetic => MAGNETIC_RGB,
            ParticleKind::Thermal => THERMAL_RGB,
            ParticleKind::Debris => DEBRIS_RGB,
            ParticleKind::Sparks => SPARKS_RGB,
        }
    }

    pub fn shape(self) -> MarkerShape {
        match self {
            ParticleKind::Debris => MarkerShape::Square,
            _ => MarkerShape::Round,
        }
    }

    /// Where the kind's fade-out curve ends. Every curve starts at identity
    /// with full opacity and ends fully transparent.
    fn motion_end(self) -> TrailMotion {
        let end = TrailMotion {
            opacity: 0.0,
            ..TrailMotion::IDENTITY
        };
        match self {
            ParticleKind::Magnetic => TrailMotion {
                scale: 0.1,
                offset_y: -20.0,
                ..end
            },
            ParticleKind::Debris => TrailMotion {
                scale: 0.3,
                offset_y: 50.0,
                rotate_deg: 360.0,
                ..end
            },
            ParticleKind::Sparks => TrailMotion {
                scale: 2.0,
                offset_y: -30.0,
                ..end
            },
            ParticleKind::Thermal => TrailMotion {
                scale: 3.0,
                blur_px: 10.0,
                ..end
            },
        }
    }

    /// Motion state `age_ms` into the fade of a particle with `intensity`.
    /// Stronger particles run a shorter curve; past the end the final state
    /// holds.
    pub fn motion(self, intensity: f32, age_ms: f64) -> TrailMotion {
        let duration = motion_duration_ms(intensity);
        let t = (age_ms / duration).clamp(0.0, 1.0) as f32;
        TrailMotion::IDENTITY.lerp(self.motion_end(), ease_out(t))
    }
}

/// Transform and fade a trail marker carries on top of its resting look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailMotion {
    pub scale: f32,
    /// Vertical drift in CSS pixels, positive downwards.
    pub offset_y: f32,
    pub rotate_deg: f32,
    pub blur_px: f32,
    pub opacity: f32,
}

impl TrailMotion {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_y: 0.0,
        rotate_deg: 0.0,
        blur_px: 0.0,
        opacity: 1.0,
    };

    fn lerp(self, to: Self, k: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * k;
        Self {
            scale: mix(self.scale, to.scale),
            offset_y: mix(self.offset_y, to.offset_y),
            rotate_deg: mix(self.rotate_deg, to.rotate_deg),
            blur_px: mix(self.blur_px, to.blur_px),
            opacity: mix(self.opacity, to.opacity),
        }
    }
}

/// Length of a particle's fade curve: 2 s at zero intensity, 1 s at full.
#[inline]
pub fn motion_duration_ms(intensity: f32) -> f64 {
    TRAIL_MOTION_BASE_MS - intensity.clamp(0.0, 1.0) as f64 * TRAIL_MOTION_INTENSITY_MS
}

/// CSS `ease-out` (cubic-bezier(0, 0, 0.58, 1)) for `t` in `[0, 1]`.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let bezier = |s: f32, p1: f32, p2: f32| {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    };
    // x(s) is monotonic, so bisect for the parameter that lands on t.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..24 {
        let mid = 0.5 * (lo + hi);
        if bezier(mid, 0.0, EASE_OUT_X2) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier(0.5 * (lo + hi), 0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub position: Vec2,
    pub spawned_at_ms: f64,
    pub kind: ParticleKind,
    pub intensity: f32,
}

impl Particle {
    /// Age at `now_ms`, never negative even if the clock is sampled early.
    #[inline]
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.spawned_at_ms).max(0.0)
    }

    #[inline]
    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.age_ms(now_ms) >= PARTICLE_TTL_MS
    }
}

/// Intensity of a move-emitted trail particle.
#[inline]
pub fn trail_intensity(velocity: f32) -> f32 {
    (velocity / INTENSITY_VELOCITY_DIVISOR).clamp(0.0, 1.0)
}

/// Milliseconds that must pass since the last emission before the next one.
#[inline]
pub fn emission_threshold_ms(velocity: f32) -> f64 {
    let span = EMIT_BASE_INTERVAL_MS - EMIT_FLOOR_INTERVAL_MS;
    EMIT_BASE_INTERVAL_MS - (velocity as f64 * EMIT_VELOCITY_SCALE).clamp(0.0, span)
}
