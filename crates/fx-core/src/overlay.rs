//! Per-frame view model of the decorative overlay. The renderer owns the
//! drawing; this module only decides what to draw.

use crate::constants::*;
use crate::particle::{MarkerShape, Particle, ParticleKind, TrailMotion};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

/// One stop of a radial gradient, `offset` in `[0, 1]` from the centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorGlow {
    pub position: Vec2,
    pub size: f32,
    pub scale: f32,
    pub alpha: f32,
    pub shadow_blur: f32,
    pub shadow_alpha: f32,
    pub blur_px: f32,
    pub spin_deg: f32,
    pub gradient: [GradientStop; 4],
}

impl CursorGlow {
    fn gradient(press: f32) -> [GradientStop; 4] {
        let stop = |offset, rgb, alpha| GradientStop {
            offset,
            color: Rgba { rgb, alpha },
        };
        [
            stop(0.0, MAGNETIC_RGB, 0.6 + press * 0.4),
            stop(0.3, GLOW_MID_RGB, 0.4 + press * 0.3),
            stop(0.6, GLOW_EDGE_RGB, 0.2 + press * 0.2),
            stop(1.0, GLOW_EDGE_RGB, 0.0),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldRing {
    pub center: Vec2,
    pub diameter: f32,
    pub color: Rgba,
    /// Breathing multiplier on the diameter.
    pub scale: f32,
    /// Breathing multiplier on the colour's alpha.
    pub opacity: f32,
}

/// Eased breathing phase: 0 at the start of each period, 1 half way through.
#[inline]
pub fn pulse_phase(now_ms: f64, period_ms: f64) -> f32 {
    let turn = (now_ms / period_ms).rem_euclid(1.0);
    (0.5 - 0.5 * (std::f64::consts::TAU * turn).cos()) as f32
}

/// Square grid under the overlay, nudged a couple of pixels by the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayer {
    pub cell: f32,
    pub offset: Vec2,
    pub stroke: Rgba,
    pub line_width: f32,
    pub layer_alpha: f32,
}

impl GridLayer {
    pub fn following(pointer: Vec2) -> Self {
        Self {
            cell: GRID_CELL,
            offset: Vec2::new(
                (pointer.x * GRID_DRIFT_FREQ).sin() * GRID_DRIFT_PX,
                (pointer.y * GRID_DRIFT_FREQ).cos() * GRID_DRIFT_PX,
            ),
            stroke: Rgba {
                rgb: MAGNETIC_RGB,
                alpha: GRID_STROKE_ALPHA,
            },
            line_width: GRID_STROKE_WIDTH,
            layer_alpha: GRID_LAYER_ALPHA,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailMarker {
    pub id: u64,
    pub kind: ParticleKind,
    pub position: Vec2,
    pub size: f32,
    /// Resting scale, equal to the particle's intensity.
    pub scale: f32,
    pub color: Rgba,
    pub opacity: f32,
    pub rotate_deg: f32,
    pub shape: MarkerShape,
    /// Kind-specific fade curve, applied on top of the fields above.
    pub motion: TrailMotion,
}

impl TrailMarker {
    pub fn from_particle(particle: &Particle, now_ms: f64) -> Self {
        let age = particle.age_ms(now_ms);
        Self {
            id: particle.id,
            kind: particle.kind,
            position: particle.position,
            size: TRAIL_BASE_SIZE + particle.intensity * TRAIL_SIZE_GAIN,
            color: Rgba {
                rgb: particle.kind.rgb(),
                alpha: particle.intensity * TRAIL_ALPHA_GAIN,
            },
            opacity: (1.0 - age / PARTICLE_TTL_MS).max(0.0) as f32,
            rotate_deg: (age * TRAIL_SPIN_DEG_PER_MS) as f32,
            scale: particle.intensity,
            shape: particle.kind.shape(),
            motion: particle.kind.motion(particle.intensity, age),
        }
    }
}

/// Everything the paint surface needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    pub cursor: CursorGlow,
    pub magnetic_ring: FieldRing,
    pub thermal_halo: FieldRing,
    pub grid: GridLayer,
    /// Construction lines through the pointer.
    pub guides: Vec2,
    pub trails: Vec<TrailMarker>,
}

impl OverlayFrame {
    pub fn build(
        pointer: Vec2,
        press: f32,
        magnetic_radius: f32,
        thermal_radius: f32,
        particles: impl Iterator<Item = Particle>,
        now_ms: f64,
    ) -> Self {
        let spin = ((now_ms * CURSOR_SPIN_DEG_PER_MS) % 360.0) as f32;
        let magnetic = pulse_phase(now_ms, MAGNETIC_PULSE_PERIOD_MS);
        let thermal = pulse_phase(now_ms, THERMAL_SHIMMER_PERIOD_MS);
        Self {
            cursor: CursorGlow {
                position: pointer,
                size: CURSOR_GLOW_SIZE,
                scale: 1.0 + press * 0.5,
                alpha: 0.6 + press * 0.4,
                shadow_blur: 20.0 + press * 30.0,
                shadow_alpha: 0.3 + press * 0.5,
                blur_px: press * CURSOR_BLUR_GAIN,
                spin_deg: spin,
                gradient: CursorGlow::gradient(press),
            },
            magnetic_ring: FieldRing {
                center: pointer,
                diameter: magnetic_radius,
                color: Rgba {
                    rgb: MAGNETIC_RGB,
                    alpha: 0.1 + press * 0.2,
                },
                scale: 1.0 + magnetic * MAGNETIC_PULSE_SCALE,
                opacity: 0.1 + magnetic * 0.2,
            },
            thermal_halo: FieldRing {
                center: pointer,
                diameter: thermal_radius,
                color: Rgba {
                    rgb: THERMAL_RGB,
                    alpha: 0.05 + press * 0.1,
                },
                scale: 1.0 + thermal * THERMAL_SHIMMER_SCALE,
                opacity: 1.0,
            },
            grid: GridLayer::following(pointer),
            guides: pointer,
            trails: particles
                .map(|p| TrailMarker::from_particle(&p, now_ms))
                .collect(),
        }
    }
}
