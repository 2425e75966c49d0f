// Tuning constants for the pointer field effect. Times are milliseconds,
// distances are CSS pixels.

// Configuration defaults
pub const DEFAULT_MAGNETIC_RADIUS: f32 = 200.0;
pub const DEFAULT_THERMAL_RADIUS: f32 = 150.0;
pub const DEFAULT_MAX_PARTICLES: usize = 12;

// Trail emission cadence: threshold = BASE - min(velocity * SCALE, BASE - FLOOR)
pub const EMIT_BASE_INTERVAL_MS: f64 = 50.0;
pub const EMIT_FLOOR_INTERVAL_MS: f64 = 5.0;
pub const EMIT_VELOCITY_SCALE: f64 = 2.0;

// Category thresholds (pixels per event)
pub const SPARKS_VELOCITY: f32 = 50.0;
pub const DEBRIS_VELOCITY: f32 = 20.0;

// Trail intensity = min(velocity / INTENSITY_VELOCITY_DIVISOR, 1)
pub const INTENSITY_VELOCITY_DIVISOR: f32 = 100.0;

// Press burst ring
pub const BURST_SIZE: usize = 8;
pub const BURST_RADIUS_MIN: f32 = 30.0;
pub const BURST_RADIUS_MAX: f32 = 50.0;
pub const BURST_INTENSITY_MIN: f32 = 0.8;
pub const BURST_INTENSITY_MAX: f32 = 1.0;

// Lifecycle
pub const PARTICLE_TTL_MS: f64 = 2000.0;
pub const PRESS_DECAY_PER_TICK: f32 = 0.95;
pub const PRESS_SNAP_TO_ZERO: f32 = 1e-3;

// Rolling pointer history used for velocity estimation
pub const POINTER_HISTORY_LEN: usize = 8;

// Proximity field transform gains
pub const FIELD_PULL_GAIN: f32 = 0.1;
pub const FIELD_WOBBLE_FREQ: f64 = 0.01; // radians per ms
pub const FIELD_WOBBLE_DEG: f32 = 2.0;
pub const FIELD_SCALE_GAIN: f32 = 0.05;

// Thermal filter: hue swings from +20deg (edge) to -20deg (centre)
pub const THERMAL_HUE_EDGE_DEG: f32 = 20.0;
pub const THERMAL_HUE_SPAN_DEG: f32 = 40.0;
pub const THERMAL_BRIGHTNESS_GAIN: f32 = 0.2;

// Overlay decoration
pub const TRAIL_BASE_SIZE: f32 = 4.0;
pub const TRAIL_SIZE_GAIN: f32 = 8.0;
pub const TRAIL_ALPHA_GAIN: f32 = 0.8;
pub const TRAIL_SPIN_DEG_PER_MS: f64 = 0.5;
pub const CURSOR_SPIN_DEG_PER_MS: f64 = 0.1;
pub const CURSOR_GLOW_SIZE: f32 = 32.0;
pub const CURSOR_BLUR_GAIN: f32 = 2.0;

// Trail motion: the curve runs for (2 - intensity) seconds, eased out
pub const TRAIL_MOTION_BASE_MS: f64 = 2000.0;
pub const TRAIL_MOTION_INTENSITY_MS: f64 = 1000.0;
pub const EASE_OUT_X2: f32 = 0.58; // cubic-bezier(0, 0, 0.58, 1)

// Ring breathing
pub const MAGNETIC_PULSE_PERIOD_MS: f64 = 3000.0;
pub const MAGNETIC_PULSE_SCALE: f32 = 0.1;
pub const THERMAL_SHIMMER_PERIOD_MS: f64 = 2000.0;
pub const THERMAL_SHIMMER_SCALE: f32 = 0.2;

// Background grid that drifts with the pointer
pub const GRID_CELL: f32 = 50.0;
pub const GRID_DRIFT_FREQ: f32 = 0.01;
pub const GRID_DRIFT_PX: f32 = 2.0;
pub const GRID_LAYER_ALPHA: f32 = 0.2;
pub const GRID_STROKE_ALPHA: f32 = 0.3;
pub const GRID_STROKE_WIDTH: f32 = 0.5;

// Palette (sRGB 0..255)
pub const MAGNETIC_RGB: [u8; 3] = [107, 68, 35];
pub const THERMAL_RGB: [u8; 3] = [255, 69, 0];
pub const DEBRIS_RGB: [u8; 3] = [93, 64, 55];
pub const SPARKS_RGB: [u8; 3] = [255, 140, 0];
pub const GLOW_MID_RGB: [u8; 3] = [139, 69, 19];
pub const GLOW_EDGE_RGB: [u8; 3] = [160, 82, 45];
