//! Proximity field: how strongly a designated element reacts to the pointer.
//!
//! Every patch is a pure function of the pointer position, the element's
//! bounds at query time and the clock. Nothing is cached per element.

use crate::config::EffectConfig;
use crate::constants::*;
use glam::Vec2;

/// Element bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldTransform {
    pub translate: Vec2,
    pub rotate_deg: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalFilter {
    pub hue_rotate_deg: f32,
    pub brightness: f32,
}

/// Desired visual state of one designated element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StylePatch {
    /// Outside the field: transform and filter cleared.
    Neutral,
    Active {
        transform: FieldTransform,
        /// `None` clears any filter left from a previous pass.
        filter: Option<ThermalFilter>,
    },
}

impl StylePatch {
    pub fn is_neutral(&self) -> bool {
        matches!(self, StylePatch::Neutral)
    }
}

/// `1 - distance / radius`, clamped to `[0, 1]`. Zero radius yields zero.
#[inline]
pub fn field_intensity(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

pub fn field_patch(
    pointer: Vec2,
    bounds: &ElementBox,
    now_ms: f64,
    config: &EffectConfig,
) -> StylePatch {
    let center = bounds.center();
    let distance = pointer.distance(center);
    if distance.is_nan() || distance >= config.magnetic_radius {
        return StylePatch::Neutral;
    }
    let intensity = field_intensity(distance, config.magnetic_radius);
    let wobble = (now_ms * FIELD_WOBBLE_FREQ).sin() as f32;
    let transform = FieldTransform {
        translate: (pointer - center) * intensity * FIELD_PULL_GAIN,
        rotate_deg: wobble * intensity * FIELD_WOBBLE_DEG,
        scale: 1.0 + intensity * FIELD_SCALE_GAIN,
    };
    let filter = (distance < config.thermal_radius).then(|| ThermalFilter {
        hue_rotate_deg: THERMAL_HUE_EDGE_DEG - intensity * THERMAL_HUE_SPAN_DEG,
        brightness: 1.0 + intensity * THERMAL_BRIGHTNESS_GAIN,
    });
    StylePatch::Active { transform, filter }
}
