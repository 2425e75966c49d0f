use fx_core::{Rgba, StylePatch};

pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Which inline-style interface an element exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleHost {
    Html,
    Svg,
}

/// Classify an element by its namespace URI. MathML and foreign XML carry no
/// inline style the field can write.
pub fn style_host(namespace: Option<&str>) -> Option<StyleHost> {
    match namespace {
        Some(XHTML_NS) => Some(StyleHost::Html),
        Some(SVG_NS) => Some(StyleHost::Svg),
        _ => None,
    }
}

/// CSS `transform` and `filter` values for a patch. Empty strings clear the
/// inline property.
pub fn patch_css(patch: &StylePatch) -> (String, String) {
    match patch {
        StylePatch::Neutral => (String::new(), String::new()),
        StylePatch::Active { transform, filter } => {
            let t = format!(
                "translate({:.2}px, {:.2}px) rotate({:.2}deg) scale({:.4})",
                transform.translate.x, transform.translate.y, transform.rotate_deg, transform.scale
            );
            let f = filter
                .map(|f| {
                    format!(
                        "hue-rotate({:.2}deg) brightness({:.3})",
                        f.hue_rotate_deg, f.brightness
                    )
                })
                .unwrap_or_default();
            (t, f)
        }
    }
}

#[inline]
pub fn rgba(color: Rgba) -> String {
    rgba_with(color.rgb, color.alpha)
}

#[inline]
pub fn rgba_with(rgb: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        rgb[0],
        rgb[1],
        rgb[2],
        alpha.clamp(0.0, 1.0)
    )
}

/// Canvas `filter` value for a gaussian blur; `none` when there is nothing to blur.
pub fn blur_filter(px: f32) -> String {
    if px > 0.01 {
        format!("blur({px:.2}px)")
    } else {
        "none".to_string()
    }
}
