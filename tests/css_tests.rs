// Host-side tests for CSS formatting of style patches.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod css {
    include!("../src/css.rs");
}

use css::*;
use fx_core::{FieldTransform, Rgba, StylePatch, ThermalFilter};
use glam::Vec2;

#[test]
fn neutral_patch_clears_both_properties() {
    let (t, f) = patch_css(&StylePatch::Neutral);
    assert!(t.is_empty());
    assert!(f.is_empty());
}

#[test]
fn active_patch_formats_transform_and_filter() {
    let patch = StylePatch::Active {
        transform: FieldTransform {
            translate: Vec2::new(-5.0, 2.5),
            rotate_deg: 1.0,
            scale: 1.025,
        },
        filter: Some(ThermalFilter {
            hue_rotate_deg: 0.0,
            brightness: 1.1,
        }),
    };
    let (t, f) = patch_css(&patch);
    assert_eq!(t, "translate(-5.00px, 2.50px) rotate(1.00deg) scale(1.0250)");
    assert_eq!(f, "hue-rotate(0.00deg) brightness(1.100)");
}

#[test]
fn active_patch_without_filter_clears_filter() {
    let patch = StylePatch::Active {
        transform: FieldTransform {
            translate: Vec2::ZERO,
            rotate_deg: 0.0,
            scale: 1.0,
        },
        filter: None,
    };
    let (t, f) = patch_css(&patch);
    assert!(t.starts_with("translate("));
    assert!(f.is_empty());
}

#[test]
fn rgba_clamps_alpha() {
    assert_eq!(rgba_with([255, 140, 0], 0.8), "rgba(255, 140, 0, 0.800)");
    assert_eq!(
        rgba(Rgba {
            rgb: [1, 2, 3],
            alpha: 4.0
        }),
        "rgba(1, 2, 3, 1.000)"
    );
}

#[test]
fn blur_filter_is_none_at_rest() {
    assert_eq!(blur_filter(0.0), "none");
    assert_eq!(blur_filter(2.0), "blur(2.00px)");
    assert_eq!(blur_filter(7.25), "blur(7.25px)");
}

#[test]
fn html_and_svg_elements_take_inline_styles() {
    assert_eq!(style_host(Some(XHTML_NS)), Some(StyleHost::Html));
    assert_eq!(style_host(Some(SVG_NS)), Some(StyleHost::Svg));
    assert_eq!(style_host(Some("http://www.w3.org/1998/Math/MathML")), None);
    assert_eq!(style_host(None), None);
}
