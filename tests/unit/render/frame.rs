use super::*;
use crate::config::model::FontFaces;

const BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
const REGULAR: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn small_config() -> Option<DiagramConfig> {
    if !std::path::Path::new(BOLD).is_file() || !std::path::Path::new(REGULAR).is_file() {
        return None;
    }
    let mut cfg = DiagramConfig::default();
    cfg.fonts = FontFaces {
        bold: BOLD.into(),
        medium: REGULAR.into(),
    };
    cfg.scale = 1;
    Some(cfg)
}

#[test]
fn plan_counts_match_visible_nodes() {
    let n = 8;
    for visible in 0..=n + 2 {
        let plan = FramePlan::new(n, visible, true);
        assert_eq!(plan.card_count(), visible.min(n));
        assert_eq!(plan.connector_count(), visible.min(n).saturating_sub(1));

        let plan = FramePlan::new(n, visible, false);
        assert_eq!(plan.card_count(), visible.min(n));
        assert_eq!(plan.connector_count(), 0);
    }
}

#[test]
fn plan_never_requests_a_connector_from_the_last_card() {
    for n in 0..10 {
        for visible in 0..=n + 3 {
            let plan = FramePlan::new(n, visible, true);
            assert!(plan.connectors.clone().all(|src| src + 1 < n));
            assert!(plan.connectors.end <= plan.cards.end);
        }
    }
}

#[test]
fn downsample_flattens_transparency_onto_background() {
    let img = image::RgbaImage::from_pixel(30, 30, image::Rgba([0, 0, 0, 0]));
    let frame = downsample(
        &img,
        Canvas {
            width: 10,
            height: 10,
        },
        Rgb8(250, 243, 227),
    );
    assert_eq!((frame.width, frame.height), (10, 10));
    assert_eq!(frame.data.len(), 10 * 10 * 3);
    assert!(frame.data.chunks_exact(3).all(|p| p == [250, 243, 227]));
}

#[test]
fn downsample_keeps_uniform_opaque_color() {
    let img = image::RgbaImage::from_pixel(30, 30, image::Rgba([12, 200, 99, 255]));
    let frame = downsample(
        &img,
        Canvas {
            width: 10,
            height: 10,
        },
        Rgb8(0, 0, 0),
    );
    assert!(frame.data.chunks_exact(3).all(|p| p == [12, 200, 99]));
}

#[test]
fn rgba_conversion_is_opaque() {
    let frame = FrameRGB {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6],
    };
    let rgba = frame.to_rgba_image().unwrap();
    assert_eq!(rgba.into_raw(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    assert_eq!(frame.to_rgb_image().unwrap().dimensions(), (2, 1));
}

#[test]
fn missing_fonts_fail_before_any_frame() {
    let mut cfg = DiagramConfig::default();
    cfg.fonts = FontFaces {
        bold: "/missing/Bold.ttf".into(),
        medium: "/missing/Medium.ttf".into(),
    };
    let err = FrameComposer::from_config(cfg).err().expect("must fail");
    assert!(matches!(err, FlowgramError::Font { .. }));
}

#[test]
fn compose_is_idempotent() {
    let Some(cfg) = small_config() else {
        return;
    };
    let mut composer = FrameComposer::from_config(cfg).unwrap();
    let a = composer.compose(3, true).unwrap();
    let b = composer.compose(3, true).unwrap();
    assert_eq!(a.width, 800);
    assert_eq!(a.height, 998);
    assert_eq!(a.data, b.data);
}

#[test]
fn revealing_a_card_changes_its_slot_only() {
    let Some(cfg) = small_config() else {
        return;
    };
    let mut composer = FrameComposer::from_config(cfg).unwrap();
    let title_only = composer.compose(0, false).unwrap();
    let one = composer.compose(1, false).unwrap();
    assert_ne!(title_only.data, one.data);

    // Second card's slot stays background until it is revealed.
    let slot = composer.layout().position(1).unwrap();
    let (x, y) = (slot.x as u32 + 100, slot.y as u32 + 30);
    let idx = ((y * one.width + x) * 3) as usize;
    assert_eq!(&one.data[idx..idx + 3], &[250, 243, 227]);

    let two = composer.compose(2, false).unwrap();
    assert_ne!(&two.data[idx..idx + 3], &[250, 243, 227]);
}

#[test]
fn config_errors_are_reported_before_font_errors() {
    let mut cfg = DiagramConfig::default();
    cfg.fonts = FontFaces {
        bold: "/no/such/Bold.ttf".into(),
        medium: "/no/such/Medium.ttf".into(),
    };
    cfg.timing.final_duration_ms = cfg.timing.frame_duration_ms;
    let err = FrameComposer::from_config(cfg).err().expect("must fail");
    assert!(matches!(err, FlowgramError::Validation(_)));
}

#[test]
fn new_still_validates_a_config_with_a_loaded_engine() {
    let Some(cfg) = small_config() else {
        return;
    };
    let text = TextEngine::load(&cfg.fonts, cfg.typography, cfg.scale).unwrap();
    let mut bad = cfg.clone();
    bad.nodes.clear();
    let err = FrameComposer::new(bad, text).err().expect("must fail");
    assert!(matches!(err, FlowgramError::Validation(_)));
}
