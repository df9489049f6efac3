use super::*;
use crate::config::model::FontFaces;

const BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
const REGULAR: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn setup() -> Option<(DiagramConfig, TextEngine)> {
    if !std::path::Path::new(BOLD).is_file() || !std::path::Path::new(REGULAR).is_file() {
        return None;
    }
    let mut cfg = DiagramConfig::default();
    cfg.fonts = FontFaces {
        bold: BOLD.into(),
        medium: REGULAR.into(),
    };
    cfg.scale = 1;
    let text = TextEngine::load(&cfg.fonts, cfg.typography, cfg.scale).unwrap();
    Some((cfg, text))
}

fn render(cfg: &DiagramConfig, text: &mut TextEngine) -> image::RgbaImage {
    let mut painter = Painter::new(cfg.canvas.width, cfg.canvas.height).unwrap();
    painter.clear(cfg.palette.background.to_rgba());
    draw_title(&mut painter, text, cfg).unwrap();
    draw_footer(&mut painter, text, cfg).unwrap();
    painter.finish_rgba().unwrap()
}

/// Leftmost and rightmost columns in `rows` holding a pixel accepted by `hit`.
fn column_bounds(
    img: &image::RgbaImage,
    rows: std::ops::Range<u32>,
    hit: impl Fn([u8; 4]) -> bool,
) -> Option<(u32, u32)> {
    let mut bounds: Option<(u32, u32)> = None;
    for y in rows {
        for x in 0..img.width() {
            if hit(img.get_pixel(x, y).0) {
                bounds = Some(match bounds {
                    None => (x, x),
                    Some((l, r)) => (l.min(x), r.max(x)),
                });
            }
        }
    }
    bounds
}

fn differs_from(bg: [u8; 4]) -> impl Fn([u8; 4]) -> bool {
    move |p| (0..3).any(|c| p[c].abs_diff(bg[c]) > 40)
}

#[test]
fn title_block_is_horizontally_centered() {
    let Some((cfg, mut text)) = setup() else {
        return;
    };
    let img = render(&cfg, &mut text);
    let top = cfg.title.top as u32;
    let (left, right) = column_bounds(
        &img,
        top..top + 44,
        differs_from(cfg.palette.background.to_rgba()),
    )
    .unwrap();

    let ink_center = f64::from(left + right + 1) / 2.0;
    let canvas_center = f64::from(cfg.canvas.width) / 2.0;
    assert!(
        (ink_center - canvas_center).abs() <= 1.5,
        "ink spans {left}..={right}, center {ink_center}"
    );
}

#[test]
fn accent_segment_starts_one_space_after_the_primary() {
    let Some((cfg, mut text)) = setup() else {
        return;
    };
    let space = text.measure("Transcript ", FontRole::Title).unwrap().width
        - text.measure("Transcript", FontRole::Title).unwrap().width;
    assert!(space > 5.0);

    let img = render(&cfg, &mut text);
    let top = cfg.title.top as u32;
    let ink = cfg.palette.ink;
    let accent = cfg.palette.accent;
    let (_, primary_end) = column_bounds(&img, top..top + 44, |p| {
        (0..3).all(|c| p[c].abs_diff(ink.to_array()[c]) < 40)
    })
    .unwrap();
    let (accent_start, _) = column_bounds(&img, top..top + 44, |p| {
        (0..3).all(|c| p[c].abs_diff(accent.to_array()[c]) < 40)
    })
    .unwrap();

    let gap = f64::from(accent_start) - f64::from(primary_end);
    assert!(
        gap >= 0.75 * space,
        "gap between segments is {gap}px, space advance is {space}px"
    );
    assert!(gap <= 2.0 * space);
}

#[test]
fn footer_text_is_horizontally_centered() {
    let Some((cfg, mut text)) = setup() else {
        return;
    };
    let img = render(&cfg, &mut text);
    let h = cfg.canvas.height;
    let (left, right) = column_bounds(
        &img,
        h - 43..h - 28,
        differs_from(cfg.palette.background.to_rgba()),
    )
    .unwrap();

    let ink_center = f64::from(left + right + 1) / 2.0;
    let canvas_center = f64::from(cfg.canvas.width) / 2.0;
    assert!(
        (ink_center - canvas_center).abs() <= 1.5,
        "footer ink spans {left}..={right}, center {ink_center}"
    );
}
