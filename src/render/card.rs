use crate::config::model::{DiagramConfig, FontRole, NodeSpec};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::icon::draw_icon;
use crate::render::painter::Painter;
use crate::text::engine::{ShapedText, TextEngine, center_start};

// Offsets inside a card, in design pixels.
const STRIP_LEFT: f64 = 2.0;
const STRIP_RIGHT: f64 = 7.0;
const STRIP_INSET_Y: f64 = 14.0;
const ICON_X: f64 = 30.0;
const ICON_RAISE: f64 = 2.0;
const BADGE_X: f64 = 40.0;
const BADGE_DROP: f64 = 11.0;
const BADGE_RADIUS: f64 = 9.0;
const BADGE_OUTLINE: f64 = 1.0;
const BADGE_TEXT_RAISE: f64 = 1.0;
const TEXT_X: f64 = 60.0;
const TEXT_GAP: f64 = 4.0;
const PILL_RIGHT: f64 = 15.0;
const PILL_RAISE: f64 = 2.0;
const PILL_PAD_X: f64 = 6.0;
const PILL_PAD_TOP: f64 = 3.0;
const PILL_PAD_BOTTOM: f64 = 4.0;
const PILL_RADIUS: f64 = 4.0;

/// Height of the string's own glyph box; whitespace-only strings fall back to the line box.
fn ink_height(text: &ShapedText) -> FlowgramResult<f64> {
    Ok(Painter::text_ink_bounds(text)?
        .map(|r| r.height())
        .unwrap_or_else(|| text.extent().height))
}

/// Draw one complete card with its top-left corner at `pos` (working pixels).
///
/// `index` is 0-based; the badge shows `index + 1`.
pub fn draw_card(
    painter: &mut Painter,
    text: &mut TextEngine,
    cfg: &DiagramConfig,
    pos: Point,
    index: usize,
    node: &NodeSpec,
) -> FlowgramResult<()> {
    let palette = &cfg.palette;
    let ink = palette.ink.to_rgba();
    let phase = node.phase_color.to_rgba();
    let (x, y) = (pos.x, pos.y);
    let w = cfg.px(f64::from(cfg.card.width));
    let h = cfg.px(f64::from(cfg.card.height));
    let radius = cfg.px(f64::from(cfg.card.corner_radius));
    let mid_y = y + (h / 2.0).floor();

    let shadow = Rect::new(x, y, x + w, y + h).with_origin(Point::new(
        x + cfg.px(f64::from(cfg.card.shadow_x)),
        y + cfg.px(f64::from(cfg.card.shadow_y)),
    ));
    painter.fill_rounded_rect(shadow, radius, ink);

    painter.outlined_rounded_rect(
        Rect::new(x, y, x + w, y + h),
        radius,
        palette.card.to_rgba(),
        ink,
        cfg.px(f64::from(cfg.card.border)),
    );

    painter.fill_rect(
        Rect::new(
            x + cfg.px(STRIP_LEFT),
            y + cfg.px(STRIP_INSET_Y),
            x + cfg.px(STRIP_RIGHT),
            y + h - cfg.px(STRIP_INSET_Y),
        ),
        phase,
    );

    let icon_size = cfg
        .card
        .icon_size
        .checked_mul(cfg.scale)
        .ok_or_else(|| FlowgramError::render("icon size overflows at this scale"))?;
    draw_icon(
        painter,
        node.icon,
        Point::new(x + cfg.px(ICON_X), mid_y - cfg.px(ICON_RAISE)),
        icon_size,
    )?;

    let badge = Point::new(x + cfg.px(BADGE_X), mid_y + cfg.px(BADGE_DROP));
    painter.outlined_circle(
        badge,
        cfg.px(BADGE_RADIUS),
        phase,
        ink,
        cfg.px(BADGE_OUTLINE),
    );
    let number = text.shape(&(index + 1).to_string(), FontRole::StepNumber, palette.ink)?;
    let n = number.extent();
    painter.draw_text(
        &number,
        Point::new(
            center_start(badge.x, n.width),
            center_start(badge.y, ink_height(&number)?) - cfg.px(BADGE_TEXT_RAISE),
        ),
    );

    let label = text.shape(&node.label, FontRole::NodeLabel, palette.ink)?;
    let desc = text.shape(&node.description, FontRole::NodeDesc, palette.muted_text)?;
    let (lh, dh) = (ink_height(&label)?, ink_height(&desc)?);
    let gap = cfg.px(TEXT_GAP);
    let text_top = y + ((h - (lh + gap + dh)) / 2.0).floor();
    let text_x = x + cfg.px(TEXT_X);
    painter.draw_text(&label, Point::new(text_x, text_top));
    painter.draw_text(&desc, Point::new(text_x, text_top + lh + gap));

    let tag = text.shape(&node.phase_tag, FontRole::PhaseTag, palette.ink)?;
    let t = tag.extent();
    let th = ink_height(&tag)?;
    let tag_x = (x + w - t.width - cfg.px(PILL_RIGHT)).round();
    let tag_y = y + ((h - th) / 2.0).floor() - cfg.px(PILL_RAISE);
    painter.fill_rounded_rect(
        Rect::new(
            tag_x - cfg.px(PILL_PAD_X),
            tag_y - cfg.px(PILL_PAD_TOP),
            tag_x + t.width + cfg.px(PILL_PAD_X),
            tag_y + th + cfg.px(PILL_PAD_BOTTOM),
        ),
        cfg.px(PILL_RADIUS),
        phase,
    );
    painter.draw_text(&tag, Point::new(tag_x, tag_y));

    Ok(())
}
