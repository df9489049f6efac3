//! Static title block and footer.

use crate::config::model::{DiagramConfig, FontRole};
use crate::foundation::core::Point;
use crate::foundation::error::FlowgramResult;
use crate::render::painter::Painter;
use crate::text::engine::{TextEngine, center_start};

// Design pixels.
const SUBTITLE_DROP: f64 = 50.0;
const TITLE_RULE_DROP: f64 = 232.0 / 3.0;
const RULE_MARGIN: f64 = 60.0;
const RULE_WIDTH: f64 = 1.0;
const FOOTER_RULE_FROM_BOTTOM: f64 = 53.0;
const FOOTER_TEXT_FROM_BOTTOM: f64 = 43.0;

fn horizontal_rule(painter: &mut Painter, cfg: &DiagramConfig, y: f64) {
    let w = f64::from(painter.width());
    let margin = cfg.px(RULE_MARGIN);
    painter.line(
        Point::new(margin, y),
        Point::new(w - margin, y),
        cfg.px(RULE_WIDTH),
        cfg.palette.rule.to_rgba(),
    );
}

/// Two-tone title centered as one block, subtitle, and the rule under them.
pub fn draw_title(
    painter: &mut Painter,
    text: &mut TextEngine,
    cfg: &DiagramConfig,
) -> FlowgramResult<()> {
    let center_x = f64::from(painter.width()) / 2.0;
    let top = cfg.px(cfg.title.top);

    let primary = text.shape(&cfg.title.primary, FontRole::Title, cfg.palette.ink)?;
    let accent = text.shape(&cfg.title.accent, FontRole::TitleAccent, cfg.palette.accent)?;
    let w1 = primary.extent().width;
    let x = center_start(center_x, w1 + accent.extent().width);
    painter.draw_text(&primary, Point::new(x, top));
    painter.draw_text(&accent, Point::new(x + w1, top));

    let subtitle = text.shape(&cfg.title.subtitle, FontRole::Subtitle, cfg.palette.muted_text)?;
    painter.draw_text(
        &subtitle,
        Point::new(
            center_start(center_x, subtitle.extent().width),
            top + cfg.px(SUBTITLE_DROP),
        ),
    );

    horizontal_rule(painter, cfg, (top + cfg.px(TITLE_RULE_DROP)).round());
    Ok(())
}

/// Rule plus centered attribution text near the bottom edge.
pub fn draw_footer(
    painter: &mut Painter,
    text: &mut TextEngine,
    cfg: &DiagramConfig,
) -> FlowgramResult<()> {
    let h = f64::from(painter.height());
    horizontal_rule(painter, cfg, h - cfg.px(FOOTER_RULE_FROM_BOTTOM));

    let footer = text.shape(&cfg.footer.text, FontRole::Footer, cfg.palette.muted_text)?;
    painter.draw_text(
        &footer,
        Point::new(
            center_start(f64::from(painter.width()) / 2.0, footer.extent().width),
            h - cfg.px(FOOTER_TEXT_FROM_BOTTOM),
        ),
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/chrome.rs"]
mod tests;
