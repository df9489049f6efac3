use crate::config::model::DiagramConfig;
use crate::foundation::core::Point;
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::layout::solver::StackLayout;
use crate::render::painter::Painter;

// Design pixels.
const CLEARANCE: f64 = 1.0;
const TIP_INSET: f64 = 1.0;
const SHAFT_WIDTH: f64 = 5.0 / 3.0;
const HEAD_LENGTH: f64 = 6.0;
const HEAD_HALF_WIDTH: f64 = 4.0;

/// Geometry of the arrow joining card `src` to card `src + 1`, in working pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorGeometry {
    pub shaft_from: Point,
    pub shaft_to: Point,
    pub shaft_width: f64,
    /// Tip, left base corner, right base corner.
    pub head: [Point; 3],
}

/// Compute the arrow below card `src`.
///
/// Only source indices `0..N-1` have a successor; the last card has no connector and is
/// rejected.
pub fn connector_geometry(
    cfg: &DiagramConfig,
    layout: &StackLayout,
    src: usize,
) -> FlowgramResult<ConnectorGeometry> {
    let (Some(from), Some(to)) = (layout.position(src), layout.position(src + 1)) else {
        return Err(FlowgramError::validation(format!(
            "connector source {src} has no following card (cards: {})",
            layout.len()
        )));
    };

    let card_w = cfg.px(f64::from(cfg.card.width));
    let card_h = cfg.px(f64::from(cfg.card.height));
    let x = from.x + (card_w / 2.0).floor();
    let y1 = from.y + card_h + cfg.px(f64::from(cfg.card.shadow_y)) + cfg.px(CLEARANCE);
    let y2 = to.y - cfg.px(CLEARANCE);
    // Shaft overlaps the head by one tip inset.
    let shaft_end = y2 - cfg.px(HEAD_LENGTH);
    let tip = y2 - cfg.px(TIP_INSET);
    let head_base = tip - cfg.px(HEAD_LENGTH);
    let half = cfg.px(HEAD_HALF_WIDTH);

    Ok(ConnectorGeometry {
        shaft_from: Point::new(x, y1),
        shaft_to: Point::new(x, shaft_end.max(y1)),
        shaft_width: cfg.px(SHAFT_WIDTH),
        head: [
            Point::new(x, tip),
            Point::new(x - half, head_base),
            Point::new(x + half, head_base),
        ],
    })
}

/// Draw the downward arrow from card `src` to card `src + 1`.
pub fn draw_connector(
    painter: &mut Painter,
    cfg: &DiagramConfig,
    layout: &StackLayout,
    src: usize,
) -> FlowgramResult<()> {
    let g = connector_geometry(cfg, layout, src)?;
    let ink = cfg.palette.ink.to_rgba();
    painter.line(g.shaft_from, g.shaft_to, g.shaft_width, ink);
    painter.fill_polygon(&g.head, ink);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/connector.rs"]
mod tests;
