use crate::config::model::DiagramConfig;
use crate::foundation::core::Point;
use crate::foundation::error::{FlowgramError, FlowgramResult};

/// Inputs of the vertical card stack, in working pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackParams {
    pub node_count: usize,
    pub card_width: u32,
    pub card_height: u32,
    pub gap: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub title_area_height: u32,
    pub footer_height: u32,
}

impl StackParams {
    /// Scale the design-pixel metrics of `cfg` to the working canvas.
    pub fn from_config(cfg: &DiagramConfig) -> FlowgramResult<Self> {
        let working = cfg.working_canvas()?;
        let s = cfg.scale;
        Ok(Self {
            node_count: cfg.nodes.len(),
            card_width: scale_metric(cfg.card.width, s, "card width")?,
            card_height: scale_metric(cfg.card.height, s, "card height")?,
            gap: scale_metric(cfg.card.gap, s, "card gap")?,
            canvas_width: working.width,
            canvas_height: working.height,
            title_area_height: scale_metric(cfg.bands.title_area_height, s, "title band")?,
            footer_height: scale_metric(cfg.bands.footer_height, s, "footer band")?,
        })
    }

    /// Height left for cards between the title and footer bands.
    pub fn content_height(&self) -> i64 {
        i64::from(self.canvas_height)
            - i64::from(self.title_area_height)
            - i64::from(self.footer_height)
    }

    /// Height of all cards plus the gaps between them.
    pub fn total_cards_height(&self) -> i64 {
        let n = self.node_count as i64;
        if n == 0 {
            return 0;
        }
        n * i64::from(self.card_height) + (n - 1) * i64::from(self.gap)
    }
}

fn scale_metric(design: u32, scale: u32, what: &str) -> FlowgramResult<u32> {
    design.checked_mul(scale).ok_or_else(|| {
        FlowgramError::layout(format!(
            "{what} of {design}px does not fit the working canvas at scale {scale}"
        ))
    })
}

/// Top-left corners of every card, in node order.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayout {
    params: StackParams,
    positions: Vec<Point>,
}

impl StackLayout {
    pub fn params(&self) -> &StackParams {
        &self.params
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, idx: usize) -> Option<Point> {
        self.positions.get(idx).copied()
    }

    /// Vertical start of the first card.
    pub fn start_y(&self) -> f64 {
        self.positions
            .first()
            .map(|p| p.y)
            .unwrap_or(f64::from(self.params.title_area_height))
    }
}

/// Center the card block horizontally on the canvas and vertically within the content band.
///
/// Fails when the cards cannot fit instead of letting them overlap the title or footer.
pub fn solve_stack(params: StackParams) -> FlowgramResult<StackLayout> {
    let content_h = params.content_height();
    if content_h < 0 {
        return Err(FlowgramError::layout(format!(
            "title ({}px) and footer ({}px) bands exceed canvas height {}px",
            params.title_area_height, params.footer_height, params.canvas_height
        )));
    }
    let total_h = params.total_cards_height();
    if content_h < total_h {
        return Err(FlowgramError::layout(format!(
            "{} cards need {total_h}px but the content band is {content_h}px",
            params.node_count
        )));
    }
    if params.card_width > params.canvas_width {
        return Err(FlowgramError::layout(format!(
            "card width {}px exceeds canvas width {}px",
            params.card_width, params.canvas_width
        )));
    }

    let start_x = i64::from((params.canvas_width - params.card_width) / 2);
    let start_y = i64::from(params.title_area_height) + (content_h - total_h) / 2;
    let step = i64::from(params.card_height) + i64::from(params.gap);

    let positions = (0..params.node_count as i64)
        .map(|i| Point::new(start_x as f64, (start_y + i * step) as f64))
        .collect();

    Ok(StackLayout { params, positions })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
