use std::ops::Range;

use image::imageops::FilterType;

use crate::config::model::DiagramConfig;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::layout::solver::{StackLayout, StackParams, solve_stack};
use crate::render::card::draw_card;
use crate::render::chrome::{draw_footer, draw_title};
use crate::render::connector::draw_connector;
use crate::render::painter::Painter;
use crate::text::engine::TextEngine;

/// A rendered frame as opaque RGB8 pixels at final resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGB {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGB {
    pub fn to_rgb_image(&self) -> FlowgramResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| FlowgramError::render("frame byte len mismatch"))
    }

    /// Opaque RGBA8 copy, as required by animated encoders.
    pub fn to_rgba_image(&self) -> FlowgramResult<image::RgbaImage> {
        let mut rgba = Vec::with_capacity(self.data.len() / 3 * 4);
        for px in self.data.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        image::RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| FlowgramError::render("frame byte len mismatch"))
    }
}

/// Which cards and connectors a frame contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePlan {
    /// Card indices drawn, in order.
    pub cards: Range<usize>,
    /// Connector source indices drawn; each joins card `i` to card `i + 1`.
    pub connectors: Range<usize>,
}

impl FramePlan {
    /// Plan a frame with the first `visible` of `node_count` cards.
    ///
    /// Connectors only join consecutive visible cards, so the last card never gets one.
    pub fn new(node_count: usize, visible: usize, connectors: bool) -> Self {
        let shown = visible.min(node_count);
        let arrows = if connectors { shown.saturating_sub(1) } else { 0 };
        Self {
            cards: 0..shown,
            connectors: 0..arrows,
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }
}

/// Renders frames of one diagram.
///
/// Layout and fonts are resolved once in the constructor; every `compose` call builds and drops
/// its own working surface, so identical arguments always yield identical pixels.
pub struct FrameComposer {
    cfg: DiagramConfig,
    layout: StackLayout,
    text: TextEngine,
    working: Canvas,
}

impl FrameComposer {
    /// Validate `cfg`, solve the layout, and load the configured fonts.
    ///
    /// Configuration errors are reported before any font file is read.
    pub fn from_config(cfg: DiagramConfig) -> FlowgramResult<Self> {
        cfg.validate()?;
        let text = TextEngine::load(&cfg.fonts, cfg.typography, cfg.scale)?;
        Self::assemble_validated(cfg, text)
    }

    /// Build a composer around an already loaded text engine.
    pub fn new(cfg: DiagramConfig, text: TextEngine) -> FlowgramResult<Self> {
        cfg.validate()?;
        Self::assemble_validated(cfg, text)
    }

    fn assemble_validated(cfg: DiagramConfig, text: TextEngine) -> FlowgramResult<Self> {
        let layout = solve_stack(StackParams::from_config(&cfg)?)?;
        let working = cfg.working_canvas()?;
        Ok(Self {
            cfg,
            layout,
            text,
            working,
        })
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.cfg
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    pub fn text_engine(&self) -> &TextEngine {
        &self.text
    }

    pub fn node_count(&self) -> usize {
        self.cfg.nodes.len()
    }

    pub fn working_canvas(&self) -> Canvas {
        self.working
    }

    pub fn plan(&self, visible: usize, connectors: bool) -> FramePlan {
        FramePlan::new(self.node_count(), visible, connectors)
    }

    /// Render title, connectors, the first `visible` cards, and footer, then downsample.
    #[tracing::instrument(skip(self))]
    pub fn compose(&mut self, visible: usize, connectors: bool) -> FlowgramResult<FrameRGB> {
        let plan = self.plan(visible, connectors);
        let rgba = self.render_working(&plan)?;
        let frame = downsample(&rgba, self.cfg.canvas, self.cfg.palette.background);
        tracing::debug!(
            cards = plan.card_count(),
            connectors = plan.connector_count(),
            "frame composed"
        );
        Ok(frame)
    }

    /// Draw `plan` at working resolution without downsampling.
    pub fn render_working(&mut self, plan: &FramePlan) -> FlowgramResult<image::RgbaImage> {
        let mut painter = Painter::new(self.working.width, self.working.height)?;
        painter.clear(self.cfg.palette.background.to_rgba());

        draw_title(&mut painter, &mut self.text, &self.cfg)?;

        for src in plan.connectors.clone() {
            draw_connector(&mut painter, &self.cfg, &self.layout, src)?;
        }

        for i in plan.cards.clone() {
            let pos = self
                .layout
                .position(i)
                .ok_or_else(|| FlowgramError::render(format!("no layout slot for card {i}")))?;
            draw_card(
                &mut painter,
                &mut self.text,
                &self.cfg,
                pos,
                i,
                &self.cfg.nodes[i],
            )?;
        }

        draw_footer(&mut painter, &mut self.text, &self.cfg)?;

        painter.finish_rgba()
    }
}

/// Resample a working-resolution image to `target` with Lanczos3 and flatten it onto `background`.
pub fn downsample(working: &image::RgbaImage, target: Canvas, background: Rgb8) -> FrameRGB {
    let resized = image::imageops::resize(working, target.width, target.height, FilterType::Lanczos3);
    let bg = background.to_array();
    let mut data = Vec::with_capacity(target.pixel_count() * 3);
    for px in resized.pixels() {
        let [r, g, b, a] = px.0;
        let a = u16::from(a);
        for (c, back) in [r, g, b].into_iter().zip(bg) {
            let v = (u16::from(c) * a + u16::from(back) * (255 - a) + 127) / 255;
            data.push(v as u8);
        }
    }
    FrameRGB {
        width: target.width,
        height: target.height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
