use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::text::engine::ShapedText;

const PATH_TOLERANCE: f64 = 0.1;

/// Drawing surface over a `vello_cpu` render context.
///
/// Commands are recorded in call order and rasterized once by [`Painter::finish_rgba`].
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Painter {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> FlowgramResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| FlowgramError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| FlowgramError::render("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(FlowgramError::render("surface width/height must be > 0"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            width: width_u16,
            height: height_u16,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Cover the whole surface with an opaque color.
    pub fn clear(&mut self, rgba: [u8; 4]) {
        let full = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.fill_rect(full, rgba);
    }

    pub fn fill_rect(&mut self, rect: Rect, rgba: [u8; 4]) {
        self.set_color(rgba);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, rgba: [u8; 4]) {
        let r = rect_to_cpu(rect);
        let shape = vello_cpu::kurbo::RoundedRect::new(r.x0, r.y0, r.x1, r.y1, radius.max(0.0));
        self.set_color(rgba);
        self.ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    }

    /// Rounded rectangle whose outline is drawn inside `rect`, `width` pixels thick.
    pub fn outlined_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        fill: [u8; 4],
        outline: [u8; 4],
        width: f64,
    ) {
        self.fill_rounded_rect(rect, radius, outline);
        let inner = rect.inset(-width);
        if inner.width() > 0.0 && inner.height() > 0.0 {
            self.fill_rounded_rect(inner, (radius - width).max(0.0), fill);
        }
    }

    pub fn fill_polygon(&mut self, points: &[Point], rgba: [u8; 4]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*first));
        for p in rest {
            path.line_to(point_to_cpu(*p));
        }
        path.close_path();
        self.set_color(rgba);
        self.ctx.fill_path(&path);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, rgba: [u8; 4]) {
        if radius <= 0.0 {
            return;
        }
        let shape = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.set_color(rgba);
        self.ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    }

    /// Circle with an inner outline, `width` pixels thick.
    pub fn outlined_circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: [u8; 4],
        outline: [u8; 4],
        width: f64,
    ) {
        self.fill_circle(center, radius, outline);
        self.fill_circle(center, radius - width, fill);
    }

    /// Annulus between `inner` and `outer`; the hole stays untouched.
    pub fn fill_ring(&mut self, center: Point, outer: f64, inner: f64, rgba: [u8; 4]) {
        if inner <= 0.0 {
            self.fill_circle(center, outer, rgba);
            return;
        }
        let shape = vello_cpu::kurbo::CircleSegment::new(
            point_to_cpu(center),
            outer,
            inner,
            0.0,
            std::f64::consts::TAU,
        );
        self.set_color(rgba);
        self.ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    }

    /// Straight segment with square ends, `width` pixels thick.
    pub fn line(&mut self, from: Point, to: Point, width: f64, rgba: [u8; 4]) {
        let d = to - from;
        let len = d.hypot();
        if len == 0.0 || width <= 0.0 {
            return;
        }
        let n = kurbo::Vec2::new(-d.y / len, d.x / len) * (width / 2.0);
        self.fill_polygon(&[from + n, to + n, to - n, from - n], rgba);
    }

    /// Draw shaped text with its layout box's top-left corner at `origin`.
    pub fn draw_text(&mut self, text: &ShapedText, origin: Point) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Ink bounds of `text` relative to its layout origin, or `None` when nothing is drawn.
    ///
    /// The string is rasterized on a scratch surface padded on every side, so glyph overhang
    /// past the advance box is included.
    pub fn text_ink_bounds(text: &ShapedText) -> FlowgramResult<Option<Rect>> {
        let extent = text.extent();
        let pad = (extent.height / 4.0).ceil().max(2.0);
        let w = (extent.width.max(0.0) + 2.0 * pad).ceil() as u32;
        let h = (extent.height.max(0.0) + 2.0 * pad).ceil() as u32;
        let mut scratch = Painter::new(w, h)?;
        scratch.draw_text(text, Point::new(pad, pad));
        let img = scratch.finish_rgba()?;

        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, px) in img.enumerate_pixels() {
            if px.0[3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        Ok(bounds.map(|(x0, y0, x1, y1)| {
            Rect::new(
                f64::from(x0) - pad,
                f64::from(y0) - pad,
                f64::from(x1 + 1) - pad,
                f64::from(y1 + 1) - pad,
            )
        }))
    }

    /// Rasterize `layer` and blend it over this surface with its top-left corner at `origin`.
    ///
    /// The origin is snapped to whole pixels so the layer is copied without resampling.
    pub fn composite_layer(&mut self, layer: Painter, origin: Point) {
        let (w, h) = (f64::from(layer.width), f64::from(layer.height));
        let pixmap = layer.finish_pixmap();
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let (x, y) = (origin.x.round(), origin.y.round());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn finish_pixmap(mut self) -> vello_cpu::Pixmap {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }

    /// Rasterize all recorded commands into straight-alpha RGBA8.
    pub fn finish_rgba(self) -> FlowgramResult<image::RgbaImage> {
        let (w, h) = (u32::from(self.width), u32::from(self.height));
        let pixmap = self.finish_pixmap();
        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(w, h, data)
            .ok_or_else(|| FlowgramError::render("pixmap byte len mismatch"))
    }

    fn set_color(&mut self, [r, g, b, a]: [u8; 4]) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
