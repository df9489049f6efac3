//! Card icons.
//!
//! Each icon is a fixed recipe scaled by `size` and drawn on its own transparent `2*size` square
//! layer, which is then blended onto the card with its center at the requested point.

use std::f64::consts::PI;

use crate::config::model::IconKind;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::painter::Painter;

const STARBURST_ORANGE: [u8; 4] = [224, 125, 79, 255];
const LINKED_PINK: [u8; 4] = [234, 72, 108, 255];
const CAMERA_BLUE: [u8; 4] = [66, 133, 244, 255];
const CAMERA_GREEN: [u8; 4] = [52, 168, 83, 255];
const CAMERA_YELLOW: [u8; 4] = [251, 188, 4, 255];
const CAMERA_RED: [u8; 4] = [234, 67, 53, 255];
const DOC_FILL: [u8; 4] = [220, 220, 220, 255];
const DOC_LINE: [u8; 4] = [160, 160, 160, 255];

const STARBURST_RAYS: usize = 12;

/// Draw `kind` centered on `center` onto `painter`.
pub fn draw_icon(
    painter: &mut Painter,
    kind: IconKind,
    center: Point,
    size: u32,
) -> FlowgramResult<()> {
    let side = size
        .checked_mul(2)
        .ok_or_else(|| FlowgramError::render(format!("icon size {size} is too large")))?;
    let mut layer = Painter::new(side, side)?;
    let s = f64::from(size);
    match kind {
        IconKind::Starburst => starburst(&mut layer, s),
        IconKind::LinkedNodes => linked_nodes(&mut layer, s),
        IconKind::Camera => camera(&mut layer, s),
        IconKind::Document => document(&mut layer, s),
    }
    painter.composite_layer(layer, Point::new(center.x - s, center.y - s));
    Ok(())
}

/// The four corners of one starburst ray, inner edge first.
pub(crate) fn starburst_ray(s: f64, i: usize) -> [Point; 4] {
    let c = s;
    let inner_r = s * 0.18;
    let outer_r = s * 0.85;
    let half_w = s * 0.13;

    let angle = (2.0 * PI * i as f64) / STARBURST_RAYS as f64 - PI / 2.0;
    let (sin_a, cos_a) = angle.sin_cos();
    let (perp_sin, perp_cos) = (angle + PI / 2.0).sin_cos();

    let xi = c + inner_r * cos_a;
    let yi = c + inner_r * sin_a;
    let xo = c + outer_r * cos_a;
    let yo = c + outer_r * sin_a;

    [
        Point::new(xi + half_w * perp_cos, yi + half_w * perp_sin),
        Point::new(xo + half_w * 0.7 * perp_cos, yo + half_w * 0.7 * perp_sin),
        Point::new(xo - half_w * 0.7 * perp_cos, yo - half_w * 0.7 * perp_sin),
        Point::new(xi - half_w * perp_cos, yi - half_w * perp_sin),
    ]
}

fn starburst(layer: &mut Painter, s: f64) {
    for i in 0..STARBURST_RAYS {
        layer.fill_polygon(&starburst_ray(s, i), STARBURST_ORANGE);
    }
    layer.fill_circle(Point::new(s, s), s * 0.22, STARBURST_ORANGE);
}

fn linked_nodes(layer: &mut Painter, s: f64) {
    let node_r = s * 0.22;
    let ring_w = (s * 0.08).floor().max(3.0);
    let line_w = (s * 0.15).floor().max(4.0);
    let nodes = [
        Point::new(s * 0.35, s),
        Point::new(s, s),
        Point::new(s * 1.65, s * 0.65),
    ];
    let elbow = Point::new(s * 1.2, s * 0.85);

    layer.line(nodes[0], nodes[1], line_w, LINKED_PINK);
    layer.line(nodes[1], elbow, line_w, LINKED_PINK);
    layer.line(elbow, nodes[2], line_w, LINKED_PINK);

    let hole_r = node_r * 0.5 - ring_w;
    for n in nodes {
        layer.fill_ring(n, node_r, hole_r, LINKED_PINK);
    }
}

fn camera(layer: &mut Painter, s: f64) {
    let (l, t, r, b) = (s * 0.25, s * 0.5, s * 1.35, s * 1.5);
    let mid_x = (l + r) / 2.0;
    let mid_y = (t + b) / 2.0;

    layer.fill_rect(Rect::new(l, t, mid_x, mid_y), CAMERA_BLUE);
    layer.fill_rect(Rect::new(mid_x, t, r, mid_y), CAMERA_GREEN);
    layer.fill_rect(Rect::new(l, mid_y, mid_x, b), CAMERA_RED);
    layer.fill_rect(Rect::new(mid_x, mid_y, r, b), CAMERA_YELLOW);

    layer.fill_polygon(
        &[
            Point::new(r, t + s * 0.15),
            Point::new(s * 1.75, s * 0.55),
            Point::new(s * 1.75, s * 1.45),
            Point::new(r, b - s * 0.15),
        ],
        CAMERA_GREEN,
    );
}

fn document(layer: &mut Painter, s: f64) {
    let (l, t, r, b) = (s * 0.5, s * 0.3, s * 1.5, s * 1.7);
    let lw = (s * 0.05).floor().max(2.0);
    layer.outlined_rounded_rect(
        Rect::new(l, t, r, b),
        (s * 0.1).floor(),
        DOC_FILL,
        DOC_LINE,
        lw,
    );

    for (i, frac) in [0.35, 0.5, 0.65, 0.8].into_iter().enumerate() {
        let x1 = s * 0.7;
        let x2 = if i < 3 { s * 1.3 } else { s * 1.05 };
        let y = t + (b - t) * frac;
        layer.line(Point::new(x1, y), Point::new(x2, y), lw, DOC_LINE);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/icon.rs"]
mod tests;
