//! Anti-aliased drawing primitives over a [`LayerBuffer`], backed by tiny-skia.
//!
//! Every primitive is one path fill or stroke, so translucent shapes do not darken where
//! their own parts overlap.

use egui::{Color32, Pos2, Rect};
use tiny_skia::{
    Color, FillRule, GradientStop, LineCap, LineJoin, NonZeroRect, Paint, Path, PathBuilder, Point, RadialGradient,
    SpreadMode, Stroke, Transform,
};

use crate::layer::LayerBuffer;

/// Unmultiplied RGBA of `color` with its alpha replaced
pub fn with_alpha(color: Color32, alpha: u8) -> [u8; 4] {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    [r, g, b, alpha]
}

/// Unmultiplied RGBA of `color`
pub fn rgba(color: Color32) -> [u8; 4] {
    color.to_srgba_unmultiplied()
}

fn solid_paint(color: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

fn fill_path(layer: &mut LayerBuffer, path: &Path, paint: &Paint<'_>) {
    if let Some(mut pixmap) = layer.pixmap_mut() {
        pixmap.fill_path(path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn stroke_path(layer: &mut LayerBuffer, path: &Path, width: f32, join: LineJoin, color: [u8; 4]) {
    let stroke = Stroke {
        width: width.max(1.0),
        line_cap: LineCap::Round,
        line_join: join,
        ..Stroke::default()
    };
    if let Some(mut pixmap) = layer.pixmap_mut() {
        pixmap.stroke_path(path, &solid_paint(color), &stroke, Transform::identity(), None);
    }
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

fn oval(rect: Rect) -> Option<Path> {
    let bounds = NonZeroRect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)?;
    PathBuilder::from_oval(bounds.to_rect())
}

fn polygon(points: &[Pos2]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

/// Thick segment with round caps
pub fn draw_line(layer: &mut LayerBuffer, a: Pos2, b: Pos2, width: f32, color: [u8; 4]) {
    let mut pb = PathBuilder::new();
    pb.move_to(a.x, a.y);
    pb.line_to(b.x, b.y);
    if let Some(path) = pb.finish() {
        stroke_path(layer, &path, width, LineJoin::Round, color);
    }
}

pub fn fill_rect(layer: &mut LayerBuffer, rect: Rect, color: [u8; 4]) {
    let (Some(rect), Some(mut pixmap)) = (skia_rect(rect), layer.pixmap_mut()) else {
        return;
    };
    pixmap.fill_rect(rect, &solid_paint(color), Transform::identity(), None);
}

pub fn stroke_rect(layer: &mut LayerBuffer, rect: Rect, width: f32, color: [u8; 4]) {
    if let Some(rect) = skia_rect(rect) {
        stroke_path(layer, &PathBuilder::from_rect(rect), width, LineJoin::Miter, color);
    }
}

pub fn fill_ellipse(layer: &mut LayerBuffer, rect: Rect, color: [u8; 4]) {
    if let Some(path) = oval(rect) {
        fill_path(layer, &path, &solid_paint(color));
    }
}

/// Ellipse outline of the given stroke width, centered on the ellipse boundary
pub fn stroke_ellipse(layer: &mut LayerBuffer, rect: Rect, width: f32, color: [u8; 4]) {
    if let Some(path) = oval(rect) {
        stroke_path(layer, &path, width, LineJoin::Round, color);
    }
}

pub fn fill_triangle(layer: &mut LayerBuffer, tri: &[Pos2; 3], color: [u8; 4]) {
    if let Some(path) = polygon(tri) {
        fill_path(layer, &path, &solid_paint(color));
    }
}

/// Closed polygon outline with mitered corners
pub fn stroke_polygon(layer: &mut LayerBuffer, points: &[Pos2], width: f32, color: [u8; 4]) {
    if let Some(path) = polygon(points) {
        stroke_path(layer, &path, width, LineJoin::Miter, color);
    }
}

/// Soft round dab: a radial gradient from `center_alpha` (scaled by the color's own alpha)
/// at the center to fully transparent at `radius`.
pub fn radial_dab(layer: &mut LayerBuffer, center: Pos2, radius: f32, color: [u8; 4], center_alpha: f32) {
    let [r, g, b, a] = color;
    let alpha = (a as f32 * center_alpha.clamp(0.0, 1.0)).round() as u8;
    let origin = Point::from_xy(center.x, center.y);
    let stops = vec![
        GradientStop::new(0.0, Color::from_rgba8(r, g, b, alpha)),
        GradientStop::new(1.0, Color::from_rgba8(r, g, b, 0)),
    ];

    let Some(shader) = RadialGradient::new(origin, origin, radius, stops, SpreadMode::Pad, Transform::identity())
    else {
        return;
    };
    let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
        return;
    };

    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = true;
    fill_path(layer, &path, &paint);
}
