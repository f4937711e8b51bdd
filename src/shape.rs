use egui::{Color32, Pos2, Rect, pos2};
use serde::{Deserialize, Serialize};

use crate::layer::LayerBuffer;
use crate::raster;

/// Alpha used for the rubber-band preview of an in-progress shape (about 70%)
pub const PREVIEW_ALPHA: u8 = 180;

/// Drawing tool selection: plain freehand or one of the geometric shapes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Freehand,
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Freehand)
    }
}

/// Axis-aligned rectangle spanning the two drag points
pub fn rect_from(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}

/// Square of side `min(|dx|, |dy|)` anchored at `start`, extending toward the drag direction
pub fn square_from(start: Pos2, end: Pos2) -> Rect {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let side = dx.abs().min(dy.abs());
    let x = if dx < 0.0 { start.x - side } else { start.x };
    let y = if dy < 0.0 { start.y - side } else { start.y };
    Rect::from_min_size(pos2(x, y), egui::vec2(side, side))
}

/// Isosceles triangle: apex at the middle of the top edge, base along the bottom edge
pub fn triangle_in(rect: Rect) -> [Pos2; 3] {
    [
        pos2(rect.min.x + rect.width() / 2.0, rect.min.y),
        pos2(rect.min.x, rect.max.y),
        pos2(rect.max.x, rect.max.y),
    ]
}

/// Resolved geometry of a shape drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Ellipse(Rect),
    Rect(Rect),
    Triangle([Pos2; 3]),
}

impl ShapeGeometry {
    /// Geometry for a drag from `start` to `end`. Circles and squares share the
    /// square-constrained box; triangles use the free bounding box.
    ///
    /// `None` for freehand and for drags whose box has no area.
    pub fn from_drag(kind: ShapeKind, start: Pos2, end: Pos2) -> Option<Self> {
        let bounds = match kind {
            ShapeKind::Freehand => return None,
            ShapeKind::Circle | ShapeKind::Square => square_from(start, end),
            ShapeKind::Triangle => rect_from(start, end),
        };
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return None;
        }

        Some(match kind {
            ShapeKind::Circle => Self::Ellipse(bounds),
            ShapeKind::Triangle => Self::Triangle(triangle_in(bounds)),
            _ => Self::Rect(bounds),
        })
    }
}

/// Style applied when rasterizing a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: Color32,
    pub alpha: u8,
    pub stroke_width: f32,
    pub fill: bool,
}

/// Rasterizes the geometry into the layer, filled or outlined per the style.
pub fn rasterize(layer: &mut LayerBuffer, geometry: &ShapeGeometry, style: &ShapeStyle) {
    let color = raster::with_alpha(style.color, style.alpha);
    let width = style.stroke_width.max(1.0);
    match (geometry, style.fill) {
        (ShapeGeometry::Ellipse(rect), true) => raster::fill_ellipse(layer, *rect, color),
        (ShapeGeometry::Ellipse(rect), false) => raster::stroke_ellipse(layer, *rect, width, color),
        (ShapeGeometry::Rect(rect), true) => raster::fill_rect(layer, *rect, color),
        (ShapeGeometry::Rect(rect), false) => raster::stroke_rect(layer, *rect, width, color),
        (ShapeGeometry::Triangle(tri), true) => raster::fill_triangle(layer, tri, color),
        (ShapeGeometry::Triangle(tri), false) => raster::stroke_polygon(layer, tri, width, color),
    }
}
