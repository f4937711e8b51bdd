use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::brush::{BrushKind, BrushStyle};
use crate::error::CanvasResult;
use crate::shape::{PREVIEW_ALPHA, ShapeKind, ShapeStyle};

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 15;
pub const MIN_ERASER_RADIUS: u32 = 5;
pub const MAX_ERASER_RADIUS: u32 = 50;

/// Tool and style settings owned by the host UI and sampled by the canvas per gesture.
///
/// `stroke_width` and `eraser_radius` may hold any value; the accessors clamp them to their
/// allowed ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old settings
pub struct ToolState {
    pub color: Color32,
    pub stroke_width: u32,
    pub shape: ShapeKind,
    pub fill_shapes: bool,
    /// `None` draws plain vector segments instead of a painted medium
    pub brush: Option<BrushKind>,
    pub eraser: bool,
    pub eraser_radius: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            stroke_width: 2,
            shape: ShapeKind::Freehand,
            fill_shapes: false,
            brush: Some(BrushKind::TexturedInk),
            eraser: false,
            eraser_radius: 10,
        }
    }
}

impl ToolState {
    pub fn stroke_width(&self) -> u32 {
        self.stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    pub fn eraser_radius(&self) -> u32 {
        self.eraser_radius.clamp(MIN_ERASER_RADIUS, MAX_ERASER_RADIUS)
    }

    pub fn set_eraser_radius(&mut self, radius: u32) {
        self.eraser_radius = radius.clamp(MIN_ERASER_RADIUS, MAX_ERASER_RADIUS);
    }

    pub fn brush_style(&self) -> BrushStyle {
        BrushStyle {
            color: self.color,
            stroke_width: self.stroke_width(),
        }
    }

    /// Style a shape is committed with; the color keeps its own alpha
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.color,
            alpha: self.color.a(),
            stroke_width: self.stroke_width() as f32,
            fill: self.fill_shapes,
        }
    }

    /// Style of the rubber-band preview drawn while a shape is dragged
    pub fn preview_style(&self) -> ShapeStyle {
        ShapeStyle {
            alpha: PREVIEW_ALPHA,
            ..self.shape_style()
        }
    }

    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp() {
        let mut tools = ToolState::default();
        tools.set_stroke_width(0);
        assert_eq!(tools.stroke_width(), 1);
        tools.set_stroke_width(99);
        assert_eq!(tools.stroke_width(), 15);
        tools.set_eraser_radius(1);
        assert_eq!(tools.eraser_radius(), 5);

        // Raw field values outside the range are clamped on read.
        tools.stroke_width = 0;
        tools.eraser_radius = 500;
        assert_eq!(tools.stroke_width(), 1);
        assert_eq!(tools.eraser_radius(), 50);
    }

    #[test]
    fn shape_styles_keep_color_alpha_except_preview() {
        let tools = ToolState {
            color: Color32::from_rgba_unmultiplied(255, 0, 0, 128),
            ..ToolState::default()
        };
        assert_eq!(tools.shape_style().alpha, 128);
        assert_eq!(tools.preview_style().alpha, PREVIEW_ALPHA);
        assert_eq!(ToolState::default().shape_style().alpha, 255);
    }

    #[test]
    fn json_round_trip_and_defaults() {
        let mut tools = ToolState::default();
        tools.color = Color32::RED;
        tools.brush = None;
        tools.shape = ShapeKind::Triangle;
        let restored = ToolState::from_json(&tools.to_json().unwrap()).unwrap();
        assert_eq!(restored, tools);

        let partial = ToolState::from_json(r#"{ "eraser": true }"#).unwrap();
        assert!(partial.eraser);
        assert_eq!(partial.eraser_radius(), 10);
    }

    #[test]
    fn malformed_settings_are_an_error() {
        assert!(matches!(
            ToolState::from_json("not json"),
            Err(crate::error::CanvasError::Settings(_))
        ));
    }
}
