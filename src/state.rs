use egui::Pos2;

use crate::brush::BrushKind;
use crate::eraser::EraseSession;
use crate::layer::LayerBuffer;
use crate::shape::ShapeKind;

/// What the pointer is doing between press and release.
#[derive(Debug, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Eraser drag, accumulating removals into one session
    Erasing { session: EraseSession },
    /// Shape rubber-banding from `start`; nothing is committed until release
    Shaping {
        kind: ShapeKind,
        start: Pos2,
        end: Pos2,
    },
    /// Freehand drag. `watermark` is the line count at press time; `brush` is set when the
    /// stroke paints into the raster layer instead of adding vector segments.
    Freehand {
        last: Pos2,
        watermark: usize,
        brush: Option<BrushStroke>,
    },
}

/// Raster side of a brush gesture.
#[derive(Debug)]
pub struct BrushStroke {
    pub kind: BrushKind,
    pub paint_before: LayerBuffer,
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Erasing { .. } => "Erasing",
            Self::Shaping { .. } => "Shaping",
            Self::Freehand { .. } => "Freehand",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
