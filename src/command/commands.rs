use crate::document::Document;
use crate::layer::LayerBuffer;
use crate::line::{Line, RemovedLine};

/// An invertible record of one gesture's net effect on the document.
///
/// Raster variants hold independent copies of the layer before and after the gesture, so
/// later edits to the live layers never reach into history.
#[derive(Debug, Clone)]
pub enum Command {
    /// A shape rasterized into the shape layer
    ShapeCommit {
        before: LayerBuffer,
        after: LayerBuffer,
    },

    /// A brush stroke on the paint layer, plus any vector segments added during the same drag
    PaintAndVector {
        before: LayerBuffer,
        after: LayerBuffer,
        added: Vec<Line>,
    },

    /// A plain freehand stroke made of vector segments
    VectorStroke { segments: Vec<Line> },

    /// An eraser drag: lines removed (with their original positions) and the paint layer
    /// before and after
    EraseMixed {
        removed: Vec<RemovedLine>,
        paint_before: LayerBuffer,
        paint_after: LayerBuffer,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ShapeCommit { .. } => "ShapeCommit",
            Command::PaintAndVector { .. } => "PaintAndVector",
            Command::VectorStroke { .. } => "VectorStroke",
            Command::EraseMixed { .. } => "EraseMixed",
        }
    }

    /// Re-applies the command's effect (redo)
    pub fn execute(&self, document: &mut Document) {
        match self {
            Command::ShapeCommit { after, .. } => {
                *document.shape_layer_mut() = after.clone();
            }
            Command::PaintAndVector { after, added, .. } => {
                document.lines_mut().extend(added);
                *document.paint_layer_mut() = after.clone();
            }
            Command::VectorStroke { segments } => {
                document.lines_mut().extend(segments);
            }
            Command::EraseMixed {
                removed,
                paint_after,
                ..
            } => {
                let lines: Vec<Line> = removed.iter().map(|r| r.line).collect();
                document.lines_mut().remove_by_identity(&lines);
                *document.paint_layer_mut() = paint_after.clone();
            }
        }
    }

    /// Reverts the command's effect
    pub fn undo(&self, document: &mut Document) {
        match self {
            Command::ShapeCommit { before, .. } => {
                *document.shape_layer_mut() = before.clone();
            }
            Command::PaintAndVector { before, added, .. } => {
                document.lines_mut().remove_by_identity(added);
                *document.paint_layer_mut() = before.clone();
            }
            Command::VectorStroke { segments } => {
                document.lines_mut().remove_by_identity(segments);
            }
            Command::EraseMixed {
                removed,
                paint_before,
                ..
            } => {
                document.lines_mut().restore(removed);
                *document.paint_layer_mut() = paint_before.clone();
            }
        }
    }
}
