use crate::layer::LayerBuffer;
use crate::line::LineStore;

/// The editable content of the canvas: the shape layer, the paint layer and the vector lines.
///
/// Commands operate on this type; the surface owns exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    shape_layer: LayerBuffer,
    paint_layer: LayerBuffer,
    lines: LineStore,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            shape_layer: LayerBuffer::new(width, height),
            paint_layer: LayerBuffer::new(width, height),
            lines: LineStore::new(),
        }
    }

    pub fn shape_layer(&self) -> &LayerBuffer {
        &self.shape_layer
    }

    pub fn shape_layer_mut(&mut self) -> &mut LayerBuffer {
        &mut self.shape_layer
    }

    pub fn paint_layer(&self) -> &LayerBuffer {
        &self.paint_layer
    }

    pub fn paint_layer_mut(&mut self) -> &mut LayerBuffer {
        &mut self.paint_layer
    }

    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut LineStore {
        &mut self.lines
    }

    /// Split borrow for operations that touch both the lines and the paint layer
    pub fn lines_and_paint_mut(&mut self) -> (&mut LineStore, &mut LayerBuffer) {
        (&mut self.lines, &mut self.paint_layer)
    }

    /// Brings both layers to the given size, preserving their content
    pub fn ensure_size(&mut self, width: u32, height: u32) {
        self.shape_layer.ensure_size(width, height);
        self.paint_layer.ensure_size(width, height);
    }

    pub fn clear(&mut self) {
        self.shape_layer.clear();
        self.paint_layer.clear();
        self.lines.clear();
    }

    /// Inverts the RGB of every visible pixel in both layers
    pub fn invert_layers(&mut self) {
        self.shape_layer.invert_colors();
        self.paint_layer.invert_colors();
    }
}
