use std::path::Path;

use egui::{Color32, ColorImage, Pos2, Rect, vec2};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::brush::{self, BrushKind};
use crate::command::{Command, CommandHistory};
use crate::document::Document;
use crate::error::CanvasResult;
use crate::eraser::EraseSession;
use crate::layer::{self, LayerBuffer};
use crate::line::{Line, LineStore};
use crate::raster;
use crate::shape::{self, ShapeGeometry, ShapeKind};
use crate::state::{BrushStroke, GestureState};
use crate::tool::ToolState;

/// Translucent fill of the eraser cursor ring
const ERASER_RING_FILL: [u8; 4] = [0, 0, 0, 40];
/// Outline of the eraser cursor ring
const ERASER_RING_OUTLINE: [u8; 4] = [0, 0, 0, 120];
const ERASER_RING_WIDTH: f32 = 1.5;

/// The drawing surface: owns the layers, the vector lines, the history and the in-progress
/// gesture, and composites everything into one image on demand.
///
/// Tool settings are never stored here; every gesture call and every render receives the
/// host's current [`ToolState`].
#[derive(Debug)]
pub struct CanvasSurface {
    width: u32,
    height: u32,
    /// Solid color under everything else
    canvas_color: Color32,
    background: Option<RgbaImage>,
    document: Document,
    history: CommandHistory,
    gesture: GestureState,
    /// Last known pointer position, used for the eraser ring
    cursor: Option<Pos2>,
    rng: SmallRng,
}

impl CanvasSurface {
    /// Creates an empty surface for a viewport of the given size (clamped to at least 1x1)
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_rng(width, height, SmallRng::from_os_rng())
    }

    /// Like [`Self::new`], with brush randomness seeded for reproducible output
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Self {
        Self::with_rng(width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: SmallRng) -> Self {
        let (width, height) = layer::clamp_size(width, height);
        Self {
            width,
            height,
            canvas_color: Color32::WHITE,
            background: None,
            document: Document::new(width, height),
            history: CommandHistory::new(),
            gesture: GestureState::Idle,
            cursor: None,
            rng,
        }
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lines(&self) -> &LineStore {
        self.document.lines()
    }

    pub fn shape_layer(&self) -> &LayerBuffer {
        self.document.shape_layer()
    }

    pub fn paint_layer(&self) -> &LayerBuffer {
        self.document.paint_layer()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    pub fn canvas_color(&self) -> Color32 {
        self.canvas_color
    }

    pub fn set_canvas_color(&mut self, color: Color32) {
        self.canvas_color = color;
    }

    pub fn background_image(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }

    // ---- gestures ----

    /// Pointer press. Chooses eraser, shape or freehand handling from the tool state.
    pub fn begin_gesture(&mut self, point: Pos2, tools: &ToolState) {
        if !self.gesture.is_idle() {
            warn!(
                "Pointer pressed during {} gesture; finishing it first",
                self.gesture.name()
            );
            self.end_gesture(point, tools);
        }

        self.ensure_layers_sized();
        self.cursor = Some(point);

        self.gesture = if tools.eraser {
            GestureState::Erasing {
                session: EraseSession::begin(self.document.paint_layer()),
            }
        } else if !tools.shape.is_freehand() {
            GestureState::Shaping {
                kind: tools.shape,
                start: point,
                end: point,
            }
        } else {
            GestureState::Freehand {
                last: point,
                watermark: self.document.lines().len(),
                brush: tools.brush.map(|kind| BrushStroke {
                    kind,
                    paint_before: self.document.paint_layer().clone(),
                }),
            }
        };
        trace!("Began {} gesture at ({}, {})", self.gesture.name(), point.x, point.y);
    }

    /// Pointer drag while pressed
    pub fn continue_gesture(&mut self, point: Pos2, tools: &ToolState) {
        self.cursor = Some(point);
        self.ensure_layers_sized();

        match &mut self.gesture {
            GestureState::Idle => {}
            GestureState::Erasing { session } => {
                let radius = tools.eraser_radius() as f32;
                let (lines, paint) = self.document.lines_and_paint_mut();
                session.erase_at(point, radius, lines, paint);
            }
            GestureState::Shaping { end, .. } => {
                *end = point;
            }
            GestureState::Freehand { last, brush, .. } => {
                match brush {
                    Some(stroke) => {
                        let kind: BrushKind = tools.brush.unwrap_or(stroke.kind);
                        brush::paint_between(
                            kind,
                            *last,
                            point,
                            &tools.brush_style(),
                            self.document.paint_layer_mut(),
                            &mut self.rng,
                        );
                    }
                    None => {
                        // Vector segments are only accepted while the freehand tool is active.
                        if !tools.eraser && tools.shape.is_freehand() {
                            self.document.lines_mut().push(Line::new(
                                *last,
                                point,
                                tools.color,
                                tools.stroke_width() as f32,
                            ));
                        }
                    }
                }
                *last = point;
            }
        }
    }

    /// Pointer release. Packages the gesture's net effect as one command, if it had any.
    pub fn end_gesture(&mut self, point: Pos2, tools: &ToolState) {
        self.cursor = Some(point);
        self.ensure_layers_sized();

        let command = match std::mem::take(&mut self.gesture) {
            GestureState::Idle => None,
            GestureState::Erasing { session } => session.finish(self.document.paint_layer()),
            GestureState::Shaping { kind, start, .. } => self.commit_shape(kind, start, point, tools),
            GestureState::Freehand {
                watermark, brush, ..
            } => {
                let added = self.document.lines().since(watermark).to_vec();
                match brush {
                    Some(stroke) => {
                        let after = self.document.paint_layer();
                        if *after == stroke.paint_before && added.is_empty() {
                            None
                        } else {
                            Some(Command::PaintAndVector {
                                before: stroke.paint_before,
                                after: after.clone(),
                                added,
                            })
                        }
                    }
                    None if added.is_empty() => None,
                    None => Some(Command::VectorStroke { segments: added }),
                }
            }
        };

        match command {
            Some(command) => {
                debug!("Gesture finished with {} command", command.name());
                self.history.push(command);
            }
            None => trace!("Gesture changed nothing; no command recorded"),
        }
    }

    /// Pointer movement without a button held; keeps the eraser ring under the pointer
    pub fn pointer_moved(&mut self, point: Pos2) {
        self.cursor = Some(point);
    }

    /// Pointer left the surface
    pub fn pointer_left(&mut self) {
        self.cursor = None;
    }

    fn commit_shape(&mut self, kind: ShapeKind, start: Pos2, end: Pos2, tools: &ToolState) -> Option<Command> {
        let geometry = ShapeGeometry::from_drag(kind, start, end)?;
        let before = self.document.shape_layer().clone();
        shape::rasterize(self.document.shape_layer_mut(), &geometry, &tools.shape_style());

        let after = self.document.shape_layer();
        if *after == before {
            return None;
        }
        Some(Command::ShapeCommit {
            before,
            after: after.clone(),
        })
    }

    // ---- history ----

    /// Reverts the most recent command. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document);
        self.ensure_layers_sized();
        undone
    }

    /// Re-applies the most recently undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document);
        self.ensure_layers_sized();
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- whole-canvas operations ----

    /// New viewport size. Layers keep their content anchored at the top-left.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = layer::clamp_size(width, height);
        if [width, height] != self.size() {
            debug!("Viewport resized to {width}x{height}");
        }
        self.width = width;
        self.height = height;
        self.ensure_layers_sized();
    }

    /// Destructive reset: empties both layers, the lines, the cursor and the whole history.
    /// The background image is kept.
    pub fn clear(&mut self) {
        info!("Clearing canvas");
        self.document.clear();
        self.history.clear();
        self.gesture = GestureState::Idle;
        self.cursor = None;
    }

    /// Replaces or removes the backdrop without touching content or history
    pub fn set_background_image(&mut self, image: Option<RgbaImage>) {
        match &image {
            Some(image) => info!("Background image set ({}x{})", image.width(), image.height()),
            None => info!("Background image removed"),
        }
        self.background = image;
    }

    /// Starts over on a new backdrop: clears all content and history, then installs `image`
    pub fn replace_background_image(&mut self, image: RgbaImage) {
        self.clear();
        self.set_background_image(Some(image));
    }

    /// Decodes an image file and starts over on it as the backdrop
    pub fn load_background_image(&mut self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        info!("Loaded background image {}", path.display());
        self.replace_background_image(image);
        Ok(())
    }

    /// Inverts the RGB of every visible pixel in both layers. Not recorded in history.
    pub fn flip_for_dark_mode(&mut self) {
        debug!("Inverting layers for dark mode");
        self.ensure_layers_sized();
        self.document.invert_layers();
    }

    // ---- rendering ----

    /// Composites the full viewport: canvas color, background, shape layer, paint layer,
    /// vector lines, live shape preview, eraser ring.
    pub fn render(&self, tools: &ToolState) -> RgbaImage {
        let mut out = LayerBuffer::new(self.width, self.height);
        out.fill(raster::rgba(self.canvas_color));

        if let Some(background) = &self.background {
            let backdrop = if background.dimensions() == (self.width, self.height) {
                LayerBuffer::from_image(background)
            } else {
                LayerBuffer::from_image(&imageops::resize(
                    background,
                    self.width,
                    self.height,
                    FilterType::Triangle,
                ))
            };
            out.draw_layer(&backdrop);
        }

        out.draw_layer(self.document.shape_layer());
        out.draw_layer(self.document.paint_layer());

        for line in self.document.lines().lines() {
            raster::draw_line(&mut out, line.start(), line.end(), line.width(), raster::rgba(line.color()));
        }

        if let GestureState::Shaping { kind, start, end } = &self.gesture {
            if let Some(geometry) = ShapeGeometry::from_drag(*kind, *start, *end) {
                shape::rasterize(&mut out, &geometry, &tools.preview_style());
            }
        }

        if let (true, Some(cursor)) = (tools.eraser, self.cursor) {
            let radius = tools.eraser_radius() as f32;
            let ring = Rect::from_center_size(cursor, vec2(radius, radius) * 2.0);
            raster::fill_ellipse(&mut out, ring, ERASER_RING_FILL);
            raster::stroke_ellipse(&mut out, ring, ERASER_RING_WIDTH, ERASER_RING_OUTLINE);
        }

        out.to_image()
    }

    /// [`Self::render`] as an egui image, ready to upload as a texture
    pub fn render_color_image(&self, tools: &ToolState) -> ColorImage {
        let image = self.render(tools);
        ColorImage::from_rgba_unmultiplied([image.width() as usize, image.height() as usize], image.as_raw())
    }

    /// Writes the composited snapshot as a PNG file
    pub fn export_png(&self, path: impl AsRef<Path>, tools: &ToolState) -> CanvasResult<()> {
        let path = path.as_ref();
        self.render(tools).save_with_format(path, ImageFormat::Png)?;
        info!("Exported canvas to {}", path.display());
        Ok(())
    }

    fn ensure_layers_sized(&mut self) {
        self.document.ensure_size(self.width, self.height);
    }
}
