use egui::Pos2;
use image::{Rgba, RgbaImage, imageops};
use log::debug;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, Paint, PathBuilder, PixmapMut, PixmapPaint, PixmapRef, PremultipliedColorU8,
    Transform,
};

/// Largest width or height a layer may have
pub const MAX_LAYER_SIDE: u32 = 16_384;

/// Clamps requested layer dimensions to `1..=MAX_LAYER_SIDE`
pub fn clamp_size(width: u32, height: u32) -> (u32, u32) {
    (width.clamp(1, MAX_LAYER_SIDE), height.clamp(1, MAX_LAYER_SIDE))
}

/// A fixed-size raster layer.
///
/// Pixels are kept premultiplied, in the byte layout tiny-skia draws into, so every drawing
/// primitive works on the layer in place. Reads through [`Self::pixel`] and [`Self::to_image`]
/// return ordinary (non-premultiplied) RGBA.
///
/// Cloning a layer produces an independent deep copy; history snapshots rely on that.
#[derive(Clone, PartialEq)]
pub struct LayerBuffer {
    pixels: RgbaImage,
}

impl std::fmt::Debug for LayerBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl LayerBuffer {
    /// Creates a fully transparent layer. Dimensions are clamped to at least 1x1.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = clamp_size(width, height);
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Layer holding a copy of an ordinary RGBA image (cropped to the maximum layer size)
    pub fn from_image(image: &RgbaImage) -> Self {
        let mut layer = Self::new(image.width(), image.height());
        let (width, height) = layer.pixels.dimensions();
        for (x, y, pixel) in image.enumerate_pixels() {
            if x < width && y < height {
                layer.pixels.put_pixel(x, y, Rgba(premultiply(pixel.0)));
            }
        }
        layer
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    /// Read-only tiny-skia view of the pixels
    pub fn pixmap(&self) -> Option<PixmapRef<'_>> {
        PixmapRef::from_bytes(self.pixels.as_raw(), self.width(), self.height())
    }

    /// Drawing target over the pixels
    pub fn pixmap_mut(&mut self) -> Option<PixmapMut<'_>> {
        let (width, height) = self.pixels.dimensions();
        PixmapMut::from_bytes(&mut self.pixels, width, height)
    }

    /// Copy of the layer as ordinary RGBA
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        if let Some(pixmap) = self.pixmap() {
            for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
                *dst = Rgba(demultiply(*src));
            }
        }
        image
    }

    /// Pixel at (x, y), or `None` outside the layer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap()?.pixel(x, y).map(demultiply)
    }

    /// Resizes to the given dimensions, keeping existing content anchored at the top-left.
    /// Newly exposed area is transparent; content beyond the new bounds is dropped.
    /// Returns true if the dimensions changed.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = clamp_size(width, height);
        if self.width() == width && self.height() == height {
            return false;
        }

        debug!(
            "Resizing layer from {}x{} to {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );

        let mut resized = RgbaImage::new(width, height);
        imageops::replace(&mut resized, &self.pixels, 0, 0);
        self.pixels = resized;
        true
    }

    /// Resets every pixel to transparent
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Overwrites a pixel without blending. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(pixel) = self.pixels.get_pixel_mut_checked(x, y) {
            *pixel = Rgba(premultiply(color));
        }
    }

    /// Overwrites every pixel with `color`
    pub fn fill(&mut self, color: [u8; 4]) {
        let color = Rgba(premultiply(color));
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    /// Source-over composites `src` onto this layer, anchored at the top-left
    pub fn draw_layer(&mut self, src: &LayerBuffer) {
        let (Some(src), Some(mut dst)) = (src.pixmap(), self.pixmap_mut()) else {
            return;
        };
        dst.draw_pixmap(0, 0, src, &PixmapPaint::default(), Transform::identity(), None);
    }

    /// Punches a transparent disc into the layer. Returns true if any pixel changed.
    pub fn clear_circle(&mut self, center: Pos2, radius: f32) -> bool {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return false;
        };

        // Only the disc's bounding box can change; compare that region before and after.
        let x0 = (center.x - radius).floor().max(0.0) as u32;
        let y0 = (center.y - radius).floor().max(0.0) as u32;
        let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(self.width());
        let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(self.height());
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        let before = imageops::crop_imm(&self.pixels, x0, y0, x1 - x0, y1 - y0).to_image();

        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = false;
        if let Some(mut pixmap) = self.pixmap_mut() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        imageops::crop_imm(&self.pixels, x0, y0, x1 - x0, y1 - y0).to_image() != before
    }

    /// Inverts the RGB channels of every pixel that is not fully transparent. Alpha is kept.
    pub fn invert_colors(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            let Some(color) = PremultipliedColorU8::from_rgba(r, g, b, a) else {
                continue;
            };
            let [r, g, b, a] = demultiply(color);
            *pixel = Rgba(premultiply([255 - r, 255 - g, 255 - b, a]));
        }
    }
}

fn premultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let color = ColorU8::from_rgba(r, g, b, a).premultiply();
    [color.red(), color.green(), color.blue(), color.alpha()]
}

fn demultiply(color: PremultipliedColorU8) -> [u8; 4] {
    let color = color.demultiply();
    [color.red(), color.green(), color.blue(), color.alpha()]
}
