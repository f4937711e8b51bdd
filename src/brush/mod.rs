//! Procedural brush engines that paint stochastic marks between two pointer samples.
//!
//! Engines are stateless: each call reads the style, writes into the target layer and
//! returns. Their output is random by nature; history captures the resulting pixels.

use egui::{Color32, Pos2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::layer::LayerBuffer;

mod ink;
mod oil;
mod watercolor;

pub use ink::textured_ink_between;
pub use oil::oil_between;
pub use watercolor::watercolor_between;

/// The simulated medium used for freehand painting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushKind {
    /// Ragged dry-brush ink with spikes and micro-gaps
    #[default]
    TexturedInk,
    /// Soft translucent radial dabs
    Watercolor,
    /// Low-alpha bristle glaze with occasional smears
    Oil,
}

impl BrushKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::TexturedInk => "textured-ink",
            Self::Watercolor => "watercolor",
            Self::Oil => "oil",
        }
    }
}

/// Style sampled from the tool state for one brush segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStyle {
    pub color: Color32,
    pub stroke_width: u32,
}

/// Paints one segment of a brush stroke with the given medium.
pub fn paint_between(
    kind: BrushKind,
    from: Pos2,
    to: Pos2,
    style: &BrushStyle,
    layer: &mut LayerBuffer,
    rng: &mut impl Rng,
) {
    match kind {
        BrushKind::TexturedInk => textured_ink_between(from, to, style, layer, rng),
        BrushKind::Watercolor => watercolor_between(from, to, style, layer, rng),
        BrushKind::Oil => oil_between(from, to, style, layer, rng),
    }
}

/// Interpolation along a segment: unit tangent plus the sample positions, spaced about
/// `max(1, width / 2)` pixels apart. `None` for zero-length segments.
pub(crate) struct Samples {
    pub tangent: Vec2,
    pub points: Vec<Pos2>,
}

pub(crate) fn sample_segment(from: Pos2, to: Pos2, stroke_width: u32) -> Option<Samples> {
    let delta = to - from;
    let dist = delta.length();
    if dist == 0.0 {
        return None;
    }

    let step = (stroke_width / 2).max(1) as f32;
    let steps = ((dist / step) as usize).max(1);
    let points = (1..=steps)
        .map(|i| from + delta * (i as f32 / steps as f32))
        .collect();

    Some(Samples {
        tangent: delta / dist,
        points,
    })
}

/// Rounds a sample to the pixel grid the way integer dab placement does
pub(crate) fn snap(p: Pos2) -> Pos2 {
    egui::pos2(p.x.round(), p.y.round())
}
