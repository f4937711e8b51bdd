use egui::Pos2;
use rand::Rng;

use super::{BrushStyle, sample_segment, snap};
use crate::layer::LayerBuffer;
use crate::raster;

const SPIKE_CHANCE: f64 = 0.25;
const GAP_CHANCE: f64 = 0.05;

/// Ragged ink: a jittered core band of about twice the stroke width, tapered spikes off the
/// normal, and occasional transparent micro-gaps.
pub fn textured_ink_between(
    from: Pos2,
    to: Pos2,
    style: &BrushStyle,
    layer: &mut LayerBuffer,
    rng: &mut impl Rng,
) {
    let Some(samples) = sample_segment(from, to, style.stroke_width) else {
        return;
    };

    let tangent = samples.tangent;
    let normal = tangent.rot90();
    let base_width = (style.stroke_width * 2).max(2) as f32;
    let color = raster::rgba(style.color);

    for p in samples.points {
        let width = base_width * rng.random_range(0.85..1.25);
        raster::draw_line(layer, snap(p - tangent), snap(p + tangent), width, color);

        let spikes = (width / 10.0).max(1.0) as usize;
        for _ in 0..spikes {
            if !rng.random_bool(SPIKE_CHANCE) {
                continue;
            }
            let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let base = p + normal * side * (width * 0.5 * rng.random_range(0.6..1.2));
            let len = width * rng.random_range(0.3..1.2);
            let half_base = (width * rng.random_range(0.05..0.17)).max(1.0);

            let spike = [
                snap(base + normal * side * len),
                snap(base - tangent * half_base),
                snap(base + tangent * half_base),
            ];
            raster::fill_triangle(layer, &spike, color);
        }

        if rng.random_bool(GAP_CHANCE) {
            let gap = (width * 0.4).max(1.0).floor();
            layer.clear_circle(p, gap / 2.0);
        }
    }
}
