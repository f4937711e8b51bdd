use egui::Pos2;
use rand::Rng;

use super::{BrushStyle, sample_segment, snap};
use crate::layer::LayerBuffer;
use crate::raster;

/// Alpha at the center of each dab (about 16%)
const CENTER_ALPHA: f32 = 0.16;

/// Watercolor: soft radial dabs that build up translucently where they overlap.
pub fn watercolor_between(
    from: Pos2,
    to: Pos2,
    style: &BrushStyle,
    layer: &mut LayerBuffer,
    rng: &mut impl Rng,
) {
    let Some(samples) = sample_segment(from, to, style.stroke_width) else {
        return;
    };

    let color = raster::rgba(style.color);
    let base_radius = (style.stroke_width as f32 * 1.3).max(4.0);
    for p in samples.points {
        let radius = base_radius * rng.random_range(0.85..1.45);
        raster::radial_dab(layer, snap(p), radius, color, CENTER_ALPHA);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn overlapping_dabs_accumulate() {
        let style = BrushStyle {
            color: Color32::from_rgb(0, 0, 200),
            stroke_width: 4,
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mut layer = LayerBuffer::new(40, 40);

        watercolor_between(pos2(20.0, 20.0), pos2(21.0, 20.0), &style, &mut layer, &mut rng);
        let single = layer.pixel(21, 20).unwrap()[3];
        for _ in 0..5 {
            watercolor_between(pos2(20.0, 20.0), pos2(21.0, 20.0), &style, &mut layer, &mut rng);
        }
        let stacked = layer.pixel(21, 20).unwrap()[3];

        assert!(single > 0 && single <= 41);
        assert!(stacked > single);
        let [r, g, b, _] = layer.pixel(21, 20).unwrap();
        assert_eq!([r, g], [0, 0]);
        assert!((b as i32 - 200).abs() <= 8, "blue drifted to {b}");
    }
}
