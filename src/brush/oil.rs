use egui::{Color32, Pos2, Rect, vec2};
use rand::Rng;

use super::{BrushStyle, sample_segment, snap};
use crate::layer::LayerBuffer;
use crate::raster;

const SMEAR_CHANCE: f64 = 0.25;
const SMEAR_ALPHA: f32 = 0.10;

/// Oil: many low-alpha jittered bristles fanned along the tangent, plus occasional soft
/// elliptical smears. The result reads as a thick, partially blended glaze.
pub fn oil_between(
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
    let w = style.stroke_width.max(3) as f32;
    let bristles = (style.stroke_width.max(3) * 2).max(5);

    for p in samples.points {
        let center = snap(p);

        for _ in 0..bristles {
            let spread = rng.random_range(-0.5..0.5) * w * 1.2;
            let start = snap(center + normal * spread);
            let end = snap(start + tangent * (w * rng.random_range(0.7..1.7)));

            let alpha = rng.random_range(0.10..0.20_f32);
            let jittered = jitter(style.color, rng);
            let [r, g, b] = blend_toward_white(jittered, 0.10);
            let width = ((0.5 + rng.random_range(0.0..1.2)) * (w / 3.0)).max(0.8);
            raster::draw_line(layer, start, end, width, [r, g, b, (alpha * 255.0) as u8]);
        }

        if rng.random_bool(SMEAR_CHANCE) {
            let size = vec2((w * 1.8).max(4.0).floor(), (w * 1.2).max(3.0).floor());
            let [r, g, b] = blend_toward_white(style.color.to_srgba_unmultiplied(), 0.12);
            raster::fill_ellipse(
                layer,
                Rect::from_center_size(center, size),
                [r, g, b, (SMEAR_ALPHA * 255.0) as u8],
            );
        }
    }
}

/// Shifts each channel by up to +-6 (a 12-wide window)
fn jitter(color: Color32, rng: &mut impl Rng) -> [u8; 4] {
    let mut out = color.to_srgba_unmultiplied();
    for channel in out.iter_mut().take(3) {
        let delta = (rng.random_range(-0.5..0.5_f32) * 12.0).round() as i32;
        *channel = (*channel as i32 + delta).clamp(0, 255) as u8;
    }
    out
}

fn blend_toward_white(color: [u8; 4], t: f32) -> [u8; 3] {
    let mix = |c: u8| (c as f32 * (1.0 - t) + 255.0 * t).round().clamp(0.0, 255.0) as u8;
    [mix(color[0]), mix(color[1]), mix(color[2])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn glaze_stays_translucent_and_lightened() {
        let style = BrushStyle {
            color: Color32::BLACK,
            stroke_width: 3,
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let mut layer = LayerBuffer::new(48, 48);
        oil_between(pos2(10.0, 24.0), pos2(20.0, 24.0), &style, &mut layer, &mut rng);

        let painted: Vec<[u8; 4]> = layer
            .to_image()
            .pixels()
            .map(|p| p.0)
            .filter(|p| p[3] >= 20)
            .collect();
        assert!(!painted.is_empty());
        // Bristles are lifted toward white, so pure black never appears.
        assert!(painted.iter().all(|p| p[0] > 0 || p[1] > 0 || p[2] > 0));
    }

    #[test]
    fn white_blend() {
        assert_eq!(blend_toward_white([0, 100, 255, 255], 0.2), [51, 131, 255]);
    }
}
