use std::f32::consts::PI;

use pk_core::Image;

use crate::gradient::GradientField;

/// Maps a gradient field to an RGB image: direction sets the hue, magnitude
/// times `gain` sets the chroma (capped at 255).
///
/// With `suppress_non_maxima`, any pixel off the outer ring whose magnitude is
/// not strictly greater than all four axis neighbours is set to black. The
/// outer ring is never suppressed.
///
/// Returned planes are R, G, B with no border.
pub fn colorize(field: &GradientField, gain: f32, suppress_non_maxima: bool) -> Image<f32> {
    let (w, h) = (field.width(), field.height());
    let mut rgb = Image::with_planes(3, w, h, 0);

    for r in 0..h as isize {
        for c in 0..w as isize {
            let m = field.magnitude.get(r, c);
            let d = field.direction.get(r, c);
            let [red, green, blue] = hue_to_rgb(hue(d), (gain * m).min(255.0));
            let planes = rgb.planes_mut();
            planes[0].set(r, c, red);
            planes[1].set(r, c, green);
            planes[2].set(r, c, blue);
        }
    }

    if suppress_non_maxima {
        let mut cleared = 0usize;
        let mag = &field.magnitude;
        for r in 1..h.saturating_sub(1) as isize {
            for c in 1..w.saturating_sub(1) as isize {
                let m = mag.get(r, c);
                let peak = m > mag.get(r - 1, c)
                    && m > mag.get(r + 1, c)
                    && m > mag.get(r, c - 1)
                    && m > mag.get(r, c + 1);
                if !peak {
                    for p in rgb.planes_mut() {
                        p.set(r, c, 0.0);
                    }
                    cleared += 1;
                }
            }
        }
        log::trace!("non-maxima suppression cleared {cleared} pixels");
    }

    log::debug!("colorized {w}x{h} gradient, gain {gain}");
    rgb
}

/// Hue in `[0, 6)` sectors from an angle in `[-pi, pi]`.
#[inline]
fn hue(direction: f32) -> f32 {
    if direction >= 0.0 {
        3.0 / PI * direction
    } else {
        3.0 / PI * (direction + 2.0 * PI)
    }
}

#[inline]
fn hue_to_rgb(hue: f32, chroma: f32) -> [f32; 3] {
    let x = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
    if hue < 1.0 {
        [chroma, x, 0.0]
    } else if hue < 2.0 {
        [x, chroma, 0.0]
    } else if hue < 3.0 {
        [0.0, chroma, x]
    } else if hue < 4.0 {
        [0.0, x, chroma]
    } else if hue < 5.0 {
        [x, 0.0, chroma]
    } else {
        [chroma, 0.0, x]
    }
}
