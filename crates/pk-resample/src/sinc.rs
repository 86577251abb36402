use std::f32::consts::PI;

use pk_core::Plane;

use crate::assert_upscaled;

/// Hann-windowed sinc: `sinc(pi*x) * 0.5 * (1 + cos(pi*x / H))`, 1 at `x = 0`.
#[inline]
pub fn hann_sinc(x: f32, half_width: usize) -> f32 {
    let sinc = if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    };
    let hann = 0.5 * (1.0 + (PI * x / half_width as f32).cos());
    sinc * hann
}

/// Windowed-sinc upscale of `input` by an integer `scale` into `out`.
///
/// The vertical pass reads input column `floor(x / scale)` and rows
/// `floor(y / scale) + t` for `t in -H..=H` into a full-size intermediate
/// plane. The horizontal pass reads intermediate columns `(u0 + t) * scale`,
/// clamped to the output width; each of those columns holds exactly input
/// column `u0 + t` after the vertical pass. Both passes divide by the sum of
/// the weights they used.
///
/// # Panics
/// Panics if `scale == 0`, `half_width == 0`, `input.border() < half_width`,
/// or `out` is not exactly `scale` times the input extent.
pub fn upscale_sinc(input: &Plane<f32>, out: &mut Plane<f32>, scale: usize, half_width: usize) {
    assert_upscaled(input, out, scale);
    assert!(half_width > 0, "sinc half-width must be positive");
    assert!(
        input.border() >= half_width,
        "input border {} is smaller than sinc half-width {}",
        input.border(),
        half_width
    );

    let h = half_width as isize;
    let s = scale as f32;
    let (out_w, out_h) = (out.width(), out.height());
    let mut vertical = Plane::<f32>::new(out_w, out_h, 0);
    let mut weights = Vec::with_capacity(2 * half_width + 1);

    for y in 0..out_h {
        let (v0, frac_v) = split(y as f32 / s);
        fill_taps(&mut weights, half_width, frac_v);
        let row = vertical.row_mut(y as isize);

        for (x, dst) in row.iter_mut().enumerate() {
            let u0 = (x / scale) as isize;
            let mut sum = 0.0f32;
            let mut wsum = 0.0f32;
            for (t, &w) in (-h..=h).zip(&weights) {
                sum += w * input.get(v0 + t, u0);
                wsum += w;
            }
            *dst = sum / wsum;
        }
    }
    log::trace!("sinc vertical pass done ({out_w}x{out_h})");

    let last_col = out_w as isize - 1;
    for y in 0..out_h as isize {
        let src = vertical.row(y);
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let (u0, frac_u) = split(x as f32 / s);
            fill_taps(&mut weights, half_width, frac_u);

            let mut sum = 0.0f32;
            let mut wsum = 0.0f32;
            for (t, &w) in (-h..=h).zip(&weights) {
                let sx = ((u0 + t) * scale as isize).clamp(0, last_col);
                sum += w * src[sx as usize];
                wsum += w;
            }
            *d = sum / wsum;
        }
    }

    log::debug!(
        "sinc {}x upscale {}x{} -> {}x{}, H = {}",
        scale,
        input.width(),
        input.height(),
        out_w,
        out_h,
        half_width
    );
}

/// Weights `hann_sinc(t - frac)` for `t in -H..=H`.
fn fill_taps(weights: &mut Vec<f32>, half_width: usize, frac: f32) {
    let h = half_width as isize;
    weights.clear();
    weights.extend((-h..=h).map(|t| hann_sinc(t as f32 - frac, half_width)));
}

#[inline]
fn split(pos: f32) -> (isize, f32) {
    let n = pos as isize;
    (n, pos - n as f32)
}
