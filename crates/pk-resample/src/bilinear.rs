use pk_core::Plane;

use crate::assert_upscaled;

/// Bilinear upscale of `input` by an integer `scale` into `out`.
///
/// # Panics
/// Panics if `scale == 0` or `out` is not exactly `scale` times the input
/// extent.
pub fn upscale_bilinear(input: &Plane<f32>, out: &mut Plane<f32>, scale: usize) {
    assert_upscaled(input, out, scale);

    let s = scale as f32;
    let b = input.border() as isize;
    let last_row = input.height() as isize + b - 1;
    let last_col = input.width() as isize + b - 1;

    for y in 0..out.height() {
        let (n2, sigma2) = split(y as f32 / s);
        let n2_next = (n2 + 1).min(last_row);

        for x in 0..out.width() {
            let (n1, sigma1) = split(x as f32 / s);
            let n1_next = (n1 + 1).min(last_col);

            let top_left = input.get(n2, n1);
            let top_right = input.get(n2, n1_next);
            let bottom_left = input.get(n2_next, n1);
            let bottom_right = input.get(n2_next, n1_next);

            let v = (1.0 - sigma2) * ((1.0 - sigma1) * top_left + sigma1 * top_right)
                + sigma2 * ((1.0 - sigma1) * bottom_left + sigma1 * bottom_right);
            out.set(y as isize, x as isize, v);
        }
    }

    log::debug!(
        "bilinear {}x upscale {}x{} -> {}x{}",
        scale,
        input.width(),
        input.height(),
        out.width(),
        out.height()
    );
}

/// Integer and fractional parts of a non-negative position.
#[inline]
fn split(pos: f32) -> (isize, f32) {
    let n = pos as isize;
    (n, pos - n as f32)
}
