/// 1D tap table addressed by signed offset `-extent..=extent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    extent: usize,
    taps: Vec<f32>,
}

impl Kernel1D {
    pub fn from_taps(extent: usize, taps: Vec<f32>) -> Self {
        assert_eq!(
            taps.len(),
            2 * extent + 1,
            "kernel len must be 2*extent+1"
        );
        Self { extent, taps }
    }

    pub fn box_filter(extent: usize) -> Self {
        let len = 2 * extent + 1;
        Self::from_taps(extent, vec![1.0 / len as f32; len])
    }

    /// Normalized Gaussian with `extent = ceil(3*sigma)`, minimum 1.
    pub fn gaussian(sigma: f32) -> Self {
        DoGKernel1D::new(sigma).g
    }

    /// `[-0.5, 0, 0.5]`: positive response to intensity increasing with the
    /// offset.
    pub fn central_difference() -> Self {
        Self::from_taps(1, vec![-0.5, 0.0, 0.5])
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    #[inline]
    pub fn at(&self, offset: isize) -> f32 {
        self.taps[(offset + self.extent as isize) as usize]
    }

    pub fn sum(&self) -> f32 {
        self.taps.iter().sum()
    }
}

/// Sampled Gaussian `g` paired with its first derivative `dg`, both spanning
/// `-radius..=radius` with `radius = max(1, ceil(3 * sigma))`.
///
/// `g` sums to 1. `dg[x] = x / sigma^2 * g[x]` has the sign of
/// [`Kernel1D::central_difference`], so a rising edge correlates positive;
/// it sums to ~0 and is left unnormalized.
#[derive(Debug, Clone)]
pub struct DoGKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub g: Kernel1D,
    pub dg: Kernel1D,
}

impl DoGKernel1D {
    pub fn new(sigma: f32) -> Self {
        assert!(
            sigma.is_finite() && sigma > 0.0,
            "gaussian sigma must be positive and finite, got {sigma}"
        );

        let radius = ((3.0 * sigma).ceil() as usize).max(1);
        let var = sigma * sigma;
        let offsets = || (-(radius as isize)..=radius as isize).map(|x| x as f32);

        let weights: Vec<f32> = offsets().map(|x| (-0.5 * x * x / var).exp()).collect();
        let total: f32 = weights.iter().sum();
        let g = Kernel1D::from_taps(radius, weights.iter().map(|w| w / total).collect());

        let dg = offsets()
            .zip(g.taps())
            .map(|(x, &gx)| x / var * gx)
            .collect();

        Self {
            sigma,
            radius,
            g,
            dg: Kernel1D::from_taps(radius, dg),
        }
    }
}
