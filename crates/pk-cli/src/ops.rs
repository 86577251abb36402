use std::path::Path;

use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use pk_bmp::{read_image, write_image};
use pk_core::{BoundaryExtension, Error as CoreError, Image, Plane, Sample, SampleRange};
use pk_filter::{
    ConvolutionPath, DoGKernel1D, FILTER_EXTENT, Kernel1D, Kernel2D, KernelKind, brighten,
    colorize, convolve_separable_with, convolve_with, gradient_field, gradient_field_dog,
};
use pk_resample::{upscale_bilinear, upscale_sinc, upscaled_dims};
use serde::Serialize;

/// Border allocated for integer planes by `brighten`.
pub const BRIGHTEN_BORDER: usize = 16;

/// Accepted `dog` scale range.
pub const DOG_SIGMA_RANGE: (f32, f32) = (1.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Extension {
    Zero,
    Hold,
    Symmetric,
}

impl From<Extension> for BoundaryExtension {
    fn from(e: Extension) -> Self {
        match e {
            Extension::Zero => BoundaryExtension::Zero,
            Extension::Hold => BoundaryExtension::ZeroOrderHold,
            Extension::Symmetric => BoundaryExtension::Symmetric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKernel {
    Box,
    Unsharp,
    BlurUpperLeft,
    BlurLowerRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Execution {
    #[default]
    Scalar,
    Batched,
}

impl From<Execution> for ConvolutionPath {
    fn from(e: Execution) -> Self {
        match e {
            Execution::Scalar => ConvolutionPath::Scalar,
            Execution::Batched => ConvolutionPath::Batched,
        }
    }
}

/// One pipeline stage with its parameters, applied to every frame of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum Operation {
    Brighten {
        delta: i32,
    },
    Filter {
        kernel: FilterKernel,
        alpha: f32,
        extension: Extension,
        path: Execution,
    },
    Blur {
        extent: usize,
        extension: Extension,
        path: Execution,
    },
    Gaussian {
        sigma: f32,
        extension: Extension,
        path: Execution,
    },
    Bilinear {
        scale: usize,
        extension: Extension,
    },
    Sinc {
        scale: usize,
        half_width: usize,
        extension: Extension,
    },
    Gradient {
        gain: f32,
        thin: bool,
        extension: Extension,
    },
    Dog {
        sigma: f32,
        gain: f32,
        thin: bool,
        extension: Extension,
    },
}

/// Geometry of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub width: usize,
    pub height: usize,
    pub components: usize,
    pub out_width: usize,
    pub out_height: usize,
    pub out_components: usize,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brighten { .. } => "brighten",
            Self::Filter { .. } => "filter",
            Self::Blur { .. } => "blur",
            Self::Gaussian { .. } => "gaussian",
            Self::Bilinear { .. } => "bilinear",
            Self::Sinc { .. } => "sinc",
            Self::Gradient { .. } => "gradient",
            Self::Dog { .. } => "dog",
        }
    }

    /// Rejects parameters no frame could be processed with.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Brighten { .. } | Self::Blur { .. } => {}
            Self::Filter { alpha, .. } => {
                ensure!(alpha.is_finite(), "alpha must be finite, got {alpha}");
            }
            Self::Gaussian { sigma, .. } => {
                ensure!(
                    sigma.is_finite() && sigma > 0.0,
                    "sigma must be positive, got {sigma}"
                );
            }
            Self::Bilinear { scale, .. } => {
                ensure!(scale > 0, "scale must be at least 1");
            }
            Self::Sinc {
                scale, half_width, ..
            } => {
                ensure!(scale > 0, "scale must be at least 1");
                ensure!(half_width > 0, "half-width must be at least 1");
            }
            Self::Gradient { gain, .. } => {
                ensure!(gain.is_finite(), "gain must be finite, got {gain}");
            }
            Self::Dog { sigma, gain, .. } => {
                let (lo, hi) = DOG_SIGMA_RANGE;
                ensure!(
                    (lo..=hi).contains(&sigma),
                    "sigma must be in the range {lo} to {hi}, got {sigma}"
                );
                ensure!(gain.is_finite(), "gain must be finite, got {gain}");
            }
        }
        Ok(())
    }

    /// Border allocated around every input plane.
    pub fn border(&self) -> usize {
        match *self {
            Self::Brighten { .. } => BRIGHTEN_BORDER,
            Self::Filter { .. } => FILTER_EXTENT,
            Self::Blur { extent, .. } => extent,
            Self::Gaussian { sigma, .. } => Kernel1D::gaussian(sigma).extent(),
            Self::Bilinear { .. } | Self::Gradient { .. } => 1,
            Self::Sinc { half_width, .. } => half_width,
            Self::Dog { sigma, .. } => 3 * (sigma + 1.0).floor() as usize,
        }
    }

    /// Reads `input`, applies the operation, and writes `output`.
    pub fn apply(&self, input: &Path, output: &Path) -> Result<FrameStats> {
        let border = self.border();

        let summary = match *self {
            Self::Brighten { delta } => {
                let mut img: Image<i32> = load(input, border)?;
                for p in img.planes_mut() {
                    brighten(p, delta);
                }
                store(output, &img)?;
                stats(&img, &img)
            }
            _ => {
                let mut img: Image<f32> = load(input, border)?;
                if let Some(e) = self.extension() {
                    img.extend_boundary(e.into());
                }
                let out = self.process(&img)?;
                store(output, &out)?;
                stats(&img, &out)
            }
        };
        Ok(summary)
    }

    fn extension(&self) -> Option<Extension> {
        match *self {
            Self::Brighten { .. } => None,
            Self::Filter { extension, .. }
            | Self::Blur { extension, .. }
            | Self::Gaussian { extension, .. }
            | Self::Bilinear { extension, .. }
            | Self::Sinc { extension, .. }
            | Self::Gradient { extension, .. }
            | Self::Dog { extension, .. } => Some(extension),
        }
    }

    /// Float pipeline for every operation except `brighten`. `img` already
    /// has its boundary extended.
    fn process(&self, img: &Image<f32>) -> Result<Image<f32>> {
        let out = match self {
            Self::Brighten { .. } => unreachable!("brighten runs on integer planes"),
            Self::Filter {
                kernel,
                alpha,
                path,
                ..
            } => {
                let kernel = Kernel2D::build(&kernel_kind(*kernel, *alpha));
                map_planes(img, |p| {
                    let mut o = Plane::new(p.width(), p.height(), 0);
                    convolve_with((*path).into(), p, &mut o, &kernel, SampleRange::BYTE);
                    o
                })?
            }
            Self::Blur { extent, path, .. } => {
                let k = Kernel1D::box_filter(*extent);
                separable(img, &k, (*path).into())?
            }
            Self::Gaussian { sigma, path, .. } => {
                let k = Kernel1D::gaussian(*sigma);
                separable(img, &k, (*path).into())?
            }
            Self::Bilinear { scale, .. } => map_planes(img, |p| {
                let (w, h) = upscaled_dims(p.width(), p.height(), *scale);
                let mut o = Plane::new(w, h, 0);
                upscale_bilinear(p, &mut o, *scale);
                o
            })?,
            Self::Sinc {
                scale, half_width, ..
            } => map_planes(img, |p| {
                let (w, h) = upscaled_dims(p.width(), p.height(), *scale);
                let mut o = Plane::new(w, h, 0);
                upscale_sinc(p, &mut o, *scale, *half_width);
                o
            })?,
            Self::Gradient { gain, thin, .. } => {
                let field = gradient_field(luma(img)?);
                colorize(&field, *gain, *thin)
            }
            Self::Dog {
                sigma, gain, thin, ..
            } => {
                let kernel = DoGKernel1D::new(*sigma);
                let field = gradient_field_dog(luma(img)?, &kernel);
                colorize(&field, *gain, *thin)
            }
        };
        Ok(out)
    }
}

fn kernel_kind(kernel: FilterKernel, alpha: f32) -> KernelKind {
    match kernel {
        FilterKernel::Box => KernelKind::Box {
            extent: FILTER_EXTENT,
        },
        FilterKernel::Unsharp => KernelKind::Unsharp { alpha },
        FilterKernel::BlurUpperLeft => KernelKind::BlurUpperLeft,
        FilterKernel::BlurLowerRight => KernelKind::BlurLowerRight,
    }
}

fn separable(img: &Image<f32>, k: &Kernel1D, path: ConvolutionPath) -> Result<Image<f32>> {
    map_planes(img, |p| {
        let mut o = Plane::new(p.width(), p.height(), 0);
        convolve_separable_with(path, p, &mut o, k, k, SampleRange::BYTE);
        o
    })
}

fn map_planes(
    img: &Image<f32>,
    f: impl FnMut(&Plane<f32>) -> Plane<f32>,
) -> Result<Image<f32>> {
    Ok(Image::from_planes(img.planes().iter().map(f).collect())?)
}

fn luma(img: &Image<f32>) -> Result<&Plane<f32>> {
    img.luma_plane()
        .ok_or(CoreError::InvalidComponents(img.num_components()))
        .context("selecting luminance plane")
}

fn load<T: Sample>(path: &Path, border: usize) -> Result<Image<T>> {
    read_image(path, border).with_context(|| format!("reading {}", path.display()))
}

fn store<T: Sample>(path: &Path, img: &Image<T>) -> Result<()> {
    write_image(path, img).with_context(|| format!("writing {}", path.display()))
}

fn stats<T: Sample, U: Sample>(input: &Image<T>, output: &Image<U>) -> FrameStats {
    let (width, height) = input.dimensions().unwrap_or_default();
    let (out_width, out_height) = output.dimensions().unwrap_or_default();
    FrameStats {
        width,
        height,
        components: input.num_components(),
        out_width,
        out_height,
        out_components: output.num_components(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Execution, Extension, FilterKernel, Operation};

    #[test]
    fn dog_sigma_outside_range_is_rejected() {
        let dog = |sigma| Operation::Dog {
            sigma,
            gain: 1.0,
            thin: false,
            extension: Extension::Hold,
        };
        assert!(dog(0.5).validate().is_err());
        assert!(dog(5.5).validate().is_err());
        assert!(dog(1.0).validate().is_ok());
        assert!(dog(5.0).validate().is_ok());
    }

    #[test]
    fn zero_scale_and_half_width_are_rejected() {
        let sinc = |scale, half_width| Operation::Sinc {
            scale,
            half_width,
            extension: Extension::Hold,
        };
        assert!(sinc(0, 5).validate().is_err());
        assert!(sinc(3, 0).validate().is_err());
        assert!(sinc(3, 5).validate().is_ok());
        let bilinear = Operation::Bilinear {
            scale: 0,
            extension: Extension::Hold,
        };
        assert!(bilinear.validate().is_err());
    }

    #[test]
    fn borders_follow_operation_reach() {
        assert_eq!(Operation::Brighten { delta: 60 }.border(), 16);
        let filter = Operation::Filter {
            kernel: FilterKernel::Unsharp,
            alpha: 0.5,
            extension: Extension::Symmetric,
            path: Execution::Scalar,
        };
        assert_eq!(filter.border(), 4);
        let dog = |sigma| Operation::Dog {
            sigma,
            gain: 1.0,
            thin: true,
            extension: Extension::Hold,
        };
        assert_eq!(dog(1.0).border(), 6);
        assert_eq!(dog(1.5).border(), 6);
        assert_eq!(dog(2.0).border(), 9);
        let gaussian = Operation::Gaussian {
            sigma: 1.2,
            extension: Extension::Symmetric,
            path: Execution::Batched,
        };
        assert_eq!(gaussian.border(), 4);
    }

    #[test]
    fn operation_serializes_with_tag() {
        let op = Operation::Sinc {
            scale: 3,
            half_width: 5,
            extension: Extension::Hold,
        };
        let v = serde_json::to_value(&op).expect("serialize");
        assert_eq!(v["operation"], "sinc");
        assert_eq!(v["half_width"], 5);
        assert_eq!(v["extension"], "hold");
    }
}
