//! FIR filtering and gradient coloring over bordered planes.
//!
//! Kernels are addressed by signed offset from their center tap and applied
//! as `out[r, c] = sum k[dy, dx] * in[r + dy, c + dx]`. Every filter reads the
//! input's border directly, so the caller extends the boundary first and the
//! input border must be at least the kernel extent. Insufficient border or an
//! output larger than the input is a programmer error and panics.
//!
//! Two execution paths exist for each convolution: a scalar loop and a
//! batched loop that accumulates four adjacent outputs per tap. Both perform
//! the same multiply-adds in the same order and produce identical results.

pub mod batched;
pub mod colorize;
pub mod conv2d;
pub mod gradient;
pub mod kernel;
pub mod kernels1d;
pub mod point;
pub mod separable;

pub use colorize::colorize;
pub use conv2d::{ConvolutionPath, convolve, convolve_with};
pub use gradient::{GradientField, gradient_field, gradient_field_dog};
pub use kernel::{FILTER_EXTENT, Kernel2D, KernelKind};
pub use kernels1d::{DoGKernel1D, Kernel1D};
pub use point::brighten;
pub use separable::{convolve_separable, convolve_separable_with};
