//! Separable Gaussian smoothing primitives.
//!
//! Kernels follow the `radius = ceil(3*sigma)` truncation rule with unit-sum
//! normalization. [`GaussianBlur`] owns its scratch storage and evaluates the
//! two passes in a fixed sequential order, so repeated runs over identical
//! input are float-for-float identical.
//!
//! Sigma values here are always strictly positive; callers that treat
//! `sigma <= 0` as "smoothing disabled" skip the blur entirely instead of
//! constructing a degenerate kernel.

mod blur;
mod kernel;

pub use blur::GaussianBlur;
pub use kernel::GaussianKernel1D;
