//! Illumination-robust channel extraction for frame-to-frame tracking.
//!
//! An extractor turns one 8-bit intensity frame into a fixed stack of f32
//! channels plus a per-pixel saliency map:
//!
//! - [`RawIntensity`]: the identity transform, one channel.
//! - [`BitPlanes`]: a generalized census transform decomposed into eight
//!   binary planes, optionally smoothed into subpixel-differentiable
//!   indicator fields.
//!
//! Channel count is fixed per variant at compile time
//! ([`ChannelExtractor::NUM_CHANNELS`]); variants are selected statically,
//! not through trait objects.
//!
//! Census contract (fixed, see [`census`]):
//! - neighbor order is row-major over the 8-neighborhood, top-left first;
//! - `center >= neighbor` yields bit 1, so ties resolve to 1;
//! - neighbor coordinates clamp to the image rectangle (replication), so
//!   every pixel carries a full 8-comparison code.

pub mod census;

mod bitplanes;
mod extractor;
mod raw;
mod saliency;

pub use bitplanes::{BitPlanes, DEFAULT_SIGMA, NUM_PLANES};
pub use extractor::ChannelExtractor;
pub use raw::RawIntensity;
