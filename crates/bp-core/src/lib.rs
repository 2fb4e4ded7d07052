//! Foundational primitives for the bit-planes channel stack.
//!
//! ## Images
//! `Image<T>` owns a contiguous row-major `width x height` grid. Channel
//! extractors own `Image<f32>` grids exclusively and refill them in place on
//! every frame; input frames are borrowed as `ImageView<'_, u8>` for the
//! duration of one call. Input depth is fixed by the element type, so an
//! 8-bit single-channel contract needs no runtime depth check.
//!
//! ## Border Modes
//! Out-of-range coordinates map through [`BorderMode::map`]: clamp
//! (replication), constant fill, or reflect-101 (mirror around edge pixels
//! without repeating them).

mod border;
mod error;
mod image;

pub use border::BorderMode;
pub use error::Error;
pub use image::{Image, ImageView, to_f32, to_f32_into};
