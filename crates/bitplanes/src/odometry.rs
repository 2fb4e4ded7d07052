//! Boundary to the pose estimation engine that consumes channel stacks.
//!
//! The engine itself lives outside this workspace; these types fix the
//! narrow surface it is driven through, so the channel stack carries no
//! dependency on its internals.

use bp_core::{Error, ImageView};

/// Frame-to-frame motion estimate returned by
/// [`MotionEstimator::add_frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMotion {
    /// Rigid-body pose of the current frame w.r.t. the previous one,
    /// row-major 4x4.
    pub pose: [[f32; 4]; 4],
    pub is_keyframe: bool,
}

impl FrameMotion {
    pub fn identity() -> Self {
        let mut pose = [[0.0f32; 4]; 4];
        for (i, row) in pose.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self {
            pose,
            is_keyframe: false,
        }
    }
}

/// Scene point tracked at one pyramid level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Pose estimation engine driven one stereo frame at a time.
///
/// Implementations estimate motion w.r.t. the previously added frame and
/// expose per-pyramid-level point bookkeeping.
pub trait MotionEstimator {
    /// `image` and `disparity` must have identical dimensions; reject a
    /// mismatched pair with [`Error::SizeMismatch`] (see
    /// [`check_frame_pair`]).
    fn add_frame(
        &mut self,
        image: &ImageView<'_, u8>,
        disparity: &ImageView<'_, f32>,
    ) -> Result<FrameMotion, Error>;

    fn num_points_at_level(&self, level: usize) -> usize;

    fn points_at_level(&self, level: usize) -> &[Point3f];
}

/// Validates an image/disparity pair for `add_frame`.
pub fn check_frame_pair(
    image: &ImageView<'_, u8>,
    disparity: &ImageView<'_, f32>,
) -> Result<(), Error> {
    if image.is_empty() {
        return Err(Error::EmptyImage);
    }

    let expected = image.width() * image.height();
    let actual = disparity.width() * disparity.height();
    if image.width() != disparity.width() || image.height() != disparity.height() {
        return Err(Error::SizeMismatch { expected, actual });
    }
    Ok(())
}
