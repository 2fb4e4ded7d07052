//! Umbrella crate for the `bitplanes` workspace.
//!
//! Re-exports the channel extraction stack and pins down the narrow
//! boundary ([`MotionEstimator`]) through which a pose estimation engine
//! consumes it.

pub use bp_channels::*;
pub use bp_core::*;
pub use bp_filter::*;

mod odometry;

pub use odometry::{FrameMotion, MotionEstimator, Point3f, check_frame_pair};
