//! Parallel pose resolution
//!
//! Resolution only reads the hierarchy and one frame, so distinct frames can
//! be resolved on rayon's pool without locking. Results come back in frame
//! order and match serial resolution exactly.

use crate::animation::{Animation, Frame};
use crate::error::Result;
use crate::hierarchy::HierarchyIndex;
use crate::options::PoseOptions;
use crate::pose::Pose;
use rayon::prelude::*;

/// Resolve every frame of `animation` in parallel
pub fn resolve_all(animation: &Animation) -> Result<Vec<Pose<'_>>> {
    log::debug!("Resolving {} frames in parallel", animation.frame_count());

    (0..animation.frame_count())
        .into_par_iter()
        .map(|index| animation.pose(index))
        .collect()
}

/// Resolve a slice of frames against `hierarchy` in parallel
pub fn resolve_frames<'a>(
    hierarchy: &'a HierarchyIndex,
    frames: &[Frame],
    options: &PoseOptions,
) -> Result<Vec<Pose<'a>>> {
    frames
        .par_iter()
        .map(|frame| Pose::resolve_with(hierarchy, frame, options))
        .collect()
}
