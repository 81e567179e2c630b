//! Animation sequences over a fixed skeleton

use crate::error::{BvhError, Result};
use crate::hierarchy::HierarchyIndex;
use crate::options::PoseOptions;
use crate::pose::Pose;
use crate::skeleton::Skeleton;
use std::iter::FusedIterator;
use std::ops::Range;

/// Flat per-frame parameters, one value per channel in depth-first order
pub type Frame = Vec<f64>;

/// A skeleton plus an ordered list of frames.
///
/// Frames are not validated when added; a frame that is too short fails when
/// its pose is resolved, or up front through [`Animation::validate`].
#[derive(Debug, Clone)]
pub struct Animation {
    hierarchy: HierarchyIndex,
    frames: Vec<Frame>,
    frame_time: Option<f64>,
    options: PoseOptions,
}

impl Animation {
    /// Create an animation with no frames
    pub fn new(skeleton: Skeleton) -> Result<Self> {
        Ok(Self::from_hierarchy(HierarchyIndex::new(skeleton)?))
    }

    /// Create an animation with initial frames
    pub fn with_frames(skeleton: Skeleton, frames: Vec<Frame>) -> Result<Self> {
        let mut animation = Self::new(skeleton)?;
        animation.frames = frames;
        Ok(animation)
    }

    /// Create an animation over an already built index
    pub fn from_hierarchy(hierarchy: HierarchyIndex) -> Self {
        Self {
            hierarchy,
            frames: Vec::new(),
            frame_time: None,
            options: PoseOptions::default(),
        }
    }

    /// Set the duration of a single frame in seconds
    pub fn with_frame_time(mut self, seconds: f64) -> Self {
        self.frame_time = Some(seconds);
        self
    }

    /// Set the options used for pose resolution
    pub fn with_options(mut self, options: PoseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the options used for pose resolution
    pub fn set_options(&mut self, options: PoseOptions) {
        self.options = options;
    }

    /// Options used for pose resolution
    pub fn options(&self) -> &PoseOptions {
        &self.options
    }

    /// The depth-first index of the skeleton
    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    /// The animated skeleton
    pub fn skeleton(&self) -> &Skeleton {
        self.hierarchy.skeleton()
    }

    /// Append a frame
    pub fn add_frame(&mut self, frame: impl Into<Frame>) {
        self.frames.push(frame.into());
    }

    /// All frames in order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Parameters of one frame
    pub fn frame(&self, index: usize) -> Result<&[f64]> {
        self.frames
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| BvhError::frame_index(index, self.frames.len()))
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Duration of a single frame in seconds, if known
    pub fn frame_time(&self) -> Option<f64> {
        self.frame_time
    }

    /// Total duration in seconds, if the frame time is known
    pub fn duration(&self) -> Option<f64> {
        self.frame_time.map(|frame_time| frame_time * self.frames.len() as f64)
    }

    /// Check that every frame covers every joint's channels
    pub fn validate(&self) -> Result<()> {
        let required = self.hierarchy.channels_per_frame();
        log::debug!(
            "Validating {} frames against {} channels",
            self.frames.len(),
            required
        );

        for (index, frame) in self.frames.iter().enumerate() {
            if frame.len() < required {
                log::warn!(
                    "Frame {} has {} parameters, expected {}",
                    index,
                    frame.len(),
                    required
                );
                // Report the first joint whose channels run past the end
                return self.pose(index).map(|_| ());
            }
        }

        Ok(())
    }

    /// Resolve the pose of one frame. Nothing is cached.
    pub fn pose(&self, index: usize) -> Result<Pose<'_>> {
        let frame = self.frame(index)?;
        Pose::resolve_with(&self.hierarchy, frame, &self.options)
    }

    /// Lazily resolve every frame in order.
    ///
    /// Each call starts a fresh pass; use [`Animation::pose`] for random access.
    pub fn poses(&self) -> Poses<'_> {
        Poses {
            animation: self,
            range: 0..self.frames.len(),
        }
    }
}

impl<'a> IntoIterator for &'a Animation {
    type Item = Result<Pose<'a>>;
    type IntoIter = Poses<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses()
    }
}

/// Lazy iterator over the poses of an [`Animation`]
#[derive(Debug, Clone)]
pub struct Poses<'a> {
    animation: &'a Animation,
    range: Range<usize>,
}

impl<'a> Iterator for Poses<'a> {
    type Item = Result<Pose<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|index| self.animation.pose(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.range.nth(n).map(|index| self.animation.pose(index))
    }
}

impl DoubleEndedIterator for Poses<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|index| self.animation.pose(index))
    }
}

impl ExactSizeIterator for Poses<'_> {}

impl FusedIterator for Poses<'_> {}
