//! Per-frame pose resolution
//!
//! A [`Pose`] is the result of forward kinematics for one frame: every
//! joint's local transform, global transform and world position, stored in
//! the depth-first order of the [`HierarchyIndex`] it was resolved against.

use crate::error::{BvhError, Result};
use crate::hierarchy::HierarchyIndex;
use crate::options::PoseOptions;
use crate::params::ChannelParams;
use crate::skeleton::JointId;
use glam::{DMat4, DVec3};

/// Fully resolved skeleton state for one frame
#[derive(Debug, Clone)]
pub struct Pose<'a> {
    hierarchy: &'a HierarchyIndex,
    frame: Vec<f64>,
    local_params: Vec<ChannelParams>,
    local_matrices: Vec<DMat4>,
    global_matrices: Vec<DMat4>,
    positions: Vec<DVec3>,
}

impl<'a> Pose<'a> {
    /// Resolve `frame` with default options (degrees, unscaled)
    pub fn resolve(hierarchy: &'a HierarchyIndex, frame: &[f64]) -> Result<Self> {
        Self::resolve_with(hierarchy, frame, &PoseOptions::default())
    }

    /// Resolve `frame` against `hierarchy`.
    ///
    /// Joints are visited depth-first from the root. Each stack entry carries
    /// its own parent global transform, so sibling subtrees never observe each
    /// other's state. Any channel error aborts the whole pose.
    pub fn resolve_with(
        hierarchy: &'a HierarchyIndex,
        frame: &[f64],
        options: &PoseOptions,
    ) -> Result<Self> {
        let count = hierarchy.len();
        let mut local_params: Vec<Option<ChannelParams>> = vec![None; count];
        let mut local_matrices = vec![DMat4::IDENTITY; count];
        let mut global_matrices = vec![DMat4::IDENTITY; count];
        let mut positions = vec![DVec3::ZERO; count];

        // (depth-first index, parent global transform)
        let mut stack = vec![(0usize, DMat4::IDENTITY)];

        while let Some((index, parent_global)) = stack.pop() {
            let joint = hierarchy.joint_by_index(index)?;
            let offset = hierarchy.offset_by_index(index)?;

            let params = ChannelParams::from_frame(joint, offset, frame, options)?;
            let local = params.matrix();
            let rest_offset = joint.offset() * options.translation_scale;

            let global = parent_global * DMat4::from_translation(rest_offset) * local;
            positions[index] = parent_global.transform_point3(rest_offset);
            local_matrices[index] = local;
            global_matrices[index] = global;
            local_params[index] = Some(params);

            for child in hierarchy.child_indices(index).into_iter().rev() {
                stack.push((child, global));
            }
        }

        // Every index in 0..count is a descendant of the root, so all slots are filled
        let local_params = local_params
            .into_iter()
            .enumerate()
            .map(|(index, params)| params.ok_or_else(|| BvhError::joint_index(index, count)))
            .collect::<Result<Vec<_>>>()?;

        log::trace!("Resolved pose for {} joints", count);

        Ok(Self {
            hierarchy,
            frame: frame.to_vec(),
            local_params,
            local_matrices,
            global_matrices,
            positions,
        })
    }

    /// The hierarchy this pose was resolved against
    pub fn hierarchy(&self) -> &'a HierarchyIndex {
        self.hierarchy
    }

    /// Raw parameters this pose was resolved from, as copied at resolution time
    pub fn frame(&self) -> &[f64] {
        &self.frame
    }

    /// Number of joints in the pose
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the pose holds no joints
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// World positions in depth-first order
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Local transforms in depth-first order
    pub fn local_matrices(&self) -> &[DMat4] {
        &self.local_matrices
    }

    /// Global transforms in depth-first order
    pub fn global_matrices(&self) -> &[DMat4] {
        &self.global_matrices
    }

    /// Per-joint channel values in depth-first order
    pub fn local_params(&self) -> &[ChannelParams] {
        &self.local_params
    }

    /// World position of the joint at a depth-first index.
    ///
    /// This is where the joint's origin lands before its own channels apply:
    /// its rest offset transformed by the parent's global transform.
    pub fn position_by_index(&self, index: usize) -> Result<DVec3> {
        self.entry(&self.positions, index)
    }

    /// World position of a joint
    pub fn position_by_identity(&self, joint: JointId) -> Result<DVec3> {
        self.position_by_index(self.hierarchy.index_of(joint)?)
    }

    /// Local transform of the joint at a depth-first index
    pub fn local_matrix_by_index(&self, index: usize) -> Result<DMat4> {
        self.entry(&self.local_matrices, index)
    }

    /// Local transform of a joint
    pub fn local_matrix_by_identity(&self, joint: JointId) -> Result<DMat4> {
        self.local_matrix_by_index(self.hierarchy.index_of(joint)?)
    }

    /// Global transform of the joint at a depth-first index
    pub fn global_matrix_by_index(&self, index: usize) -> Result<DMat4> {
        self.entry(&self.global_matrices, index)
    }

    /// Global transform of a joint
    pub fn global_matrix_by_identity(&self, joint: JointId) -> Result<DMat4> {
        self.global_matrix_by_index(self.hierarchy.index_of(joint)?)
    }

    fn entry<T: Copy>(&self, list: &[T], index: usize) -> Result<T> {
        list.get(index)
            .copied()
            .ok_or_else(|| BvhError::joint_index(index, list.len()))
    }
}
