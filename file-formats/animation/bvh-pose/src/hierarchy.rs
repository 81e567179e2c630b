//! Depth-first joint hierarchy index
//!
//! Flattens a [`Skeleton`] into depth-first pre-order and records where each
//! joint's parameters start inside a flat frame. A frame stores the channels of
//! every joint back to back in this same order, so the `k`-th channel of the
//! joint at index `i` lives at `param_offset_list()[i] + k`.

use crate::error::{BvhError, Result};
use crate::skeleton::{Joint, JointId, Skeleton};
use std::ops::Range;

/// Immutable depth-first view of a skeleton
#[derive(Debug)]
pub struct HierarchyIndex {
    skeleton: Skeleton,
    node_list: Vec<JointId>,
    param_offset_list: Vec<usize>,
    parent_list: Vec<Option<usize>>,
    subtree_end: Vec<usize>,
    index_by_slot: Vec<Option<usize>>,
    channels_per_frame: usize,
}

impl HierarchyIndex {
    /// Build the index with one pre-order walk from the root.
    ///
    /// The walk uses an explicit stack, so skeleton depth is not limited by
    /// the call stack.
    pub fn new(skeleton: Skeleton) -> Result<Self> {
        let joint_count = skeleton.len();
        let mut node_list = Vec::with_capacity(joint_count);
        let mut param_offset_list = Vec::with_capacity(joint_count);
        let mut parent_list = Vec::with_capacity(joint_count);
        let mut index_by_slot = vec![None; joint_count];
        let mut counter = 0usize;

        // (arena slot, depth-first index of the parent)
        let mut stack: Vec<(usize, Option<usize>)> = vec![(skeleton.root().slot(), None)];

        while let Some((slot, parent)) = stack.pop() {
            let joint = skeleton.joint_at(slot).ok_or_else(|| {
                BvhError::InvalidHierarchy(format!("child slot {} does not exist", slot))
            })?;
            if index_by_slot[slot].is_some() {
                return Err(BvhError::InvalidHierarchy(format!(
                    "joint '{}' is reachable more than once",
                    joint.name()
                )));
            }

            let index = node_list.len();
            index_by_slot[slot] = Some(index);
            node_list.push(skeleton.id(slot));
            param_offset_list.push(counter);
            parent_list.push(parent);
            counter += joint.channel_count();

            // Reversed so the first child is popped first
            for &child in joint.child_slots().iter().rev() {
                stack.push((child, Some(index)));
            }
        }

        // In pre-order every descendant follows its ancestor, so one reverse
        // sweep widens each parent's block to cover its children's blocks.
        let mut subtree_end: Vec<usize> = (1..=node_list.len()).collect();
        for index in (1..node_list.len()).rev() {
            if let Some(parent) = parent_list[index] {
                subtree_end[parent] = subtree_end[parent].max(subtree_end[index]);
            }
        }

        log::debug!(
            "Indexed skeleton: {} joints reachable of {}, {} channels per frame",
            node_list.len(),
            joint_count,
            counter
        );

        Ok(Self {
            skeleton,
            node_list,
            param_offset_list,
            parent_list,
            subtree_end,
            index_by_slot,
            channels_per_frame: counter,
        })
    }

    /// The indexed skeleton
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Identity of the root joint
    pub fn root(&self) -> JointId {
        self.skeleton.root()
    }

    /// Number of indexed joints
    pub fn len(&self) -> usize {
        self.node_list.len()
    }

    /// Whether the index holds no joints
    pub fn is_empty(&self) -> bool {
        self.node_list.is_empty()
    }

    /// Joints in depth-first pre-order
    pub fn node_list(&self) -> &[JointId] {
        &self.node_list
    }

    /// Start of each joint's parameters within a frame, aligned with [`Self::node_list`]
    pub fn param_offset_list(&self) -> &[usize] {
        &self.param_offset_list
    }

    /// Total number of parameters a complete frame holds
    pub fn channels_per_frame(&self) -> usize {
        self.channels_per_frame
    }

    /// Depth-first index of a joint
    pub fn index_of(&self, joint: JointId) -> Result<usize> {
        let slot = self.skeleton.slot_of(joint)?;
        self.index_by_slot[slot].ok_or_else(|| BvhError::NotFound {
            joint: joint.to_string(),
        })
    }

    /// Parameter offset of the joint at a depth-first index
    pub fn offset_by_index(&self, index: usize) -> Result<usize> {
        self.param_offset_list
            .get(index)
            .copied()
            .ok_or_else(|| BvhError::joint_index(index, self.len()))
    }

    /// Parameter offset of a joint
    pub fn offset_by_identity(&self, joint: JointId) -> Result<usize> {
        let index = self.index_of(joint)?;
        Ok(self.param_offset_list[index])
    }

    /// Joint data at a depth-first index
    pub fn joint_by_index(&self, index: usize) -> Result<&Joint> {
        let id = self
            .node_list
            .get(index)
            .ok_or_else(|| BvhError::joint_index(index, self.len()))?;
        self.skeleton.joint(*id)
    }

    /// Depth-first index of the parent of the joint at `index`
    pub fn parent_index(&self, index: usize) -> Result<Option<usize>> {
        self.parent_list
            .get(index)
            .copied()
            .ok_or_else(|| BvhError::joint_index(index, self.len()))
    }

    /// The contiguous block of indices covering a joint and all its descendants
    pub fn subtree_range(&self, index: usize) -> Result<Range<usize>> {
        let end = self
            .subtree_end
            .get(index)
            .copied()
            .ok_or_else(|| BvhError::joint_index(index, self.len()))?;
        Ok(index..end)
    }

    /// First joint with the given name in depth-first order
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.node_list.iter().position(|&id| {
            self.skeleton
                .joint(id)
                .is_ok_and(|joint| joint.name() == name)
        })
    }

    /// Depth-first indices of the direct children of `index`, in child-list order.
    ///
    /// Each child block is skipped as a whole, so the caller never sees a
    /// grandchild.
    pub(crate) fn child_indices(&self, index: usize) -> Vec<usize> {
        let mut children = Vec::new();
        let end = self.subtree_end[index];
        let mut next = index + 1;
        while next < end {
            children.push(next);
            next = self.subtree_end[next];
        }
        children
    }
}

impl Clone for HierarchyIndex {
    // The skeleton is never modified once indexed, so the copy keeps its
    // identity space and existing joint ids stay valid.
    fn clone(&self) -> Self {
        Self {
            skeleton: self.skeleton.clone_with_same_tag(),
            node_list: self.node_list.clone(),
            param_offset_list: self.param_offset_list.clone(),
            parent_list: self.parent_list.clone(),
            subtree_end: self.subtree_end.clone(),
            index_by_slot: self.index_by_slot.clone(),
            channels_per_frame: self.channels_per_frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use glam::DVec3;
    use pretty_assertions::assert_eq;

    /// n0 [Xposition Yposition] -> (n1 [Xrotation] -> n1_1 [Xrotation]), n2
    fn branching() -> (Skeleton, [JointId; 4]) {
        let mut skeleton =
            Skeleton::new("n0", DVec3::ZERO, [Channel::XPosition, Channel::YPosition]);
        let n0 = skeleton.root();
        let n1 = skeleton
            .add_joint(n0, "n1", DVec3::ZERO, [Channel::XRotation])
            .unwrap();
        let n2 = skeleton.add_joint(n0, "n2", DVec3::ZERO, []).unwrap();
        let n1_1 = skeleton
            .add_joint(n1, "n1_1", DVec3::ZERO, [Channel::XRotation])
            .unwrap();
        (skeleton, [n0, n1, n1_1, n2])
    }

    #[test]
    fn test_depth_first_order() {
        let (skeleton, ids) = branching();
        let index = HierarchyIndex::new(skeleton).unwrap();

        // n2 was added before n1_1 but comes after n1's whole subtree
        assert_eq!(index.node_list(), &ids);
        assert_eq!(index.param_offset_list(), &[0, 2, 3, 4]);
        assert_eq!(index.channels_per_frame(), 4);
    }

    #[test]
    fn test_lookup_by_identity() {
        let (skeleton, [n0, n1, n1_1, n2]) = branching();
        let index = HierarchyIndex::new(skeleton).unwrap();

        assert_eq!(index.index_of(n0).unwrap(), 0);
        assert_eq!(index.index_of(n1).unwrap(), 1);
        assert_eq!(index.index_of(n1_1).unwrap(), 2);
        assert_eq!(index.index_of(n2).unwrap(), 3);

        assert_eq!(index.offset_by_identity(n1).unwrap(), 2);
        assert_eq!(index.offset_by_identity(n1_1).unwrap(), 3);
        assert_eq!(index.offset_by_identity(n2).unwrap(), 4);
    }

    #[test]
    fn test_lookup_errors() {
        let (skeleton, _) = branching();
        let index = HierarchyIndex::new(skeleton).unwrap();
        let other = Skeleton::new("other", DVec3::ZERO, []);

        assert!(matches!(
            index.index_of(other.root()),
            Err(BvhError::NotFound { .. })
        ));
        assert_eq!(index.offset_by_index(4), Err(BvhError::joint_index(4, 4)));
        assert!(index.joint_by_index(10).is_err());
    }

    #[test]
    fn test_subtree_ranges() {
        let (skeleton, _) = branching();
        let index = HierarchyIndex::new(skeleton).unwrap();

        assert_eq!(index.subtree_range(0).unwrap(), 0..4);
        assert_eq!(index.subtree_range(1).unwrap(), 1..3);
        assert_eq!(index.subtree_range(2).unwrap(), 2..3);
        assert_eq!(index.subtree_range(3).unwrap(), 3..4);
        assert_eq!(index.child_indices(0), vec![1, 3]);
        assert_eq!(index.child_indices(1), vec![2]);
        assert!(index.child_indices(3).is_empty());
    }

    #[test]
    fn test_parents_and_names() {
        let (skeleton, _) = branching();
        let index = HierarchyIndex::new(skeleton).unwrap();

        assert_eq!(index.parent_index(0).unwrap(), None);
        assert_eq!(index.parent_index(2).unwrap(), Some(1));
        assert_eq!(index.parent_index(3).unwrap(), Some(0));
        assert_eq!(index.find_by_name("n1_1"), Some(2));
        assert_eq!(index.find_by_name("missing"), None);
        assert_eq!(index.joint_by_index(3).unwrap().name(), "n2");
    }

    #[test]
    fn test_deep_chain() {
        // Deep enough that a recursive walk would be uncomfortable
        let mut skeleton = Skeleton::new("root", DVec3::ZERO, [Channel::ZRotation]);
        let mut parent = skeleton.root();
        for i in 0..50_000 {
            parent = skeleton
                .add_joint(parent, format!("j{}", i), DVec3::Y, [Channel::ZRotation])
                .unwrap();
        }

        let index = HierarchyIndex::new(skeleton).unwrap();
        assert_eq!(index.len(), 50_001);
        assert_eq!(index.offset_by_index(50_000).unwrap(), 50_000);
        assert_eq!(index.subtree_range(0).unwrap(), 0..50_001);
    }
}
