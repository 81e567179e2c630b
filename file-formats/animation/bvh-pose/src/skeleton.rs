//! Arena-backed joint tree
//!
//! Joints live in a flat arena owned by the [`Skeleton`]. Parents refer to
//! their children by arena slot, so the tree needs no back-references. A
//! [`JointId`] pairs a slot with a tag unique to the skeleton that issued it,
//! which lets lookups reject joints from a different skeleton instead of
//! silently aliasing a slot.

use crate::channel::Channel;
use crate::error::{BvhError, Result};
use glam::DVec3;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Name given to terminal end-site joints
pub const END_SITE_NAME: &str = "End Site";

static NEXT_SKELETON_TAG: AtomicU32 = AtomicU32::new(0);

fn next_tag() -> u32 {
    NEXT_SKELETON_TAG.fetch_add(1, Ordering::Relaxed)
}

/// Stable identity of a joint within one skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId {
    skeleton: u32,
    slot: usize,
}

impl JointId {
    /// Arena slot of the joint (insertion order, not depth-first order)
    pub fn slot(self) -> usize {
        self.slot
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joint #{} of skeleton {}", self.slot, self.skeleton)
    }
}

/// A node of the skeleton tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Joint {
    name: String,
    offset: DVec3,
    channels: Vec<Channel>,
    children: Vec<usize>,
    parent: Option<usize>,
    end_site: bool,
}

impl Joint {
    /// Joint name; names are not required to be unique
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rest-pose displacement from the parent joint
    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    /// Animated channels in composition order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Number of frame parameters this joint consumes
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Whether this joint has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this joint is a terminal end site
    pub fn is_end_site(&self) -> bool {
        self.end_site
    }

    /// Whether this joint has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn child_slots(&self) -> &[usize] {
        &self.children
    }
}

/// A tree of joints rooted at slot 0
///
/// Cloning a skeleton starts a new identity space: ids issued by the clone
/// are not accepted by the original and vice versa. Equality compares joints
/// only.
#[derive(Debug)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Skeleton {
    #[cfg_attr(feature = "serde-support", serde(skip, default = "next_tag"))]
    tag: u32,
    joints: Vec<Joint>,
}

impl Skeleton {
    /// Create a skeleton containing only its root joint
    pub fn new(
        root_name: impl Into<String>,
        offset: DVec3,
        channels: impl IntoIterator<Item = Channel>,
    ) -> Self {
        let root = Joint {
            name: root_name.into(),
            offset,
            channels: channels.into_iter().collect(),
            children: Vec::new(),
            parent: None,
            end_site: false,
        };

        Self {
            tag: next_tag(),
            joints: vec![root],
        }
    }

    /// Identity of the root joint
    pub fn root(&self) -> JointId {
        self.id(0)
    }

    /// Number of joints, end sites included
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Whether the skeleton has no joints; only possible for a deserialized
    /// skeleton, since [`Skeleton::new`] always adds the root
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Append a joint as the last child of `parent`
    pub fn add_joint(
        &mut self,
        parent: JointId,
        name: impl Into<String>,
        offset: DVec3,
        channels: impl IntoIterator<Item = Channel>,
    ) -> Result<JointId> {
        self.attach(parent, name.into(), offset, channels.into_iter().collect(), false)
    }

    /// Append a terminal end site (no channels) below `parent`
    pub fn add_end_site(&mut self, parent: JointId, offset: DVec3) -> Result<JointId> {
        self.attach(parent, END_SITE_NAME.to_string(), offset, Vec::new(), true)
    }

    fn attach(
        &mut self,
        parent: JointId,
        name: String,
        offset: DVec3,
        channels: Vec<Channel>,
        end_site: bool,
    ) -> Result<JointId> {
        let parent_slot = self.slot_of(parent)?;
        if self.joints[parent_slot].end_site {
            return Err(BvhError::InvalidHierarchy(format!(
                "cannot add '{}' below an end site",
                name
            )));
        }

        let slot = self.joints.len();
        self.joints.push(Joint {
            name,
            offset,
            channels,
            children: Vec::new(),
            parent: Some(parent_slot),
            end_site,
        });
        self.joints[parent_slot].children.push(slot);

        Ok(self.id(slot))
    }

    /// Whether `id` was issued by this skeleton
    pub fn contains(&self, id: JointId) -> bool {
        id.skeleton == self.tag && id.slot < self.joints.len()
    }

    /// Look up a joint by identity
    pub fn joint(&self, id: JointId) -> Result<&Joint> {
        let slot = self.slot_of(id)?;
        Ok(&self.joints[slot])
    }

    /// Parent of a joint, `None` for the root
    pub fn parent(&self, id: JointId) -> Result<Option<JointId>> {
        let joint = self.joint(id)?;
        Ok(joint.parent.map(|slot| self.id(slot)))
    }

    /// Children of a joint in declaration order
    pub fn children(&self, id: JointId) -> Result<Vec<JointId>> {
        let joint = self.joint(id)?;
        Ok(joint.children.iter().map(|&slot| self.id(slot)).collect())
    }

    /// Iterate all joints in arena order
    pub fn iter(&self) -> impl Iterator<Item = (JointId, &Joint)> {
        self.joints
            .iter()
            .enumerate()
            .map(|(slot, joint)| (self.id(slot), joint))
    }

    pub(crate) fn slot_of(&self, id: JointId) -> Result<usize> {
        if self.contains(id) {
            Ok(id.slot)
        } else {
            Err(BvhError::NotFound {
                joint: id.to_string(),
            })
        }
    }

    /// Copy that keeps this skeleton's identity space, for owners whose copy
    /// is never modified
    pub(crate) fn clone_with_same_tag(&self) -> Self {
        Self {
            tag: self.tag,
            joints: self.joints.clone(),
        }
    }

    pub(crate) fn joint_at(&self, slot: usize) -> Option<&Joint> {
        self.joints.get(slot)
    }

    pub(crate) fn id(&self, slot: usize) -> JointId {
        JointId {
            skeleton: self.tag,
            slot,
        }
    }
}

impl Clone for Skeleton {
    fn clone(&self) -> Self {
        Self {
            tag: next_tag(),
            joints: self.joints.clone(),
        }
    }
}

impl PartialEq for Skeleton {
    fn eq(&self, other: &Self) -> bool {
        self.joints == other.joints
    }
}
