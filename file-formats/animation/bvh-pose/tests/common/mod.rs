//! Skeleton fixtures shared by the integration tests

#![allow(dead_code)]

use bvh_pose::{Channel, JointId, Skeleton};
use glam::{DMat4, DVec3};

pub const ROOT_CHANNELS: [Channel; 6] = [
    Channel::XPosition,
    Channel::YPosition,
    Channel::ZPosition,
    Channel::ZRotation,
    Channel::XRotation,
    Channel::YRotation,
];

pub const JOINT_CHANNELS: [Channel; 3] =
    [Channel::ZRotation, Channel::XRotation, Channel::YRotation];

/// root_name -> joint1 -> joint2 -> End Site, each 20 units up the Y axis
pub fn serial_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::new("root_name", DVec3::ZERO, ROOT_CHANNELS);
    let joint1 = skeleton
        .add_joint(skeleton.root(), "joint1", DVec3::new(0.0, 20.0, 0.0), JOINT_CHANNELS)
        .unwrap();
    let joint2 = skeleton
        .add_joint(joint1, "joint2", DVec3::new(0.0, 20.0, 0.0), JOINT_CHANNELS)
        .unwrap();
    skeleton
        .add_end_site(joint2, DVec3::new(0.0, 20.0, 0.0))
        .unwrap();
    skeleton
}

/// Frames for [`serial_skeleton`]: rest pose, then the root turned 180 degrees about Z
pub fn serial_frames() -> Vec<Vec<f64>> {
    vec![
        vec![0.0; 12],
        vec![0.0, 0.0, 0.0, 180.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]
}

/// root_name with two arms: joint1 up the Y axis and joint2 along the Z axis,
/// each ending in an end site 20 units further out
pub fn parallel_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::new("root_name", DVec3::ZERO, ROOT_CHANNELS);
    let root = skeleton.root();
    let joint1 = skeleton
        .add_joint(root, "joint1", DVec3::new(0.0, 10.0, 0.0), JOINT_CHANNELS)
        .unwrap();
    skeleton
        .add_end_site(joint1, DVec3::new(0.0, 20.0, 0.0))
        .unwrap();
    let joint2 = skeleton
        .add_joint(root, "joint2", DVec3::new(0.0, 0.0, 10.0), JOINT_CHANNELS)
        .unwrap();
    skeleton
        .add_end_site(joint2, DVec3::new(0.0, 0.0, 20.0))
        .unwrap();
    skeleton
}

/// Frames for [`parallel_skeleton`]: rest pose, then both arms folded back
pub fn parallel_frames() -> Vec<Vec<f64>> {
    vec![
        vec![0.0; 12],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 180.0, 0.0, 0.0, 0.0, 180.0, 0.0],
    ]
}

/// A joint with two sibling branches that both need the same parent transform
pub struct ForkedSkeleton {
    pub skeleton: Skeleton,
    pub shared: JointId,
    pub left: JointId,
    pub left_tip: JointId,
    pub right: JointId,
}

pub fn forked_skeleton() -> ForkedSkeleton {
    let mut skeleton = Skeleton::new("root", DVec3::ZERO, [Channel::YRotation]);
    let shared = skeleton
        .add_joint(skeleton.root(), "shared", DVec3::new(0.0, 10.0, 0.0), [Channel::XRotation])
        .unwrap();
    let left = skeleton
        .add_joint(shared, "left", DVec3::new(0.0, 0.0, 30.0), [Channel::XRotation])
        .unwrap();
    let left_tip = skeleton.add_end_site(left, DVec3::new(0.0, 0.0, 5.0)).unwrap();
    let right = skeleton
        .add_joint(shared, "right", DVec3::new(0.0, 0.0, -30.0), [])
        .unwrap();

    ForkedSkeleton {
        skeleton,
        shared,
        left,
        left_tip,
        right,
    }
}

pub fn assert_vec3_eq(actual: DVec3, expected: DVec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-9),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

pub fn assert_mat4_eq(actual: DMat4, expected: DMat4) {
    assert!(
        actual.abs_diff_eq(expected, 1e-9),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
