//! Forward kinematics for BVH motion capture skeletons.
//!
//! This crate turns a parsed BVH skeleton and its per-frame channel values
//! into global joint transforms and world positions. Parsing the file itself
//! is left to the caller: build a [`Skeleton`] and hand over the frames as
//! flat `f64` arrays.
//!
//! - [`HierarchyIndex`] flattens the skeleton into depth-first order and
//!   records where each joint's parameters start inside a frame.
//! - [`ChannelParams`] maps one joint's slice of a frame onto a local
//!   transform, composing channels in the joint's declared order.
//! - [`Pose`] resolves a whole frame by propagating global transforms down
//!   the tree.
//! - [`Animation`] holds a skeleton and its frames and resolves poses on
//!   demand.
//!
//! # Example
//!
//! ```
//! use bvh_pose::{Animation, Channel, Skeleton};
//! use glam::DVec3;
//!
//! let mut skeleton = Skeleton::new(
//!     "Hips",
//!     DVec3::ZERO,
//!     [Channel::XPosition, Channel::YPosition],
//! );
//! let hand = skeleton.add_joint(skeleton.root(), "Hand", DVec3::new(10.0, 0.0, 0.0), [])?;
//!
//! let mut animation = Animation::new(skeleton)?;
//! animation.add_frame(vec![10.0, 10.0]);
//!
//! let pose = animation.pose(0)?;
//! assert_eq!(pose.position_by_identity(hand)?, DVec3::new(20.0, 10.0, 0.0));
//! # Ok::<(), bvh_pose::BvhError>(())
//! ```

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod animation;
pub mod channel;
pub mod error;
pub mod hierarchy;
pub mod options;
pub mod parallel;
pub mod params;
pub mod pose;
pub mod skeleton;

pub use animation::{Animation, Frame, Poses};
pub use channel::{Axis, Channel};
pub use error::{BvhError, IndexKind, Result};
pub use hierarchy::HierarchyIndex;
pub use options::{AngleUnit, PoseOptions};
pub use params::{ChannelParams, local_transform};
pub use pose::Pose;
pub use skeleton::{END_SITE_NAME, Joint, JointId, Skeleton};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
