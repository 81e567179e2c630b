//! Error types for hierarchy indexing and pose resolution

use std::fmt;
use thiserror::Error;

/// Which index space an out-of-range index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Depth-first joint index into a hierarchy
    Joint,
    /// Frame index into an animation
    Frame,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joint => write!(f, "joint"),
            Self::Frame => write!(f, "frame"),
        }
    }
}

/// Errors that can occur while indexing a skeleton or resolving poses
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BvhError {
    /// The joint does not belong to this hierarchy
    #[error("Joint not found in hierarchy: {joint}")]
    NotFound {
        /// Description of the joint that was looked up
        joint: String,
    },

    /// A joint or frame index is outside the valid range
    #[error("{kind} index {index} out of range (count: {len})")]
    IndexOutOfRange {
        /// The index space
        kind: IndexKind,
        /// The requested index
        index: usize,
        /// Number of valid entries
        len: usize,
    },

    /// A frame is too short to hold all channels of a joint
    #[error(
        "Frame too short for joint '{joint}': needs {required} parameters, has {available}"
    )]
    ChannelOutOfRange {
        /// Name of the joint whose channels could not be read
        joint: String,
        /// Minimum frame length needed by the joint
        required: usize,
        /// Actual frame length
        available: usize,
    },

    /// A channel identifier is not one of the six recognized kinds
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// The skeleton tree was modified in an unsupported way
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),
}

/// Type alias for Results from hierarchy and pose operations
pub type Result<T> = std::result::Result<T, BvhError>;

impl BvhError {
    pub(crate) fn joint_index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::Joint,
            index,
            len,
        }
    }

    pub(crate) fn frame_index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::Frame,
            index,
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BvhError::UnknownChannel("Wrotation".to_string());
        assert_eq!(format!("{}", error), "Unknown channel: Wrotation");

        let error = BvhError::frame_index(5, 2);
        assert_eq!(format!("{}", error), "frame index 5 out of range (count: 2)");

        let error = BvhError::ChannelOutOfRange {
            joint: "Hips".to_string(),
            required: 6,
            available: 3,
        };
        assert_eq!(
            format!("{}", error),
            "Frame too short for joint 'Hips': needs 6 parameters, has 3"
        );
    }
}
