//! Channel identifiers and their per-channel transform factors
//!
//! A BVH joint animates up to six degrees of freedom. The order in which a
//! joint declares its channels is the order their matrices are composed in,
//! so `Zrotation Xrotation Yrotation` and `Xrotation Yrotation Zrotation`
//! produce different local transforms for the same values.

use crate::error::{BvhError, Result};
use glam::{DMat4, DVec3};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Principal axis of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Unit vector along this axis
    pub fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    /// Component index (0 for X, 1 for Y, 2 for Z)
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// One animated degree of freedom of a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Channel {
    /// Rotation about X, in degrees in frame data
    #[cfg_attr(feature = "serde-support", serde(rename = "Xrotation"))]
    XRotation,
    /// Rotation about Y, in degrees in frame data
    #[cfg_attr(feature = "serde-support", serde(rename = "Yrotation"))]
    YRotation,
    /// Rotation about Z, in degrees in frame data
    #[cfg_attr(feature = "serde-support", serde(rename = "Zrotation"))]
    ZRotation,
    /// Translation along X
    #[cfg_attr(feature = "serde-support", serde(rename = "Xposition"))]
    XPosition,
    /// Translation along Y
    #[cfg_attr(feature = "serde-support", serde(rename = "Yposition"))]
    YPosition,
    /// Translation along Z
    #[cfg_attr(feature = "serde-support", serde(rename = "Zposition"))]
    ZPosition,
}

impl Channel {
    /// All six channel kinds
    pub const ALL: [Self; 6] = [
        Self::XRotation,
        Self::YRotation,
        Self::ZRotation,
        Self::XPosition,
        Self::YPosition,
        Self::ZPosition,
    ];

    /// The identifier used for this channel in BVH files
    pub fn name(self) -> &'static str {
        match self {
            Self::XRotation => "Xrotation",
            Self::YRotation => "Yrotation",
            Self::ZRotation => "Zrotation",
            Self::XPosition => "Xposition",
            Self::YPosition => "Yposition",
            Self::ZPosition => "Zposition",
        }
    }

    /// Whether this is a rotation channel
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::XRotation | Self::YRotation | Self::ZRotation)
    }

    /// Whether this is a translation channel
    pub fn is_translation(self) -> bool {
        !self.is_rotation()
    }

    /// The principal axis this channel acts along
    pub fn axis(self) -> Axis {
        match self {
            Self::XRotation | Self::XPosition => Axis::X,
            Self::YRotation | Self::YPosition => Axis::Y,
            Self::ZRotation | Self::ZPosition => Axis::Z,
        }
    }

    /// Build the transform factor for this channel.
    ///
    /// `value` must already be converted: radians for rotation channels,
    /// scene units for translation channels.
    pub fn factor(self, value: f64) -> DMat4 {
        match self {
            Self::XRotation => DMat4::from_rotation_x(value),
            Self::YRotation => DMat4::from_rotation_y(value),
            Self::ZRotation => DMat4::from_rotation_z(value),
            Self::XPosition | Self::YPosition | Self::ZPosition => {
                DMat4::from_translation(self.axis().unit() * value)
            }
        }
    }

    /// Parse a list of channel identifiers, failing on the first unknown one
    pub fn parse_list<I, S>(identifiers: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers.into_iter().map(|s| s.as_ref().parse()).collect()
    }
}

impl FromStr for Channel {
    type Err = BvhError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.name() == s)
            .ok_or_else(|| BvhError::UnknownChannel(s.to_string()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
