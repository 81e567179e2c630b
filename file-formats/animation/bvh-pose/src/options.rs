//! Options controlling how frame values are interpreted

use crate::channel::Channel;
use std::f64::consts::PI;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Unit of rotation channel values in frame data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum AngleUnit {
    /// Degrees, the BVH convention
    #[default]
    Degrees,
    /// Radians
    Radians,
}

impl AngleUnit {
    /// Convert a value in this unit to radians
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value * PI / 180.0,
            Self::Radians => value,
        }
    }
}

/// Options for pose resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct PoseOptions {
    /// Unit of rotation channel values
    pub angle_unit: AngleUnit,
    /// Multiplier applied to translation channels and rest offsets,
    /// e.g. `0.01` to turn centimetres into metres
    pub translation_scale: f64,
}

impl Default for PoseOptions {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
            translation_scale: 1.0,
        }
    }
}

impl PoseOptions {
    /// Convert a raw frame value for `channel` into radians or scene units
    pub fn convert(&self, channel: Channel, raw: f64) -> f64 {
        if channel.is_rotation() {
            self.angle_unit.to_radians(raw)
        } else {
            raw * self.translation_scale
        }
    }
}
