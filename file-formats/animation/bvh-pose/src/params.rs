//! Channel-to-transform mapping for a single joint
//!
//! [`ChannelParams`] pulls a joint's values out of a flat frame and composes
//! them into the joint's local transform.

use crate::channel::Channel;
use crate::error::{BvhError, Result};
use crate::options::PoseOptions;
use crate::skeleton::Joint;
use glam::{DMat4, DVec3};

/// Channel values of one joint for one frame.
///
/// Rotation values are stored in radians and translation values in scene
/// units, i.e. after [`PoseOptions::convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelParams {
    channels: Vec<Channel>,
    values: Vec<f64>,
}

impl ChannelParams {
    /// Read the values of `joint` from `frame`, starting at `offset`
    pub fn from_frame(
        joint: &Joint,
        offset: usize,
        frame: &[f64],
        options: &PoseOptions,
    ) -> Result<Self> {
        let channels = joint.channels();
        let required = offset + channels.len();
        let raw = frame
            .get(offset..required)
            .ok_or_else(|| BvhError::ChannelOutOfRange {
                joint: joint.name().to_string(),
                required,
                available: frame.len(),
            })?;

        let values = channels
            .iter()
            .zip(raw)
            .map(|(&channel, &value)| options.convert(channel, value))
            .collect();

        Ok(Self {
            channels: channels.to_vec(),
            values,
        })
    }

    /// Channels in declaration order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Converted values, aligned with [`Self::channels`]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of the first occurrence of `channel`, if the joint has it
    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.channels
            .iter()
            .position(|&c| c == channel)
            .map(|i| self.values[i])
    }

    /// Rotation about X, Y and Z in radians; absent axes read as zero
    pub fn rotation(&self) -> DVec3 {
        DVec3::new(
            self.get(Channel::XRotation).unwrap_or(0.0),
            self.get(Channel::YRotation).unwrap_or(0.0),
            self.get(Channel::ZRotation).unwrap_or(0.0),
        )
    }

    /// Translation along X, Y and Z; absent axes read as zero
    pub fn translation(&self) -> DVec3 {
        DVec3::new(
            self.get(Channel::XPosition).unwrap_or(0.0),
            self.get(Channel::YPosition).unwrap_or(0.0),
            self.get(Channel::ZPosition).unwrap_or(0.0),
        )
    }

    /// Local transform: identity right-multiplied by one factor per channel,
    /// in declaration order. Absent channels contribute no factor.
    pub fn matrix(&self) -> DMat4 {
        self.channels
            .iter()
            .zip(&self.values)
            .fold(DMat4::IDENTITY, |matrix, (&channel, &value)| {
                matrix * channel.factor(value)
            })
    }
}

/// Local transform of `joint` for one frame
pub fn local_transform(
    joint: &Joint,
    offset: usize,
    frame: &[f64],
    options: &PoseOptions,
) -> Result<DMat4> {
    ChannelParams::from_frame(joint, offset, frame, options).map(|params| params.matrix())
}
