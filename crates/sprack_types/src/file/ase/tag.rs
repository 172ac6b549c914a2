//! Animation tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::file::AseError;

use super::user_data::UserData;

/// How an animation tag loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopDirection {
	/// Play from first to last frame
	#[default]
	Forward,
	/// Play from last to first frame
	Reverse,
	/// Play forward, then backward
	PingPong,
	/// Play backward, then forward
	PingPongReverse,
}

impl TryFrom<u8> for LoopDirection {
	type Error = AseError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::Forward),
			1 => Ok(Self::Reverse),
			2 => Ok(Self::PingPong),
			3 => Ok(Self::PingPongReverse),
			other => Err(AseError::UnknownLoopDirection(other)),
		}
	}
}

/// A named frame range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	pub(crate) name: String,
	pub(crate) from: u16,
	pub(crate) to: u16,
	pub(crate) direction: LoopDirection,
	pub(crate) repeat: u16,
	pub(crate) color: Rgba,
	pub(crate) user_data: Option<UserData>,
}

impl Tag {
	/// Returns the tag name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the first frame (inclusive).
	pub fn from(&self) -> u16 {
		self.from
	}

	/// Returns the last frame (inclusive).
	pub fn to(&self) -> u16 {
		self.to
	}

	/// Returns the number of frames the tag spans.
	pub fn frame_count(&self) -> usize {
		(self.to as usize + 1).saturating_sub(self.from as usize)
	}

	/// Returns the loop direction.
	pub fn direction(&self) -> LoopDirection {
		self.direction
	}

	/// Returns how many times the animation repeats; 0 means forever.
	pub fn repeat(&self) -> u16 {
		self.repeat
	}

	/// Returns the color stored in the tag record itself.
	pub fn color(&self) -> Rgba {
		self.color
	}

	/// Returns the color to display: the user data color when present,
	/// otherwise the tag color.
	pub fn effective_color(&self) -> Rgba {
		self.user_data.as_ref().and_then(|d| d.color).unwrap_or(self.color)
	}

	/// Returns user data attached to this tag.
	pub fn user_data(&self) -> Option<&UserData> {
		self.user_data.as_ref()
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "\"{}\" frames {}..={} ({:?}", self.name, self.from, self.to, self.direction)?;
		if self.repeat > 0 {
			write!(f, " x{}", self.repeat)?;
		}
		write!(f, ")")
	}
}
