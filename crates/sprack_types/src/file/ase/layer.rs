//! Layers and blend modes.
//!
//! The format stores layers as a flat pre-order list where each entry carries
//! its depth ("child level"). The decoder rebuilds the hierarchy as an arena:
//! every [`Layer`] knows its parent index and group layers list their children
//! by index, so no layer holds a reference to another.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::AseError;

use super::user_data::UserData;

/// The 19 blend modes a layer can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum BlendMode {
	#[default]
	Normal = 0,
	Multiply = 1,
	Screen = 2,
	Overlay = 3,
	Darken = 4,
	Lighten = 5,
	ColorDodge = 6,
	ColorBurn = 7,
	HardLight = 8,
	SoftLight = 9,
	Difference = 10,
	Exclusion = 11,
	Hue = 12,
	Saturation = 13,
	Color = 14,
	Luminosity = 15,
	Addition = 16,
	Subtract = 17,
	Divide = 18,
}

impl BlendMode {
	/// All blend modes in format order.
	pub const ALL: [BlendMode; 19] = [
		Self::Normal,
		Self::Multiply,
		Self::Screen,
		Self::Overlay,
		Self::Darken,
		Self::Lighten,
		Self::ColorDodge,
		Self::ColorBurn,
		Self::HardLight,
		Self::SoftLight,
		Self::Difference,
		Self::Exclusion,
		Self::Hue,
		Self::Saturation,
		Self::Color,
		Self::Luminosity,
		Self::Addition,
		Self::Subtract,
		Self::Divide,
	];
}

impl TryFrom<u16> for BlendMode {
	type Error = AseError;

	fn try_from(value: u16) -> Result<Self, Self::Error> {
		Self::ALL.get(value as usize).copied().ok_or(AseError::UnknownBlendMode(value))
	}
}

impl fmt::Display for BlendMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

/// Layer flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerFlags(u16);

impl LayerFlags {
	/// Layer is visible
	pub const VISIBLE: u16 = 1;
	/// Layer is editable
	pub const EDITABLE: u16 = 2;
	/// Layer movement is locked
	pub const LOCK_MOVEMENT: u16 = 4;
	/// Layer is the background layer
	pub const BACKGROUND: u16 = 8;
	/// New cels on this layer are linked by default
	pub const PREFER_LINKED: u16 = 16;
	/// Group is displayed collapsed
	pub const COLLAPSED: u16 = 32;
	/// Layer is a reference layer
	pub const REFERENCE: u16 = 64;

	/// Wraps raw flag bits.
	pub const fn from_bits(bits: u16) -> Self {
		Self(bits)
	}

	/// Returns the raw flag bits.
	pub const fn bits(self) -> u16 {
		self.0
	}

	#[inline]
	const fn has(self, bit: u16) -> bool {
		self.0 & bit != 0
	}

	/// Returns `true` if the visible flag is set.
	pub const fn is_visible(self) -> bool {
		self.has(Self::VISIBLE)
	}

	/// Returns `true` if the editable flag is set.
	pub const fn is_editable(self) -> bool {
		self.has(Self::EDITABLE)
	}

	/// Returns `true` if movement is locked.
	pub const fn is_movement_locked(self) -> bool {
		self.has(Self::LOCK_MOVEMENT)
	}

	/// Returns `true` if this is the background layer.
	pub const fn is_background(self) -> bool {
		self.has(Self::BACKGROUND)
	}

	/// Returns `true` if new cels prefer linking.
	pub const fn prefers_linked_cels(self) -> bool {
		self.has(Self::PREFER_LINKED)
	}

	/// Returns `true` if the group is collapsed.
	pub const fn is_collapsed(self) -> bool {
		self.has(Self::COLLAPSED)
	}

	/// Returns `true` if this is a reference layer.
	pub const fn is_reference(self) -> bool {
		self.has(Self::REFERENCE)
	}
}

/// What a layer holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
	/// Plain image layer
	Image,
	/// Group of layers
	Group {
		/// Indices of the direct children, bottom to top
		children: Vec<usize>,
	},
	/// Tilemap layer
	Tilemap {
		/// Index into [`Document::tilesets`](super::Document::tilesets)
		tileset: usize,
	},
}

/// A decoded layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
	pub(crate) name: String,
	pub(crate) flags: LayerFlags,
	pub(crate) kind: LayerKind,
	pub(crate) child_level: u16,
	pub(crate) parent: Option<usize>,
	pub(crate) blend_mode: BlendMode,
	pub(crate) opacity: u8,
	pub(crate) user_data: Option<UserData>,
}

impl Layer {
	/// Returns the layer name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the layer flags.
	pub fn flags(&self) -> LayerFlags {
		self.flags
	}

	/// Returns the layer kind.
	pub fn kind(&self) -> &LayerKind {
		&self.kind
	}

	/// Returns the nesting depth stored in the file.
	pub fn child_level(&self) -> u16 {
		self.child_level
	}

	/// Returns the index of the enclosing group, if any.
	pub fn parent(&self) -> Option<usize> {
		self.parent
	}

	/// Returns the blend mode.
	pub fn blend_mode(&self) -> BlendMode {
		self.blend_mode
	}

	/// Returns the layer opacity.
	pub fn opacity(&self) -> u8 {
		self.opacity
	}

	/// Returns user data attached to this layer.
	pub fn user_data(&self) -> Option<&UserData> {
		self.user_data.as_ref()
	}

	/// Returns `true` if the visible flag is set on this layer.
	pub fn is_visible(&self) -> bool {
		self.flags.is_visible()
	}

	/// Returns `true` if this is the background layer.
	pub fn is_background(&self) -> bool {
		self.flags.is_background()
	}

	/// Returns `true` if this is a reference layer.
	pub fn is_reference(&self) -> bool {
		self.flags.is_reference()
	}

	/// Returns `true` if this is a group layer.
	pub fn is_group(&self) -> bool {
		matches!(self.kind, LayerKind::Group { .. })
	}

	/// Returns `true` if this is a tilemap layer.
	pub fn is_tilemap(&self) -> bool {
		matches!(self.kind, LayerKind::Tilemap { .. })
	}

	/// Returns the tileset index of a tilemap layer.
	pub fn tileset(&self) -> Option<usize> {
		match self.kind {
			LayerKind::Tilemap {
				tileset,
			} => Some(tileset),
			_ => None,
		}
	}

	/// Returns `true` if this layer and every enclosing group are visible.
	pub fn is_visible_in_hierarchy(&self, layers: &[Layer]) -> bool {
		if !self.is_visible() {
			return false;
		}
		let mut parent = self.parent;
		while let Some(index) = parent {
			let Some(group) = layers.get(index) else {
				break;
			};
			if !group.is_visible() {
				return false;
			}
			parent = group.parent;
		}
		true
	}
}

impl fmt::Display for Layer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self.kind {
			LayerKind::Image => "image",
			LayerKind::Group {
				..
			} => "group",
			LayerKind::Tilemap {
				..
			} => "tilemap",
		};
		write!(
			f,
			"{}\"{}\" ({kind}, {}, opacity {}{})",
			"  ".repeat(self.child_level as usize),
			self.name,
			self.blend_mode,
			self.opacity,
			if self.is_visible() { "" } else { ", hidden" },
		)
	}
}
