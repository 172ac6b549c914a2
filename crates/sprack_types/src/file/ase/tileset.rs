//! Embedded tilesets.

use std::fmt;

use crate::color::{Pixel, Rgba};

use super::constants::tileset_flags;
use super::user_data::UserData;

/// A tileset with all tiles stacked top-to-bottom in one pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset<P = Rgba> {
	pub(crate) id: u32,
	pub(crate) flags: u32,
	pub(crate) tile_count: u32,
	pub(crate) tile_width: u16,
	pub(crate) tile_height: u16,
	pub(crate) base_index: i16,
	pub(crate) name: String,
	pub(crate) pixels: Vec<P>,
	pub(crate) user_data: Option<UserData>,
}

impl<P: Pixel> Tileset<P> {
	/// Returns the tileset id tilemap layers refer to.
	pub fn id(&self) -> u32 {
		self.id
	}

	/// Returns the number of tiles.
	pub fn tile_count(&self) -> u32 {
		self.tile_count
	}

	/// Returns the width of one tile.
	pub fn tile_width(&self) -> u16 {
		self.tile_width
	}

	/// Returns the height of one tile.
	pub fn tile_height(&self) -> u16 {
		self.tile_height
	}

	/// Returns the index the editor displays for the first tile.
	pub fn base_index(&self) -> i16 {
		self.base_index
	}

	/// Returns `true` if tile 0 is the empty tile.
	pub fn tile_zero_is_empty(&self) -> bool {
		self.flags & tileset_flags::EMPTY_TILE_ZERO != 0
	}

	/// Returns the tileset name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns all tile pixels, `tile_width * tile_height * tile_count` entries.
	pub fn pixels(&self) -> &[P] {
		&self.pixels
	}

	/// Returns the pixels of a single tile.
	pub fn tile(&self, id: u32) -> Option<&[P]> {
		if id >= self.tile_count {
			return None;
		}
		let len = self.tile_width as usize * self.tile_height as usize;
		let start = id as usize * len;
		self.pixels.get(start..start + len)
	}

	/// Returns user data attached to this tileset.
	pub fn user_data(&self) -> Option<&UserData> {
		self.user_data.as_ref()
	}
}

impl<P> fmt::Display for Tileset<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Tileset {} \"{}\": {} tiles of {}x{}",
			self.id, self.name, self.tile_count, self.tile_width, self.tile_height
		)
	}
}
