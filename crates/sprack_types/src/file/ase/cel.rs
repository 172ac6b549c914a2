//! Cels: the payload one layer contributes to one frame.

use crate::color::{Pixel, Rgba};

use super::user_data::UserData;

/// A decoded cel.
#[derive(Debug, Clone, PartialEq)]
pub struct Cel<P = Rgba> {
	pub(crate) layer: usize,
	pub(crate) x: i32,
	pub(crate) y: i32,
	pub(crate) opacity: u8,
	pub(crate) z_index: i16,
	pub(crate) content: CelContent<P>,
	pub(crate) user_data: Option<UserData>,
}

impl<P: Pixel> Cel<P> {
	/// Returns the index of the layer this cel belongs to.
	pub fn layer(&self) -> usize {
		self.layer
	}

	/// Returns the x offset of the cel on the canvas.
	pub fn x(&self) -> i32 {
		self.x
	}

	/// Returns the y offset of the cel on the canvas.
	pub fn y(&self) -> i32 {
		self.y
	}

	/// Returns the cel opacity.
	pub fn opacity(&self) -> u8 {
		self.opacity
	}

	/// Returns the z-index relative to the layer order.
	pub fn z_index(&self) -> i16 {
		self.z_index
	}

	/// Returns the cel payload.
	pub fn content(&self) -> &CelContent<P> {
		&self.content
	}

	/// Returns user data attached to this cel.
	pub fn user_data(&self) -> Option<&UserData> {
		self.user_data.as_ref()
	}

	/// Returns the image payload, if this is an image cel.
	pub fn image(&self) -> Option<&ImageCel<P>> {
		match &self.content {
			CelContent::Image(image) => Some(image),
			_ => None,
		}
	}

	/// Returns the tilemap payload, if this is a tilemap cel.
	pub fn tilemap(&self) -> Option<&TilemapCel> {
		match &self.content {
			CelContent::Tilemap(tilemap) => Some(tilemap),
			_ => None,
		}
	}

	/// Returns the frame a linked cel points at.
	pub fn linked_frame(&self) -> Option<usize> {
		match self.content {
			CelContent::Linked {
				frame,
			} => Some(frame),
			_ => None,
		}
	}

	/// Returns the position used to order cels within a frame.
	///
	/// Cels stack by layer index shifted by their z-index; ties are broken by
	/// the z-index itself.
	pub fn stacking_key(&self) -> (i64, i16) {
		(self.layer as i64 + i64::from(self.z_index), self.z_index)
	}
}

/// Cel payload variants.
#[derive(Debug, Clone, PartialEq)]
pub enum CelContent<P = Rgba> {
	/// Pixel data, either stored raw or compressed in the file
	Image(ImageCel<P>),
	/// Reuses the cel on the same layer in another frame
	Linked {
		/// Frame holding the original cel
		frame: usize,
	},
	/// Grid of tiles referencing the layer's tileset
	Tilemap(TilemapCel),
}

/// Pixel payload of an image cel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCel<P = Rgba> {
	/// Width in pixels
	pub width: u16,
	/// Height in pixels
	pub height: u16,
	/// Row-major pixels, `width * height` entries
	pub pixels: Vec<P>,
}

/// Bitmasks a tilemap cel uses to pack tile ids and flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMasks {
	/// Bits holding the tile id
	pub id: u32,
	/// Bit for horizontal flip
	pub flip_x: u32,
	/// Bit for vertical flip
	pub flip_y: u32,
	/// Bit for diagonal flip
	pub flip_diagonal: u32,
}

impl TileMasks {
	/// Masks the editor writes by default.
	pub const DEFAULT: Self = Self {
		id: 0x1FFF_FFFF,
		flip_x: 0x8000_0000,
		flip_y: 0x4000_0000,
		flip_diagonal: 0x2000_0000,
	};

	/// Splits a packed tile value.
	pub fn unpack(&self, value: u32) -> Tile {
		Tile {
			id: value & self.id,
			flip_x: value & self.flip_x != 0,
			flip_y: value & self.flip_y != 0,
			flip_diagonal: value & self.flip_diagonal != 0,
		}
	}
}

impl Default for TileMasks {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// One tile in a tilemap cel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Tile {
	/// Index into the layer's tileset
	pub id: u32,
	/// Flipped horizontally
	pub flip_x: bool,
	/// Flipped vertically
	pub flip_y: bool,
	/// Flipped along the diagonal
	pub flip_diagonal: bool,
}

/// Tile payload of a tilemap cel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilemapCel {
	/// Grid width in tiles
	pub width: u16,
	/// Grid height in tiles
	pub height: u16,
	/// Bits each packed tile occupied in the file
	pub bits_per_tile: u16,
	/// Masks used to unpack tiles
	pub masks: TileMasks,
	/// Row-major tiles, `width * height` entries
	pub tiles: Vec<Tile>,
}

impl TilemapCel {
	/// Returns the tile at a grid position.
	pub fn tile(&self, column: u16, row: u16) -> Option<&Tile> {
		if column >= self.width || row >= self.height {
			return None;
		}
		self.tiles.get(row as usize * self.width as usize + column as usize)
	}
}
