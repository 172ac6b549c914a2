//! Tilesets as standalone textures.

use image::RgbaImage;
use sprack_types::color::Pixel;
use sprack_types::file::ase::Tileset;

use crate::raster::to_image;

/// A tileset laid out as one column of tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetTexture<P> {
	/// Tileset id from the document
	pub id: u32,
	/// Tileset name
	pub name: String,
	/// Tile width
	pub tile_width: u32,
	/// Tile height
	pub tile_height: u32,
	/// Number of tiles
	pub tile_count: u32,
	/// Texture width (the tile width)
	pub width: u32,
	/// Texture height (tile height times tile count)
	pub height: u32,
	/// Row-major pixels, tile 0 at the top
	pub pixels: Vec<P>,
}

impl<P: Pixel> TilesetTexture<P> {
	/// Returns the pixel rectangle of a tile as `(x, y, width, height)`.
	pub fn tile_bounds(&self, id: u32) -> Option<(u32, u32, u32, u32)> {
		(id < self.tile_count).then(|| (0, id * self.tile_height, self.tile_width, self.tile_height))
	}

	/// Converts the texture to an `image` buffer.
	pub fn to_image(&self) -> RgbaImage {
		to_image(self.width, self.height, &self.pixels)
	}
}

/// Builds the texture of a tileset.
pub fn build_tileset_texture<P: Pixel>(tileset: &Tileset<P>) -> TilesetTexture<P> {
	let tile_width = u32::from(tileset.tile_width());
	let tile_height = u32::from(tileset.tile_height());
	TilesetTexture {
		id: tileset.id(),
		name: tileset.name().to_string(),
		tile_width,
		tile_height,
		tile_count: tileset.tile_count(),
		width: tile_width,
		height: tile_height * tileset.tile_count(),
		pixels: tileset.pixels().to_vec(),
	}
}
