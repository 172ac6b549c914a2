//! Tilemaps: per-layer tile grids with the tilesets they index.

use std::collections::HashSet;

use serde::Serialize;
use sprack_types::color::Pixel;
use sprack_types::file::ase::{BlendMode, Document, Tile};

use crate::blend::round8;
use crate::error::BuildError;
use crate::options::ProcessorOptions;
use crate::tileset::{TilesetTexture, build_tileset_texture};

/// The tiles one tilemap layer shows on one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TilemapLayer {
	/// Layer name
	pub name: String,
	/// Layer index in the document
	pub layer: usize,
	/// Index into the tilemap's tilesets
	pub tileset: usize,
	/// Grid width in tiles
	pub columns: u16,
	/// Grid height in tiles
	pub rows: u16,
	/// Pixel offset of the grid on the canvas
	pub offset: (i32, i32),
	/// Combined cel and layer opacity
	pub opacity: u8,
	/// Layer blend mode
	pub blend_mode: BlendMode,
	/// Row-major tiles; empty when the layer has no cel on this frame
	pub tiles: Vec<Tile>,
}

/// Tilemap layers of a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap<P> {
	/// Frame index
	pub frame: usize,
	/// Every tileset of the document
	pub tilesets: Vec<TilesetTexture<P>>,
	/// Tilemap layers, bottom to top
	pub layers: Vec<TilemapLayer>,
}

/// Tilemap layers of one frame of an animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TilemapFrame {
	/// Frame index
	pub frame: usize,
	/// Duration in milliseconds
	pub duration: u16,
	/// Tilemap layers, bottom to top
	pub layers: Vec<TilemapLayer>,
}

/// Tilemap layers of every frame, sharing one set of tilesets.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedTilemap<P> {
	/// Every tileset of the document
	pub tilesets: Vec<TilesetTexture<P>>,
	/// One entry per frame
	pub frames: Vec<TilemapFrame>,
}

/// Builds the tilemap of one frame.
pub fn build_tilemap<P: Pixel>(
	doc: &Document<P>,
	frame: usize,
	options: &ProcessorOptions,
) -> Result<Tilemap<P>, BuildError> {
	let selected = select_layers(doc, options)?;
	Ok(Tilemap {
		frame,
		tilesets: doc.tilesets().iter().map(build_tileset_texture).collect(),
		layers: frame_layers(doc, &selected, frame)?,
	})
}

/// Builds the tilemaps of every frame.
pub fn build_animated_tilemap<P: Pixel>(
	doc: &Document<P>,
	options: &ProcessorOptions,
) -> Result<AnimatedTilemap<P>, BuildError> {
	let selected = select_layers(doc, options)?;
	let frames = doc
		.frames()
		.iter()
		.enumerate()
		.map(|(index, frame)| {
			Ok(TilemapFrame {
				frame: index,
				duration: frame.duration(),
				layers: frame_layers(doc, &selected, index)?,
			})
		})
		.collect::<Result<Vec<_>, BuildError>>()?;

	Ok(AnimatedTilemap {
		tilesets: doc.tilesets().iter().map(build_tileset_texture).collect(),
		frames,
	})
}

/// Picks the tilemap layers to emit and checks their names are unique.
fn select_layers<P: Pixel>(doc: &Document<P>, options: &ProcessorOptions) -> Result<Vec<usize>, BuildError> {
	if !options.include_tilemap_layers {
		return Ok(Vec::new());
	}

	let layers = doc.layers();
	let mut names = HashSet::new();
	let mut selected = Vec::new();
	for (index, layer) in layers.iter().enumerate() {
		if !layer.is_tilemap() || layer.is_reference() {
			continue;
		}
		if options.only_visible_layers && !layer.is_visible_in_hierarchy(layers) {
			continue;
		}
		if !names.insert(layer.name()) {
			return Err(BuildError::DuplicateLayerName(layer.name().to_string()));
		}
		selected.push(index);
	}
	Ok(selected)
}

fn frame_layers<P: Pixel>(doc: &Document<P>, selected: &[usize], frame: usize) -> Result<Vec<TilemapLayer>, BuildError> {
	let Some(source) = doc.frame(frame) else {
		return Err(BuildError::FrameOutOfRange {
			frame,
			count: doc.frames().len(),
		});
	};

	let layers = selected
		.iter()
		.filter_map(|&index| {
			let layer = &doc.layers()[index];
			let tileset = layer.tileset()?;
			let cel = source.cel_for_layer(index).and_then(|c| doc.resolve_cel(c));
			let tilemap = cel.and_then(|c| c.tilemap());

			Some(TilemapLayer {
				name: layer.name().to_string(),
				layer: index,
				tileset,
				columns: tilemap.map_or(0, |t| t.width),
				rows: tilemap.map_or(0, |t| t.height),
				offset: cel.map_or((0, 0), |c| (c.x(), c.y())),
				opacity: cel.map_or(layer.opacity(), |c| round8(u32::from(c.opacity()), u32::from(layer.opacity())) as u8),
				blend_mode: layer.blend_mode(),
				tiles: tilemap.map(|t| t.tiles.clone()).unwrap_or_default(),
			})
		})
		.collect();

	Ok(layers)
}
