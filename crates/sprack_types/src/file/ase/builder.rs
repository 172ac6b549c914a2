//! Writer for small sprite documents.
//!
//! [`FileBuilder`] serializes documents chunk by chunk in the same layout the
//! decoder reads. It does not try to cover everything the editor can write; it
//! exists so fixtures, benchmarks and tools can produce valid files without
//! shipping binary assets.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::color::Rgba;
use crate::file::AseError;

use super::constants::{self, cel_type, chunk, slice_flags, tileset_flags, user_data_flags};
use super::header::ColorDepth;
use super::layer::{BlendMode, LayerFlags};
use super::slice::SliceKey;
use super::tag::LoopDirection;

/// A layer chunk to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRecord {
	/// Layer name
	pub name: String,
	/// Raw layer flags
	pub flags: u16,
	/// Layer type (0 image, 1 group, 2 tilemap)
	pub kind: u16,
	/// Nesting depth
	pub child_level: u16,
	/// Blend mode
	pub blend_mode: BlendMode,
	/// Layer opacity
	pub opacity: u8,
	/// Tileset id for tilemap layers
	pub tileset_id: u32,
}

impl LayerRecord {
	fn new(name: &str, kind: u16) -> Self {
		Self {
			name: name.to_string(),
			flags: LayerFlags::VISIBLE | LayerFlags::EDITABLE,
			kind,
			child_level: 0,
			blend_mode: BlendMode::Normal,
			opacity: 255,
			tileset_id: 0,
		}
	}

	/// A visible image layer.
	pub fn image(name: &str) -> Self {
		Self::new(name, 0)
	}

	/// A visible group layer.
	pub fn group(name: &str) -> Self {
		Self::new(name, 1)
	}

	/// A visible tilemap layer bound to a tileset id.
	pub fn tilemap(name: &str, tileset_id: u32) -> Self {
		Self {
			tileset_id,
			..Self::new(name, 2)
		}
	}

	/// Sets the nesting depth.
	pub fn child_level(mut self, level: u16) -> Self {
		self.child_level = level;
		self
	}

	/// Replaces the flags.
	pub fn flags(mut self, flags: u16) -> Self {
		self.flags = flags;
		self
	}

	/// Clears the visible flag.
	pub fn hidden(mut self) -> Self {
		self.flags &= !LayerFlags::VISIBLE;
		self
	}

	/// Sets the blend mode.
	pub fn blend_mode(mut self, mode: BlendMode) -> Self {
		self.blend_mode = mode;
		self
	}

	/// Sets the opacity.
	pub fn opacity(mut self, opacity: u8) -> Self {
		self.opacity = opacity;
		self
	}
}

/// Payload of a cel chunk to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CelPayload {
	/// Uncompressed pixels in the document's color depth
	Raw {
		/// Width in pixels
		width: u16,
		/// Height in pixels
		height: u16,
		/// Pixel bytes
		data: Vec<u8>,
	},
	/// Pixels compressed with zlib when written
	Compressed {
		/// Width in pixels
		width: u16,
		/// Height in pixels
		height: u16,
		/// Pixel bytes before compression
		data: Vec<u8>,
	},
	/// Link to an earlier frame
	Linked {
		/// Frame index
		frame: u16,
	},
	/// 32-bit tiles with the default masks, compressed when written
	Tilemap {
		/// Width in tiles
		width: u16,
		/// Height in tiles
		height: u16,
		/// Packed tile values
		tiles: Vec<u32>,
	},
}

/// A cel chunk to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelRecord {
	/// Layer index
	pub layer: u16,
	/// X position
	pub x: i16,
	/// Y position
	pub y: i16,
	/// Cel opacity
	pub opacity: u8,
	/// Z-index
	pub z_index: i16,
	/// Payload
	pub payload: CelPayload,
}

impl CelRecord {
	fn new(layer: u16, x: i16, y: i16, payload: CelPayload) -> Self {
		Self {
			layer,
			x,
			y,
			opacity: 255,
			z_index: 0,
			payload,
		}
	}

	/// An uncompressed image cel.
	pub fn raw(layer: u16, x: i16, y: i16, width: u16, height: u16, data: Vec<u8>) -> Self {
		Self::new(layer, x, y, CelPayload::Raw {
			width,
			height,
			data,
		})
	}

	/// A compressed image cel.
	pub fn compressed(layer: u16, x: i16, y: i16, width: u16, height: u16, data: Vec<u8>) -> Self {
		Self::new(layer, x, y, CelPayload::Compressed {
			width,
			height,
			data,
		})
	}

	/// A cel linked to the same layer in an earlier frame.
	pub fn linked(layer: u16, frame: u16) -> Self {
		Self::new(layer, 0, 0, CelPayload::Linked {
			frame,
		})
	}

	/// A compressed tilemap cel.
	pub fn tilemap(layer: u16, x: i16, y: i16, width: u16, height: u16, tiles: Vec<u32>) -> Self {
		Self::new(layer, x, y, CelPayload::Tilemap {
			width,
			height,
			tiles,
		})
	}

	/// Sets the cel opacity.
	pub fn opacity(mut self, opacity: u8) -> Self {
		self.opacity = opacity;
		self
	}

	/// Sets the z-index.
	pub fn z_index(mut self, z_index: i16) -> Self {
		self.z_index = z_index;
		self
	}
}

/// A tag entry to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
	/// Tag name
	pub name: String,
	/// First frame
	pub from: u16,
	/// Last frame, inclusive
	pub to: u16,
	/// Loop direction
	pub direction: LoopDirection,
	/// Repeat count (0 = forever)
	pub repeat: u16,
	/// Tag color
	pub color: Rgba,
}

impl TagRecord {
	/// A forward tag spanning `from..=to`.
	pub fn new(name: &str, from: u16, to: u16) -> Self {
		Self {
			name: name.to_string(),
			from,
			to,
			direction: LoopDirection::Forward,
			repeat: 0,
			color: Rgba::rgb(0, 0, 0),
		}
	}

	/// Sets the loop direction.
	pub fn direction(mut self, direction: LoopDirection) -> Self {
		self.direction = direction;
		self
	}

	/// Sets the tag color.
	pub fn color(mut self, color: Rgba) -> Self {
		self.color = color;
		self
	}
}

/// A tileset chunk to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetRecord {
	/// Tileset id
	pub id: u32,
	/// Raw flags
	pub flags: u32,
	/// Tileset name
	pub name: String,
	/// Tile width
	pub tile_width: u16,
	/// Tile height
	pub tile_height: u16,
	/// Number of tiles
	pub tile_count: u32,
	/// Base index shown in the editor
	pub base_index: i16,
	/// Pixel bytes of all tiles stacked vertically, before compression
	pub data: Vec<u8>,
}

impl TilesetRecord {
	/// An embedded tileset whose tile 0 is the empty tile.
	pub fn new(id: u32, name: &str, tile_width: u16, tile_height: u16, tile_count: u32, data: Vec<u8>) -> Self {
		Self {
			id,
			flags: tileset_flags::EMBEDDED | tileset_flags::EMPTY_TILE_ZERO,
			name: name.to_string(),
			tile_width,
			tile_height,
			tile_count,
			base_index: 1,
			data,
		}
	}

	/// Replaces the flags.
	pub fn flags(mut self, flags: u32) -> Self {
		self.flags = flags;
		self
	}
}

/// Builds one frame's chunks.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
	duration: u16,
	chunks: Vec<(u16, ChunkBody)>,
	saturate_count: bool,
}

#[derive(Debug, Clone)]
enum ChunkBody {
	Bytes(Vec<u8>),
	Cel(CelRecord),
	Tileset(TilesetRecord),
}

impl FrameBuilder {
	/// Starts a frame with the given duration in milliseconds.
	pub fn new(duration: u16) -> Self {
		Self {
			duration,
			..Self::default()
		}
	}

	/// Writes the chunk count through the 32-bit field only.
	pub fn saturate_chunk_count(mut self) -> Self {
		self.saturate_count = true;
		self
	}

	/// Adds a palette chunk setting entries `0..colors.len()`.
	pub fn palette(self, colors: &[Rgba]) -> Self {
		let mut body = Vec::new();
		put_u32(&mut body, colors.len() as u32);
		put_u32(&mut body, 0);
		put_u32(&mut body, colors.len().saturating_sub(1) as u32);
		body.extend_from_slice(&[0; 8]);
		for color in colors {
			put_u16(&mut body, 0);
			body.extend_from_slice(&[color.r, color.g, color.b, color.a]);
		}
		self.raw_chunk(chunk::PALETTE, body)
	}

	/// Adds a layer chunk.
	pub fn layer(self, layer: LayerRecord) -> Self {
		let mut body = Vec::new();
		put_u16(&mut body, layer.flags);
		put_u16(&mut body, layer.kind);
		put_u16(&mut body, layer.child_level);
		put_u16(&mut body, 0);
		put_u16(&mut body, 0);
		put_u16(&mut body, layer.blend_mode as u16);
		body.push(layer.opacity);
		body.extend_from_slice(&[0; 3]);
		put_string(&mut body, &layer.name);
		if layer.kind == 2 {
			put_u32(&mut body, layer.tileset_id);
		}
		self.raw_chunk(chunk::LAYER, body)
	}

	/// Adds a cel chunk.
	pub fn cel(mut self, cel: CelRecord) -> Self {
		self.chunks.push((chunk::CEL, ChunkBody::Cel(cel)));
		self
	}

	/// Adds a tags chunk.
	pub fn tags(self, tags: &[TagRecord]) -> Self {
		let mut body = Vec::new();
		put_u16(&mut body, tags.len() as u16);
		body.extend_from_slice(&[0; 8]);
		for tag in tags {
			put_u16(&mut body, tag.from);
			put_u16(&mut body, tag.to);
			body.push(tag.direction as u8);
			put_u16(&mut body, tag.repeat);
			body.extend_from_slice(&[0; 6]);
			body.extend_from_slice(&[tag.color.r, tag.color.g, tag.color.b, 0]);
			put_string(&mut body, &tag.name);
		}
		self.raw_chunk(chunk::TAGS, body)
	}

	/// Adds a user data chunk.
	pub fn user_data(self, text: Option<&str>, color: Option<Rgba>) -> Self {
		let mut flags = 0;
		if text.is_some() {
			flags |= user_data_flags::TEXT;
		}
		if color.is_some() {
			flags |= user_data_flags::COLOR;
		}
		let mut body = Vec::new();
		put_u32(&mut body, flags);
		if let Some(text) = text {
			put_string(&mut body, text);
		}
		if let Some(color) = color {
			body.extend_from_slice(&[color.r, color.g, color.b, color.a]);
		}
		self.raw_chunk(chunk::USER_DATA, body)
	}

	/// Adds a slice chunk. Nine-patch and pivot flags follow the first key.
	pub fn slice(self, name: &str, keys: &[SliceKey]) -> Self {
		let mut flags = 0;
		if keys.first().is_some_and(|k| k.center.is_some()) {
			flags |= slice_flags::NINE_PATCH;
		}
		if keys.first().is_some_and(|k| k.pivot.is_some()) {
			flags |= slice_flags::PIVOT;
		}

		let mut body = Vec::new();
		put_u32(&mut body, keys.len() as u32);
		put_u32(&mut body, flags);
		put_u32(&mut body, 0);
		put_string(&mut body, name);
		for key in keys {
			put_u32(&mut body, key.frame);
			put_rect(&mut body, key.bounds.x, key.bounds.y, key.bounds.width, key.bounds.height);
			if flags & slice_flags::NINE_PATCH != 0 {
				let c = key.center.unwrap_or_default();
				put_rect(&mut body, c.x, c.y, c.width, c.height);
			}
			if flags & slice_flags::PIVOT != 0 {
				let p = key.pivot.unwrap_or_default();
				body.extend_from_slice(&p.x.to_le_bytes());
				body.extend_from_slice(&p.y.to_le_bytes());
			}
		}
		self.raw_chunk(chunk::SLICE, body)
	}

	/// Adds a tileset chunk.
	pub fn tileset(mut self, tileset: TilesetRecord) -> Self {
		self.chunks.push((chunk::TILESET, ChunkBody::Tileset(tileset)));
		self
	}

	/// Adds a chunk with an arbitrary type and body.
	pub fn raw_chunk(mut self, chunk_type: u16, body: Vec<u8>) -> Self {
		self.chunks.push((chunk_type, ChunkBody::Bytes(body)));
		self
	}

	/// Appends bytes to the body of the last plain chunk added, the way newer
	/// editor versions extend existing chunks.
	pub fn pad_last_chunk(mut self, bytes: &[u8]) -> Self {
		if let Some((_, ChunkBody::Bytes(body))) = self.chunks.last_mut() {
			body.extend_from_slice(bytes);
		}
		self
	}

	fn to_bytes(&self) -> Result<Vec<u8>, AseError> {
		let mut chunks = Vec::new();
		for (chunk_type, body) in &self.chunks {
			let body = match body {
				ChunkBody::Bytes(bytes) => bytes.clone(),
				ChunkBody::Cel(cel) => cel_body(cel)?,
				ChunkBody::Tileset(tileset) => tileset_body(tileset)?,
			};
			put_u32(&mut chunks, (constants::CHUNK_HEADER_SIZE as usize + body.len()) as u32);
			put_u16(&mut chunks, *chunk_type);
			chunks.extend_from_slice(&body);
		}

		let count = self.chunks.len();
		let mut frame = Vec::with_capacity(constants::FRAME_HEADER_SIZE as usize + chunks.len());
		put_u32(&mut frame, (constants::FRAME_HEADER_SIZE as usize + chunks.len()) as u32);
		put_u16(&mut frame, constants::FRAME_MAGIC);
		if self.saturate_count || count >= constants::CHUNK_COUNT_SATURATED as usize {
			put_u16(&mut frame, constants::CHUNK_COUNT_SATURATED);
		} else {
			put_u16(&mut frame, count as u16);
		}
		put_u16(&mut frame, self.duration);
		put_u16(&mut frame, 0);
		put_u32(&mut frame, count as u32);
		frame.extend_from_slice(&chunks);
		Ok(frame)
	}
}

/// Builds a complete sprite document.
///
/// # Examples
///
/// ```
/// use sprack_types::color::Rgba;
/// use sprack_types::file::ase::{CelRecord, ColorDepth, Document, FileBuilder, FrameBuilder, LayerRecord};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = FileBuilder::new(2, 1, ColorDepth::Rgba)
/// 	.frame(
/// 		FrameBuilder::new(100)
/// 			.layer(LayerRecord::image("body"))
/// 			.cel(CelRecord::raw(0, 0, 0, 2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255])),
/// 	)
/// 	.to_bytes()?;
///
/// let doc: Document = Document::from_bytes(&bytes)?;
/// assert_eq!(doc.frames().len(), 1);
/// assert_eq!(doc.resolve_image(&doc.frames()[0].cels()[0]).unwrap().pixels[0], Rgba::rgb(255, 0, 0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileBuilder {
	width: u16,
	height: u16,
	depth: ColorDepth,
	flags: u32,
	transparent_index: u8,
	color_count: u16,
	grid: (i16, i16, u16, u16),
	frames: Vec<FrameBuilder>,
}

impl FileBuilder {
	/// Starts a document with valid layer opacity and a 256-color palette
	/// declared in the header.
	pub fn new(width: u16, height: u16, depth: ColorDepth) -> Self {
		Self {
			width,
			height,
			depth,
			flags: constants::FLAG_LAYER_OPACITY_VALID,
			transparent_index: 0,
			color_count: 0,
			grid: (0, 0, 16, 16),
			frames: Vec::new(),
		}
	}

	/// Replaces the header flags.
	pub fn flags(mut self, flags: u32) -> Self {
		self.flags = flags;
		self
	}

	/// Sets the transparent palette index.
	pub fn transparent_index(mut self, index: u8) -> Self {
		self.transparent_index = index;
		self
	}

	/// Sets the palette size declared in the header.
	pub fn color_count(mut self, count: u16) -> Self {
		self.color_count = count;
		self
	}

	/// Appends a frame.
	pub fn frame(mut self, frame: FrameBuilder) -> Self {
		self.frames.push(frame);
		self
	}

	/// Serializes the document.
	pub fn to_bytes(&self) -> Result<Vec<u8>, AseError> {
		let mut frames = Vec::new();
		for frame in &self.frames {
			frames.extend_from_slice(&frame.to_bytes()?);
		}

		let mut data = Vec::with_capacity(constants::HEADER_SIZE as usize + frames.len());
		put_u32(&mut data, (constants::HEADER_SIZE as usize + frames.len()) as u32);
		put_u16(&mut data, constants::FILE_MAGIC);
		put_u16(&mut data, self.frames.len() as u16);
		put_u16(&mut data, self.width);
		put_u16(&mut data, self.height);
		put_u16(&mut data, self.depth.bits_per_pixel());
		put_u32(&mut data, self.flags);
		put_u16(&mut data, 100);
		data.extend_from_slice(&[0; 8]);
		data.push(self.transparent_index);
		data.extend_from_slice(&[0; 3]);
		put_u16(&mut data, self.color_count);
		data.extend_from_slice(&[1, 1]);
		data.extend_from_slice(&self.grid.0.to_le_bytes());
		data.extend_from_slice(&self.grid.1.to_le_bytes());
		put_u16(&mut data, self.grid.2);
		put_u16(&mut data, self.grid.3);
		data.resize(constants::HEADER_SIZE as usize, 0);

		data.extend_from_slice(&frames);
		Ok(data)
	}
}

fn cel_body(cel: &CelRecord) -> Result<Vec<u8>, AseError> {
	let mut body = Vec::new();
	put_u16(&mut body, cel.layer);
	body.extend_from_slice(&cel.x.to_le_bytes());
	body.extend_from_slice(&cel.y.to_le_bytes());
	body.push(cel.opacity);

	match &cel.payload {
		CelPayload::Raw {
			width,
			height,
			data,
		} => {
			put_cel_prefix(&mut body, cel_type::RAW_IMAGE, cel.z_index);
			put_u16(&mut body, *width);
			put_u16(&mut body, *height);
			body.extend_from_slice(data);
		}
		CelPayload::Compressed {
			width,
			height,
			data,
		} => {
			put_cel_prefix(&mut body, cel_type::COMPRESSED_IMAGE, cel.z_index);
			put_u16(&mut body, *width);
			put_u16(&mut body, *height);
			body.extend_from_slice(&compress(data)?);
		}
		CelPayload::Linked {
			frame,
		} => {
			put_cel_prefix(&mut body, cel_type::LINKED, cel.z_index);
			put_u16(&mut body, *frame);
		}
		CelPayload::Tilemap {
			width,
			height,
			tiles,
		} => {
			put_cel_prefix(&mut body, cel_type::COMPRESSED_TILEMAP, cel.z_index);
			put_u16(&mut body, *width);
			put_u16(&mut body, *height);
			put_u16(&mut body, 32);
			put_u32(&mut body, 0x1FFF_FFFF);
			put_u32(&mut body, 0x8000_0000);
			put_u32(&mut body, 0x4000_0000);
			put_u32(&mut body, 0x2000_0000);
			body.extend_from_slice(&[0; 10]);
			let raw: Vec<u8> = tiles.iter().flat_map(|t| t.to_le_bytes()).collect();
			body.extend_from_slice(&compress(&raw)?);
		}
	}
	Ok(body)
}

fn tileset_body(tileset: &TilesetRecord) -> Result<Vec<u8>, AseError> {
	let mut body = Vec::new();
	put_u32(&mut body, tileset.id);
	put_u32(&mut body, tileset.flags);
	put_u32(&mut body, tileset.tile_count);
	put_u16(&mut body, tileset.tile_width);
	put_u16(&mut body, tileset.tile_height);
	body.extend_from_slice(&tileset.base_index.to_le_bytes());
	body.extend_from_slice(&[0; 14]);
	put_string(&mut body, &tileset.name);
	if tileset.flags & tileset_flags::EXTERNAL_FILE != 0 {
		put_u32(&mut body, 0);
		put_u32(&mut body, tileset.id);
	}
	if tileset.flags & tileset_flags::EMBEDDED != 0 {
		let compressed = compress(&tileset.data)?;
		put_u32(&mut body, compressed.len() as u32);
		body.extend_from_slice(&compressed);
	}
	Ok(body)
}

fn compress(data: &[u8]) -> Result<Vec<u8>, AseError> {
	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(data)?;
	Ok(encoder.finish()?)
}

fn put_cel_prefix(body: &mut Vec<u8>, kind: u16, z_index: i16) {
	put_u16(body, kind);
	body.extend_from_slice(&z_index.to_le_bytes());
	body.extend_from_slice(&[0; 5]);
}

fn put_rect(body: &mut Vec<u8>, x: i32, y: i32, width: u32, height: u32) {
	body.extend_from_slice(&x.to_le_bytes());
	body.extend_from_slice(&y.to_le_bytes());
	put_u32(body, width);
	put_u32(body, height);
}

fn put_u16(body: &mut Vec<u8>, value: u16) {
	body.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(body: &mut Vec<u8>, value: u32) {
	body.extend_from_slice(&value.to_le_bytes());
}

fn put_string(body: &mut Vec<u8>, value: &str) {
	put_u16(body, value.len() as u16);
	body.extend_from_slice(value.as_bytes());
}
