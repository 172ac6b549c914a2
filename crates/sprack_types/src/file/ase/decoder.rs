//! Chunk decoder.
//!
//! ## Layout
//!
//! | Part          | Size            | Notes                                        |
//! |---------------|-----------------|----------------------------------------------|
//! | File header   | 128 bytes       | magic `0xA5E0`, canvas, depth, palette info  |
//! | Frame header  | 16 bytes        | magic `0xF1FA`, chunk counts, duration       |
//! | Chunk         | `size` bytes    | `u32` size (prefix included), `u16` type     |
//!
//! Frames follow the header back to back and each frame holds its chunks.
//! After every chunk the reader is moved to `chunk_start + size`, whether or
//! not the chunk was understood, so fields added by newer editor versions and
//! unsupported chunk kinds never desynchronize the stream.
//!
//! ## Ordering
//!
//! Decoding is strictly sequential. Cels refer to layers by index, tilemap
//! layers refer to tilesets by id and linked cels refer to earlier frames, so
//! every reference is checked against what has already been decoded.
//!
//! User data chunks attach to the chunk decoded just before them. A tags chunk
//! is followed by one user data chunk per tag, consumed in tag order.

use std::io::{Read, Seek};

use log::{debug, warn};

use crate::color::{Pixel, Rgba};
use crate::file::AseError;
use crate::file::reader::BinaryReader;

use super::cel::{Cel, CelContent, ImageCel, TileMasks, TilemapCel};
use super::constants::{self, cel_type, chunk, slice_flags, tileset_flags, user_data_flags};
use super::document::{Document, Frame};
use super::header::{ColorDepth, Header};
use super::layer::{BlendMode, Layer, LayerFlags, LayerKind};
use super::palette::Palette;
use super::pixel::decode_pixels;
use super::slice::{Point, Rect, Slice, SliceKey};
use super::tag::{LoopDirection, Tag};
use super::tileset::Tileset;
use super::user_data::UserData;

/// Upper bound on palette resizes; larger requests are clamped.
const MAX_PALETTE_SIZE: usize = 1 << 16;

/// Where the next user data chunk goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserDataTarget {
	None,
	Document,
	Layer(usize),
	Cel(usize),
	Slice(usize),
	Tileset(usize),
	Tags {
		next: usize,
	},
}

/// Decodes a whole document from `reader`.
pub(crate) fn decode<P: Pixel, R: Read + Seek>(reader: R) -> Result<Document<P>, AseError> {
	let mut reader = BinaryReader::new(reader);
	let header = Header::from_reader(&mut reader)?;
	if header.frame_count == 0 {
		return Err(AseError::NoFrames);
	}
	debug!(
		"Decoding {}x{} {} document with {} frames",
		header.width, header.height, header.depth, header.frame_count
	);

	let mut decoder = Decoder::new(header);
	for index in 0..header.frame_count as usize {
		decoder.decode_frame(&mut reader, index)?;
	}

	Ok(decoder.finish())
}

struct Decoder<P> {
	header: Header,
	palette: Palette,
	frames: Vec<Frame<P>>,
	current: Frame<P>,
	layers: Vec<Layer>,
	group_stack: Vec<usize>,
	tags: Vec<Tag>,
	slices: Vec<Slice>,
	tilesets: Vec<Tileset<P>>,
	user_data: Option<UserData>,
	warnings: Vec<String>,
	target: UserDataTarget,
	seen_user_data_owner: bool,
}

impl<P: Pixel> Decoder<P> {
	fn new(mut header: Header) -> Self {
		let mut warnings = Vec::new();

		if header.depth != ColorDepth::Indexed && header.transparent_index != 0 {
			let message = format!(
				"Transparent index {} is only valid for indexed documents; using 0",
				header.transparent_index
			);
			warn!("{message}");
			warnings.push(message);
			header.transparent_index = 0;
		}

		if !header.layer_opacity_valid() {
			let message = "Layer opacity flag is not set; layer opacities are kept as stored".to_string();
			warn!("{message}");
			warnings.push(message);
		}

		Self {
			palette: Palette::new(header.transparent_index),
			frames: Vec::with_capacity(header.frame_count as usize),
			current: empty_frame(&header, 0),
			layers: Vec::new(),
			group_stack: Vec::new(),
			tags: Vec::new(),
			slices: Vec::new(),
			tilesets: Vec::new(),
			user_data: None,
			warnings,
			target: UserDataTarget::None,
			seen_user_data_owner: false,
			header,
		}
	}

	fn warn(&mut self, message: String) {
		warn!("{message}");
		self.warnings.push(message);
	}

	fn decode_frame<R: Read + Seek>(
		&mut self,
		reader: &mut BinaryReader<R>,
		index: usize,
	) -> Result<(), AseError> {
		let frame_start = reader.position();
		let frame_size = reader.read_u32()?;
		let magic = reader.read_u16()?;
		if magic != constants::FRAME_MAGIC {
			return Err(AseError::InvalidFrameMagic {
				frame: index,
				expected: constants::FRAME_MAGIC,
				actual: magic,
			});
		}

		let old_chunk_count = reader.read_u16()?;
		let duration = reader.read_u16()?;
		reader.skip(2)?;
		let new_chunk_count = reader.read_u32()?;
		let chunk_count = if old_chunk_count == constants::CHUNK_COUNT_SATURATED && new_chunk_count != 0
		{
			new_chunk_count as usize
		} else {
			old_chunk_count as usize
		};

		debug!("Frame {index}: {chunk_count} chunks, {duration} ms");

		self.current = empty_frame(&self.header, duration);
		self.target = UserDataTarget::None;

		for _ in 0..chunk_count {
			self.decode_chunk(reader, index)?;
		}

		let frame_end = frame_start + u64::from(frame_size);
		if frame_end > reader.position() {
			reader.seek(frame_end)?;
		} else if frame_end < reader.position() {
			self.warn(format!(
				"Frame {index} declares {frame_size} bytes but its chunks span {}",
				reader.position() - frame_start
			));
		}

		let frame = std::mem::replace(&mut self.current, empty_frame(&self.header, 0));
		self.frames.push(frame);
		Ok(())
	}

	fn decode_chunk<R: Read + Seek>(
		&mut self,
		reader: &mut BinaryReader<R>,
		frame: usize,
	) -> Result<(), AseError> {
		let chunk_start = reader.position();
		let size = reader.read_u32()?;
		if u64::from(size) < constants::CHUNK_HEADER_SIZE {
			return Err(AseError::InvalidChunkSize {
				offset: chunk_start,
				size,
			});
		}
		let chunk_type = reader.read_u16()?;
		let chunk_end = chunk_start + u64::from(size);

		debug!("Chunk {chunk_type:#06X} at offset {chunk_start}, {size} bytes");

		match chunk_type {
			chunk::LAYER => self.read_layer(reader)?,
			chunk::CEL => self.read_cel(reader, frame, chunk_end)?,
			chunk::TAGS => self.read_tags(reader)?,
			chunk::PALETTE => self.read_palette(reader)?,
			chunk::USER_DATA => self.read_user_data(reader, frame)?,
			chunk::SLICE => self.read_slice(reader)?,
			chunk::TILESET => self.read_tileset(reader)?,
			chunk::OLD_PALETTE_256 | chunk::OLD_PALETTE_64 => {
				self.warn(format!("Ignoring legacy palette chunk {chunk_type:#06X} in frame {frame}"));
			}
			chunk::CEL_EXTRA => self.warn(format!("Ignoring cel extra chunk in frame {frame}")),
			chunk::COLOR_PROFILE => self.warn(format!("Ignoring color profile chunk in frame {frame}")),
			chunk::EXTERNAL_FILES => {
				self.warn(format!("Ignoring external files chunk in frame {frame}"));
			}
			chunk::MASK => self.warn(format!("Ignoring deprecated mask chunk in frame {frame}")),
			chunk::PATH => self.warn(format!("Ignoring path chunk in frame {frame}")),
			other => self.warn(format!("Ignoring unknown chunk type {other:#06X} in frame {frame}")),
		}

		reader.seek(chunk_end)
	}

	fn read_layer<R: Read + Seek>(&mut self, reader: &mut BinaryReader<R>) -> Result<(), AseError> {
		let flags = LayerFlags::from_bits(reader.read_u16()?);
		let layer_type = reader.read_u16()?;
		let child_level = reader.read_u16()?;
		// default width and height, unused by the editor
		reader.skip(4)?;
		let blend_mode = BlendMode::try_from(reader.read_u16()?)?;
		let opacity = reader.read_u8()?;
		reader.skip(3)?;
		let name = reader.read_string()?;

		let kind = match layer_type {
			0 => LayerKind::Image,
			1 => LayerKind::Group {
				children: Vec::new(),
			},
			2 => {
				let tileset_id = reader.read_u32()?;
				let Some(tileset) = self.tilesets.iter().position(|t| t.id == tileset_id) else {
					return Err(AseError::MissingTileset {
						layer: name,
						tileset_id,
					});
				};
				LayerKind::Tilemap {
					tileset,
				}
			}
			other => return Err(AseError::UnknownLayerType(other)),
		};
		if self.header.layers_have_uuid() {
			reader.skip(constants::LAYER_UUID_SIZE)?;
		}

		let index = self.layers.len();
		self.group_stack.truncate(child_level as usize);
		let parent = if child_level == 0 {
			None
		} else {
			self.group_stack.last().copied()
		};
		if let Some(parent) = parent
			&& let LayerKind::Group {
				children,
			} = &mut self.layers[parent].kind
		{
			children.push(index);
		}
		if matches!(kind, LayerKind::Group { .. }) {
			self.group_stack.push(index);
		}

		debug!("Layer {index} \"{name}\" at level {child_level}");
		self.layers.push(Layer {
			name,
			flags,
			kind,
			child_level,
			parent,
			blend_mode,
			opacity,
			user_data: None,
		});
		self.set_target(UserDataTarget::Layer(index));
		Ok(())
	}

	fn read_cel<R: Read + Seek>(
		&mut self,
		reader: &mut BinaryReader<R>,
		frame: usize,
		chunk_end: u64,
	) -> Result<(), AseError> {
		let layer = reader.read_u16()? as usize;
		if layer >= self.layers.len() {
			return Err(AseError::LayerIndexOutOfRange {
				index: layer,
				count: self.layers.len(),
			});
		}
		let x = i32::from(reader.read_i16()?);
		let y = i32::from(reader.read_i16()?);
		let opacity = reader.read_u8()?;
		let kind = reader.read_u16()?;
		let z_index = reader.read_i16()?;
		reader.skip(5)?;

		let depth = self.header.depth;
		let content = match kind {
			cel_type::RAW_IMAGE => {
				let width = reader.read_u16()?;
				let height = reader.read_u16()?;
				let count = width as usize * height as usize;
				let data = reader.read_bytes(count * depth.bytes_per_pixel())?;
				CelContent::Image(ImageCel {
					width,
					height,
					pixels: decode_pixels(depth, &data, count, &self.palette)?,
				})
			}
			cel_type::LINKED => {
				let target = reader.read_u16()? as usize;
				CelContent::Linked {
					frame: self.resolve_link(frame, layer, target)?,
				}
			}
			cel_type::COMPRESSED_IMAGE => {
				let width = reader.read_u16()?;
				let height = reader.read_u16()?;
				let count = width as usize * height as usize;
				let compressed_len = chunk_end.saturating_sub(reader.position()) as usize;
				let data = reader.read_deflated(compressed_len, count * depth.bytes_per_pixel())?;
				CelContent::Image(ImageCel {
					width,
					height,
					pixels: decode_pixels(depth, &data, count, &self.palette)?,
				})
			}
			cel_type::COMPRESSED_TILEMAP => {
				if !self.layers[layer].is_tilemap() {
					return Err(AseError::TilemapCelOnImageLayer(layer));
				}
				CelContent::Tilemap(read_tilemap(reader, chunk_end)?)
			}
			other => return Err(AseError::UnknownCelType(other)),
		};

		let index = self.current.cels.len();
		self.current.cels.push(Cel {
			layer,
			x,
			y,
			opacity,
			z_index,
			content,
			user_data: None,
		});
		self.set_target(UserDataTarget::Cel(index));
		Ok(())
	}

	/// Maps a link to the frame holding the original payload.
	fn resolve_link(&self, frame: usize, layer: usize, target: usize) -> Result<usize, AseError> {
		let invalid = || AseError::InvalidLinkedCel {
			frame,
			layer,
			target,
		};
		if target >= frame {
			return Err(invalid());
		}
		let cel = self.frames.get(target).and_then(|f| f.cel_for_layer(layer)).ok_or_else(invalid)?;
		Ok(cel.linked_frame().unwrap_or(target))
	}

	fn read_tags<R: Read + Seek>(&mut self, reader: &mut BinaryReader<R>) -> Result<(), AseError> {
		let count = reader.read_u16()?;
		reader.skip(8)?;

		let first = self.tags.len();
		for _ in 0..count {
			let from = reader.read_u16()?;
			let to = reader.read_u16()?;
			let direction = LoopDirection::try_from(reader.read_u8()?)?;
			let repeat = reader.read_u16()?;
			reader.skip(6)?;
			let [r, g, b] = reader.read_array::<3>()?;
			reader.skip(1)?;
			let name = reader.read_string()?;

			if from > to {
				self.warn(format!("Tag \"{name}\" ends ({to}) before it starts ({from})"));
			}

			self.tags.push(Tag {
				name,
				from,
				to,
				direction,
				repeat,
				color: Rgba::rgb(r, g, b),
				user_data: None,
			});
		}

		if count > 0 {
			self.set_target(UserDataTarget::Tags {
				next: first,
			});
		}
		Ok(())
	}

	fn read_palette<R: Read + Seek>(&mut self, reader: &mut BinaryReader<R>) -> Result<(), AseError> {
		let mut size = reader.read_u32()? as usize;
		let first = reader.read_u32()? as usize;
		let last = reader.read_u32()? as usize;
		reader.skip(8)?;

		if size > MAX_PALETTE_SIZE {
			self.warn(format!("Palette size {size} exceeds {MAX_PALETTE_SIZE}; clamping"));
			size = MAX_PALETTE_SIZE;
		}
		self.palette.resize(size);

		if first <= last {
			for index in first..=last.min(MAX_PALETTE_SIZE - 1) {
				let flags = reader.read_u16()?;
				let [r, g, b, a] = reader.read_array::<4>()?;
				let name = if flags & constants::PALETTE_ENTRY_HAS_NAME != 0 {
					Some(reader.read_string()?)
				} else {
					None
				};
				self.palette.set(index, Rgba::new(r, g, b, a), name);
			}
		}

		if !self.seen_user_data_owner {
			self.target = UserDataTarget::Document;
		}
		Ok(())
	}

	fn read_user_data<R: Read + Seek>(
		&mut self,
		reader: &mut BinaryReader<R>,
		frame: usize,
	) -> Result<(), AseError> {
		let flags = reader.read_u32()?;
		let text = if flags & user_data_flags::TEXT != 0 {
			Some(reader.read_string()?)
		} else {
			None
		};
		let color = if flags & user_data_flags::COLOR != 0 {
			let [r, g, b, a] = reader.read_array::<4>()?;
			Some(Rgba::new(r, g, b, a))
		} else {
			None
		};
		// property maps (flag 4) are skipped by the chunk seek
		let data = UserData {
			text,
			color,
		};

		match std::mem::replace(&mut self.target, UserDataTarget::None) {
			UserDataTarget::None => {
				self.warn(format!("User data in frame {frame} has no chunk to attach to"));
			}
			UserDataTarget::Document => self.user_data = Some(data),
			UserDataTarget::Layer(index) => self.layers[index].user_data = Some(data),
			UserDataTarget::Cel(index) => self.current.cels[index].user_data = Some(data),
			UserDataTarget::Slice(index) => self.slices[index].user_data = Some(data),
			UserDataTarget::Tileset(index) => self.tilesets[index].user_data = Some(data),
			UserDataTarget::Tags {
				next,
			} => {
				self.tags[next].user_data = Some(data);
				if next + 1 < self.tags.len() {
					self.target = UserDataTarget::Tags {
						next: next + 1,
					};
				}
			}
		}
		Ok(())
	}

	fn read_slice<R: Read + Seek>(&mut self, reader: &mut BinaryReader<R>) -> Result<(), AseError> {
		let key_count = reader.read_u32()?;
		let flags = reader.read_u32()?;
		reader.skip(4)?;
		let name = reader.read_string()?;

		let mut keys = Vec::new();
		for _ in 0..key_count {
			let frame = reader.read_u32()?;
			let bounds = read_rect(reader)?;
			let center = if flags & slice_flags::NINE_PATCH != 0 {
				Some(read_rect(reader)?)
			} else {
				None
			};
			let pivot = if flags & slice_flags::PIVOT != 0 {
				Some(Point::new(reader.read_i32()?, reader.read_i32()?))
			} else {
				None
			};
			keys.push(SliceKey {
				frame,
				bounds,
				center,
				pivot,
			});
		}

		let index = self.slices.len();
		self.slices.push(Slice {
			name,
			flags,
			keys,
			user_data: None,
		});
		self.set_target(UserDataTarget::Slice(index));
		Ok(())
	}

	fn read_tileset<R: Read + Seek>(&mut self, reader: &mut BinaryReader<R>) -> Result<(), AseError> {
		let id = reader.read_u32()?;
		let flags = reader.read_u32()?;
		let tile_count = reader.read_u32()?;
		let tile_width = reader.read_u16()?;
		let tile_height = reader.read_u16()?;
		let base_index = reader.read_i16()?;
		reader.skip(14)?;
		let name = reader.read_string()?;

		if flags & tileset_flags::EXTERNAL_FILE != 0 {
			return Err(AseError::ExternalTileset {
				id,
			});
		}
		if flags & tileset_flags::EMBEDDED == 0 {
			return Err(AseError::MissingTilesetPixels {
				id,
			});
		}

		if tile_width == 0 || tile_height == 0 || u32::from(tile_height).checked_mul(tile_count).is_none() {
			return Err(AseError::InvalidTileSize {
				id,
				tile_width,
				tile_height,
				tile_count,
			});
		}

		let compressed_len = reader.read_u32()? as usize;
		let count = (tile_width as usize * tile_height as usize).saturating_mul(tile_count as usize);
		let depth = self.header.depth;
		let data = reader.read_deflated(compressed_len, count.saturating_mul(depth.bytes_per_pixel()))?;
		let pixels = decode_pixels(depth, &data, count, &self.palette)?;

		let index = self.tilesets.len();
		debug!("Tileset {id} \"{name}\": {tile_count} tiles of {tile_width}x{tile_height}");
		self.tilesets.push(Tileset {
			id,
			flags,
			tile_count,
			tile_width,
			tile_height,
			base_index,
			name,
			pixels,
			user_data: None,
		});
		self.set_target(UserDataTarget::Tileset(index));
		Ok(())
	}

	fn set_target(&mut self, target: UserDataTarget) {
		self.seen_user_data_owner = true;
		self.target = target;
	}

	fn finish(mut self) -> Document<P> {
		let declared = self.header.declared_palette_size();
		if self.palette.len() != declared {
			self.warn(format!(
				"Header declares {declared} palette colors but the palette has {}",
				self.palette.len()
			));
		}

		Document {
			width: self.header.width,
			height: self.header.height,
			depth: self.header.depth,
			flags: self.header.flags,
			pixel_ratio: (self.header.pixel_width, self.header.pixel_height),
			grid: (self.header.grid_x, self.header.grid_y, self.header.grid_width, self.header.grid_height),
			frames: self.frames,
			layers: self.layers,
			tags: self.tags,
			slices: self.slices,
			tilesets: self.tilesets,
			palette: self.palette,
			user_data: self.user_data,
			warnings: self.warnings,
		}
	}
}

fn empty_frame<P>(header: &Header, duration: u16) -> Frame<P> {
	Frame {
		duration,
		width: header.width,
		height: header.height,
		cels: Vec::new(),
	}
}

fn read_rect<R: Read + Seek>(reader: &mut BinaryReader<R>) -> Result<Rect, AseError> {
	Ok(Rect::new(reader.read_i32()?, reader.read_i32()?, reader.read_u32()?, reader.read_u32()?))
}

fn read_tilemap<R: Read + Seek>(
	reader: &mut BinaryReader<R>,
	chunk_end: u64,
) -> Result<TilemapCel, AseError> {
	let width = reader.read_u16()?;
	let height = reader.read_u16()?;
	let bits_per_tile = reader.read_u16()?;
	let masks = TileMasks {
		id: reader.read_u32()?,
		flip_x: reader.read_u32()?,
		flip_y: reader.read_u32()?,
		flip_diagonal: reader.read_u32()?,
	};
	reader.skip(10)?;

	let bytes_per_tile = match bits_per_tile {
		8 => 1,
		16 => 2,
		32 => 4,
		other => return Err(AseError::UnsupportedTileBits(other)),
	};
	let count = width as usize * height as usize;
	let expected = count * bytes_per_tile;
	let compressed_len = chunk_end.saturating_sub(reader.position()) as usize;
	let data = reader.read_deflated(compressed_len, expected)?;
	if data.len() < expected {
		return Err(AseError::PixelDataLength {
			expected,
			actual: data.len(),
		});
	}

	let tiles = data
		.chunks_exact(bytes_per_tile)
		.map(|raw| {
			let value = match *raw {
				[a] => u32::from(a),
				[a, b] => u32::from(u16::from_le_bytes([a, b])),
				[a, b, c, d] => u32::from_le_bytes([a, b, c, d]),
				_ => 0,
			};
			masks.unpack(value)
		})
		.collect();

	Ok(TilemapCel {
		width,
		height,
		bits_per_tile,
		masks,
		tiles,
	})
}
