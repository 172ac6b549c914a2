//! File header parsing.

use std::fmt::{self, Display};
use std::io::{Read, Seek};

use serde::{Deserialize, Serialize};

use crate::file::AseError;
use crate::file::reader::BinaryReader;

use super::constants;

/// Color depth of a sprite document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorDepth {
	/// 8 bits per pixel, palette indices
	Indexed,
	/// 16 bits per pixel, value + alpha
	Grayscale,
	/// 32 bits per pixel, RGBA
	Rgba,
}

impl ColorDepth {
	/// Returns the number of bytes each pixel occupies in a payload.
	#[inline]
	pub const fn bytes_per_pixel(self) -> usize {
		match self {
			Self::Indexed => 1,
			Self::Grayscale => 2,
			Self::Rgba => 4,
		}
	}

	/// Returns the bits-per-pixel value stored in the header.
	pub const fn bits_per_pixel(self) -> u16 {
		match self {
			Self::Indexed => 8,
			Self::Grayscale => 16,
			Self::Rgba => 32,
		}
	}
}

impl TryFrom<u16> for ColorDepth {
	type Error = AseError;

	fn try_from(value: u16) -> Result<Self, Self::Error> {
		match value {
			8 => Ok(Self::Indexed),
			16 => Ok(Self::Grayscale),
			32 => Ok(Self::Rgba),
			other => Err(AseError::UnsupportedColorDepth(other)),
		}
	}
}

impl Display for ColorDepth {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Indexed => write!(f, "Indexed (8 bpp)"),
			Self::Grayscale => write!(f, "Grayscale (16 bpp)"),
			Self::Rgba => write!(f, "RGBA (32 bpp)"),
		}
	}
}

/// Decoded file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Declared file size in bytes
	pub file_size: u32,
	/// Number of frames
	pub frame_count: u16,
	/// Canvas width in pixels
	pub width: u16,
	/// Canvas height in pixels
	pub height: u16,
	/// Color depth
	pub depth: ColorDepth,
	/// Header flags
	pub flags: u32,
	/// Deprecated global frame duration
	pub speed: u16,
	/// Palette index treated as transparent (indexed depth only)
	pub transparent_index: u8,
	/// Declared palette size (0 in old files means 256)
	pub color_count: u16,
	/// Pixel aspect ratio width
	pub pixel_width: u8,
	/// Pixel aspect ratio height
	pub pixel_height: u8,
	/// Grid origin x
	pub grid_x: i16,
	/// Grid origin y
	pub grid_y: i16,
	/// Grid cell width
	pub grid_width: u16,
	/// Grid cell height
	pub grid_height: u16,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: u64 = constants::HEADER_SIZE;

	/// Reads and validates the header, leaving the reader at the first frame.
	pub fn from_reader<R: Read + Seek>(reader: &mut BinaryReader<R>) -> Result<Self, AseError> {
		let start = reader.position();

		let file_size = reader.read_u32()?;
		let magic = reader.read_u16()?;
		if magic != constants::FILE_MAGIC {
			return Err(AseError::InvalidMagic {
				expected: constants::FILE_MAGIC,
				actual: magic,
			});
		}

		let frame_count = reader.read_u16()?;
		let width = reader.read_u16()?;
		let height = reader.read_u16()?;
		if width == 0 || height == 0 {
			return Err(AseError::InvalidCanvasSize {
				width,
				height,
			});
		}

		let depth = ColorDepth::try_from(reader.read_u16()?)?;
		let flags = reader.read_u32()?;
		let speed = reader.read_u16()?;
		reader.skip(8)?;
		let transparent_index = reader.read_u8()?;
		reader.skip(3)?;
		let color_count = reader.read_u16()?;
		let pixel_width = reader.read_u8()?;
		let pixel_height = reader.read_u8()?;
		let grid_x = reader.read_i16()?;
		let grid_y = reader.read_i16()?;
		let grid_width = reader.read_u16()?;
		let grid_height = reader.read_u16()?;

		// reserved tail
		let consumed = reader.position() - start;
		reader.skip((Self::SIZE - consumed) as usize)?;

		Ok(Self {
			file_size,
			frame_count,
			width,
			height,
			depth,
			flags,
			speed,
			transparent_index,
			color_count,
			pixel_width,
			pixel_height,
			grid_x,
			grid_y,
			grid_width,
			grid_height,
		})
	}

	/// Returns the palette size the header promises.
	pub fn declared_palette_size(&self) -> usize {
		if self.color_count == 0 {
			256
		} else {
			self.color_count as usize
		}
	}

	/// Returns `true` when layer opacity values are meaningful.
	pub fn layer_opacity_valid(&self) -> bool {
		self.flags & constants::FLAG_LAYER_OPACITY_VALID != 0
	}

	/// Returns `true` when layer chunks carry a UUID trailer.
	pub fn layers_have_uuid(&self) -> bool {
		self.flags & constants::FLAG_LAYER_UUID != 0
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Sprite Header:\n\
			- Canvas: {}x{}\n\
			- Depth: {}\n\
			- Frames: {}\n\
			- Flags: {:#06X}\n\
			- Palette size: {}\n\
			- Transparent index: {}",
			self.width,
			self.height,
			self.depth,
			self.frame_count,
			self.flags,
			self.declared_palette_size(),
			self.transparent_index,
		)
	}
}
