//! Sprite document format constants.

/// Size of the file header in bytes
pub const HEADER_SIZE: u64 = 128;

/// Magic number stored in the file header
pub const FILE_MAGIC: u16 = 0xA5E0;

/// Magic number stored in every frame header
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Size of a frame header in bytes
pub const FRAME_HEADER_SIZE: u64 = 16;

/// Size of the length + type prefix of every chunk
pub const CHUNK_HEADER_SIZE: u64 = 6;

/// Legacy chunk count value meaning "see the 32-bit field"
pub const CHUNK_COUNT_SATURATED: u16 = 0xFFFF;

/// Header flag: layer opacity fields hold valid values
pub const FLAG_LAYER_OPACITY_VALID: u32 = 1;

/// Header flag: layer chunks carry a 16-byte UUID
pub const FLAG_LAYER_UUID: u32 = 4;

/// Size of the layer UUID trailer
pub const LAYER_UUID_SIZE: usize = 16;

/// Chunk type tags.
pub mod chunk {
	/// Legacy 256-color palette
	pub const OLD_PALETTE_256: u16 = 0x0004;
	/// Legacy 64-color palette
	pub const OLD_PALETTE_64: u16 = 0x0011;
	/// Layer definition
	pub const LAYER: u16 = 0x2004;
	/// Cel (image, linked or tilemap)
	pub const CEL: u16 = 0x2005;
	/// Precise cel bounds
	pub const CEL_EXTRA: u16 = 0x2006;
	/// Embedded color profile
	pub const COLOR_PROFILE: u16 = 0x2007;
	/// External file references
	pub const EXTERNAL_FILES: u16 = 0x2008;
	/// Deprecated mask
	pub const MASK: u16 = 0x2016;
	/// Never used path chunk
	pub const PATH: u16 = 0x2017;
	/// Animation tags
	pub const TAGS: u16 = 0x2018;
	/// Palette
	pub const PALETTE: u16 = 0x2019;
	/// User data for the previous chunk
	pub const USER_DATA: u16 = 0x2020;
	/// Slice
	pub const SLICE: u16 = 0x2022;
	/// Tileset
	pub const TILESET: u16 = 0x2023;
}

/// Cel type codes.
pub mod cel_type {
	/// Uncompressed image
	pub const RAW_IMAGE: u16 = 0;
	/// Link to a cel in another frame
	pub const LINKED: u16 = 1;
	/// Zlib-compressed image
	pub const COMPRESSED_IMAGE: u16 = 2;
	/// Zlib-compressed tilemap
	pub const COMPRESSED_TILEMAP: u16 = 3;
}

/// Tileset flags.
pub mod tileset_flags {
	/// Tiles live in an external file
	pub const EXTERNAL_FILE: u32 = 1;
	/// Tiles are embedded in this chunk
	pub const EMBEDDED: u32 = 2;
	/// Tile id 0 is the empty tile
	pub const EMPTY_TILE_ZERO: u32 = 4;
}

/// User data flags.
pub mod user_data_flags {
	/// Text is present
	pub const TEXT: u32 = 1;
	/// Color is present
	pub const COLOR: u32 = 2;
}

/// Slice flags.
pub mod slice_flags {
	/// Keys carry a nine-patch center
	pub const NINE_PATCH: u32 = 1;
	/// Keys carry a pivot
	pub const PIVOT: u32 = 2;
}

/// Palette entry flag: entry has a name
pub const PALETTE_ENTRY_HAS_NAME: u16 = 1;
