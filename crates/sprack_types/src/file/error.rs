//! Error types for sprite document decoding.

use thiserror::Error;

/// Errors that abort decoding of a sprite document.
///
/// Recoverable oddities (unsupported chunk kinds, palette size mismatches and
/// similar) are not errors; they are recorded as warnings on the decoded
/// document instead.
#[derive(Debug, Error)]
pub enum AseError {
	/// A read ran past the end of the byte source
	#[error("Unexpected end of input at offset {position}: {requested} bytes requested")]
	EndOfInput {
		/// Offset at which the read started
		position: u64,
		/// Number of bytes the read needed
		requested: usize,
	},

	/// Invalid file magic number
	#[error("Invalid magic number: expected {expected:#06X}, got {actual:#06X}")]
	InvalidMagic {
		/// Expected magic number
		expected: u16,
		/// Magic number found in the file
		actual: u16,
	},

	/// Invalid frame magic number
	#[error("Invalid magic number in frame {frame}: expected {expected:#06X}, got {actual:#06X}")]
	InvalidFrameMagic {
		/// Index of the offending frame
		frame: usize,
		/// Expected magic number
		expected: u16,
		/// Magic number found in the frame header
		actual: u16,
	},

	/// Canvas width or height is zero
	#[error("Invalid canvas size {width}x{height}")]
	InvalidCanvasSize {
		/// Declared canvas width
		width: u16,
		/// Declared canvas height
		height: u16,
	},

	/// The header declares no frames
	#[error("Document declares zero frames")]
	NoFrames,

	/// Color depth other than 8, 16 or 32 bits per pixel
	#[error("Unsupported color depth: {0} bits per pixel")]
	UnsupportedColorDepth(u16),

	/// Unknown layer type in a layer chunk
	#[error("Unknown layer type: {0}")]
	UnknownLayerType(u16),

	/// Unknown blend mode in a layer chunk
	#[error("Unknown blend mode: {0}")]
	UnknownBlendMode(u16),

	/// Unknown cel type in a cel chunk
	#[error("Unknown cel type: {0}")]
	UnknownCelType(u16),

	/// Unknown loop direction in a tags chunk
	#[error("Unknown loop direction: {0}")]
	UnknownLoopDirection(u8),

	/// A cel references a layer that has not been declared
	#[error("Cel references layer {index}, but only {count} layers are declared")]
	LayerIndexOutOfRange {
		/// Layer index stored in the cel
		index: usize,
		/// Number of layers decoded so far
		count: usize,
	},

	/// A linked cel does not resolve to an earlier image cel on the same layer
	#[error("Linked cel in frame {frame} (layer {layer}) points at frame {target} which has no cel to link")]
	InvalidLinkedCel {
		/// Frame containing the linked cel
		frame: usize,
		/// Layer of the linked cel
		layer: usize,
		/// Frame the link points at
		target: usize,
	},

	/// A tilemap layer references a tileset that has not been decoded
	#[error("Tilemap layer \"{layer}\" references unknown tileset {tileset_id}")]
	MissingTileset {
		/// Name of the tilemap layer
		layer: String,
		/// Tileset id stored in the layer
		tileset_id: u32,
	},

	/// A tilemap cel was found on a layer that is not a tilemap layer
	#[error("Tilemap cel found on non-tilemap layer {0}")]
	TilemapCelOnImageLayer(usize),

	/// Tileset pixels live in an external file
	#[error("Tileset {id} references an external file, which is not supported")]
	ExternalTileset {
		/// Tileset id
		id: u32,
	},

	/// Tileset has no embedded pixel data
	#[error("Tileset {id} has no embedded tile pixels")]
	MissingTilesetPixels {
		/// Tileset id
		id: u32,
	},

	/// Tileset tiles have no area, or stacking them overflows the texture height
	#[error("Tileset {id} has invalid tile geometry: {tile_count} tiles of {tile_width}x{tile_height}")]
	InvalidTileSize {
		/// Tileset id
		id: u32,
		/// Tile width
		tile_width: u16,
		/// Tile height
		tile_height: u16,
		/// Number of tiles
		tile_count: u32,
	},

	/// Tilemap cel uses an unsupported tile width
	#[error("Unsupported tile size: {0} bits per tile")]
	UnsupportedTileBits(u16),

	/// Chunk header declares an impossible size
	#[error("Invalid chunk size {size} at offset {offset}")]
	InvalidChunkSize {
		/// Offset of the chunk header
		offset: u64,
		/// Declared chunk size
		size: u32,
	},

	/// Pixel payload is shorter than its declared dimensions need
	#[error("Insufficient pixel data: expected {expected} bytes, got {actual} bytes")]
	PixelDataLength {
		/// Number of bytes needed
		expected: usize,
		/// Number of bytes available
		actual: usize,
	},

	/// A zlib stream could not be inflated
	#[error("Failed to decompress data at offset {offset}: {source}")]
	Decompression {
		/// Offset of the compressed stream
		offset: u64,
		/// Underlying inflate error
		#[source]
		source: std::io::Error,
	},

	/// A string field is not valid UTF-8
	#[error(transparent)]
	InvalidString(#[from] std::string::FromUtf8Error),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
